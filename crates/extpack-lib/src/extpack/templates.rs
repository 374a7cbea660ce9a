//! Embedded handlebars templates for generated pack files

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

const README_TEMPLATE: &str = "readme";

/// Template system errors
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template registration error: {message}")]
    RegisterError { message: String },

    #[error("Template rendering error: {message}")]
    RenderError { message: String },
}

#[derive(Serialize)]
struct ReadmeContext<'a> {
    display_name: &'a str,
    description: &'a str,
    extensions: &'a [String],
}

/// Renders the README written next to a new pack's manifest
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        // Markdown output; HTML escaping would mangle ids and descriptions
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string(
                README_TEMPLATE,
                include_str!("../../templates/README.md.hbs"),
            )
            .map_err(|e| TemplateError::RegisterError {
                message: e.to_string(),
            })?;

        Ok(Self { handlebars })
    }

    pub fn render_readme(
        &self,
        display_name: &str,
        description: &str,
        extensions: &[String],
    ) -> Result<String, TemplateError> {
        let context = ReadmeContext {
            display_name,
            description,
            extensions,
        };
        self.handlebars
            .render(README_TEMPLATE, &context)
            .map_err(|e| TemplateError::RenderError {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    include!("templates.test.rs");
}
