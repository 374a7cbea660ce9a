use super::*;

#[test]
fn test_readme_lists_extensions() {
    let engine = TemplateEngine::new().unwrap();
    let readme = engine
        .render_readme(
            "Web Dev",
            "Tools for the web",
            &["esbenp.prettier-vscode".to_string(), "dbaeumer.vscode-eslint".to_string()],
        )
        .unwrap();

    assert!(readme.starts_with("# Web Dev\n"));
    assert!(readme.contains("Tools for the web"));
    assert!(readme.contains("- esbenp.prettier-vscode"));
    assert!(readme.contains("- dbaeumer.vscode-eslint"));
    assert!(!readme.contains("No extensions yet"));
    assert!(readme.contains("## Installation"));
    assert!(readme.contains("3. The extension pack will be available in the Extensions view"));
}

#[test]
fn test_readme_without_extensions() {
    let engine = TemplateEngine::new().unwrap();
    let readme = engine.render_readme("Empty", "", &[]).unwrap();

    assert!(readme.contains("## Extensions Included"));
    assert!(readme.contains("- No extensions yet"));
}

#[test]
fn test_readme_does_not_escape_markup() {
    let engine = TemplateEngine::new().unwrap();
    let readme = engine
        .render_readme("C & C++", "<fast> \"native\" tools", &[])
        .unwrap();

    assert!(readme.contains("# C & C++"));
    assert!(readme.contains("<fast> \"native\" tools"));
}
