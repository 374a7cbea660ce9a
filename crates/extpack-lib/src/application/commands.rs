//! Command execution handlers
//!
//! Every handler takes a `&dyn Session`, renders human output through the
//! session's display when `--output text`, and returns the command's result
//! as JSON data. The dispatcher wraps that data (or the error) in an
//! `Envelope` when `--output json`.

use crate::application::cli::IgnoredCommand;
use crate::application::session::{CommandSession, Session};
use crate::application::{CliConfig, Commands};
use crate::display::{DisplayProviderExt, OperationSummary};
use crate::extpack::search::DEFAULT_THRESHOLD;
use crate::extpack::{
    EditorScan, EditorScanner, EditorVariant, Envelope, ExtensionPack, IgnoredStore,
    InstalledExtension, Mutation, PackError, PackScan, PackScanner, PackStore, PackUpdate,
    Packager, matches_any,
};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashSet;

/// Execute CLI commands using the session-based architecture
pub async fn execute_command(config: CliConfig) -> Result<()> {
    // Create command session (owns all ephemeral state)
    let session = CommandSession::new(config.app_config);

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            session
                .display()
                .status()
                .message("extpack - editor extension pack management");
            session
                .display()
                .status()
                .subtle("Run 'extpack --help' for usage information");
            return Ok(());
        }
    };

    execute_command_with_session(command, &session).await
}

/// Execute a specific command with a provided session (for testing)
pub async fn execute_command_with_session(command: Commands, session: &dyn Session) -> Result<()> {
    if command.requires_packs_root() {
        tracing::debug!(
            root = %session.config().app_config().packs_root().display(),
            "resolved packs root"
        );
    }

    let result = dispatch(command, session).await;
    if !is_json(session) {
        return result.map(|_| ());
    }

    match result {
        Ok(data) => emit(session, &Envelope::ok(data)),
        Err(e) => {
            emit(session, &Envelope::<Value>::failure(format!("{:#}", e)))?;
            Err(e)
        }
    }
}

async fn dispatch(command: Commands, session: &dyn Session) -> Result<Value> {
    match command {
        Commands::Requirements => handle_requirements(session).await,
        Commands::Version => handle_version(session).await,
        Commands::Packs { search } => handle_packs(session, search).await,
        Commands::Show { pack } => handle_show(session, &pack).await,
        Commands::Create {
            name,
            display_name,
            description,
            extensions,
        } => handle_create(session, name, display_name, description, extensions).await,
        Commands::Update {
            pack,
            display_name,
            description,
            extensions,
        } => handle_update(session, &pack, display_name, description, extensions).await,
        Commands::Add { pack, extension } => handle_add(session, &pack, extension).await,
        Commands::Remove { pack, extension } => handle_remove(session, &pack, &extension).await,
        Commands::Build { pack } => handle_build(session, &pack).await,
        Commands::Extensions {
            editor,
            all,
            search,
            include_ignored,
        } => handle_extensions(session, editor, all, search, include_ignored).await,
        Commands::Ignored(command) => handle_ignored(session, command).await,
    }
}

fn is_json(session: &dyn Session) -> bool {
    session.config().app_config().is_json()
}

/// Write an envelope to stdout as the command's only output
fn emit<T: Serialize>(session: &dyn Session, envelope: &Envelope<T>) -> Result<()> {
    let text = envelope
        .to_json()
        .context("Failed to serialize command result")?;
    session.display().status().message(&text);
    Ok(())
}

fn to_data<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).context("Failed to serialize command result")
}

async fn handle_requirements(session: &dyn Session) -> Result<Value> {
    let packager = Packager::from_session(session)?;
    let found = packager.check_available();

    if !is_json(session) {
        let status = session.display().status();
        status.section("Checking tool dependencies");
        match &found {
            Some(path) => status.tool_check(packager.program(), true, &path.display().to_string()),
            None => {
                status.tool_check(packager.program(), false, "");
                status.subtle(&format!(
                    "   '{}' must be on PATH to build packs",
                    packager.command_line()
                ));
            }
        }
    }

    Ok(json!({
        "packager": packager.command_line(),
        "program": packager.program(),
        "available": found.is_some(),
        "path": found,
    }))
}

async fn handle_version(session: &dyn Session) -> Result<Value> {
    let version = env!("CARGO_PKG_VERSION");

    if !is_json(session) {
        session
            .display()
            .status()
            .emphasis(&format!("extpack {}", version));
        session
            .display()
            .status()
            .message("Group installed editor extensions into shareable extension packs");
        session.display().status().message("");

        let build_info = [
            (
                "Built from commit",
                option_env!("GIT_HASH").unwrap_or("unknown"),
            ),
            ("Build date", option_env!("BUILD_DATE").unwrap_or("unknown")),
            ("Target", std::env::consts::ARCH),
        ];
        session.display().table().properties(&build_info);
    }

    Ok(json!({ "name": "extpack", "version": version }))
}

fn pack_rows(packs: &[ExtensionPack]) -> Vec<Vec<String>> {
    packs
        .iter()
        .map(|pack| {
            vec![
                pack.name.clone(),
                pack.display_name.clone(),
                pack.version.clone(),
                pack.extension_pack.len().to_string(),
            ]
        })
        .collect()
}

fn render_table(session: &dyn Session, headers: &[&str], rows: &[Vec<String>]) {
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect();
    session.display().table().table(headers, &rows);
}

async fn handle_packs(session: &dyn Session, search: Option<String>) -> Result<Value> {
    let scanner = PackScanner::from_session(session);
    let mut scan = match scanner.scan() {
        Ok(scan) => scan,
        Err(PackError::RootMissing { path }) => {
            crate::log_warn!(format!("Packs directory not found: {}", path.display()));
            PackScan::default()
        }
        Err(e) => return Err(e).context("Failed to scan packs"),
    };

    if let Some(query) = search.as_deref() {
        scan.packs.retain(|pack| {
            matches_any(
                query,
                &[
                    pack.name.as_str(),
                    pack.display_name.as_str(),
                    pack.description.as_str(),
                ],
                DEFAULT_THRESHOLD,
            )
        });
    }

    if !is_json(session) {
        if !scan.packs.is_empty() {
            render_table(
                session,
                &["Name", "Display Name", "Version", "Extensions"],
                &pack_rows(&scan.packs),
            );
        }
        for failure in &scan.failures {
            session.display().status().warning(&format!(
                "{}: {}",
                failure.path.display(),
                failure.reason
            ));
        }
        session.display().display_summary(
            "Packs",
            &OperationSummary::new(scan.packs.len(), scan.failures.len()),
        );
    }

    to_data(&scan)
}

async fn handle_show(session: &dyn Session, name: &str) -> Result<Value> {
    let pack = PackStore::from_session(session)
        .get_pack(name)
        .with_context(|| format!("Failed to load pack '{}'", name))?;

    if !is_json(session) {
        let folder = pack.folder_path.display().to_string();
        let count = pack.extension_pack.len().to_string();
        session.display().table().properties(&[
            ("Name", pack.name.as_str()),
            ("Display name", pack.display_name.as_str()),
            ("Description", pack.description.as_str()),
            ("Version", pack.version.as_str()),
            ("Folder", folder.as_str()),
            ("Extensions", count.as_str()),
        ]);
        let ids: Vec<&str> = pack.extension_pack.iter().map(String::as_str).collect();
        session.display().status().list(&ids);
    }

    to_data(&pack)
}

async fn handle_create(
    session: &dyn Session,
    name: String,
    display_name: Option<String>,
    description: Option<String>,
    extensions: Vec<String>,
) -> Result<Value> {
    let display_name = match display_name {
        Some(display_name) => display_name,
        None => session
            .interactive()
            .text_input("Display name", name.clone())?,
    };

    let pack = PackStore::from_session(session)
        .create_pack(
            &name,
            &display_name,
            description.as_deref().unwrap_or_default(),
            extensions,
        )
        .with_context(|| format!("Failed to create pack '{}'", name))?;

    if !is_json(session) {
        session
            .display()
            .status()
            .success("Created pack", &pack.folder_path.display().to_string());
    }

    to_data(&pack)
}

async fn handle_update(
    session: &dyn Session,
    name: &str,
    display_name: Option<String>,
    description: Option<String>,
    extensions: Option<Vec<String>>,
) -> Result<Value> {
    let update = PackUpdate {
        display_name,
        description,
        extension_pack: extensions.map(|ids| {
            ids.into_iter()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect()
        }),
    };
    if update.is_empty() {
        bail!("Nothing to update; pass --display-name, --description, or --extensions");
    }

    let pack = PackStore::from_session(session)
        .update_pack(name, update)
        .with_context(|| format!("Failed to update pack '{}'", name))?;

    if !is_json(session) {
        session
            .display()
            .status()
            .success("Updated pack", &pack.name);
    }

    to_data(&pack)
}

/// Interactive pick from the primary editor's extensions, minus ignored ones
fn pick_extension(session: &dyn Session, pack: &ExtensionPack) -> Result<String> {
    let ignored: HashSet<String> = IgnoredStore::from_session(session)
        .list()
        .context("Failed to read ignored extensions")?
        .into_iter()
        .collect();
    let candidates: Vec<InstalledExtension> = EditorScanner::from_session(session)
        .list_primary()
        .context("Failed to scan installed extensions")?
        .into_iter()
        .filter(|ext| !ignored.contains(&ext.id) && !pack.contains(&ext.id))
        .collect();

    let options: Vec<String> = candidates
        .iter()
        .map(|ext| format!("{} ({})", ext.name, ext.id))
        .collect();
    let prompt = format!("Extension to add to {}", pack.display_name);
    match session.interactive().fuzzy_select(&prompt, &options)? {
        Some(index) if index < candidates.len() => Ok(candidates[index].id.clone()),
        _ => bail!("No extension selected; pass an extension identifier"),
    }
}

fn report_mutation(session: &dyn Session, outcome: Mutation, applied: &str, unchanged: &str) {
    if is_json(session) {
        return;
    }
    match outcome {
        Mutation::Applied => session.display().status().success(applied, ""),
        Mutation::Unchanged => session.display().status().info(unchanged),
    }
}

async fn handle_add(session: &dyn Session, name: &str, extension: Option<String>) -> Result<Value> {
    let store = PackStore::from_session(session);
    let extension = match extension {
        Some(extension) => extension,
        None => {
            let pack = store
                .get_pack(name)
                .with_context(|| format!("Failed to load pack '{}'", name))?;
            pick_extension(session, &pack)?
        }
    };

    let outcome = store
        .add_extension(name, &extension)
        .with_context(|| format!("Failed to add {} to pack '{}'", extension, name))?;
    report_mutation(
        session,
        outcome,
        &format!("Added {} to {}", extension, name),
        &format!("{} is already in {}", extension, name),
    );

    Ok(json!({
        "pack": name,
        "extension": extension,
        "changed": outcome.is_applied(),
    }))
}

async fn handle_remove(session: &dyn Session, name: &str, extension: &str) -> Result<Value> {
    let outcome = PackStore::from_session(session)
        .remove_extension(name, extension)
        .with_context(|| format!("Failed to remove {} from pack '{}'", extension, name))?;
    report_mutation(
        session,
        outcome,
        &format!("Removed {} from {}", extension, name),
        &format!("{} is not in {}", extension, name),
    );

    Ok(json!({
        "pack": name,
        "extension": extension,
        "changed": outcome.is_applied(),
    }))
}

async fn handle_build(session: &dyn Session, name: &str) -> Result<Value> {
    let pack = PackStore::from_session(session)
        .get_pack(name)
        .with_context(|| format!("Failed to load pack '{}'", name))?;
    let packager = Packager::from_session(session)?;

    if !is_json(session) {
        session
            .display()
            .status()
            .checking(&format!("{} with {}", pack.name, packager.command_line()));
    }

    let built = packager
        .build(&pack)
        .with_context(|| format!("Failed to build pack '{}'", name))?;

    if !is_json(session) {
        for warning in &built.warnings {
            session.display().status().warning(warning);
        }
        session
            .display()
            .status()
            .success("Built", &built.output_path.display().to_string());
    }

    to_data(&built)
}

fn extension_rows(extensions: &[InstalledExtension]) -> Vec<Vec<String>> {
    extensions
        .iter()
        .map(|ext| vec![ext.name.clone(), ext.id.clone(), ext.version.clone()])
        .collect()
}

fn keep_extension(
    ext: &InstalledExtension,
    query: Option<&str>,
    hidden: &HashSet<String>,
) -> bool {
    if hidden.contains(&ext.id) {
        return false;
    }
    query.is_none_or(|query| {
        matches_any(
            query,
            &[
                ext.name.as_str(),
                ext.id.as_str(),
                ext.publisher_display_name.as_deref().unwrap_or_default(),
            ],
            DEFAULT_THRESHOLD,
        )
    })
}

async fn handle_extensions(
    session: &dyn Session,
    editor: Option<String>,
    all: bool,
    search: Option<String>,
    include_ignored: bool,
) -> Result<Value> {
    let hidden: HashSet<String> = if include_ignored {
        HashSet::new()
    } else {
        IgnoredStore::from_session(session)
            .list()
            .context("Failed to read ignored extensions")?
            .into_iter()
            .collect()
    };
    let query = search.as_deref();
    let scanner = EditorScanner::from_session(session);

    if all {
        let scan = scanner.list_all();
        let filtered = EditorScan {
            editors: scan
                .editors
                .into_iter()
                .map(|(editor, extensions)| {
                    let kept = extensions
                        .into_iter()
                        .filter(|ext| keep_extension(ext, query, &hidden))
                        .collect::<Vec<_>>();
                    (editor, kept)
                })
                .filter(|(_, extensions)| !extensions.is_empty())
                .collect(),
            failures: scan.failures,
        };

        if !is_json(session) {
            let count = filtered.editors.len();
            for (index, (editor, extensions)) in filtered.editors.iter().enumerate() {
                session.display().status().step(index + 1, count, editor);
                render_table(session, &["Name", "Id", "Version"], &extension_rows(extensions));
            }
            for failure in &filtered.failures {
                session
                    .display()
                    .status()
                    .warning(&format!("{}: {}", failure.editor, failure.reason));
            }
            session.display().display_summary(
                "Extensions",
                &OperationSummary::new(filtered.total(), filtered.failures.len()),
            );
        }

        return to_data(&filtered);
    }

    let key = editor.unwrap_or_else(|| EditorVariant::primary().scheme.to_string());
    let extensions: Vec<InstalledExtension> = scanner
        .list_for_editor(&key)
        .with_context(|| format!("Failed to list extensions for '{}'", key))?
        .into_iter()
        .filter(|ext| keep_extension(ext, query, &hidden))
        .collect();
    let editor_name = EditorVariant::find(&key)
        .map(|variant| variant.display_name)
        .unwrap_or_default();

    if !is_json(session) {
        if !extensions.is_empty() {
            render_table(session, &["Name", "Id", "Version"], &extension_rows(&extensions));
        }
        session.display().display_summary(
            &format!("{} extensions", editor_name),
            &OperationSummary::new(extensions.len(), 0),
        );
    }

    Ok(json!({
        "editor": editor_name,
        "extensions": to_data(&extensions)?,
    }))
}

async fn handle_ignored(session: &dyn Session, command: IgnoredCommand) -> Result<Value> {
    let store = IgnoredStore::from_session(session);
    let text = !is_json(session);
    let status = session.display().status();

    match command {
        IgnoredCommand::List => {
            let ids = store.list().context("Failed to read ignored extensions")?;
            if text {
                if ids.is_empty() {
                    status.info("No ignored extensions");
                } else {
                    let items: Vec<&str> = ids.iter().map(String::as_str).collect();
                    status.list(&items);
                }
            }
            to_data(&ids)
        }
        IgnoredCommand::Add { id } => {
            let changed = store
                .add(&id)
                .with_context(|| format!("Failed to ignore {}", id))?;
            if text {
                if changed {
                    status.success("Ignored", &id);
                } else {
                    status.info(&format!("{} is already ignored", id));
                }
            }
            Ok(json!({ "id": id, "ignored": true, "changed": changed }))
        }
        IgnoredCommand::Remove { id } => {
            let changed = store
                .remove(&id)
                .with_context(|| format!("Failed to stop ignoring {}", id))?;
            if text {
                if changed {
                    status.success("No longer ignored", &id);
                } else {
                    status.info(&format!("{} was not ignored", id));
                }
            }
            Ok(json!({ "id": id, "ignored": false, "changed": changed }))
        }
        IgnoredCommand::Toggle { id } => {
            let ignored = store
                .toggle(&id)
                .with_context(|| format!("Failed to toggle {}", id))?;
            if text {
                let state = if ignored { "Ignored" } else { "No longer ignored" };
                status.success(state, &id);
            }
            Ok(json!({ "id": id, "ignored": ignored, "changed": true }))
        }
        IgnoredCommand::Clear => {
            store.clear().context("Failed to clear ignored extensions")?;
            if text {
                status.complete("Cleared ignored extensions");
            }
            Ok(json!({ "ignored": [] }))
        }
        IgnoredCommand::Check { id } => {
            let ignored = store
                .contains(&id)
                .context("Failed to read ignored extensions")?;
            if text {
                let state = if ignored { "ignored" } else { "not ignored" };
                status.info(&format!("{} is {}", id, state));
            }
            Ok(json!({ "id": id, "ignored": ignored }))
        }
    }
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
