use super::*;
use crate::primitives::OutputFormat;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("extpack").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = parse(&["packs", "--output", "json", "--yes"]);
    assert_eq!(cli.config.output, OutputFormat::Json);
    assert!(cli.config.yes);
    assert!(matches!(cli.command, Some(Commands::Packs { search: None })));
}

#[test]
fn test_create_collects_extensions() {
    let cli = parse(&["create", "web", "--display-name", "Web Dev", "a.one", "b.two"]);
    match cli.command {
        Some(Commands::Create {
            name,
            display_name,
            extensions,
            ..
        }) => {
            assert_eq!(name, "web");
            assert_eq!(display_name.as_deref(), Some("Web Dev"));
            assert_eq!(extensions, vec!["a.one", "b.two"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_update_extensions_are_comma_separated() {
    let cli = parse(&["update", "web", "--extensions", "a.one,b.two"]);
    match cli.command {
        Some(Commands::Update { extensions, .. }) => {
            assert_eq!(
                extensions,
                Some(vec!["a.one".to_string(), "b.two".to_string()])
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_update_accepts_empty_description() {
    let cli = parse(&["update", "web", "--description", ""]);
    match cli.command {
        Some(Commands::Update { description, .. }) => assert_eq!(description.as_deref(), Some("")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_extensions_editor_conflicts_with_all() {
    let result = Cli::try_parse_from(["extpack", "extensions", "--editor", "cursor", "--all"]);
    assert!(result.is_err());
}

#[test]
fn test_ignored_subcommands() {
    let cli = parse(&["ignored", "toggle", "ms-python.python"]);
    assert!(matches!(
        cli.command,
        Some(Commands::Ignored(IgnoredCommand::Toggle { ref id })) if id == "ms-python.python"
    ));
}

#[test]
fn test_requires_packs_root() {
    assert!(Commands::Build { pack: "x".into() }.requires_packs_root());
    assert!(!Commands::Version.requires_packs_root());
    assert!(!Commands::Ignored(IgnoredCommand::List).requires_packs_root());
}
