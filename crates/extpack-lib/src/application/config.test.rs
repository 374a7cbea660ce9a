use super::*;
use std::path::Path;

fn resolved(config: AppConfig) -> AppConfig {
    let mut config = AppConfig {
        workdir: config.workdir.or(Some(PathBuf::from("/work"))),
        data_dir: config.data_dir.or(Some(PathBuf::from("/data"))),
        editor_home: config.editor_home.or(Some(PathBuf::from("/home/u"))),
        ..config
    };
    config.validate().unwrap();
    config
}

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.color, TerminalCapsDetectIntent::Auto);
    assert_eq!(config.output, OutputFormat::Text);
    assert_eq!(config.packager, "npx vsce package");
    assert!(!config.installed);
    assert!(!config.yes);
}

#[test]
fn test_config_merging_prefers_non_defaults() {
    let base = AppConfig {
        packager: "pnpm vsce package".to_string(),
        ..AppConfig::default()
    };
    let cli = AppConfig {
        log_level: 3,
        output: OutputFormat::Json,
        yes: true,
        workdir: Some(PathBuf::from("/tmp/w")),
        ..AppConfig::default()
    };

    let merged = base.merge_with(cli);
    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.output, OutputFormat::Json);
    assert!(merged.yes);
    assert_eq!(merged.workdir.as_deref(), Some(Path::new("/tmp/w")));
    // Untouched by the CLI layer
    assert_eq!(merged.packager, "pnpm vsce package");
}

#[test]
fn test_development_packs_root_is_under_workdir() {
    let config = resolved(AppConfig::default());
    assert_eq!(config.packs_root(), PathBuf::from("/work/packs"));
}

#[test]
fn test_installed_packs_root_is_under_data_dir() {
    let config = resolved(AppConfig {
        installed: true,
        ..AppConfig::default()
    });
    assert_eq!(config.packs_root(), PathBuf::from("/data/packs"));
}

#[test]
fn test_explicit_packs_dir_wins() {
    let config = resolved(AppConfig {
        installed: true,
        packs_dir: Some(PathBuf::from("/elsewhere")),
        ..AppConfig::default()
    });
    assert_eq!(config.packs_root(), PathBuf::from("/elsewhere"));
}

#[test]
fn test_packager_command_split() {
    let config = AppConfig::default();
    let (program, args) = config.packager_command().unwrap();
    assert_eq!(program, "npx");
    assert_eq!(args, vec!["vsce", "package"]);
}

#[test]
fn test_blank_packager_fails_validation() {
    let mut config = AppConfig {
        packager: "   ".to_string(),
        workdir: Some(PathBuf::from("/work")),
        data_dir: Some(PathBuf::from("/data")),
        editor_home: Some(PathBuf::from("/home/u")),
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_logger_config_uses_verbosity() {
    let config = AppConfig {
        log_level: 2,
        ..AppConfig::default()
    };
    let logger = config.to_logger_config(&crate::terminal::TerminalCapabilities::default());
    assert_eq!(logger.level, LogLevel::Info);
    assert_eq!(logger.format, LogFormat::Text);
}
