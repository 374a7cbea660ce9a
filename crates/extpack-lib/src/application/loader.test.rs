use super::*;
use crate::primitives::TerminalCapsDetectIntent;
use std::path::PathBuf;

fn cli_with_paths() -> AppConfig {
    AppConfig {
        workdir: Some(PathBuf::from("/work")),
        data_dir: Some(PathBuf::from("/data")),
        editor_home: Some(PathBuf::from("/home/u")),
        ..AppConfig::default()
    }
}

#[test]
fn test_environment_color_applies_under_default_cli() {
    let env = EnvironmentConfig {
        no_color: Some("1".into()),
        ..EnvironmentConfig::default()
    };
    let config = AppConfig::resolve(cli_with_paths(), &env).unwrap();
    assert_eq!(config.color, TerminalCapsDetectIntent::Never);
}

#[test]
fn test_explicit_cli_color_beats_environment() {
    let env = EnvironmentConfig {
        no_color: Some("1".into()),
        ..EnvironmentConfig::default()
    };
    let cli = AppConfig {
        color: TerminalCapsDetectIntent::Always,
        ..cli_with_paths()
    };
    let config = AppConfig::resolve(cli, &env).unwrap();
    assert_eq!(config.color, TerminalCapsDetectIntent::Always);
}

#[test]
fn test_resolve_derives_packs_dir() {
    let config = AppConfig::resolve(cli_with_paths(), &EnvironmentConfig::default()).unwrap();
    assert_eq!(config.packs_dir, Some(PathBuf::from("/work/packs")));
}
