use super::*;

fn env(f: impl FnOnce(&mut EnvironmentConfig)) -> EnvironmentConfig {
    let mut config = EnvironmentConfig::default();
    f(&mut config);
    config
}

#[test]
fn test_no_color_disables() {
    let config = env(|e| e.no_color = Some("1".into()));
    assert_eq!(
        config.apply_color_config(TerminalCapsDetectIntent::Auto),
        TerminalCapsDetectIntent::Never
    );
}

#[test]
fn test_empty_no_color_is_ignored() {
    let config = env(|e| e.no_color = Some(String::new()));
    assert_eq!(
        config.apply_color_config(TerminalCapsDetectIntent::Auto),
        TerminalCapsDetectIntent::Auto
    );
}

#[test]
fn test_force_color_beats_no_color_and_clicolor() {
    let config = env(|e| {
        e.clicolor = Some("0".into());
        e.no_color = Some("1".into());
        e.force_color = Some("1".into());
    });
    assert_eq!(
        config.apply_color_config(TerminalCapsDetectIntent::Auto),
        TerminalCapsDetectIntent::Always
    );
}

#[test]
fn test_ci_always_disables() {
    let config = env(|e| {
        e.ci = Some("true".into());
        e.force_color = Some("3".into());
    });
    assert_eq!(
        config.apply_color_config(TerminalCapsDetectIntent::Always),
        TerminalCapsDetectIntent::Never
    );
}

#[test]
fn test_invalid_force_color_is_ignored() {
    let config = env(|e| e.force_color = Some("maybe".into()));
    assert_eq!(
        config.apply_color_config(TerminalCapsDetectIntent::Auto),
        TerminalCapsDetectIntent::Auto
    );
}
