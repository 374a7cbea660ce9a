use super::*;

fn env_with(f: impl FnOnce(&mut TerminalEnvConfig)) -> TerminalEnvConfig {
    let mut env = TerminalEnvConfig::default();
    f(&mut env);
    env
}

#[test]
fn test_truecolor_detection_via_colorterm() {
    let env = env_with(|e| e.colorterm = Some("truecolor".into()));
    assert_eq!(
        detect_color_from_environment(&env),
        TerminalColorCaps::TrueColor
    );
}

#[test]
fn test_256_color_detection_via_term() {
    let env = env_with(|e| e.term = Some("xterm-256color".into()));
    assert_eq!(
        detect_color_from_environment(&env),
        TerminalColorCaps::Ansi256
    );
}

#[test]
fn test_dumb_terminal_has_no_color() {
    let env = env_with(|e| e.term = Some("dumb".into()));
    assert_eq!(detect_color_from_environment(&env), TerminalColorCaps::None);
}

#[test]
fn test_no_color_wins_in_auto_mode() {
    let env = env_with(|e| {
        e.no_color = Some("1".into());
        e.colorterm = Some("truecolor".into());
    });
    let caps = TerminalCapabilities::detect_with(&env, TerminalCapsDetectIntent::Auto, true);
    assert!(!caps.supports_color());
}

#[test]
fn test_auto_mode_without_tty_is_plain() {
    let env = env_with(|e| e.term = Some("xterm-256color".into()));
    let caps = TerminalCapabilities::detect_with(&env, TerminalCapsDetectIntent::Auto, false);
    assert_eq!(caps.color, TerminalColorCaps::None);
}

#[test]
fn test_force_color_enables_auto_mode_without_tty() {
    let env = env_with(|e| {
        e.force_color = Some("1".into());
        e.term = Some("xterm-256color".into());
    });
    let caps = TerminalCapabilities::detect_with(&env, TerminalCapsDetectIntent::Auto, false);
    assert_eq!(caps.color, TerminalColorCaps::Ansi256);
}

#[test]
fn test_always_mode_has_ansi16_floor() {
    let env = TerminalEnvConfig::default();
    let caps = TerminalCapabilities::detect_with(&env, TerminalCapsDetectIntent::Always, false);
    assert_eq!(caps.color, TerminalColorCaps::Ansi16);
}

#[test]
fn test_never_mode_disables_color() {
    let env = env_with(|e| e.colorterm = Some("truecolor".into()));
    let caps = TerminalCapabilities::detect_with(&env, TerminalCapsDetectIntent::Never, true);
    assert_eq!(caps.color, TerminalColorCaps::None);
}

#[test]
fn test_unicode_detection_via_lang() {
    let env = env_with(|e| e.lang = Some("en_US.UTF-8".into()));
    assert_eq!(
        detect_unicode_capabilities(&env, true),
        TerminalUnicodeCaps::BasicUnicode
    );

    let env = env_with(|e| e.lc_all = Some("C".into()));
    assert_eq!(
        detect_unicode_capabilities(&env, false),
        TerminalUnicodeCaps::Ascii
    );
}

#[test]
fn test_default_capabilities_are_plain() {
    let caps = TerminalCapabilities::default();
    assert!(!caps.supports_color());
    assert!(!caps.supports_unicode());
    assert!(!caps.is_tty);
}
