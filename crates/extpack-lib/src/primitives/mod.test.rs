use super::*;
use clap::ValueEnum;

// =============================================================================
// VALUE ENUM PARSING
// =============================================================================

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant
                    .to_possible_value()
                    .expect("PossibleValue should exist for all variants");

                let primary_name = possible_value.get_name();
                let parsed: $enum_type = primary_name
                    .parse()
                    .unwrap_or_else(|_| panic!("'{}' should parse", primary_name));
                assert_eq!(parsed, *variant, "round-trip should preserve variant");
            }
        }
    };
}

macro_rules! test_fromstr_aliases {
    ($enum_type:ty, $test_name:ident, $expected_mappings:expr) => {
        #[test]
        fn $test_name() {
            let mappings: &[(&str, $enum_type)] = &$expected_mappings;

            for (input, expected) in mappings {
                let parsed: Result<$enum_type, _> = input.parse();
                assert_eq!(
                    parsed.ok(),
                    Some(*expected),
                    "wrong variant for input '{}'",
                    input
                );
            }
        }
    };
}

test_enum_completeness!(LogLevel, test_log_level_completeness);
test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(OutputFormat, test_output_format_completeness);
test_enum_completeness!(TerminalCapsDetectIntent, test_color_intent_completeness);

test_fromstr_aliases!(
    LogLevel,
    test_log_level_aliases,
    [
        ("error", LogLevel::Error),
        ("fatal", LogLevel::Error),
        ("warn", LogLevel::Warning),
        ("WARNING", LogLevel::Warning),
        ("info", LogLevel::Info),
        ("debug", LogLevel::Debug),
        ("verbose", LogLevel::Trace),
    ]
);

test_fromstr_aliases!(
    OutputFormat,
    test_output_format_aliases,
    [
        ("text", OutputFormat::Text),
        ("human", OutputFormat::Text),
        ("JSON", OutputFormat::Json),
    ]
);

test_fromstr_aliases!(
    TerminalCapsDetectIntent,
    test_color_intent_aliases,
    [
        ("auto", TerminalCapsDetectIntent::Auto),
        ("detect", TerminalCapsDetectIntent::Auto),
        ("force", TerminalCapsDetectIntent::Always),
        ("off", TerminalCapsDetectIntent::Never),
    ]
);

#[test]
fn test_unknown_value_reports_reason() {
    let err = "loud".parse::<LogLevel>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "loud");
            assert_eq!(reason, "invalid log level");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// LOG LEVEL BEHAVIOR
// =============================================================================

#[test]
fn test_log_level_from_verbosity() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(u8::MAX), LogLevel::Trace);
}

#[test]
fn test_log_level_filter_directives() {
    assert_eq!(LogLevel::Warning.as_filter(), "warn");
    assert_eq!(LogLevel::Trace.as_filter(), "trace");
}

#[test]
fn test_log_context_progress() {
    let mut ctx = LogContext::with_progress("scan", 3);
    assert_eq!(ctx.total_items, Some(3));
    assert_eq!(ctx.current_item, None);
    ctx.set_progress(2);
    assert_eq!(ctx.current_item, Some(2));
    assert_eq!(LogContext::new("build").total_items, None);
}

#[test]
fn test_config_error_display() {
    assert_eq!(
        ConfigError::AlreadyInitialized.to_string(),
        "Global configuration already initialized"
    );
    assert_eq!(
        ConfigError::InvalidWorkDir {
            path: "/invalid/path".to_string(),
        }
        .to_string(),
        "Invalid working directory: /invalid/path"
    );
    assert!(
        ConfigError::DirectoryUnavailable { what: "data" }
            .to_string()
            .contains("data directory")
    );
}
