use super::*;

#[test]
fn test_filter_directive_scopes_crate_level() {
    assert_eq!(
        filter_directive(LogLevel::Debug),
        "extpack=debug,extpack_lib=debug,warn"
    );
    assert!(filter_directive(LogLevel::Warning).starts_with("extpack=warn"));
}

#[test]
fn test_log_macros_accept_owned_and_borrowed_messages() {
    let mut ctx = LogContext::with_progress("scan", 2);
    ctx.set_progress(1);
    crate::log_warn!(String::from("skipping entry"), &ctx);
    crate::log_debug!("plain message");
}

#[test]
fn test_global_is_consistent_with_is_initialized() {
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}
