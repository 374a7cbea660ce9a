use super::*;
use crate::display::mock::{DisplayCall, MockDisplayProvider};

#[test]
fn test_operation_summary_states() {
    assert!(OperationSummary::new(3, 0).is_success());
    assert!(OperationSummary::new(2, 1).is_partial_success());
    assert!(OperationSummary::new(0, 2).is_failure());

    let empty = OperationSummary::new(0, 0);
    assert!(!empty.is_success() && !empty.is_failure() && !empty.is_partial_success());
    assert_eq!(OperationSummary::new(2, 1).to_string(), "2 successful, 1 failed");
}

#[test]
fn test_display_summary_partial_success_warns() {
    let display = MockDisplayProvider::new();
    display.display_summary("Pack scan", &OperationSummary::new(2, 1));

    assert!(display.has_call(&DisplayCall::StatusWarning {
        message: "Pack scan completed with issues (2 successful, 1 failed)".to_string(),
    }));
}

#[test]
fn test_display_summary_empty_is_info() {
    let display = MockDisplayProvider::new();
    display.display_summary("Pack scan", &OperationSummary::new(0, 0));
    assert_eq!(display.count_calls("status_info"), 1);
}
