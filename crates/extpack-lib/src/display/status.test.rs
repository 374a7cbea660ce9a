use super::*;
use crate::display::test_utils::{create_rich_styling, create_test_styling};

#[test]
fn test_status_message_formatting() {
    let styling = create_test_styling();
    let status = StatusDisplay::new(&styling);

    status.checking("packager");
    status.success("vsce", "3.6.0");
    status.error("my-pack", "missing manifest");
    status.warning("overwriting existing pack");
    status.info("no packs found");
    status.message("Plain message");
    status.emphasis("Important message");
    status.subtle("Secondary info");
    status.list(&["a.one", "b.two"]);
    status.complete("Done");
}

#[test]
fn test_join_detail_handles_empty_details() {
    assert_eq!(join_detail("pack", ""), "pack");
    assert_eq!(join_detail("pack", "built"), "pack: built");
}

#[test]
fn test_checking_line_uses_ascii_arrow_without_unicode() {
    let styling = create_test_styling();
    let status = StatusDisplay::new(&styling);
    assert_eq!(status.format_checking("packager"), "> Checking packager...");
}

#[test]
fn test_checking_line_uses_unicode_arrow_when_supported() {
    let styling = create_rich_styling();
    let status = StatusDisplay::new(&styling);
    assert!(status.format_checking("packager").contains('→'));
}

#[test]
fn test_tool_check_and_steps() {
    let styling = create_test_styling();
    let status = StatusDisplay::new(&styling);

    status.tool_check("npx", true, "10.8.0");
    status.tool_check("npx", false, "");
    status.section("Installed extensions");
    status.step(1, 3, "Scanning Cursor");
}
