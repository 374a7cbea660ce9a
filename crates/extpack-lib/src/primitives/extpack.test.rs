use super::*;

#[test]
fn test_primary_editor_is_vscode() {
    let primary = EditorVariant::primary();
    assert_eq!(primary.scheme, "vscode");
    assert_eq!(primary.display_name, "Visual Studio Code");
    assert_eq!(primary.home_folder(), ".vscode");
}

#[test]
fn test_find_by_scheme_and_display_name() {
    assert_eq!(EditorVariant::find("cursor").unwrap().display_name, "Cursor");
    assert_eq!(
        EditorVariant::find("VSCodium").unwrap().scheme,
        "vscode-oss"
    );
    assert_eq!(
        EditorVariant::find("visual studio code - insiders")
            .unwrap()
            .scheme,
        "vscode-insiders"
    );
    assert!(EditorVariant::find("emacs").is_none());
}

#[test]
fn test_known_editors_have_unique_schemes() {
    let mut schemes: Vec<&str> = KNOWN_EDITORS.iter().map(|v| v.scheme).collect();
    schemes.sort();
    schemes.dedup();
    assert_eq!(schemes.len(), KNOWN_EDITORS.len());
}

#[test]
fn test_mutation_display() {
    assert_eq!(Mutation::Applied.to_string(), "applied");
    assert_eq!(Mutation::Unchanged.to_string(), "unchanged");
    assert!(Mutation::Applied.is_applied());
    assert!(!Mutation::Unchanged.is_applied());
}
