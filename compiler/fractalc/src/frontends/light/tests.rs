use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builtin_spellings() {
    let types = LightTypes;
    assert_eq!(types.get("string").map(|t| t.native), Some("std::string".to_string()));
    assert_eq!(types.get("double").and_then(|t| t.attribute_reference), Some(FLOAT.to_string()));
    assert_eq!(types.get("void").and_then(|t| t.attribute_reference), None);
    assert!(types.get("point").is_none());
}

#[test]
fn converts_through_attribute_references() {
    let types = LightTypes;
    let from = types.attribute_type("3");
    let to = types.get("double").unwrap();
    assert_eq!(types.convert_literal("3", &from, &to), "3.0");
}

#[test]
fn reads_textual_linear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.light");
    fs::write(&path, "function main : int\n    return\n        value 0\n").unwrap();

    let frontend = LinearTextFrontend::new();
    let mut arena = LinearArena::new();
    let root = frontend.open_file(&path).unwrap().linear(&mut arena).unwrap();

    assert_eq!(text::dump(&arena, root), "function main : int\n    return\n        value 0\n");
    assert_eq!(frontend.language(), Language::Light);
}

#[test]
fn malformed_text_yields_no_linear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.light");
    fs::write(&path, "declare x :\n").unwrap();

    let mut arena = LinearArena::new();
    let mut script = LinearTextFrontend::new().open_file(&path).unwrap();
    assert!(script.linear(&mut arena).is_none());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = LinearTextFrontend::new().open_file(&dir.path().join("absent.light"));
    assert!(matches!(result, Err(error) if error.kind() == io::ErrorKind::NotFound));
}
