use super::*;
use crate::test_support;
use crate::Frontends;
use pretty_assertions::assert_eq;

fn child_names(tree: &SymbolTree, id: ComponentId) -> Vec<String> {
    tree.get(id)
        .children()
        .iter()
        .map(|&c| tree.get(c).name().to_string())
        .collect()
}

#[test]
fn missing_path_is_bad_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut tree = test_support::tree();

    let err = tree.new_file(None, "ghost", dir.path().join("ghost.light")).unwrap_err();
    assert!(matches!(err, ComponentError::BadPath { .. }));
}

#[test]
fn directory_skeleton_is_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    test_support::put(dir.path(), "zeta.light", "");
    test_support::put(dir.path(), "alpha.light", "");
    test_support::put(dir.path(), "io.h", "");
    test_support::put(dir.path(), "notes.txt", "");
    test_support::put(dir.path(), ".hidden.light", "");
    test_support::put(dir.path(), "lib/vec.hpp", "");
    let mut tree = test_support::tree();

    let root = tree.new_file(None, "app", dir.path()).unwrap();

    assert_eq!(child_names(&tree, root), vec!["alpha", "io", "zeta", "lib"]);
    let lib = tree.get(root).child("lib").unwrap();
    assert!(tree.get(lib).file().unwrap().is_directory());
    assert_eq!(child_names(&tree, lib), vec!["vec"]);
    assert!(tree.get(root).children().iter().all(|&c| !tree.is_loaded(c)));
}

#[test]
fn light_file_claims_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    test_support::put(dir.path(), "net.light", "");
    test_support::put(dir.path(), "net/http.light", "");
    let mut tree = test_support::tree();

    let root = tree.new_file(None, "app", dir.path()).unwrap();

    assert_eq!(child_names(&tree, root), vec!["net"]);
    let net = tree.get(root).child("net").unwrap();
    assert!(!tree.get(net).file().unwrap().is_directory());
    assert_eq!(child_names(&tree, net), vec!["http"]);
}

#[test]
fn single_file_expands_sibling_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_support::put(dir.path(), "app.light", "");
    test_support::put(dir.path(), "app/util.light", "");
    let mut tree = test_support::tree();

    let app = tree.new_file(None, "app", path).unwrap();
    assert_eq!(child_names(&tree, app), vec!["util"]);
}

#[test]
fn load_reads_linear_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_support::put(dir.path(), "main.light", "function main : int\ndeclare x : int\n");
    let mut tree = test_support::tree();
    let main = tree.new_file(None, "main", path).unwrap();

    tree.load(main).unwrap();
    tree.load(main).unwrap();

    assert!(tree.is_loaded(main));
    assert_eq!(child_names(&tree, main), vec!["main", "x"]);
    assert_eq!(tree.get(main).file().unwrap().language(), Some(Language::Light));
    assert!(tree.get(main).linear().is_some());
}

#[test]
fn directory_loads_without_frontend() {
    let dir = tempfile::tempdir().unwrap();
    test_support::put(dir.path(), "a.light", "");
    let mut tree = SymbolTree::new(Frontends::new());
    let root = tree.new_file(None, "app", dir.path()).unwrap();

    tree.load(root).unwrap();
    assert!(tree.is_loaded(root));
}

#[test]
fn load_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_support::put(dir.path(), "readme.md", "");
    let mut tree = test_support::tree();
    let readme = tree.new_file(None, "readme", path).unwrap();

    let err = tree.load(readme).unwrap_err();
    assert!(matches!(err, ComponentError::UnsupportedExtension { .. }));
}

#[test]
fn load_requires_a_frontend() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_support::put(dir.path(), "main.light", "");
    let mut tree = SymbolTree::new(Frontends::new());
    let main = tree.new_file(None, "main", path).unwrap();

    let err = tree.load(main).unwrap_err();
    assert!(matches!(err, ComponentError::MissingFrontend { language: Language::Light }));
}

#[test]
fn unparsable_source_is_a_frontend_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_support::put(dir.path(), "main.light", "declare x :\n");
    let mut tree = test_support::tree();
    let main = tree.new_file(None, "main", path).unwrap();

    let err = tree.load(main).unwrap_err();
    assert!(matches!(err, ComponentError::Frontend { .. }));
}
