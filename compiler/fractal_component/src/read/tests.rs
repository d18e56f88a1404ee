use super::*;
use crate::test_support;
use pretty_assertions::assert_eq;

fn load(source: &str) -> (tempfile::TempDir, SymbolTree, ComponentId) {
    let dir = tempfile::tempdir().unwrap();
    let path = test_support::put(dir.path(), "main.light", source);
    let mut tree = test_support::tree();
    let main = tree.new_file(None, "main", path).unwrap();
    tree.load(main).unwrap();
    (dir, tree, main)
}

fn load_err(source: &str) -> ComponentError {
    let dir = tempfile::tempdir().unwrap();
    let path = test_support::put(dir.path(), "main.light", source);
    let mut tree = test_support::tree();
    let main = tree.new_file(None, "main", path).unwrap();
    tree.load(main).unwrap_err()
}

#[test]
fn containers_nest() {
    let (_dir, mut tree, main) = load(
        "namespace geo\n    struct point\n        declare x : float\n    class shape\n",
    );

    let point = tree.solve_component(main, "geo.point").unwrap();
    let shape = tree.solve_component(main, "geo.shape").unwrap();
    let x = tree.solve_component(main, "geo.point.x").unwrap();

    assert!(matches!(tree.get(point).kind(), ComponentKind::DataStructure(DataStructureKind::Struct)));
    assert!(matches!(tree.get(shape).kind(), ComponentKind::Class));
    assert!(matches!(tree.get(x).kind(), ComponentKind::Member(m) if m.ty == "float"));
}

#[test]
fn function_records_params_and_attributes() {
    let (_dir, mut tree, main) = load(
        "function add : int @inline\n    param a : int\n    param b : int\n    declare sum : int\n",
    );

    let add = tree.solve_component(main, "add").unwrap();
    let ComponentKind::Function(data) = tree.get(add).kind() else {
        panic!("add is not a function");
    };
    let params: Vec<&str> = data.params.iter().map(|&p| tree.get(p).name()).collect();
    assert_eq!(params, vec!["a", "b"]);
    assert_eq!(data.ret.as_deref(), Some("int"));
    assert_eq!(tree.get(add).parameter("inline"), Some("true"));

    let sum = tree.get(add).child("sum").unwrap();
    assert!(matches!(tree.get(sum).kind(), ComponentKind::Member(m) if !m.param));
}

#[test]
fn body_operations_are_numbered() {
    let (_dir, tree, main) = load(
        "declare total : int\nfunction main\n    call print\n        value 1\n    assign total\n        value 2\n    return\n",
    );

    let f = tree.get(main).child("main").unwrap();
    let names: Vec<&str> = tree.get(f).children().iter().map(|&c| tree.get(c).name()).collect();
    assert_eq!(names, vec!["call#0", "assign#1", "return#2"]);

    let call = tree.get(f).child("call#0").unwrap();
    assert!(matches!(
        tree.get(call).kind(),
        ComponentKind::Operation(op) if op.op == OperationKind::Call { callee: "print".to_string() }
    ));
}

#[test]
fn nested_function_is_redirected_to_file() {
    let (_dir, tree, main) = load("function outer\n    function helper\n");

    let outer = tree.get(main).child("outer").unwrap();
    let helper = tree.get(outer).child("helper").unwrap();
    assert_eq!(tree.get(helper).redirect(), Some(main));
    assert_eq!(tree.get(outer).redirect(), None);
}

#[test]
fn struct_accepts_only_declarations() {
    let err = load_err("struct point\n    function norm\n");
    assert!(matches!(
        err,
        ComponentError::OperationNotPermitted { op, container: "struct", name }
            if op == "function" && name == "point"
    ));
}

#[test]
fn unknown_instruction_is_rejected() {
    let err = load_err("loop forever\n");
    assert!(matches!(err, ComponentError::OperationNotPermitted { container: "file", .. }));
}

#[test]
fn declaration_needs_a_type() {
    let err = load_err("declare x\n");
    assert!(matches!(err, ComponentError::InvalidType { subject } if subject == "x"));
}
