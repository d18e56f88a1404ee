//! Translated text and emission errors.

use fractal_component::{ComponentError, EmitOptions};
use fractalc::{MachineConfig, MachineError};
use pretty_assertions::assert_eq;

use crate::common::Workspace;

#[test]
fn uncalled_declarations_can_be_omitted() {
    let config =
        MachineConfig::default().with_emit_options(EmitOptions::default().with_omit_uncalled(true));
    let mut ws = Workspace::with_config(config);
    ws.put(
        "main.light",
        "function main\n    call used\nfunction used\nfunction unused\n",
    );

    let output = ws.compile("main.light").unwrap();

    assert_eq!(output.text, "void main() {\n    used();\n}\nvoid used() {\n}\n");
}

#[test]
fn everything_is_emitted_by_default() {
    let mut ws = Workspace::new();
    ws.put("main.light", "function main\nfunction unused\n");

    let output = ws.compile("main.light").unwrap();

    assert_eq!(output.text, "void main() {\n}\nvoid unused() {\n}\n");
}

#[test]
fn literals_are_coerced_to_the_declared_type() {
    let mut ws = Workspace::new();
    ws.put(
        "main.light",
        "declare ratio : double\n    value 2\ndeclare label : string\n    value 7\n",
    );

    let output = ws.compile("main.light").unwrap();

    assert_eq!(output.text, "double ratio = 2.0;\nstd::string label = \"7\";\n");
}

#[test]
fn name_of_the_wrong_type_is_rejected() {
    let mut ws = Workspace::new();
    ws.put("main.light", "declare count : int\ndeclare label : string\n    value count\n");

    let err = ws.compile("main.light").unwrap_err();

    assert!(matches!(
        err,
        MachineError::Component(ComponentError::TypeMismatch { subject, .. }) if subject == "count"
    ));
}

#[test]
fn unknown_callee_names_the_full_path() {
    let mut ws = Workspace::new();
    ws.put("main.light", "function main\n    call util.missing\n");
    ws.put("util.light", "function greet\n");

    let err = ws.compile("main.light").unwrap_err();

    assert!(matches!(
        err,
        MachineError::Component(ComponentError::NotFound { path }) if path == "util.missing"
    ));
}

#[test]
fn classes_are_not_emitted() {
    let mut ws = Workspace::new();
    ws.put("main.light", "class shape\n");

    let err = ws.compile("main.light").unwrap_err();

    assert!(matches!(
        err,
        MachineError::Component(ComponentError::Unimplemented { what: "class", .. })
    ));
}

#[test]
fn nested_functions_are_hoisted_to_file_scope() {
    let mut ws = Workspace::new();
    ws.put(
        "main.light",
        "namespace app\n    function run\n        function step : int\n            return\n                value 1\n        call step\n",
    );

    let output = ws.compile("main.light").unwrap();

    assert_eq!(
        output.text,
        "int step() {\n    return 1;\n}\nnamespace app {\n    void run() {\n        step();\n    }\n}\n"
    );
}
