//! Default includes, cross-file includes and native headers.

use std::path::Path;

use pretty_assertions::assert_eq;

use crate::common::Workspace;

#[test]
fn entry_includes_the_header_of_its_dependency() {
    let mut ws = Workspace::new();
    ws.put("a.light", "function main\n    call b.greet\n");
    ws.put("b.light", "function greet\n");

    let output = ws.compile("a.light").unwrap();

    assert_eq!(output.path, ws.out_path("a.hpp"));
    assert_eq!(
        output.text,
        format!(
            "#include \"{}\"\nvoid main() {{\n    greet();\n}}\n",
            ws.out_path("b.hpp")
        )
    );
    assert_eq!(ws.read_out("a.hpp"), output.text);
    assert_eq!(ws.read_out("b.hpp"), "void greet() {\n}\n");
}

#[test]
fn repeated_references_include_once() {
    let mut ws = Workspace::new();
    ws.put(
        "main.light",
        "declare total : int\n    value util.count\nfunction main\n    call util.greet\n    call util.greet\n",
    );
    ws.put("util.light", "declare count : int\nfunction greet\n");

    let output = ws.compile("main.light").unwrap();

    assert_eq!(
        output.text,
        format!(
            "#include \"{}\"\nint total = count;\nvoid main() {{\n    greet();\n    greet();\n}}\n",
            ws.out_path("util.hpp")
        )
    );
}

#[test]
fn native_functions_pull_in_their_library() {
    let mut ws = Workspace::new();
    ws.put(
        "main.light",
        "function main : int\n    call __c_stdio_puts\n        value \"hi\"\n    call __c_stdio_fflush\n    return\n        value 0\n",
    );

    let output = ws.compile("main.light").unwrap();

    assert_eq!(
        output.text,
        "#include <stdio>\nint main() {\n    puts(\"hi\");\n    fflush();\n    return 0;\n}\n"
    );
}

#[test]
fn native_headers_are_included_in_place() {
    let mut ws = Workspace::new();
    ws.put("io.h", "#pragma once\nint write(const char* text);\n");
    ws.put("main.light", "function main\n    call io.write\n        value \"hi\"\n");

    let output = ws.compile("main.light").unwrap();

    assert_eq!(
        output.text,
        format!(
            "#include \"{}\"\nvoid main() {{\n    write(\"hi\");\n}}\n",
            ws.src_path("io.h")
        )
    );
    assert!(!Path::new(&ws.out_path("io.hpp")).exists());
}

#[test]
fn mutually_dependent_files_both_compile() {
    let mut ws = Workspace::new();
    ws.put("a.light", "function ping\n    call b.pong\n");
    ws.put("b.light", "function pong\n    call a.ping\n");

    let output = ws.compile("a.light").unwrap();

    assert_eq!(
        output.text,
        format!("#include \"{}\"\nvoid ping() {{\n    pong();\n}}\n", ws.out_path("b.hpp"))
    );
    assert_eq!(
        ws.read_out("b.hpp"),
        format!("#include \"{}\"\nvoid pong() {{\n    ping();\n}}\n", ws.out_path("a.hpp"))
    );
}

#[test]
fn includes_come_before_the_whole_body() {
    let mut ws = Workspace::new();
    ws.put("a.light", "declare ready : bool\nfunction first\nfunction main\n    call b.greet\n");
    ws.put("b.light", "function greet\n");

    let output = ws.compile("a.light").unwrap();

    assert_eq!(
        output.text,
        format!(
            "#include \"{}\"\nbool ready;\nvoid first() {{\n}}\nvoid main() {{\n    greet();\n}}\n",
            ws.out_path("b.hpp")
        )
    );
}
