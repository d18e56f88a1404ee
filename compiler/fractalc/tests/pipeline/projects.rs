//! Library naming across directories and projects.

use std::path::Path;

use fractalc::{Machine, MachineConfig};
use pretty_assertions::assert_eq;

use crate::common::{write, Workspace};

#[test]
fn nested_sources_name_their_library_by_path() {
    let mut ws = Workspace::new();
    ws.put("net/http.light", "declare port : int\n    value 80\n");

    let output = ws.compile("net/http.light").unwrap();

    assert_eq!(output.path, ws.out_path("net_http.hpp"));
    assert_eq!(output.text, "int port = 80;\n");
}

#[test]
fn sibling_projects_keep_distinct_paths() {
    let mut ws = Workspace::new();
    ws.put("main.light", "function main\n    call util.greet\n");
    ws.put("util.light", "function greet\n");
    let lib_src = tempfile::tempdir().unwrap();
    write(lib_src.path(), "util.light", "function helper\n");
    let lib = ws.machine.add_project("lib", lib_src.path()).unwrap();

    ws.compile("main.light").unwrap();
    let tree = ws.machine.tree_mut();
    let lib_root = tree.project(lib).root_component;
    let lib_util = tree.solve_component(lib_root, "util").unwrap();
    let lib_path = tree.write_library(lib_util).unwrap();

    assert_eq!(lib_path, ws.out_path("lib_util.hpp"));
    assert_eq!(ws.read_out("util.hpp"), "void greet() {\n}\n");
    assert_eq!(ws.read_out("lib_util.hpp"), "void helper() {\n}\n");
}

#[test]
fn entries_outside_known_projects_get_their_own() {
    let mut ws = Workspace::new();
    ws.register();
    let loose = tempfile::tempdir().unwrap();
    let entry = write(loose.path(), "tool.light", "function main\n");

    let output = ws.machine.compile(&entry).unwrap();

    assert_eq!(ws.machine.tree().projects().count(), 2);
    assert_eq!(output.path, ws.out_path("tool.hpp"));
}

#[test]
fn recompiling_reuses_the_generated_library() {
    let mut ws = Workspace::new();
    ws.put("main.light", "function main\n");

    let first = ws.compile("main.light").unwrap();
    let second = ws.compile("main.light").unwrap();

    assert_eq!(first, second);
    assert_eq!(ws.machine.tree().projects().count(), 1);
}

#[test]
fn temp_dir_is_created_on_demand() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let nested = out.path().join("build/headers");
    let entry = write(src.path(), "main.light", "declare x : int\n");
    let mut machine = Machine::new(MachineConfig::default().with_temp_dir(&nested));

    let output = machine.compile(&entry).unwrap();

    assert!(Path::new(&output.path).starts_with(&nested));
    assert!(nested.join("main.hpp").is_file());
}

#[test]
fn same_named_files_in_two_projects_do_not_collide() {
    let mut ws = Workspace::new();
    ws.put("util.light", "function greet\n");
    let lib_src = tempfile::tempdir().unwrap();
    let lib_util = write(lib_src.path(), "util.light", "function helper\n");
    ws.machine.add_project("lib", lib_src.path()).unwrap();

    let app = ws.compile("util.light").unwrap();
    let lib = ws.machine.compile(&lib_util).unwrap();

    assert_eq!(app.path, ws.out_path("util.hpp"));
    assert_eq!(lib.path, ws.out_path("lib_util.hpp"));
    assert_eq!(ws.read_out("util.hpp"), "void greet() {\n}\n");
    assert_eq!(ws.read_out("lib_util.hpp"), "void helper() {\n}\n");
}
