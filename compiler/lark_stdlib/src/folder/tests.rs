use std::fs;
use std::path::Path;

use lark_eval::ErrorCategory;
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{invoke, Fixture, SPAN};

fn populate(fx: &Fixture) {
    fs::create_dir(fx.path("beta")).unwrap();
    fs::create_dir(fx.path("alpha")).unwrap();
    fs::write(fx.path("b.txt"), "").unwrap();
    fs::write(fx.path("a.txt"), "").unwrap();
}

#[test]
fn test_namespace_surface() {
    let fx = Fixture::new();
    let folder = fx.module(module);
    let names: Vec<String> = folder.members().into_iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec![
            "create",
            "current",
            "delete",
            "exists",
            "files_and_subfolders_in",
            "files_in",
            "move",
            "parent_of",
            "root_of",
            "set_current",
            "subfolders_in",
        ]
    );
    let current = folder.member("current").unwrap();
    assert_eq!(current.as_callable().unwrap().arity(), 0);
}

#[test]
fn test_exists_create_delete_round_trip() {
    let fx = Fixture::new();
    let folder = fx.module(module);
    let nested = Value::string("x/y/z");

    assert_eq!(invoke(&folder, "exists", &[nested.clone()]).unwrap(), Value::Bool(false));
    invoke(&folder, "create", &[nested.clone()]).unwrap();
    assert_eq!(invoke(&folder, "exists", &[nested.clone()]).unwrap(), Value::Bool(true));
    invoke(&folder, "delete", &[nested.clone()]).unwrap();
    assert_eq!(invoke(&folder, "exists", &[nested]).unwrap(), Value::Bool(false));
    assert!(fx.path("x/y").is_dir());
}

#[test]
fn test_delete_refuses_non_empty_folder() {
    let fx = Fixture::new();
    let folder = fx.module(module);
    fs::create_dir(fx.path("full")).unwrap();
    fs::write(fx.path("full/keep.txt"), "").unwrap();

    let err = invoke(&folder, "delete", &[Value::string("full")]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::IOError);
    assert!(
        err.message.starts_with("folder.delete: failed to delete folder `full`: "),
        "{}",
        err.message
    );
    assert!(fx.path("full/keep.txt").is_file());
}

#[test]
fn test_listings_are_sorted_full_paths() {
    let fx = Fixture::new();
    let folder = fx.module(module);
    populate(&fx);
    let base = fx.dir.path();
    let joined = |name: &str| base.join(name).to_string_lossy().into_owned();

    assert_eq!(
        invoke(&folder, "files_in", &[Value::string(fx.root_str())]).unwrap(),
        Value::strings([joined("a.txt"), joined("b.txt")])
    );
    assert_eq!(
        invoke(&folder, "subfolders_in", &[Value::char_list_from(&fx.root_str())]).unwrap(),
        Value::strings([joined("alpha"), joined("beta")])
    );
    assert_eq!(
        invoke(&folder, "files_and_subfolders_in", &[Value::string(fx.root_str())]).unwrap(),
        Value::strings([
            joined("a.txt"),
            joined("alpha"),
            joined("b.txt"),
            joined("beta"),
        ])
    );
}

#[test]
fn test_listing_keeps_relative_input_relative() {
    let fx = Fixture::new();
    let folder = fx.module(module);
    fs::create_dir(fx.path("sub")).unwrap();
    fs::write(fx.path("sub/f.txt"), "").unwrap();

    let expected = Path::new("sub").join("f.txt").to_string_lossy().into_owned();
    assert_eq!(
        invoke(&folder, "files_in", &[Value::string("sub")]).unwrap(),
        Value::strings([expected])
    );
}

#[test]
fn test_missing_folders_are_io_errors() {
    let fx = Fixture::new();
    let folder = fx.module(module);
    let missing = Value::string("ghost");

    for (routine, args) in [
        ("delete", vec![missing.clone()]),
        ("files_in", vec![missing.clone()]),
        ("subfolders_in", vec![missing.clone()]),
        ("files_and_subfolders_in", vec![missing.clone()]),
        ("set_current", vec![missing.clone()]),
        ("move", vec![missing.clone(), Value::string("elsewhere")]),
    ] {
        let err = invoke(&folder, routine, &args).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::IOError, "{routine}");
        assert_eq!(err.span, SPAN);
        assert!(err.message.contains("`ghost`: it does not exist"), "{}", err.message);
    }
    assert!(!fx.path("elsewhere").exists());
}

#[test]
fn test_parent_and_root() {
    let fx = Fixture::new();
    let folder = fx.module(module);

    assert_eq!(
        invoke(&folder, "parent_of", &[Value::string("a/b")]).unwrap(),
        Value::string(fx.path_str("a"))
    );
    let root = crate::path::root(fx.dir.path()).unwrap();
    assert_eq!(
        invoke(&folder, "root_of", &[Value::string("a/b")]).unwrap(),
        Value::string(root.to_string_lossy().into_owned())
    );
    assert_eq!(
        invoke(&folder, "parent_of", &[Value::string(root.to_string_lossy().into_owned())])
            .unwrap(),
        Value::Absent
    );
}

#[test]
fn test_current_and_set_current() {
    let fx = Fixture::new();
    let folder = fx.module(module);
    fs::create_dir(fx.path("inner")).unwrap();

    assert_eq!(
        invoke(&folder, "current", &[]).unwrap(),
        Value::string(fx.root_str())
    );
    invoke(&folder, "set_current", &[Value::string("inner")]).unwrap();
    assert_eq!(
        invoke(&folder, "current", &[]).unwrap(),
        Value::string(fx.path_str("inner"))
    );
}

#[test]
fn test_move_folder() {
    let fx = Fixture::new();
    let folder = fx.module(module);
    fs::create_dir(fx.path("from")).unwrap();
    fs::write(fx.path("from/f.txt"), "x").unwrap();

    invoke(&folder, "move", &[Value::string("from"), Value::string("to")]).unwrap();
    assert!(!fx.path("from").exists());
    assert!(fx.path("to/f.txt").is_file());
}

#[test]
fn test_move_rejects_file_source() {
    let fx = Fixture::new();
    let folder = fx.module(module);
    fs::write(fx.path("plain.txt"), "").unwrap();
    let err = invoke(&folder, "move", &[Value::string("plain.txt"), Value::string("x")])
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::IOError);
}
