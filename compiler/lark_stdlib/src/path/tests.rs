use std::fs;

use lark_eval::ErrorCategory;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::test_helpers::{invoke, Fixture};

fn text(s: &str) -> Value {
    Value::string(s)
}

#[test]
fn test_constants() {
    let fx = Fixture::new();
    let path = fx.module(module);
    assert_eq!(
        path.member("directory_separator").unwrap(),
        text(MAIN_SEPARATOR_STR)
    );
    assert_eq!(path.member("alternate_directory_separator").unwrap(), text("/"));

    let invalid_path = path.member("invalid_path_characters").unwrap();
    assert_eq!(invalid_path.type_name(), "character_list");
    assert!(invalid_path.as_text().unwrap().contains('\0'));

    let invalid_name = path.member("invalid_filename_characters").unwrap();
    let invalid_name = invalid_name.as_text().unwrap();
    assert!(invalid_name.contains('\0'));
    assert!(invalid_name.contains('/'));
}

#[test]
fn test_namespace_arities() {
    let fx = Fixture::new();
    let path = fx.module(module);
    for (name, arity) in [
        ("exists", 1),
        ("set_extension", 2),
        ("relative_path", 2),
        ("ends_in_folder_seperator", 1),
        ("remove_last_folder_seperator", 1),
        ("join", 1),
        ("combine", 2),
        ("create_temp_file", 0),
        ("temp", 0),
    ] {
        let member = path.member(name).unwrap();
        assert_eq!(member.as_callable().unwrap().arity(), arity, "{name}");
    }
    assert_eq!(path.members().len(), 20);
}

#[test]
fn test_exists_checks_files_and_folders() {
    let fx = Fixture::new();
    let path = fx.module(module);
    fs::create_dir(fx.path("dir")).unwrap();
    fs::write(fx.path("f.txt"), "").unwrap();

    assert_eq!(invoke(&path, "exists", &[text("dir")]).unwrap(), Value::Bool(true));
    assert_eq!(invoke(&path, "exists", &[text("f.txt")]).unwrap(), Value::Bool(true));
    assert_eq!(invoke(&path, "exists", &[text("nope")]).unwrap(), Value::Bool(false));
}

#[test]
fn test_extension_routines() {
    let fx = Fixture::new();
    let path = fx.module(module);

    assert_eq!(invoke(&path, "has_extension", &[text("a/b.txt")]).unwrap(), Value::Bool(true));
    assert_eq!(invoke(&path, "has_extension", &[text("a/b")]).unwrap(), Value::Bool(false));
    assert_eq!(invoke(&path, "get_extension", &[text("a/b.tar.gz")]).unwrap(), text(".gz"));
    assert_eq!(invoke(&path, "get_extension", &[text("a/b")]).unwrap(), Value::Absent);
    assert_eq!(invoke(&path, "get_extension", &[text("a/b.")]).unwrap(), Value::Absent);
}

#[test]
fn test_set_extension() {
    let fx = Fixture::new();
    let path = fx.module(module);

    assert_eq!(
        invoke(&path, "set_extension", &[text("notes.txt"), text(".md")]).unwrap(),
        text("notes.md")
    );
    assert_eq!(
        invoke(&path, "set_extension", &[text("notes"), Value::char_list_from("md")]).unwrap(),
        text("notes.md")
    );
    assert_eq!(
        invoke(&path, "set_extension", &[text("notes.txt"), text("")]).unwrap(),
        text("notes")
    );
}

#[cfg(unix)]
#[test]
fn test_extraction_routines() {
    let fx = Fixture::new();
    let path = fx.module(module);

    assert_eq!(invoke(&path, "get_folder", &[text("/a/b/c.txt")]).unwrap(), text("/a/b"));
    assert_eq!(invoke(&path, "get_folder", &[text("c.txt")]).unwrap(), Value::Absent);
    assert_eq!(invoke(&path, "get_file", &[text("/a/b/c.txt")]).unwrap(), text("c.txt"));
    assert_eq!(invoke(&path, "get_file", &[text("/")]).unwrap(), Value::Absent);
    assert_eq!(
        invoke(&path, "get_file_without_extension", &[text("/a/b/c.txt")]).unwrap(),
        text("c")
    );
    assert_eq!(invoke(&path, "get_root", &[text("/a/b")]).unwrap(), text("/"));
    assert_eq!(invoke(&path, "get_root", &[text("a/b")]).unwrap(), Value::Absent);
}

#[cfg(unix)]
#[test]
fn test_get_whole_resolves_and_normalizes() {
    let fx = Fixture::new();
    let path = fx.module(module);

    assert_eq!(
        invoke(&path, "get_whole", &[text("a/./b/../c")]).unwrap(),
        Value::string(fx.path_str("a/c"))
    );
    assert_eq!(
        invoke(&path, "get_whole", &[text("/x/../../y")]).unwrap(),
        text("/y")
    );
}

#[cfg(unix)]
#[test]
fn test_relative_path() {
    let fx = Fixture::new();
    let path = fx.module(module);

    assert_eq!(
        invoke(&path, "relative_path", &[text("/a/b/c"), text("/a/d")]).unwrap(),
        text("../../d")
    );
    assert_eq!(
        invoke(&path, "relative_path", &[text("/a"), text("/a/b/c")]).unwrap(),
        text("b/c")
    );
    assert_eq!(
        invoke(&path, "relative_path", &[text("sub"), text("sub")]).unwrap(),
        text(".")
    );
    assert_eq!(
        invoke(&path, "relative_path", &[text("one"), text("two/f.txt")]).unwrap(),
        text("../two/f.txt")
    );
}

#[cfg(unix)]
#[test]
fn test_trailing_separator_routines() {
    let fx = Fixture::new();
    let path = fx.module(module);

    assert_eq!(
        invoke(&path, "ends_in_folder_seperator", &[text("a/b/")]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        invoke(&path, "ends_in_folder_seperator", &[text("a/b")]).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        invoke(&path, "remove_last_folder_seperator", &[text("a/b/")]).unwrap(),
        text("a/b")
    );
    assert_eq!(
        invoke(&path, "remove_last_folder_seperator", &[text("a/b")]).unwrap(),
        text("a/b")
    );
    assert_eq!(
        invoke(&path, "remove_last_folder_seperator", &[text("/")]).unwrap(),
        text("/")
    );
}

#[cfg(unix)]
#[test]
fn test_join_accepts_array_and_list() {
    let fx = Fixture::new();
    let path = fx.module(module);
    let parts = vec![text("a/"), Value::char_list_from("b"), text(""), text("/c")];

    let from_array = invoke(&path, "join", &[Value::array(parts.clone())]).unwrap();
    let from_list = invoke(&path, "join", &[Value::list(parts)]).unwrap();
    assert_eq!(from_array, text("a/b/c"));
    assert_eq!(from_array, from_list);
    assert_eq!(invoke(&path, "join", &[Value::array(vec![])]).unwrap(), text(""));
}

#[test]
fn test_join_rejects_non_text_elements() {
    let fx = Fixture::new();
    let path = fx.module(module);
    let err = invoke(&path, "join", &[Value::list(vec![text("a"), Value::Int(1)])]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert_eq!(
        err.message,
        "path.join: element 1 of `paths` expects text (string or character_list), got integer"
    );
}

#[test]
fn test_combine_matches_platform_join() {
    let fx = Fixture::new();
    let path = fx.module(module);
    let expected = Path::new("a").join("b").to_string_lossy().into_owned();
    assert_eq!(
        invoke(&path, "combine", &[text("a"), text("b")]).unwrap(),
        Value::string(expected)
    );
}

#[cfg(unix)]
#[test]
fn test_combine_absolute_second_replaces_first() {
    let fx = Fixture::new();
    let path = fx.module(module);
    assert_eq!(
        invoke(&path, "combine", &[text("a"), text("/b")]).unwrap(),
        text("/b")
    );
}

#[test]
fn test_temp_routines() {
    let fx = Fixture::new();
    let path = fx.module(module);

    assert_eq!(
        invoke(&path, "temp", &[]).unwrap(),
        Value::string(env::temp_dir().to_string_lossy().into_owned())
    );

    let created = invoke(&path, "create_temp_file", &[]).unwrap();
    let created = PathBuf::from(created.as_text().unwrap().into_owned());
    assert!(created.is_file());
    assert!(created.starts_with(env::temp_dir()));
    fs::remove_file(created).unwrap();
}

#[test]
fn test_wrong_kind_is_type_error() {
    let fx = Fixture::new();
    let path = fx.module(module);
    let err = invoke(&path, "combine", &[text("a"), Value::Float(2.0)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert_eq!(
        err.message,
        "path.combine: parameter `path_2` expects text (string or character_list), got float"
    );
}

#[test]
fn test_normalize_keeps_leading_parent_segments() {
    assert_eq!(normalize(Path::new("../a/./b/..")), PathBuf::from("../a"));
    assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
}

proptest! {
    #[test]
    fn text_kinds_give_identical_results(s in "[a-z./]{0,24}") {
        let fx = Fixture::new();
        let path = fx.module(module);
        for routine in [
            "get_file",
            "get_folder",
            "get_extension",
            "get_file_without_extension",
            "remove_last_folder_seperator",
        ] {
            let from_string = invoke(&path, routine, &[Value::string(s.clone())]).unwrap();
            let from_chars = invoke(&path, routine, &[Value::char_list_from(&s)]).unwrap();
            prop_assert_eq!(from_string, from_chars);
        }
    }

    #[test]
    fn combine_is_path_join(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let fx = Fixture::new();
        let path = fx.module(module);
        let combined = invoke(&path, "combine", &[Value::string(a.clone()), Value::char_list_from(&b)])
            .unwrap();
        let expected = Path::new(&a).join(&b).to_string_lossy().into_owned();
        prop_assert_eq!(combined, Value::string(expected));
    }
}
