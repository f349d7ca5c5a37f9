//! The `path` module.
//!
//! Lexical path manipulation plus a few routines that consult the
//! filesystem (`exists`, `get_whole`, `relative_path`, the temp routines).
//! Extraction routines return absent when there is nothing to extract.

use std::env;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use lark_eval::{CallContext, Environment, EvalResult, ModuleValue, Value};
use tempfile::NamedTempFile;

use crate::host::Host;

const ALTERNATE_SEPARATOR: &str = "/";

#[cfg(windows)]
const INVALID_PATH_CHARACTERS: &[char] = &[
    '"', '<', '>', '|', '\0', '\u{1}', '\u{2}', '\u{3}', '\u{4}', '\u{5}', '\u{6}', '\u{7}',
    '\u{8}', '\t', '\n', '\u{b}', '\u{c}', '\r', '\u{e}', '\u{f}', '\u{10}', '\u{11}', '\u{12}',
    '\u{13}', '\u{14}', '\u{15}', '\u{16}', '\u{17}', '\u{18}', '\u{19}', '\u{1a}', '\u{1b}',
    '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}',
];
#[cfg(windows)]
const INVALID_FILENAME_EXTRA: &[char] = &[':', '*', '?', '\\', '/'];

#[cfg(not(windows))]
const INVALID_PATH_CHARACTERS: &[char] = &['\0'];
#[cfg(not(windows))]
const INVALID_FILENAME_EXTRA: &[char] = &['/'];

/// Build the `path` module callable.
pub fn module(host: &Host, env: &Environment) -> ModuleValue {
    let host = host.clone();
    ModuleValue::new("path", env, move |m| {
        m.constant("directory_separator", MAIN_SEPARATOR_STR)
            .constant("alternate_directory_separator", ALTERNATE_SEPARATOR)
            .constant(
                "invalid_filename_characters",
                Value::char_list(invalid_filename_characters()),
            )
            .constant(
                "invalid_path_characters",
                Value::char_list(INVALID_PATH_CHARACTERS.to_vec()),
            );

        host.register(m, "exists", &["path"], exists);
        m.function("has_extension", &["path"], has_extension)
            .function("get_extension", &["path"], get_extension)
            .function("set_extension", &["path", "extension"], set_extension)
            .function("get_folder", &["path"], get_folder)
            .function("get_file", &["path"], get_file)
            .function(
                "get_file_without_extension",
                &["path"],
                get_file_without_extension,
            );
        host.register(m, "get_whole", &["path"], get_whole);
        m.function("get_root", &["path"], get_root);
        host.register(m, "relative_path", &["relative_to", "path"], relative_path);
        m.function("ends_in_folder_seperator", &["path"], ends_in_folder_separator)
            .function(
                "remove_last_folder_seperator",
                &["path"],
                remove_last_folder_separator,
            )
            .function("join", &["paths"], join)
            .function("combine", &["path_1", "path_2"], combine)
            .function("create_temp_file", &[], create_temp_file)
            .function("temp", &[], temp);
        Ok(())
    })
}

fn invalid_filename_characters() -> Vec<char> {
    INVALID_PATH_CHARACTERS
        .iter()
        .chain(INVALID_FILENAME_EXTRA)
        .copied()
        .collect()
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn exists(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("path")?;
    let target = host.resolve_in(ctx, &path)?;
    Ok(Value::Bool(target.exists()))
}

/// Extension without its dot, when non-empty.
fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .filter(|ext| !ext.is_empty())
}

fn has_extension(ctx: &CallContext) -> EvalResult {
    let path = ctx.text("path")?;
    Ok(Value::Bool(extension(&path).is_some()))
}

/// Includes the leading `.`.
fn get_extension(ctx: &CallContext) -> EvalResult {
    let path = ctx.text("path")?;
    Ok(Value::string_or_absent(
        extension(&path).map(|ext| format!(".{ext}")),
    ))
}

fn set_extension(ctx: &CallContext) -> EvalResult {
    let path = ctx.text("path")?;
    let ext = ctx.text("extension")?;
    let mut updated = PathBuf::from(path);
    updated.set_extension(ext.strip_prefix('.').unwrap_or(&ext));
    Ok(Value::string(display(&updated)))
}

fn get_folder(ctx: &CallContext) -> EvalResult {
    let path = ctx.text("path")?;
    Ok(Value::string_or_absent(Path::new(&path).parent().map(display)))
}

fn get_file(ctx: &CallContext) -> EvalResult {
    let path = ctx.text("path")?;
    Ok(Value::string_or_absent(
        Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
    ))
}

fn get_file_without_extension(ctx: &CallContext) -> EvalResult {
    let path = ctx.text("path")?;
    Ok(Value::string_or_absent(
        Path::new(&path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned()),
    ))
}

fn get_whole(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("path")?;
    let target = host.resolve_in(ctx, &path)?;
    Ok(Value::string(display(&normalize(&target))))
}

fn get_root(ctx: &CallContext) -> EvalResult {
    let path = ctx.text("path")?;
    Ok(Value::string_or_absent(root(Path::new(&path)).map(|r| display(&r))))
}

fn relative_path(ctx: &CallContext, host: &Host) -> EvalResult {
    let base = ctx.text("relative_to")?;
    let path = ctx.text("path")?;
    let base = normalize(&host.resolve_in(ctx, &base)?);
    let target = normalize(&host.resolve_in(ctx, &path)?);
    Ok(Value::string(display(&relative(&base, &target))))
}

fn is_separator(c: char) -> bool {
    c == MAIN_SEPARATOR || c == '/'
}

fn ends_in_folder_separator(ctx: &CallContext) -> EvalResult {
    let path = ctx.text("path")?;
    Ok(Value::Bool(path.ends_with(is_separator)))
}

/// Drops one trailing separator unless the path is a bare root.
fn remove_last_folder_separator(ctx: &CallContext) -> EvalResult {
    let mut path = ctx.text("path")?;
    let is_root = root(Path::new(&path)).is_some_and(|r| r.as_os_str().len() == path.len());
    if !is_root {
        if let Some(rest) = path.strip_suffix(is_separator) {
            let len = rest.len();
            path.truncate(len);
        }
    }
    Ok(Value::string(path))
}

/// Concatenates the non-empty parts; an absolute later part does not reset.
fn join(ctx: &CallContext) -> EvalResult {
    let parts = ctx.texts("paths")?;
    let mut joined = String::new();
    for part in parts.iter().filter(|part| !part.is_empty()) {
        let needs_separator = !joined.is_empty()
            && !joined.ends_with(is_separator)
            && !part.starts_with(is_separator);
        if needs_separator {
            joined.push(MAIN_SEPARATOR);
        }
        joined.push_str(part);
    }
    Ok(Value::string(joined))
}

/// `Path::join`: an absolute second part replaces the first.
fn combine(ctx: &CallContext) -> EvalResult {
    let first = ctx.text("path_1")?;
    let second = ctx.text("path_2")?;
    Ok(Value::string(display(&Path::new(&first).join(second))))
}

/// The file outlives the call.
fn create_temp_file(ctx: &CallContext) -> EvalResult {
    let path = ctx.guard("create a temporary file", || {
        Ok(NamedTempFile::new()?.into_temp_path().keep()?)
    })?;
    Ok(Value::string(display(&path)))
}

fn temp(_ctx: &CallContext) -> EvalResult {
    Ok(Value::string(display(&env::temp_dir())))
}

/// Prefix and root directory of `path`, if it has either.
pub(crate) fn root(path: &Path) -> Option<PathBuf> {
    let root: PathBuf = path
        .components()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    (!root.as_os_str().is_empty()).then_some(root)
}

/// Resolve `.` and `..` lexically. `..` at a root is dropped.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = normalized.components().next_back();
                match last {
                    Some(Component::Normal(_)) => {
                        normalized.pop();
                    }
                    Some(Component::Prefix(_) | Component::RootDir) => {}
                    _ => normalized.push(".."),
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Path from `base` to `target`, both normalized and absolute.
///
/// Paths on different roots have no relative form; `target` is returned.
fn relative(base: &Path, target: &Path) -> PathBuf {
    if root(base) != root(target) {
        return target.to_path_buf();
    }
    let base: Vec<_> = base.components().collect();
    let target: Vec<_> = target.components().collect();
    let shared = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..base.len() {
        relative.push("..");
    }
    for component in &target[shared..] {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
