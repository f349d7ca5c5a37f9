//! The `folder` module.
//!
//! Directory routines plus access to the working directory service. Listings
//! return the input folder joined with each entry name, sorted.

use std::fs;
use std::path::Path;

use lark_eval::{CallContext, Environment, EvalResult, ModuleValue, Value};

use crate::host::Host;
use crate::path::root;

/// Build the `folder` module callable.
pub fn module(host: &Host, env: &Environment) -> ModuleValue {
    let host = host.clone();
    ModuleValue::new("folder", env, move |m| {
        host.register(m, "exists", &["folderpath"], exists);
        host.register(m, "create", &["folderpath"], create);
        host.register(m, "delete", &["folderpath"], delete);
        host.register(m, "subfolders_in", &["folderpath"], subfolders_in);
        host.register(m, "files_in", &["folderpath"], files_in);
        host.register(
            m,
            "files_and_subfolders_in",
            &["folderpath"],
            files_and_subfolders_in,
        );
        host.register(m, "parent_of", &["folderpath"], parent_of);
        host.register(m, "root_of", &["folderpath"], root_of);
        host.register(m, "current", &[], current);
        host.register(m, "set_current", &["folderpath"], set_current);
        host.register(m, "move", &["from_path", "to_path"], move_folder);
        Ok(())
    })
}

fn exists(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("folderpath")?;
    let target = host.resolve_in(ctx, &path)?;
    Ok(Value::Bool(target.is_dir()))
}

/// Creates missing parents too.
fn create(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("folderpath")?;
    let target = host.resolve_in(ctx, &path)?;
    ctx.guard(&format!("create folder `{path}`"), || {
        fs::create_dir_all(&target)
    })?;
    Ok(Value::Absent)
}

/// Removes an empty folder; a non-empty one is a native failure.
fn delete(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("folderpath")?;
    let target = host.resolve_in(ctx, &path)?;
    if !target.is_dir() {
        return Err(ctx.not_found("delete folder", &path));
    }
    ctx.guard(&format!("delete folder `{path}`"), || fs::remove_dir(&target))?;
    Ok(Value::Absent)
}

#[derive(Clone, Copy)]
enum Listing {
    Files,
    Folders,
    Both,
}

impl Listing {
    fn keeps(self, entry: &Path) -> bool {
        match self {
            Listing::Files => entry.is_file(),
            Listing::Folders => entry.is_dir(),
            Listing::Both => true,
        }
    }
}

fn subfolders_in(ctx: &CallContext, host: &Host) -> EvalResult {
    list(ctx, host, Listing::Folders)
}

fn files_in(ctx: &CallContext, host: &Host) -> EvalResult {
    list(ctx, host, Listing::Files)
}

fn files_and_subfolders_in(ctx: &CallContext, host: &Host) -> EvalResult {
    list(ctx, host, Listing::Both)
}

fn list(ctx: &CallContext, host: &Host, listing: Listing) -> EvalResult {
    let path = ctx.text("folderpath")?;
    let target = host.resolve_in(ctx, &path)?;
    if !target.is_dir() {
        return Err(ctx.not_found("list folder", &path));
    }

    let mut names = ctx.guard(&format!("list folder `{path}`"), || {
        let mut names = Vec::new();
        for entry in fs::read_dir(&target)? {
            let entry = entry?;
            if listing.keeps(&entry.path()) {
                names.push(entry.file_name());
            }
        }
        Ok(names)
    })?;
    names.sort();

    let base = Path::new(&path);
    Ok(Value::strings(
        names
            .iter()
            .map(|name| base.join(name).to_string_lossy().into_owned()),
    ))
}

/// Absent at a root.
fn parent_of(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("folderpath")?;
    let target = host.resolve_in(ctx, &path)?;
    Ok(Value::string_or_absent(
        target.parent().map(|p| p.to_string_lossy().into_owned()),
    ))
}

fn root_of(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("folderpath")?;
    let target = host.resolve_in(ctx, &path)?;
    Ok(Value::string_or_absent(
        root(&target).map(|r| r.to_string_lossy().into_owned()),
    ))
}

fn current(ctx: &CallContext, host: &Host) -> EvalResult {
    let cwd = ctx.guard("read the working directory", || {
        host.working_directory().current()
    })?;
    Ok(Value::string(cwd.to_string_lossy().into_owned()))
}

/// Changes the host's working directory; with the process service this is
/// process-wide.
fn set_current(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("folderpath")?;
    let target = host.resolve_in(ctx, &path)?;
    if !target.is_dir() {
        return Err(ctx.not_found("enter folder", &path));
    }
    ctx.guard(&format!("enter folder `{path}`"), || {
        host.working_directory().set_current(&target)
    })?;
    Ok(Value::Absent)
}

fn move_folder(ctx: &CallContext, host: &Host) -> EvalResult {
    let from = ctx.text("from_path")?;
    let to = ctx.text("to_path")?;
    let source = host.resolve_in(ctx, &from)?;
    let destination = host.resolve_in(ctx, &to)?;
    if !source.is_dir() {
        return Err(ctx.not_found("move folder", &from));
    }
    ctx.guard(&format!("move folder `{from}` to `{to}`"), || {
        fs::rename(&source, &destination)
    })?;
    Ok(Value::Absent)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
