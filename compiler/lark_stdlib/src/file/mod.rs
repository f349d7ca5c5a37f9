//! The `file` module.
//!
//! Routines that read or mutate a single file. Destructive routines check
//! that their source exists first and report a missing one as an `IOError`
//! without touching the filesystem.

use std::fs::{self, OpenOptions};
use std::io::Write;

use lark_eval::{CallContext, Environment, EvalResult, ModuleValue, Value};

use crate::host::Host;

const MODES: &[&str] = &["write", "append"];

/// Build the `file` module callable.
pub fn module(host: &Host, env: &Environment) -> ModuleValue {
    let host = host.clone();
    ModuleValue::new("file", env, move |m| {
        host.register(m, "exists", &["filepath"], exists);
        host.register(m, "create", &["filepath"], create);
        host.register(m, "delete", &["filepath"], delete);
        host.register(m, "read", &["filepath"], read);
        host.register(m, "write", &["contents", "filepath", "mode"], write);
        host.register(m, "copy", &["from_path", "to_path"], copy);
        host.register(m, "move", &["from_path", "to_path"], move_file);
        Ok(())
    })
}

fn exists(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("filepath")?;
    let target = host.resolve_in(ctx, &path)?;
    Ok(Value::Bool(target.is_file()))
}

fn create(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("filepath")?;
    let target = host.resolve_in(ctx, &path)?;
    ctx.guard(&format!("create file `{path}`"), || fs::File::create(&target))?;
    Ok(Value::Absent)
}

fn delete(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("filepath")?;
    let target = host.resolve_in(ctx, &path)?;
    if !target.is_file() {
        return Err(ctx.not_found("delete file", &path));
    }
    ctx.guard(&format!("delete file `{path}`"), || fs::remove_file(&target))?;
    Ok(Value::Absent)
}

/// Contents as an array of lines, without their terminators.
fn read(ctx: &CallContext, host: &Host) -> EvalResult {
    let path = ctx.text("filepath")?;
    let target = host.resolve_in(ctx, &path)?;
    if !target.is_file() {
        return Err(ctx.not_found("read file", &path));
    }
    let contents = ctx.guard(&format!("read file `{path}`"), || {
        fs::read_to_string(&target)
    })?;
    Ok(Value::strings(contents.lines()))
}

fn write(ctx: &CallContext, host: &Host) -> EvalResult {
    let contents = ctx.text("contents")?;
    let path = ctx.text("filepath")?;
    let mode = ctx.one_of("mode", MODES)?;
    let target = host.resolve_in(ctx, &path)?;

    if mode == "append" {
        ctx.guard(&format!("append to file `{path}`"), || {
            let mut file = OpenOptions::new().create(true).append(true).open(&target)?;
            file.write_all(contents.as_bytes())
        })?;
    } else {
        ctx.guard(&format!("write file `{path}`"), || {
            fs::write(&target, contents.as_bytes())
        })?;
    }
    Ok(Value::Absent)
}

/// Copies over an existing destination.
fn copy(ctx: &CallContext, host: &Host) -> EvalResult {
    let from = ctx.text("from_path")?;
    let to = ctx.text("to_path")?;
    let source = host.resolve_in(ctx, &from)?;
    let destination = host.resolve_in(ctx, &to)?;
    if !source.is_file() {
        return Err(ctx.not_found("copy file", &from));
    }
    ctx.guard(&format!("copy file `{from}` to `{to}`"), || {
        fs::copy(&source, &destination)
    })?;
    Ok(Value::Absent)
}

fn move_file(ctx: &CallContext, host: &Host) -> EvalResult {
    let from = ctx.text("from_path")?;
    let to = ctx.text("to_path")?;
    let source = host.resolve_in(ctx, &from)?;
    let destination = host.resolve_in(ctx, &to)?;
    if !source.is_file() {
        return Err(ctx.not_found("move file", &from));
    }
    ctx.guard(&format!("move file `{from}` to `{to}`"), || {
        fs::rename(&source, &destination)
    })?;
    Ok(Value::Absent)
}
