//! Lark - developer CLI for the builtin modules.
//!
//! `lark list` shows every builtin namespace; `lark call` invokes one routine
//! with arguments converted from the shell.

pub mod commands;
