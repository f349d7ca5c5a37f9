//! Runtime values seen by builtin routines.
//!
//! # Construction
//!
//! Heap-backed variants are built through factory methods:
//!
//! ```text
//! let s = Value::string("hello");
//! let chars = Value::char_list_from("hello");
//! let paths = Value::array(vec![Value::string("a"), Value::string("b")]);
//! ```
//!
//! # Text and sequences
//!
//! The guest language has two text kinds (immutable `string`, mutable
//! `character_list`) and two sequence kinds (fixed `array`, growable `list`).
//! Builtins never branch on which one they received: `as_text` and
//! `as_sequence` normalize both kinds of each family.

mod heap;

use std::borrow::Cow;
use std::fmt;

use crate::callable::Callable;
use crate::environment::Environment;
use crate::errors::{no_such_member, EvalError};

pub use heap::{Heap, Shared};

/// Runtime value in the Lark interpreter.
#[derive(Clone)]
pub enum Value {
    // Primitives
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// The "no value" marker. Distinct from failure.
    Absent,

    // Text
    /// Immutable string.
    Str(Heap<String>),
    /// Mutable character sequence.
    CharList(Shared<Vec<char>>),

    // Sequences
    /// Fixed-size array.
    Array(Heap<Vec<Value>>),
    /// Growable list.
    List(Shared<Vec<Value>>),

    // Namespaces and code
    /// Namespace produced by invoking a module.
    Module(ModuleInstance),
    /// Native routine or module.
    Callable(Callable),
}

// Factory Methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a character list from its characters.
    #[inline]
    pub fn char_list(chars: Vec<char>) -> Self {
        Value::CharList(Shared::new(chars))
    }

    /// Create a character list holding the characters of `s`.
    #[inline]
    pub fn char_list_from(s: &str) -> Self {
        Value::char_list(s.chars().collect())
    }

    /// Create an array value.
    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Shared::new(items))
    }

    /// Create an array of strings.
    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::array(items.into_iter().map(Value::string).collect())
    }

    /// A string when `s` is present and non-empty, `Absent` otherwise.
    pub fn string_or_absent(s: Option<String>) -> Self {
        match s {
            Some(s) if !s.is_empty() => Value::string(s),
            _ => Value::Absent,
        }
    }
}

// Inspection

impl Value {
    /// Guest-facing name of this value's kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Absent => "absent",
            Value::Str(_) => "string",
            Value::CharList(_) => "character_list",
            Value::Array(_) => "array",
            Value::List(_) => "list",
            Value::Module(_) => "module",
            Value::Callable(_) => "callable",
        }
    }

    /// Normalize either text kind to one host string.
    ///
    /// A string yields its content; a character list yields its characters
    /// concatenated in order. Every other kind yields `None`.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Str(s) => Some(Cow::Borrowed(s.as_str())),
            Value::CharList(chars) => Some(Cow::Owned(chars.borrow().iter().collect())),
            _ => None,
        }
    }

    /// Whether this value is either text kind.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Str(_) | Value::CharList(_))
    }

    /// Normalize either sequence kind to a plain ordered sequence.
    pub fn as_sequence(&self) -> Option<Vec<Value>> {
        match self {
            Value::Array(items) => Some(items.to_vec()),
            Value::List(items) => Some(items.borrow().clone()),
            _ => None,
        }
    }

    /// Get as a callable, if this is one.
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Get as a module instance, if this is one.
    pub fn as_module(&self) -> Option<&ModuleInstance> {
        match self {
            Value::Module(m) => Some(m),
            _ => None,
        }
    }
}

// Host-to-guest conversions

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Absent
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::strings(items)
    }
}

impl From<Option<String>> for Value {
    fn from(s: Option<String>) -> Self {
        Value::string_or_absent(s)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

impl From<ModuleInstance> for Value {
    fn from(m: ModuleInstance) -> Self {
        Value::Module(m)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Absent, Value::Absent) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::CharList(a), Value::CharList(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Module(a), Value::Module(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Absent => write!(f, "Absent"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::CharList(chars) => {
                let text: String = chars.borrow().iter().collect();
                write!(f, "CharList({text:?})")
            }
            Value::Array(items) => f.debug_tuple("Array").field(&**items).finish(),
            Value::List(items) => f.debug_tuple("List").field(&*items.borrow()).finish(),
            Value::Module(m) => write!(f, "Module({})", m.name()),
            Value::Callable(c) => write!(f, "Callable({}/{})", c.name(), c.arity()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Absent => write!(f, "absent"),
            Value::Str(s) => f.write_str(s),
            Value::CharList(chars) => {
                for c in chars.borrow().iter() {
                    write!(f, "{c}")?;
                }
                Ok(())
            }
            Value::Array(items) => fmt_elements(f, items),
            Value::List(items) => fmt_elements(f, &items.borrow()),
            Value::Module(m) => write!(f, "<module {}>", m.name()),
            Value::Callable(c) => write!(f, "<callable {}>", c.name()),
        }
    }
}

/// Collections quote their text elements so element boundaries stay visible.
fn fmt_elements(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        match item.as_text() {
            Some(text) => write!(f, "{text:?}")?,
            None => write!(f, "{item}")?,
        }
    }
    write!(f, "]")
}

// Module instances

/// Namespace produced by invoking a module.
///
/// Wraps the environment the module builder populated. The binding layer
/// never mutates it after construction.
#[derive(Clone)]
pub struct ModuleInstance {
    name: Heap<str>,
    env: Environment,
}

impl ModuleInstance {
    pub(crate) fn new(name: Heap<str>, env: Environment) -> Self {
        ModuleInstance { name, env }
    }

    /// Display name of the module this instance came from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace environment.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Look up a member bound directly in the namespace.
    ///
    /// Names inherited from the module's defining scope are not members.
    pub fn member(&self, name: &str) -> Result<Value, EvalError> {
        self.env
            .lookup_local(name)
            .ok_or_else(|| no_such_member(&self.name, name).with_env(self.env.clone()))
    }

    /// All members, sorted by name.
    pub fn members(&self) -> Vec<(String, Value)> {
        self.env.local_bindings()
    }
}

impl PartialEq for ModuleInstance {
    fn eq(&self, other: &Self) -> bool {
        self.env.ptr_eq(&other.env)
    }
}

impl fmt::Debug for ModuleInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleInstance")
            .field("name", &self.name())
            .field("env", &self.env)
            .finish()
    }
}
