use std::fmt;
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{Arity, Result};
use crate::interner::InternedSymbol;
use crate::numeric::NumericType;

// ============================================================================
// Core Type System
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum AtomType {
    Symbol(InternedSymbol),
    Number(NumericType),
    /// Only produced by evaluating `#t` / `#f`; the reader keeps those as symbols
    Bool(bool),
}

/// A user-defined procedure: the scope active when its `lambda` was
/// evaluated, its formal parameters, and a body already wrapped in `begin`.
pub struct Closure {
    pub env: Environment,
    pub params: Vec<InternedSymbol>,
    pub body: Value,
}

// Environments are cyclic through closures, so Debug stops at the boundary
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .field("env", &"<environment>")
            .finish()
    }
}

/// Native function type - Rust functions callable from Scheme
pub type NativeFn = fn(&[Value]) -> Result<Value>;

/// A native procedure together with the argument count it accepts.
/// The evaluator checks `arity` before invoking `func`.
#[derive(Clone, Copy)]
pub struct Primitive {
    pub name: &'static str,
    pub arity: Arity,
    pub func: NativeFn,
}

impl Primitive {
    pub const fn new(name: &'static str, arity: Arity, func: NativeFn) -> Self {
        Primitive { name, arity, func }
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub enum Value {
    Atom(AtomType),
    List(Rc<Vec<Value>>),
    Closure(Rc<Closure>),
    Primitive(Primitive),
    /// Result of a `cond` in which no clause matched
    Unspecified,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Atom(a), Value::Atom(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Primitive(a), Value::Primitive(b)) => a.name == b.name,
            (Value::Unspecified, Value::Unspecified) => true,
            _ => false,
        }
    }
}

// ============================================================================
// Constructors and Accessors
// ============================================================================

impl Value {
    pub fn symbol(name: &str) -> Value {
        Value::Atom(AtomType::Symbol(InternedSymbol::new(name)))
    }

    pub fn int(n: i64) -> Value {
        Value::Atom(AtomType::Number(NumericType::Int(n)))
    }

    pub fn float(x: f64) -> Value {
        Value::Atom(AtomType::Number(NumericType::Float(x)))
    }

    pub fn number(n: NumericType) -> Value {
        Value::Atom(AtomType::Number(n))
    }

    pub fn bool(b: bool) -> Value {
        Value::Atom(AtomType::Bool(b))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(items))
    }

    pub fn empty_list() -> Value {
        Value::list(Vec::new())
    }

    pub fn as_symbol(&self) -> Option<InternedSymbol> {
        match self {
            Value::Atom(AtomType::Symbol(sym)) => Some(*sym),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<NumericType> {
        match self {
            Value::Atom(AtomType::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_symbol(&self) -> bool {
        self.as_symbol().is_some()
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Value::List(items) if items.is_empty())
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::Primitive(_))
    }

    /// `#f`, the empty list, numeric zero and the unspecified value are
    /// false; everything else is true
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Atom(AtomType::Bool(b)) => *b,
            Value::Atom(AtomType::Number(n)) => !n.is_zero(),
            Value::List(items) => !items.is_empty(),
            Value::Unspecified => false,
            Value::Atom(AtomType::Symbol(_)) | Value::Closure(_) | Value::Primitive(_) => true,
        }
    }

    /// Short type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Atom(AtomType::Symbol(_)) => "symbol",
            Value::Atom(AtomType::Number(NumericType::Int(_))) => "integer",
            Value::Atom(AtomType::Number(NumericType::Float(_))) => "float",
            Value::Atom(AtomType::Bool(_)) => "boolean",
            Value::List(_) => "list",
            Value::Closure(_) | Value::Primitive(_) => "procedure",
            Value::Unspecified => "unspecified",
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AtomType::Symbol(s) => write!(f, "{s}"),
            AtomType::Number(n) => write!(f, "{n}"),
            AtomType::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Atom(atom) => write!(f, "{atom}"),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Value::Closure(_) => write!(f, "#<compound procedure>"),
            Value::Primitive(p) => write!(f, "#<primitive {}>", p.name),
            Value::Unspecified => write!(f, "#<unspecified>"),
        }
    }
}
