//! Primitive procedures
//!
//! These are the native procedures seeded into the global environment.
//! Each declares its arity; `apply` rejects a wrong argument count before
//! the function body runs, so the bodies index `args` freely.

use std::cmp::Ordering;

use subscheme_core::{
    Arity, AtomType, Environment, Error, InternedSymbol, NumericType, Primitive, Result, Value,
};

// ============================================================================
// Argument Helpers
// ============================================================================

fn expect_number(name: &str, value: &Value) -> Result<NumericType> {
    value
        .as_number()
        .ok_or_else(|| Error::Type(format!("{name}: expected number, got {value}")))
}

fn expect_list<'a>(name: &str, value: &'a Value) -> Result<&'a [Value]> {
    value
        .as_list()
        .ok_or_else(|| Error::Type(format!("{name}: expected list, got {value}")))
}

fn fold_numbers<F>(name: &str, init: NumericType, args: &[Value], op: F) -> Result<Value>
where
    F: Fn(&NumericType, &NumericType) -> Result<NumericType>,
{
    args.iter()
        .try_fold(init, |acc, arg| op(&acc, &expect_number(name, arg)?))
        .map(Value::number)
}

// ============================================================================
// Arithmetic
// ============================================================================

/// (+ n ...) => sum, 0 when empty
pub fn add(args: &[Value]) -> Result<Value> {
    fold_numbers("+", NumericType::Int(0), args, NumericType::add)
}

/// (* n ...) => product, 1 when empty
pub fn mul(args: &[Value]) -> Result<Value> {
    fold_numbers("*", NumericType::Int(1), args, NumericType::mul)
}

/// (- n) => negation; (- a b ...) => a - b - ...
pub fn sub(args: &[Value]) -> Result<Value> {
    let first = expect_number("-", &args[0])?;
    if args.len() == 1 {
        return first.neg().map(Value::number);
    }
    fold_numbers("-", first, &args[1..], NumericType::sub)
}

/// (/ a b ...) => a / b / ...; a single argument is returned unchanged
pub fn div(args: &[Value]) -> Result<Value> {
    let first = expect_number("/", &args[0])?;
    fold_numbers("/", first, &args[1..], NumericType::div)
}

// ============================================================================
// Comparison and Predicates
// ============================================================================

/// Order two numbers numerically or two symbols by name
fn compare(name: &str, args: &[Value], wanted: Ordering) -> Result<Value> {
    let ordering = match (&args[0], &args[1]) {
        (Value::Atom(AtomType::Symbol(a)), Value::Atom(AtomType::Symbol(b))) => {
            Some(a.resolve().cmp(&b.resolve()))
        }
        (a, b) => expect_number(name, a)?.partial_cmp(&expect_number(name, b)?),
    };
    Ok(Value::bool(ordering == Some(wanted)))
}

pub fn less_than(args: &[Value]) -> Result<Value> {
    compare("<", args, Ordering::Less)
}

pub fn greater_than(args: &[Value]) -> Result<Value> {
    compare(">", args, Ordering::Greater)
}

/// Structural equality; numbers compare across int/float
pub fn equal(args: &[Value]) -> Result<Value> {
    Ok(Value::bool(args[0] == args[1]))
}

pub fn is_zero(args: &[Value]) -> Result<Value> {
    Ok(Value::bool(args[0].as_number().is_some_and(|n| n.is_zero())))
}

pub fn is_null(args: &[Value]) -> Result<Value> {
    Ok(Value::bool(args[0].is_empty_list()))
}

/// True only for symbols; numbers are not atoms here
pub fn is_atom(args: &[Value]) -> Result<Value> {
    Ok(Value::bool(args[0].is_symbol()))
}

pub fn not(args: &[Value]) -> Result<Value> {
    Ok(Value::bool(!args[0].is_truthy()))
}

// ============================================================================
// Lists
// ============================================================================

/// (cons x '(a b)) => (x a b); the input list is left untouched
pub fn cons(args: &[Value]) -> Result<Value> {
    let tail = expect_list("cons", &args[1])?;
    let mut items = Vec::with_capacity(tail.len() + 1);
    items.push(args[0].clone());
    items.extend(tail.iter().cloned());
    Ok(Value::list(items))
}

pub fn car(args: &[Value]) -> Result<Value> {
    expect_list("car", &args[0])?
        .first()
        .cloned()
        .ok_or_else(|| Error::Type("car: empty list".to_string()))
}

/// All but the first element; `()` for a singleton or the empty list
pub fn cdr(args: &[Value]) -> Result<Value> {
    let items = expect_list("cdr", &args[0])?;
    Ok(Value::list(items.iter().skip(1).cloned().collect()))
}

// ============================================================================
// Control
// ============================================================================

/// Ask the driver to terminate
pub fn quit(_args: &[Value]) -> Result<Value> {
    Err(Error::Quit)
}

// ============================================================================
// Registration
// ============================================================================

pub const PRIMITIVES: &[Primitive] = &[
    Primitive::new("+", Arity::AtLeast(0), add),
    Primitive::new("*", Arity::AtLeast(0), mul),
    Primitive::new("-", Arity::AtLeast(1), sub),
    Primitive::new("/", Arity::AtLeast(1), div),
    Primitive::new("<", Arity::Exactly(2), less_than),
    Primitive::new(">", Arity::Exactly(2), greater_than),
    Primitive::new("=", Arity::Exactly(2), equal),
    Primitive::new("eq?", Arity::Exactly(2), equal),
    Primitive::new("zero?", Arity::Exactly(1), is_zero),
    Primitive::new("null?", Arity::Exactly(1), is_null),
    Primitive::new("atom?", Arity::Exactly(1), is_atom),
    Primitive::new("not", Arity::Exactly(1), not),
    Primitive::new("cons", Arity::Exactly(2), cons),
    Primitive::new("car", Arity::Exactly(1), car),
    Primitive::new("cdr", Arity::Exactly(1), cdr),
    Primitive::new("quit", Arity::Exactly(0), quit),
];

/// Bind every primitive, plus `else` as true, in `env`
pub fn register_primitives(env: &Environment) {
    for primitive in PRIMITIVES {
        env.define(InternedSymbol::new(primitive.name), Value::Primitive(*primitive));
    }
    env.define(InternedSymbol::new("else"), Value::bool(true));
    log::debug!("registered {} primitives", PRIMITIVES.len());
}

/// A fresh global scope with the primitives installed
pub fn global_environment() -> Environment {
    let env = Environment::new();
    register_primitives(&env);
    env
}
