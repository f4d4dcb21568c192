//! Tree-walking evaluator
//!
//! `eval` is a function of the expression and the environment only. List
//! expressions are classified by their head into a closed set of forms:
//! the special forms below, or procedure application. Recursion depth
//! follows the program's nesting and call depth; there is no tail-call
//! elimination, so very deep recursion exhausts the native stack.

use std::rc::Rc;

use subscheme_core::{
    Arity, AtomType, Closure, Environment, Error, Result, Value, parse_all,
};

// ============================================================================
// Form Classification
// ============================================================================

/// How a list expression is evaluated, chosen by its first element.
///
/// Keywords are matched syntactically, so a user binding named `begin`
/// or `quote` never changes the meaning of those forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Begin,
    Quote,
    Lambda,
    Cond,
    Define,
    And,
    Or,
    Application,
}

impl Form {
    pub fn classify(head: &Value) -> Form {
        match head.as_symbol() {
            Some(sym) => sym.with_str(|name| match name {
                "begin" => Form::Begin,
                "quote" => Form::Quote,
                "lambda" => Form::Lambda,
                "cond" => Form::Cond,
                "define" => Form::Define,
                "and" => Form::And,
                "or" => Form::Or,
                _ => Form::Application,
            }),
            None => Form::Application,
        }
    }
}

// ============================================================================
// Evaluator
// ============================================================================

pub fn eval(expr: &Value, env: &Environment) -> Result<Value> {
    match expr {
        Value::List(items) => eval_list(items, env),

        Value::Atom(AtomType::Symbol(sym)) => {
            let literal = sym.with_str(|name| match name {
                "#t" => Some(true),
                "#f" => Some(false),
                _ => None,
            });
            match literal {
                Some(b) => Ok(Value::bool(b)),
                None => env.lookup(*sym),
            }
        }

        // Numbers and booleans are self-evaluating
        Value::Atom(_) => Ok(expr.clone()),

        // Only reachable from trees assembled in Rust rather than read from text
        Value::Closure(_) | Value::Primitive(_) | Value::Unspecified => Ok(expr.clone()),
    }
}

fn eval_list(items: &[Value], env: &Environment) -> Result<Value> {
    let Some((head, operands)) = items.split_first() else {
        return Err(Error::Type("cannot evaluate empty combination ()".to_string()));
    };

    match Form::classify(head) {
        Form::Begin => eval_sequence("begin", operands, env),
        Form::Quote => eval_quote(operands),
        Form::Lambda => eval_lambda(operands, env),
        Form::Cond => eval_cond(operands, env),
        Form::Define => eval_define(operands, env),
        Form::And => eval_and(operands, env),
        Form::Or => eval_or(operands, env),
        Form::Application => {
            let procedure = eval(head, env)?;
            let args = operands
                .iter()
                .map(|operand| eval(operand, env))
                .collect::<Result<Vec<_>>>()?;
            apply(&procedure, &args)
        }
    }
}

// ============================================================================
// Special Forms
// ============================================================================

/// Evaluate `exprs` in order and return the last value
fn eval_sequence(keyword: &str, exprs: &[Value], env: &Environment) -> Result<Value> {
    let Some((last, init)) = exprs.split_last() else {
        return Err(Error::arity(keyword, Arity::AtLeast(1), 0));
    };
    for expr in init {
        eval(expr, env)?;
    }
    eval(last, env)
}

fn eval_quote(operands: &[Value]) -> Result<Value> {
    match operands {
        [datum] => Ok(datum.clone()),
        _ => Err(Error::arity("quote", Arity::Exactly(1), operands.len())),
    }
}

fn eval_lambda(operands: &[Value], env: &Environment) -> Result<Value> {
    let [params_expr, body @ ..] = operands else {
        return Err(Error::arity("lambda", Arity::AtLeast(2), 0));
    };
    if body.is_empty() {
        return Err(Error::arity("lambda", Arity::AtLeast(2), operands.len()));
    }

    let params = params_expr
        .as_list()
        .ok_or_else(|| {
            Error::Type(format!(
                "lambda: parameters must be a list, got {params_expr}"
            ))
        })?
        .iter()
        .map(|param| {
            param.as_symbol().ok_or_else(|| {
                Error::Type(format!("lambda: parameter must be a symbol, got {param}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut wrapped = Vec::with_capacity(body.len() + 1);
    wrapped.push(Value::symbol("begin"));
    wrapped.extend(body.iter().cloned());

    Ok(Value::Closure(Rc::new(Closure {
        env: env.clone(),
        params,
        body: Value::list(wrapped),
    })))
}

fn eval_cond(clauses: &[Value], env: &Environment) -> Result<Value> {
    for clause in clauses {
        let Some((test, body)) = clause.as_list().and_then(|parts| parts.split_first()) else {
            return Err(Error::Type(format!(
                "cond: clause must be a non-empty list, got {clause}"
            )));
        };

        let is_else = test.as_symbol().is_some_and(|sym| sym.is("else"));
        let value = if is_else {
            Value::bool(true)
        } else {
            eval(test, env)?
        };

        if value.is_truthy() {
            // A clause with no body yields its test value
            return if body.is_empty() {
                Ok(value)
            } else {
                eval_sequence("cond", body, env)
            };
        }
    }
    Ok(Value::Unspecified)
}

fn eval_define(operands: &[Value], env: &Environment) -> Result<Value> {
    let [target, expr] = operands else {
        return Err(Error::arity("define", Arity::Exactly(2), operands.len()));
    };
    let name = target
        .as_symbol()
        .ok_or_else(|| Error::Type(format!("define: expected a symbol, got {target}")))?;

    let value = eval(expr, env)?;
    log::debug!("define {name} = {value}");
    env.define(name, value.clone());
    Ok(value)
}

fn eval_and(operands: &[Value], env: &Environment) -> Result<Value> {
    for operand in operands {
        if !eval(operand, env)?.is_truthy() {
            return Ok(Value::bool(false));
        }
    }
    Ok(Value::bool(true))
}

fn eval_or(operands: &[Value], env: &Environment) -> Result<Value> {
    for operand in operands {
        if eval(operand, env)?.is_truthy() {
            return Ok(Value::bool(true));
        }
    }
    Ok(Value::bool(false))
}

// ============================================================================
// Application
// ============================================================================

/// Invoke a procedure value with already-evaluated arguments
pub fn apply(procedure: &Value, args: &[Value]) -> Result<Value> {
    match procedure {
        Value::Closure(closure) => call(closure, args),
        Value::Primitive(primitive) => {
            if !primitive.arity.accepts(args.len()) {
                return Err(Error::arity(primitive.name, primitive.arity, args.len()));
            }
            (primitive.func)(args)
        }
        other => Err(Error::Type(format!(
            "cannot apply non-procedure {other} ({})",
            other.type_name()
        ))),
    }
}

/// Run a closure: bind formals to arguments in a fresh child of the
/// captured environment, then evaluate the body there
pub fn call(closure: &Closure, args: &[Value]) -> Result<Value> {
    if args.len() != closure.params.len() {
        return Err(Error::arity(
            "lambda",
            Arity::Exactly(closure.params.len()),
            args.len(),
        ));
    }

    log::trace!("call {} with {} argument(s)", closure.body, args.len());
    let local = closure.env.extend(&closure.params, args);
    eval(&closure.body, &local)
}

/// Parse every expression in `source` and evaluate them in order.
/// Returns the last value, or None when the source holds no expression.
pub fn eval_source(source: &str, env: &Environment) -> Result<Option<Value>> {
    let mut last = None;
    for expr in parse_all(source)? {
        last = Some(eval(&expr, env)?);
    }
    Ok(last)
}
