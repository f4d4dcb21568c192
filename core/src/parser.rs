use crate::error::{Error, Result};
use crate::language::{AtomType, Value};
use crate::lexer::Tokenizer;
use crate::numeric::NumericType;

// ============================================================================
// Parser
// ============================================================================

/// Classify a token that is not `(`, `)` or `'`.
/// Integer is tried first, then float; anything else is a symbol.
pub fn parse_atom(token: &str) -> Result<Value> {
    Ok(match NumericType::parse(token)? {
        Some(n) => Value::Atom(AtomType::Number(n)),
        None => Value::symbol(token),
    })
}

/// Parse one expression from the stream
pub fn parse_sexp(tokens: &mut Tokenizer<'_>) -> Result<Value> {
    match tokens.next() {
        None => Err(Error::incomplete("incomplete expression")),
        Some("(") => parse_list(tokens),
        Some(")") => Err(Error::unexpected("unexpected )")),
        Some("'") => {
            let quoted = parse_sexp(tokens)?;
            Ok(Value::list(vec![Value::symbol("quote"), quoted]))
        }
        Some(token) => parse_atom(token),
    }
}

/// Parse list elements up to and including the closing `)`.
/// The opening `(` has already been consumed.
pub fn parse_list(tokens: &mut Tokenizer<'_>) -> Result<Value> {
    let mut items = Vec::new();
    loop {
        match tokens.next() {
            None => return Err(Error::incomplete("unterminated list")),
            Some(")") => return Ok(Value::list(items)),
            Some(_) => items.push(parse_sexp(tokens.rollback())?),
        }
    }
}

/// Parse the first expression of `input`; trailing text is ignored
pub fn parse(input: &str) -> Result<Value> {
    parse_sexp(&mut Tokenizer::new(input))
}

/// Parse every expression of `input` in order
pub fn parse_all(input: &str) -> Result<Vec<Value>> {
    let mut tokens = Tokenizer::new(input);
    let mut exprs = Vec::new();
    while !tokens.is_exhausted() {
        exprs.push(parse_sexp(&mut tokens)?);
    }
    log::trace!("parsed {} expression(s)", exprs.len());
    Ok(exprs)
}
