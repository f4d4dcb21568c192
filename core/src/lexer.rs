// ============================================================================
// Tokenizer
// ============================================================================

/// Characters that always form a token of their own
fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | '\'')
}

/// Split `input` into tokens. `(`, `)` and `'` are isolated even when they
/// touch other text; everything else is separated by whitespace.
fn scan(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (pos, c) in input.char_indices() {
        if c.is_whitespace() || is_delimiter(c) {
            if let Some(begin) = start.take() {
                tokens.push(&input[begin..pos]);
            }
            if is_delimiter(c) {
                tokens.push(&input[pos..pos + c.len_utf8()]);
            }
        } else if start.is_none() {
            start = Some(pos);
        }
    }

    if let Some(begin) = start {
        tokens.push(&input[begin..]);
    }

    tokens
}

/// A replayable token stream over borrowed input.
///
/// The buffer is scanned once up front; a cursor marks the next token.
/// `next` only advances when it yields a token, so end of input is a
/// checked boundary and `rollback` always undoes the last successful `next`.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    tokens: Vec<&'a str>,
    position: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            tokens: scan(input),
            position: 0,
        }
    }

    /// Consume and return the next token, or None at end of input
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.position).copied()?;
        self.position += 1;
        Some(token)
    }

    /// Un-consume the most recently returned token
    pub fn rollback(&mut self) -> &mut Self {
        self.position = self.position.saturating_sub(1);
        self
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.position).copied()
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Every token of the input, regardless of the cursor
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }
}
