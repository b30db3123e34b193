//! S-expression reader.
//!
//! ```text
//! ; comment to end of line
//! (define threat (num_adjacent_enemies))
//! (if_else (gt threat 0) (attack) (move))
//! ```

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::Value;
use crate::error::ScriptError;
use crate::script::Expr;

/// Deepest call nesting accepted.
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Atom(&'a str),
}

/// Split `src` into tokens tagged with their 1-based line number.
fn tokenize(src: &str) -> Vec<(Token<'_>, usize)> {
    let mut tokens = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        let line_no = idx + 1;
        let code = line.split_once(';').map_or(line, |(code, _)| code);
        let mut start = None;
        for (i, c) in code.char_indices() {
            let delimiter = c.is_whitespace() || c == '(' || c == ')';
            if !delimiter {
                start.get_or_insert(i);
                continue;
            }
            if let Some(s) = start.take() {
                tokens.push((Token::Atom(&code[s..i]), line_no));
            }
            match c {
                '(' => tokens.push((Token::Open, line_no)),
                ')' => tokens.push((Token::Close, line_no)),
                _ => {}
            }
        }
        if let Some(s) = start {
            tokens.push((Token::Atom(&code[s..]), line_no));
        }
    }
    tokens
}

fn error(line: usize, message: impl Into<String>) -> ScriptError {
    ScriptError::Parse {
        line,
        message: message.into(),
    }
}

fn is_symbol(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn atom(text: &str, line: usize) -> Result<Expr, ScriptError> {
    match text {
        "true" => return Ok(Expr::Literal(Value::Bool(true))),
        "false" => return Ok(Expr::Literal(Value::Bool(false))),
        "nil" => return Ok(Expr::Literal(Value::Nil)),
        _ => {}
    }
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.starts_with(|c: char| c.is_ascii_digit()) {
        return text
            .parse::<i64>()
            .map(|n| Expr::Literal(Value::Int(n)))
            .map_err(|e| error(line, format!("invalid integer `{text}`: {e}")));
    }
    if is_symbol(text) {
        Ok(Expr::Symbol(text.to_string()))
    } else {
        Err(error(line, format!("invalid symbol `{text}`")))
    }
}

struct Parser<'a> {
    tokens: Peekable<IntoIter<(Token<'a>, usize)>>,
}

impl Parser<'_> {
    fn expr(&mut self, depth: usize) -> Result<Expr, ScriptError> {
        let Some((token, line)) = self.tokens.next() else {
            return Err(error(0, "unexpected end of input"));
        };
        match token {
            Token::Atom(text) => atom(text, line),
            Token::Close => Err(error(line, "unexpected `)`")),
            Token::Open => self.call(line, depth + 1),
        }
    }

    /// Parse the rest of a call whose `(` was on `line`.
    fn call(&mut self, line: usize, depth: usize) -> Result<Expr, ScriptError> {
        if depth > MAX_DEPTH {
            return Err(error(line, format!("nesting deeper than {MAX_DEPTH}")));
        }
        let name = match self.tokens.next() {
            Some((Token::Atom(name), _)) if is_symbol(name) => name.to_string(),
            Some((_, at)) => return Err(error(at, "expected a command name after `(`")),
            None => return Err(error(line, "unclosed `(`")),
        };
        let mut args = Vec::new();
        loop {
            match self.tokens.peek() {
                None => return Err(error(line, "unclosed `(`")),
                Some((Token::Close, _)) => {
                    self.tokens.next();
                    return Ok(Expr::Call { name, args });
                }
                Some(_) => args.push(self.expr(depth)?),
            }
        }
    }
}

/// Read every top-level expression in `src`.
///
/// # Errors
///
/// [`ScriptError::Parse`] with the offending line.
pub fn parse(src: &str) -> Result<Vec<Expr>, ScriptError> {
    let mut parser = Parser {
        tokens: tokenize(src).into_iter().peekable(),
    };
    let mut exprs = Vec::new();
    while parser.tokens.peek().is_some() {
        exprs.push(parser.expr(0)?);
    }
    Ok(exprs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens: Vec<_> = tokenize("(add 1 x) ; trailing\n(wait)")
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Open,
                Token::Atom("add"),
                Token::Atom("1"),
                Token::Atom("x"),
                Token::Close,
                Token::Open,
                Token::Atom("wait"),
                Token::Close,
            ]
        );
    }

    #[test]
    fn test_parse_atoms() {
        let exprs = parse("1 -7 +3 true false nil foo_bar").unwrap();
        assert_eq!(
            exprs,
            vec![
                Expr::Literal(Value::Int(1)),
                Expr::Literal(Value::Int(-7)),
                Expr::Literal(Value::Int(3)),
                Expr::Literal(Value::Bool(true)),
                Expr::Literal(Value::Bool(false)),
                Expr::Literal(Value::Nil),
                Expr::Symbol("foo_bar".into()),
            ]
        );
    }

    #[test]
    fn test_parse_nested_call() {
        let exprs = parse("(if_else (gt (num_adjacent_enemies) 0)\n  (attack)\n  (move))").unwrap();
        assert_eq!(exprs.len(), 1);
        assert_eq!(
            exprs[0].to_string(),
            "(if_else (gt (num_adjacent_enemies) 0) (attack) (move))"
        );
    }

    #[test]
    fn test_errors_carry_line() {
        assert_eq!(
            parse("(wait)\n(add 1 2"),
            Err(error(2, "unclosed `(`"))
        );
        assert_eq!(parse("\n\n)"), Err(error(3, "unexpected `)`")));
        assert!(matches!(parse("(1 2)"), Err(ScriptError::Parse { line: 1, .. })));
        assert!(matches!(parse("()"), Err(ScriptError::Parse { line: 1, .. })));
        assert!(matches!(parse("(add $x 1)"), Err(ScriptError::Parse { .. })));
        assert!(matches!(
            parse("99999999999999999999"),
            Err(ScriptError::Parse { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}{}", "(neg ".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(parse(&deep).is_err());
        let ok = format!("{}1{}", "(neg ".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(parse(&ok).is_ok());
    }

    #[test]
    fn test_empty_and_comments() {
        assert_eq!(parse(""), Ok(vec![]));
        assert_eq!(parse("; nothing here\n   \n"), Ok(vec![]));
    }
}
