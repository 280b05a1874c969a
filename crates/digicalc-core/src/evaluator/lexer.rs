//! Tokeniser for buffer text.

use super::error::EvaluationError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    /// Function name (a run of ASCII letters).
    Ident(String),
    /// Any single-character operator; the operator table decides its meaning.
    Symbol(char),
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character offset into the source text.
    pub offset: usize,
}

impl Token {
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Number(v) => v.to_string(),
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Symbol(c) => c.to_string(),
            TokenKind::LParen => "(".into(),
            TokenKind::RParen => ")".into(),
        }
    }
}

/// Split `source` into tokens. Whitespace is insignificant.
///
/// The keypad glyphs `×`, `÷` and `−` are accepted as `*`, `/` and `-` so
/// that pasted text evaluates the same as typed text.
pub fn tokenize(source: &str) -> Result<Vec<Token>, EvaluationError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let offset = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let text: String = chars[offset..i].iter().collect();
            let value = parse_number(&text).ok_or(EvaluationError::MalformedNumber {
                text: text.clone(),
                offset,
            })?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                offset,
            });
            continue;
        }

        if c.is_ascii_alphabetic() {
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let name: String = chars[offset..i].iter().collect();
            tokens.push(Token {
                kind: TokenKind::Ident(name.to_ascii_lowercase()),
                offset,
            });
            continue;
        }

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '\u{00d7}' => TokenKind::Symbol('*'),
            '\u{00f7}' => TokenKind::Symbol('/'),
            '\u{2212}' => TokenKind::Symbol('-'),
            other => TokenKind::Symbol(other),
        };
        tokens.push(Token { kind, offset });
        i += 1;
    }

    Ok(tokens)
}

/// `3.`, `.5` and `3.25` are numbers; `.`, `1.2.3` are not.
fn parse_number(text: &str) -> Option<f64> {
    if text == "." || text.matches('.').count() > 1 {
        return None;
    }
    text.parse().ok()
}
