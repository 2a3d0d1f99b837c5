use regex::Regex;
use std::fmt;

#[derive(Debug, Eq, PartialEq)]
pub enum Token<'a> {
    OpenParen,
    CloseParen,
    Number(&'a str),
    Symbol(&'a str),
}

#[derive(Debug, Eq, PartialEq)]
pub enum TokenizerError {
    UnexpectedCharacter { found: char, position: usize },
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerError::UnexpectedCharacter { found, position } => write!(
                f,
                "tokenizer failed: unexpected character {:?} at position {}",
                found, position
            ),
        }
    }
}

fn create_token(captured: &str) -> Token {
    let bytes = captured.as_bytes();
    match bytes[0] {
        b'(' => Token::OpenParen,
        b')' => Token::CloseParen,
        b'0'..=b'9' => Token::Number(captured),
        b'-' if bytes.len() > 1 && bytes[1].is_ascii_digit() => Token::Number(captured),
        _ => Token::Symbol(captured),
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizerError> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r"(?x)^(              # anchored: one token at the cursor
                [()]                  # parens are single-character tokens
                |-?[0-9][0-9.]*       # numeric literal; dot count checked at read time
                |[A-Za-z+\-*/%<>=!][A-Za-z0-9+\-*/%<>=!]*   # symbols, operators included
            )"
        )
        .unwrap();
    }
    let mut tokens = Vec::new();
    let mut rest = input;
    let mut position = 0;
    loop {
        let trimmed = rest.trim_start();
        position += rest.len() - trimmed.len();
        rest = trimmed;
        if rest.is_empty() {
            break;
        }
        match TOKEN_RE.find(rest) {
            Some(found) => {
                tokens.push(create_token(found.as_str()));
                position += found.end();
                rest = &rest[found.end()..];
            }
            None => {
                // rest is non-empty here, so there is a first character
                let found = rest.chars().next().unwrap();
                return Err(TokenizerError::UnexpectedCharacter { found, position });
            }
        }
    }
    Ok(tokens)
}
