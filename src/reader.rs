use crate::tokens::{tokenize, Token, TokenizerError};
use crate::types::Term;
use std::fmt;
use std::iter::Peekable;
use std::slice;

type Reader<'a> = Peekable<slice::Iter<'a, Token<'a>>>;

#[derive(Debug)]
pub enum Error {
    Tokenizer(TokenizerError),
    NoMoreTokens,
    UnclosedList,
    UnexpectedCloseParen,
    BadNumber(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Tokenizer(e) => write!(f, "{}", e),
            Error::NoMoreTokens => write!(f, "nothing to read"),
            Error::UnclosedList => write!(f, "missing closing parenthesis"),
            Error::UnexpectedCloseParen => write!(f, "unexpected closing parenthesis"),
            Error::BadNumber(text) => write!(f, "could not read {:?} as a number", text),
        }
    }
}

/// Read one complete expression from the line. Trailing tokens are left
/// unconsumed; whether that is an error is the caller's decision.
pub fn read_str(input: &str) -> Result<Term, Error> {
    let tokens = tokenize(input).map_err(Error::Tokenizer)?;
    let mut reader = tokens.iter().peekable();
    read_form(&mut reader)
}

fn read_form(reader: &mut Reader) -> Result<Term, Error> {
    match reader.next() {
        Some(Token::OpenParen) => read_list(reader),
        Some(Token::Number(text)) => read_number(text),
        Some(Token::Symbol(text)) => Ok(Term::new_symbol(text)),
        Some(Token::CloseParen) => Err(Error::UnexpectedCloseParen),
        None => Err(Error::NoMoreTokens),
    }
}

fn read_list(reader: &mut Reader) -> Result<Term, Error> {
    let mut elements = Vec::new();
    loop {
        match reader.peek() {
            Some(Token::CloseParen) => {
                reader.next();
                break;
            }
            Some(_) => elements.push(read_form(reader)?),
            None => return Err(Error::UnclosedList),
        }
    }
    Ok(Term::wrap_list(elements))
}

fn read_number(text: &str) -> Result<Term, Error> {
    text.parse::<f64>()
        .map(Term::Number)
        .map_err(|_| Error::BadNumber(text.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_atoms() {
        assert_eq!(read_str("42").unwrap(), Term::Number(42.0));
        assert_eq!(read_str("-4.5").unwrap(), Term::Number(-4.5));
        assert_eq!(read_str("foo").unwrap(), Term::new_symbol("foo"));
        assert_eq!(read_str("+").unwrap(), Term::new_symbol("+"));
    }

    #[test]
    fn reads_nested_lists() {
        let term = read_str("(+ 1 (neg 2))").unwrap();
        assert_eq!(
            term,
            Term::wrap_list(vec![
                Term::new_symbol("+"),
                Term::Number(1.0),
                Term::wrap_list(vec![Term::new_symbol("neg"), Term::Number(2.0)]),
            ])
        );
    }

    #[test]
    fn empty_list_is_legal() {
        assert_eq!(read_str("()").unwrap(), Term::wrap_list(vec![]));
    }

    #[test]
    fn unclosed_list_is_rejected() {
        match read_str("(+ 1 2") {
            Err(Error::UnclosedList) => (),
            other => panic!("expected UnclosedList, got {:?}", other),
        }
        match read_str("(a (b c)") {
            Err(Error::UnclosedList) => (),
            other => panic!("expected UnclosedList, got {:?}", other),
        }
    }

    #[test]
    fn bare_close_paren_is_rejected() {
        match read_str(")") {
            Err(Error::UnexpectedCloseParen) => (),
            other => panic!("expected UnexpectedCloseParen, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        match read_str("   ") {
            Err(Error::NoMoreTokens) => (),
            other => panic!("expected NoMoreTokens, got {:?}", other),
        }
    }

    #[test]
    fn malformed_numeric_text_is_a_read_error() {
        match read_str("1.2.3") {
            Err(Error::BadNumber(text)) => assert_eq!(text, "1.2.3"),
            other => panic!("expected BadNumber, got {:?}", other),
        }
    }

    #[test]
    fn one_read_consumes_one_form_only() {
        // Trailing tokens are not an error at this layer.
        assert_eq!(read_str("1 2 3").unwrap(), Term::Number(1.0));
    }

    #[test]
    fn tokenizer_errors_propagate() {
        match read_str("(+ 1 &)") {
            Err(Error::Tokenizer(_)) => (),
            other => panic!("expected a tokenizer error, got {:?}", other),
        }
    }
}
