extern crate derive_more;
use crate::environment::Environment;
use crate::{evaluator, printer};
use derive_more::Deref;
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

#[derive(Deref, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol(name.into())
    }
}

/// The one representation shared by parsed syntax and runtime values.
/// A list is code or data depending on where it sits; the evaluator decides.
#[derive(Debug, Clone)]
pub enum Term {
    Number(f64),
    Symbol(Symbol),
    List(Rc<Vec<Term>>),
    Primitive(&'static PrimitiveFn),
    Closure(Rc<Closure>),
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug)]
pub struct BadArgCount {
    name: &'static str,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "when evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Term]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "builtin #<{}>", self.name)
    }
}

pub struct Closure {
    pub parameters: Vec<Symbol>,
    pub body: Term,
    pub parent: Rc<Environment>,
}

impl fmt::Debug for Closure {
    // Not derived because we want to skip the parent: the parent may well contain this Closure!
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#<procedure ({})>",
            self.parameters.iter().map(|s| &s.0).join(" ")
        )
    }
}

/// Only a nonzero number counts as true. Everything else, the empty list
/// and procedures included, takes the false branch.
pub(crate) fn truthy(term: &Term) -> bool {
    match term {
        Term::Number(x) => *x != 0.0,
        Term::Symbol(_) | Term::List(_) | Term::Primitive(_) | Term::Closure(_) => false,
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TypeMismatch {
    NotANumber,
}

impl Term {
    pub(crate) fn as_number(&self) -> Result<f64, TypeMismatch> {
        match self {
            Term::Number(x) => Ok(*x),
            _ => Err(TypeMismatch::NotANumber),
        }
    }

    pub(crate) fn wrap_list(elements: Vec<Term>) -> Self {
        Self::List(Rc::new(elements))
    }

    pub(crate) fn new_symbol(name: &str) -> Self {
        Self::Symbol(Symbol(name.into()))
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        use Term::*;
        match (self, other) {
            (Number(x), Number(y)) => x == y,
            (Symbol(x), Symbol(y)) => x == y,
            (List(xs), List(ys)) => {
                xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(x, y)| x == y)
            }
            (Primitive(x), Primitive(y)) => std::ptr::eq(*x, *y),
            (Closure(x), Closure(y)) => Rc::ptr_eq(x, y),
            _ => false,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", printer::pr_str(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_nonzero_numbers_are_truthy() {
        assert!(truthy(&Term::Number(1.0)));
        assert!(truthy(&Term::Number(-1.0)));
        assert!(!truthy(&Term::Number(0.0)));
        assert!(!truthy(&Term::new_symbol("x")));
        assert!(!truthy(&Term::wrap_list(vec![])));
        assert!(!truthy(&Term::wrap_list(vec![Term::Number(1.0)])));
    }

    #[test]
    fn arity_validation() {
        assert!(Arity::exactly(2).validate_for(2, "f").is_ok());
        assert!(Arity::exactly(2).validate_for(3, "f").is_err());
        assert!(Arity::at_least(1).validate_for(100, "f").is_ok());
        assert!(Arity::at_least(1).validate_for(0, "f").is_err());
    }

    #[test]
    fn terms_compare_structurally() {
        assert_eq!(Term::Number(3.0), Term::Number(3.0));
        assert_ne!(Term::Number(3.0), Term::new_symbol("3"));
        assert_eq!(
            Term::wrap_list(vec![Term::Number(1.0), Term::new_symbol("a")]),
            Term::wrap_list(vec![Term::Number(1.0), Term::new_symbol("a")])
        );
        assert_ne!(
            Term::wrap_list(vec![Term::Number(1.0)]),
            Term::wrap_list(vec![])
        );
    }
}
