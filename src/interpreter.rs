use crate::environment::Environment;
use crate::{evaluator, printer, reader, Term};
use std::fmt;
use std::rc::Rc;

pub type Result = std::result::Result<Term, Error>;

#[derive(Debug)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "read error: {}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

pub fn read(line: &str) -> Result {
    reader::read_str(line).map_err(Error::Read)
}

pub fn eval(term: &Term, env: &Rc<Environment>) -> Result {
    evaluator::evaluate(term, env).map_err(Error::Eval)
}

/// One read-eval-print cycle. A failing cycle reports its error and leaves
/// the environment exactly as the previous successful cycle left it.
pub fn rep(line: &str, env: &Rc<Environment>) -> String {
    printer::print(&read(line).and_then(|term| eval(&term, env)))
}
