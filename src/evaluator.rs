use crate::environment::{Environment, UnknownSymbol};
use crate::types::{Closure, PrimitiveFn, Term, TypeMismatch};
use crate::{environment, special_forms, types};
use itertools::Itertools;
use std::fmt;
use std::rc::Rc;

pub type Result<T = Term> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnknownSymbol(environment::UnknownSymbol),
    NotAProcedure,
    Define(special_forms::DefineError),
    Lambda(special_forms::LambdaError),
    If(special_forms::IfError),
    ArityMismatch { expected: usize, got: usize },
    BadArgCount(types::BadArgCount),
    TypeMismatch(types::TypeMismatch),
    DivideByZero,
    StackOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSymbol(UnknownSymbol(s)) => write!(f, "'{}' not found", s),
            Error::NotAProcedure => {
                write!(f, "cannot apply: head of the list is not a procedure")
            }
            Error::Define(e) => write!(f, "bad define syntax: {:?}", e),
            Error::Lambda(e) => write!(f, "bad lambda syntax: {:?}", e),
            Error::If(e) => write!(f, "bad if syntax: {:?}", e),
            Error::ArityMismatch { expected, got } => write!(
                f,
                "procedure takes {} arguments, but received {}",
                expected, got
            ),
            Error::BadArgCount(e) => write!(f, "{}", e),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {:?}", e),
            Error::DivideByZero => write!(f, "cannot divide by zero!"),
            Error::StackOverflow => write!(
                f,
                "evaluation nested deeper than {} levels",
                MAX_RECURSION_DEPTH
            ),
        }
    }
}

impl From<types::TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

/// Evaluation is direct recursion with no tail-call elimination, so a
/// runaway recursive lambda would otherwise blow the host stack. Deeper
/// nesting than this fails with Error::StackOverflow instead.
pub const MAX_RECURSION_DEPTH: usize = 512;

pub fn evaluate(term: &Term, env: &Rc<Environment>) -> Result {
    evaluate_at_depth(term, env, 0)
}

pub(crate) fn evaluate_at_depth(term: &Term, env: &Rc<Environment>, depth: usize) -> Result {
    if depth >= MAX_RECURSION_DEPTH {
        return Err(Error::StackOverflow);
    }
    log::trace!("evaluate {:?}", term);
    match term {
        Term::Symbol(name) => env.fetch(name).map_err(Error::UnknownSymbol),
        Term::List(elements) => match elements.split_first() {
            // The empty list is a literal, like a number.
            None => Ok(term.clone()),
            Some((head, tail)) => apply_form(head, tail, env, depth),
        },
        _ => Ok(term.clone()),
    }
}

fn apply_form(head: &Term, tail: &[Term], env: &Rc<Environment>, depth: usize) -> Result {
    if let Term::Symbol(name) = head {
        match name.as_str() {
            "define" => return special_forms::apply_define(tail, env, depth),
            "lambda" => return special_forms::apply_lambda(tail, env),
            "if" => return special_forms::apply_if(tail, env, depth),
            // Any other head is an ordinary application, handled below.
            _ => (),
        }
    }
    match evaluate_at_depth(head, env, depth + 1)? {
        Term::Primitive(func) => {
            let args = evaluate_sequence_elementwise(tail, env, depth)?;
            call_primitive(func, &args)
        }
        Term::Closure(closure) => {
            let args = evaluate_sequence_elementwise(tail, env, depth)?;
            apply_closure(&closure, &args, depth)
        }
        _ => Err(Error::NotAProcedure),
    }
}

pub(crate) fn evaluate_sequence_elementwise(
    seq: &[Term],
    env: &Rc<Environment>,
    depth: usize,
) -> Result<Vec<Term>> {
    seq.iter()
        .map(|term| evaluate_at_depth(term, env, depth + 1))
        .collect()
}

pub(crate) fn pretty_print_args(args: &[Term]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

pub(crate) fn call_primitive(func: &'static PrimitiveFn, args: &[Term]) -> Result {
    func.arity
        .validate_for(args.len(), func.name)
        .map_err(Error::BadArgCount)?;
    log::trace!("call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("call to {} failed: {}", func.name, e),
    }
    result
}

fn apply_closure(closure: &Closure, args: &[Term], depth: usize) -> Result {
    log::trace!("call {} with {}", closure, pretty_print_args(args));
    if args.len() != closure.parameters.len() {
        return Err(Error::ArityMismatch {
            expected: closure.parameters.len(),
            got: args.len(),
        });
    }
    // Lexical scoping: the call frame hangs off the environment captured
    // when the lambda was evaluated, not off the caller's frame.
    let env = Environment::spawn_from(&closure.parent);
    for (key, value) in closure.parameters.iter().zip(args) {
        env.set(key.clone(), value.clone());
    }
    evaluate_at_depth(&closure.body, &env, depth + 1)
}
