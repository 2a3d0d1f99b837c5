use crate::environment::Environment;
use crate::evaluator::{evaluate_at_depth, Error, Result};
use crate::types::{truthy, Closure, Symbol, Term};
use std::rc::Rc;

#[derive(Debug)]
pub enum DefineError {
    WrongArgCount(usize),
    KeyNotASymbol,
}

/// (define name expr): evaluate expr, bind it in the current frame, return it.
/// Bind happens strictly after the value evaluates, so a failing expr leaves
/// the frame untouched.
pub fn apply_define(args: &[Term], env: &Rc<Environment>, depth: usize) -> Result {
    let (key, value) = match args {
        [key, value] => Ok((key, value)),
        _ => Err(Error::Define(DefineError::WrongArgCount(args.len()))),
    }?;
    let key = match key {
        Term::Symbol(s) => Ok(s),
        _ => Err(Error::Define(DefineError::KeyNotASymbol)),
    }?;
    let value = evaluate_at_depth(value, env, depth + 1)?;
    log::debug!("define {} as {}", key.0, value);
    env.set(key.clone(), value.clone());
    Ok(value)
}

#[derive(Debug)]
pub enum LambdaError {
    WrongArgCount(usize),
    ParametersNotAList,
    ParameterNotASymbol,
    DuplicateParameter(String),
}

/// (lambda (params...) body): capture the current environment by reference
/// and package it with the parameter names and the unevaluated body.
pub fn apply_lambda(args: &[Term], env: &Rc<Environment>) -> Result {
    let (parameters, body) = match args {
        [parameters, body] => Ok((parameters, body)),
        _ => Err(Error::Lambda(LambdaError::WrongArgCount(args.len()))),
    }?;
    let parameters = match parameters {
        Term::List(list) => Ok(&list[..]),
        _ => Err(Error::Lambda(LambdaError::ParametersNotAList)),
    }?;
    let extract_symbol = |term: &Term| match term {
        Term::Symbol(s) => Ok(s.clone()),
        _ => Err(LambdaError::ParameterNotASymbol),
    };
    let parameters: Vec<Symbol> = parameters
        .iter()
        .map(extract_symbol)
        .collect::<std::result::Result<_, _>>()
        .map_err(Error::Lambda)?;
    // A duplicate name could only ever bind the last argument; reject it
    // rather than silently shadow.
    for (index, name) in parameters.iter().enumerate() {
        if parameters[..index].contains(name) {
            return Err(Error::Lambda(LambdaError::DuplicateParameter(
                name.0.clone(),
            )));
        }
    }
    Ok(Term::Closure(Rc::new(Closure {
        parameters,
        body: body.clone(),
        parent: env.clone(),
    })))
}

#[derive(Debug)]
pub enum IfError {
    WrongArgCount(usize),
}

/// (if condition consequent alternative): only the taken branch evaluates.
pub fn apply_if(args: &[Term], env: &Rc<Environment>, depth: usize) -> Result {
    let (condition, consequent, alternative) = match args {
        [condition, consequent, alternative] => Ok((condition, consequent, alternative)),
        _ => Err(Error::If(IfError::WrongArgCount(args.len()))),
    }?;
    let condition = evaluate_at_depth(condition, env, depth + 1)?;
    match truthy(&condition) {
        true => evaluate_at_depth(consequent, env, depth + 1),
        false => evaluate_at_depth(alternative, env, depth + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;
    use crate::reader;

    fn eval_str(line: &str, env: &Rc<Environment>) -> Result {
        evaluate(&reader::read_str(line).unwrap(), env)
    }

    #[test]
    fn define_requires_a_symbol_key() {
        let env = Environment::global();
        match eval_str("(define 1 2)", &env) {
            Err(Error::Define(DefineError::KeyNotASymbol)) => (),
            other => panic!("expected KeyNotASymbol, got {:?}", other),
        }
    }

    #[test]
    fn define_requires_exactly_two_arguments() {
        let env = Environment::global();
        match eval_str("(define x)", &env) {
            Err(Error::Define(DefineError::WrongArgCount(1))) => (),
            other => panic!("expected WrongArgCount, got {:?}", other),
        }
        match eval_str("(define x 1 2)", &env) {
            Err(Error::Define(DefineError::WrongArgCount(3))) => (),
            other => panic!("expected WrongArgCount, got {:?}", other),
        }
    }

    #[test]
    fn failed_define_leaves_no_binding_behind() {
        let env = Environment::global();
        assert!(eval_str("(define x missing)", &env).is_err());
        assert!(eval_str("x", &env).is_err());
    }

    #[test]
    fn lambda_shape_is_validated() {
        let env = Environment::global();
        match eval_str("(lambda (x))", &env) {
            Err(Error::Lambda(LambdaError::WrongArgCount(1))) => (),
            other => panic!("expected WrongArgCount, got {:?}", other),
        }
        match eval_str("(lambda x x)", &env) {
            Err(Error::Lambda(LambdaError::ParametersNotAList)) => (),
            other => panic!("expected ParametersNotAList, got {:?}", other),
        }
        match eval_str("(lambda (x 1) x)", &env) {
            Err(Error::Lambda(LambdaError::ParameterNotASymbol)) => (),
            other => panic!("expected ParameterNotASymbol, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_parameter_names_are_rejected() {
        let env = Environment::global();
        match eval_str("(lambda (x y x) x)", &env) {
            Err(Error::Lambda(LambdaError::DuplicateParameter(name))) => assert_eq!(name, "x"),
            other => panic!("expected DuplicateParameter, got {:?}", other),
        }
    }

    #[test]
    fn lambda_with_no_parameters_is_fine() {
        let env = Environment::global();
        eval_str("(define five (lambda () 5))", &env).unwrap();
        assert_eq!(eval_str("(five)", &env).unwrap(), Term::Number(5.0));
    }

    #[test]
    fn lambda_body_is_not_evaluated_at_definition_time() {
        let env = Environment::global();
        // "missing" is unbound, but the lambda itself builds fine.
        match eval_str("(lambda (x) missing)", &env).unwrap() {
            Term::Closure(_) => (),
            other => panic!("expected a closure, got {:?}", other),
        }
    }

    #[test]
    fn if_requires_exactly_three_arguments() {
        let env = Environment::global();
        match eval_str("(if 1 2)", &env) {
            Err(Error::If(IfError::WrongArgCount(2))) => (),
            other => panic!("expected WrongArgCount, got {:?}", other),
        }
        match eval_str("(if 1 2 3 4)", &env) {
            Err(Error::If(IfError::WrongArgCount(4))) => (),
            other => panic!("expected WrongArgCount, got {:?}", other),
        }
    }
}
