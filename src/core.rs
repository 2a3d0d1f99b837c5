use crate::evaluator;
use crate::types::{Arity, PrimitiveFn, Term};
use std::collections::HashMap;

// Every builtin receives its arguments already evaluated. The declared
// arity is checked centrally by call_primitive; type checks are done here.

fn grab_numbers(args: &[Term]) -> evaluator::Result<Vec<f64>> {
    let type_check: Result<Vec<_>, _> = args.iter().map(|t| t.as_number()).collect();
    type_check.map_err(evaluator::Error::TypeMismatch)
}

const SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    fn_ptr: sum_,
    arity: Arity::at_least(0),
};

fn sum_(args: &[Term]) -> evaluator::Result {
    let value = grab_numbers(args)?.iter().sum();
    Ok(Term::Number(value))
}

const SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: sub_,
    arity: Arity::at_least(1),
};

fn sub_(args: &[Term]) -> evaluator::Result {
    let numbers = grab_numbers(args)?;
    let (first, rest) = numbers.split_first().unwrap();
    let value = match rest.is_empty() {
        // One argument negates it.
        true => -first,
        false => rest.iter().fold(*first, |acc, x| acc - x),
    };
    Ok(Term::Number(value))
}

const MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    fn_ptr: mul_,
    arity: Arity::at_least(0),
};

fn mul_(args: &[Term]) -> evaluator::Result {
    let value = grab_numbers(args)?.iter().product();
    Ok(Term::Number(value))
}

const DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: div_,
    arity: Arity::at_least(1),
};

fn div_(args: &[Term]) -> evaluator::Result {
    let numbers = grab_numbers(args)?;
    let (first, rest) = numbers.split_first().unwrap();
    let (mut value, divisors) = match rest.is_empty() {
        // One argument takes its reciprocal.
        true => (1.0, std::slice::from_ref(first)),
        false => (*first, rest),
    };
    for &divisor in divisors {
        if divisor == 0.0 {
            return Err(evaluator::Error::DivideByZero);
        }
        value /= divisor;
    }
    Ok(Term::Number(value))
}

// The language has no boolean type; comparisons yield 1 or 0, which is what
// `if` treats as true and false.
fn comparison_(args: &[Term], comp: fn(&f64, &f64) -> bool) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [x, y] => Ok(Term::Number(if comp(x, y) { 1.0 } else { 0.0 })),
        _ => unreachable!("arity checked by call_primitive"),
    }
}

macro_rules! comparison_primitive {
    ($SYMBOL:tt, $NAME:ident) => {
        paste::item! {
            const $NAME: PrimitiveFn = PrimitiveFn {
                name: stringify!($SYMBOL),
                fn_ptr: |args: &[Term]| comparison_(args, f64::[<$NAME:lower>]),
                arity: Arity::exactly(2),
            };
        }
    };
}

comparison_primitive!(<, LT);
comparison_primitive!(<=, LE);
comparison_primitive!(>, GT);
comparison_primitive!(>=, GE);

const EQUAL: PrimitiveFn = PrimitiveFn {
    name: "=",
    fn_ptr: |args: &[Term]| comparison_(args, |x, y| x == y),
    arity: Arity::exactly(2),
};

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;
lazy_static! {
    pub static ref CORE: Namespace = {
        let mut map = Namespace::new();
        for func in &[
            // Arithmetic
            &SUM, &SUB, &MUL, &DIV,
            // Comparisons
            &LT, &LE, &GT, &GE, &EQUAL,
        ] {
            map.insert(func.name, *func);
        }
        map
    };
}
