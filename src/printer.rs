use crate::interpreter;
use crate::types::Term;

/// Render a term for the user. Lists and procedures are deliberately opaque
/// at this layer.
pub fn pr_str(term: &Term) -> String {
    match term {
        Term::Number(value) => value.to_string(),
        Term::Symbol(name) => name.0.clone(),
        Term::List(_) => String::from("#<list>"),
        Term::Primitive(func) => format!("#<builtin {}>", func.name),
        Term::Closure(_) => String::from("#<procedure>"),
    }
}

pub fn print(result: &interpreter::Result) -> String {
    match result {
        Ok(term) => pr_str(term),
        Err(e) => paint_error(format!("Error: {}", e)),
    }
}

fn paint_error(text: String) -> String {
    if atty::is(atty::Stream::Stdout) {
        ansi_term::Colour::Red.paint(text).to_string()
    } else {
        text
    }
}
