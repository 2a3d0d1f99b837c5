use crate::core;
use crate::types::{Symbol, Term};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
pub struct UnknownSymbol(pub String);

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' not found", self.0)
    }
}

/// One scope frame: bindings plus a link to the enclosing frame. Frames are
/// shared by `Rc` so a closure keeps its defining chain alive after the call
/// that created it has returned.
#[derive(Debug)]
pub struct Environment {
    data: RefCell<HashMap<Symbol, Term>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    pub fn empty() -> Rc<Self> {
        Rc::new(Self {
            data: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// The top-level frame, preloaded with the core namespace.
    pub fn global() -> Rc<Self> {
        let env = Self::empty();
        for (&name, &func) in core::CORE.iter() {
            env.set(Symbol(name.into()), Term::Primitive(func));
        }
        env
    }

    pub fn spawn_from(outer: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            data: RefCell::new(HashMap::new()),
            parent: Some(outer.clone()),
        })
    }

    /// Insert or overwrite in this frame only, never in an outer one.
    pub fn set(&self, key: Symbol, value: Term) {
        self.data.borrow_mut().insert(key, value);
    }

    pub fn get(&self, key: &Symbol) -> Option<Term> {
        match self.data.borrow().get(key) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|outer| outer.get(key)),
        }
    }

    pub fn fetch(&self, key: &Symbol) -> Result<Term, UnknownSymbol> {
        self.get(key).ok_or_else(|| UnknownSymbol(key.0.clone()))
    }
}
