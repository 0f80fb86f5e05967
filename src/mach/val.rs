use super::ObjectRef;
use std::rc::Rc;

/// A VB6 value as seen by directive evaluation and the runtime stacks.
#[derive(Clone)]
pub enum Val {
    Empty,
    Boolean(bool),
    Integer(i32),
    Double(f64),
    String(Rc<str>),
    Object(ObjectRef),
}

impl PartialEq for Val {
    fn eq(&self, other: &Val) -> bool {
        use Val::*;
        match (self, other) {
            (Empty, Empty) => true,
            (Boolean(l), Boolean(r)) => l == r,
            (Integer(l), Integer(r)) => l == r,
            (Double(l), Double(r)) => l == r,
            (String(l), String(r)) => l == r,
            (Object(l), Object(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Val::*;
        match self {
            Empty => write!(f, "Empty"),
            Boolean(b) => write!(f, "Boolean({:?})", b),
            Integer(n) => write!(f, "Integer({:?})", n),
            Double(d) => write!(f, "Double({:?})", d),
            String(s) => write!(f, "String({:?})", s),
            Object(_) => write!(f, "Object"),
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Val::*;
        match self {
            Empty => Ok(()),
            Boolean(true) => write!(f, "True"),
            Boolean(false) => write!(f, "False"),
            Integer(n) => write!(f, "{}", n),
            Double(d) => write!(f, "{}", d),
            String(s) => write!(f, "{}", s),
            Object(_) => write!(f, "[Object]"),
        }
    }
}
