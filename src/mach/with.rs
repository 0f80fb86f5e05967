use super::{Fault, FaultKind, ObjectRef, Stack, Val};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## With block context stack
///
/// Each `With` pushes a borrowed object reference; a leading-dot
/// member access resolves against the innermost one. Entering a
/// `With` on a non-object is the VB6 error 91, and so is a
/// leading-dot access outside any block.

#[derive(Debug)]
pub struct WithStack {
    contexts: Stack<ObjectRef>,
}

impl Default for WithStack {
    fn default() -> WithStack {
        WithStack::new()
    }
}

impl WithStack {
    pub fn new() -> WithStack {
        WithStack {
            contexts: Stack::new("WITH NESTING TOO DEEP"),
        }
    }

    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    pub fn enter(&mut self, target: Val) -> Result<()> {
        match target {
            Val::Object(obj) => self.contexts.push(obj),
            _ => Err(error!(ObjectVariableNotSet)),
        }
    }

    pub fn exit(&mut self) -> Result<()> {
        match self.contexts.pop() {
            Some(_) => Ok(()),
            None => Err(error!(EndWithWithoutWith)),
        }
    }

    pub fn current(&self) -> Result<ObjectRef> {
        match self.contexts.last() {
            Some(obj) => Ok(obj.clone()),
            None => Err(error!(ObjectVariableNotSet)),
        }
    }

    fn innermost(&self) -> std::result::Result<ObjectRef, Fault> {
        match self.contexts.last() {
            Some(obj) => Ok(obj.clone()),
            None => Err(Fault::new(FaultKind::ObjectNotSet)),
        }
    }

    pub fn get(&self, member: &str) -> std::result::Result<Val, Fault> {
        self.innermost()?.borrow().get(member)
    }

    pub fn set(&self, member: &str, val: Val) -> std::result::Result<(), Fault> {
        self.innermost()?.borrow_mut().set(member, val)
    }

    pub fn invoke(&self, member: &str, args: &[Val]) -> std::result::Result<Val, Fault> {
        self.innermost()?.borrow_mut().invoke(member, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::BasicObject;
    use std::rc::Rc;

    #[test]
    fn test_nested_contexts() {
        let outer = BasicObject::new()
            .with_member("Name", Val::String(Rc::from("Outer")))
            .into_ref();
        let inner = BasicObject::new()
            .with_member("Name", Val::String(Rc::from("Inner")))
            .into_ref();
        let mut w = WithStack::new();
        w.enter(Val::Object(outer)).unwrap();
        w.enter(Val::Object(inner)).unwrap();
        assert_eq!(w.get("Name").unwrap(), Val::String(Rc::from("Inner")));
        w.exit().unwrap();
        assert_eq!(w.get("Name").unwrap(), Val::String(Rc::from("Outer")));
    }

    #[test]
    fn test_with_on_nothing() {
        let mut w = WithStack::new();
        let error = w.enter(Val::Empty).unwrap_err();
        assert_eq!(error.code(), 91);
    }

    #[test]
    fn test_access_outside_block() {
        let w = WithStack::new();
        assert_eq!(w.get("Name").unwrap_err().number(), 91);
    }

    #[test]
    fn test_end_with_without_with() {
        let mut w = WithStack::new();
        assert_eq!(w.exit().unwrap_err().code(), 37);
    }
}
