use super::{Fault, FaultKind, Val};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type ObjectRef = Rc<RefCell<dyn Object>>;

/// Member access over an object held by a `With` block. Failures are
/// trappable faults, never panics.
pub trait Object: std::fmt::Debug {
    fn get(&self, member: &str) -> Result<Val, Fault>;
    fn set(&mut self, member: &str, val: Val) -> Result<(), Fault>;
    fn invoke(&mut self, member: &str, args: &[Val]) -> Result<Val, Fault>;
}

/// A late-bound bag of members, enough to stand in for any VB6
/// object the `With` stack needs to target.
#[derive(Debug, Default)]
pub struct BasicObject {
    members: HashMap<String, Val>,
}

impl BasicObject {
    pub fn new() -> BasicObject {
        BasicObject::default()
    }

    pub fn with_member(mut self, name: &str, val: Val) -> BasicObject {
        self.members.insert(name.to_ascii_uppercase(), val);
        self
    }

    pub fn into_ref(self) -> ObjectRef {
        Rc::new(RefCell::new(self))
    }
}

impl Object for BasicObject {
    fn get(&self, member: &str) -> Result<Val, Fault> {
        match self.members.get(&member.to_ascii_uppercase()) {
            Some(val) => Ok(val.clone()),
            None => Err(Fault::custom(
                438,
                "Object doesn't support this property or method",
            )),
        }
    }

    fn set(&mut self, member: &str, val: Val) -> Result<(), Fault> {
        self.members.insert(member.to_ascii_uppercase(), val);
        Ok(())
    }

    fn invoke(&mut self, member: &str, args: &[Val]) -> Result<Val, Fault> {
        if !args.is_empty() {
            return Err(Fault::new(FaultKind::InvalidArgument).with_source(member));
        }
        self.get(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_case_insensitive() {
        let mut obj = BasicObject::new().with_member("Name", Val::String(Rc::from("Form1")));
        assert_eq!(obj.get("NAME").unwrap(), Val::String(Rc::from("Form1")));
        obj.set("name", Val::String(Rc::from("Form2"))).unwrap();
        assert_eq!(obj.get("Name").unwrap(), Val::String(Rc::from("Form2")));
    }

    #[test]
    fn test_missing_member_is_438() {
        let obj = BasicObject::new();
        assert_eq!(obj.get("Nope").unwrap_err().number(), 438);
    }
}
