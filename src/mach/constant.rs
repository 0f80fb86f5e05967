use super::Val;
use std::collections::HashMap;
use std::rc::Rc;

/// ## Compilation constant store
///
/// Holds the `#Const` values visible to directive expressions.
/// Names are case-insensitive; redefinition overwrites, which is how
/// VB6 scopes a `#Const` inside a conditional block.

#[derive(Debug)]
pub struct Constants {
    consts: HashMap<Rc<str>, Val>,
}

impl Default for Constants {
    fn default() -> Constants {
        Constants::new()
    }
}

impl Constants {
    pub fn new() -> Constants {
        let mut constants = Constants {
            consts: HashMap::new(),
        };
        constants.seed();
        constants
    }

    // The VB6 predefined platform constants.
    fn seed(&mut self) {
        self.define("Win32", Val::Boolean(true));
        self.define("Win16", Val::Boolean(false));
        self.define("Mac", Val::Boolean(false));
        self.define("Vba6", Val::Boolean(true));
    }

    pub fn define(&mut self, name: &str, value: Val) {
        self.consts
            .insert(Rc::from(name.to_ascii_uppercase().as_str()), value);
    }

    pub fn get(&self, name: &str) -> Option<Val> {
        self.consts.get(name.to_ascii_uppercase().as_str()).cloned()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.consts.contains_key(name.to_ascii_uppercase().as_str())
    }

    pub fn len(&self) -> usize {
        self.consts.len()
    }

    pub fn reset(&mut self) {
        self.consts.clear();
        self.seed();
    }
}
