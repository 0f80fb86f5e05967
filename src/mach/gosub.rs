use super::{Address, Stack, Val};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## GoSub return stack
///
/// `GoSub` records the statement after the call site plus a snapshot
/// of the caller's locals; `Return` pops in LIFO order. An empty pop
/// is the VB6 "Return without GoSub" error.

#[derive(Debug)]
struct Frame {
    label: Rc<str>,
    return_address: Address,
    locals: HashMap<Rc<str>, Val>,
}

#[derive(Debug)]
pub struct Gosub {
    frames: Stack<Frame>,
}

impl Default for Gosub {
    fn default() -> Gosub {
        Gosub::new()
    }
}

impl Gosub {
    pub fn new() -> Gosub {
        Gosub {
            frames: Stack::new("GOSUB NESTING TOO DEEP"),
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Execution resumes at `position + 1` when the subroutine
    /// returns.
    pub fn gosub(
        &mut self,
        label: &str,
        position: Address,
        locals: &HashMap<Rc<str>, Val>,
    ) -> Result<()> {
        self.frames.push(Frame {
            label: Rc::from(label),
            return_address: position + 1,
            locals: locals.clone(),
        })
    }

    pub fn r#return(&mut self) -> Result<Address> {
        match self.frames.pop() {
            Some(frame) => Ok(frame.return_address),
            None => Err(error!(ReturnWithoutGosub)),
        }
    }

    /// Locals snapshot of the innermost pending call.
    pub fn locals(&self) -> Option<&HashMap<Rc<str>, Val>> {
        self.frames.last().map(|frame| &frame.locals)
    }

    pub fn label(&self) -> Option<&str> {
        self.frames.last().map(|frame| frame.label.as_ref())
    }
}
