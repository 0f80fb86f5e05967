use super::Stack;
use crate::error;
use crate::lang::Error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## On Error handler stack
///
/// One frame per procedure scope. `On Error GoTo label` arms the
/// current scope, `On Error Resume Next` suppresses in place, and
/// `On Error GoTo 0` disarms. Faults search scopes innermost-first;
/// a scope already handling a fault is passed over, so a fault raised
/// inside a handler escalates to the caller.

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    None,
    Goto(Rc<str>),
    ResumeNext,
}

#[derive(Debug)]
struct Frame {
    mode: Mode,
    handling: bool,
}

impl Frame {
    fn new() -> Frame {
        Frame {
            mode: Mode::None,
            handling: false,
        }
    }
}

/// What the caller should do with a trapped fault.
#[derive(Debug, Clone, PartialEq)]
pub enum Recovery {
    ResumeNext,
    Goto(Rc<str>),
}

#[derive(Debug)]
pub struct Handler {
    root: Frame,
    scopes: Stack<Frame>,
}

impl Default for Handler {
    fn default() -> Handler {
        Handler::new()
    }
}

impl Handler {
    pub fn new() -> Handler {
        Handler {
            root: Frame::new(),
            scopes: Stack::new("PROCEDURE NESTING TOO DEEP"),
        }
    }

    /// Procedure scopes above the root.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn enter_scope(&mut self) -> Result<()> {
        self.scopes.push(Frame::new())
    }

    /// Leaving a procedure drops its handler arming entirely.
    pub fn exit_scope(&mut self) -> Result<()> {
        match self.scopes.pop() {
            Some(_) => Ok(()),
            None => Err(error!(InternalError; "EXIT WITHOUT MATCHING ENTER")),
        }
    }

    fn current(&mut self) -> &mut Frame {
        match self.scopes.last_mut() {
            Some(frame) => frame,
            None => &mut self.root,
        }
    }

    pub fn on_error_goto(&mut self, label: &str) {
        let frame = self.current();
        frame.mode = Mode::Goto(Rc::from(label));
        frame.handling = false;
    }

    pub fn on_error_resume_next(&mut self) {
        let frame = self.current();
        frame.mode = Mode::ResumeNext;
        frame.handling = false;
    }

    pub fn on_error_goto_zero(&mut self) {
        let frame = self.current();
        frame.mode = Mode::None;
        frame.handling = false;
    }

    /// Finds the nearest armed scope. `None` means the fault is
    /// unhandled and surfaces to the host.
    pub fn resolve(&mut self) -> Option<Recovery> {
        for i in (0..self.scopes.len()).rev() {
            if let Some(frame) = self.scopes.get_mut(i) {
                if let Some(recovery) = Handler::recover(frame) {
                    return Some(recovery);
                }
            }
        }
        Handler::recover(&mut self.root)
    }

    fn recover(frame: &mut Frame) -> Option<Recovery> {
        if frame.handling {
            return None;
        }
        match &frame.mode {
            Mode::None => None,
            Mode::ResumeNext => Some(Recovery::ResumeNext),
            Mode::Goto(label) => {
                let label = label.clone();
                frame.handling = true;
                Some(Recovery::Goto(label))
            }
        }
    }

    /// `Resume` re-arms the innermost scope that is mid-handling.
    pub fn resume(&mut self) {
        for i in (0..self.scopes.len()).rev() {
            if let Some(frame) = self.scopes.get_mut(i) {
                if frame.handling {
                    frame.handling = false;
                    return;
                }
            }
        }
        self.root.handling = false;
    }
}
