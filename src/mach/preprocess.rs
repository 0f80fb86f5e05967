use super::{Constants, Evaluator, Stack};
use crate::error;
use crate::lang;
use crate::lang::ast::Directive;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Conditional-compilation preprocessor
///
/// Feeds source through the `#If/#ElseIf/#Else/#End If` state machine
/// one line at a time. A frame is pushed per `#If` and records whether
/// any branch has fired yet and whether the enclosing region was
/// active. At most one branch of a chain ever emits, and a branch is
/// only active when every enclosing branch is.
///
/// Directive lines are never emitted. `#Const` definitions apply only
/// inside active regions.

#[derive(Debug)]
struct Frame {
    line: usize,
    branch_taken: bool,
    parent_active: bool,
    self_active: bool,
    else_seen: bool,
}

#[derive(Debug)]
pub struct Preprocessor {
    constants: Constants,
    frames: Stack<Frame>,
    line_number: usize,
}

impl Default for Preprocessor {
    fn default() -> Preprocessor {
        Preprocessor::new()
    }
}

impl Preprocessor {
    pub fn new() -> Preprocessor {
        Preprocessor::with_constants(Constants::new())
    }

    pub fn with_constants(constants: Constants) -> Preprocessor {
        Preprocessor {
            constants,
            frames: Stack::new("CONDITIONAL NESTING TOO DEEP"),
            line_number: 0,
        }
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn constants_mut(&mut self) -> &mut Constants {
        &mut self.constants
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn active(&self) -> bool {
        self.frames.last().map_or(true, |frame| frame.self_active)
    }

    /// Consumes one source line. `Ok(true)` means the line is part of
    /// the program and should be emitted.
    pub fn line(&mut self, source: &str) -> Result<bool> {
        self.line_number += 1;
        let line_number = Some(self.line_number);
        let directive = match lang::directive(source) {
            Ok(directive) => directive,
            Err(error) => return Err(error.in_line_number(line_number)),
        };
        match directive {
            None => return Ok(self.active()),
            Some(Directive::If(_, cond)) => {
                let taken = Evaluator::new(&self.constants).condition(&cond);
                let parent_active = self.active();
                self.frames.push(Frame {
                    line: self.line_number,
                    branch_taken: taken,
                    parent_active,
                    self_active: parent_active && taken,
                    else_seen: false,
                })?;
            }
            Some(Directive::ElseIf(col, cond)) => {
                // Branch conditions are evaluated even when skipped.
                let taken = Evaluator::new(&self.constants).condition(&cond);
                match self.frames.last_mut() {
                    None => return Err(error!(ElseIfWithoutIf, line_number, ..&col)),
                    Some(frame) => {
                        if frame.else_seen {
                            return Err(error!(ElseIfWithoutIf, line_number, ..&col));
                        }
                        frame.self_active = frame.parent_active && !frame.branch_taken && taken;
                        if taken {
                            frame.branch_taken = true;
                        }
                    }
                }
            }
            Some(Directive::Else(col)) => match self.frames.last_mut() {
                None => return Err(error!(ElseWithoutIf, line_number, ..&col)),
                Some(frame) => {
                    if frame.else_seen {
                        return Err(error!(ElseWithoutIf, line_number, ..&col));
                    }
                    frame.else_seen = true;
                    frame.self_active = frame.parent_active && !frame.branch_taken;
                    frame.branch_taken = true;
                }
            },
            Some(Directive::EndIf(col)) => {
                if self.frames.pop().is_none() {
                    return Err(error!(EndIfWithoutIf, line_number, ..&col));
                }
            }
            Some(Directive::Const(_, name, cond)) => {
                if self.active() {
                    if let Some(val) = Evaluator::new(&self.constants).value(&cond) {
                        self.constants.define(&name, val);
                    }
                }
            }
        }
        Ok(false)
    }

    /// Reports the unterminated `#If` once the source is exhausted.
    pub fn finish(&mut self) -> Result<()> {
        match self.frames.last() {
            Some(frame) => Err(error!(IfWithoutEndIf, Some(frame.line))),
            None => Ok(()),
        }
    }

    /// Runs a complete source through the state machine and returns
    /// the emitted program text.
    pub fn process(&mut self, source: &str) -> Result<String> {
        let mut out = String::new();
        for line in source.lines() {
            if self.line(line)? {
                out.push_str(line);
                out.push('\n');
            }
        }
        self.finish()?;
        Ok(out)
    }
}
