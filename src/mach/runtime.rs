use super::{ErrRecord, Fault, Gosub, Handler, Recovery, WithStack};

/// ## Per call-chain runtime context
///
/// Owns the control-flow stacks and the `Err` record for one chain of
/// execution. Nothing here is global; hosts create one `Runtime` per
/// chain and drop it when the chain ends.

#[derive(Debug, Default)]
pub struct Runtime {
    handler: Handler,
    gosub: Gosub,
    with: WithStack,
    err: ErrRecord,
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::default()
    }

    pub fn handler(&mut self) -> &mut Handler {
        &mut self.handler
    }

    pub fn gosub(&mut self) -> &mut Gosub {
        &mut self.gosub
    }

    pub fn with_stack(&mut self) -> &mut WithStack {
        &mut self.with
    }

    pub fn err(&self) -> &ErrRecord {
        &self.err
    }

    /// Records the fault in `Err` and asks the handler stack what to
    /// do. `None` means the fault surfaces to the host unhandled.
    pub fn handle_fault(&mut self, fault: Fault, line: Option<usize>) -> Option<Recovery> {
        self.err.record(&fault, line);
        self.handler.resolve()
    }

    /// `Resume` exits the active handler and clears `Err`.
    pub fn resume(&mut self) {
        self.handler.resume();
        self.err.clear();
    }
}
