/*!
# Machine Module

The conditional-compilation state machine and the control-flow stacks
that emulate VB6 runtime behavior: `#Const` storage, directive
evaluation, line filtering, `On Error` handling, `GoSub/Return`, and
`With` block contexts.

*/

mod constant;
mod eval;
mod fault;
mod gosub;
mod handler;
mod object;
mod operation;
mod preprocess;
mod runtime;
mod stack;
mod val;
mod with;

pub use constant::Constants;
pub use eval::Evaluator;
pub use fault::{ErrRecord, Fault, FaultKind};
pub use gosub::Gosub;
pub use handler::{Handler, Mode, Recovery};
pub use object::{BasicObject, Object, ObjectRef};
pub use operation::Operation;
pub use preprocess::Preprocessor;
pub use runtime::Runtime;
pub use stack::Stack;
pub use val::Val;
pub use with::WithStack;

/// Statement position within a program listing.
pub type Address = usize;
