//! # VB6 conditional compilation
//!
//! A preprocessor for Visual Basic 6 `#If/#ElseIf/#Else/#End If`
//! blocks and `#Const` definitions, plus the control-flow stacks that
//! emulate `On Error`, `GoSub/Return`, and `With` at run time.
//!
//! Directive conditions are parsed and evaluated by this crate; no
//! dynamic evaluation of source text ever happens. A condition that
//! cannot be evaluated is logged and treated as `False`.

pub mod lang;
pub mod mach;
pub mod term;
