//! # VB6 preprocessor
//!
//! Command line entry point. All the work happens in the library.

fn main() {
    vb6::term::main();
}
