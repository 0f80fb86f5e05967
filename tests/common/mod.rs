use vb6::mach::{Constants, Preprocessor};

pub fn process(source: &str) -> String {
    process_with(Constants::new(), source)
}

pub fn process_with(constants: Constants, source: &str) -> String {
    let mut preprocessor = Preprocessor::with_constants(constants);
    match preprocessor.process(source) {
        Ok(emitted) => emitted,
        Err(error) => format!("{}\n", error),
    }
}
