/// ## Recoverable runtime faults
///
/// A `Fault` is a VB6 trappable error carried as a value, never a
/// panic. The error handler decides whether a fault is resumed,
/// redirected, or surfaced. `ErrRecord` mirrors the VB6 `Err` object
/// for the current call chain.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaultKind {
    TypeMismatch,
    Overflow,
    DivisionByZero,
    ObjectNotSet,
    InvalidArgument,
    Other,
}

impl FaultKind {
    pub fn number(&self) -> u16 {
        match self {
            FaultKind::InvalidArgument => 5,
            FaultKind::Overflow => 6,
            FaultKind::DivisionByZero => 11,
            FaultKind::TypeMismatch => 13,
            FaultKind::Other => 17,
            FaultKind::ObjectNotSet => 91,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FaultKind::InvalidArgument => "Invalid procedure call or argument",
            FaultKind::Overflow => "Overflow",
            FaultKind::DivisionByZero => "Division by zero",
            FaultKind::TypeMismatch => "Type mismatch",
            FaultKind::Other => "Can't perform requested operation",
            FaultKind::ObjectNotSet => "Object variable or With block variable not set",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    number: u16,
    description: String,
    source: String,
}

impl Fault {
    pub fn new(kind: FaultKind) -> Fault {
        Fault {
            number: kind.number(),
            description: kind.description().to_string(),
            source: String::new(),
        }
    }

    pub fn custom(number: u16, description: &str) -> Fault {
        Fault {
            number,
            description: description.to_string(),
            source: String::new(),
        }
    }

    pub fn with_source(mut self, source: &str) -> Fault {
        self.source = source.to_string();
        self
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> FaultKind {
        match self.number {
            5 => FaultKind::InvalidArgument,
            6 => FaultKind::Overflow,
            11 => FaultKind::DivisionByZero,
            13 => FaultKind::TypeMismatch,
            91 => FaultKind::ObjectNotSet,
            _ => FaultKind::Other,
        }
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.source.is_empty() {
            write!(f, "Run-time error {}: {}", self.number, self.description)
        } else {
            write!(
                f,
                "Run-time error {} in {}: {}",
                self.number, self.source, self.description
            )
        }
    }
}

/// The `Err` object. Cleared by `On Error GoTo 0`, `Resume`, and
/// successful handler exit.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ErrRecord {
    number: u16,
    description: String,
    source: String,
    line: Option<usize>,
}

impl ErrRecord {
    pub fn new() -> ErrRecord {
        ErrRecord::default()
    }

    pub fn record(&mut self, fault: &Fault, line: Option<usize>) {
        self.number = fault.number();
        self.description = fault.description().to_string();
        self.source = fault.source().to_string();
        self.line = line;
    }

    pub fn clear(&mut self) {
        *self = ErrRecord::default();
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }
}
