use std::fmt;

use quick_error::quick_error;

/// The two operating phases of a sorting machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    /// entries are being collected, in no particular order
    Inserting,
    /// entries are heap-ordered and handed out smallest first
    Extracting,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Inserting => f.write_str("insertion"),
            Mode::Extracting => f.write_str("extraction"),
        }
    }
}

quick_error! {
    /// Contract violations reported by the sorting machine.
    /// A failed operation leaves the machine exactly as it was.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MachineError {
        InvalidState(expected: Mode, actual: Mode) {
            display("operation requires {} mode, but the machine is in {} mode", expected, actual)
        }
        EmptyCollection {
            display("cannot remove an entry from an empty sorting machine")
        }
    }
}

pub type Result<T, E = MachineError> = std::result::Result<T, E>;
