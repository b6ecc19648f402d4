use std::{error::Error, fmt};

/// The error returned when a value cannot be read back from a bit stream,
/// either because the stream is exhausted or because the bytes do not
/// describe a value of the expected type.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SerdeErr;

impl fmt::Display for SerdeErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Bin deserialize error")
    }
}

impl Error for SerdeErr {}
