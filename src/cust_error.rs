//! This module contains all custom errors used in this library.

use std::fmt;
use std::error::Error;

#[derive(Debug)]
pub enum ImportError {
    IoError(std::io::Error),
    InputMalformedError,
    BadIntError(std::num::ParseIntError),
    BadFloatError(std::num::ParseFloatError),
    /// The described graph is not simple: a self loop, or an edge endpoint
    /// outside of the declared vertex range.
    InvalidGraphError(String),
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> ImportError {
        ImportError::IoError(e)
    }
}

impl From<std::num::ParseIntError> for ImportError {
    fn from(e: std::num::ParseIntError) -> ImportError {
        ImportError::BadIntError(e)
    }
}

impl From<std::num::ParseFloatError> for ImportError {
    fn from(e: std::num::ParseFloatError) -> ImportError {
        ImportError::BadFloatError(e)
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(_) => write!(f, "Import: IoError"),
            Self::InputMalformedError => write!(f, "Import: Input is malformed."),
            Self::BadIntError(_) => write!(f, "Import: Integer is malformed."),
            Self::BadFloatError(_) => write!(f, "Import: Float is malformed."),
            Self::InvalidGraphError(msg) => write!(f, "Import: Invalid graph: {}", msg),
        }
    }
}

impl Error for ImportError {}

#[derive(Debug)]
pub enum ProcessingError {
    InvalidParameter(String),
    GraphError(String),
    InvalidSolution(String),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Self::GraphError(msg) => write!(f, "Graph error: {}", msg),
            Self::InvalidSolution(msg) => write!(f, "InvalidSolution: {}", msg),
        }
    }
}

impl Error for ProcessingError {}

/// Failure of a relaxation oracle. The search recovers from these with a
/// combinatorial fallback bound, they never abort a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleError {
    NumericalFailure,
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumericalFailure => write!(f, "Oracle: relaxation did not converge."),
        }
    }
}

impl Error for OracleError {}
