use std::error;
use std::fmt;

/// Errors that can occur while building charge-transport networks or while computing
/// the transport metrics on them.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// The shapes of the coupling matrix, the fragment list and the degeneracy map
    /// do not agree with each other.
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    /// A fragment was assigned less than one orbital.
    InvalidDegeneracy { fragment: usize, value: usize },
    /// The degeneracy was given per residue, but the residue of a fragment is unknown.
    UnknownResidue {
        fragment: usize,
        residue: Option<String>,
    },
    /// The coupling matrix contains NaN or an infinite value.
    NonFiniteCoupling { row: usize, col: usize, value: f64 },
    /// The coupling threshold is negative or NaN.
    InvalidThreshold(f64),
    /// A matrix was requested for a network with less than two fragments.
    EmptyGraph { nodes: usize },
    /// The Laplacian has more than one null mode, so the network is not connected.
    DisconnectedGraph { null_modes: usize },
    /// The pseudoinverse of the Laplacian is close to the tolerance. Only returned
    /// as an error if strict mode is requested, otherwise it is logged.
    NumericalInstability { smallest: f64, largest: f64 },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::DimensionMismatch {
                context,
                expected,
                found,
            } => write!(
                f,
                "dimension mismatch in {}: expected {}, found {}",
                context, expected, found
            ),
            NetworkError::InvalidDegeneracy { fragment, value } => write!(
                f,
                "fragment {} has an invalid degeneracy of {} (must be at least 1)",
                fragment, value
            ),
            NetworkError::UnknownResidue { fragment, residue } => match residue {
                Some(name) => write!(
                    f,
                    "no degeneracy given for residue {} of fragment {}",
                    name, fragment
                ),
                None => write!(f, "fragment {} has no residue name", fragment),
            },
            NetworkError::NonFiniteCoupling { row, col, value } => write!(
                f,
                "coupling matrix element ({}, {}) is not finite: {}",
                row, col, value
            ),
            NetworkError::InvalidThreshold(t) => {
                write!(f, "the coupling threshold must be >= 0, got {}", t)
            }
            NetworkError::EmptyGraph { nodes } => write!(
                f,
                "network with {} node(s) is too small, at least 2 are required",
                nodes
            ),
            NetworkError::DisconnectedGraph { null_modes } => write!(
                f,
                "network is not connected, the Laplacian has {} null modes",
                null_modes
            ),
            NetworkError::NumericalInstability { smallest, largest } => write!(
                f,
                "pseudoinverse of the Laplacian is ill-conditioned: smallest retained \
                 eigenvalue {:e}, largest eigenvalue {:e}",
                smallest, largest
            ),
        }
    }
}

impl error::Error for NetworkError {}
