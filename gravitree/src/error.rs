use std::{collections::TryReserveError, fmt};

use crate::{body::BodyID, tree::NodeID};

/// Errors that abort a single simulation step.
///
/// Bodies outside the simulated region, pairs closer than the softening distance and empty
/// subtrees are part of normal operation and never produce an [`Error`].
#[derive(Debug)]
pub enum Error {
    /// The node arena of the quadtree could not grow.
    Allocation(TryReserveError),
    /// The quadtree needs more nodes than a [`NodeID`] can address.
    TooManyNodes,
    /// A configuration value is out of its valid range.
    InvalidConfig(&'static str),
    /// The body at this index has a mass that is not finite and strictly positive.
    InvalidBody(BodyID),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation(e) => write!(f, "failed to allocate quadtree nodes: {e}"),
            Self::TooManyNodes => write!(f, "quadtree exceeds {} nodes", NodeID::MAX),
            Self::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
            Self::InvalidBody(id) => write!(f, "body {id} does not have a positive finite mass"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Allocation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TryReserveError> for Error {
    #[inline]
    fn from(e: TryReserveError) -> Self {
        Self::Allocation(e)
    }
}

/// Shorthand for results of fallible `gravitree` operations.
pub type Result<T> = std::result::Result<T, Error>;
