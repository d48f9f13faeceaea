//! Identifiers for objects a pose can be locked to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of an external reference object.
/// The core never holds a live handle; the value is resolved on demand.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ReferenceId(pub i64);

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ReferenceId {
    #[inline]
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identifier of the object a shot is stored under.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
