//! Strongly typed identifiers.
//!
//! Numeric ids are `Copy + Ord + Hash` wrappers generated by `typed_id!`.
//! Robots are identified by name, so `RobotName` wraps a `String` instead.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a road-network node (an intersection).
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed road-network edge.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Sequential identifier of a customer transport request.
    pub struct RequestId(u64);
}

/// Unique name of a robot, as reported by its localization stream.
///
/// Other components refer to robots by name only; the record itself is owned
/// by the fleet registry.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RobotName(String);

impl RobotName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RobotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RobotName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for RobotName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for RobotName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
