//! Qubit and classical bit types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Unique identifier for a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// Position of a bit inside a named register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterSlot {
    /// Register name.
    pub register: String,
    /// Index within the register.
    pub index: u32,
}

impl fmt::Display for RegisterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.index)
    }
}

/// A quantum bit, optionally owned by a register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// The unique identifier.
    pub id: QubitId,
    /// Owning register slot; `None` for a loose qubit.
    pub slot: Option<RegisterSlot>,
}

impl Qubit {
    /// Create a loose qubit.
    pub fn new(id: QubitId) -> Self {
        Self { id, slot: None }
    }

    /// Create a qubit at `register[index]`.
    pub fn with_register(id: QubitId, register: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            slot: Some(RegisterSlot {
                register: register.into(),
                index,
            }),
        }
    }

    /// Name of the owning register, if any.
    pub fn register(&self) -> Option<&str> {
        self.slot.as_ref().map(|s| s.register.as_str())
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(slot) => write!(f, "{slot}"),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A classical bit, optionally owned by a register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clbit {
    /// The unique identifier.
    pub id: ClbitId,
    /// Owning register slot; `None` for a loose bit.
    pub slot: Option<RegisterSlot>,
}

impl Clbit {
    /// Create a loose classical bit.
    pub fn new(id: ClbitId) -> Self {
        Self { id, slot: None }
    }

    /// Create a classical bit at `register[index]`.
    pub fn with_register(id: ClbitId, register: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            slot: Some(RegisterSlot {
                register: register.into(),
                index,
            }),
        }
    }

    /// Name of the owning register, if any.
    pub fn register(&self) -> Option<&str> {
        self.slot.as_ref().map(|s| s.register.as_str())
    }
}

impl fmt::Display for Clbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(slot) => write!(f, "{slot}"),
            None => write!(f, "{}", self.id),
        }
    }
}
