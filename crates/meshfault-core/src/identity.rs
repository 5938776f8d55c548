//! Node identity
//!
//! Nodes are named by opaque string labels ("A", "gateway-3", ...).
//! The set of nodes is fixed for the lifetime of one simulation run.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Label of a node in the mesh
#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id, rejecting empty labels and labels with whitespace
    pub fn new(label: impl Into<String>) -> Result<Self, IdentityError> {
        let label = label.into();
        if label.is_empty() {
            return Err(IdentityError::EmptyLabel);
        }
        if label.chars().any(char::is_whitespace) {
            return Err(IdentityError::InvalidLabel(label));
        }
        Ok(Self(label))
    }

    /// Generate single-letter ids from 'A' to the given letter (inclusive)
    pub fn range_to(end: char) -> Vec<Self> {
        ('A'..=end)
            .filter(char::is_ascii_uppercase)
            .map(|c| Self(c.to_string()))
            .collect()
    }

    /// Get the label
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for NodeId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl TryFrom<String> for NodeId {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NodeId {
    type Error = IdentityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
