//! Errors surfaced by the PCST core.

use std::fmt;

/// Error type shared by graph validation, shortest paths, STP and the heuristic.
///
/// Every failure aborts the computation; nothing is retried or masked.
#[derive(Clone, Debug, PartialEq)]
pub enum PcstError {
    /// Edge weight is negative or not finite (breaks Dijkstra's precondition).
    InvalidWeight { from: String, to: String, weight: f64 },
    /// Node prize is negative or not finite.
    InvalidPrize { node: String, prize: f64 },
    /// Two terminals have no connecting path.
    DisconnectedTerminals { from: String, to: String },
    /// A label does not name a node of the graph.
    UnknownNode { label: String },
    /// Caller-supplied parameters are out of range.
    InvalidParams { reason: String },
}

impl PcstError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PcstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWeight { from, to, weight } => write!(
                f,
                "invalid weight {weight} on edge ({from}, {to}): weights must be finite and >= 0"
            ),
            Self::InvalidPrize { node, prize } => write!(
                f,
                "invalid prize {prize} on node {node}: prizes must be finite and >= 0"
            ),
            Self::DisconnectedTerminals { from, to } => {
                write!(f, "disconnected terminals: no path from {from} to {to}")
            }
            Self::UnknownNode { label } => write!(f, "unknown node {label}"),
            Self::InvalidParams { reason } => write!(f, "invalid params: {reason}"),
        }
    }
}

impl std::error::Error for PcstError {}
