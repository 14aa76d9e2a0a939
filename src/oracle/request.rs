//! Request and reply payloads for the "choose move" operation.

use crate::turn::AgentId;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Resource hints forwarded to the oracle.
///
/// Advisory only: nothing here is enforced locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Soft time budget for the search, in milliseconds (0 = no limit).
    pub max_time_ms: u64,
    /// Search depth cap (at least 1).
    pub max_depth: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_time_ms: 2000,
            max_depth: 5,
        }
    }
}

/// One "choose move" query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct MoveRequest {
    /// Encoded board, rows top to bottom joined by `;`.
    board: String,
    /// Agent that should pick the move.
    agent: AgentId,
    /// Active seat number (1 or 2).
    seat: u8,
    /// Hints for the oracle.
    limits: SearchLimits,
}

/// The oracle's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct OracleMove {
    /// Column as sent by the oracle; may be out of range.
    column: i64,
    /// Diagnostic details reported by the oracle (timeouts, fallbacks,
    /// elapsed time). Logged, never interpreted.
    info: Option<serde_json::Value>,
}
