use super::funds::Amount;
use super::pool::PartyId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A proposed expenditure awaiting quorum approval.
///
/// Requests live inside their pool's append-only sequence; the index in that
/// sequence is the stable identifier callers use. `value` and `recipient` are
/// fixed at creation, `approvals` only grows, and `complete` flips to true
/// exactly once when the request is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendRequest {
    pub description: String,
    pub value: Amount,
    pub recipient: PartyId,
    pub approvals: HashSet<PartyId>,
    pub complete: bool,
}

impl SpendRequest {
    pub fn new(description: String, value: Amount, recipient: PartyId) -> Self {
        Self {
            description,
            value,
            recipient,
            approvals: HashSet::new(),
            complete: false,
        }
    }

    /// Strict majority of the pool's current approvers.
    pub fn has_quorum(&self, approver_count: usize) -> bool {
        2 * self.approvals.len() > approver_count
    }
}

/// Value-transfer instruction emitted by a successful finalization.
///
/// The pure state machine never moves funds itself; it returns this
/// instruction for the surrounding runtime to execute against its ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub recipient: PartyId,
    pub amount: Amount,
}
