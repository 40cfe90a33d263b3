use super::funds::{Amount, Balance};
use super::request::{SpendRequest, Transfer};
use crate::error::{PoolError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier of a deployed pool. Ids are dense and allocated in creation
/// order by the factory.
pub type PoolId = u64;

/// Opaque caller identity, as supplied by the authenticating runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

impl PartyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PartyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One pool's complete state: contribution ledger, spend requests and
/// approval bookkeeping.
///
/// All operations are pure transitions on this value. Each one performs
/// every precondition check before its first mutation, so a returned error
/// always leaves the pool unchanged. Funds leave the pool only as a
/// [`Transfer`] instruction returned from [`CampaignPool::finalize_request`];
/// executing it is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignPool {
    /// Fixed at creation; exclusively authorizes request creation and
    /// finalization.
    pub manager: PartyId,
    /// Contributions must strictly exceed this to count.
    pub minimum_contribution: Amount,
    /// Net funds held, credited by `contribute` and debited by
    /// `finalize_request`.
    pub balance: Balance,
    /// Everyone who has contributed above the minimum. Membership drives
    /// voting eligibility.
    pub approvers: HashSet<PartyId>,
    /// Append-only; the index is the stable request identifier.
    pub requests: Vec<SpendRequest>,
}

impl CampaignPool {
    pub fn new(manager: PartyId, minimum_contribution: Amount) -> Self {
        Self {
            manager,
            minimum_contribution,
            balance: Balance::ZERO,
            approvers: HashSet::new(),
            requests: Vec::new(),
        }
    }

    /// Credits `amount` to the pool and registers `caller` as an approver.
    ///
    /// The contribution must strictly exceed the pool minimum. Re-contributing
    /// is allowed and does not duplicate membership.
    pub fn contribute(&mut self, caller: PartyId, amount: Amount) -> Result<()> {
        if amount <= self.minimum_contribution {
            return Err(PoolError::BelowMinimum {
                amount: amount.value(),
                minimum: self.minimum_contribution.value(),
            });
        }

        self.balance += amount.into();
        self.approvers.insert(caller);
        Ok(())
    }

    /// Appends a new spend request and returns its index.
    ///
    /// Only the manager may create requests, the manager may not pay itself,
    /// and the requested value must be covered by the current balance so the
    /// manager cannot queue requests the pool could never fund.
    pub fn create_request(
        &mut self,
        caller: &PartyId,
        description: String,
        value: Amount,
        recipient: PartyId,
    ) -> Result<u32> {
        if *caller != self.manager {
            return Err(PoolError::Unauthorized);
        }
        if recipient == self.manager {
            return Err(PoolError::InvalidRecipient);
        }
        if Balance::from(value) > self.balance {
            return Err(PoolError::InsufficientBalance {
                value: value.value(),
                balance: self.balance.0,
            });
        }

        let index = self.requests.len() as u32;
        self.requests
            .push(SpendRequest::new(description, value, recipient));
        Ok(index)
    }

    /// Records `caller`'s approval on the request at `index`.
    ///
    /// Only registered approvers may vote, at most once per request, and a
    /// finalized request no longer accepts votes.
    pub fn approve_request(&mut self, caller: &PartyId, index: u32) -> Result<()> {
        let approver_ok = self.approvers.contains(caller);
        let request = self
            .requests
            .get_mut(index as usize)
            .ok_or(PoolError::InvalidIndex(index))?;

        if !approver_ok {
            return Err(PoolError::NotApprover);
        }
        if request.complete {
            return Err(PoolError::RequestComplete);
        }
        if request.approvals.contains(caller) {
            return Err(PoolError::AlreadyApproved);
        }

        request.approvals.insert(caller.clone());
        Ok(())
    }

    /// Releases the funds of an approved request.
    ///
    /// Requires the manager, an open request, a strict majority of current
    /// approvers and sufficient balance (re-checked here because earlier
    /// finalizations may have drained funds since the request was created).
    /// On success the request is complete, the balance is debited and the
    /// returned [`Transfer`] tells the runtime where the funds go. A second
    /// finalize of the same index always fails with `RequestComplete`.
    pub fn finalize_request(&mut self, caller: &PartyId, index: u32) -> Result<Transfer> {
        let manager_ok = *caller == self.manager;
        let approver_count = self.approvers.len();
        let balance = self.balance;

        let request = self
            .requests
            .get_mut(index as usize)
            .ok_or(PoolError::InvalidIndex(index))?;

        if !manager_ok {
            return Err(PoolError::Unauthorized);
        }
        if request.complete {
            return Err(PoolError::RequestComplete);
        }
        if !request.has_quorum(approver_count) {
            return Err(PoolError::QuorumNotMet {
                approvals: request.approvals.len(),
                approvers: approver_count,
            });
        }
        if Balance::from(request.value) > balance {
            return Err(PoolError::InsufficientBalance {
                value: request.value.value(),
                balance: balance.0,
            });
        }

        request.complete = true;
        let transfer = Transfer {
            recipient: request.recipient.clone(),
            amount: request.value,
        };
        self.balance -= transfer.amount.into();
        Ok(transfer)
    }

    /// Read-only request access, the counterpart of the summary view.
    pub fn request(&self, index: u32) -> Result<&SpendRequest> {
        self.requests
            .get(index as usize)
            .ok_or(PoolError::InvalidIndex(index))
    }

    pub fn summary(&self, pool: PoolId) -> PoolSummary {
        PoolSummary {
            pool,
            manager: self.manager.clone(),
            minimum: self.minimum_contribution,
            balance: self.balance,
            approvers: self.approvers.len(),
            requests: self.requests.len(),
        }
    }
}

/// Read model for a pool: everything a caller can learn without moving funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSummary {
    pub pool: PoolId,
    pub manager: PartyId,
    pub minimum: Amount,
    pub balance: Balance,
    pub approvers: usize,
    pub requests: usize,
}
