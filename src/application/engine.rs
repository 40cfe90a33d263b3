use super::factory::PoolFactory;
use crate::domain::command::{Command, CommandKind};
use crate::domain::funds::{Amount, Balance};
use crate::domain::pool::{PartyId, PoolId, PoolSummary};
use crate::domain::ports::{PayoutLedger, PayoutLedgerBox, PoolStoreBox};
use crate::domain::request::SpendRequest;
use crate::error::{PoolError, Result};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// What a successfully executed command produced.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    PoolCreated(PoolId),
    RequestCreated(u32),
    Applied,
}

/// The main entry point for running pool commands.
///
/// `PoolEngine` plays the part of the execution runtime the pools assume:
/// it applies each command as one indivisible step against the addressed
/// pool, executes the value-transfer instructions the pool emits against the
/// payout ledger, and persists state only after the whole command succeeded.
/// A failed command therefore never leaves a partial effect behind.
pub struct PoolEngine {
    factory: PoolFactory,
    ledger: PayoutLedgerBox,
}

impl PoolEngine {
    pub fn new(pools: PoolStoreBox, ledger: PayoutLedgerBox) -> Self {
        Self {
            factory: PoolFactory::new(pools),
            ledger,
        }
    }

    /// Executes one command and reports what it produced.
    pub async fn execute(&self, cmd: Command) -> Result<Outcome> {
        match cmd.op {
            CommandKind::CreatePool => {
                let minimum = required_amount(cmd.amount, "create_pool")?;
                let id = self.factory.create_pool(cmd.caller, minimum).await?;
                Ok(Outcome::PoolCreated(id))
            }
            CommandKind::Contribute => {
                let id = required(cmd.pool, "contribute", "a pool id")?;
                let amount = required_amount(cmd.amount, "contribute")?;

                let mut pool = self.factory.load(id).await?;
                pool.contribute(cmd.caller.clone(), amount)?;
                self.factory.save(id, pool).await?;

                debug!(pool = id, caller = %cmd.caller, amount = %amount, "contribution accepted");
                Ok(Outcome::Applied)
            }
            CommandKind::CreateRequest => {
                let id = required(cmd.pool, "create_request", "a pool id")?;
                let value = required_amount(cmd.amount, "create_request")?;
                let recipient = required(cmd.recipient, "create_request", "a recipient")?;
                let description = cmd.description.unwrap_or_default();

                let mut pool = self.factory.load(id).await?;
                let index = pool.create_request(&cmd.caller, description, value, recipient)?;
                self.factory.save(id, pool).await?;

                debug!(pool = id, request = index, value = %value, "spend request created");
                Ok(Outcome::RequestCreated(index))
            }
            CommandKind::ApproveRequest => {
                let id = required(cmd.pool, "approve_request", "a pool id")?;
                let index = required(cmd.request, "approve_request", "a request index")?;

                let mut pool = self.factory.load(id).await?;
                pool.approve_request(&cmd.caller, index)?;
                self.factory.save(id, pool).await?;

                debug!(pool = id, request = index, caller = %cmd.caller, "approval recorded");
                Ok(Outcome::Applied)
            }
            CommandKind::FinalizeRequest => {
                let id = required(cmd.pool, "finalize_request", "a pool id")?;
                let index = required(cmd.request, "finalize_request", "a request index")?;

                let mut pool = self.factory.load(id).await?;
                let transfer = pool.finalize_request(&cmd.caller, index)?;
                self.ledger
                    .credit(transfer.recipient.clone(), transfer.amount)
                    .await?;
                self.factory.save(id, pool).await?;

                info!(
                    pool = id,
                    request = index,
                    recipient = %transfer.recipient,
                    amount = %transfer.amount,
                    "request finalized, funds released"
                );
                Ok(Outcome::Applied)
            }
        }
    }

    /// The registry of deployed pool ids, in creation order.
    pub async fn deployed_pools(&self) -> Result<Vec<PoolId>> {
        self.factory.deployed_pools().await
    }

    /// Read-only pool summary: manager, minimum, balance, approver and
    /// request counts.
    pub async fn pool_summary(&self, id: PoolId) -> Result<PoolSummary> {
        Ok(self.factory.load(id).await?.summary(id))
    }

    /// Read-only view of one spend request.
    pub async fn request(&self, id: PoolId, index: u32) -> Result<SpendRequest> {
        Ok(self.factory.load(id).await?.request(index)?.clone())
    }

    /// Funds released to `party` across all pools so far.
    pub async fn recipient_balance(&self, party: &PartyId) -> Result<Balance> {
        self.ledger.balance(party).await
    }

    /// Consumes the engine and returns the final summary of every pool.
    pub async fn into_results(self) -> Result<Vec<PoolSummary>> {
        let pools = self.factory.all().await?;
        Ok(pools
            .into_iter()
            .map(|(id, pool)| pool.summary(id))
            .collect())
    }
}

fn required<T>(field: Option<T>, op: &str, what: &str) -> Result<T> {
    field.ok_or_else(|| PoolError::Validation(format!("{op} requires {what}")))
}

fn required_amount(amount: Option<Decimal>, op: &str) -> Result<Amount> {
    Amount::new(required(amount, op, "an amount")?)
}
