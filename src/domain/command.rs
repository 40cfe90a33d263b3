use super::pool::{PartyId, PoolId};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    CreatePool,
    Contribute,
    CreateRequest,
    ApproveRequest,
    FinalizeRequest,
}

/// One operation against the engine, as it arrives from the outside world.
///
/// Every command carries the authenticated caller identity. The remaining
/// fields are optional at the wire level; the engine checks that each
/// operation got the fields it needs. For `create_pool` the `amount` column
/// carries the minimum contribution; for `contribute` and `create_request`
/// it carries the attached value.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Command {
    pub op: CommandKind,
    pub caller: PartyId,
    pub pool: Option<PoolId>,
    pub request: Option<u32>,
    pub amount: Option<Decimal>,
    pub recipient: Option<PartyId>,
    pub description: Option<String>,
}
