//! # Events
//!
//! Every state change publishes one event with topics `(symbol, project_id)`
//! and a typed payload. Off-chain consumers (the indexer) rely on `created`
//! to learn the id of a new project.
//!
//! | Topic      | Payload              |
//! |------------|----------------------|
//! | `created`  | [`ProjectCreated`]   |
//! | `contrib`  | [`ContributionMade`] |
//! | `funded`   | [`GoalReached`]      |
//! | `claimed`  | [`FundsClaimed`]     |
//! | `refunded` | [`RefundIssued`]     |

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

pub const CREATED: Symbol = symbol_short!("created");
pub const CONTRIBUTED: Symbol = symbol_short!("contrib");
pub const FUNDED: Symbol = symbol_short!("funded");
pub const CLAIMED: Symbol = symbol_short!("claimed");
pub const REFUNDED: Symbol = symbol_short!("refunded");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u64,
    pub creator: Address,
    pub funding_goal: i128,
    pub deadline: u64,
    pub reward_ledger: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionMade {
    pub project_id: u64,
    pub contributor: Address,
    pub amount: i128,
    pub credits: i128,
    pub total_funds: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GoalReached {
    pub project_id: u64,
    pub total_funds: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsClaimed {
    pub project_id: u64,
    pub creator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundIssued {
    pub project_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

pub fn emit_project_created(env: &Env, event: ProjectCreated) {
    env.events().publish((CREATED, event.project_id), event);
}

pub fn emit_contribution_made(env: &Env, event: ContributionMade) {
    env.events().publish((CONTRIBUTED, event.project_id), event);
}

pub fn emit_goal_reached(env: &Env, event: GoalReached) {
    env.events().publish((FUNDED, event.project_id), event);
}

pub fn emit_funds_claimed(env: &Env, event: FundsClaimed) {
    env.events().publish((CLAIMED, event.project_id), event);
}

pub fn emit_refund_issued(env: &Env, event: RefundIssued) {
    env.events().publish((REFUNDED, event.project_id), event);
}
