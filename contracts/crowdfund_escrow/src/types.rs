//! # Types
//!
//! Shared data structures used across all modules of the escrow contract.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Project` is internally stored as two separate ledger entries:
//!
//! - [`ProjectConfig`]: written once at creation; never mutated.
//! - [`ProjectState`]: written on every contribution, claim and refund.
//!
//! The public API exposes the reconstructed [`Project`] struct, which also
//! carries the derived [`ProjectStatus`].
//!
//! ### Status as a derived state machine
//!
//! [`ProjectStatus`] is never stored. It is computed from the latched flags
//! and the ledger clock, so it cannot drift from them:
//!
//! ```text
//! Open ──► Funded ──► Settled   (creator claimed)
//!   └────► Expired ──► Settled  (every contribution refunded)
//! ```

use soroban_sdk::{contracttype, Address, String};

/// Lifecycle phase of a project.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectStatus {
    /// Before the deadline, goal not yet reached.
    Open,
    /// Goal reached; the creator may claim once the deadline passes.
    Funded,
    /// Deadline passed without reaching the goal; refunds are open.
    Expired,
    /// Nothing left in escrow for this project.
    Settled,
}

impl ProjectStatus {
    pub fn derive(config: &ProjectConfig, state: &ProjectState, now: u64) -> Self {
        if state.claimed {
            Self::Settled
        } else if state.funded {
            Self::Funded
        } else if now < config.deadline {
            Self::Open
        } else if state.total_funds == 0 {
            Self::Settled
        } else {
            Self::Expired
        }
    }
}

/// Contract-wide settings written once by `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Address that authorized `init`.
    pub admin: Address,
    /// Stellar Asset Contract of the currency contributions are made in.
    pub token: Address,
    /// Base units in one whole unit of `token` (`10^decimals`).
    pub unit: i128,
}

/// Immutable project configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub funding_goal: i128,
    pub deadline: u64,
    pub reward_ledger: u64,
}

/// Mutable project state, updated by contributions and settlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    pub total_funds: i128,
    pub total_refunded: i128,
    pub contributor_count: u32,
    pub funded: bool,
    pub claimed: bool,
}

impl ProjectState {
    /// State of a freshly created project.
    pub fn empty() -> Self {
        Self {
            total_funds: 0,
            total_refunded: 0,
            contributor_count: 0,
            funded: false,
            claimed: false,
        }
    }
}

/// Full read-only view of a funding project.
///
/// Reconstructed from the split `ProjectConfig` + `ProjectState` entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// Sequential identifier, starting at 0.
    pub id: u64,
    /// Address that created the project and may claim its funds.
    pub creator: Address,
    pub title: String,
    pub description: String,
    /// Target amount, in base units of the funding token.
    pub funding_goal: i128,
    /// Ledger timestamp after which the project can be settled.
    pub deadline: u64,
    /// Identifier of the project's reward-credit ledger.
    pub reward_ledger: u64,
    /// Sum of the live contribution records.
    pub total_funds: i128,
    /// Sum of all refunds paid back to contributors.
    pub total_refunded: i128,
    /// Number of distinct addresses that have contributed.
    pub contributor_count: u32,
    /// Latched the first time `total_funds >= funding_goal`.
    pub funded: bool,
    /// Set once the creator has withdrawn the funds.
    pub claimed: bool,
    pub status: ProjectStatus,
}

impl Project {
    pub fn from_parts(config: ProjectConfig, state: ProjectState, now: u64) -> Self {
        let status = ProjectStatus::derive(&config, &state, now);
        Project {
            id: config.id,
            creator: config.creator,
            title: config.title,
            description: config.description,
            funding_goal: config.funding_goal,
            deadline: config.deadline,
            reward_ledger: config.reward_ledger,
            total_funds: state.total_funds,
            total_refunded: state.total_refunded,
            contributor_count: state.contributor_count,
            funded: state.funded,
            claimed: state.claimed,
            status,
        }
    }
}

/// Result of a contribution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionReceipt {
    /// Project total after this contribution.
    pub total_funds: i128,
    /// Whether the project is funded after this contribution.
    pub funded: bool,
    /// Reward credits minted for this contribution.
    pub credits: i128,
}

/// Metadata and supply of a project's reward-credit ledger.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardInfo {
    pub ledger_id: u64,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    pub total_supply: i128,
}
