//! Canonical event types emitted by the crowdfund escrow contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/crowdfund_escrow/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the escrow contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new project was registered (`created` topic).
    ProjectCreated,
    /// A contributor deposited funds (`contrib` topic).
    ContributionMade,
    /// A project's total reached its goal (`funded` topic).
    GoalReached,
    /// The creator withdrew a funded project's escrow (`claimed` topic).
    FundsClaimed,
    /// A contributor was refunded from an unfunded project (`refunded` topic).
    RefundIssued,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::ProjectCreated,
            "contrib" => Self::ContributionMade,
            "funded" => Self::GoalReached,
            "claimed" => Self::FundsClaimed,
            "refunded" => Self::RefundIssued,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectCreated => "project_created",
            Self::ContributionMade => "contribution_made",
            Self::GoalReached => "goal_reached",
            Self::FundsClaimed => "funds_claimed",
            Self::RefundIssued => "refund_issued",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded escrow event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowEvent {
    pub event_type: String,
    pub project_id: Option<String>,
    /// Creator for `created`/`claimed`, contributor for `contrib`/`refunded`.
    pub actor: Option<String>,
    /// Goal for `created`, running total for `funded`, otherwise the amount moved.
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub project_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
