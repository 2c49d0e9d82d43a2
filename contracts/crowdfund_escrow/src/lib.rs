//! # Crowdfund Escrow Contract
//!
//! This is the root crate of the crowdfunding escrow. It exposes the single
//! Soroban contract `CrowdfundEscrow` whose entry points cover the full
//! campaign lifecycle:
//!
//! | Phase        | Entry Point(s)                                          |
//! |--------------|---------------------------------------------------------|
//! | Bootstrap    | [`CrowdfundEscrow::init`]                               |
//! | Registration | [`CrowdfundEscrow::create_project`]                     |
//! | Funding      | [`CrowdfundEscrow::contribute`]                         |
//! | Settlement   | [`CrowdfundEscrow::claim_funds`], [`CrowdfundEscrow::claim_refund`] |
//! | Queries      | `get_project`, `get_contribution`, `balance_of`, `reward_info`, `project_count`, `funding_token`, `admin` |
//!
//! ## Architecture
//!
//! Contribution accounting lives in [`ledger`], payouts in [`settlement`],
//! reward credits behind the [`reward::RewardIssuer`] capability, and storage
//! access in [`storage`]. This file contains **only** the public entry points,
//! authorization and event emissions.
//!
//! Every entry point runs as one Soroban invocation: returning an [`Error`]
//! rolls back every write it made.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env, String};

mod events;
mod ledger;
pub mod reward;
mod settlement;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_settlement;

use reward::{ProjectRewardLedger, RewardIssuer};
pub use events::{ContributionMade, FundsClaimed, GoalReached, ProjectCreated, RefundIssued};
pub use types::{ContributionReceipt, Project, ProjectStatus, RewardInfo};

use types::{ProjectConfig, ProjectState, Settings};

/// Seconds in one day of campaign duration.
const SECONDS_PER_DAY: u64 = 86_400;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InvalidGoal        = 1,
    NotFound           = 2,
    Overflow           = 3,
    Unauthorized       = 4,
    TooEarly           = 5,
    NotFunded          = 6,
    Funded             = 7,
    AlreadyClaimed     = 8,
    NothingToRefund    = 9,
    InvalidAmount      = 10,
    InvalidDuration    = 11,
    DeadlinePassed     = 12,
    AlreadyInitialized = 13,
    NotInitialized     = 14,
}

#[contract]
pub struct CrowdfundEscrow;

#[contractimpl]
impl CrowdfundEscrow {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Set the token contributions are made in.
    ///
    /// Must be called exactly once after deployment, authorized by `admin`;
    /// a second call fails with `Error::AlreadyInitialized`. The token's
    /// `decimals` fixes the size of one whole unit for reward-credit issuance.
    pub fn init(env: Env, admin: Address, token: Address) -> Result<(), Error> {
        admin.require_auth();
        if storage::has_settings(&env) {
            return Err(Error::AlreadyInitialized);
        }
        let decimals = token::Client::new(&env, &token).decimals();
        let unit = 10i128.checked_pow(decimals).ok_or(Error::Overflow)?;
        storage::save_settings(&env, &Settings { admin, token, unit });
        Ok(())
    }

    /// The address that initialised the contract.
    pub fn admin(env: Env) -> Result<Address, Error> {
        Ok(storage::load_settings(&env)?.admin)
    }

    /// The token contributions are made and paid out in.
    pub fn funding_token(env: Env) -> Result<Address, Error> {
        Ok(storage::load_settings(&env)?.token)
    }

    /// Number of projects created so far; ids run from 0 to `count - 1`.
    pub fn project_count(env: Env) -> u64 {
        storage::project_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────

    /// Register a new funding campaign and open its reward-credit ledger.
    ///
    /// - `funding_goal` must be positive (`Error::InvalidGoal`).
    /// - `duration_days` must be positive (`Error::InvalidDuration`).
    /// - The deadline is the current ledger time plus `duration_days` days.
    ///
    /// Returns the new project's id, which is also published in the
    /// `created` event.
    #[allow(clippy::too_many_arguments)]
    pub fn create_project(
        env: Env,
        creator: Address,
        title: String,
        description: String,
        funding_goal: i128,
        duration_days: u64,
        reward_name: String,
        reward_symbol: String,
    ) -> Result<u64, Error> {
        creator.require_auth();
        storage::load_settings(&env)?;

        if funding_goal <= 0 {
            return Err(Error::InvalidGoal);
        }
        if duration_days == 0 {
            return Err(Error::InvalidDuration);
        }
        let deadline = duration_days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|secs| env.ledger().timestamp().checked_add(secs))
            .ok_or(Error::Overflow)?;

        let id = storage::next_project_id(&env)?;
        let reward_ledger = ProjectRewardLedger::open(&env, id, reward_name, reward_symbol);

        let config = ProjectConfig {
            id,
            creator: creator.clone(),
            title,
            description,
            funding_goal,
            deadline,
            reward_ledger,
        };
        storage::save_project(&env, &config, &ProjectState::empty());

        events::emit_project_created(
            &env,
            ProjectCreated {
                project_id: id,
                creator,
                funding_goal,
                deadline,
                reward_ledger,
            },
        );
        Ok(id)
    }

    /// Retrieve a snapshot of a project by its ID.
    pub fn get_project(env: Env, id: u64) -> Result<Project, Error> {
        storage::load_project(&env, id)
    }

    /// Cumulative amount `contributor` has put into the project.
    /// Zero if they never contributed or have been refunded.
    pub fn get_contribution(env: Env, id: u64, contributor: Address) -> Result<i128, Error> {
        ledger::contribution_of(&env, id, &contributor)
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Deposit `amount` of the funding token into the project's escrow.
    ///
    /// Mints `1000` reward credits per whole unit to `contributor` and marks
    /// the project funded once the total reaches the goal. A zero amount is
    /// accepted and changes nothing. Deposits close at the deadline.
    pub fn contribute(
        env: Env,
        id: u64,
        contributor: Address,
        amount: i128,
    ) -> Result<ContributionReceipt, Error> {
        contributor.require_auth();
        let accepted = ledger::contribute::<ProjectRewardLedger>(&env, id, &contributor, amount)?;
        if amount == 0 {
            return Ok(accepted.receipt);
        }

        events::emit_contribution_made(
            &env,
            ContributionMade {
                project_id: id,
                contributor,
                amount,
                credits: accepted.receipt.credits,
                total_funds: accepted.receipt.total_funds,
            },
        );
        if accepted.reached_goal {
            events::emit_goal_reached(
                &env,
                GoalReached {
                    project_id: id,
                    total_funds: accepted.receipt.total_funds,
                },
            );
        }
        Ok(accepted.receipt)
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Withdraw the whole escrow of a funded project to its creator.
    ///
    /// Only the creator may call, only after the deadline, and only once.
    pub fn claim_funds(env: Env, id: u64, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let amount = settlement::claim_funds(&env, id, &caller)?;
        events::emit_funds_claimed(
            &env,
            FundsClaimed {
                project_id: id,
                creator: caller,
                amount,
            },
        );
        Ok(amount)
    }

    /// Reclaim the caller's own contribution to a project that missed its goal.
    ///
    /// Available after the deadline, once per contributor.
    pub fn claim_refund(env: Env, id: u64, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let amount = settlement::claim_refund(&env, id, &caller)?;
        events::emit_refund_issued(
            &env,
            RefundIssued {
                project_id: id,
                contributor: caller,
                amount,
            },
        );
        Ok(amount)
    }

    // ─────────────────────────────────────────────────────────
    // Reward credits
    // ─────────────────────────────────────────────────────────

    /// Reward credits `holder` has earned in the project.
    pub fn balance_of(env: Env, id: u64, holder: Address) -> Result<i128, Error> {
        ProjectRewardLedger::balance_of(&env, id, &holder)
    }

    /// Name, symbol, decimals and total supply of the project's reward credits.
    pub fn reward_info(env: Env, id: u64) -> Result<RewardInfo, Error> {
        ProjectRewardLedger::info(&env, id)
    }
}
