//! # Contribution ledger
//!
//! Accepts deposits into a project's escrow, keeps the per-contributor records
//! and the running total in step, latches the `funded` flag when the goal is
//! crossed, and mints reward credits through a [`RewardIssuer`].
//!
//! Bookkeeping and credit issuance happen before the incoming transfer. Any
//! failure (an overflow, an underfunded contributor) rolls the whole
//! invocation back, so the record, the total, the credits and the escrowed
//! tokens always move together.

use soroban_sdk::{log, token, Address, Env};

use crate::reward::RewardIssuer;
use crate::storage;
use crate::types::ContributionReceipt;
use crate::Error;

/// Outcome of an accepted contribution.
pub struct Accepted {
    pub receipt: ContributionReceipt,
    /// `true` only for the contribution that crossed the goal.
    pub reached_goal: bool,
}

/// Record a contribution of `amount` base units from `contributor`.
///
/// A zero amount is a no-op: nothing is transferred, recorded or minted.
pub fn contribute<R: RewardIssuer>(
    env: &Env,
    project_id: u64,
    contributor: &Address,
    amount: i128,
) -> Result<Accepted, Error> {
    let settings = storage::load_settings(env)?;
    let config = storage::load_project_config(env, project_id)?;
    let mut state = storage::load_project_state(env, project_id)?;

    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    if env.ledger().timestamp() >= config.deadline {
        return Err(Error::DeadlinePassed);
    }
    if amount == 0 {
        return Ok(Accepted {
            receipt: ContributionReceipt {
                total_funds: state.total_funds,
                funded: state.funded,
                credits: 0,
            },
            reached_goal: false,
        });
    }

    let previous = storage::load_contribution(env, project_id, contributor);
    let record = previous
        .unwrap_or(0)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    state.total_funds = state
        .total_funds
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    if previous.is_none() {
        state.contributor_count = state
            .contributor_count
            .checked_add(1)
            .ok_or(Error::Overflow)?;
    }

    let reached_goal = !state.funded && state.total_funds >= config.funding_goal;
    if reached_goal {
        state.funded = true;
        log!(env, "project {} reached its goal", project_id);
    }

    storage::save_contribution(env, project_id, contributor, record);
    storage::save_project_state(env, project_id, &state);
    let credits = R::issue(env, project_id, contributor, amount)?;

    token::Client::new(env, &settings.token).transfer(
        contributor,
        &env.current_contract_address(),
        &amount,
    );

    Ok(Accepted {
        receipt: ContributionReceipt {
            total_funds: state.total_funds,
            funded: state.funded,
            credits,
        },
        reached_goal,
    })
}

/// Amount recorded for `contributor`; zero if they never contributed.
pub fn contribution_of(env: &Env, project_id: u64, contributor: &Address) -> Result<i128, Error> {
    storage::load_project_config(env, project_id)?;
    Ok(storage::load_contribution(env, project_id, contributor).unwrap_or(0))
}
