//! # Settlement
//!
//! Pays escrowed funds out once a project's deadline has passed: to the
//! creator if the goal was met, otherwise back to each contributor.
//!
//! Both paths commit their guard (the `claimed` flag, the zeroed record) to
//! storage before the outgoing transfer, so a recipient that calls back in
//! sees the settled state and is rejected.

use soroban_sdk::{token, Address, Env};

use crate::storage;
use crate::Error;

/// Release a funded project's escrow to its creator. Returns the amount paid.
pub fn claim_funds(env: &Env, project_id: u64, caller: &Address) -> Result<i128, Error> {
    let settings = storage::load_settings(env)?;
    let config = storage::load_project_config(env, project_id)?;
    let mut state = storage::load_project_state(env, project_id)?;

    if *caller != config.creator {
        return Err(Error::Unauthorized);
    }
    if env.ledger().timestamp() < config.deadline {
        return Err(Error::TooEarly);
    }
    if !state.funded {
        return Err(Error::NotFunded);
    }
    if state.claimed {
        return Err(Error::AlreadyClaimed);
    }

    state.claimed = true;
    storage::save_project_state(env, project_id, &state);

    token::Client::new(env, &settings.token).transfer(
        &env.current_contract_address(),
        &config.creator,
        &state.total_funds,
    );
    Ok(state.total_funds)
}

/// Return `caller`'s contribution to an unfunded, expired project.
/// Returns the amount paid.
pub fn claim_refund(env: &Env, project_id: u64, caller: &Address) -> Result<i128, Error> {
    let settings = storage::load_settings(env)?;
    let config = storage::load_project_config(env, project_id)?;
    let mut state = storage::load_project_state(env, project_id)?;

    if env.ledger().timestamp() < config.deadline {
        return Err(Error::TooEarly);
    }
    if state.funded {
        return Err(Error::Funded);
    }

    let amount = storage::load_contribution(env, project_id, caller).unwrap_or(0);
    if amount == 0 {
        return Err(Error::NothingToRefund);
    }

    state.total_funds = state
        .total_funds
        .checked_sub(amount)
        .ok_or(Error::Overflow)?;
    state.total_refunded = state
        .total_refunded
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    storage::save_contribution(env, project_id, caller, 0);
    storage::save_project_state(env, project_id, &state);

    token::Client::new(env, &settings.token).transfer(
        &env.current_contract_address(),
        caller,
        &amount,
    );
    Ok(amount)
}
