//! # Reward credits
//!
//! Every project owns exactly one reward-credit ledger, opened when the project
//! is created. Contributors are credited at a fixed rate of
//! [`CREDITS_PER_UNIT`] credits per whole unit of the funding token; partial
//! units are truncated toward zero.
//!
//! The rest of the contract only talks to the ledger through the
//! [`RewardIssuer`] capability. [`ProjectRewardLedger`] is the one
//! implementation, backed by this contract's persistent storage.

use soroban_sdk::{Address, Env, String};

use crate::storage;
use crate::types::RewardInfo;
use crate::Error;

/// Credits minted per whole unit contributed.
pub const CREDITS_PER_UNIT: i128 = 1_000;

/// Reward credits are whole numbers.
const CREDIT_DECIMALS: u32 = 0;

/// Capability to open and credit per-project reward ledgers.
pub trait RewardIssuer {
    /// Create the ledger for `project_id` and return its identifier.
    fn open(env: &Env, project_id: u64, name: String, symbol: String) -> u64;

    /// Credit `holder` for a contribution of `contributed` base units.
    /// Returns the number of credits minted.
    fn issue(env: &Env, project_id: u64, holder: &Address, contributed: i128)
        -> Result<i128, Error>;

    fn balance_of(env: &Env, project_id: u64, holder: &Address) -> Result<i128, Error>;

    fn info(env: &Env, project_id: u64) -> Result<RewardInfo, Error>;
}

/// Reward ledger stored alongside the project it belongs to.
pub struct ProjectRewardLedger;

impl RewardIssuer for ProjectRewardLedger {
    fn open(env: &Env, project_id: u64, name: String, symbol: String) -> u64 {
        let meta = RewardInfo {
            ledger_id: project_id,
            name,
            symbol,
            decimals: CREDIT_DECIMALS,
            total_supply: 0,
        };
        storage::save_reward_meta(env, project_id, &meta);
        meta.ledger_id
    }

    fn issue(
        env: &Env,
        project_id: u64,
        holder: &Address,
        contributed: i128,
    ) -> Result<i128, Error> {
        let settings = storage::load_settings(env)?;
        let mut meta = storage::load_reward_meta(env, project_id).ok_or(Error::NotFound)?;

        let credits = credits_for(contributed, settings.unit)?;
        if credits == 0 {
            return Ok(0);
        }

        let balance = storage::load_reward_balance(env, project_id, holder)
            .checked_add(credits)
            .ok_or(Error::Overflow)?;
        meta.total_supply = meta
            .total_supply
            .checked_add(credits)
            .ok_or(Error::Overflow)?;

        storage::save_reward_balance(env, project_id, holder, balance);
        storage::save_reward_meta(env, project_id, &meta);
        Ok(credits)
    }

    fn balance_of(env: &Env, project_id: u64, holder: &Address) -> Result<i128, Error> {
        if storage::load_reward_meta(env, project_id).is_none() {
            return Err(Error::NotFound);
        }
        Ok(storage::load_reward_balance(env, project_id, holder))
    }

    fn info(env: &Env, project_id: u64) -> Result<RewardInfo, Error> {
        storage::load_reward_meta(env, project_id).ok_or(Error::NotFound)
    }
}

/// Credits owed for `contributed` base units when one whole unit is `unit`
/// base units. Truncates toward zero.
pub fn credits_for(contributed: i128, unit: i128) -> Result<i128, Error> {
    let scaled = contributed
        .checked_mul(CREDITS_PER_UNIT)
        .ok_or(Error::Overflow)?;
    Ok(scaled / unit)
}
