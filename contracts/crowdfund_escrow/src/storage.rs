//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the escrow:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type       | Description                         |
//! |------------------|------------|-------------------------------------|
//! | `ProjectCount`   | `u64`      | Auto-increment project ID counter   |
//! | `Settings`       | `Settings` | Funding token and its unit size     |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                         | Type            | Description                       |
//! |-----------------------------|-----------------|-----------------------------------|
//! | `ProjConfig(id)`            | `ProjectConfig` | Immutable project configuration   |
//! | `ProjState(id)`             | `ProjectState`  | Mutable project state             |
//! | `Contribution(id, addr)`    | `i128`          | Cumulative contribution record    |
//! | `RewardMeta(id)`            | `RewardInfo`    | Reward ledger metadata and supply |
//! | `RewardBalance(id, addr)`   | `i128`          | Reward credits held by `addr`     |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//! Nothing is ever removed: a refunded contribution is kept as an explicit zero
//! so the record stays auditable.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Project, ProjectConfig, ProjectState, RewardInfo, Settings};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Global auto-increment counter for project IDs (Instance).
    ProjectCount,
    /// Funding token settings (Instance).
    Settings,
    /// Immutable project configuration keyed by ID (Persistent).
    ProjConfig(u64),
    /// Mutable project state keyed by ID (Persistent).
    ProjState(u64),
    /// Cumulative amount contributed by an address to a project (Persistent).
    Contribution(u64, Address),
    /// Reward ledger metadata for a project (Persistent).
    RewardMeta(u64),
    /// Reward credits held by an address for a project (Persistent).
    RewardBalance(u64, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Reads, increments, and stores the project counter.
/// Returns the ID to use for the *current* project (pre-increment value).
pub fn next_project_id(env: &Env) -> Result<u64, Error> {
    bump_instance(env);
    let current = project_count(env);
    let next = current.checked_add(1).ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::ProjectCount, &next);
    Ok(current)
}

/// Number of projects created so far.
pub fn project_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0)
}

pub fn has_settings(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Settings)
}

pub fn save_settings(env: &Env, settings: &Settings) {
    env.storage().instance().set(&DataKey::Settings, settings);
    bump_instance(env);
}

/// Fails with `NotInitialized` until `init` has run.
pub fn load_settings(env: &Env) -> Result<Settings, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Settings)
        .ok_or(Error::NotInitialized)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn read_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn write_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

/// Save both the immutable config and the initial state of a new project.
pub fn save_project(env: &Env, config: &ProjectConfig, state: &ProjectState) {
    write_persistent(env, &DataKey::ProjConfig(config.id), config);
    write_persistent(env, &DataKey::ProjState(config.id), state);
}

/// Load the full `Project` view by combining config and state.
pub fn load_project(env: &Env, id: u64) -> Result<Project, Error> {
    let config = load_project_config(env, id)?;
    let state = load_project_state(env, id)?;
    Ok(Project::from_parts(config, state, env.ledger().timestamp()))
}

/// Load only the immutable project configuration.
pub fn load_project_config(env: &Env, id: u64) -> Result<ProjectConfig, Error> {
    read_persistent(env, &DataKey::ProjConfig(id)).ok_or(Error::NotFound)
}

/// Load only the mutable project state.
pub fn load_project_state(env: &Env, id: u64) -> Result<ProjectState, Error> {
    read_persistent(env, &DataKey::ProjState(id)).ok_or(Error::NotFound)
}

/// Save only the mutable project state.
pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    write_persistent(env, &DataKey::ProjState(id), state);
}

/// `None` when `contributor` has never contributed to the project.
pub fn load_contribution(env: &Env, id: u64, contributor: &Address) -> Option<i128> {
    read_persistent(env, &DataKey::Contribution(id, contributor.clone()))
}

pub fn save_contribution(env: &Env, id: u64, contributor: &Address, amount: i128) {
    write_persistent(env, &DataKey::Contribution(id, contributor.clone()), &amount);
}

pub fn load_reward_meta(env: &Env, id: u64) -> Option<RewardInfo> {
    read_persistent(env, &DataKey::RewardMeta(id))
}

pub fn save_reward_meta(env: &Env, id: u64, meta: &RewardInfo) {
    write_persistent(env, &DataKey::RewardMeta(id), meta);
}

pub fn load_reward_balance(env: &Env, id: u64, holder: &Address) -> i128 {
    read_persistent(env, &DataKey::RewardBalance(id, holder.clone())).unwrap_or(0)
}

pub fn save_reward_balance(env: &Env, id: u64, holder: &Address, balance: i128) {
    write_persistent(env, &DataKey::RewardBalance(id, holder.clone()), &balance);
}
