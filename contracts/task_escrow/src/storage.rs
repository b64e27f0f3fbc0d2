//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the escrow.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key         | Type              | Description                          |
//! |-------------|-------------------|--------------------------------------|
//! | `Config`    | `AgentConfig`     | Immutable agent metadata and pricing |
//! | `Owner`     | `Address`         | Current administrator                |
//! | `TaskCount` | `u64`             | Next free task index                 |
//! | `Policy`    | `UpdatePolicy`    | Who may call `update_task`           |
//! | `AuditSink` | `Address`         | Optional withdrawal log contract     |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key         | Type   | Description                        |
//! |-------------|--------|------------------------------------|
//! | `Task(idx)` | `Task` | One entry per accepted payment     |
//!
//! Task entries form a dense, append-only arena: `idx` is always the counter
//! value at payment time and entries are never removed.
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{AgentConfig, Task, UpdatePolicy};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Immutable agent configuration (Instance).
    Config,
    /// Current owner (Instance).
    Owner,
    /// Task counter (Instance).
    TaskCount,
    /// Update policy (Instance).
    Policy,
    /// Optional audit sink contract (Instance).
    AuditSink,
    /// Task record keyed by index (Persistent).
    Task(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn save_config(env: &Env, config: &AgentConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

/// Returns `None` if the agent config is missing.
pub fn load_config(env: &Env) -> Option<AgentConfig> {
    let config = env.storage().instance().get(&DataKey::Config);
    if config.is_some() {
        bump_instance(env);
    }
    config
}

pub fn save_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    bump_instance(env);
}

pub fn load_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Owner)
}

pub fn save_policy(env: &Env, policy: UpdatePolicy) {
    env.storage().instance().set(&DataKey::Policy, &policy);
    bump_instance(env);
}

/// Falls back to `OwnerOnly` when no policy has been written.
pub fn load_policy(env: &Env) -> UpdatePolicy {
    env.storage()
        .instance()
        .get(&DataKey::Policy)
        .unwrap_or(UpdatePolicy::OwnerOnly)
}

pub fn save_audit_sink(env: &Env, sink: &Option<Address>) {
    match sink {
        Some(addr) => env.storage().instance().set(&DataKey::AuditSink, addr),
        None => env.storage().instance().remove(&DataKey::AuditSink),
    }
    bump_instance(env);
}

pub fn load_audit_sink(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::AuditSink)
}

pub fn task_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TaskCount)
        .unwrap_or(0)
}

pub fn init_task_count(env: &Env) {
    env.storage().instance().set(&DataKey::TaskCount, &0u64);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Appends a task at the current counter value and advances the counter.
///
/// `build` receives the index the task will live at, so the stored `id`
/// always equals its key. Returns that index.
pub fn append_task<F>(env: &Env, build: F) -> u64
where
    F: FnOnce(u64) -> Task,
{
    bump_instance(env);
    let idx = task_count(env);
    let task = build(idx);
    debug_assert_eq!(task.id, idx);

    let key = DataKey::Task(idx);
    env.storage().persistent().set(&key, &task);
    bump_persistent(env, &key);

    env.storage()
        .instance()
        .set(&DataKey::TaskCount, &(idx + 1));
    idx
}

/// Load the task at `idx`, or `None` if no payment created it.
pub fn load_task(env: &Env, idx: u64) -> Option<Task> {
    if idx >= task_count(env) {
        return None;
    }
    let key = DataKey::Task(idx);
    let task: Option<Task> = env.storage().persistent().get(&key);
    if task.is_some() {
        bump_persistent(env, &key);
    }
    task
}

/// Overwrite an existing task in place.
pub fn save_task(env: &Env, task: &Task) {
    let key = DataKey::Task(task.id);
    env.storage().persistent().set(&key, task);
    bump_persistent(env, &key);
}
