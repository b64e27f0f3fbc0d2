//! # Task Escrow Contract
//!
//! A pay-per-task escrow for a single AI agent listing. Callers pay a fixed
//! price in the configured token; every accepted payment opens a task record
//! that the agent's owner (or, under a public update policy, anyone) can
//! then update. Collected funds stay in the contract until the owner
//! withdraws them.
//!
//! | Phase        | Entry Point(s)                                         |
//! |--------------|--------------------------------------------------------|
//! | Bootstrap    | [`TaskEscrow::__constructor`] (runs at deployment)      |
//! | Payment      | [`TaskEscrow::pay`]                                    |
//! | Task admin   | [`TaskEscrow::update_task`]                            |
//! | Treasury     | [`TaskEscrow::withdraw`]                               |
//! | Owner admin  | `transfer_ownership`, `set_update_policy`, `set_audit_sink` |
//! | Queries      | `agent`, `task`, `task_count`, `owner`, `expected_payment`, `list_tasks` |
//!
//! ## Architecture
//!
//! Authorization is delegated to [`ownership`], storage to [`storage`], the
//! withdrawal notification to [`audit`] and event publishing to [`events`].
//! This file contains the entry points and their validation.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, String, Vec,
};

mod audit;
mod events;
mod ownership;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_update_policy;

pub use audit::{AuditLog, AuditLogClient};
pub use types::{AgentConfig, AgentInfo, PaymentTransfer, Task, UpdatePolicy, UNIT_FACTOR};

/// Upper bound on the page size accepted by `list_tasks`.
pub const MAX_PAGE_SIZE: u32 = 50;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    NotAuthorized  = 3,
    WrongReceiver  = 4,
    WrongAmount    = 5,
    TaskNotFound   = 6,
    InvalidAmount  = 7,
}

#[contract]
pub struct TaskEscrow;

fn require_config(env: &Env) -> AgentConfig {
    storage::load_config(env).unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

fn require_task(env: &Env, idx: u64) -> Task {
    storage::load_task(env, idx).unwrap_or_else(|| panic_with_error!(env, Error::TaskNotFound))
}

#[contractimpl]
impl TaskEscrow {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Set up the agent listing with `owner` as its administrator.
    ///
    /// Runs once, as part of deployment, so no other account can claim the
    /// contract between deploy and setup. `token` is the asset every payment
    /// and withdrawal moves.
    pub fn __constructor(
        env: Env,
        owner: Address,
        token: Address,
        name: String,
        details: String,
        fixed_pricing: u64,
        update_policy: UpdatePolicy,
    ) {
        let config = AgentConfig {
            name,
            details,
            fixed_pricing,
            created_at: env.ledger().timestamp(),
            token: token.clone(),
        };

        storage::save_config(&env, &config);
        storage::save_owner(&env, &owner);
        storage::save_policy(&env, update_policy);
        storage::init_task_count(&env);

        events::emit_initialized(&env, owner, token, fixed_pricing);
    }

    // ─────────────────────────────────────────────────────────
    // Payment
    // ─────────────────────────────────────────────────────────

    /// Accept a fixed-price payment and open a task for the payer.
    ///
    /// The payment must be addressed to this contract and carry exactly
    /// `fixed_pricing * UNIT_FACTOR`. The funds are pulled from `sender`
    /// and stay in the contract. Returns the new task's index.
    pub fn pay(env: Env, payment: PaymentTransfer) -> u64 {
        payment.sender.require_auth();
        let config = require_config(&env);

        if payment.receiver != env.current_contract_address() {
            panic_with_error!(&env, Error::WrongReceiver);
        }
        if payment.amount != config.expected_payment() {
            panic_with_error!(&env, Error::WrongAmount);
        }

        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&payment.sender, &payment.receiver, &payment.amount);

        let now = env.ledger().timestamp();
        let details = String::from_str(&env, types::DEFAULT_TASK_DETAILS);
        let creator = payment.sender.clone();
        let idx = storage::append_task(&env, |idx| Task {
            id: idx,
            status: false,
            timestamp: now,
            details,
            creator,
        });

        events::emit_task_created(&env, idx, payment.sender, payment.amount);
        idx
    }

    // ─────────────────────────────────────────────────────────
    // Task administration
    // ─────────────────────────────────────────────────────────

    /// Rewrite selected fields of task `idx`.
    ///
    /// Each `update_*` flag decides whether the matching value replaces the
    /// stored one. `id` is always re-derived from `idx` and `timestamp`
    /// always refreshed. Who may call this is governed by the update policy.
    #[allow(clippy::too_many_arguments)]
    pub fn update_task(
        env: Env,
        caller: Address,
        idx: u64,
        update_status: bool,
        update_details: bool,
        update_creator: bool,
        status: bool,
        details: String,
        creator: Address,
    ) {
        require_config(&env);
        ownership::require_task_updater(&env, &caller);

        let current = require_task(&env, idx);
        let updated = Task {
            id: idx,
            timestamp: env.ledger().timestamp(),
            status: if update_status { status } else { current.status },
            details: if update_details { details } else { current.details },
            creator: if update_creator { creator } else { current.creator },
        };
        storage::save_task(&env, &updated);

        events::emit_task_updated(&env, idx, caller, updated.status);
    }

    // ─────────────────────────────────────────────────────────
    // Treasury
    // ─────────────────────────────────────────────────────────

    /// Send `amount` of the payment token from the contract to `to`.
    ///
    /// Owner only. The balance check is left to the token contract, which
    /// fails the whole call when the escrow holds too little. On success the
    /// audit sink, if configured, is notified.
    pub fn withdraw(env: Env, caller: Address, to: Address, amount: i128) {
        let config = require_config(&env);
        ownership::require_owner(&env, &caller);

        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&env.current_contract_address(), &to, &amount);

        audit::notify_withdraw(&env);
        events::emit_withdrawn(&env, to, amount);
    }

    // ─────────────────────────────────────────────────────────
    // Owner administration
    // ─────────────────────────────────────────────────────────

    /// Hand full control to `new_owner` in a single step.
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) {
        let previous = ownership::transfer(&env, &caller, &new_owner);
        events::emit_ownership_transferred(&env, previous, new_owner);
    }

    /// Switch who may call `update_task`.
    pub fn set_update_policy(env: Env, caller: Address, policy: UpdatePolicy) {
        ownership::require_owner(&env, &caller);
        storage::save_policy(&env, policy);
        events::emit_policy_changed(&env, policy);
    }

    /// Set or clear the contract notified on every withdrawal.
    pub fn set_audit_sink(env: Env, caller: Address, sink: Option<Address>) {
        ownership::require_owner(&env, &caller);
        storage::save_audit_sink(&env, &sink);
        events::emit_audit_sink_changed(&env, sink);
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn agent(env: Env) -> AgentInfo {
        let config = require_config(&env);
        AgentInfo {
            name: config.name,
            details: config.details,
            fixed_pricing: config.fixed_pricing,
            created_at: config.created_at,
            token: config.token,
            owner: ownership::owner(&env),
            task_count: storage::task_count(&env),
            update_policy: storage::load_policy(&env),
            audit_sink: storage::load_audit_sink(&env),
        }
    }

    pub fn task(env: Env, idx: u64) -> Task {
        require_config(&env);
        require_task(&env, idx)
    }

    /// Number of tasks ever created.
    pub fn task_count(env: Env) -> u64 {
        storage::task_count(&env)
    }

    pub fn owner(env: Env) -> Address {
        ownership::owner(&env)
    }

    /// Base-unit amount a `pay` call must carry.
    pub fn expected_payment(env: Env) -> i128 {
        require_config(&env).expected_payment()
    }

    /// Page through tasks in creation order, starting at `start`.
    ///
    /// At most [`MAX_PAGE_SIZE`] tasks are returned; an empty vector means
    /// `start` is past the last task.
    pub fn list_tasks(env: Env, start: u64, limit: u32) -> Vec<Task> {
        require_config(&env);
        let end = start
            .saturating_add(limit.min(MAX_PAGE_SIZE) as u64)
            .min(storage::task_count(&env));

        let mut tasks = Vec::new(&env);
        for idx in start..end {
            tasks.push_back(require_task(&env, idx));
        }
        tasks
    }
}
