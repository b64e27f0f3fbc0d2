//! # Events
//!
//! Every state change publishes one event. The leading topic is a short
//! symbol the off-chain indexer keys on; task events carry the task index as
//! a second topic.
//!
//! | Topic                 | Data                     |
//! |-----------------------|--------------------------|
//! | `("init",)`           | [`Initialized`]          |
//! | `("task_new", idx)`   | [`TaskCreated`]          |
//! | `("task_upd", idx)`   | [`TaskUpdated`]          |
//! | `("withdrawn",)`      | [`FundsWithdrawn`]       |
//! | `("owner_set",)`      | [`OwnershipTransferred`] |
//! | `("policy",)`         | `UpdatePolicy`           |
//! | `("audit_set",)`      | `Option<Address>`        |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::UpdatePolicy;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Initialized {
    pub owner: Address,
    pub token: Address,
    pub fixed_pricing: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaskCreated {
    pub task_id: u64,
    pub creator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaskUpdated {
    pub task_id: u64,
    pub caller: Address,
    pub status: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub to: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferred {
    pub previous: Address,
    pub new_owner: Address,
}

pub fn emit_initialized(env: &Env, owner: Address, token: Address, fixed_pricing: u64) {
    env.events().publish(
        (symbol_short!("init"),),
        Initialized {
            owner,
            token,
            fixed_pricing,
        },
    );
}

pub fn emit_task_created(env: &Env, task_id: u64, creator: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("task_new"), task_id),
        TaskCreated {
            task_id,
            creator,
            amount,
        },
    );
}

pub fn emit_task_updated(env: &Env, task_id: u64, caller: Address, status: bool) {
    env.events().publish(
        (symbol_short!("task_upd"), task_id),
        TaskUpdated {
            task_id,
            caller,
            status,
        },
    );
}

pub fn emit_withdrawn(env: &Env, to: Address, amount: i128) {
    env.events()
        .publish((symbol_short!("withdrawn"),), FundsWithdrawn { to, amount });
}

pub fn emit_ownership_transferred(env: &Env, previous: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("owner_set"),),
        OwnershipTransferred {
            previous,
            new_owner,
        },
    );
}

pub fn emit_policy_changed(env: &Env, policy: UpdatePolicy) {
    env.events().publish((symbol_short!("policy"),), policy);
}

pub fn emit_audit_sink_changed(env: &Env, sink: Option<Address>) {
    env.events().publish((symbol_short!("audit_set"),), sink);
}
