//! # Ownership
//!
//! Single-owner access control. The owner is set at deployment and can only
//! change through [`transfer`]; there is no multi-sig or timelock, so the new
//! owner has full control as soon as the call lands.
//!
//! Every gate authenticates the caller first and then compares it with the
//! stored owner.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::storage;
use crate::types::UpdatePolicy;
use crate::Error;

/// Load the current owner, panicking with `NotInitialized` if unset.
pub fn owner(env: &Env) -> Address {
    storage::load_owner(env).unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

/// Require that `caller` signed the invocation and is the current owner.
pub fn require_owner(env: &Env, caller: &Address) {
    caller.require_auth();
    if *caller != owner(env) {
        panic_with_error!(env, Error::NotAuthorized);
    }
}

/// Gate for `update_task`, driven by the stored [`UpdatePolicy`].
pub fn require_task_updater(env: &Env, caller: &Address) {
    match storage::load_policy(env) {
        UpdatePolicy::OwnerOnly => require_owner(env, caller),
        UpdatePolicy::Public => caller.require_auth(),
    }
}

/// Hand ownership to `new_owner`. Returns the previous owner.
pub fn transfer(env: &Env, caller: &Address, new_owner: &Address) -> Address {
    require_owner(env, caller);
    let previous = owner(env);
    storage::save_owner(env, new_owner);
    previous
}
