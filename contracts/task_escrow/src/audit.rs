//! # Audit sink
//!
//! Withdrawals notify an external log contract. The destination is an
//! owner-configurable address instead of a hard-wired application, so any
//! contract exposing [`AuditLog::emit_log`] can receive the notifications.

use soroban_sdk::{contractclient, Address, Env, String};

use crate::storage;

/// Interface an audit sink contract must implement.
#[allow(dead_code)]
#[contractclient(name = "AuditLogClient")]
pub trait AuditLog {
    fn emit_log(env: Env, event: String, source: Address, status: String);
}

/// Forward a successful withdrawal to the configured sink, if any.
pub fn notify_withdraw(env: &Env) {
    let Some(sink) = storage::load_audit_sink(env) else {
        return;
    };
    AuditLogClient::new(env, &sink).emit_log(
        &String::from_str(env, "withdraw"),
        &env.current_contract_address(),
        &String::from_str(env, "success"),
    );
}
