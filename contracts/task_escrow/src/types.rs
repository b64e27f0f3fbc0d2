//! # Types
//!
//! Shared data structures used across the escrow modules.
//!
//! ## Config / owner / counter split
//!
//! The contract singleton is stored as several instance entries rather than
//! one struct:
//!
//! - [`AgentConfig`] is written once at deployment and never mutated.
//! - The owner, task counter, update policy and audit sink are each written
//!   by their own entry points.
//!
//! The public API exposes the reconstructed [`AgentInfo`] for convenience.
//!
//! ## Task status
//!
//! A task carries a plain `bool` (`false` = pending, `true` = resolved).
//! There is no enforced transition order; whoever may update tasks can flip
//! it back and forth.

use soroban_sdk::{contracttype, Address, String};

/// Converts the human-facing price into the token's base unit.
pub const UNIT_FACTOR: i128 = 1_000_000;

/// Details written on every freshly paid task.
pub const DEFAULT_TASK_DETAILS: &str = "Payment Done!!, Task Created";

/// Who may call `update_task`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpdatePolicy {
    /// Only the current owner may update tasks.
    OwnerOnly,
    /// Any authenticated account may update tasks.
    Public,
}

/// Immutable agent configuration, written once at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    pub details: String,
    /// Price per task in whole token units.
    pub fixed_pricing: u64,
    pub created_at: u64,
    /// Stellar Asset Contract used for payments and withdrawals.
    pub token: Address,
}

impl AgentConfig {
    /// Base-unit amount a single `pay` call must carry.
    pub fn expected_payment(&self) -> i128 {
        self.fixed_pricing as i128 * UNIT_FACTOR
    }
}

/// A task record, created once per accepted payment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Task {
    /// Equal to the storage index.
    pub id: u64,
    pub status: bool,
    /// Ledger timestamp of the last write.
    pub timestamp: u64,
    pub details: String,
    pub creator: Address,
}

/// Inbound payment bundled with a `pay` call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentTransfer {
    pub sender: Address,
    pub receiver: Address,
    pub amount: i128,
}

/// Full read model of the escrow singleton.
///
/// Reconstructed from the split instance entries by the `agent` query.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AgentInfo {
    pub name: String,
    pub details: String,
    pub fixed_pricing: u64,
    pub created_at: u64,
    pub token: Address,
    pub owner: Address,
    pub task_count: u64,
    pub update_policy: UpdatePolicy,
    pub audit_sink: Option<Address>,
}
