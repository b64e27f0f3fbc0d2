//! Canonical event types emitted by the task escrow contract.
//!
//! These mirror the Soroban events defined in
//! `contracts/task_escrow/src/events.rs`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::IndexerError;

/// All recognised event kinds from the escrow contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The agent listing was initialised (`init` topic).
    Initialized,
    /// A payment opened a new task (`task_new` topic).
    TaskCreated,
    /// A task's fields were rewritten (`task_upd` topic).
    TaskUpdated,
    /// The owner withdrew escrowed funds (`withdrawn` topic).
    FundsWithdrawn,
    /// Ownership moved to a new account (`owner_set` topic).
    OwnershipTransferred,
    /// The task update policy changed (`policy` topic).
    PolicyChanged,
    /// The withdrawal audit sink was set or cleared (`audit_set` topic).
    AuditSinkChanged,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        Self::Initialized,
        Self::TaskCreated,
        Self::TaskUpdated,
        Self::FundsWithdrawn,
        Self::OwnershipTransferred,
        Self::PolicyChanged,
        Self::AuditSinkChanged,
        Self::Unknown,
    ];

    /// Parse the leading topic symbol produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "init" => Self::Initialized,
            "task_new" => Self::TaskCreated,
            "task_upd" => Self::TaskUpdated,
            "withdrawn" => Self::FundsWithdrawn,
            "owner_set" => Self::OwnershipTransferred,
            "policy" => Self::PolicyChanged,
            "audit_set" => Self::AuditSinkChanged,
            _ => Self::Unknown,
        }
    }

    /// Short identifier stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::TaskCreated => "task_created",
            Self::TaskUpdated => "task_updated",
            Self::FundsWithdrawn => "funds_withdrawn",
            Self::OwnershipTransferred => "ownership_transferred",
            Self::PolicyChanged => "policy_changed",
            Self::AuditSinkChanged => "audit_sink_changed",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the second topic of this event is a task index.
    pub fn carries_task_id(&self) -> bool {
        matches!(self, Self::TaskCreated | Self::TaskUpdated)
    }
}

impl FromStr for EventKind {
    type Err = IndexerError;

    /// Parse the stored identifier (the inverse of [`EventKind::as_str`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| IndexerError::UnknownKind(s.to_string()))
    }
}

/// A fully decoded escrow event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowEvent {
    /// RPC-assigned unique event id, used for deduplication.
    pub event_id: String,
    pub event_type: String,
    pub task_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// An event row as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub task_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
