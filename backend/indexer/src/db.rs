//! Database layer: migrations, queries, and cursor management.

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::info;

use crate::errors::Result;
use crate::events::{EscrowEvent, EventKind, EventRecord};

const MAX_CONNECTIONS: u32 = 5;

const SELECT_EVENTS: &str = r#"
    SELECT id, event_id, event_type, task_id, actor, amount, ledger, timestamp,
           contract_id, tx_hash, created_at
    FROM   events
"#;

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };
    // Create the database file on first start.
    let url = if url.contains(":memory:") || url.contains("mode=") {
        url
    } else if url.contains('?') {
        format!("{url}&mode=rwc")
    } else {
        format!("{url}?mode=rwc")
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(&url)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied successfully");
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Cursor helpers
// ─────────────────────────────────────────────────────────

/// Persisted position of the indexer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub last_ledger: i64,
    pub last_cursor: Option<String>,
}

/// Read the persisted cursor row; a fresh database yields the default.
pub async fn load_cursor(pool: &SqlitePool) -> Result<Cursor> {
    let row: Option<(i64, Option<String>)> =
        sqlx::query_as("SELECT last_ledger, last_cursor FROM indexer_cursor WHERE id = 1")
            .fetch_optional(pool)
            .await?;
    Ok(row
        .map(|(last_ledger, last_cursor)| Cursor {
            last_ledger,
            last_cursor,
        })
        .unwrap_or_default())
}

/// Persist the last-seen ledger and optional pagination cursor.
pub async fn save_cursor(pool: &SqlitePool, cursor: &Cursor) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO indexer_cursor (id, last_ledger, last_cursor) VALUES (1, ?1, ?2)
        ON CONFLICT(id) DO UPDATE SET last_ledger = ?1, last_cursor = ?2
        "#,
    )
    .bind(cursor.last_ledger)
    .bind(cursor.last_cursor.as_deref())
    .execute(pool)
    .await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Event writes
// ─────────────────────────────────────────────────────────

/// Persist a batch of decoded events in one transaction. Events whose
/// `event_id` is already stored are ignored, so replaying a page is safe.
/// Returns the number of newly stored rows.
pub async fn insert_events(pool: &SqlitePool, events: &[EscrowEvent]) -> Result<usize> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;
    for ev in events {
        let rows_affected = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (event_id, event_type, task_id, actor, amount, ledger, timestamp, contract_id, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&ev.event_id)
        .bind(&ev.event_type)
        .bind(&ev.task_id)
        .bind(&ev.actor)
        .bind(&ev.amount)
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.contract_id)
        .bind(&ev.tx_hash)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        count += rows_affected as usize;
    }
    tx.commit().await?;
    Ok(count)
}

// ─────────────────────────────────────────────────────────
// Event reads
// ─────────────────────────────────────────────────────────

/// All events for one task index, oldest first.
pub async fn get_events_for_task(pool: &SqlitePool, task_id: &str) -> Result<Vec<EventRecord>> {
    let sql = format!("{SELECT_EVENTS} WHERE task_id = ?1 ORDER BY ledger ASC, id ASC");
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(task_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// All events whose actor is `address` (payer, updater, recipient, owner).
pub async fn get_events_for_actor(pool: &SqlitePool, address: &str) -> Result<Vec<EventRecord>> {
    let sql = format!("{SELECT_EVENTS} WHERE actor = ?1 ORDER BY ledger ASC, id ASC");
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(address)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// All events, optionally restricted to one kind, oldest first.
pub async fn get_all_events(pool: &SqlitePool, kind: Option<EventKind>) -> Result<Vec<EventRecord>> {
    let rows = match kind {
        Some(kind) => {
            let sql = format!("{SELECT_EVENTS} WHERE event_type = ?1 ORDER BY ledger ASC, id ASC");
            sqlx::query_as::<_, EventRecord>(&sql)
                .bind(kind.as_str())
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{SELECT_EVENTS} ORDER BY ledger ASC, id ASC");
            sqlx::query_as::<_, EventRecord>(&sql).fetch_all(pool).await?
        }
    };
    Ok(rows)
}
