// 🗄️ Chart Store - SQLite + WAL
// Charts persisted as opaque JSON blobs keyed by (customer, birth date),
// admin-recorded detection flags, and an append-only event log.

use crate::birth_date::BirthDate;
use crate::chart::NumerologyChart;
use crate::detection::DetectionFlags;
use crate::reduction::normalize_name;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredChart {
    /// Stable identity of the (customer, birth date) record
    pub record_id: String,
    pub customer_email: String,
    pub birth_date: String,
    /// Hash of the inputs the chart was computed from
    pub fingerprint: String,
    /// Bumped every time the stored chart is replaced
    pub version: i64,
    pub computed_at: DateTime<Utc>,
    pub chart: NumerologyChart,
}

/// Audit trail entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: String,
    pub data: serde_json::Value,
    pub actor: String,
}

impl Event {
    pub fn new(
        event_type: &str,
        entity_type: &str,
        entity_id: &str,
        data: serde_json::Value,
        actor: &str,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type: event_type.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            data,
            actor: actor.to_string(),
        }
    }
}

/// Emails are compared case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// SHA-256 over normalized name, canonical birth date, as-of date and the
/// option-dependent parts of the chart (forecast year, realization ages).
/// Two charts with the same fingerprint are the same chart.
pub fn chart_fingerprint(chart: &NumerologyChart) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!(
        "{}|{}|{}|{}|{}",
        normalize_name(&chart.full_name),
        chart.birth_date.to_iso_string(),
        chart.as_of,
        chart.forecast.reference_year,
        chart.realization_ages.first_ends,
    ));
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// SCHEMA
// ============================================================================

pub fn setup_database(conn: &Connection) -> Result<()> {
    // WAL for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS charts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            record_id TEXT UNIQUE NOT NULL,
            customer_email TEXT NOT NULL,
            birth_date TEXT NOT NULL,
            fingerprint TEXT NOT NULL,
            version INTEGER NOT NULL DEFAULT 1,
            computed_at TEXT NOT NULL,
            chart_json TEXT NOT NULL,
            UNIQUE (customer_email, birth_date)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS detection_flags (
            customer_email TEXT PRIMARY KEY,
            has_serious_life_event INTEGER NOT NULL DEFAULT 0,
            recorded_by TEXT NOT NULL,
            recorded_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id TEXT UNIQUE NOT NULL,
            timestamp TEXT NOT NULL,
            event_type TEXT NOT NULL,
            entity_type TEXT NOT NULL,
            entity_id TEXT NOT NULL,
            data TEXT NOT NULL,
            actor TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_charts_customer ON charts(customer_email)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_entity ON events(entity_type, entity_id)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// CHARTS
// ============================================================================

/// Store a chart for a customer, replacing any chart with the same birth date.
///
/// Saving a chart whose fingerprint matches the stored one leaves the row
/// untouched and returns it as-is.
pub fn save_chart(conn: &Connection, customer_email: &str, chart: &NumerologyChart) -> Result<StoredChart> {
    let email = normalize_email(customer_email);
    let fingerprint = chart_fingerprint(chart);

    // chart row and its audit event land together
    let tx = conn.unchecked_transaction()?;

    if let Some(existing) = get_chart(&tx, &email, &chart.birth_date)? {
        if existing.fingerprint == fingerprint {
            tracing::debug!(record_id = %existing.record_id, "chart unchanged, skipping write");
            return Ok(existing);
        }
    }

    let chart_json = serde_json::to_string(chart).context("Failed to serialize chart")?;
    let computed_at = Utc::now().to_rfc3339();

    tx.execute(
        "INSERT INTO charts (
            record_id, customer_email, birth_date, fingerprint, version, computed_at, chart_json
        ) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6)
        ON CONFLICT (customer_email, birth_date) DO UPDATE SET
            fingerprint = excluded.fingerprint,
            version = charts.version + 1,
            computed_at = excluded.computed_at,
            chart_json = excluded.chart_json",
        params![
            uuid::Uuid::new_v4().to_string(),
            email,
            chart.birth_date.to_iso_string(),
            fingerprint,
            computed_at,
            chart_json,
        ],
    )?;

    let stored = get_chart(&tx, &email, &chart.birth_date)?
        .context("Chart missing right after insert")?;

    let event = Event::new(
        "chart_saved",
        "chart",
        &stored.record_id,
        serde_json::json!({
            "customer_email": stored.customer_email,
            "birth_date": stored.birth_date,
            "version": stored.version,
        }),
        "chart_store",
    );
    insert_event(&tx, &event)?;
    tx.commit()?;

    tracing::info!(
        record_id = %stored.record_id,
        version = stored.version,
        "chart saved"
    );

    Ok(stored)
}

pub fn get_chart(conn: &Connection, customer_email: &str, birth_date: &BirthDate) -> Result<Option<StoredChart>> {
    let mut stmt = conn.prepare(
        "SELECT record_id, customer_email, birth_date, fingerprint, version, computed_at, chart_json
         FROM charts
         WHERE customer_email = ?1 AND birth_date = ?2",
    )?;

    let row = stmt
        .query_row(
            params![normalize_email(customer_email), birth_date.to_iso_string()],
            read_chart_row,
        )
        .optional()?;

    row.map(decode_chart_row).transpose()
}

pub fn get_charts_for_customer(conn: &Connection, customer_email: &str) -> Result<Vec<StoredChart>> {
    let mut stmt = conn.prepare(
        "SELECT record_id, customer_email, birth_date, fingerprint, version, computed_at, chart_json
         FROM charts
         WHERE customer_email = ?1
         ORDER BY birth_date",
    )?;

    let rows = stmt
        .query_map(params![normalize_email(customer_email)], read_chart_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(decode_chart_row).collect()
}

struct ChartRow {
    record_id: String,
    customer_email: String,
    birth_date: String,
    fingerprint: String,
    version: i64,
    computed_at: String,
    chart_json: String,
}

fn read_chart_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChartRow> {
    Ok(ChartRow {
        record_id: row.get(0)?,
        customer_email: row.get(1)?,
        birth_date: row.get(2)?,
        fingerprint: row.get(3)?,
        version: row.get(4)?,
        computed_at: row.get(5)?,
        chart_json: row.get(6)?,
    })
}

fn decode_chart_row(row: ChartRow) -> Result<StoredChart> {
    let computed_at = DateTime::parse_from_rfc3339(&row.computed_at)
        .with_context(|| format!("Bad computed_at on chart {}", row.record_id))?
        .with_timezone(&Utc);

    let chart = serde_json::from_str(&row.chart_json)
        .with_context(|| format!("Bad chart JSON on chart {}", row.record_id))?;

    Ok(StoredChart {
        record_id: row.record_id,
        customer_email: row.customer_email,
        birth_date: row.birth_date,
        fingerprint: row.fingerprint,
        version: row.version,
        computed_at,
        chart,
    })
}

// ============================================================================
// DETECTION FLAGS
// ============================================================================

/// Record the admin-supplied flags for a customer
pub fn set_detection_flags(
    conn: &Connection,
    customer_email: &str,
    flags: &DetectionFlags,
    recorded_by: &str,
) -> Result<()> {
    let email = normalize_email(customer_email);
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO detection_flags (customer_email, has_serious_life_event, recorded_by, recorded_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (customer_email) DO UPDATE SET
            has_serious_life_event = excluded.has_serious_life_event,
            recorded_by = excluded.recorded_by,
            recorded_at = excluded.recorded_at",
        params![
            email,
            flags.has_serious_life_event,
            recorded_by,
            Utc::now().to_rfc3339(),
        ],
    )?;

    let event = Event::new(
        "detection_flags_updated",
        "customer",
        &email,
        serde_json::to_value(flags)?,
        recorded_by,
    );
    insert_event(&tx, &event)?;
    tx.commit()?;

    tracing::info!(customer = %email, ?flags, "detection flags recorded");
    Ok(())
}

/// Flags for a customer; nothing recorded means all flags off
pub fn get_detection_flags(conn: &Connection, customer_email: &str) -> Result<DetectionFlags> {
    let flag: Option<bool> = conn
        .query_row(
            "SELECT has_serious_life_event FROM detection_flags WHERE customer_email = ?1",
            params![normalize_email(customer_email)],
            |row| row.get(0),
        )
        .optional()?;

    Ok(DetectionFlags {
        has_serious_life_event: flag.unwrap_or(false),
    })
}

// ============================================================================
// EVENTS
// ============================================================================

pub fn insert_event(conn: &Connection, event: &Event) -> Result<()> {
    let data_json = serde_json::to_string(&event.data)?;

    conn.execute(
        "INSERT INTO events (
            event_id, timestamp, event_type, entity_type, entity_id, data, actor
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            event.event_id,
            event.timestamp.to_rfc3339(),
            event.event_type,
            event.entity_type,
            event.entity_id,
            data_json,
            event.actor,
        ],
    )?;

    Ok(())
}

/// Events for an entity, newest first
pub fn get_events_for_entity(conn: &Connection, entity_type: &str, entity_id: &str) -> Result<Vec<Event>> {
    let mut stmt = conn.prepare(
        "SELECT event_id, timestamp, event_type, entity_type, entity_id, data, actor
         FROM events
         WHERE entity_type = ?1 AND entity_id = ?2
         ORDER BY id DESC",
    )?;

    let rows = stmt
        .query_map(params![entity_type, entity_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(event_id, timestamp, event_type, entity_type, entity_id, data, actor)| {
            Ok(Event {
                timestamp: DateTime::parse_from_rfc3339(&timestamp)
                    .with_context(|| format!("Bad timestamp on event {}", event_id))?
                    .with_timezone(&Utc),
                data: serde_json::from_str(&data)
                    .with_context(|| format!("Bad data on event {}", event_id))?,
                event_id,
                event_type,
                entity_type,
                entity_id,
                actor,
            })
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
