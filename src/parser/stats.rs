//! Decode statistics tables and snapshot files into typed records.
//!
//! Rows arrive as positional arrays described by a column schema, so every
//! lookup goes through the column name rather than a fixed position.

use super::schema::{ProcedureLatency, ProcedureStat};
use crate::rpc::types::StatsTable;
use crate::utils::config::{
    COL_AVG, COL_AVG_EXECUTION_TIME, COL_INVOCATIONS, COL_PROCEDURE, NANOS_PER_MILLI,
    SNAPSHOT_DETAILS_KEY, SNAPSHOT_PROFILE_KEY,
};
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Decode a `PROCEDUREPROFILE` table
///
/// **Public** - used by the HTTP source
///
/// One row per procedure, cluster-wide. Rows keep their table order.
pub fn parse_procedure_profile(table: &StatsTable) -> Result<Vec<ProcedureStat>, ParseError> {
    let name_idx = require_column(table, COL_PROCEDURE)?;
    let avg_idx = require_column(table, COL_AVG)?;
    let inv_idx = require_column(table, COL_INVOCATIONS)?;

    let mut stats = Vec::with_capacity(table.data.len());
    for row in &table.data {
        let name = cell_string(row, name_idx, COL_PROCEDURE)?;
        let avg = cell_non_negative_f64(row, avg_idx, COL_AVG, &name)?;
        let invocations = cell_u64(row, inv_idx, COL_INVOCATIONS, &name)?;
        stats.push(ProcedureStat::new(name, avg, invocations));
    }

    debug!("Decoded {} procedure profile rows", stats.len());
    Ok(stats)
}

/// Decode a `PROCEDURE` table into one latency record per procedure
///
/// **Public** - used by the HTTP source
///
/// The table has one row per partition; rows for the same procedure are
/// merged with an invocation-weighted mean. Output follows first appearance.
pub fn parse_procedure_details(table: &StatsTable) -> Result<Vec<ProcedureLatency>, ParseError> {
    let name_idx = require_column(table, COL_PROCEDURE)?;
    let avg_idx = require_column(table, COL_AVG_EXECUTION_TIME)?;
    let inv_idx = require_column(table, COL_INVOCATIONS)?;

    // (weighted nanos sum, invocations, plain sum, rows)
    let mut totals: HashMap<String, (f64, u64, f64, u64)> = HashMap::new();
    let mut order = Vec::new();

    for row in &table.data {
        let name = cell_string(row, name_idx, COL_PROCEDURE)?;
        let avg = cell_non_negative_f64(row, avg_idx, COL_AVG_EXECUTION_TIME, &name)?;
        let invocations = cell_u64(row, inv_idx, COL_INVOCATIONS, &name)?;

        let entry = totals.entry(name.clone()).or_insert_with(|| {
            order.push(name);
            (0.0, 0, 0.0, 0)
        });
        entry.0 += avg * invocations as f64;
        entry.1 = entry.1.saturating_add(invocations);
        entry.2 += avg;
        entry.3 = entry.3.saturating_add(1);
    }

    let details = order
        .into_iter()
        .map(|name| {
            let (weighted, invocations, plain, rows) = totals[&name];
            // partitions that never ran the procedure still report an average
            let avg_nanos = if invocations > 0 {
                weighted / invocations as f64
            } else {
                plain / rows.max(1) as f64
            };
            ProcedureLatency {
                procedure_name: name,
                avg_latency_ms: avg_nanos / NANOS_PER_MILLI,
            }
        })
        .collect::<Vec<_>>();

    debug!("Decoded latency for {} procedures", details.len());
    Ok(details)
}

/// Saved statistics in the dashboard's own field layout
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(rename = "PROCEDURE_PROFILE", default)]
    profile: Vec<ProcedureStat>,
    #[serde(rename = "PROCEDURE_DETAILS", default)]
    details: Vec<ProcedureLatency>,
}

/// Parsed snapshot contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotData {
    pub profile: Vec<ProcedureStat>,
    pub details: Vec<ProcedureLatency>,
}

/// Parse a snapshot JSON document
///
/// **Public** - used by the file source
///
/// Expected shape:
/// `{"PROCEDURE_PROFILE": [{"PROCEDURE", "AVG", "INVOCATIONS"}],
///   "PROCEDURE_DETAILS": [{"PROCEDURE", "AVG_LATENCY"}]}`.
/// Either key may be missing.
pub fn parse_snapshot(raw: &str) -> Result<SnapshotData, ParseError> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(ParseError::InvalidFormat(format!(
            "snapshot must be a JSON object with {} and/or {}",
            SNAPSHOT_PROFILE_KEY, SNAPSHOT_DETAILS_KEY
        )));
    }

    let snapshot: Snapshot = serde_json::from_value(value)?;

    for stat in &snapshot.profile {
        check_non_negative(stat.average_execution_time_nanos, COL_AVG, &stat.procedure_name)?;
    }
    for detail in &snapshot.details {
        check_non_negative(detail.avg_latency_ms, "AVG_LATENCY", &detail.procedure_name)?;
    }

    Ok(SnapshotData {
        profile: snapshot.profile,
        details: snapshot.details,
    })
}

fn require_column(table: &StatsTable, name: &str) -> Result<usize, ParseError> {
    table
        .column_index(name)
        .ok_or_else(|| ParseError::MissingColumn(name.to_string()))
}

fn cell<'a>(row: &'a [Value], idx: usize, column: &str) -> Result<&'a Value, ParseError> {
    row.get(idx).ok_or_else(|| {
        ParseError::InvalidFormat(format!(
            "row has {} cells, column {} is at {}",
            row.len(),
            column,
            idx
        ))
    })
}

fn cell_string(row: &[Value], idx: usize, column: &str) -> Result<String, ParseError> {
    match cell(row, idx, column)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(ParseError::InvalidFormat(format!(
            "column {} must be a string, got {}",
            column, other
        ))),
    }
}

fn cell_non_negative_f64(
    row: &[Value],
    idx: usize,
    column: &str,
    procedure: &str,
) -> Result<f64, ParseError> {
    let value = match cell(row, idx, column)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid(column, procedure, "not a number"))?;

    check_non_negative(value, column, procedure)?;
    Ok(value)
}

fn cell_u64(row: &[Value], idx: usize, column: &str, procedure: &str) -> Result<u64, ParseError> {
    match cell(row, idx, column)? {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else if let Some(f) = n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0) {
                warn!("Column {} for {} sent as float: {}", column, procedure, f);
                Ok(f as u64)
            } else {
                Err(invalid(column, procedure, "not a non-negative integer"))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid(column, procedure, "not a non-negative integer")),
        _ => Err(invalid(column, procedure, "not a non-negative integer")),
    }
}

fn check_non_negative(value: f64, column: &str, procedure: &str) -> Result<(), ParseError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(column, procedure, "must be a finite non-negative number"));
    }
    Ok(())
}

fn invalid(column: &str, procedure: &str, reason: &str) -> ParseError {
    ParseError::InvalidValue {
        column: column.to_string(),
        procedure: procedure.to_string(),
        reason: reason.to_string(),
    }
}
