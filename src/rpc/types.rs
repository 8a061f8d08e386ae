//! Types for the database's JSON HTTP API.
//!
//! A call to a system procedure such as `@Statistics` answers with a
//! status envelope wrapping one or more result tables.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Status code for a successful procedure call
pub const STATUS_SUCCESS: i64 = 1;

/// Response envelope of `/api/1.0/`
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub status: i64,
    #[serde(default)]
    pub statusstring: Option<String>,
    #[serde(default)]
    pub results: Option<ApiResults>,
}

/// Result tables, either as a list or keyed by table index
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiResults {
    List(Vec<StatsTable>),
    Keyed(BTreeMap<String, StatsTable>),
}

impl ApiResults {
    /// First result table, if any
    pub fn into_first(self) -> Option<StatsTable> {
        match self {
            ApiResults::List(tables) => tables.into_iter().next(),
            ApiResults::Keyed(mut tables) => {
                // keys are table indices as strings
                let first_key = tables
                    .keys()
                    .min_by_key(|k| k.parse::<usize>().unwrap_or(usize::MAX))
                    .cloned()?;
                tables.remove(&first_key)
            }
        }
    }
}

/// One result table: column schema plus row data
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsTable {
    #[serde(default)]
    pub schema: Vec<ColumnSchema>,
    #[serde(default)]
    pub data: Vec<Vec<serde_json::Value>>,
}

impl StatsTable {
    /// Position of a column by (case-insensitive) name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Column name and wire type code
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(rename = "type", default)]
    pub column_type: Option<i64>,
}
