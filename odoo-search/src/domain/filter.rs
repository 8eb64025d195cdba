use std::num::FpCategory;

use serde_json::Value as Json;

use crate::error::{OdooSearchError, Result};
use crate::xmlrpc::Value;

/// Filter clauses for `search_read`. Empty means every record matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domain(Vec<Json>);

impl Domain {
    pub const fn match_all() -> Self {
        Self(Vec::new())
    }

    /// Builds a domain from the comma-split pieces of the `--query` flag.
    ///
    /// The pieces are rejoined with a single comma and parsed as JSON. A value
    /// that is not an array is wrapped into one. Falsy scalars (`null`,
    /// `false`, `0`, `""`) match everything.
    pub fn parse(pieces: &[String]) -> Result<Self> {
        let text = pieces.join(",");
        let parsed: Json = serde_json::from_str(&text)
            .map_err(|e| OdooSearchError::InvalidQuery(e.to_string()))?;

        Ok(match parsed {
            Json::Array(clauses) => Self(clauses),
            clause if is_falsy(&clause) => Self::match_all(),
            clause => Self(vec![clause]),
        })
    }

    pub fn clauses(&self) -> &[Json] {
        &self.0
    }

    pub fn is_match_all(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.0.iter().cloned().map(Value::from).collect())
    }
}

fn is_falsy(value: &Json) -> bool {
    match value {
        Json::Null => true,
        Json::Bool(b) => !b,
        Json::Number(n) => n.as_f64().map(f64::classify) == Some(FpCategory::Zero),
        Json::String(s) => s.is_empty(),
        Json::Array(_) | Json::Object(_) => false,
    }
}
