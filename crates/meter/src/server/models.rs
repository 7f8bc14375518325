//! Data model for records, user metrics and comparison results

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored item: field name to arbitrary JSON value, in insertion order
pub type Record = Map<String, Value>;

/// Metric name to (expected numeric) value, supplied per request
pub type UserMetrics = Map<String, Value>;

/// One metric compared between the user's input and a stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricComparison {
  /// Value submitted by the user, echoed as given
  pub user: Value,

  /// Value found in the stored record, echoed as stored
  pub local: Value,

  /// `user - local`
  pub difference: f64,
}

/// Comparisons for one stored record, keyed by metric in the user's input order.
/// Serializes as a plain JSON object.
pub type ComparisonMap = IndexMap<String, MetricComparison>;
