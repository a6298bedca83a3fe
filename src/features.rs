//! Feature vector construction
//!
//! Selects the classifier's 28 input positions from a 41-field record and
//! encodes the categorical fields through their codebooks. The selection is
//! a build-time constant tied to the trained model's input width.

use serde::{Deserialize, Serialize};

use crate::codebook::{FLAG, PROTOCOL_TYPE, SERVICE};
use crate::error::{ClassifierError, Result};
use crate::record::{RawRecord, FIELD_NAMES};

/// Model input width.
pub const FEATURE_COUNT: usize = 28;

/// Source record positions feeding the model, in input order: the first ten
/// fields plus the traffic statistics from `srv_count` onward.
pub const SELECTED_FIELDS: [usize; FEATURE_COUNT] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, // duration .. hot
    23, 24, 25, 26, 27, 28, 29, 30, // srv_count .. srv_diff_host_rate
    31, 32, 33, 34, 35, 36, 37, 38, 39, 40, // dst_host_* statistics
];

/// Record positions holding categorical strings.
const PROTOCOL_FIELD: usize = 1;
const SERVICE_FIELD: usize = 2;
const FLAG_FIELD: usize = 3;

/// Name of the source field behind a feature position.
pub fn feature_name(index: usize) -> &'static str {
    FIELD_NAMES[SELECTED_FIELDS[index]]
}

/// Fixed-length numeric encoding of one record, ready for normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    /// Build the feature vector for a record.
    ///
    /// Categorical positions are replaced with their codebook codes; the
    /// remaining positions are parsed as `f32`. Deterministic, no I/O.
    pub fn build(record: &RawRecord) -> Result<Self> {
        let mut values = Vec::with_capacity(FEATURE_COUNT);

        for &idx in SELECTED_FIELDS.iter() {
            let raw = record.field(idx);
            let value = match idx {
                PROTOCOL_FIELD => PROTOCOL_TYPE.encode(raw)? as f32,
                SERVICE_FIELD => SERVICE.encode(raw)? as f32,
                FLAG_FIELD => FLAG.encode(raw)? as f32,
                _ => raw.parse::<f32>().map_err(|_| {
                    ClassifierError::MalformedRecord(format!(
                        "field {} ({}) is not numeric: {:?}",
                        idx, FIELD_NAMES[idx], raw
                    ))
                })?,
            };
            values.push(value);
        }

        Ok(Self { values })
    }

    /// Wrap an already-computed value sequence.
    pub fn from_values(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Feature values as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
