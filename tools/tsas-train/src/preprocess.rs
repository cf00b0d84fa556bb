//! Min-max feature scaling.

use serde::{Deserialize, Serialize};

use tsas_core::constants::FEATURE_COUNT;

/// Per-column bounds fitted on a dataset; `transform` maps each column to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub min: [f32; FEATURE_COUNT],
    pub max: [f32; FEATURE_COUNT],
}

impl MinMaxScaler {
    /// Fit bounds over `rows`. Returns `None` for an empty set.
    pub fn fit(rows: &[[f32; FEATURE_COUNT]]) -> Option<Self> {
        let first = rows.first()?;
        let mut scaler = Self {
            min: *first,
            max: *first,
        };
        for row in &rows[1..] {
            for (col, &v) in row.iter().enumerate() {
                scaler.min[col] = scaler.min[col].min(v);
                scaler.max[col] = scaler.max[col].max(v);
            }
        }
        Some(scaler)
    }

    /// Scale one row. Constant columns map to 0.
    pub fn transform(&self, row: &[f32; FEATURE_COUNT]) -> [f32; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (col, v) in row.iter().enumerate() {
            let range = self.max[col] - self.min[col];
            out[col] = if range > 0.0 {
                (v - self.min[col]) / range
            } else {
                0.0
            };
        }
        out
    }
}
