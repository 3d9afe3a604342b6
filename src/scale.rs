//! Axis scaling metadata.

use serde::{Deserialize, Serialize};

/// One axis of a data record: a label, units and a uniform sampling grid
/// (`start + i * delta`). Carried as metadata only; no resampling or unit
/// conversion happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub label: String,
    pub units: String,
    pub start: f64,
    pub delta: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            label: String::new(),
            units: String::new(),
            start: 0.0,
            delta: 1.0,
        }
    }
}

impl Scale {
    pub fn new(label: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            units: units.into(),
            ..Self::default()
        }
    }

    /// Axis value of sample `i`.
    pub fn value_at(&self, i: usize) -> f64 {
        self.start + i as f64 * self.delta
    }
}
