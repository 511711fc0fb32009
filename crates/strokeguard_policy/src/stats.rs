//! Statistics computed over a stroke log.

use serde::{Deserialize, Serialize};
use strokeguard_core::{StrokeCommand, StrokeLog};

/// Summary counts for a log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogStats {
    /// Number of color changes
    pub set_color_count: usize,
    /// Number of circles
    pub circle_count: usize,
    /// See [`average_set_color_distance`]
    pub average_set_color_distance: Option<f64>,
}

impl LogStats {
    /// Compute statistics for `log`
    #[must_use]
    pub fn compute(log: &StrokeLog) -> Self {
        Self {
            set_color_count: log.set_color_count(),
            circle_count: log.circle_count(),
            average_set_color_distance: average_set_color_distance(log),
        }
    }
}

/// Average number of circles per color segment, ignoring the first segment.
///
/// Each color change opens a segment holding the circles that follow it.
/// Circles before the first color change belong to no segment.
///
/// - no color change: `None`
/// - one color change: `Some(0.0)`
/// - otherwise: mean circle count of every segment after the first
#[must_use]
pub fn average_set_color_distance(log: &StrokeLog) -> Option<f64> {
    let mut segments: Vec<usize> = Vec::new();
    for command in log {
        match command {
            StrokeCommand::SetColor { .. } => segments.push(0),
            StrokeCommand::Circle { .. } => {
                if let Some(count) = segments.last_mut() {
                    *count += 1;
                }
            }
        }
    }

    match segments.len() {
        0 => None,
        1 => Some(0.0),
        n => {
            let total: usize = segments[1..].iter().sum();
            Some(total as f64 / (n - 1) as f64)
        }
    }
}
