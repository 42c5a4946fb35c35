//! Prediction fetch configuration.

/// Configuration parameters for the prediction coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionConfig {
    /// Hours of predictions requested, starting now.
    pub lookahead_hours: u32,
}

impl PredictionConfig {
    pub fn with_lookahead_hours(mut self, hours: u32) -> Self {
        self.lookahead_hours = hours;
        self
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self { lookahead_hours: 48 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lookahead_is_two_days() {
        assert_eq!(PredictionConfig::default().lookahead_hours, 48);
    }
}
