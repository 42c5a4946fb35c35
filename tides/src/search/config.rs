//! Search timing configuration.

use std::time::Duration;

/// How query text is compared against station names and state codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchCase {
    /// "ME" matches Maine stations but "me" does not.
    #[default]
    Sensitive,
    Insensitive,
}

/// Configuration parameters for the search coordinator.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a filter runs.
    pub debounce: Duration,

    /// How long a filter may run before the activity indicator is shown.
    pub activity_delay: Duration,

    pub match_case: MatchCase,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(debounce: Duration, activity_delay: Duration, match_case: MatchCase) -> Self {
        Self {
            debounce,
            activity_delay,
            match_case,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_activity_delay(mut self, delay: Duration) -> Self {
        self.activity_delay = delay;
        self
    }

    pub fn with_match_case(mut self, match_case: MatchCase) -> Self {
        self.match_case = match_case;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            activity_delay: Duration::from_millis(300),
            match_case: MatchCase::Sensitive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.activity_delay, Duration::from_millis(300));
        assert_eq!(config.match_case, MatchCase::Sensitive);
    }

    #[test]
    fn builder_overrides() {
        let config = SearchConfig::default()
            .with_debounce(Duration::from_millis(50))
            .with_activity_delay(Duration::from_millis(10))
            .with_match_case(MatchCase::Insensitive);

        assert_eq!(config.debounce, Duration::from_millis(50));
        assert_eq!(config.activity_delay, Duration::from_millis(10));
        assert_eq!(config.match_case, MatchCase::Insensitive);
    }
}
