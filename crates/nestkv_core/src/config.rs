//! Store configuration.

/// Configuration for creating a store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial capacity reserved for the value map of each nested frame.
    pub frame_capacity: usize,

    /// Whether operation counters are maintained.
    pub record_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_capacity: 0,
            record_stats: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial capacity of nested frames.
    #[must_use]
    pub const fn frame_capacity(mut self, capacity: usize) -> Self {
        self.frame_capacity = capacity;
        self
    }

    /// Sets whether operation counters are maintained.
    #[must_use]
    pub const fn record_stats(mut self, value: bool) -> Self {
        self.record_stats = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.frame_capacity, 0);
        assert!(config.record_stats);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new().frame_capacity(64).record_stats(false);

        assert_eq!(config.frame_capacity, 64);
        assert!(!config.record_stats);
    }
}
