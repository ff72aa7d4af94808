use crate::model::FlatTokenMap;
use std::time::Duration;

/// Counts and timings from one document compilation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageMetrics {
    pub token_count: usize,
    pub alias_count: usize,
    pub theme_override_count: usize,
    pub breakpoint_override_count: usize,
    pub validation_duration: Duration,
    pub resolution_duration: Duration,
    pub transform_duration: Duration,
}

impl StageMetrics {
    pub(crate) fn record_tokens(&mut self, map: &FlatTokenMap, count_overrides: bool) {
        self.token_count = map.len();
        self.alias_count = map.alias_count();
        if count_overrides {
            self.theme_override_count = map.theme_override_count();
            self.breakpoint_override_count = map.breakpoint_override_count();
        }
    }

    pub fn total_duration(&self) -> Duration {
        self.validation_duration + self.resolution_duration + self.transform_duration
    }

    pub fn override_count(&self) -> usize {
        self.theme_override_count + self.breakpoint_override_count
    }

    /// Tokens per second across all stages
    pub fn throughput(&self) -> f64 {
        let seconds = self.total_duration().as_secs_f64();
        if seconds > 0.0 {
            self.token_count as f64 / seconds
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals() {
        let metrics = StageMetrics {
            token_count: 10,
            theme_override_count: 2,
            breakpoint_override_count: 1,
            validation_duration: Duration::from_millis(1),
            resolution_duration: Duration::from_millis(2),
            transform_duration: Duration::from_millis(2),
            ..StageMetrics::default()
        };
        assert_eq!(metrics.total_duration(), Duration::from_millis(5));
        assert_eq!(metrics.override_count(), 3);
        assert!((metrics.throughput() - 2000.0).abs() < 1e-6);
        assert_eq!(StageMetrics::default().throughput(), 0.0);
    }
}
