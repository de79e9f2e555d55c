use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::info;

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub duration: Duration,
}

/// Wall-clock durations of the stages of one processed frame, in execution order.
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
    step_map: HashMap<String, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        let name = name.into();
        *self.step_map.entry(name.clone()).or_insert(Duration::ZERO) += duration;
        self.steps.push(StepTiming { name, duration });
    }

    /// Runs `f` and records its duration under `name`.
    pub fn measure<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = f();
        self.add_step(name, start.elapsed());
        value
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.step_map.get(name).copied()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn log_summary(&self) {
        let total = self.total_duration();
        for step in &self.steps {
            let percentage = if total.as_secs_f64() > 0.0 {
                (step.duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            info!(
                "{:<12} {:>9.3}ms ({:>5.1}%)",
                step.name,
                step.duration.as_secs_f64() * 1000.0,
                percentage
            );
        }
        info!("{:<12} {:>9.3}ms", "total", total.as_secs_f64() * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_steps_accumulate_in_lookup() {
        let mut timings = PipelineTimings::new();
        timings.add_step("edges", Duration::from_millis(2));
        timings.add_step("edges", Duration::from_millis(3));
        timings.add_step("display", Duration::from_millis(1));

        assert_eq!(timings.steps().len(), 3);
        assert_eq!(timings.get_step("edges"), Some(Duration::from_millis(5)));
        assert_eq!(timings.total_duration(), Duration::from_millis(6));
        assert_eq!(timings.get_step("luma"), None);
    }

    #[test]
    fn measure_returns_closure_value() {
        let mut timings = PipelineTimings::new();
        let value = timings.measure("luma", || 41 + 1);
        assert_eq!(value, 42);
        assert!(timings.get_step("luma").is_some());
    }
}
