//! Lightweight performance timing utilities.
//!
//! Timers only measure when timing has been switched on with
//! [`enable_timing`]; otherwise `stop` returns `None` and summaries print
//! nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable performance timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Disable performance timing globally.
pub fn disable_timing() {
    ENABLED.store(false, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
    enabled: bool,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
            enabled: is_enabled(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Stop the timer and return elapsed time in seconds.
    /// If timing is disabled, returns None.
    pub fn stop(self) -> Option<f64> {
        if self.enabled {
            Some(self.start.elapsed().as_secs_f64())
        } else {
            None
        }
    }
}

/// Per-method timing of one integration run.
#[derive(Debug, Clone, Default)]
pub struct MethodTiming {
    pub method: String,
    pub integrate_time_s: f64,
    pub steps: usize,
}

/// Performance statistics collector.
#[derive(Debug, Default)]
pub struct PerfStats {
    pub load_time_s: f64,
    pub methods: Vec<MethodTiming>,
}

impl PerfStats {
    pub fn record_method(&mut self, method: &str, integrate_time_s: Option<f64>, steps: usize) {
        if let Some(t) = integrate_time_s {
            self.methods.push(MethodTiming {
                method: method.to_string(),
                integrate_time_s: t,
                steps,
            });
        }
    }

    pub fn total_time_s(&self) -> f64 {
        self.load_time_s
            + self
                .methods
                .iter()
                .map(|m| m.integrate_time_s)
                .sum::<f64>()
    }

    /// Print a formatted summary of the statistics.
    pub fn print_summary(&self) {
        if !is_enabled() {
            return;
        }

        println!("\n=== Performance Summary ===");

        if self.load_time_s > 0.0 {
            println!("Config load time:    {:.3}s", self.load_time_s);
        }

        for m in &self.methods {
            println!("{:<20} {:.3}s", format!("{}:", m.method), m.integrate_time_s);
            if m.steps > 0 {
                println!("  Steps:             {}", m.steps);
                println!(
                    "  Avg step time:     {:.3}us",
                    1e6 * m.integrate_time_s / m.steps as f64
                );
            }
        }

        println!("Total:               {:.3}s", self.total_time_s());
        println!("==========================\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both checks share the global switch, so they run in one test.
    #[test]
    fn timer_respects_global_switch() {
        disable_timing();
        let t = Timer::start("off");
        assert_eq!(t.label(), "off");
        assert!(t.stop().is_none());

        enable_timing();
        let t = Timer::start("on");
        let elapsed = t.stop().expect("timing enabled");
        assert!(elapsed >= 0.0);
        disable_timing();
    }

    #[test]
    fn perf_stats_totals() {
        let mut stats = PerfStats {
            load_time_s: 0.5,
            ..Default::default()
        };
        stats.record_method("rk4", Some(1.0), 10);
        stats.record_method("forward_euler", None, 10);
        assert_eq!(stats.methods.len(), 1);
        assert!((stats.total_time_s() - 1.5).abs() < 1e-12);
    }
}
