//! Wall-clock stage timings for the `--profile` flag.
//!
//! Commands mark their coarse stages as they go; the accumulated
//! durations are dumped to a text file once the run ends.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::info;

/// Accumulates named stage durations over one command run.
pub struct Profiler {
    enabled: bool,
    started: Instant,
    current: Option<(String, Instant)>,
    finished: Vec<(String, Duration)>,
}

impl Profiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            started: Instant::now(),
            current: None,
            finished: Vec::new(),
        }
    }

    /// Closes the running stage, if any, and opens a new one. A no-op
    /// when profiling is off.
    pub fn stage(&mut self, name: &str) {
        if !self.enabled {
            return;
        }
        self.close_current();
        self.current = Some((name.to_string(), Instant::now()));
    }

    fn close_current(&mut self) {
        if let Some((name, begun)) = self.current.take() {
            self.finished.push((name, begun.elapsed()));
        }
    }

    /// Writes the timing dump, one line per stage plus a total. A no-op
    /// when profiling is off.
    pub fn finish(mut self, path: &Path) -> std::io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        self.close_current();
        let total = self.started.elapsed();
        let mut out = String::new();
        for (name, took) in &self.finished {
            out.push_str(&format!("{:>12.6}s  {name}\n", took.as_secs_f64()));
        }
        out.push_str(&format!("{:>12.6}s  total\n", total.as_secs_f64()));
        std::fs::write(path, out)?;
        info!(path = %path.display(), n_stages = self.finished.len(), "wrote timing dump");
        Ok(())
    }
}
