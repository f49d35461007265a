//! Process resource sampling around a roster run. Each phase of the run
//! records how long it took and how much memory the process held when it
//! ended, so a slow upload can be traced to parsing, grouping or rendering.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSample {
    pub phase: String,
    pub duration: Duration,
    pub memory_mb: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub phases: Vec<PhaseSample>,
    pub total: Duration,
    pub peak_memory_mb: u64,
}

impl RunSummary {
    /// The phase that took longest, if any were recorded.
    pub fn slowest_phase(&self) -> Option<&PhaseSample> {
        self.phases.iter().max_by_key(|sample| sample.duration)
    }
}

#[cfg(feature = "cli")]
mod process {
    use super::{PhaseSample, RunSummary};
    use std::sync::Mutex;
    use std::time::Instant;
    use sysinfo::{Pid, ProcessesToUpdate, System};

    struct RunState {
        system: System,
        started: Instant,
        last_mark: Instant,
        peak_memory_mb: u64,
        phases: Vec<PhaseSample>,
    }

    impl RunState {
        fn resident_mb(&mut self, pid: Option<Pid>) -> u64 {
            let Some(pid) = pid else {
                return 0;
            };
            self.system
                .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
            let memory_mb = self
                .system
                .process(pid)
                .map(|p| p.memory() / 1024 / 1024)
                .unwrap_or(0);
            self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);
            memory_mb
        }
    }

    pub struct SystemMonitor {
        state: Option<Mutex<RunState>>,
        pid: Option<Pid>,
    }

    impl SystemMonitor {
        pub fn new(enabled: bool) -> Self {
            if !enabled {
                return Self {
                    state: None,
                    pid: None,
                };
            }

            let pid = sysinfo::get_current_pid().ok();
            if pid.is_none() {
                tracing::warn!("Could not determine current PID; memory figures will read 0");
            }
            let now = Instant::now();

            Self {
                state: Some(Mutex::new(RunState {
                    system: System::new(),
                    started: now,
                    last_mark: now,
                    peak_memory_mb: 0,
                    phases: Vec::new(),
                })),
                pid,
            }
        }

        pub fn is_enabled(&self) -> bool {
            self.state.is_some()
        }

        /// Closes the current phase and logs its duration and memory.
        pub fn record_phase(&self, phase: &str) {
            let Some(mut state) = self.state.as_ref().and_then(|s| s.lock().ok()) else {
                return;
            };

            let now = Instant::now();
            let duration = now.duration_since(state.last_mark);
            state.last_mark = now;
            let memory_mb = state.resident_mb(self.pid);

            tracing::info!(
                "📊 {} took {:?}, memory {}MB (peak {}MB)",
                phase,
                duration,
                memory_mb,
                state.peak_memory_mb
            );
            state.phases.push(PhaseSample {
                phase: phase.to_string(),
                duration,
                memory_mb,
            });
        }

        pub fn summary(&self) -> Option<RunSummary> {
            let state = self.state.as_ref()?.lock().ok()?;
            Some(RunSummary {
                phases: state.phases.clone(),
                total: state.started.elapsed(),
                peak_memory_mb: state.peak_memory_mb,
            })
        }

        pub fn log_summary(&self) {
            if let Some(summary) = self.summary() {
                let slowest = summary
                    .slowest_phase()
                    .map(|s| s.phase.as_str())
                    .unwrap_or("-");
                tracing::info!(
                    "📊 Run finished in {:?}, peak memory {}MB, slowest phase: {}",
                    summary.total,
                    summary.peak_memory_mb,
                    slowest
                );
            }
        }
    }
}

#[cfg(feature = "cli")]
pub use process::SystemMonitor;

// 非 CLI 建置沒有 sysinfo，監控一律關閉
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn record_phase(&self, _phase: &str) {}

    pub fn summary(&self) -> Option<RunSummary> {
        None
    }

    pub fn log_summary(&self) {}
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
