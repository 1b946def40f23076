mod display;
mod engine;
mod error;
mod events;
mod fcfs;
mod process;
mod round_robin;
mod runner;
mod sjf;
mod srtf;
mod stats;
pub mod timeline;

use clap::ValueEnum;
use serde::Deserialize;
use std::{collections::VecDeque, fmt};

pub use engine::{RunId, RunPhase, SchedulerEngine};
pub use error::{ErrorKind, SchedulerError};
pub use events::{Event, PreemptReason, TickResult};
pub use fcfs::FcfsPolicy;
pub use process::{Pid, Process, ProcessStatus};
pub use round_robin::RoundRobinPolicy;
pub use runner::ProcessRunner;
pub use sjf::SjfPolicy;
pub use srtf::SrtfPolicy;
pub use stats::{ProcessStats, Statistics};

/// Ready-queue ordering and preemption rules of one scheduling algorithm.
///
/// The ready queue holds indices into the engine's process table. Policies
/// only reorder it and answer questions; all state changes stay in the engine.
pub trait Policy {
    fn name(&self) -> &'static str;

    /// Puts the ready queue in dispatch order. `cpu_idle` is true when a
    /// selection is about to be made.
    fn order(&self, ready: &mut VecDeque<usize>, processes: &[Process], cpu_idle: bool);

    /// Whether `running` must yield to `head`, the front of the ordered queue.
    fn preempts(&self, _running: &Process, _head: &Process) -> bool {
        false
    }

    /// Whether `running` has used up its slice after `ticks` consecutive ticks.
    fn slice_expired(&self, _running: &Process, _ticks: u64) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Fcfs,
    Sjf,
    Srtf,
    #[value(name = "rr", alias = "round-robin")]
    #[serde(rename = "rr", alias = "round-robin")]
    RoundRobin,
}

impl Algorithm {
    pub fn policy(self) -> &'static dyn Policy {
        match self {
            Algorithm::Fcfs => &FcfsPolicy,
            Algorithm::Sjf => &SjfPolicy,
            Algorithm::Srtf => &SrtfPolicy,
            Algorithm::RoundRobin => &RoundRobinPolicy,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.policy().name())
    }
}
