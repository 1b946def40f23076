use super::process::Pid;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreemptReason {
    /// SRTF: a ready process has strictly less remaining time.
    ShorterRemaining { by: Pid },
    /// Round-Robin: the process ran for its whole quantum.
    QuantumExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Arrived { pid: Pid },
    Dispatched { pid: Pid, first: bool },
    Preempted { pid: Pid, reason: PreemptReason },
    Completed { pid: Pid },
}

impl Event {
    pub fn pid(&self) -> Pid {
        match *self {
            Event::Arrived { pid }
            | Event::Dispatched { pid, .. }
            | Event::Preempted { pid, .. }
            | Event::Completed { pid } => pid,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Arrived { pid } => write!(f, "P{} arrived and is ready", pid),
            Event::Dispatched { pid, first: true } => write!(f, "CPU started P{} (first run)", pid),
            Event::Dispatched { pid, first: false } => write!(f, "CPU resumed P{}", pid),
            Event::Preempted {
                pid,
                reason: PreemptReason::ShorterRemaining { by },
            } => write!(f, "P{} preempted by shorter P{}", pid, by),
            Event::Preempted {
                pid,
                reason: PreemptReason::QuantumExpired,
            } => write!(f, "P{} used up its quantum", pid),
            Event::Completed { pid } => write!(f, "P{} completed", pid),
        }
    }
}

/// Everything that happened during one simulated time unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickResult {
    /// Clock value after the tick; the unit covered is `[time - 1, time)`.
    pub time: u64,
    /// Process that held the CPU during the unit, `None` if it sat idle.
    pub executed: Option<Pid>,
    /// Process still holding the CPU once the tick is over.
    pub running: Option<Pid>,
    /// Events in the order they occurred.
    pub events: Vec<Event>,
    /// Ready queue snapshot, front first.
    pub ready: Vec<Pid>,
    pub complete: bool,
}

impl TickResult {
    pub fn arrivals(&self) -> impl Iterator<Item = Pid> + '_ {
        self.events.iter().filter_map(|event| match event {
            Event::Arrived { pid } => Some(*pid),
            _ => None,
        })
    }

    pub fn preemptions(&self) -> impl Iterator<Item = (Pid, PreemptReason)> + '_ {
        self.events.iter().filter_map(|event| match event {
            Event::Preempted { pid, reason } => Some((*pid, *reason)),
            _ => None,
        })
    }

    pub fn completions(&self) -> impl Iterator<Item = Pid> + '_ {
        self.events.iter().filter_map(|event| match event {
            Event::Completed { pid } => Some(*pid),
            _ => None,
        })
    }

    /// One `[T<time>] ...` history line per event.
    pub fn history(&self) -> impl Iterator<Item = String> + '_ {
        self.events
            .iter()
            .map(move |event| format!("[T{}] {}", self.time, event))
    }
}
