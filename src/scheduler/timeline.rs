//! Gantt-chart view of a tick trace.

use super::{events::TickResult, process::Pid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// `None` while the CPU is idle.
    pub pid: Option<Pid>,
    pub start: u64,
    pub end: u64,
}

impl Segment {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Collapses consecutive ticks spent on the same process into one segment.
/// A process that is preempted and immediately re-dispatched shows up as a
/// single segment.
pub fn segments(trace: &[TickResult]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for tick in trace {
        match segments.last_mut() {
            Some(last) if last.pid == tick.executed && last.end == tick.time - 1 => {
                last.end = tick.time;
            }
            _ => segments.push(Segment {
                pid: tick.executed,
                start: tick.time - 1,
                end: tick.time,
            }),
        }
    }
    segments
}
