use super::{Policy, Process};
use std::collections::VecDeque;

/// First-Come-First-Served. The queue is already in arrival order and the
/// running process keeps the CPU until its burst completes.
pub struct FcfsPolicy;

impl Policy for FcfsPolicy {
    fn name(&self) -> &'static str {
        "FCFS (First-Come, First-Served)"
    }

    fn order(&self, _ready: &mut VecDeque<usize>, _processes: &[Process], _cpu_idle: bool) {}
}
