use super::{Policy, Process};
use std::collections::VecDeque;

/// Round-Robin: a FIFO ready queue, and each process gives the CPU back after
/// its own quantum of consecutive ticks.
pub struct RoundRobinPolicy;

impl Policy for RoundRobinPolicy {
    fn name(&self) -> &'static str {
        "Round Robin"
    }

    fn order(&self, _ready: &mut VecDeque<usize>, _processes: &[Process], _cpu_idle: bool) {}

    fn slice_expired(&self, running: &Process, ticks: u64) -> bool {
        ticks >= running.quantum()
    }
}
