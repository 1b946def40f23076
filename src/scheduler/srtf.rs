use super::{Policy, Process};
use std::collections::VecDeque;

/// Shortest-Remaining-Time-First, the preemptive variant of SJF.
pub struct SrtfPolicy;

impl Policy for SrtfPolicy {
    fn name(&self) -> &'static str {
        "SRTF (Shortest Remaining Time First)"
    }

    // Stable: equal remaining times keep their queue order.
    fn order(&self, ready: &mut VecDeque<usize>, processes: &[Process], _cpu_idle: bool) {
        ready
            .make_contiguous()
            .sort_by_key(|&index| processes[index].remaining_time());
    }

    fn preempts(&self, running: &Process, head: &Process) -> bool {
        head.remaining_time() < running.remaining_time()
    }
}
