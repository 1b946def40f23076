use super::{Policy, Process};
use std::collections::VecDeque;

/// Non-preemptive Shortest-Job-First.
pub struct SjfPolicy;

impl Policy for SjfPolicy {
    fn name(&self) -> &'static str {
        "SJF (Shortest Job First)"
    }

    // Only sorted at a decision point; the running job is never displaced.
    fn order(&self, ready: &mut VecDeque<usize>, processes: &[Process], cpu_idle: bool) {
        if !cpu_idle {
            return;
        }
        ready.make_contiguous().sort_by_key(|&index| {
            let process = &processes[index];
            (process.cpu_time(), process.arrival_time(), process.pid())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processes() -> Vec<Process> {
        vec![
            Process::new(1, "long", 5, 0, 1).unwrap(),
            Process::new(2, "short-late", 2, 3, 1).unwrap(),
            Process::new(3, "short-early", 2, 1, 1).unwrap(),
            Process::new(4, "short-early-twin", 2, 1, 1).unwrap(),
        ]
    }

    #[test]
    fn sorts_by_burst_then_arrival_then_pid() {
        let processes = processes();
        let mut ready: VecDeque<usize> = VecDeque::from(vec![0, 3, 1, 2]);
        SjfPolicy.order(&mut ready, &processes, true);
        let pids: Vec<_> = ready.iter().map(|&i| processes[i].pid()).collect();
        assert_eq!(pids, vec![3, 4, 2, 1]);
    }

    #[test]
    fn leaves_queue_alone_while_cpu_busy() {
        let processes = processes();
        let mut ready: VecDeque<usize> = VecDeque::from(vec![0, 1]);
        SjfPolicy.order(&mut ready, &processes, false);
        assert_eq!(ready, VecDeque::from(vec![0, 1]));
        assert!(!SjfPolicy.preempts(&processes[0], &processes[1]));
    }
}
