use super::{
    error::SchedulerError,
    process::{Pid, Process},
};

/// Timing results of one finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStats {
    pub pid: Pid,
    pub name: String,
    pub arrival_time: u64,
    pub cpu_time: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub waiting_time: u64,
    pub response_time: u64,
    pub turnaround_time: u64,
}

impl ProcessStats {
    /// `None` unless the process has terminated.
    pub fn of(process: &Process) -> Option<Self> {
        if !process.is_terminated() {
            return None;
        }

        Some(Self {
            pid: process.pid(),
            name: process.name().to_owned(),
            arrival_time: process.arrival_time(),
            cpu_time: process.cpu_time(),
            start_time: process.start_time()?,
            end_time: process.end_time()?,
            waiting_time: process.waiting_time(),
            response_time: process.response_time()?,
            turnaround_time: process.turnaround_time()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// Rows in the order they were given, which for the engine is completion
    /// order.
    pub processes: Vec<ProcessStats>,
    pub average_waiting_time: f64,
    pub average_response_time: f64,
    pub average_turnaround_time: f64,
    /// Latest completion time.
    pub makespan: u64,
}

impl Statistics {
    /// Computes per-process rows and averages over the terminated processes
    /// in `finished`. Processes that have not terminated are skipped.
    pub fn compute<'a, I>(finished: I) -> Result<Self, SchedulerError>
    where
        I: IntoIterator<Item = &'a Process>,
    {
        let processes: Vec<ProcessStats> = finished
            .into_iter()
            .filter_map(ProcessStats::of)
            .collect();
        if processes.is_empty() {
            return Err(SchedulerError::NoFinishedProcesses);
        }

        let count = processes.len() as f64;
        let (waiting, response, turnaround) = processes.iter().fold(
            (0u64, 0u64, 0u64),
            |(w, r, t), stats| {
                (
                    w + stats.waiting_time,
                    r + stats.response_time,
                    t + stats.turnaround_time,
                )
            },
        );

        Ok(Self {
            average_waiting_time: waiting as f64 / count,
            average_response_time: response as f64 / count,
            average_turnaround_time: turnaround as f64 / count,
            makespan: processes.iter().map(|stats| stats.end_time).max().unwrap_or(0),
            processes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ProcessStatus;

    fn finished(pid: Pid, arrival: i64, cpu: i64, start: u64, end: u64, waiting: u64) -> Process {
        let mut process = Process::new(pid, "", cpu, arrival, 1).unwrap();
        process.status = ProcessStatus::Terminated;
        process.remaining_time = 0;
        process.start_time = Some(start);
        process.response_time = Some(start - process.arrival_time());
        process.end_time = Some(end);
        process.waiting_time = waiting;
        process
    }

    #[test]
    fn averages_over_finished_processes() {
        let processes = vec![finished(1, 0, 5, 0, 5, 0), finished(2, 2, 1, 5, 6, 3)];
        let stats = Statistics::compute(&processes).unwrap();

        assert_eq!(stats.processes.len(), 2);
        assert_eq!(stats.processes[1].turnaround_time, 4);
        assert_eq!(stats.average_waiting_time, 1.5);
        assert_eq!(stats.average_response_time, 1.5);
        assert_eq!(stats.average_turnaround_time, 4.5);
        assert_eq!(stats.makespan, 6);
    }

    #[test]
    fn empty_input_is_guarded() {
        let none: Vec<Process> = Vec::new();
        assert_eq!(
            Statistics::compute(&none),
            Err(SchedulerError::NoFinishedProcesses)
        );
    }

    #[test]
    fn unfinished_processes_are_skipped() {
        let processes = vec![
            Process::new(1, "", 3, 0, 1).unwrap(),
            finished(2, 0, 2, 0, 2, 0),
        ];
        let stats = Statistics::compute(&processes).unwrap();
        assert_eq!(stats.processes.len(), 1);
        assert_eq!(stats.processes[0].pid, 2);

        let unfinished = vec![Process::new(3, "", 3, 0, 1).unwrap()];
        assert!(Statistics::compute(&unfinished).is_err());
    }
}
