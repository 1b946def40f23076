use super::error::SchedulerError;
use std::fmt;

pub type Pid = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    New,
    Ready,
    Running,
    Terminated,
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::New => write!(f, "new"),
            ProcessStatus::Ready => write!(f, "ready"),
            ProcessStatus::Running => write!(f, "running"),
            ProcessStatus::Terminated => write!(f, "terminated"),
        }
    }
}

/// One schedulable unit: its static configuration and its progress in the
/// current run. Only the engine mutates the runtime fields.
#[derive(Debug, Clone)]
pub struct Process {
    pid: Pid,
    name: String,
    cpu_time: u64,
    arrival_time: u64,
    quantum: u64,

    pub(super) remaining_time: u64,
    pub(super) status: ProcessStatus,
    pub(super) start_time: Option<u64>,
    pub(super) end_time: Option<u64>,
    pub(super) waiting_time: u64,
    pub(super) response_time: Option<u64>,
}

impl Process {
    /// Validates the raw parameters and builds a process in the `new` state.
    ///
    /// `cpu_time` and `quantum` must be at least 1 and `arrival_time` must not
    /// be negative.
    pub fn new(
        pid: Pid,
        name: &str,
        cpu_time: i64,
        arrival_time: i64,
        quantum: i64,
    ) -> Result<Self, SchedulerError> {
        let cpu_time = positive("cpu_time", cpu_time)?;
        let quantum = positive("quantum", quantum)?;
        let arrival_time = u64::try_from(arrival_time).map_err(|_| {
            SchedulerError::InvalidParameter {
                field: "arrival_time",
                value: arrival_time,
            }
        })?;

        let name = if name.trim().is_empty() {
            format!("P{}", pid)
        } else {
            name.trim().to_owned()
        };

        Ok(Self {
            pid,
            name,
            cpu_time,
            arrival_time,
            quantum,
            remaining_time: cpu_time,
            status: ProcessStatus::New,
            start_time: None,
            end_time: None,
            waiting_time: 0,
            response_time: None,
        })
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cpu_time(&self) -> u64 {
        self.cpu_time
    }

    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    pub fn remaining_time(&self) -> u64 {
        self.remaining_time
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    pub fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<u64> {
        self.end_time
    }

    pub fn waiting_time(&self) -> u64 {
        self.waiting_time
    }

    pub fn response_time(&self) -> Option<u64> {
        self.response_time
    }

    /// `end_time - arrival_time`, once the process has terminated.
    pub fn turnaround_time(&self) -> Option<u64> {
        self.end_time.map(|end| end - self.arrival_time)
    }

    pub fn is_terminated(&self) -> bool {
        self.status == ProcessStatus::Terminated
    }

    pub(super) fn reset(&mut self) {
        self.remaining_time = self.cpu_time;
        self.status = ProcessStatus::New;
        self.start_time = None;
        self.end_time = None;
        self.waiting_time = 0;
        self.response_time = None;
    }
}

fn positive(field: &'static str, value: i64) -> Result<u64, SchedulerError> {
    match u64::try_from(value) {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(SchedulerError::InvalidParameter { field, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_process_starts_fresh() {
        let process = Process::new(7, "Compiler", 4, 2, 3).unwrap();
        assert_eq!(process.pid(), 7);
        assert_eq!(process.name(), "Compiler");
        assert_eq!(process.remaining_time(), 4);
        assert_eq!(process.status(), ProcessStatus::New);
        assert_eq!(process.start_time(), None);
        assert_eq!(process.waiting_time(), 0);
        assert_eq!(process.turnaround_time(), None);
    }

    #[test]
    fn blank_name_defaults_to_pid() {
        let process = Process::new(3, "  ", 1, 0, 1).unwrap();
        assert_eq!(process.name(), "P3");
    }

    #[test]
    fn rejects_non_positive_burst_and_quantum() {
        assert!(matches!(
            Process::new(1, "a", 0, 0, 1),
            Err(SchedulerError::InvalidParameter { field: "cpu_time", value: 0 })
        ));
        assert!(matches!(
            Process::new(1, "a", 1, 0, -2),
            Err(SchedulerError::InvalidParameter { field: "quantum", value: -2 })
        ));
        assert!(matches!(
            Process::new(1, "a", 1, -1, 1),
            Err(SchedulerError::InvalidParameter { field: "arrival_time", value: -1 })
        ));
    }
}
