use std::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input or a run that cannot be started as requested.
    Configuration,
    /// An operation issued in the wrong phase of a run.
    Sequencing,
    /// Averages requested over an empty set.
    Arithmetic,
}

/// Every rejected engine operation reports one of these. The engine state is
/// left untouched when an error is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    InvalidParameter { field: &'static str, value: i64 },
    NoProcesses,
    AlreadyRunning,
    RunInProgress,
    NotStarted,
    RunComplete,
    RunIncomplete { finished: usize, total: usize },
    NoFinishedProcesses,
}

impl SchedulerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchedulerError::InvalidParameter { .. }
            | SchedulerError::NoProcesses
            | SchedulerError::AlreadyRunning => ErrorKind::Configuration,
            SchedulerError::RunInProgress
            | SchedulerError::NotStarted
            | SchedulerError::RunComplete
            | SchedulerError::RunIncomplete { .. } => ErrorKind::Sequencing,
            SchedulerError::NoFinishedProcesses => ErrorKind::Arithmetic,
        }
    }
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::InvalidParameter { field, value } => {
                let bound = if *field == "arrival_time" { 0 } else { 1 };
                write!(f, "invalid {}: {} (must be >= {})", field, value, bound)
            }
            SchedulerError::NoProcesses => write!(f, "no processes to simulate"),
            SchedulerError::AlreadyRunning => {
                write!(f, "a run is already in progress; stop or reset it first")
            }
            SchedulerError::RunInProgress => {
                write!(f, "the process set cannot change while a run is in progress")
            }
            SchedulerError::NotStarted => write!(f, "no run has been started"),
            SchedulerError::RunComplete => write!(f, "the run has already completed"),
            SchedulerError::RunIncomplete { finished, total } => write!(
                f,
                "the run is not complete ({} of {} processes finished)",
                finished, total
            ),
            SchedulerError::NoFinishedProcesses => {
                write!(f, "no finished processes to average over")
            }
        }
    }
}

impl Error for SchedulerError {}
