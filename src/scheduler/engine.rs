use super::{
    error::SchedulerError,
    events::{Event, PreemptReason, TickResult},
    process::{Pid, Process, ProcessStatus},
    stats::Statistics,
    Algorithm,
};
use log::{debug, info, trace};
use std::collections::VecDeque;

pub type RunId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Complete,
}

/// Discrete-time simulation of a single CPU.
///
/// The engine owns the process table and every queue. A driver starts a run
/// and calls [`SchedulerEngine::tick`] on whatever cadence it likes; each call
/// is one complete simulated time unit.
#[derive(Clone)]
pub struct SchedulerEngine {
    processes: Vec<Process>,
    ready: VecDeque<usize>,
    current: Option<usize>,
    finished: Vec<usize>,
    current_time: u64,
    quantum_counter: u64,
    algorithm: Algorithm,
    phase: RunPhase,
    next_pid: Pid,
    runs: RunId,
}

impl Default for SchedulerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerEngine {
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            ready: VecDeque::new(),
            current: None,
            finished: Vec::new(),
            current_time: 0,
            quantum_counter: 0,
            algorithm: Algorithm::default(),
            phase: RunPhase::Idle,
            next_pid: 1,
            runs: 0,
        }
    }

    pub fn add_process(
        &mut self,
        name: &str,
        cpu_time: i64,
        arrival_time: i64,
        quantum: i64,
    ) -> Result<&Process, SchedulerError> {
        if self.phase == RunPhase::Running {
            return Err(SchedulerError::RunInProgress);
        }

        let process = Process::new(self.next_pid, name, cpu_time, arrival_time, quantum)?;
        self.next_pid += 1;
        debug!(
            "Created {} (pid {}, burst {}, arrival {}, quantum {})",
            process.name(),
            process.pid(),
            process.cpu_time(),
            process.arrival_time(),
            process.quantum()
        );
        self.processes.push(process);
        // Results of a previous run no longer cover the whole process set.
        self.reset();
        Ok(&self.processes[self.processes.len() - 1])
    }

    pub fn remove_process(&mut self, pid: Pid) -> Result<bool, SchedulerError> {
        if self.phase == RunPhase::Running {
            return Err(SchedulerError::RunInProgress);
        }

        match self.processes.iter().position(|process| process.pid() == pid) {
            Some(index) => {
                let process = self.processes.remove(index);
                debug!("Removed {} (pid {})", process.name(), pid);
                // Queue indices from a finished run no longer line up.
                self.reset();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Resets every runtime field and begins a new run under `algorithm`.
    pub fn start_run(&mut self, algorithm: Algorithm) -> Result<RunId, SchedulerError> {
        if self.phase == RunPhase::Running {
            return Err(SchedulerError::AlreadyRunning);
        }
        if self.processes.is_empty() {
            return Err(SchedulerError::NoProcesses);
        }

        self.reset();
        self.processes
            .sort_by_key(|process| (process.arrival_time(), process.pid()));
        self.algorithm = algorithm;
        self.phase = RunPhase::Running;
        self.runs += 1;

        info!(
            "Run {} started with {} over {} processes",
            self.runs,
            algorithm,
            self.processes.len()
        );
        Ok(self.runs)
    }

    /// Abandons the run in progress. Finished processes keep their results.
    pub fn stop(&mut self) {
        if self.phase == RunPhase::Running {
            info!(
                "Run {} stopped at T{} with {}/{} processes finished",
                self.runs,
                self.current_time,
                self.finished.len(),
                self.processes.len()
            );
            self.phase = RunPhase::Idle;
        }
    }

    /// Puts every process back in `new` and clears the clock and queues.
    pub fn reset(&mut self) {
        for process in self.processes.iter_mut() {
            process.reset();
        }
        self.clear_run_state();
        self.phase = RunPhase::Idle;
    }

    fn clear_run_state(&mut self) {
        self.ready.clear();
        self.current = None;
        self.finished.clear();
        self.current_time = 0;
        self.quantum_counter = 0;
    }

    /// Simulates one time unit.
    ///
    /// Tick `k` covers `[k - 1, k)`: processes that arrived before the end of
    /// the previous unit are admitted, the policy picks who runs, the running
    /// process executes for one unit and every process left in the ready queue
    /// is charged one unit of waiting, including one just re-queued after its
    /// quantum expired.
    pub fn tick(&mut self) -> Result<TickResult, SchedulerError> {
        match self.phase {
            RunPhase::Idle => return Err(SchedulerError::NotStarted),
            RunPhase::Complete => return Err(SchedulerError::RunComplete),
            RunPhase::Running => {}
        }

        self.current_time += 1;
        let mut events = Vec::new();

        self.admit_arrivals(&mut events);
        self.schedule(&mut events);
        let executed = self.execute(&mut events);

        for &index in self.ready.iter() {
            self.processes[index].waiting_time += 1;
        }

        let complete = self.finished.len() == self.processes.len();
        if complete {
            self.phase = RunPhase::Complete;
        }

        for event in events.iter() {
            debug!("[T{}] {}", self.current_time, event);
        }
        trace!("[T{}] ready queue {:?}", self.current_time, self.ready_pids());
        if complete {
            info!("Run {} complete at T{}", self.runs, self.current_time);
        }

        Ok(TickResult {
            time: self.current_time,
            executed: executed.map(|index| self.processes[index].pid()),
            running: self.current.map(|index| self.processes[index].pid()),
            events,
            ready: self.ready_pids(),
            complete,
        })
    }

    /// Ticks a started run until every process has finished.
    pub fn run_to_completion(&mut self) -> Result<Vec<TickResult>, SchedulerError> {
        let mut trace = Vec::new();
        loop {
            let result = self.tick()?;
            let complete = result.complete;
            trace.push(result);
            if complete {
                return Ok(trace);
            }
        }
    }

    fn admit_arrivals(&mut self, events: &mut Vec<Event>) {
        for (index, process) in self.processes.iter_mut().enumerate() {
            if process.status == ProcessStatus::New
                && process.arrival_time() < self.current_time
            {
                process.status = ProcessStatus::Ready;
                self.ready.push_back(index);
                events.push(Event::Arrived { pid: process.pid() });
            }
        }
    }

    fn schedule(&mut self, events: &mut Vec<Event>) {
        let policy = self.algorithm.policy();
        policy.order(&mut self.ready, &self.processes, self.current.is_none());

        if let (Some(current), Some(&head)) = (self.current, self.ready.front()) {
            if policy.preempts(&self.processes[current], &self.processes[head]) {
                events.push(Event::Preempted {
                    pid: self.processes[current].pid(),
                    reason: PreemptReason::ShorterRemaining {
                        by: self.processes[head].pid(),
                    },
                });
                self.requeue(current);
                policy.order(&mut self.ready, &self.processes, true);
            }
        }

        if self.current.is_none() {
            if let Some(next) = self.ready.pop_front() {
                self.dispatch(next, events);
            }
        }
    }

    fn dispatch(&mut self, index: usize, events: &mut Vec<Event>) {
        let now = self.current_time - 1;
        let process = &mut self.processes[index];
        let first = process.start_time.is_none();

        process.status = ProcessStatus::Running;
        if first {
            process.start_time = Some(now);
            process.response_time = Some(now - process.arrival_time());
        }
        self.current = Some(index);
        self.quantum_counter = 0;
        events.push(Event::Dispatched {
            pid: process.pid(),
            first,
        });
    }

    fn execute(&mut self, events: &mut Vec<Event>) -> Option<usize> {
        let index = self.current?;
        let policy = self.algorithm.policy();

        self.processes[index].remaining_time -= 1;
        self.quantum_counter += 1;

        let process = &mut self.processes[index];
        if process.remaining_time == 0 {
            process.status = ProcessStatus::Terminated;
            process.end_time = Some(self.current_time);
            events.push(Event::Completed { pid: process.pid() });
            self.finished.push(index);
            self.current = None;
            self.quantum_counter = 0;
        } else if policy.slice_expired(process, self.quantum_counter) {
            events.push(Event::Preempted {
                pid: process.pid(),
                reason: PreemptReason::QuantumExpired,
            });
            self.requeue(index);
        }

        Some(index)
    }

    fn requeue(&mut self, index: usize) {
        self.processes[index].status = ProcessStatus::Ready;
        self.ready.push_back(index);
        self.current = None;
        self.quantum_counter = 0;
    }

    /// Averages over the whole process set; only valid once the run is
    /// complete.
    pub fn statistics(&self) -> Result<Statistics, SchedulerError> {
        match self.phase {
            RunPhase::Complete => self.partial_statistics(),
            _ if self.runs == 0 => Err(SchedulerError::NotStarted),
            _ => Err(SchedulerError::RunIncomplete {
                finished: self.finished.len(),
                total: self.processes.len(),
            }),
        }
    }

    /// Statistics over whichever processes have finished so far.
    pub fn partial_statistics(&self) -> Result<Statistics, SchedulerError> {
        Statistics::compute(self.finished())
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|process| process.pid() == pid)
    }

    pub fn current_process(&self) -> Option<&Process> {
        self.current.map(|index| &self.processes[index])
    }

    pub fn ready_queue(&self) -> impl Iterator<Item = &Process> + '_ {
        self.ready.iter().map(move |&index| &self.processes[index])
    }

    /// Finished processes in completion order.
    pub fn finished(&self) -> impl Iterator<Item = &Process> + '_ {
        self.finished.iter().map(move |&index| &self.processes[index])
    }

    fn ready_pids(&self) -> Vec<Pid> {
        self.ready_queue().map(Process::pid).collect()
    }

    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    pub fn quantum_counter(&self) -> u64 {
        self.quantum_counter
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RunPhase::Complete
    }
}
