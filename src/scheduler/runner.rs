use std::{
    io,
    time::{Duration, Instant},
};

use log::warn;

use super::{display::DisplayTerminal, SchedulerEngine};

pub enum RunnerEvent {
    Quit,
    Pause,
    Resume,
    Step,
    None,
}

/// Interactive driver: ticks the engine on a fixed cadence and redraws the
/// terminal after every input or redraw event.
pub struct ProcessRunner {
    terminal: DisplayTerminal,
    engine: SchedulerEngine,
    tick_rate: Duration,
    last_tick: Instant,
    history: Vec<String>,
    paused: bool,
}

impl ProcessRunner {
    /// `engine` must already have a run started.
    pub fn new(engine: SchedulerEngine, tick_rate: Duration) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new()?;

        Ok(Self {
            terminal,
            engine,
            tick_rate,
            last_tick: Instant::now(),
            history: Vec::new(),
            paused: false,
        })
    }

    fn step(&mut self) {
        if self.engine.is_complete() {
            return;
        }
        match self.engine.tick() {
            Ok(result) => self.history.extend(result.history()),
            Err(e) => warn!("Tick rejected: {}", e),
        }
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> Result<bool, io::Error> {
        if !self.paused && self.last_tick.elapsed() >= self.tick_rate {
            self.last_tick = Instant::now();
            self.step();
        }
        self.terminal
            .draw(&self.engine, &self.history, self.paused)?;

        let event = self
            .terminal
            .get_input()
            .map_err(|e| io::Error::new(io::ErrorKind::BrokenPipe, e))?;
        match event {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Pause if !self.paused => self.paused = true,
            RunnerEvent::Resume if self.paused => {
                self.paused = false;
                self.last_tick = Instant::now();
            }
            RunnerEvent::Step if self.paused => self.step(),
            _ => {}
        }
        Ok(true)
    }

    /// Hands the engine back, e.g. to print the final report.
    pub fn into_engine(self) -> SchedulerEngine {
        self.engine
    }
}
