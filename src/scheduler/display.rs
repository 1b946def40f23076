use super::{runner::RunnerEvent, ProcessStatus, RunPhase, SchedulerEngine};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver, RecvError},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Spans,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const TICK_RATE: Duration = Duration::from_millis(200);
const HISTORY_LINES: usize = 8;

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(_) => return,
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(
        &mut self,
        engine: &SchedulerEngine,
        history: &[String],
        paused: bool,
    ) -> Result<(), io::Error> {
        let title = format!(
            "{} | T{} | {}",
            engine.algorithm(),
            engine.current_time(),
            match (engine.phase(), paused) {
                (RunPhase::Complete, _) => "complete",
                (RunPhase::Idle, _) => "stopped",
                (RunPhase::Running, true) => "paused (s: step, r: resume)",
                (RunPhase::Running, false) => "running (p: pause)",
            }
        );

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(5),
                    Constraint::Length(3),
                    Constraint::Length(HISTORY_LINES as u16 + 2),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let current = Paragraph::new(match engine.current_process() {
                Some(process) => format!(
                    "{} | {} | Remaining: {} | Quantum used: {}/{}",
                    process.pid(),
                    process.name(),
                    process.remaining_time(),
                    engine.quantum_counter(),
                    process.quantum()
                ),
                None => "No process is currently running.".to_owned(),
            })
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("CPU")
                    .border_type(BorderType::Rounded),
            );

            f.render_widget(current, chunks[0]);

            let items = engine.processes().iter().map(|process| {
                let style = match process.status() {
                    ProcessStatus::Running => Style::default().fg(Color::LightBlue),
                    ProcessStatus::Terminated => Style::default().fg(Color::DarkGray),
                    _ => Style::default(),
                };
                Row::new(vec![
                    Cell::from(process.pid().to_string())
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(process.name().to_owned()),
                    Cell::from(process.status().to_string()),
                    Cell::from(process.arrival_time().to_string()),
                    Cell::from(process.cpu_time().to_string()),
                    Cell::from(process.remaining_time().to_string()),
                    Cell::from(process.waiting_time().to_string()),
                    Cell::from(
                        process
                            .response_time()
                            .map_or_else(|| "-".to_owned(), |r| r.to_string()),
                    ),
                    Cell::from(
                        process
                            .end_time()
                            .map_or_else(|| "-".to_owned(), |e| e.to_string()),
                    ),
                ])
                .style(style)
            });

            let table = Table::new(items)
                .header(
                    Row::new(vec![
                        "PID", "Name", "Status", "Arrival", "Burst", "Left", "Waiting", "Response",
                        "End",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(4),
                    Constraint::Length(16),
                    Constraint::Length(10),
                    Constraint::Length(7),
                    Constraint::Length(5),
                    Constraint::Length(4),
                    Constraint::Length(7),
                    Constraint::Length(8),
                    Constraint::Length(4),
                ])
                .block(Block::default().title(title.as_str()).borders(Borders::ALL))
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[1]);

            let ready: Vec<String> = engine
                .ready_queue()
                .map(|process| format!("{}({})", process.name(), process.remaining_time()))
                .collect();
            let ready = Paragraph::new(if ready.is_empty() {
                "empty".to_owned()
            } else {
                ready.join(" <- ")
            })
            .block(Block::default().title("Ready queue").borders(Borders::ALL));

            f.render_widget(ready, chunks[2]);

            let skip = history.len().saturating_sub(HISTORY_LINES);
            let lines: Vec<Spans> = history[skip..]
                .iter()
                .map(|line| Spans::from(line.as_str()))
                .collect();
            let log = Paragraph::new(lines)
                .block(Block::default().title("History").borders(Borders::ALL));

            f.render_widget(log, chunks[3]);

            let summary = match engine.statistics() {
                Ok(stats) => format!(
                    "Avg waiting {:.2} | Avg response {:.2} | Avg turnaround {:.2}",
                    stats.average_waiting_time,
                    stats.average_response_time,
                    stats.average_turnaround_time
                ),
                Err(_) => format!(
                    "{}/{} finished | q: quit",
                    engine.finished().count(),
                    engine.processes().len()
                ),
            };
            let summary = Paragraph::new(summary)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(Block::default().title("Statistics").borders(Borders::ALL));

            f.render_widget(summary, chunks[4]);
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> Result<RunnerEvent, RecvError> {
        // Get the user's input and return a matching event
        match self.input_rx.recv()? {
            DisplayEvent::Input(key) => {
                if key.modifiers.is_empty() {
                    match key.code {
                        KeyCode::Char('q') => return Ok(RunnerEvent::Quit),
                        KeyCode::Char('p') => return Ok(RunnerEvent::Pause),
                        KeyCode::Char('r') => return Ok(RunnerEvent::Resume),
                        KeyCode::Char('s') => return Ok(RunnerEvent::Step),
                        _ => {}
                    };
                }
            }
            DisplayEvent::Tick => {}
        }
        Ok(RunnerEvent::None)
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}
