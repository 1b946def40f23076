use std::fs;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::scheduler::{Algorithm, SchedulerEngine};

pub const DEFAULT_QUANTUM: i64 = 2;

/// One process as written in a workload file or on the command line.
///
/// Values stay signed so that out-of-range input reaches the engine and is
/// reported as a configuration error naming the offending field.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProcessSpec {
    #[serde(default)]
    pub name: String,
    #[serde(alias = "cpuTime", alias = "burst")]
    pub cpu_time: i64,
    #[serde(default, alias = "arrivalTime", alias = "arrival")]
    pub arrival_time: i64,
    #[serde(default)]
    pub quantum: Option<i64>,
}

impl FromStr for ProcessSpec {
    type Err = String;

    /// `NAME:CPU:ARRIVAL[:QUANTUM]`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 3 || parts.len() > 4 {
            return Err(format!(
                "invalid process {:?}: expected NAME:CPU:ARRIVAL[:QUANTUM]",
                s
            ));
        }

        let number = |field: &str, value: &str| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|e| format!("invalid {} {:?} in {:?}: {}", field, value, s, e))
        };

        Ok(Self {
            name: parts[0].to_owned(),
            cpu_time: number("cpu time", parts[1])?,
            arrival_time: number("arrival time", parts[2])?,
            quantum: parts.get(3).map(|q| number("quantum", q)).transpose()?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Workload {
    #[serde(default)]
    pub algorithm: Option<Algorithm>,
    /// Quantum for processes that do not set their own.
    #[serde(default)]
    pub quantum: Option<i64>,
    pub processes: Vec<ProcessSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WorkloadFile {
    Full(Workload),
    Bare(Vec<ProcessSpec>),
}

impl Workload {
    /// Parses inline JSON, or reads it from a file when `input` starts with
    /// `f:` or `file:`. A bare JSON array is taken as the process list.
    pub fn parse(input: &str) -> Result<Self> {
        let content = match input.split_once(':') {
            Some((prefix, path)) if prefix == "f" || prefix == "file" => {
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read workload file {:?}", path))?
            }
            _ => input.to_owned(),
        };

        let file: WorkloadFile =
            serde_json::from_str(&content).context("Failed to parse workload JSON")?;
        Ok(match file {
            WorkloadFile::Full(workload) => workload,
            WorkloadFile::Bare(processes) => Workload {
                processes,
                ..Default::default()
            },
        })
    }

    /// Registers every process with `engine`. Nothing is registered unless
    /// every entry is valid.
    pub fn load_into(&self, engine: &mut SchedulerEngine, default_quantum: i64) -> Result<()> {
        if self.processes.is_empty() {
            bail!("Workload has no processes");
        }

        let default_quantum = self.quantum.unwrap_or(default_quantum);
        let mut staged = engine.clone();
        for (i, spec) in self.processes.iter().enumerate() {
            staged
                .add_process(
                    &spec.name,
                    spec.cpu_time,
                    spec.arrival_time,
                    spec.quantum.unwrap_or(default_quantum),
                )
                .with_context(|| format!("Invalid process #{} {:?}", i + 1, spec.name))?;
        }
        *engine = staged;
        Ok(())
    }
}
