#![allow(dead_code)]

use cpu_scheduling_simulator::scheduler::{Algorithm, SchedulerEngine, TickResult};

pub const ALGORITHMS: [Algorithm; 4] = [
    Algorithm::Fcfs,
    Algorithm::Sjf,
    Algorithm::Srtf,
    Algorithm::RoundRobin,
];

/// (name, cpu_time, arrival_time, quantum)
pub type Spec = (&'static str, i64, i64, i64);

pub fn engine_with(specs: &[Spec]) -> SchedulerEngine {
    let mut engine = SchedulerEngine::new();
    for &(name, cpu, arrival, quantum) in specs {
        engine.add_process(name, cpu, arrival, quantum).unwrap();
    }
    engine
}

pub fn run(specs: &[Spec], algorithm: Algorithm) -> (SchedulerEngine, Vec<TickResult>) {
    let mut engine = engine_with(specs);
    engine.start_run(algorithm).unwrap();
    let trace = engine.run_to_completion().unwrap();
    (engine, trace)
}

/// P1(cpu=5, arr=0), P2(cpu=3, arr=1), P3(cpu=1, arr=2), all with quantum 2.
pub fn three_processes() -> Vec<Spec> {
    vec![("P1", 5, 0, 2), ("P2", 3, 1, 2), ("P3", 1, 2, 2)]
}

/// xorshift64 generator for reproducible workloads.
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1)
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0 % bound
    }

    pub fn between(&mut self, low: i64, high: i64) -> i64 {
        low + self.below((high - low + 1) as u64) as i64
    }
}

pub fn random_engine(seed: u64) -> SchedulerEngine {
    let mut rng = Rng::new(seed);
    let mut engine = SchedulerEngine::new();
    let count = rng.between(1, 8);
    for i in 0..count {
        engine
            .add_process(
                &format!("job{}", i),
                rng.between(1, 10),
                rng.between(0, 12),
                rng.between(1, 4),
            )
            .unwrap();
    }
    engine
}
