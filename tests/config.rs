use std::io::Write;

use cpu_scheduling_simulator::config::{ProcessSpec, Workload};
use cpu_scheduling_simulator::scheduler::{Algorithm, SchedulerEngine};

#[test]
fn parses_process_flags() {
    let spec: ProcessSpec = "Compiler:4:2:3".parse().unwrap();
    assert_eq!(
        spec,
        ProcessSpec {
            name: "Compiler".to_owned(),
            cpu_time: 4,
            arrival_time: 2,
            quantum: Some(3),
        }
    );

    let spec: ProcessSpec = "Editor:2:0".parse().unwrap();
    assert_eq!(spec.quantum, None);

    assert!("Editor:2".parse::<ProcessSpec>().is_err());
    assert!("Editor:two:0".parse::<ProcessSpec>().is_err());
}

#[test]
fn parses_inline_workload_with_camel_case_fields() {
    let workload = Workload::parse(
        r#"{
            "algorithm": "rr",
            "quantum": 3,
            "processes": [
                { "name": "Browser", "cpuTime": 5, "arrivalTime": 0 },
                { "name": "Game", "cpu_time": 2, "arrival_time": 1, "quantum": 1 }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(workload.algorithm, Some(Algorithm::RoundRobin));
    assert_eq!(workload.processes.len(), 2);

    let mut engine = SchedulerEngine::new();
    workload.load_into(&mut engine, 2).unwrap();
    assert_eq!(engine.processes()[0].quantum(), 3);
    assert_eq!(engine.processes()[1].quantum(), 1);
}

#[test]
fn reads_workload_files_and_bare_lists() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{ "name": "A", "cpu_time": 3 }}, {{ "name": "B", "cpu_time": 1, "arrival_time": 2 }}]"#
    )
    .unwrap();

    let input = format!("file:{}", file.path().display());
    let workload = Workload::parse(&input).unwrap();
    assert_eq!(workload.algorithm, None);
    assert_eq!(workload.processes[0].arrival_time, 0);

    let mut engine = SchedulerEngine::new();
    workload.load_into(&mut engine, 4).unwrap();
    engine.start_run(Algorithm::Sjf).unwrap();
    engine.run_to_completion().unwrap();
    assert_eq!(engine.statistics().unwrap().makespan, 4);
}

#[test]
fn negative_values_become_configuration_errors() {
    let workload = Workload::parse(
        r#"{ "processes": [{ "name": "bad", "cpu_time": 2, "arrival_time": -3 }] }"#,
    )
    .unwrap();

    let mut engine = SchedulerEngine::new();
    let err = workload.load_into(&mut engine, 2).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid arrival_time: -3"));
    assert!(engine.processes().is_empty());
}

#[test]
fn invalid_entry_registers_nothing() {
    let workload = Workload::parse(
        r#"[
            { "name": "A", "cpu_time": 3 },
            { "name": "B", "cpu_time": 0 },
            { "name": "C", "cpu_time": 1 }
        ]"#,
    )
    .unwrap();

    let mut engine = SchedulerEngine::new();
    engine.add_process("existing", 2, 0, 1).unwrap();

    let err = workload.load_into(&mut engine, 2).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid process #2 \"B\""));
    assert_eq!(engine.processes().len(), 1);
    assert_eq!(engine.processes()[0].name(), "existing");

    // The failed load does not consume pids.
    assert_eq!(engine.add_process("next", 1, 0, 1).unwrap().pid(), 2);
}

#[test]
fn rejects_missing_files_and_bad_json() {
    assert!(Workload::parse("f:/nonexistent/workload.json").is_err());
    assert!(Workload::parse("{ not json").is_err());
    assert!(Workload::parse(r#"{ "algorithm": "lottery", "processes": [] }"#).is_err());
    assert!(Workload::parse(r#"{ "processes": [] }"#)
        .unwrap()
        .load_into(&mut SchedulerEngine::new(), 2)
        .is_err());
}
