use std::fmt::Write;

use crate::scheduler::{timeline::Segment, Statistics};

/// `| P1 0-5 | P3 5-6 | idle 6-7 |`
pub fn format_timeline(segments: &[Segment]) -> String {
    let mut out = String::from("|");
    for segment in segments {
        let label = match segment.pid {
            Some(pid) => format!("P{}", pid),
            None => "idle".to_owned(),
        };
        write!(out, " {} {}-{} |", label, segment.start, segment.end).ok();
    }
    out
}

pub fn format_statistics(stats: &Statistics) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{:<5} {:<16} {:>7} {:>5} {:>5} {:>5} {:>7} {:>8} {:>10}",
        "PID", "NAME", "ARRIVAL", "BURST", "START", "END", "WAITING", "RESPONSE", "TURNAROUND"
    )
    .ok();
    for row in stats.processes.iter() {
        writeln!(
            out,
            "{:<5} {:<16} {:>7} {:>5} {:>5} {:>5} {:>7} {:>8} {:>10}",
            row.pid,
            row.name,
            row.arrival_time,
            row.cpu_time,
            row.start_time,
            row.end_time,
            row.waiting_time,
            row.response_time,
            row.turnaround_time
        )
        .ok();
    }
    writeln!(out, "Average waiting time:    {:.2}", stats.average_waiting_time).ok();
    writeln!(out, "Average response time:   {:.2}", stats.average_response_time).ok();
    writeln!(out, "Average turnaround time: {:.2}", stats.average_turnaround_time).ok();
    write!(out, "Makespan:                {}", stats.makespan).ok();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_labels_idle_gaps() {
        let segments = vec![
            Segment { pid: None, start: 0, end: 2 },
            Segment { pid: Some(4), start: 2, end: 5 },
        ];
        assert_eq!(format_timeline(&segments), "| idle 0-2 | P4 2-5 |");
    }
}
