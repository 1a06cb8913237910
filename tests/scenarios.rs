use std::fs;
use std::path::Path;

use cpu_sched::{SimulationRequest, SimulationResult};

fn run(name: &str) -> SimulationResult {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name);
    let text = fs::read_to_string(&path).unwrap();
    let request: SimulationRequest = serde_json::from_str(&text).unwrap();
    request.run().unwrap()
}

#[test]
fn test_fcfs_scenario() {
    let result = run("fcfs.json");
    assert_eq!(result.timeline.to_string(), "P1:0-5 | P2:5-8 | P3:8-16");
    assert!((result.summary.avg_waiting - 10.0 / 3.0).abs() < 1e-10);
}

#[test]
fn test_round_robin_scenario() {
    let result = run("round_robin.json");
    assert_eq!(
        result.timeline.to_string(),
        "P1:0-2 | P2:2-4 | P1:4-6 | P2:6-7 | P1:7-8"
    );
    assert_eq!(result.summary.context_switches, 4);
}

#[test]
fn test_priority_scenario() {
    let result = run("priority.json");
    assert_eq!(
        result.timeline.to_string(),
        "idle:0-2 | P1:2-6 | P2:6-8 | P3:8-14 | P4:14-15"
    );
    assert_eq!(result.summary.idle_time, 2);
    let p3 = result.metrics_for("P3").unwrap();
    assert_eq!((p3.waiting, p3.turnaround), (5, 11));
}

#[test]
fn test_overridden_algorithm_on_scenario() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/fcfs.json");
    let mut request: SimulationRequest =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    request.algorithm = "srtf".into();
    let result = request.run().unwrap();
    // P2 (burst 3) arrives at 1 while P1 has 4 left: preemption.
    assert_eq!(result.timeline.to_string(), "P1:0-1 | P2:1-4 | P1:4-8 | P3:8-16");
}
