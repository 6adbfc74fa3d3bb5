use std::fs;
use waypoint_algorithms::{DijkstraTrace, HillClimbTrace};
use waypoint_graph::Graph;
use waypoint_runtime::*;
use waypoint_utils::read_json_lines;

fn cycle_graph() -> Graph {
    [
        ("A", "B", 1.0),
        ("B", "C", 1.0),
        ("C", "D", 1.0),
        ("D", "A", 1.0),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_directory_log_writes_all_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("outdir");
    let g = cycle_graph();
    let mut settings = ExperimentSettings::new("A", "C", Some("B"));
    settings.num_runs = 3;
    settings.seed = Some(17);

    let mut log = DirectoryLog::create(&out).unwrap();
    assert_eq!(log.dir(), out.as_path());
    let outcome = Experiment::new(&g, settings).unwrap().run(&mut log);
    log.finish().unwrap();

    let summary: Vec<TrialRecord> =
        read_json_lines(&fs::read_to_string(out.join(SUMMARY_FILE)).unwrap()).unwrap();
    assert_eq!(summary.len(), 6);
    assert!(summary.iter().all(|r| r.success && r.final_cost == 2.0));

    let dijkstra: Vec<DijkstraTrace> =
        read_json_lines(&fs::read_to_string(out.join(DIJKSTRA_TRACE_FILE)).unwrap()).unwrap();
    assert_eq!(dijkstra.last().unwrap().popped_node, "C");

    for run in &outcome.hill_climbing {
        let rows: Vec<HillClimbTrace> = read_json_lines(
            &fs::read_to_string(out.join(hill_climbing_trace_file(run.run))).unwrap(),
        )
        .unwrap();
        assert_eq!(rows.len(), run.result.iterations + 1);
        assert_eq!(rows.last().unwrap().cost, run.result.cost);
    }
}

#[test]
fn test_directory_log_writes_infinite_cost() {
    let dir = tempfile::tempdir().unwrap();
    let g = cycle_graph();
    let mut settings = ExperimentSettings::new("A", "C", None);
    settings.num_runs = 1;
    settings.seed = Some(1);
    // Avoiding the start makes every trial fail.
    settings.avoid = Some("A".to_string());

    let mut log = DirectoryLog::create(dir.path()).unwrap();
    Experiment::new(&g, settings).unwrap().run(&mut log);
    log.finish().unwrap();

    let text = fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
    assert!(text.contains(r#""final_cost":"inf""#));
    let summary: Vec<TrialRecord> = read_json_lines(&text).unwrap();
    assert_eq!(summary.len(), 2);
    assert!(summary
        .iter()
        .all(|r| !r.success && r.final_cost == f64::INFINITY));
    assert!(!dir.path().join(hill_climbing_trace_file(0)).exists());
}

#[test]
fn test_hill_climbing_trace_file_name() {
    assert_eq!(hill_climbing_trace_file(4), "hill_climbing_run_4_trace.jsonl");
}

#[test]
fn test_directory_log_reports_unusable_directory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let err = DirectoryLog::create(blocker.join("outdir"))
        .err()
        .unwrap();
    assert!(err.to_string().contains("Failed to create output directory"));
}
