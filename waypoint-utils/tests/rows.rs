use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use waypoint_utils::*;

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
struct Step {
    iter: usize,
    node: String,
}

fn steps() -> Vec<Step> {
    vec![
        Step {
            iter: 1,
            node: "York".to_string(),
        },
        Step {
            iter: 2,
            node: "Leeds".to_string(),
        },
    ]
}

#[test]
fn test_vec_sink_collects_rows() {
    let mut sink: Vec<Step> = Vec::new();
    for step in steps() {
        sink.push_row(step);
    }
    assert_eq!(sink, steps());
}

#[test]
fn test_json_lines_keep_field_order() {
    let mut writer = JsonLinesWriter::new(Vec::new());
    for step in steps() {
        writer.push_row(step);
    }
    assert_eq!(writer.rows_written(), 2);
    let bytes = writer.finish().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(
        text,
        "{\"iter\":1,\"node\":\"York\"}\n{\"iter\":2,\"node\":\"Leeds\"}\n"
    );
    assert_eq!(read_json_lines::<Step>(&text).unwrap(), steps());
}

#[test]
fn test_create_makes_parent_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("trace.jsonl");
    let mut writer = JsonLinesWriter::create(&path).unwrap();
    writer.push_row(steps()[0].clone());
    writer.finish().unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(read_json_lines::<Step>(&text).unwrap(), vec![steps()[0].clone()]);
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_errors_surface_on_finish() {
    let mut writer = JsonLinesWriter::new(BrokenPipe);
    for step in steps() {
        writer.push_row(step);
    }
    assert_eq!(writer.rows_written(), 0);
    assert!(writer.finish().is_err());
}

#[test]
fn test_read_json_lines_reports_line() {
    let err = read_json_lines::<Step>("{\"iter\":1,\"node\":\"A\"}\n\nnot json\n").unwrap_err();
    assert!(err.to_string().contains("line 3"));
}
