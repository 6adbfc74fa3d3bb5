use crate::harness::TrialRecord;
use anyhow::{Context, Result};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};
use waypoint_algorithms::{DijkstraTrace, HillClimbTrace};
use waypoint_utils::{JsonLinesWriter, RowSink};

/// Where an experiment writes its summary and per-iteration rows.
///
/// Writes are infallible from the harness's point of view. Implementations
/// that do I/O keep the first error and report it when finished.
pub trait ExperimentLog {
    fn record(&mut self, record: TrialRecord);
    fn dijkstra_row(&mut self, row: DijkstraTrace);
    fn hill_climbing_row(&mut self, run: usize, row: HillClimbTrace);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    pub records: Vec<TrialRecord>,
    pub dijkstra: Vec<DijkstraTrace>,
    pub hill_climbing: BTreeMap<usize, Vec<HillClimbTrace>>,
}

impl ExperimentLog for MemoryLog {
    fn record(&mut self, record: TrialRecord) {
        self.records.push(record);
    }

    fn dijkstra_row(&mut self, row: DijkstraTrace) {
        self.dijkstra.push(row);
    }

    fn hill_climbing_row(&mut self, run: usize, row: HillClimbTrace) {
        self.hill_climbing.entry(run).or_default().push(row);
    }
}

type FileWriter = JsonLinesWriter<BufWriter<File>>;

pub const SUMMARY_FILE: &str = "summary.jsonl";
pub const DIJKSTRA_TRACE_FILE: &str = "dijkstra_trace.jsonl";

pub fn hill_climbing_trace_file(run: usize) -> String {
    format!("hill_climbing_run_{}_trace.jsonl", run)
}

/// JSON-lines files under one output directory.
///
/// Trace files are opened on their first row, so a trial that never produced
/// a trace leaves no file behind. Only one hill-climbing trace is open at a time.
pub struct DirectoryLog {
    dir: PathBuf,
    summary: FileWriter,
    dijkstra: Option<FileWriter>,
    hill_climbing: Option<(usize, FileWriter)>,
    error: Option<anyhow::Error>,
}

impl DirectoryLog {
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        let summary = JsonLinesWriter::create(dir.join(SUMMARY_FILE))?;
        Ok(Self {
            dir,
            summary,
            dijkstra: None,
            hill_climbing: None,
            error: None,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn finish(mut self) -> Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.summary.finish()?;
        if let Some(writer) = self.dijkstra.take() {
            writer.finish()?;
        }
        if let Some((_, writer)) = self.hill_climbing.take() {
            writer.finish()?;
        }
        Ok(())
    }

    fn keep_error(&mut self, result: Result<()>) {
        if let Err(e) = result {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }

    fn hill_climbing_writer(&mut self, run: usize) -> Result<&mut FileWriter> {
        let writer = match self.hill_climbing.take() {
            Some((open, writer)) if open == run => writer,
            previous => {
                if let Some((_, writer)) = previous {
                    writer.finish()?;
                }
                JsonLinesWriter::create(self.dir.join(hill_climbing_trace_file(run)))?
            }
        };
        Ok(&mut self.hill_climbing.insert((run, writer)).1)
    }
}

impl ExperimentLog for DirectoryLog {
    fn record(&mut self, record: TrialRecord) {
        if self.error.is_some() {
            return;
        }
        let result = self.summary.write_row(&record);
        self.keep_error(result);
    }

    fn dijkstra_row(&mut self, row: DijkstraTrace) {
        if self.error.is_some() {
            return;
        }
        if self.dijkstra.is_none() {
            match JsonLinesWriter::create(self.dir.join(DIJKSTRA_TRACE_FILE)) {
                Ok(writer) => self.dijkstra = Some(writer),
                Err(e) => {
                    self.keep_error(Err(e));
                    return;
                }
            }
        }
        if let Some(writer) = self.dijkstra.as_mut() {
            writer.push_row(row);
        }
    }

    fn hill_climbing_row(&mut self, run: usize, row: HillClimbTrace) {
        if self.error.is_some() {
            return;
        }
        let result = self
            .hill_climbing_writer(run)
            .and_then(|writer| writer.write_row(&row));
        self.keep_error(result);
    }
}
