use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

/// Destination for structured log rows.
///
/// Pushing a row never fails: sinks that can fail hold on to the first error
/// and report it when they are finished, so a broken log never changes the
/// outcome of the computation that produced it.
pub trait RowSink<R> {
    fn push_row(&mut self, row: R);
}

impl<R> RowSink<R> for Vec<R> {
    fn push_row(&mut self, row: R) {
        self.push(row);
    }
}

/// Writes each row as one JSON object per line, fields in declaration order.
pub struct JsonLinesWriter<W: Write> {
    writer: W,
    rows_written: usize,
    error: Option<anyhow::Error>,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows_written: 0,
            error: None,
        }
    }

    pub fn write_row<R: Serialize>(&mut self, row: &R) -> Result<()> {
        serde_json::to_writer(&mut self.writer, row)?;
        self.writer.write_all(b"\n")?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flushes and returns the inner writer, or the first error hit while pushing rows.
    pub fn finish(mut self) -> Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl JsonLinesWriter<BufWriter<File>> {
    /// Creates (or truncates) `path`, creating parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write, R: Serialize> RowSink<R> for JsonLinesWriter<W> {
    fn push_row(&mut self, row: R) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_row(&row) {
            self.error = Some(e);
        }
    }
}

/// Parses JSON-lines text, skipping blank lines.
pub fn read_json_lines<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid JSON on line {}", i + 1))
        })
        .collect()
}
