//! Result rendering.
//!
//! Workers hand each finished result to a shared [`ResultSink`]. In `stdout` mode
//! the console block is written immediately under the sink's lock so blocks from
//! concurrent workers never interleave; in `json` mode results are collected and
//! written as one array by [`ResultSink::finish`].

mod console;

use std::io::Write;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use crate::assess::AssessmentResult;
use crate::config::OutputFormat;

pub use console::render_block;

struct SinkState<W> {
    writer: W,
    collected: Vec<AssessmentResult>,
}

/// Single writer shared by all workers.
pub struct ResultSink<W> {
    format: OutputFormat,
    state: Mutex<SinkState<W>>,
}

impl<W: Write + Send> ResultSink<W> {
    pub fn new(format: OutputFormat, writer: W) -> Self {
        Self {
            format,
            state: Mutex::new(SinkState {
                writer,
                collected: Vec::new(),
            }),
        }
    }

    /// Records one result.
    ///
    /// # Errors
    ///
    /// Returns an error if the console block cannot be written.
    pub async fn emit(&self, result: AssessmentResult) -> Result<()> {
        let mut state = self.state.lock().await;
        match self.format {
            OutputFormat::Stdout => {
                let block = render_block(&result);
                writeln!(state.writer, "{block}").context("Failed to write result")?;
                state.writer.flush().context("Failed to flush output")?;
            }
            OutputFormat::Json => state.collected.push(result),
        }
        Ok(())
    }

    /// Writes the collected JSON array; a no-op in `stdout` mode.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn finish(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if self.format != OutputFormat::Json {
            return Ok(());
        }
        let SinkState { writer, collected } = &mut *state;
        serde_json::to_writer_pretty(&mut *writer, &*collected)
            .context("Failed to serialize results")?;
        writeln!(writer).context("Failed to write result")?;
        writer.flush().context("Failed to flush output")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.state.into_inner().writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(domain: &str, code: u8) -> AssessmentResult {
        AssessmentResult {
            domain: domain.to_string(),
            spoofing_code: Some(code),
            ..AssessmentResult::default()
        }
    }

    #[tokio::test]
    async fn test_stdout_sink_writes_immediately() {
        let sink = ResultSink::new(OutputFormat::Stdout, Vec::new());
        sink.emit(result("a.example", 0)).await.unwrap();
        sink.emit(result("b.example", 8)).await.unwrap();
        sink.finish().await.unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("Domain: a.example"));
        assert!(text.contains("Domain: b.example"));
        assert!(text.find("a.example") < text.find("b.example"));
    }

    #[tokio::test]
    async fn test_json_sink_writes_one_array() {
        let sink = ResultSink::new(OutputFormat::Json, Vec::new());
        sink.emit(result("a.example", 0)).await.unwrap();
        sink.emit(result("b.example", 3)).await.unwrap();
        assert!(sink.state.lock().await.writer.is_empty());
        sink.finish().await.unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[1]["domain"], "b.example");
        assert_eq!(array[1]["spoofing_code"], 3);
    }

    #[tokio::test]
    async fn test_json_sink_empty_run() {
        let sink = ResultSink::new(OutputFormat::Json, Vec::new());
        sink.finish().await.unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap().trim(), "[]");
    }
}
