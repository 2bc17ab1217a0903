//! Trajectory records and the sinks they are streamed into.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use pd_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::model::{Position, State};

/// One emitted row: time, state and Cartesian position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    pub t: Real,
    pub theta: Real,
    pub theta_dot: Real,
    pub x: Real,
    pub y: Real,
}

impl TrajectoryRecord {
    /// Column names, in output order.
    pub const HEADER: [&'static str; 5] = ["t", "theta", "theta_dot", "x", "y"];

    pub fn new(t: Real, state: &State, position: Position) -> SimResult<Self> {
        Ok(Self {
            t,
            theta: state.get(0)?,
            theta_dot: state.get(1)?,
            x: position.x,
            y: position.y,
        })
    }
}

/// Destination for trajectory records, one call per integration step.
pub trait TrajectorySink {
    fn write_record(&mut self, record: &TrajectoryRecord) -> SimResult<()>;

    /// Flush buffered output. Called once when a run ends, also on error.
    fn finish(&mut self) -> SimResult<()> {
        Ok(())
    }
}

impl<T: TrajectorySink + ?Sized> TrajectorySink for &mut T {
    fn write_record(&mut self, record: &TrajectoryRecord) -> SimResult<()> {
        (**self).write_record(record)
    }

    fn finish(&mut self) -> SimResult<()> {
        (**self).finish()
    }
}

/// Collects records in memory.
#[derive(Clone, Debug, Default)]
pub struct VecSink {
    pub records: Vec<TrajectoryRecord>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&TrajectoryRecord> {
        self.records.last()
    }
}

impl TrajectorySink for VecSink {
    fn write_record(&mut self, record: &TrajectoryRecord) -> SimResult<()> {
        self.records.push(*record);
        Ok(())
    }
}

/// Writes records as CSV with a `t,theta,theta_dot,x,y` header.
///
/// Floats are written in shortest round-trip form, so parsing the file back
/// reproduces every value bit for bit. The underlying csv writer flushes on
/// drop as well, so rows written before an abort are not lost.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl CsvSink<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> SimResult<Self> {
        let file = File::create(path)?;
        Self::new(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap `inner` and write the header row.
    pub fn new(inner: W) -> SimResult<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        writer.write_record(TrajectoryRecord::HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> SimResult<W> {
        self.writer.into_inner().map_err(|e| SimError::Sink {
            message: e.error().to_string(),
        })
    }
}

impl<W: Write> TrajectorySink for CsvSink<W> {
    fn write_record(&mut self, record: &TrajectoryRecord) -> SimResult<()> {
        self.writer.serialize(record)?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> SimResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: Real) -> TrajectoryRecord {
        TrajectoryRecord {
            t,
            theta: 0.1,
            theta_dot: -0.2,
            x: 0.3,
            y: 0.4,
        }
    }

    #[test]
    fn record_from_state() {
        let r = TrajectoryRecord::new(0.5, &State::from([1.0, 2.0]), Position { x: 3.0, y: 4.0 })
            .unwrap();
        assert_eq!(
            r,
            TrajectoryRecord {
                t: 0.5,
                theta: 1.0,
                theta_dot: 2.0,
                x: 3.0,
                y: 4.0
            }
        );
        assert!(TrajectoryRecord::new(0.0, &State::from([1.0]), Position { x: 0.0, y: 0.0 }).is_err());
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.write_record(&sample(0.0)).unwrap();
        sink.write_record(&sample(1.0)).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.last().unwrap().t, 1.0);
    }

    #[test]
    fn csv_sink_writes_header_and_rows() {
        let mut sink = CsvSink::new(Vec::new()).unwrap();
        sink.write_record(&sample(0.0)).unwrap();
        sink.write_record(&sample(0.25)).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.rows(), 2);

        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "t,theta,theta_dot,x,y");
        assert_eq!(lines[1], "0.0,0.1,-0.2,0.3,0.4");
        assert_eq!(lines[2], "0.25,0.1,-0.2,0.3,0.4");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn csv_sink_header_only_when_no_rows() {
        let sink = CsvSink::new(Vec::new()).unwrap();
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(text, "t,theta,theta_dot,x,y\n");
    }

    #[test]
    fn csv_values_round_trip_exactly() {
        let value = std::f64::consts::PI / 7.0;
        let mut sink = CsvSink::new(Vec::new()).unwrap();
        sink.write_record(&TrajectoryRecord {
            t: 1e-300,
            theta: value,
            theta_dot: -value,
            x: 1.0 / 3.0,
            y: 2.0 / 3.0,
        })
        .unwrap();
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let row = text.lines().nth(1).unwrap();
        let parsed: Vec<f64> = row.split(',').map(|f| f.parse().unwrap()).collect();
        assert_eq!(parsed, vec![1e-300, value, -value, 1.0 / 3.0, 2.0 / 3.0]);
    }
}
