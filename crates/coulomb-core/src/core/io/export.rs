use crate::core::sampling::overlay::{FieldSegment, PotentialCell};
use crate::workflows::measure::Measurement;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct SegmentRow {
    x: f64,
    y: f64,
    ex: f64,
    ey: f64,
    tip_x: f64,
    tip_y: f64,
}

impl From<&FieldSegment> for SegmentRow {
    fn from(s: &FieldSegment) -> Self {
        Self {
            x: s.origin.x,
            y: s.origin.y,
            ex: s.field.x,
            ey: s.field.y,
            tip_x: s.tip.x,
            tip_y: s.tip.y,
        }
    }
}

#[derive(Debug, Serialize)]
struct CellRow {
    x: f64,
    y: f64,
    size: f64,
    potential: f64,
    intensity: f64,
}

impl From<&PotentialCell> for CellRow {
    fn from(c: &PotentialCell) -> Self {
        Self {
            x: c.origin.x,
            y: c.origin.y,
            size: c.size,
            potential: c.potential,
            intensity: c.intensity,
        }
    }
}

/// Writes any serializable records as CSV with a header row. Returns the record count.
fn write_records<W, T, I>(writer: W, records: I) -> Result<usize, ExportError>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut count = 0;
    for record in records {
        csv_writer.serialize(record)?;
        count += 1;
    }
    csv_writer.flush()?;
    Ok(count)
}

/// Writes the force readout with display coordinates, one row per charge.
pub fn write_measurements<W: Write>(
    writer: W,
    measurements: &[Measurement],
) -> Result<usize, ExportError> {
    write_records(writer, measurements)
}

pub fn write_field_segments<'a, W, I>(writer: W, segments: I) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a FieldSegment>,
{
    write_records(writer, segments.into_iter().map(SegmentRow::from))
}

pub fn write_potential_cells<'a, W, I>(writer: W, cells: I) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a PotentialCell>,
{
    write_records(writer, cells.into_iter().map(CellRow::from))
}
