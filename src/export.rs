use std::io;
use std::path::Path;

use clap::ValueEnum;
use log::debug;
use serde::Serialize;

use crate::data::model::{LevelDescriptor, ResampledPoint};
use crate::error::LevelError;

/// Flat rows added before and after the resampled body.
pub const PAD_ROWS: usize = 50;

// ---------------------------------------------------------------------------
// Chart rows
// ---------------------------------------------------------------------------

/// Where the flat lead-in and lead-out values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PadPolicy {
    /// Lead-in holds the curve at the first sample; lead-out holds the last
    /// point of the preview grid.  Existing level files were built this way.
    #[default]
    Reference,
    /// Both pads repeat the first and last rows of the export body.
    BodyEdges,
}

/// One line of the chart CSV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartRow {
    pub position: usize,
    pub value: f64,
}

/// Lay out lead-in pad, body and lead-out pad under one unbroken position
/// counter.
///
/// `lead_value` is the curve at its first sample; `preview` and `body` are
/// the two resamples of the same curve and must not be empty.
pub fn chart_rows(
    lead_value: f64,
    preview: &[ResampledPoint],
    body: &[ResampledPoint],
    policy: PadPolicy,
) -> Vec<ChartRow> {
    let (lead, trail) = match policy {
        PadPolicy::Reference => (lead_value, preview.last().map(|p| p.value)),
        PadPolicy::BodyEdges => (
            body.first().map_or(lead_value, |p| p.value),
            body.last().map(|p| p.value),
        ),
    };
    let trail = trail.unwrap_or(lead);

    let values = std::iter::repeat(lead)
        .take(PAD_ROWS)
        .chain(body.iter().map(|p| p.value))
        .chain(std::iter::repeat(trail).take(PAD_ROWS));

    values
        .enumerate()
        .map(|(position, value)| ChartRow { position, value })
        .collect()
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Write `position,value` lines with no header.
pub fn write_chart(path: &Path, rows: &[ChartRow]) -> Result<(), LevelError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| LevelError::output(path, e))?;

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| LevelError::output(path, e))?;
    }
    writer.flush().map_err(|e| LevelError::output(path, e))?;

    debug!("wrote {} chart rows to {}", rows.len(), path.display());
    Ok(())
}

/// Render a descriptor as 4-space indented JSON.
pub fn descriptor_json(descriptor: &LevelDescriptor) -> io::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    descriptor.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write the descriptor JSON and return the text that was written.
pub fn write_descriptor(path: &Path, descriptor: &LevelDescriptor) -> Result<String, LevelError> {
    let json = descriptor_json(descriptor).map_err(|e| LevelError::output(path, e))?;
    std::fs::write(path, format!("{json}\n")).map_err(|e| LevelError::output(path, e))?;
    debug!("wrote descriptor to {}", path.display());
    Ok(json)
}
