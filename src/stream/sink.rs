use std::io::Write;

use tokio::sync::mpsc::UnboundedSender;

use crate::types::DecodedProjection;

/// Consumer of decoded projections.
///
/// Called synchronously from the session loop, once per projection and in
/// arrival order. Implementations must not block for long.
pub trait ProjectionSink {
    fn emit(&mut self, projection: DecodedProjection);
}

impl ProjectionSink for Vec<DecodedProjection> {
    fn emit(&mut self, projection: DecodedProjection) {
        self.push(projection);
    }
}

/// Hands projections to another task. Sends after the receiver is gone are
/// dropped.
impl ProjectionSink for UnboundedSender<DecodedProjection> {
    fn emit(&mut self, projection: DecodedProjection) {
        if self.send(projection).is_err() {
            tracing::debug!("projection receiver dropped");
        }
    }
}

/// One JSON object per line.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProjectionSink for JsonLinesSink<W> {
    fn emit(&mut self, projection: DecodedProjection) {
        let written = serde_json::to_writer(&mut self.out, &projection)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"))
            .and_then(|()| self.out.flush());
        if let Err(err) = written {
            tracing::warn!("failed to write projection {}: {err}", projection.signature);
        }
    }
}

/// Aligned `key  value` block per projection, blank line between blocks.
pub struct TableSink<W: Write> {
    out: W,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(projection: &DecodedProjection) -> String {
        let rows: Vec<(&str, &str)> = [
            ("signature", projection.signature.as_str()),
            ("slot", projection.slot.as_str()),
        ]
        .into_iter()
        .chain(
            projection
                .fields
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        )
        .collect();

        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        let mut block = String::new();
        for (name, value) in rows {
            block.push_str(&format!("{name:<width$}  {value}\n"));
        }
        block.push('\n');
        block
    }
}

impl<W: Write> ProjectionSink for TableSink<W> {
    fn emit(&mut self, projection: DecodedProjection) {
        let block = Self::render(&projection);
        if let Err(err) = self
            .out
            .write_all(block.as_bytes())
            .and_then(|()| self.out.flush())
        {
            tracing::warn!("failed to write projection {}: {err}", projection.signature);
        }
    }
}
