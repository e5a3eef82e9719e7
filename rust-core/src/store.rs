//! Channel store: the loaded table, the selected channel and its filtered
//! overlay, kept consistent across loads, switches and filter runs.

use crate::error::{EngineError, ParameterError};
use crate::filters::{self, FilterKind};
use crate::table::ChannelTable;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Table overview shown next to the channel selector
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub channels: usize,
    pub samples: usize,
    pub channel_names: Vec<String>,

    /// Mean amplitude of each channel, in column order
    pub channel_means: Vec<f64>,
}

/// The loaded table plus the selected channel and its filtered overlay.
///
/// `raw_channel`, `current_channel` and `processed_overlay` always describe
/// the same channel: every mutation replaces them together.
#[derive(Debug, Clone, Default)]
pub struct ChannelStore {
    /// Loaded table (None until a file is loaded).
    table: Option<ChannelTable>,

    /// Index of the selected column; Some iff a table with columns is loaded.
    current_channel: Option<usize>,

    /// Samples of the selected column.
    raw_channel: Vec<f64>,

    /// Output of the last filter applied to `raw_channel`.
    processed_overlay: Option<Vec<f64>>,
}

impl ChannelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a newly loaded table and select its first channel.
    pub fn load(&mut self, table: ChannelTable) {
        let raw = table.channel(0).unwrap_or_default();
        let current = (table.channel_count() > 0).then_some(0);

        self.table = Some(table);
        self.current_channel = current;
        self.raw_channel = raw;
        self.processed_overlay = None;
    }

    /// Drop the table and all derived state (failed load).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Switch to another channel and clear the overlay.
    ///
    /// Returns the new raw samples for the caller to recompute its views.
    pub fn select_channel(&mut self, index: usize) -> Result<&[f64], ParameterError> {
        let table = self.table.as_ref().ok_or(ParameterError::NoTable)?;
        let raw = table.channel(index).ok_or(ParameterError::ChannelOutOfRange {
            index,
            count: table.channel_count(),
        })?;

        self.processed_overlay = None;
        self.current_channel = Some(index);
        self.raw_channel = raw;

        log::debug!("Selected channel {} ({} samples)", index, self.raw_channel.len());
        Ok(&self.raw_channel)
    }

    /// Filter the raw channel and store the result as the overlay.
    pub fn apply_filter(&mut self, kind: FilterKind, window: usize) -> Result<&[f64], EngineError> {
        if self.current_channel.is_none() {
            return Err(ParameterError::NoTable.into());
        }

        let processed = filters::apply(&self.raw_channel, kind, window)?;
        Ok(self.processed_overlay.insert(processed).as_slice())
    }

    pub fn table(&self) -> Option<&ChannelTable> {
        self.table.as_ref()
    }

    pub fn current_channel(&self) -> Option<usize> {
        self.current_channel
    }

    /// Samples of the selected channel (empty when nothing is selected).
    pub fn raw_channel(&self) -> &[f64] {
        &self.raw_channel
    }

    pub fn processed_overlay(&self) -> Option<&[f64]> {
        self.processed_overlay.as_deref()
    }

    /// Overlay if one exists, otherwise the raw channel.
    pub fn active_signal(&self) -> &[f64] {
        self.processed_overlay().unwrap_or(&self.raw_channel)
    }

    /// Counts, names and per-channel means of the loaded table.
    pub fn summary(&self) -> Option<TableSummary> {
        self.table.as_ref().map(|t| TableSummary {
            channels: t.channel_count(),
            samples: t.sample_count(),
            channel_names: t.channel_names().to_vec(),
            channel_means: t.channel_means(),
        })
    }
}
