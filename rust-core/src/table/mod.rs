//! Channel table: one numeric column per interferometer channel
//!
//! ```text
//!  .csv / .tsv / .txt
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse cells, dB → amplitude
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ ChannelTable │  Array2 (samples × channels) + names
//!   └──────────────┘
//! ```

pub mod loader;

pub use loader::{TableFormat, load_table, parse_table};

use ndarray::{Array2, ArrayView1, Axis};

/// Convert a power-ratio decibel value to linear amplitude: 10^(dB/20)
pub fn db_to_amplitude(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Loaded samples, stored column-per-channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelTable {
    names: Vec<String>,
    data: Array2<f64>,
}

impl ChannelTable {
    /// Build a table from equal-length columns
    ///
    /// Returns `None` when names and columns disagree in count or the columns
    /// differ in length.
    pub fn from_columns(names: Vec<String>, columns: Vec<Vec<f64>>) -> Option<Self> {
        if names.len() != columns.len() {
            return None;
        }
        let samples = columns.first().map_or(0, Vec::len);
        if columns.iter().any(|c| c.len() != samples) {
            return None;
        }

        let mut data = Array2::zeros((samples, columns.len()));
        for (j, column) in columns.iter().enumerate() {
            for (i, &v) in column.iter().enumerate() {
                data[[i, j]] = v;
            }
        }
        Some(Self { names, data })
    }

    /// Build a table from row-major samples; every row must have `names.len()` values
    pub(crate) fn from_rows(names: Vec<String>, rows: Vec<Vec<f64>>) -> Option<Self> {
        let width = names.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        if width == 0 || flat.len() % width != 0 {
            return None;
        }
        let data = Array2::from_shape_vec((flat.len() / width, width), flat).ok()?;
        Some(Self { names, data })
    }

    /// Number of channels (columns)
    pub fn channel_count(&self) -> usize {
        self.data.ncols()
    }

    /// Number of samples per channel (rows)
    pub fn sample_count(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn channel_names(&self) -> &[String] {
        &self.names
    }

    /// Borrow one channel's samples
    pub fn channel_view(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.channel_count()).then(|| self.data.column(index))
    }

    /// Copy one channel's samples
    pub fn channel(&self, index: usize) -> Option<Vec<f64>> {
        self.channel_view(index).map(|c| c.to_vec())
    }

    /// Convert every value from dB to linear amplitude in place
    pub fn convert_db_to_amplitude(&mut self) {
        self.data.mapv_inplace(db_to_amplitude);
    }

    /// Per-channel mean, used by summaries
    pub fn channel_means(&self) -> Vec<f64> {
        if self.sample_count() == 0 {
            return vec![f64::NAN; self.channel_count()];
        }
        self.data
            .mean_axis(Axis(0))
            .map(|m| m.to_vec())
            .unwrap_or_default()
    }
}
