/*
    skimsel

    Copyright 2024 The skimsel Authors

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    src/metadata/mod.rs

    Per-run selection metadata and the sources it is loaded from.

    Every run carries a table of selection records and a selection-counters
    table. The counters table doubles as the list of selection labels: its
    first bin is the total number of analysed events, its last bin is the
    total number of selected events, and every bin in between is one
    trigger, in selection-mask bit order.

    Metadata may be re-issued during a run's lifetime, so sources keep
    versions keyed by the timestamp from which they are valid, and a lookup
    picks the newest version already valid at the requested timestamp.
*/

pub mod directory;
pub mod formats;

use std::collections::HashMap;

use strum::{EnumIter, IntoEnumIterator};

use crate::{histograms::LabeledHistogram, record::RawSelectionRecord, RunNumber, SelectionError};

pub use directory::{write_run_metadata, DirectorySource};

/// The counter tables that accompany a run's selection records.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter)]
pub enum CounterTable {
    Selections,
    Scalers,
    InspectedTvx,
}

impl CounterTable {
    pub fn file_name(&self) -> &'static str {
        match self {
            CounterTable::Selections => "selections.bin",
            CounterTable::Scalers => "scalers.bin",
            CounterTable::InspectedTvx => "inspected_tvx.bin",
        }
    }

    pub fn required(&self) -> bool {
        matches!(self, CounterTable::Selections)
    }

    pub fn all() -> impl Iterator<Item = CounterTable> {
        CounterTable::iter()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunMetadata {
    /// Selection records in storage order. Not necessarily sorted.
    pub records: Vec<RawSelectionRecord>,
    pub selections: LabeledHistogram,
    pub scalers: Option<LabeledHistogram>,
    pub inspected_tvx: Option<LabeledHistogram>,
}

impl RunMetadata {
    /// Labels of the selection-mask bits, in bit order.
    pub fn trigger_labels(&self) -> &[String] {
        let labels = self.selections.labels();
        if labels.len() < 2 {
            return &[];
        }
        &labels[1..labels.len() - 1]
    }

    pub fn total_analysed(&self) -> Option<f64> {
        if self.selections.len() < 2 {
            return None;
        }
        self.selections.content(0)
    }

    pub fn total_selected(&self) -> Option<f64> {
        if self.selections.len() < 2 {
            return None;
        }
        self.selections.content(self.selections.len() - 1)
    }

    pub fn counters(&self, table: CounterTable) -> Option<&LabeledHistogram> {
        match table {
            CounterTable::Selections => Some(&self.selections),
            CounterTable::Scalers => self.scalers.as_ref(),
            CounterTable::InspectedTvx => self.inspected_tvx.as_ref(),
        }
    }

    /// Check that the selections table can carry both totals.
    pub fn validate(&self) -> Result<(), SelectionError> {
        if self.selections.len() < 2 {
            return Err(SelectionError::MalformedCounters(format!(
                "selections table has {} bins, expected at least 2",
                self.selections.len()
            )));
        }
        Ok(())
    }
}

/// Supplies selection metadata for a run, as valid at a given timestamp.
pub trait MetadataSource {
    fn load(&self, run: RunNumber, timestamp: u64) -> Result<RunMetadata, SelectionError>;
}

impl<T: MetadataSource + ?Sized> MetadataSource for &T {
    fn load(&self, run: RunNumber, timestamp: u64) -> Result<RunMetadata, SelectionError> {
        (**self).load(run, timestamp)
    }
}

impl<T: MetadataSource + ?Sized> MetadataSource for Box<T> {
    fn load(&self, run: RunNumber, timestamp: u64) -> Result<RunMetadata, SelectionError> {
        (**self).load(run, timestamp)
    }
}

/// Pick the newest validity start that is not after `timestamp`.
pub(crate) fn select_version<I>(valid_from: I, timestamp: u64) -> Option<u64>
where
    I: IntoIterator<Item = u64>,
{
    valid_from.into_iter().filter(|v| *v <= timestamp).max()
}

/// A [MetadataSource] holding everything in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    runs: HashMap<RunNumber, Vec<(u64, RunMetadata)>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a version of `run`'s metadata valid from `valid_from` onwards. A version with the same
    /// validity start is replaced.
    pub fn insert(&mut self, run: RunNumber, valid_from: u64, metadata: RunMetadata) {
        let versions = self.runs.entry(run).or_default();
        versions.retain(|(v, _)| *v != valid_from);
        versions.push((valid_from, metadata));
    }

    pub fn runs(&self) -> impl Iterator<Item = RunNumber> + '_ {
        self.runs.keys().copied()
    }
}

impl MetadataSource for InMemorySource {
    fn load(&self, run: RunNumber, timestamp: u64) -> Result<RunMetadata, SelectionError> {
        let versions = self.runs.get(&run).ok_or(SelectionError::RunNotFound(run))?;
        let valid_from = select_version(versions.iter().map(|(v, _)| *v), timestamp)
            .ok_or(SelectionError::NoValidMetadata { run, timestamp })?;

        log::debug!(
            "InMemorySource::load(): run {} at {} resolved to version valid from {}",
            run,
            timestamp,
            valid_from
        );

        versions
            .iter()
            .find(|(v, _)| *v == valid_from)
            .map(|(_, metadata)| metadata.clone())
            .ok_or(SelectionError::NoValidMetadata { run, timestamp })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(total: f64) -> RunMetadata {
        RunMetadata {
            records: Vec::new(),
            selections: LabeledHistogram::from_bins(vec![("Total", total), ("A", 1.0), ("B", 2.0), ("Selected", 3.0)]),
            scalers: None,
            inspected_tvx: None,
        }
    }

    #[test]
    fn totals_and_labels_come_from_selections() {
        let md = metadata(100.0);
        assert_eq!(md.trigger_labels(), &["A".to_string(), "B".to_string()]);
        assert_eq!(md.total_analysed(), Some(100.0));
        assert_eq!(md.total_selected(), Some(3.0));
        assert!(md.validate().is_ok());
    }

    #[test]
    fn short_selections_table_is_malformed() {
        let md = RunMetadata {
            selections: LabeledHistogram::from_bins(vec![("Total", 1.0)]),
            ..Default::default()
        };
        assert!(md.trigger_labels().is_empty());
        assert_eq!(md.total_selected(), None);
        assert!(matches!(md.validate(), Err(SelectionError::MalformedCounters(_))));
    }

    #[test]
    fn newest_valid_version_wins() {
        let mut source = InMemorySource::new();
        source.insert(7, 1000, metadata(1.0));
        source.insert(7, 5000, metadata(2.0));

        assert_eq!(source.load(7, 4999).ok().and_then(|m| m.total_analysed()), Some(1.0));
        assert_eq!(source.load(7, 5000).ok().and_then(|m| m.total_analysed()), Some(2.0));
        assert!(matches!(
            source.load(7, 999),
            Err(SelectionError::NoValidMetadata { run: 7, timestamp: 999 })
        ));
        assert!(matches!(source.load(8, 5000), Err(SelectionError::RunNotFound(8))));
    }

    #[test]
    fn counter_tables_iterate_in_order() {
        let tables: Vec<CounterTable> = CounterTable::all().collect();
        assert_eq!(tables, vec![CounterTable::Selections, CounterTable::Scalers, CounterTable::InspectedTvx]);
        assert!(CounterTable::Selections.required());
        assert!(!CounterTable::Scalers.required());
    }
}
