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

    src/lib.rs

    skimsel answers the question "was this collision event selected by any of
    my triggers of interest?" for skimmed data, by looking up a bunch crossing
    in a per-run table of selection bitmasks keyed by bunch-crossing ranges.
*/

pub mod bc_range;
pub mod histograms;
pub mod mask;
pub mod metadata;
pub mod params;
pub mod record;
pub mod selection_index;
pub mod selector;
pub mod triggers;

use thiserror::Error;

/// Number of bunch crossings in one LHC orbit.
pub const BC_PER_ORBIT: u64 = 3564;
/// Width of a selection bitmask in bits.
pub const SELECTION_MASK_BITS: usize = 128;
/// Default tolerance, in bunch crossings, applied by a [TriggerSelector] when none is configured.
pub const DEFAULT_BC_TOLERANCE: u64 = 100;

pub type RunNumber = u32;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("An IO error occurred reading or writing selection metadata: {0}")]
    IoError(String),
    #[error("Selection metadata could not be parsed: {0}")]
    FormatParseError(String),
    #[error("No selection metadata exists for run {0}")]
    RunNotFound(RunNumber),
    #[error("No selection metadata for run {run} is valid at timestamp {timestamp}")]
    NoValidMetadata { run: RunNumber, timestamp: u64 },
    #[error("The selection counters table is malformed: {0}")]
    MalformedCounters(String),
}

impl From<std::io::Error> for SelectionError {
    fn from(err: std::io::Error) -> Self {
        SelectionError::IoError(err.to_string())
    }
}

impl From<binrw::Error> for SelectionError {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(e) => SelectionError::IoError(e.to_string()),
            e => SelectionError::FormatParseError(e.to_string()),
        }
    }
}

pub use crate::bc_range::{BcRange, BunchCrossing};
pub use crate::mask::SelectionMask;
pub use crate::selection_index::SelectionIndex;
pub use crate::selector::TriggerSelector;

pub mod prelude {
    pub use crate::{
        bc_range::{BcRange, BunchCrossing},
        histograms::{LabeledHistogram, SelectionHistograms, SelectionObserver},
        mask::SelectionMask,
        metadata::{DirectorySource, InMemorySource, MetadataSource, RunMetadata},
        params::SelectorParams,
        record::{FetchResult, RawSelectionRecord, RecordTable, SelectionCursor, SelectionRecord},
        selection_index::SelectionIndex,
        selector::TriggerSelector,
        triggers::{parse_trigger_list, TriggerIndex},
        RunNumber,
        SelectionError,
    };
}
