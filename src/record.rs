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

    src/record.rs

    The per-run table of selection records, and the forward-moving cursor
    used to look bunch crossings up in it.

    Queries arriving in non-decreasing bunch-crossing order are answered by
    resuming the scan where the previous query left off, so a run's worth of
    events costs time linear in the number of records plus the number of
    queries. A query that steps backwards resets the cursor and rescans from
    the first record.
*/

use binrw::binrw;

use crate::{bc_range::BcRange, mask::SelectionMask};

/// A selection record as stored by the skimming pass. The two bunch-crossing endpoints come from
/// different sources and are not ordered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[binrw]
#[brw(little)]
pub struct RawSelectionRecord {
    pub bc_aod: u64,
    pub bc_ev_sel: u64,
    pub sel_mask: [u64; 2],
}

impl RawSelectionRecord {
    pub fn new(bc_aod: u64, bc_ev_sel: u64, sel_mask: [u64; 2]) -> Self {
        RawSelectionRecord {
            bc_aod,
            bc_ev_sel,
            sel_mask,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelectionRecord {
    pub range: BcRange,
    pub mask:  SelectionMask,
}

impl From<RawSelectionRecord> for SelectionRecord {
    fn from(raw: RawSelectionRecord) -> Self {
        SelectionRecord {
            range: BcRange::from_endpoints(raw.bc_aod, raw.bc_ev_sel),
            mask:  SelectionMask::from_words(raw.sel_mask),
        }
    }
}

/// Query state carried between lookups into a [RecordTable].
#[derive(Clone, Debug, Default)]
pub struct SelectionCursor {
    last_key: u64,
    last_selected: Option<usize>,
    last_result: SelectionMask,
}

impl SelectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = SelectionCursor::default();
    }

    /// The bunch crossing of the most recent query.
    pub fn last_key(&self) -> u64 {
        self.last_key
    }

    /// Index of the last record the cursor settled on, either as a match or as a record
    /// permanently behind the query window. `None` before the first query and after a rewind.
    pub fn last_selected(&self) -> Option<usize> {
        self.last_selected
    }

    pub fn last_result(&self) -> SelectionMask {
        self.last_result
    }
}

/// The outcome of a single [RecordTable::fetch].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchResult {
    /// Mask of the matched record, or empty if nothing matched.
    pub mask: SelectionMask,
    /// Index of the matched record.
    pub matched: Option<usize>,
    /// Whether the cursor's selected record differs from the one before this query. Repeated
    /// queries settling on the same record report `false`, which callers use to avoid counting
    /// the same record twice.
    pub index_changed: bool,
}

/// Selection records for one run, sorted ascending by the lower end of their range.
#[derive(Clone, Debug, Default)]
pub struct RecordTable {
    records: Vec<SelectionRecord>,
}

impl RecordTable {
    pub fn new<I>(raw_records: I) -> Self
    where
        I: IntoIterator<Item = RawSelectionRecord>,
    {
        let mut records: Vec<SelectionRecord> = raw_records.into_iter().map(SelectionRecord::from).collect();
        records.sort_by_key(|r| r.range.min());
        RecordTable { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SelectionRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionRecord> {
        self.records.iter()
    }

    /// Look up the record overlapping `[key - tolerance, key + tolerance]`, resuming from the
    /// cursor's position. The first overlapping record wins.
    pub fn fetch(&self, cursor: &mut SelectionCursor, key: u64, tolerance: u64) -> FetchResult {
        let previous = cursor.last_selected;
        let window = BcRange::window(key, tolerance);
        cursor.last_result.clear();

        if key < cursor.last_key {
            log::debug!(
                "RecordTable::fetch(): query {} precedes previous query {}, rewinding cursor",
                key,
                cursor.last_key
            );
            cursor.last_selected = None;
        }
        cursor.last_key = key;

        let mut matched = None;
        let start = cursor.last_selected.unwrap_or(0);
        for (i, record) in self.records.iter().enumerate().skip(start) {
            if !record.range.is_outside(&window) {
                cursor.last_result = record.mask;
                cursor.last_selected = Some(i);
                matched = Some(i);
                break;
            }
            else if record.range.precedes(&window) {
                // Sorted by lower bound, so no later forward query can land here again.
                cursor.last_selected = Some(i);
            }
            else if record.range.follows(&window) {
                break;
            }
        }

        FetchResult {
            mask: cursor.last_result,
            matched,
            index_changed: cursor.last_selected != previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RecordTable {
        RecordTable::new(vec![
            RawSelectionRecord::new(310, 300, [0b100, 0]),
            RawSelectionRecord::new(100, 110, [0b001, 0]),
            RawSelectionRecord::new(210, 200, [0b010, 0]),
        ])
    }

    #[test]
    fn records_are_sorted_by_lower_endpoint() {
        let table = table();
        let mins: Vec<u64> = table.iter().map(|r| r.range.min()).collect();
        assert_eq!(mins, vec![100, 200, 300]);
        assert_eq!(table.get(2).map(|r| r.range.max()), Some(310));
    }

    #[test]
    fn fetch_matches_within_tolerance() {
        let table = table();
        let mut cursor = SelectionCursor::new();

        let result = table.fetch(&mut cursor, 115, 5);
        assert_eq!(result.matched, Some(0));
        assert_eq!(result.mask.words(), [0b001, 0]);

        let result = table.fetch(&mut cursor, 116, 5);
        assert_eq!(result.matched, None);
        assert!(result.mask.is_empty());
        assert_eq!(cursor.last_result(), SelectionMask::EMPTY);
    }

    #[test]
    fn fetch_advances_past_preceding_records_on_miss() {
        let table = table();
        let mut cursor = SelectionCursor::new();

        let result = table.fetch(&mut cursor, 250, 0);
        assert_eq!(result.matched, None);
        assert_eq!(cursor.last_selected(), Some(1));
        assert_eq!(cursor.last_key(), 250);
    }

    #[test]
    fn repeated_fetch_reports_unchanged_index() {
        let table = table();
        let mut cursor = SelectionCursor::new();

        let first = table.fetch(&mut cursor, 205, 0);
        assert!(first.index_changed);
        let second = table.fetch(&mut cursor, 205, 0);
        assert_eq!(first.mask, second.mask);
        assert!(!second.index_changed);
    }

    #[test]
    fn rewind_rescans_from_start() {
        let table = table();
        let mut cursor = SelectionCursor::new();

        let forward = table.fetch(&mut cursor, 305, 0);
        let back = table.fetch(&mut cursor, 105, 0);
        assert_eq!(back.matched, Some(0));
        let again = table.fetch(&mut cursor, 305, 0);
        assert_eq!(forward.mask, again.mask);
        assert_eq!(again.matched, Some(2));
    }

    #[test]
    fn empty_table_never_matches() {
        let table = RecordTable::default();
        let mut cursor = SelectionCursor::new();
        let result = table.fetch(&mut cursor, 42, 1000);
        assert!(result.mask.is_empty());
        assert_eq!(result.matched, None);
        assert!(!result.index_changed);
    }
}
