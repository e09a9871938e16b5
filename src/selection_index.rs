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

    src/selection_index.rs

    Answers whether a bunch crossing was selected by any trigger of interest,
    and keeps per-trigger counts of selected records for one run.
*/

use crate::{
    histograms::SelectionObserver,
    mask::SelectionMask,
    record::{FetchResult, RawSelectionRecord, RecordTable, SelectionCursor},
    triggers::TriggerIndex,
};

pub struct SelectionIndex {
    table: RecordTable,
    triggers: TriggerIndex,
    cursor: SelectionCursor,
    counts: Vec<u64>,
    observer: Option<Box<dyn SelectionObserver>>,
}

impl SelectionIndex {
    /// Build an index from a run's records and resolve `trigger_names` against the labels of
    /// the selection-mask bits. Names without a matching label never select anything.
    pub fn initialize<I, N, L>(records: I, trigger_names: &[N], selection_labels: &[L]) -> Self
    where
        I: IntoIterator<Item = RawSelectionRecord>,
        N: AsRef<str>,
        L: AsRef<str>,
    {
        let table = RecordTable::new(records);
        let triggers = TriggerIndex::resolve(trigger_names, selection_labels);

        log::info!(
            "SelectionIndex::initialize(): {} records, triggers of interest:",
            table.len()
        );
        for (name, offset) in triggers.names().zip(triggers.bit_offsets()) {
            log::info!(">>> {} : {}", name, offset);
        }

        SelectionIndex {
            counts: vec![0; triggers.len()],
            table,
            triggers,
            cursor: SelectionCursor::new(),
            observer: None,
        }
    }

    /// Receive a notification for every trigger bit and trigger of interest on newly matched records.
    pub fn set_observer(&mut self, observer: Box<dyn SelectionObserver>) {
        self.observer = Some(observer);
    }

    pub fn take_observer(&mut self) -> Option<Box<dyn SelectionObserver>> {
        self.observer.take()
    }

    pub fn trigger_index(&self) -> &TriggerIndex {
        &self.triggers
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn cursor(&self) -> &SelectionCursor {
        &self.cursor
    }

    /// Mask returned by the most recent query.
    pub fn last_result(&self) -> SelectionMask {
        self.cursor.last_result()
    }

    /// Number of distinct records selected by each trigger of interest, in trigger order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn count(&self, trigger: usize) -> Option<u64> {
        self.counts.get(trigger).copied()
    }

    /// Forget the cursor position and zero all counts.
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    /// Look up the selection mask for `bc`, matching any record within `tolerance` bunch
    /// crossings. Returns an empty mask if nothing matches.
    pub fn fetch(&mut self, bc: u64, tolerance: u64) -> SelectionMask {
        self.fetch_record(bc, tolerance).mask
    }

    /// Returns true if any trigger of interest fired for `bc`. Triggers are checked in order and
    /// the first one found set decides; it is counted only if the match is a record not counted
    /// on the previous query.
    pub fn is_selected(&mut self, bc: u64, tolerance: u64) -> bool {
        let result = self.fetch_record(bc, tolerance);

        for (i, trigger) in self.triggers.iter().enumerate() {
            let Some(bit) = trigger.bit else { continue };
            if result.mask.test(bit) {
                if result.index_changed {
                    self.counts[i] += 1;
                    if let Some(observer) = &mut self.observer {
                        observer.trigger_of_interest_selected(i);
                    }
                }
                return true;
            }
        }
        false
    }

    fn fetch_record(&mut self, bc: u64, tolerance: u64) -> FetchResult {
        let result = self.table.fetch(&mut self.cursor, bc, tolerance);

        if result.matched.is_some() && result.index_changed {
            if let Some(observer) = &mut self.observer {
                for bit in result.mask.iter_ones() {
                    observer.trigger_fired(bit);
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histograms::LabeledHistogram;
    use std::{cell::RefCell, rc::Rc};

    fn scenario_index() -> SelectionIndex {
        let records = vec![
            RawSelectionRecord::new(100, 110, [0b01, 0]),
            RawSelectionRecord::new(210, 200, [0b10, 0]),
        ];
        SelectionIndex::initialize(records, &["A", "B"], &["A", "B"])
    }

    #[test]
    fn scenario_counts_each_record_once() {
        let mut index = scenario_index();

        assert!(index.is_selected(105, 0));
        assert_eq!(index.last_result().words(), [0b01, 0]);
        assert_eq!(index.counts(), &[1, 0]);

        assert!(index.is_selected(105, 0));
        assert_eq!(index.last_result().words(), [0b01, 0]);
        assert_eq!(index.counts(), &[1, 0]);

        assert!(index.is_selected(205, 0));
        assert_eq!(index.last_result().words(), [0b10, 0]);
        assert_eq!(index.counts(), &[1, 1]);

        assert!(!index.is_selected(50, 0));
        assert!(index.last_result().is_empty());
        assert_eq!(index.counts(), &[1, 1]);
    }

    #[test]
    fn bare_fetch_takes_the_new_record() {
        let mut index = scenario_index();

        // A fetch moves the cursor onto the record, so the following query sees no change.
        assert_eq!(index.fetch(105, 0).words(), [0b01, 0]);
        assert!(index.is_selected(105, 0));
        assert_eq!(index.counts(), &[0, 0]);

        assert!(index.is_selected(205, 0));
        assert_eq!(index.counts(), &[0, 1]);
    }

    #[test]
    fn reset_clears_counts_and_cursor() {
        let mut index = scenario_index();
        assert!(index.is_selected(205, 0));
        assert_eq!(index.counts(), &[0, 1]);

        index.reset();
        assert_eq!(index.counts(), &[0, 0]);
        assert_eq!(index.cursor().last_selected(), None);

        assert!(index.is_selected(205, 0));
        assert_eq!(index.counts(), &[0, 1]);
    }

    #[test]
    fn first_matching_trigger_short_circuits() {
        let records = vec![RawSelectionRecord::new(10, 20, [0b11, 0])];
        let mut index = SelectionIndex::initialize(records, &["B", "A"], &["A", "B"]);

        assert!(index.is_selected(15, 0));
        assert_eq!(index.counts(), &[1, 0]);
    }

    #[test]
    fn unresolved_triggers_never_select() {
        let records = vec![RawSelectionRecord::new(10, 20, [u64::MAX, u64::MAX])];
        let mut index = SelectionIndex::initialize(records, &["Missing"], &["A", "B"]);

        assert_eq!(index.trigger_index().bit_offsets(), vec![-1]);
        assert!(!index.fetch(15, 0).is_empty());
        assert!(!index.is_selected(15, 0));
        assert_eq!(index.counts(), &[0]);
    }

    #[test]
    fn beyond_all_records_is_not_selected() {
        let mut index = scenario_index();
        assert!(index.fetch(1_000, 10).is_empty());
        assert!(!index.is_selected(1_000, 10));
    }

    #[test]
    fn empty_table_is_legal() {
        let mut index = SelectionIndex::initialize(Vec::new(), &["A"], &["A"]);
        assert!(index.fetch(0, 0).is_empty());
        assert!(!index.is_selected(12_345, 100));
        assert_eq!(index.count(0), Some(0));
        assert_eq!(index.count(1), None);
    }

    #[derive(Default)]
    struct Recorder {
        fired: Vec<usize>,
        selected: Vec<usize>,
    }

    impl SelectionObserver for Recorder {
        fn trigger_fired(&mut self, bit: usize) {
            self.fired.push(bit);
        }

        fn trigger_of_interest_selected(&mut self, index: usize) {
            self.selected.push(index);
        }
    }

    #[test]
    fn observer_sees_each_record_once() {
        let records = vec![
            RawSelectionRecord::new(100, 110, [0b101, 0]),
            RawSelectionRecord::new(200, 210, [0, 1]),
        ];
        let mut index = SelectionIndex::initialize(records, &["C", "X"], &["A", "B", "C"]);
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        index.set_observer(Box::new(recorder.clone()));

        index.is_selected(100, 0);
        index.is_selected(101, 0);
        index.fetch(205, 0);
        index.fetch(206, 0);

        assert_eq!(recorder.borrow().fired, vec![0, 2, 64]);
        assert_eq!(recorder.borrow().selected, vec![0]);
    }

    #[test]
    fn histogram_observer_is_filled() {
        let records = vec![RawSelectionRecord::new(100, 110, [0b10, 0])];
        let mut index = SelectionIndex::initialize(records, &["B"], &["A", "B"]);
        let hist = Rc::new(RefCell::new(AnalysedTriggers(LabeledHistogram::new(&["A", "B"]))));
        index.set_observer(Box::new(hist.clone()));

        index.fetch(105, 0);
        assert_eq!(hist.borrow().0.content(1), Some(1.0));
    }

    struct AnalysedTriggers(LabeledHistogram);

    impl SelectionObserver for AnalysedTriggers {
        fn trigger_fired(&mut self, bit: usize) {
            self.0.fill(bit);
        }
    }
}
