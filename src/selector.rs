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

    src/selector.rs

    A run-aware front end tying a metadata source, a selection index and
    the run's histograms together, for use from an event loop that sees
    runs one after another.
*/

use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use crate::{
    histograms::SelectionHistograms,
    mask::SelectionMask,
    metadata::{MetadataSource, RunMetadata},
    params::SelectorParams,
    selection_index::SelectionIndex,
    RunNumber,
    SelectionError,
};

struct RunState {
    run: RunNumber,
    metadata: RunMetadata,
    index: SelectionIndex,
    histograms: Rc<RefCell<SelectionHistograms>>,
}

pub struct TriggerSelector<S> {
    source: S,
    params: SelectorParams,
    state:  Option<RunState>,
}

impl<S: MetadataSource> TriggerSelector<S> {
    pub fn new(source: S, params: SelectorParams) -> Self {
        TriggerSelector {
            source,
            params,
            state: None,
        }
    }

    /// Prepare for events of `run`, loading the metadata valid at `timestamp`. Returns the bit
    /// offset of each trigger of interest, `-1` for names with no matching selection.
    ///
    /// Calling this again for the current run does nothing and returns the same offsets, so it
    /// is safe to call once per event. If loading fails the selector is left without a run and
    /// selects nothing until a run is initialized successfully.
    pub fn init_run(&mut self, run: RunNumber, timestamp: u64) -> Result<Vec<i32>, SelectionError> {
        if let Some(state) = &self.state {
            if state.run == run {
                return Ok(state.index.trigger_index().bit_offsets());
            }
        }
        self.state = None;

        let metadata = self.source.load(run, timestamp)?;
        if metadata.trigger_labels().is_empty() {
            log::warn!("TriggerSelector::init_run(): run {} carries no selection labels", run);
        }

        let names = self.params.trigger_names();
        let mut index = SelectionIndex::initialize(metadata.records.iter().copied(), &names, metadata.trigger_labels());
        let histograms = Rc::new(RefCell::new(SelectionHistograms::new(
            run,
            &self.params.histogram_prefix,
            &metadata,
            index.trigger_index(),
        )));
        index.set_observer(Box::new(histograms.clone()));

        log::info!(
            "TriggerSelector::init_run(): initialized for run {} with tolerance of {} BCs",
            run,
            self.params.bc_tolerance
        );

        let offsets = index.trigger_index().bit_offsets();
        self.state = Some(RunState {
            run,
            metadata,
            index,
            histograms,
        });
        Ok(offsets)
    }

    pub fn params(&self) -> &SelectorParams {
        &self.params
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The run currently initialized, if any.
    pub fn run(&self) -> Option<RunNumber> {
        self.state.as_ref().map(|s| s.run)
    }

    pub fn metadata(&self) -> Option<&RunMetadata> {
        self.state.as_ref().map(|s| &s.metadata)
    }

    pub fn index(&self) -> Option<&SelectionIndex> {
        self.state.as_ref().map(|s| &s.index)
    }

    pub fn histograms(&self) -> Option<Ref<'_, SelectionHistograms>> {
        self.state.as_ref().map(|s| s.histograms.borrow())
    }

    /// Per-trigger counts of selected records for the current run.
    pub fn counts(&self) -> &[u64] {
        match &self.state {
            Some(state) => state.index.counts(),
            None => &[],
        }
    }

    pub fn fetch(&mut self, bc: u64) -> SelectionMask {
        self.fetch_with_tolerance(bc, self.params.bc_tolerance)
    }

    pub fn fetch_with_tolerance(&mut self, bc: u64, tolerance: u64) -> SelectionMask {
        match &mut self.state {
            Some(state) => state.index.fetch(bc, tolerance),
            None => SelectionMask::EMPTY,
        }
    }

    pub fn is_selected(&mut self, bc: u64) -> bool {
        self.is_selected_with_tolerance(bc, self.params.bc_tolerance)
    }

    pub fn is_selected_with_tolerance(&mut self, bc: u64, tolerance: u64) -> bool {
        match &mut self.state {
            Some(state) => state.index.is_selected(bc, tolerance),
            None => false,
        }
    }
}
