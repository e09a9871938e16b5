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

    src/histograms.rs

    Labelled counting histograms and the observer interface through which a
    selection index reports what it matched.
*/

use std::{cell::RefCell, rc::Rc};

use crate::{metadata::RunMetadata, triggers::TriggerIndex, RunNumber};

/// Receives notifications as a [SelectionIndex](crate::SelectionIndex) matches records. Both
/// methods are only called the first time the cursor settles on a given record.
pub trait SelectionObserver {
    /// A selection bit was set in a newly matched record.
    fn trigger_fired(&mut self, _bit: usize) {}
    /// The trigger of interest at `index` selected a newly matched record.
    fn trigger_of_interest_selected(&mut self, _index: usize) {}
}

impl<T: SelectionObserver> SelectionObserver for Rc<RefCell<T>> {
    fn trigger_fired(&mut self, bit: usize) {
        self.borrow_mut().trigger_fired(bit);
    }

    fn trigger_of_interest_selected(&mut self, index: usize) {
        self.borrow_mut().trigger_of_interest_selected(index);
    }
}

/// A one-dimensional histogram with one labelled bin per category.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabeledHistogram {
    labels:   Vec<String>,
    contents: Vec<f64>,
}

impl LabeledHistogram {
    /// Create an empty histogram with one bin per label.
    pub fn new<L: AsRef<str>>(labels: &[L]) -> Self {
        LabeledHistogram {
            labels:   labels.iter().map(|l| l.as_ref().to_string()).collect(),
            contents: vec![0.0; labels.len()],
        }
    }

    pub fn from_bins<I, S>(bins: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (labels, contents) = bins.into_iter().map(|(l, c)| (l.into(), c)).unzip();
        LabeledHistogram { labels, contents }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Increment `bin` by one. Fills outside the histogram are dropped.
    pub fn fill(&mut self, bin: usize) {
        match self.contents.get_mut(bin) {
            Some(content) => *content += 1.0,
            None => log::trace!("LabeledHistogram::fill(): bin {} out of range", bin),
        }
    }

    pub fn content(&self, bin: usize) -> Option<f64> {
        self.contents.get(bin).copied()
    }

    pub fn label(&self, bin: usize) -> Option<&str> {
        self.labels.get(bin).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Find the first bin carrying exactly `label`.
    pub fn find_bin(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn bins(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(String::as_str).zip(self.contents.iter().copied())
    }

    /// Sum of all bin contents.
    pub fn integral(&self) -> f64 {
        self.contents.iter().sum()
    }
}

/// The histograms published for one run: counts of matched trigger bits and triggers of
/// interest, plus copies of the run's counter tables for reference.
#[derive(Clone, Debug)]
pub struct SelectionHistograms {
    run: RunNumber,
    prefix: String,
    pub analysed_triggers: LabeledHistogram,
    pub selections: LabeledHistogram,
    pub scalers: Option<LabeledHistogram>,
    pub inspected_tvx: Option<LabeledHistogram>,
    pub analysed_triggers_of_interest: Option<LabeledHistogram>,
}

impl SelectionHistograms {
    pub fn new(run: RunNumber, prefix: &str, metadata: &RunMetadata, triggers: &TriggerIndex) -> Self {
        let analysed_triggers_of_interest = if triggers.is_empty() {
            None
        }
        else {
            Some(LabeledHistogram::new(&triggers.names().collect::<Vec<_>>()))
        };

        SelectionHistograms {
            run,
            prefix: prefix.to_string(),
            analysed_triggers: LabeledHistogram::new(metadata.trigger_labels()),
            selections: metadata.selections.clone(),
            scalers: metadata.scalers.clone(),
            inspected_tvx: metadata.inspected_tvx.clone(),
            analysed_triggers_of_interest,
        }
    }

    pub fn run(&self) -> RunNumber {
        self.run
    }

    fn qualified_name(&self, name: &str) -> String {
        format!("{}/{}{}", self.run, self.prefix, name)
    }

    /// All histograms present for this run, keyed by their registry name `<run>/<prefix><Name>`.
    pub fn named(&self) -> Vec<(String, &LabeledHistogram)> {
        let mut named = vec![
            (self.qualified_name("AnalysedTriggers"), &self.analysed_triggers),
            (self.qualified_name("Selections"), &self.selections),
        ];
        if let Some(scalers) = &self.scalers {
            named.push((self.qualified_name("Scalers"), scalers));
        }
        if let Some(tvx) = &self.inspected_tvx {
            named.push((self.qualified_name("InspectedTVX"), tvx));
        }
        if let Some(toi) = &self.analysed_triggers_of_interest {
            named.push((self.qualified_name("AnalysedTriggersOfInterest"), toi));
        }
        named
    }
}

impl SelectionObserver for SelectionHistograms {
    fn trigger_fired(&mut self, bit: usize) {
        self.analysed_triggers.fill(bit);
    }

    fn trigger_of_interest_selected(&mut self, index: usize) {
        if let Some(toi) = &mut self.analysed_triggers_of_interest {
            toi.fill(index);
        }
    }
}
