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

    src/params.rs

    Parameters controlling a TriggerSelector.
*/

use crate::{triggers::parse_trigger_list, DEFAULT_BC_TOLERANCE};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorParams {
    /// Comma-separated names of the triggers of interest.
    pub triggers: String,
    /// Half-width, in bunch crossings, of the window matched around each queried bunch crossing.
    pub bc_tolerance: u64,
    /// Prepended to each histogram name, after the run number.
    pub histogram_prefix: String,
}

impl Default for SelectorParams {
    fn default() -> Self {
        SelectorParams {
            triggers: String::new(),
            bc_tolerance: DEFAULT_BC_TOLERANCE,
            histogram_prefix: String::new(),
        }
    }
}

impl SelectorParams {
    pub fn new(triggers: &str) -> Self {
        SelectorParams {
            triggers: triggers.to_string(),
            ..Default::default()
        }
    }

    pub fn with_tolerance(mut self, bc_tolerance: u64) -> Self {
        self.bc_tolerance = bc_tolerance;
        self
    }

    pub fn with_histogram_prefix(mut self, prefix: &str) -> Self {
        self.histogram_prefix = prefix.to_string();
        self
    }

    pub fn trigger_names(&self) -> Vec<String> {
        parse_trigger_list(&self.triggers)
    }
}
