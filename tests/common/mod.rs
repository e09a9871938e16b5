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

    tests/common/mod.rs

    Common support routines for tests
*/
#![allow(dead_code)]

use skimsel::prelude::*;

pub const RUN: RunNumber = 544_013;
pub const VALID_FROM: u64 = 1_700_000_000_000;

pub fn init() {
    match env_logger::builder().is_test(true).try_init() {
        Ok(_) => {
            println!("Logger initialized. A debug log should follow:");
            log::debug!("Logger initialized.");
        }
        Err(e) => eprintln!("Failed to initialize logger: {}", e),
    }
}

/// Selection counters for a run with three selections. Bit 0 is fHe, bit 1 fOmega, bit 2 fDoubleXi.
pub fn sample_selections() -> LabeledHistogram {
    LabeledHistogram::from_bins(vec![
        ("Total number of events", 10_000.0),
        ("fHe", 40.0),
        ("fOmega", 25.0),
        ("fDoubleXi", 3.0),
        ("Filtered events", 61.0),
    ])
}

/// Records deliberately out of order, with endpoints in both orders.
pub fn sample_records() -> Vec<RawSelectionRecord> {
    vec![
        RawSelectionRecord::new(5_010, 5_000, [0b100, 0]),
        RawSelectionRecord::new(1_000, 1_010, [0b001, 0]),
        RawSelectionRecord::new(3_010, 3_000, [0b011, 0]),
        RawSelectionRecord::new(2_000, 2_004, [0b010, 0]),
    ]
}

pub fn sample_metadata() -> RunMetadata {
    RunMetadata {
        records: sample_records(),
        selections: sample_selections(),
        scalers: Some(LabeledHistogram::from_bins(vec![("Total number of events", 10_000.0), ("fHe", 40.0)])),
        inspected_tvx: None,
    }
}

pub fn sample_source() -> InMemorySource {
    let mut source = InMemorySource::new();
    source.insert(RUN, VALID_FROM, sample_metadata());
    source
}
