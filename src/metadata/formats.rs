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

    src/metadata/formats.rs

    Binary layouts of the on-disk metadata tables. All values are little
    endian.

    Record table:    'SKRT' u32:count  { u64:bc_aod u64:bc_ev_sel u64:mask_lo u64:mask_hi } * count
    Labelled counts: 'SKLH' u32:count  { u16:label_len u8[label_len]:label f64:content } * count
*/

use std::io::{Read, Seek, Write};

use binrw::{binrw, BinRead, BinWrite};

use crate::{histograms::LabeledHistogram, record::RawSelectionRecord, SelectionError};

/// Upper bound on entries in any table, to reject corrupt counts before allocating.
pub const MAXIMUM_TABLE_ENTRIES: u32 = 0x0100_0000;

#[derive(Debug)]
#[binrw]
#[brw(little, magic = b"SKRT")]
pub struct RecordTableFile {
    #[br(assert(count <= MAXIMUM_TABLE_ENTRIES, "record count {} exceeds limit", count))]
    pub count: u32,
    #[br(count = count)]
    pub records: Vec<RawSelectionRecord>,
}

#[derive(Debug)]
#[binrw]
#[brw(little)]
pub struct HistogramBinEntry {
    pub label_len: u16,
    #[br(count = label_len)]
    pub label: Vec<u8>,
    pub content: f64,
}

#[derive(Debug)]
#[binrw]
#[brw(little, magic = b"SKLH")]
pub struct HistogramFile {
    #[br(assert(bin_count <= MAXIMUM_TABLE_ENTRIES, "bin count {} exceeds limit", bin_count))]
    pub bin_count: u32,
    #[br(count = bin_count)]
    pub bins: Vec<HistogramBinEntry>,
}

/// Entry count for a table of `len` entries, refusing tables the readers would reject.
fn entry_count(len: usize, table: &str) -> Result<u32, SelectionError> {
    match u32::try_from(len) {
        Ok(count) if count <= MAXIMUM_TABLE_ENTRIES => Ok(count),
        _ => Err(SelectionError::MalformedCounters(format!(
            "{} has {} entries, limit is {}",
            table, len, MAXIMUM_TABLE_ENTRIES
        ))),
    }
}

pub fn read_records<R: Read + Seek>(reader: &mut R) -> Result<Vec<RawSelectionRecord>, SelectionError> {
    let file = RecordTableFile::read(reader)?;
    Ok(file.records)
}

pub fn write_records<W: Write + Seek>(writer: &mut W, records: &[RawSelectionRecord]) -> Result<(), SelectionError> {
    let file = RecordTableFile {
        count:   entry_count(records.len(), "record table")?,
        records: records.to_vec(),
    };
    file.write(writer)?;
    Ok(())
}

pub fn read_histogram<R: Read + Seek>(reader: &mut R) -> Result<LabeledHistogram, SelectionError> {
    let file = HistogramFile::read(reader)?;

    let mut bins = Vec::with_capacity(file.bins.len());
    for entry in file.bins {
        let label = String::from_utf8(entry.label)
            .map_err(|e| SelectionError::FormatParseError(format!("histogram label is not UTF-8: {}", e)))?;
        bins.push((label, entry.content));
    }
    Ok(LabeledHistogram::from_bins(bins))
}

pub fn write_histogram<W: Write + Seek>(writer: &mut W, histogram: &LabeledHistogram) -> Result<(), SelectionError> {
    let bin_count = entry_count(histogram.len(), "histogram")?;
    let mut bins = Vec::with_capacity(histogram.len());
    for (label, content) in histogram.bins() {
        if label.len() > u16::MAX as usize {
            return Err(SelectionError::MalformedCounters(format!(
                "label of {} bytes is too long to store",
                label.len()
            )));
        }
        bins.push(HistogramBinEntry {
            label_len: label.len() as u16,
            label: label.as_bytes().to_vec(),
            content,
        });
    }
    let file = HistogramFile {
        bin_count,
        bins,
    };
    file.write(writer)?;
    Ok(())
}
