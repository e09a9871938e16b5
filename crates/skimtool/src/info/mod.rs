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

    crates/skimtool/src/info/mod.rs

    Print the selection metadata stored for a run.
*/
use crate::args::GlobalOptions;
use anyhow::{bail, Error};
use skimsel::{
    metadata::{DirectorySource, MetadataSource},
    record::RecordTable,
    BunchCrossing,
};

pub mod args;

pub(crate) fn run(_global: &GlobalOptions, params: args::InfoParams) -> Result<(), Error> {
    let location = &params.location;
    let source = DirectorySource::new(&location.base);

    let metadata = match source.load(location.run, location.timestamp) {
        Ok(metadata) => metadata,
        Err(e) => {
            bail!("Error loading metadata for run {}: {}", location.run, e);
        }
    };

    println!("Run {} selection info:", location.run);
    println!("{}", "-".repeat(79));
    println!("Selection records:      {}", metadata.records.len());
    if let Some(total) = metadata.total_analysed() {
        println!("Total analysed events:  {}", total);
    }
    if let Some(total) = metadata.total_selected() {
        println!("Total selected events:  {}", total);
    }
    println!();

    println!("Selections:");
    println!("{}", "-".repeat(79));
    for (bit, label) in metadata.trigger_labels().iter().enumerate() {
        let count = metadata.selections.content(bit + 1).unwrap_or(0.0);
        println!("  [{:>3}] {:<40} {:>12}", bit, label, count);
    }
    println!();

    if let Some(scalers) = &metadata.scalers {
        println!("Scalers:");
        println!("{}", "-".repeat(79));
        for (label, count) in scalers.bins() {
            println!("  {:<46} {:>12}", label, count);
        }
        println!();
    }

    if let Some(tvx) = &metadata.inspected_tvx {
        println!("Inspected TVX: {}", tvx.integral());
        println!();
    }

    if params.record_list {
        let table = RecordTable::new(metadata.records.iter().copied());
        for record in table.iter() {
            println!(
                "  {} .. {} {}",
                BunchCrossing(record.range.min()),
                BunchCrossing(record.range.max()),
                record.mask
            );
        }
    }

    Ok(())
}
