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

    crates/skimtool/src/select/mod.rs

    Run a list of bunch crossings through the selection and report which
    were selected. Input is one global bunch-crossing id per line; blank
    lines and lines starting with '#' are skipped.
*/
pub(crate) mod args;

use anyhow::{bail, Context, Error};
use std::io::{BufWriter, Write};

use crate::args::GlobalOptions;
use skimsel::{metadata::DirectorySource, params::SelectorParams, TriggerSelector};

fn read_bunch_crossings(params: &args::SelectParams) -> Result<Vec<u64>, Error> {
    let text = std::fs::read_to_string(&params.in_file)
        .with_context(|| format!("reading {}", params.in_file.display()))?;

    let mut bcs = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<u64>() {
            Ok(bc) => bcs.push(bc),
            Err(e) => bail!("Line {}: invalid bunch crossing '{}': {}", line_no + 1, line, e),
        }
    }
    Ok(bcs)
}

pub(crate) fn run(global: &GlobalOptions, params: args::SelectParams) -> Result<(), Error> {
    let bcs = read_bunch_crossings(&params)?;
    let location = &params.location;

    let mut selector_params = SelectorParams::new(&params.triggers);
    if let Some(tolerance) = params.tolerance {
        selector_params = selector_params.with_tolerance(tolerance);
    }

    let mut selector = TriggerSelector::new(DirectorySource::new(&location.base), selector_params);
    let offsets = match selector.init_run(location.run, location.timestamp) {
        Ok(offsets) => offsets,
        Err(e) => {
            bail!("Error initializing run {}: {}", location.run, e);
        }
    };

    let names = selector.params().trigger_names();
    global.loud(|| {
        println!("Triggers of interest for run {}:", location.run);
        for (name, offset) in names.iter().zip(offsets.iter()) {
            println!("  {:<40} bit {:>4}", name, offset);
        }
        println!("Checking {} bunch crossings...", bcs.len());
    });

    let mut out = BufWriter::new(std::io::stdout());
    let mut selected = 0usize;
    for bc in bcs.iter().copied() {
        if selector.is_selected(bc) {
            selected += 1;
            writeln!(out, "{}", bc)?;
        }
    }
    out.flush()?;
    drop(out);

    global.loud(|| {
        println!("{} of {} bunch crossings selected", selected, bcs.len());
        for (name, count) in names.iter().zip(selector.counts()) {
            println!("  {:<40} {:>10}", name, count);
        }
    });

    Ok(())
}
