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

    crates/skimtool/src/select/args.rs
*/
use crate::args::{in_file_parser, run_location_parser, RunLocation};
use bpaf::{construct, long, Parser};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub(crate) struct SelectParams {
    pub(crate) location: RunLocation,
    pub(crate) triggers: String,
    pub(crate) tolerance: Option<u64>,
    pub(crate) in_file: PathBuf,
}

fn triggers_parser() -> impl Parser<String> {
    long("triggers")
        .argument::<String>("TRIGGERS")
        .help("Comma-separated list of triggers of interest")
}

fn tolerance_parser() -> impl Parser<u64> {
    long("tolerance")
        .argument::<u64>("BCS")
        .help("Number of bunch crossings either side of each query to match")
}

pub(crate) fn select_parser() -> impl Parser<SelectParams> {
    let location = run_location_parser();
    let triggers = triggers_parser();
    let tolerance = tolerance_parser().optional();
    let in_file = in_file_parser();

    construct!(SelectParams {
        location,
        triggers,
        tolerance,
        in_file
    })
}
