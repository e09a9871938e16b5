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

    crates/skimtool/src/info/args.rs
*/
use crate::args::{run_location_parser, RunLocation};
use bpaf::{construct, Parser};

#[derive(Clone, Debug)]
pub(crate) struct InfoParams {
    pub(crate) location: RunLocation,
    pub(crate) record_list: bool,
}

fn record_list_parser() -> impl Parser<bool> {
    bpaf::long("record-list")
        .help("List all selection records of the run")
        .switch()
}

pub(crate) fn info_parser() -> impl Parser<InfoParams> {
    let location = run_location_parser();
    let record_list = record_list_parser();

    construct!(InfoParams { location, record_list })
}
