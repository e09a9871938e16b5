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

    crates/skimtool/src/args.rs

    Command line argument parsers shared between commands.
*/

use std::{
    fmt::{Display, Formatter},
    io::Write,
    path::PathBuf,
};

use crate::{
    info::args::{info_parser, InfoParams},
    select::args::{select_parser, SelectParams},
};
use bpaf::*;
use skimsel::RunNumber;

#[derive(Clone, Debug)]
pub(crate) enum Command {
    Version,
    Info(InfoParams),
    Select(SelectParams),
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Version => write!(f, "version"),
            Command::Info(_) => write!(f, "info"),
            Command::Select(_) => write!(f, "select"),
        }
    }
}

#[derive(Debug)]
pub(crate) struct AppParams {
    pub global:  GlobalOptions,
    pub command: Command,
}

#[derive(Debug)]
pub struct GlobalOptions {
    pub silent: bool,
}

impl GlobalOptions {
    pub fn loud<F: FnMut()>(&self, mut f: F) {
        if !self.silent {
            f();
            _ = std::io::stdout().flush();
        }
    }

    /// Log filter used when RUST_LOG is not set. The selection index reports resolved trigger
    /// bits at info level, which --silent hides.
    pub fn default_log_filter(&self) -> &'static str {
        if self.silent {
            "warn"
        }
        else {
            "info"
        }
    }
}

pub fn global_options_parser() -> impl Parser<GlobalOptions> {
    let silent = long("silent")
        .help("Suppress all output except required output")
        .switch();

    construct!(GlobalOptions { silent })
}

/// Location of the selection metadata for one run, shared by every command.
#[derive(Clone, Debug)]
pub(crate) struct RunLocation {
    pub(crate) base: PathBuf,
    pub(crate) run: RunNumber,
    pub(crate) timestamp: u64,
}

pub(crate) fn base_dir_parser() -> impl Parser<PathBuf> {
    long("base")
        .short('b')
        .argument::<PathBuf>("METADATA_DIR")
        .help("Path to the selection metadata directory")
}

pub(crate) fn run_parser() -> impl Parser<RunNumber> {
    long("run")
        .short('r')
        .argument::<RunNumber>("RUN")
        .help("Run number to look up")
}

pub(crate) fn timestamp_parser() -> impl Parser<u64> {
    long("timestamp")
        .short('t')
        .argument::<u64>("TIMESTAMP")
        .help("Timestamp at which the metadata must be valid (default: latest)")
        .fallback(u64::MAX)
}

pub(crate) fn run_location_parser() -> impl Parser<RunLocation> {
    let base = base_dir_parser();
    let run = run_parser();
    let timestamp = timestamp_parser();

    construct!(RunLocation { base, run, timestamp })
}

pub(crate) fn in_file_parser() -> impl Parser<PathBuf> {
    long("in_file")
        .short('i')
        .argument::<PathBuf>("INPUT_FILE")
        .help("Path to input file")
}

pub(crate) fn command_parser() -> impl Parser<AppParams> {
    let global = global_options_parser();

    let version = pure(Command::Version)
        .to_options()
        .command("version")
        .help("Display version information and exit");

    let info = construct!(Command::Info(info_parser()))
        .to_options()
        .command("info")
        .help("Display the selection metadata of a run");

    let select = construct!(Command::Select(select_parser()))
        .to_options()
        .command("select")
        .help("Check a list of bunch crossings against triggers of interest");

    let command = construct!([version, info, select]);

    construct!(AppParams { global, command })
}
