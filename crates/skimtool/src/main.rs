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

    crates/skimtool/src/main.rs
*/

pub mod args;
pub mod info;
pub mod select;

use anyhow::Error;
use bpaf::Parser;

use crate::args::Command;
use args::command_parser;
use skimsel::{BC_PER_ORBIT, DEFAULT_BC_TOLERANCE, SELECTION_MASK_BITS};

fn main() -> Result<(), Error> {
    let app_params = command_parser().run();

    let default_filter = app_params.global.default_log_filter();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let command_result = match &app_params.command {
        Command::Version => {
            println!(
                "skimtool v{} ({}-bit selection masks, {} bunch crossings per orbit, default tolerance {})",
                env!("CARGO_PKG_VERSION"),
                SELECTION_MASK_BITS,
                BC_PER_ORBIT,
                DEFAULT_BC_TOLERANCE
            );
            Ok(())
        }
        Command::Info(params) => info::run(&app_params.global, params.clone()),
        Command::Select(params) => select::run(&app_params.global, params.clone()),
    };

    match command_result {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("Command '{}' failed: {}", app_params.command, e);
            for cause in e.chain().skip(1) {
                eprintln!("Caused by: {}", cause);
            }
            std::process::exit(1);
        }
    }
}
