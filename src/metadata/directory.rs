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

    src/metadata/directory.rs

    A metadata source backed by a directory tree:

        <base>/<run>/<valid_from>/records.bin
                                 /selections.bin
                                 /scalers.bin        (optional)
                                 /inspected_tvx.bin  (optional)
*/

use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

use crate::{
    metadata::{formats, select_version, CounterTable, MetadataSource, RunMetadata},
    RunNumber,
    SelectionError,
};

pub const RECORDS_FILE_NAME: &str = "records.bin";

#[derive(Clone, Debug)]
pub struct DirectorySource {
    base: PathBuf,
}

impl DirectorySource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        DirectorySource { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Validity starts of all versions stored for `run`. Entries that are not numeric are skipped.
    pub fn versions(&self, run: RunNumber) -> Result<Vec<u64>, SelectionError> {
        let run_dir = self.base.join(run.to_string());
        if !run_dir.is_dir() {
            return Err(SelectionError::RunNotFound(run));
        }

        let mut versions = Vec::new();
        for entry in fs::read_dir(&run_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().to_str().and_then(|name| name.parse::<u64>().ok()) {
                Some(valid_from) => versions.push(valid_from),
                None => log::debug!(
                    "DirectorySource::versions(): ignoring non-version entry {:?}",
                    entry.path()
                ),
            }
        }
        versions.sort_unstable();
        Ok(versions)
    }
}

impl MetadataSource for DirectorySource {
    fn load(&self, run: RunNumber, timestamp: u64) -> Result<RunMetadata, SelectionError> {
        let versions = self.versions(run)?;
        let valid_from = select_version(versions, timestamp).ok_or(SelectionError::NoValidMetadata { run, timestamp })?;
        let dir = self.base.join(run.to_string()).join(valid_from.to_string());
        log::debug!("DirectorySource::load(): loading run {} from {}", run, dir.display());

        let records = formats::read_records(&mut read_file(&dir.join(RECORDS_FILE_NAME))?)?;

        let mut metadata = RunMetadata {
            records,
            ..Default::default()
        };
        for table in CounterTable::all() {
            let path = dir.join(table.file_name());
            if !path.exists() {
                if table.required() {
                    return Err(SelectionError::IoError(format!("missing {}", path.display())));
                }
                continue;
            }
            let histogram = formats::read_histogram(&mut read_file(&path)?)?;
            match table {
                CounterTable::Selections => metadata.selections = histogram,
                CounterTable::Scalers => metadata.scalers = Some(histogram),
                CounterTable::InspectedTvx => metadata.inspected_tvx = Some(histogram),
            }
        }

        metadata.validate()?;
        log::debug!(
            "DirectorySource::load(): run {} has {} records and {} selection labels",
            run,
            metadata.records.len(),
            metadata.trigger_labels().len()
        );
        Ok(metadata)
    }
}

fn read_file(path: &Path) -> Result<Cursor<Vec<u8>>, SelectionError> {
    let buffer = fs::read(path).map_err(|e| SelectionError::IoError(format!("{}: {}", path.display(), e)))?;
    Ok(Cursor::new(buffer))
}

fn write_file(path: &Path, buffer: Cursor<Vec<u8>>) -> Result<(), SelectionError> {
    fs::write(path, buffer.into_inner()).map_err(|e| SelectionError::IoError(format!("{}: {}", path.display(), e)))
}

/// Store `metadata` under `base` in the layout read by [DirectorySource].
pub fn write_run_metadata(
    base: &Path,
    run: RunNumber,
    valid_from: u64,
    metadata: &RunMetadata,
) -> Result<PathBuf, SelectionError> {
    let dir = base.join(run.to_string()).join(valid_from.to_string());
    fs::create_dir_all(&dir)?;

    let mut buffer = Cursor::new(Vec::new());
    formats::write_records(&mut buffer, &metadata.records)?;
    write_file(&dir.join(RECORDS_FILE_NAME), buffer)?;

    for table in CounterTable::all() {
        if let Some(histogram) = metadata.counters(table) {
            let mut buffer = Cursor::new(Vec::new());
            formats::write_histogram(&mut buffer, histogram)?;
            write_file(&dir.join(table.file_name()), buffer)?;
        }
    }

    Ok(dir)
}
