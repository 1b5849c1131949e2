//! Input and output files.
//!
//! Every failure here is an [`Error::Io`] carrying the path, and is fatal to
//! the run.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::format::OutputRecord;

/// The line-oriented candidate list.
#[derive(Debug, Clone)]
pub struct InputFile {
    path: PathBuf,
}

impl InputFile {
    /// Refer to the input file at `path`. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Count the lines in the file without validating them.
    pub fn count_lines(&self) -> Result<usize> {
        let mut count = 0;
        for line in self.lines()? {
            line?;
            count += 1;
        }
        Ok(count)
    }

    /// Open the file and stream its lines as raw bytes.
    ///
    /// Each item is one line without its `\n` or `\r\n` terminator. Lines
    /// are not decoded here, so invalid UTF-8 is left for the caller to
    /// classify. A read error is yielded once and ends the stream.
    pub fn lines(&self) -> Result<impl Iterator<Item = Result<Vec<u8>>> + use<>> {
        let file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let path = self.path.clone();
        let mut reader = BufReader::new(file);
        let mut failed = false;

        Ok(std::iter::from_fn(move || {
            if failed {
                return None;
            }
            let mut line = Vec::new();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => None,
                Ok(_) => {
                    if line.last() == Some(&b'\n') {
                        line.pop();
                        if line.last() == Some(&b'\r') {
                            line.pop();
                        }
                    }
                    Some(Ok(line))
                }
                Err(e) => {
                    failed = true;
                    Some(Err(Error::io(&path, e)))
                }
            }
        }))
    }
}

/// Destination for formatted good-host lines.
pub trait RecordSink {
    /// Append one record. Failure is fatal to the run.
    fn append(&mut self, record: &OutputRecord) -> Result<()>;
}

impl RecordSink for Vec<OutputRecord> {
    fn append(&mut self, record: &OutputRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// The known-good list, opened for appending.
///
/// The file is created if missing and never truncated, so repeated runs
/// accumulate.
#[derive(Debug)]
pub struct OutputFile {
    path: PathBuf,
    file: File,
}

impl OutputFile {
    /// Open `path` in append mode.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;
        Ok(Self { path, file })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for OutputFile {
    fn append(&mut self, record: &OutputRecord) -> Result<()> {
        self.file
            .write_all(record.as_bytes())
            .and_then(|()| self.file.flush())
            .map_err(|e| Error::io(&self.path, e))
    }
}
