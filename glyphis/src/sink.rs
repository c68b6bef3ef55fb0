// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Destinations for finished pages.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::page::PageBuffer;
use crate::{Error, dds};

/// Receives each page once it is full, and the last page at the end of a run.
pub trait PageSink {
    /// Encodes and stores `page`.
    ///
    /// Called exactly once per page index, in increasing order.
    fn write_page(&mut self, page: &PageBuffer) -> Result<(), Error>;
}

impl<S: PageSink + ?Sized> PageSink for &mut S {
    fn write_page(&mut self, page: &PageBuffer) -> Result<(), Error> {
        (**self).write_page(page)
    }
}

/// Collects encoded pages in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pages: Vec<Vec<u8>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded DDS files, indexed by page.
    pub fn pages(&self) -> &[Vec<u8>] {
        &self.pages
    }

    /// Consumes the sink, returning the encoded pages.
    pub fn into_pages(self) -> Vec<Vec<u8>> {
        self.pages
    }
}

impl PageSink for MemorySink {
    fn write_page(&mut self, page: &PageBuffer) -> Result<(), Error> {
        self.pages.push(dds::encode_page(page));
        Ok(())
    }
}

/// Writes pages next to an output prefix as `<prefix>_<index>.dds`.
///
/// Keeps track of every file it created so that a failed run can remove
/// them again with [`discard`](Self::discard).
#[derive(Debug)]
pub struct DirectorySink {
    prefix: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Creates a sink writing pages for `prefix`.
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            written: Vec::new(),
        }
    }

    /// The output prefix.
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Path of the file holding page `index`.
    pub fn page_path(&self, index: u32) -> PathBuf {
        let mut name = self.prefix.clone().into_os_string();
        name.push(format!("_{index}.dds"));
        PathBuf::from(name)
    }

    /// Files written so far, in page order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Removes every file this sink has written.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn discard(self) {
        for path in self.written {
            if let Err(err) = std::fs::remove_file(&path) {
                log::warn!("could not remove {}: {err}", path.display());
            }
        }
    }
}

impl PageSink for DirectorySink {
    fn write_page(&mut self, page: &PageBuffer) -> Result<(), Error> {
        let path = self.page_path(page.page_index());
        let file = File::create(&path).map_err(|err| Error::output(err).with_path(&path))?;
        self.written.push(path.clone());
        let mut out = BufWriter::new(file);
        dds::write_page(page, &mut out)
            .and_then(|()| out.flush())
            .map_err(|err| Error::output(err).with_path(&path))?;
        log::info!("wrote page {} to {}", page.page_index(), path.display());
        Ok(())
    }
}
