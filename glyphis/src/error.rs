// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::MAX_PIXEL_SIZE;
use crate::targets::MalformedUtf8;

/// Error type for every fallible operation of an atlas run.
///
/// Carries a non-exhaustive [`ErrorKind`] plus whatever context the failing
/// operation had at hand: the file involved, the underlying I/O error, or the
/// classified UTF-8 fault in the target list.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    path: Option<PathBuf>,
    detail: Detail,
}

#[derive(Debug)]
enum Detail {
    Io(io::Error),
    Message(String),
    Utf8(MalformedUtf8),
    Size(u32),
    Cell { width: i32, height: i32, dimension: u32 },
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The file this error relates to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The classified UTF-8 fault, for [`ErrorKind::MalformedInput`].
    pub fn malformed_utf8(&self) -> Option<MalformedUtf8> {
        match self.detail {
            Detail::Utf8(fault) => Some(fault),
            _ => None,
        }
    }

    /// Returns `true` when the error indicates a defect rather than bad
    /// input, configuration or environment.
    pub fn is_internal(&self) -> bool {
        self.kind == ErrorKind::Internal
    }

    /// Attaches the file path this error relates to.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub(crate) fn font_load(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FontLoad, Detail::Message(message.into()))
    }

    pub(crate) fn output(err: io::Error) -> Self {
        Self::new(ErrorKind::Output, Detail::Io(err))
    }

    pub(crate) fn malformed_input(fault: MalformedUtf8) -> Self {
        Self::new(ErrorKind::MalformedInput, Detail::Utf8(fault))
    }

    pub(crate) fn invalid_size(size: u32) -> Self {
        Self::new(ErrorKind::InvalidSize, Detail::Size(size))
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig, Detail::Message(message.into()))
    }

    pub(crate) fn invalid_cell(width: i32, height: i32, dimension: u32) -> Self {
        Self::new(
            ErrorKind::InvalidCell,
            Detail::Cell {
                width,
                height,
                dimension,
            },
        )
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, Detail::Message(message.into()))
    }

    fn new(kind: ErrorKind, detail: Detail) -> Self {
        Self {
            kind,
            path: None,
            detail,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.detail, self.kind) {
            (Detail::Io(err), _) => write!(f, "cannot write output: {err}")?,
            (Detail::Message(msg), ErrorKind::FontLoad) => {
                write!(f, "cannot load font: {msg}")?;
            }
            (Detail::Message(msg), ErrorKind::InvalidConfig) => {
                write!(f, "invalid packing configuration: {msg}")?;
            }
            (Detail::Message(msg), _) => write!(f, "{msg}")?,
            (Detail::Utf8(fault), _) => write!(f, "malformed UTF-8 in target list: {fault}")?,
            (Detail::Size(0), _) => write!(f, "size too small")?,
            (Detail::Size(size), _) => {
                write!(f, "size {size} too big (max is {MAX_PIXEL_SIZE})")?;
            }
            (
                Detail::Cell {
                    width,
                    height,
                    dimension,
                },
                _,
            ) => write!(
                f,
                "glyph cell {width}x{height} cannot be placed on a {dimension}x{dimension} page"
            )?,
        }
        if let Some(path) = &self.path {
            write!(f, " ({})", path.display())?;
        }
        Ok(())
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.detail {
            Detail::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::output(err)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::internal(format!("descriptor serialization failed: {err}"))
    }
}

/// The non-exhaustive category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The font resource could not be read or parsed.
    FontLoad,

    /// An output file could not be created or written.
    Output,

    /// The target codepoint list is not valid UTF-8.
    MalformedInput,

    /// The requested pixel size is outside the supported range.
    InvalidSize,

    /// The page dimension, a margin or a shift is out of range.
    InvalidConfig,

    /// A glyph cell cannot fit on an empty page.
    InvalidCell,

    /// A condition that indicates a defect rather than bad input.
    Internal,
}
