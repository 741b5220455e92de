use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

pub const DEFAULT_FORMAT: &str = "YYYY-MM-DD Hh-Mm-Ss";

/// Rename image files to the oldest date found in EXIF metadata and file
/// properties.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Config {
    /// Recurse into all subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// The format to apply to renamed files, excluding the extension.
    ///
    /// Date and time tokens are substituted with values from the oldest
    /// date found for each image. Tokens must match case exactly:
    ///
    ///   YYYY  (4-digit year)
    ///   YY    (2-digit year)
    ///   MM    (month)
    ///   DD    (day)
    ///   Hh    (hour)
    ///   Mm    (minute)
    ///   Ss    (second)
    ///
    /// Reserved filesystem characters are silently removed:  \ / : * ? " < > |
    #[arg(short, long, default_value = DEFAULT_FORMAT, verbatim_doc_comment)]
    pub fmt: String,

    /// Folder containing images
    pub folder: PathBuf,
}

/// Counters for one run, threaded through the walker and reported at the end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub folders: u64,
    pub images: u64,
    pub skipped: u64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Folders scanned: {} | Images renamed: {} | Files skipped: {}",
            self.folders, self.images, self.skipped
        )
    }
}

/// Fatal conditions. Any of these aborts the whole run, not just the current
/// file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenameError {
    #[error("no dates found")]
    NoDates,

    #[error("invalid date length: {0:?} is not 19 characters")]
    InvalidDateLength(String),

    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    #[error("too many duplicate dates: no free name for {0:?} after 30 attempts")]
    TooManyDuplicates(String),
}
