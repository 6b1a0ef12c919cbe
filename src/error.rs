// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// The remote page could not be retrieved. Never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("GET {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned non-success status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("reading body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The scraped page no longer has the layout the normalizer was written against.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaMismatchError {
    #[error("expected {expected} ship tables, found {found}")]
    TableCount { expected: usize, found: usize },

    #[error("section {section} has no table")]
    MissingTable { section: usize },

    #[error("table {table}, row {row}: missing column `{label}`")]
    MissingColumn {
        table: usize,
        row: usize,
        label: String,
    },
}

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("opening {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("{path:?} has no worksheet")]
    NoSheet { path: PathBuf },

    #[error("{path:?} is missing the `{header}` column")]
    MissingHeader { path: PathBuf, header: &'static str },

    #[error("replacing {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}
