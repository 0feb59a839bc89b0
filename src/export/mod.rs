use crate::TaskRecord;
use std::io;
use std::process::ExitStatus;
use thiserror::Error;

pub mod command;
pub mod file;

pub use command::{CommandSource, OUTPUT_PLACEHOLDER, ScratchFile};
pub use file::{FileSource, ReaderSource};

/// Failure to obtain the export at all. Malformed due dates inside an
/// otherwise readable export are not errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to start export command '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("export command '{program}' exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("export command is empty")]
    EmptyCommand,
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Something that can produce the task export's rows.
pub trait ExportSource {
    fn read_records(&self) -> ExportResult<Vec<TaskRecord>>;
}

impl<S: ExportSource + ?Sized> ExportSource for Box<S> {
    fn read_records(&self) -> ExportResult<Vec<TaskRecord>> {
        (**self).read_records()
    }
}
