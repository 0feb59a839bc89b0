use super::{ExportResult, ExportSource};
use crate::task::{TaskRecord, read_task_records};
use std::cell::RefCell;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// An export already on disk. The file belongs to the caller and is left in place.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ExportSource for FileSource {
    fn read_records(&self) -> ExportResult<Vec<TaskRecord>> {
        log::debug!("reading export from {}", self.path.display());
        let file = File::open(&self.path)?;
        Ok(read_task_records(file)?)
    }
}

/// An in-memory or streamed export such as stdin. The reader is consumed on
/// the first read; later reads see an exhausted stream.
pub struct ReaderSource<R> {
    reader: RefCell<R>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: RefCell::new(reader),
        }
    }
}

impl<R: Read> ExportSource for ReaderSource<R> {
    fn read_records(&self) -> ExportResult<Vec<TaskRecord>> {
        let mut reader = self.reader.borrow_mut();
        Ok(read_task_records(&mut *reader)?)
    }
}
