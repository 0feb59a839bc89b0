use super::{ExportError, ExportResult, ExportSource};
use crate::task::{TaskRecord, read_task_records};
use std::fs::File;
use std::io;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempPath;

/// Argument that is replaced by a scratch-file path when the export command
/// can only write to a file.
pub const OUTPUT_PLACEHOLDER: &str = "{out}";

/// Temporary file handed to an export command. The file is removed when the
/// guard drops, whichever way the read ends.
#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    pub fn new() -> io::Result<Self> {
        let path = tempfile::Builder::new()
            .prefix("tod-export-")
            .suffix(".csv")
            .tempfile()?
            .into_temp_path();
        log::debug!("created scratch file {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_records(&self) -> ExportResult<Vec<TaskRecord>> {
        let file = File::open(self.path())?;
        Ok(read_task_records(file)?)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        log::debug!("removing scratch file {}", self.path.display());
    }
}

/// Runs an external export command. Its stdout is decoded in memory unless an
/// argument equals [`OUTPUT_PLACEHOLDER`], in which case the command writes to
/// a [`ScratchFile`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_argv<I, S>(argv: I) -> ExportResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().ok_or(ExportError::EmptyCommand)?;
        if program.trim().is_empty() {
            return Err(ExportError::EmptyCommand);
        }
        Ok(Self::new(program, argv.collect()))
    }

    pub fn uses_scratch_file(&self) -> bool {
        self.args.iter().any(|arg| arg == OUTPUT_PLACEHOLDER)
    }

    fn run(&self, args: &[String]) -> ExportResult<Output> {
        log::debug!("running export command {} {:?}", self.program, args);
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| ExportError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(ExportError::CommandFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }

    fn read_via_scratch_file(&self) -> ExportResult<Vec<TaskRecord>> {
        let scratch = ScratchFile::new()?;
        let scratch_arg = scratch.path().to_string_lossy().into_owned();
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg == OUTPUT_PLACEHOLDER {
                    scratch_arg.clone()
                } else {
                    arg.clone()
                }
            })
            .collect();
        self.run(&args)?;
        scratch.read_records()
    }
}

impl ExportSource for CommandSource {
    fn read_records(&self) -> ExportResult<Vec<TaskRecord>> {
        if self.uses_scratch_file() {
            return self.read_via_scratch_file();
        }
        let output = self.run(&self.args)?;
        Ok(read_task_records(output.stdout.as_slice())?)
    }
}
