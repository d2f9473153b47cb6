//! File-copy executor
//! Copies one file, honoring the overwrite flag; every I/O fault becomes a
//! failure Response rather than a propagated error

use crate::domain::commands::{Command, Response};
use crate::domain::executors::{internal, unsupported, DomainExecutor};
use crate::domain::ports::FileStore;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub struct FileCopyExecutor {
    store: Arc<dyn FileStore>,
}

impl FileCopyExecutor {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }
}

impl DomainExecutor for FileCopyExecutor {
    fn can_execute(&self, command: &Command) -> bool {
        matches!(command, Command::FileCopy { .. })
    }

    fn execute(&self, command: &Command) -> Response {
        match command {
            Command::FileCopy {
                source_path,
                destination_path,
                overwrite,
            } => {
                let source = Path::new(source_path);
                let destination = Path::new(destination_path);
                match self.store.copy(source, destination, *overwrite) {
                    Ok(()) => {
                        debug!(%source_path, %destination_path, "copied file");
                        Response::success(command.name(), true)
                    }
                    Err(err) => Response::failure(command.name(), &internal(&err)),
                }
            }
            other => unsupported(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::CommandResult;
    use crate::domain::error::ErrorCode;
    use crate::infrastructure::StdFileStore;
    use std::fs;

    fn copy_command(source: &Path, destination: &Path, overwrite: bool) -> Command {
        Command::FileCopy {
            source_path: source.display().to_string(),
            destination_path: destination.display().to_string(),
            overwrite,
        }
    }

    #[test]
    fn test_copies_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.txt");
        let destination = dir.path().join("copy.txt");
        fs::write(&source, b"payload").unwrap();

        let executor = FileCopyExecutor::new(Arc::new(StdFileStore));
        let response = executor.execute(&copy_command(&source, &destination, false));

        assert_eq!(response.result(), Some(&CommandResult::Boolean(true)));
        assert_eq!(fs::read(&destination).unwrap(), b"payload");
    }

    #[test]
    fn test_refuses_to_clobber_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.txt");
        let destination = dir.path().join("existing.txt");
        fs::write(&source, b"new").unwrap();
        fs::write(&destination, b"old").unwrap();

        let executor = FileCopyExecutor::new(Arc::new(StdFileStore));
        let response = executor.execute(&copy_command(&source, &destination, false));

        assert_eq!(response.error_code(), ErrorCode::InternalError);
        assert_eq!(fs::read(&destination).unwrap(), b"old");
    }

    #[test]
    fn test_overwrite_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.txt");
        let destination = dir.path().join("existing.txt");
        fs::write(&source, b"new").unwrap();
        fs::write(&destination, b"old").unwrap();

        let executor = FileCopyExecutor::new(Arc::new(StdFileStore));
        let response = executor.execute(&copy_command(&source, &destination, true));

        assert!(response.is_success());
        assert_eq!(fs::read(&destination).unwrap(), b"new");
    }

    #[test]
    fn test_missing_source_is_a_failure_response() {
        let dir = tempfile::tempdir().unwrap();
        let executor = FileCopyExecutor::new(Arc::new(StdFileStore));

        let response = executor.execute(&copy_command(
            &dir.path().join("absent.txt"),
            &dir.path().join("copy.txt"),
            false,
        ));
        assert_eq!(response.error_code(), ErrorCode::InternalError);
        assert!(response.error_message().is_some());
    }
}
