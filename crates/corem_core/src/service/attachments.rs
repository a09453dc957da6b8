//! Best-effort file attachment for projects.
//!
//! Copies a user-named file into a destination directory. Callers report a
//! failure and carry on; an attachment error never aborts an export.

use super::{ServiceError, ServiceResult};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Copies `source` into `dest_dir`, keeping its file name.
///
/// # Errors
/// - `FileOperation` when `source` is not a regular file, has no file name,
///   or the copy fails.
pub fn attach_file(source: &Path, dest_dir: &Path) -> ServiceResult<PathBuf> {
    let file_name = match (source.is_file(), source.file_name()) {
        (true, Some(name)) => name.to_os_string(),
        _ => {
            let err = ServiceError::FileOperation {
                path: source.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            };
            warn!(
                "event=attach_file module=attachments status=error error_code={} path={}",
                err.code(),
                source.display()
            );
            return Err(err);
        }
    };

    let destination = dest_dir.join(file_name);
    let copied = std::fs::create_dir_all(dest_dir).and_then(|()| std::fs::copy(source, &destination));
    match copied {
        Ok(bytes) => {
            info!(
                "event=attach_file module=attachments status=ok dest={} bytes={}",
                destination.display(),
                bytes
            );
            Ok(destination)
        }
        Err(source_err) => {
            warn!(
                "event=attach_file module=attachments status=error error_code=file_operation_failed path={} error={}",
                source.display(),
                source_err
            );
            Err(ServiceError::FileOperation {
                path: source.to_path_buf(),
                source: source_err,
            })
        }
    }
}
