//! Error helper functions for creating actionable error messages

use std::io;
use std::path::Path;

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Check if an IO error is a "not found" error
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Check if a rename failed because source and destination are on different filesystems
pub fn is_cross_device(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices
}

fn parent_display(path: &Path) -> String {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
        _ => ".".to_string(),
    }
}

/// Message for a failed move or copy of `from` to `to`
pub fn file_operation_error(from: &Path, to: &Path, copying: bool, err: &io::Error) -> String {
    let verb = if copying { "copy" } else { "rename" };
    let base = format!(
        "Failed to {} '{}' to '{}'",
        verb,
        from.display(),
        to.display()
    );

    if is_permission_denied(err) {
        format!(
            "{}\n\n\
             Cause: Permission denied\n\n\
             Possible fixes:\n\
             1. Check write permissions on the directory: ls -ld '{}'\n\
             2. Ensure write access with: chmod u+w '{}'",
            base,
            parent_display(to),
            parent_display(to)
        )
    } else if is_not_found(err) {
        format!(
            "{}\n\n\
             Cause: File not found\n\n\
             Possible fixes:\n\
             1. Check the file path is correct: ls -l '{}'\n\
             2. Use an absolute path if the relative path is ambiguous",
            base,
            from.display()
        )
    } else if !copying && is_cross_device(err) {
        format!(
            "{}\n\n\
             Cause: Source and destination are on different filesystems\n\n\
             Possible fixes:\n\
             1. Use --copy to copy the file instead of moving it",
            base
        )
    } else {
        format!("{}: {}", base, err)
    }
}
