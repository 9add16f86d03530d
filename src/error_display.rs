//! User-facing error message formatting.
//!
//! Matches on typed errors (io::ErrorKind, serde_json categories) found in a report's
//! cause chain instead of parsing display strings.

use std::io;
use std::path::Path;

/// Format an io::Error as a user-facing message by matching on ErrorKind.
pub fn user_message_from_io(err: &io::Error, context: Option<&str>) -> String {
    use std::io::ErrorKind;

    let base = match err.kind() {
        ErrorKind::NotFound => "File or directory not found.".to_string(),
        ErrorKind::PermissionDenied => "Permission denied. Check read access.".to_string(),
        ErrorKind::InvalidData | ErrorKind::InvalidInput => {
            "Invalid or corrupted data.".to_string()
        }
        ErrorKind::UnexpectedEof => "Unexpected end of file.".to_string(),
        _ => {
            let msg = err.to_string();
            if msg.contains("Is a directory") {
                "Path is a directory, not a file.".to_string()
            } else if msg.contains("No space left") {
                "No space left on device. Free up disk space and try again.".to_string()
            } else {
                msg
            }
        }
    };

    match context {
        Some(ctx) if !ctx.is_empty() => format!("{} {}", base, ctx),
        _ => base,
    }
}

/// Format a JSON error with its location.
pub fn user_message_from_json(err: &serde_json::Error) -> String {
    use serde_json::error::Category;

    let what = match err.classify() {
        Category::Syntax => "Invalid JSON",
        Category::Eof => "JSON ends unexpectedly",
        Category::Data => "Unexpected JSON structure",
        Category::Io => "Could not read JSON",
    };
    format!("{} at line {}, column {}.", what, err.line(), err.column())
}

/// Walks the cause chain for a known error type; otherwise the first line of the report.
pub fn user_message_from_report(report: &color_eyre::eyre::Report, path: Option<&Path>) -> String {
    let mut msg = None;
    for cause in report.chain() {
        if let Some(json_err) = cause.downcast_ref::<serde_json::Error>() {
            msg = Some(user_message_from_json(json_err));
            break;
        }
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            msg = Some(user_message_from_io(io_err, None));
            break;
        }
    }

    let msg = msg.unwrap_or_else(|| {
        let display = report.to_string();
        display
            .lines()
            .next()
            .map(str::trim)
            .unwrap_or("An error occurred")
            .to_string()
    });
    match path {
        Some(p) => format!("Failed to load {}: {}", p.display(), msg),
        None => msg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Dataset;

    #[test]
    fn io_not_found() {
        let err = io::Error::new(io::ErrorKind::NotFound, "No such file");
        let msg = user_message_from_io(&err, None);
        assert!(msg.contains("not found"), "got: {}", msg);
        let msg = user_message_from_io(&err, Some("(dashboard.json)"));
        assert!(msg.ends_with("(dashboard.json)"), "got: {}", msg);
    }

    #[test]
    fn io_permission_denied() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let msg = user_message_from_io(&err, None);
        assert!(msg.to_lowercase().contains("permission"), "got: {}", msg);
    }

    #[test]
    fn report_with_json_error() {
        let report = Dataset::from_json_str("{\"a\": ").unwrap_err();
        let msg = user_message_from_report(&report, Some(Path::new("d.json")));
        assert!(msg.starts_with("Failed to load d.json: "), "got: {}", msg);
        assert!(msg.contains("line 1"), "got: {}", msg);
    }

    #[test]
    fn report_with_missing_file() {
        let report = Dataset::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        let msg = user_message_from_report(&report, None);
        assert!(msg.contains("not found"), "got: {}", msg);
    }

    #[test]
    fn report_fallback_first_line() {
        let report = Dataset::from_json_str("[1]").unwrap_err();
        let msg = user_message_from_report(&report, None);
        assert!(msg.contains("JSON object"), "got: {}", msg);
    }
}
