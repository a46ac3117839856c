//! Endpoint names derived from file names.

use std::path::Path;

/// Endpoint for a source file: its file name with the final extension removed.
///
/// Returns `None` when the path has no file name or the name is not UTF-8.
/// A leading dot does not start an extension, so `.hidden` maps to `.hidden`.
pub fn endpoint_for_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let endpoint = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    Some(endpoint.to_string())
}
