//! Object key layout and the filename codec.
//!
//! Keys look like:
//!
//! ```text
//! <userId>/<timestamp>_<category>_<safeName>.<ext>          regular
//! <userId>/private/<timestamp>_<category>_<safeName>.<ext>  private
//! <userId>/trash/<filename>                                 trashed
//! ```
//!
//! The codec is lossy: sanitizing turns every non-alphanumeric character
//! of the display name into `_`, and decoding turns every `_` after the
//! category back into a space.

use serde::{Deserialize, Serialize};

/// Path segment holding private documents.
pub const PRIVATE_SEGMENT: &str = "private";
/// Path segment holding trashed documents.
pub const TRASH_SEGMENT: &str = "trash";
/// Category reported for names that do not follow the encoding.
pub const UNCATEGORIZED: &str = "other";
/// Category every private document is reported under.
pub const PRIVATE_CATEGORY: &str = "private";

/// Which of a user's document prefixes an object lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Directly under `<userId>/`.
    Regular,
    /// Under `<userId>/private/`.
    Private,
}

/// Category and display name recovered from a key's filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedName {
    /// Category segment.
    pub category: String,
    /// Display name with spaces restored.
    pub display_name: String,
}

/// Replace every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Build `<timestamp>_<category>_<sanitizedName>.<extension>`.
pub fn encode(timestamp: i64, category: &str, display_name: &str, extension: &str) -> String {
    format!(
        "{timestamp}_{category}_{}.{extension}",
        sanitize_name(display_name)
    )
}

/// Recover category and display name from a filename.
///
/// Filenames with fewer than three `_`-separated segments are reported as
/// [`UNCATEGORIZED`] with the filename itself as display name.
pub fn decode(filename: &str) -> DecodedName {
    let parts: Vec<&str> = filename.split('_').collect();
    if parts.len() < 3 {
        return DecodedName {
            category: UNCATEGORIZED.to_string(),
            display_name: filename.to_string(),
        };
    }

    let rest = parts[2..].join("_");
    let stem = strip_extension(&rest);
    DecodedName {
        category: parts[1].to_string(),
        display_name: stem.replace('_', " "),
    }
}

/// Split `name.ext` into stem and extension. Names without a usable
/// extension return `None`.
pub fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains('/') => {
            (stem, Some(ext))
        }
        _ => (filename, None),
    }
}

fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => stem,
        _ => name,
    }
}

/// Prefix listing a user's documents of the given visibility.
pub fn document_prefix(user_id: &str, visibility: Visibility) -> String {
    match visibility {
        Visibility::Regular => user_id.to_string(),
        Visibility::Private => format!("{user_id}/{PRIVATE_SEGMENT}"),
    }
}

/// Prefix listing a user's trash.
pub fn trash_prefix(user_id: &str) -> String {
    format!("{user_id}/{TRASH_SEGMENT}")
}

/// Key of `filename` under the given prefix.
pub fn join(prefix: &str, filename: &str) -> String {
    format!("{prefix}/{filename}")
}

/// Key of a trashed file.
pub fn trash_path(user_id: &str, filename: &str) -> String {
    join(&trash_prefix(user_id), filename)
}

/// Key a trashed file is restored to: `<userId>/<timestamp>_<filename>`.
pub fn restored_path(user_id: &str, timestamp: i64, filename: &str) -> String {
    format!("{user_id}/{timestamp}_{filename}")
}

/// Last path segment of a key.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Leading path segment of a key, which is the owning user's id.
pub fn owner_of(path: &str) -> &str {
    path.split('/').next().unwrap_or(path)
}
