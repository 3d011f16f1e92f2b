//! Aggregated tag string helpers.
//!
//! Tags travel between stores as a single comma-separated string of names.
//! The store produces it by joining names with `", "` in name order.

/// Separator used when joining tag names.
pub const TAG_SEPARATOR: &str = ", ";

/// Split an aggregated tag string into names.
///
/// Splits on `,`, trims surrounding whitespace from each piece, and drops
/// pieces that end up empty. Order and duplicates are preserved.
pub fn split_tag_names(tags: &str) -> Vec<&str> {
    tags.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Join tag names into the aggregated form.
pub fn join_tag_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR)
}
