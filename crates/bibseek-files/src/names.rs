//! File name helpers.

use std::path::Path;

/// Characters that are not allowed in file names on common filesystems.
const FORBIDDEN_CHARACTERS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|', '{', '}'];

/// Makes `name` safe to use as a file name by replacing control characters
/// and reserved punctuation with `_`.
///
/// ```
/// use bibseek_files::clean_file_name;
///
/// assert_eq!(clean_file_name("Smith:2020/a"), "Smith_2020_a");
/// assert_eq!(clean_file_name("Smith2020"), "Smith2020");
/// ```
pub fn clean_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_control() || FORBIDDEN_CHARACTERS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Returns the text after the last `.` of the file name, if any.
pub fn file_extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|dot| &name[dot + 1..])
}

/// Returns the file name without its last extension.
///
/// Non UTF-8 file names yield an empty base name and never match a key.
pub fn base_name(path: &Path) -> &str {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}
