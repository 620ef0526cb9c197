/// Suffix expected on files handed to the decoder.
pub const INPUT_SUFFIX: &str = ".sii";
/// Suffix given to the decoded download.
pub const DECODED_SUFFIX: &str = "-decoded.sii";

/// Download name for a decoded file: `save.sii` becomes `save-decoded.sii`.
///
/// The suffix match is ASCII case-insensitive. Names without the suffix keep
/// their full text and gain `-decoded.sii`; an empty name becomes `untitled`.
pub fn decoded_filename(original: &str) -> String {
    let trimmed = original.trim();
    let stem = match split_suffix(trimmed) {
        Some(stem) => stem,
        None => trimmed,
    };
    let stem = if stem.is_empty() { "untitled" } else { stem };
    format!("{stem}{DECODED_SUFFIX}")
}

fn split_suffix(name: &str) -> Option<&str> {
    let cut = name.len().checked_sub(INPUT_SUFFIX.len())?;
    let (stem, suffix) = (name.get(..cut)?, name.get(cut..)?);
    suffix.eq_ignore_ascii_case(INPUT_SUFFIX).then_some(stem)
}
