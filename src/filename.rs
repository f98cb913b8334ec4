//! Filename sanitization and `Content-Disposition` construction

/// Characters that are replaced with `_` in delivered filenames
const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maximum length of a sanitized name, in characters, before the extension
pub const MAX_FILENAME_CHARS: usize = 200;

/// Sanitize a media title into a filesystem- and header-safe filename stem.
///
/// - Replaces `< > : " / \ | ? *` and non-whitespace control characters with `_`
/// - Collapses whitespace runs to a single space and trims both ends
/// - Truncates to [`MAX_FILENAME_CHARS`] characters (hard cutoff)
///
/// The result may be empty; callers fall back to a default title in that case.
pub fn sanitize_filename(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| {
            if RESERVED_CHARS.contains(&c) || (c.is_control() && !c.is_whitespace()) {
                '_'
            } else {
                c
            }
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() > MAX_FILENAME_CHARS {
        collapsed.chars().take(MAX_FILENAME_CHARS).collect()
    } else {
        collapsed
    }
}

/// Append `.{extension}` unless `name` already ends with it
pub fn ensure_extension(name: &str, extension: &str) -> String {
    let suffix = format!(".{}", extension);
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

/// ASCII-only variant of a filename for the legacy `filename=` parameter
fn ascii_fallback(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build an attachment `Content-Disposition` value carrying both filename forms.
///
/// `filename` holds an ASCII-safe copy for legacy clients, `filename*` the
/// RFC 5987 percent-encoded UTF-8 name.
pub fn content_disposition(name: &str) -> String {
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback(name),
        urlencoding::encode(name)
    )
}
