//! Filesystem-safe names for per-municipality output files.

use std::ops::RangeInclusive;
use unicode_normalization::UnicodeNormalization;

/// Extension of every generated file.
pub const OUTPUT_EXTENSION: &str = "geojson";

/// Combining Diacritical Marks block.
const COMBINING_DIACRITICS: RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Strip diacritics by canonical decomposition, dropping combining marks.
#[must_use]
pub fn fold_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !COMBINING_DIACRITICS.contains(c))
        .collect()
}

/// Lowercase ASCII slug: diacritics removed, every run of other characters
/// collapsed into a single `_`, no leading or trailing `_`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let folded = fold_diacritics(text).to_lowercase();
    let mut slug = String::with_capacity(folded.len());
    let mut pending_sep = false;

    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }

    slug
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Stem used when a name has no representable characters.
pub const UNNAMED_STEM: &str = "sem_nome";

/// Make a code safe as a file name component.
///
/// ASCII letters, digits, `_`, `.` and `-` pass through; every other byte of
/// the UTF-8 encoding becomes `%XX`. The mapping is injective, so distinct
/// codes never share an escaped form.
#[must_use]
pub fn escape_code(code: &str) -> String {
    let mut escaped = String::with_capacity(code.len());
    for byte in code.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'.' | b'-') {
            escaped.push(char::from(byte));
        } else {
            escaped.push('%');
            escaped.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
            escaped.push(char::from(HEX_DIGITS[usize::from(byte & 0x0f)]));
        }
    }
    escaped
}

/// Output file name for a municipality: `<slug(name)>-<code>.geojson`.
///
/// The stem never contains `-`, so everything after the first `-` is the
/// escaped code and each code maps to exactly one file name. Names that slug
/// to nothing use [`UNNAMED_STEM`].
#[must_use]
pub fn output_identifier(code: &str, name: &str) -> String {
    let slug = slugify(name);
    let stem = if slug.is_empty() { UNNAMED_STEM } else { slug.as_str() };
    format!("{stem}-{}.{OUTPUT_EXTENSION}", escape_code(code))
}
