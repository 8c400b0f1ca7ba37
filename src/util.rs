//! Small standalone helpers shared across modules.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// ASCII-fold diacritics: NFD-decompose, then drop combining marks.
///
/// `"Plzeň"` becomes `"Plzen"`, `"café"` becomes `"cafe"`. Case and
/// whitespace are left untouched — that is the job of the `Lowercase` and
/// `WhitespaceStrip` preprocessors respectively.
#[cfg(feature = "unicode-normalization")]
pub fn fold_diacritics(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Fallback when the `unicode-normalization` feature is disabled: identity.
/// Diacritics survive; callers relying on ASCII folding must enable the
/// feature (it is on by default).
#[cfg(not(feature = "unicode-normalization"))]
pub fn fold_diacritics(value: &str) -> String {
    value.to_string()
}

/// Combining marks (Unicode general category Mn) in the ranges that cover
/// Latin diacritics, which is all this crate's target languages need.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_czech_diacritics() {
        assert_eq!(fold_diacritics("Plzeň"), "Plzen");
        assert_eq!(fold_diacritics("krásné město"), "krasne mesto");
    }

    #[test]
    fn ascii_text_is_unchanged() {
        assert_eq!(fold_diacritics("hello world"), "hello world");
    }
}
