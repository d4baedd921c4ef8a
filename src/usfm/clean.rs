//! Inline markup removal for assembled verse text.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static RE_FOOTNOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\f\s.*?\\f\*").expect("valid regex: RE_FOOTNOTE"));

#[allow(clippy::expect_used)]
static RE_CROSS_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\x\s.*?\\x\*").expect("valid regex: RE_CROSS_REF"));

/// `\w word|strong="H7225"\w*`
#[allow(clippy::expect_used)]
static RE_STRONGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\w\s+([^\\|]*)\|[^\\]*?\\w\*").expect("valid regex: RE_STRONGS")
});

#[allow(clippy::expect_used)]
static RE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\w\s+([^\\]*?)\\w\*").expect("valid regex: RE_WORD"));

#[allow(clippy::expect_used)]
static RE_ADDED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\add\s+([^\\]*?)\\add\*").expect("valid regex: RE_ADDED"));

#[allow(clippy::expect_used)]
static RE_DEITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\nd\s+([^\\]*?)\\nd\*").expect("valid regex: RE_DEITY"));

/// Any leftover marker, including nested (`\+w`) and numbered (`\pi1`) forms.
#[allow(clippy::expect_used)]
static RE_ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\\\+?[a-z]+\d*\*?").expect("valid regex: RE_ANY_TAG"));

#[allow(clippy::expect_used)]
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex: RE_WHITESPACE"));

/// Join buffered lines and strip markup, in a fixed order: footnotes and
/// cross references go entirely, word/added/deity spans keep their inner
/// text, then stray tags are dropped and whitespace collapsed.
///
/// Unmatched spans are left for the stray-tag pass; nothing here fails.
pub fn clean_text<S: AsRef<str>>(lines: &[S]) -> String {
    let joined = lines.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
    let text = RE_FOOTNOTE.replace_all(&joined, "");
    let text = RE_CROSS_REF.replace_all(&text, "");
    let text = RE_STRONGS.replace_all(&text, "${1}");
    let text = RE_WORD.replace_all(&text, "${1}");
    let text = RE_ADDED.replace_all(&text, "${1}");
    let text = RE_DEITY.replace_all(&text, "${1}");
    let text = RE_ANY_TAG.replace_all(&text, "");
    RE_WHITESPACE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn clean(s: &str) -> String {
        clean_text(&[s])
    }

    #[test]
    fn joins_lines_with_single_spaces() {
        assert_eq!(clean_text(&["In the", "  beginning  "]), "In the beginning");
    }

    #[test]
    fn strips_footnotes_with_nested_markers() {
        assert_eq!(
            clean(r"God created\f + \fr 1.1 \ft Or, the heavens\f* the heaven"),
            "God created the heaven"
        );
    }

    #[test]
    fn strips_cross_references() {
        assert_eq!(clean(r"In the beginning\x - \xo 1.1 \xt Jn 1:1\x* God"), "In the beginning God");
    }

    #[test]
    fn keeps_words_from_glosses() {
        assert_eq!(
            clean(r#"\w In|strong="H7225"\w* \w the beginning\w*"#),
            "In the beginning"
        );
    }

    #[test]
    fn keeps_added_and_deity_text() {
        assert_eq!(clean(r"and the earth \add was\add* void"), "and the earth was void");
        assert_eq!(clean(r"the \nd LORD\nd* God"), "the LORD God");
    }

    #[test]
    fn drops_unknown_tags() {
        assert_eq!(clean(r"\wj Follow me\wj* \pi1 said he"), "Follow me said he");
        assert_eq!(clean(r"\+w nested\+w* word"), "nested word");
    }

    #[test]
    fn unmatched_span_does_not_panic() {
        assert_eq!(clean(r"text \f + open footnote never closed"), "text + open footnote never closed");
    }
}
