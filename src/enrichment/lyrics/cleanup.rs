//! Lyrics text normalization.
//!
//! Sources return lyrics in wildly different shapes: HTML fragments, text
//! with entities, whole songs on one line. [`clean_lyrics`] turns them into
//! plain, line-broken text. Running it on its own output changes nothing.
//!
//! Later steps only ever add line breaks or shorten the text, and the
//! thresholds are checked on trimmed text, so a second pass never crosses a
//! threshold the first pass did not.

use std::borrow::Cow;
use std::sync::LazyLock;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::Regex;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&#?[A-Za-z0-9]+;").unwrap());

static LINE_BREAK_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Recognized section markers, plus at most one adjacent newline on each
/// side so markers already on their own line are left as they are.
static SECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[ \t]*\n?[ \t]*(\[(?:Verse[ \t]?\d*|Chorus|Pre-Chorus|Hook|Intro|Outro|Bridge|Refrain|Part[ \t]?\d*|Songtext[^\]\n]*|Strophe[ \t]?\d*|Solo)\])[ \t]*\n?",
    )
    .unwrap()
});

static SENTENCE_THEN_CAPITAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([,.!?])[ \t]+(\p{Lu})").unwrap());

static WORD_THEN_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)[ \t]+(\[\w)").unwrap());

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([.!?])[ \t]+").unwrap());

static COMMA_THEN_CAPITAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",[ \t]+(\p{Lu})").unwrap());

/// `]` not already at the end of a line
static BRACKET_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\][ \t]*([^\n \t])").unwrap());

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Below this many lines, text is assumed to have lost its line breaks.
const MIN_LINES_SENTENCES: usize = 3;
const MIN_LINES_AGGRESSIVE: usize = 5;
const AGGRESSIVE_MIN_CHARS: usize = 200;

/// Normalize lyrics text.
pub fn clean_lyrics(raw: &str) -> String {
    let mut text = decode_entities(raw);

    text = LINE_BREAK_TAG.replace_all(&text, "\n").into_owned();

    text = SECTION_MARKER.replace_all(&text, "\n$1\n").into_owned();

    if line_count(&text) < MIN_LINES_SENTENCES {
        text = replace_until_stable(&SENTENCE_THEN_CAPITAL, text, "$1\n$2");
    }

    text = replace_until_stable(&WORD_THEN_BRACKET, text, "$1\n$2");

    if line_count(&text) < MIN_LINES_AGGRESSIVE && text.trim().chars().count() > AGGRESSIVE_MIN_CHARS {
        text = replace_until_stable(&SENTENCE_END, text, "$1\n");
        text = replace_until_stable(&COMMA_THEN_CAPITAL, text, ",\n$1");
        text = replace_until_stable(&BRACKET_CLOSE, text, "]\n$1");
    }

    text = EXCESS_NEWLINES.replace_all(&text, "\n\n").into_owned();

    text.trim().to_string()
}

/// Decode HTML entities until none are left.
///
/// Scraped text is sometimes escaped twice (`&amp;amp;`). Unknown entities
/// are kept verbatim.
fn decode_entities(raw: &str) -> String {
    let mut text = raw.to_string();
    loop {
        let decoded = ENTITY.replace_all(&text, |caps: &regex::Captures| {
            let entity = &caps[0];
            match unescape_with(entity, resolve_html5_entity) {
                Ok(Cow::Borrowed(s)) => s.to_string(),
                Ok(Cow::Owned(s)) => s,
                Err(_) => entity.to_string(),
            }
        });
        if decoded == text {
            return text;
        }
        text = decoded.into_owned();
    }
}

/// Apply a replacement until the pattern no longer matches.
///
/// Adjacent matches can share a character (`a [b [c`), so a single
/// `replace_all` can leave work behind.
fn replace_until_stable(re: &Regex, mut text: String, rep: &str) -> String {
    while re.is_match(&text) {
        text = re.replace_all(&text, rep).into_owned();
    }
    text
}

fn line_count(text: &str) -> usize {
    text.lines().filter(|l| !l.trim().is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_entities_decoded() {
        assert_eq!(clean_lyrics("Rock &amp; Roll"), "Rock & Roll");
        assert_eq!(clean_lyrics("It&#39;s &quot;fine&quot;"), "It's \"fine\"");
        assert_eq!(clean_lyrics("double &amp;amp; escaped"), "double & escaped");
        assert_eq!(clean_lyrics("&bogus; stays"), "&bogus; stays");
    }

    #[test]
    fn test_br_variants() {
        assert_eq!(clean_lyrics("one<br>two<BR/>three<br />four"), "one\ntwo\nthree\nfour");
        assert_eq!(clean_lyrics("one&lt;br&gt;two"), "one\ntwo");
    }

    #[test]
    fn test_markers_on_own_line() {
        let cleaned = clean_lyrics("[Intro] Hey [Verse 1] line one\nline two [chorus] sing");
        assert_eq!(
            cleaned,
            "[Intro]\nHey\n[Verse 1]\nline one\nline two\n[chorus]\nsing"
        );
    }

    #[test]
    fn test_marker_already_alone_is_untouched() {
        let text = "line\n\n[Chorus]\nla la\n\n[Verse 2]\nmore";
        assert_eq!(clean_lyrics(text), text);
    }

    #[test]
    fn test_short_text_split_on_sentences() {
        let cleaned = clean_lyrics("Hello there. How are you? Fine, Thanks");
        assert_eq!(cleaned, "Hello there.\nHow are you?\nFine,\nThanks");
    }

    #[test]
    fn test_word_before_bracket() {
        let cleaned = clean_lyrics("line a\nline b\nline c ends [Guitar Solo] here");
        assert!(cleaned.contains("ends\n[Guitar Solo]"));
    }

    #[test]
    fn test_long_single_line_gets_broken_up() {
        let sentence = "this line has quite a few words in it and keeps going for a while. ";
        let raw = sentence.repeat(5);
        let cleaned = clean_lyrics(&raw);
        assert_eq!(cleaned.lines().count(), 5);
    }

    #[test]
    fn test_aggressive_threshold_counts_all_characters() {
        let head = format!("{}. ", "ab ".repeat(60).trim_end());

        // 201 characters, only 135 of them visible
        let raw = format!("{}{}", head, "cd ".repeat(7).trim_end());
        assert_eq!(raw.chars().count(), 201);
        assert_eq!(clean_lyrics(&raw).lines().count(), 2);

        // Exactly 200 is not long enough
        let raw = format!("{}{}c", head, "cd ".repeat(6));
        assert_eq!(raw.chars().count(), 200);
        assert_eq!(clean_lyrics(&raw).lines().count(), 1);
    }

    #[test]
    fn test_closing_bracket_breaks_without_space() {
        let raw = format!("{} [Guitar]solo part here", "word ".repeat(45).trim_end());
        let cleaned = clean_lyrics(&raw);
        assert!(cleaned.ends_with("[Guitar]\nsolo part here"), "{cleaned:?}");
        assert_eq!(clean_lyrics(&cleaned), cleaned);
    }

    #[test]
    fn test_collapse_and_trim() {
        assert_eq!(clean_lyrics("\n\n a\n\n\n\n\nb \n\n"), "a\n\nb");
    }

    #[test]
    fn test_idempotent_on_examples() {
        let samples = [
            "[Intro][Verse 1] Hello, World. Goodbye [Chorus]",
            "&amp;lt;br&amp;gt; weird [Part 2] stuff",
            "a [b [c [d",
            "Line one<br>Line two<br><br><br><br>Line three",
            "[Songtext zu Lied] Ein, Zwei. Drei! Vier? Fünf, Sechs",
        ];
        for sample in samples {
            let once = clean_lyrics(sample);
            assert_eq!(clean_lyrics(&once), once, "not idempotent for {sample:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_cleanup_is_idempotent(
            raw in r"([A-Za-z]{1,8}|[ \t]{1,3}|\n{1,4}|[,.!?]|\[(Chorus|Verse [0-9]|Intro|Bridge|Solo|Note)\]|<br ?/?>|&amp;|&lt;|\]|\[){0,60}"
        ) {
            let once = clean_lyrics(&raw);
            prop_assert_eq!(clean_lyrics(&once), once);
        }
    }
}
