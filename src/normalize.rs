/*!
Strips conversational noise from a phrase before it gets parsed.

People don't type `15 มกราคม` into a booking chat. They type something like
`อยากเช็คอินวันที่ 15 มกราคม ครับ`. The routines here peel off the filler
words, polite particles and "I'd like to check in on" framing so that the
duration parser and date resolver only ever see the payload.

This is a fixed table of phrases, not a grammar. Anything that isn't in the
tables is left alone, which usually means that parsing fails downstream.
*/

use std::sync::LazyLock;

use regex::Regex;

/// Verbal tics and particles removed wherever they appear as a whole word.
const FILLERS: &[&str] =
    &["ค่ะ", "ละกัน", "อืม", "นะ", "คะ", "จ้ะ", "จ้า", "ค่า", "คับ"];

/// Whole-word replacements applied after fillers are gone.
const ABBREVIATIONS: &[(&str, &str)] = &[("ครับ", "")];

/// Framing phrases that may precede the payload.
///
/// These are tried in order with leftmost-first semantics, so an entry
/// shadows any later entry it is a prefix of. For example, `น่าจะ` comes
/// before `น่าจะออกวันที่`, so the latter can never match. Changing the order
/// changes what gets stripped.
const FRAMINGS: &[&str] = &[
    "เช็คอินเป็นวันที่",
    "เช็คเอ้าท์เป็นวันที่",
    "ขอเช็คอินวันที่",
    "ขอเช็คเอ้าท์วันที่",
    "เข้าพักวันที่",
    "ออกวันที่",
    "ขอเข้าพักวันที่",
    "ขอเข้าพักเป็นวันที่",
    "ขอเข้าพัก",
    "เช็คอิน",
    "เช็คเอ้าท์",
    "เข้าวันที่",
    "เข้า",
    "ออก",
    "จองวันเข้า",
    "จองวันออก",
    "เอาเป็นวันที่",
    "ขอเข้าวันที่",
    "ขอออกวันที่",
    "อยากเช็คอินวันที่",
    "อยากเข้าพักวันที่",
    "อยากเช็คอิน",
    "อยากเช็คเอ้าท์",
    "อยากเช็คเอ้าท์วันที่",
    "อยากพักวันที่",
    "อยากเอาวันที่",
    "อยากได้เป็นวันที่",
    "อยากเช็คอินในวันที่",
    "อยากเช็คเอ้าท์ในวันที่",
    "จะเช็คอินวันที่",
    "จะเช็คเอ้าท์วันที่",
    "จะเข้าวันที่",
    "จะออกวันที่",
    "จะขอเข้าวันที่",
    "จะขอออกวันที่",
    "จะเข้าไปวันที่",
    "จะพักวันที่",
    "จะเข้าพักวันที่",
    "จะไปเช็คอินวันที่",
    "จะไปเช็คอิน",
    "จะเช็คอิน",
    "จะเช็คเอ้าท์",
    "น่าจะวันที่",
    "น่าจะเป็นวันที่",
    "น่าจะเข้าวันที่",
    "น่าจะ",
    "น่าจะออกวันที่",
    "น่าจะเข้า",
    "คิดว่าวันที่",
    "Check In เป็นวันที่",
    "Check Out เป็นวันที่",
    "ขอ Check In วันที่",
    "ขอ Check Out วันที่",
    "อยาก Check In วันที่",
    "อยาก Check Out วันที่",
    "อยาก Check In",
    "อยาก Check Out",
    "อยาก Check In ในวันที่",
    "อยาก Check Out ในวันที่",
    "จะ Check In วันที่",
    "จะ Check Out วันที่",
    "จะ Check In",
    "จะ Check Out",
    "จะไป Check In วันที่",
    "จะไป Check In",
    "อยากได้วันที่",
];

/// Polite question endings, e.g., "..., right?" or "..., okay?".
const PARTICLES: &[&str] = &["ครับผม", "ได้ไหมคะ", "ได้ไหมครับ", "ได้ไหม"];

/// A phrase that has been through `normalize`.
///
/// It never has leading or trailing whitespace, and never has more than one
/// consecutive whitespace character (which is always a space).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Normalized(String);

impl Normalized {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Normalized {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a raw phrase.
///
/// A pass runs its steps in a fixed order: trim, drop filler words, expand
/// abbreviations, strip framing and trailing particles, then collapse
/// whitespace. Passes repeat until one changes nothing, so stacked framing
/// like `เข้า เข้า 15 มกราคม` is fully stripped and normalizing a normalized
/// phrase is a no-op.
///
/// This never fails. When nothing matches, the result is just the trimmed and
/// whitespace-collapsed input.
pub fn normalize(raw: &str) -> Normalized {
    let mut text = raw.to_string();
    loop {
        let next = normalize_once(&text);
        if next == text {
            break;
        }
        text = next;
    }
    if text != raw {
        log::trace!("normalized `{raw}` to `{text}`");
    }
    Normalized(text)
}

/// A single pass of `normalize`.
///
/// A pass never makes the text longer, and only keeps its length when it
/// turns whitespace into spaces, so repeating it always settles.
fn normalize_once(raw: &str) -> String {
    static FILLER_WORDS: LazyLock<Vec<WholeWord>> = LazyLock::new(|| {
        FILLERS.iter().copied().map(WholeWord::new).collect()
    });
    static ABBREVIATED_WORDS: LazyLock<Vec<(WholeWord, &'static str)>> =
        LazyLock::new(|| {
            ABBREVIATIONS
                .iter()
                .map(|&(abbr, full)| (WholeWord::new(abbr), full))
                .collect()
        });
    static FRAMING: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(&format!(r"(?i)^(?:{})", alternation(FRAMINGS))).unwrap()
    });
    static TRAILING: LazyLock<Regex> = LazyLock::new(|| {
        let particles = alternation(PARTICLES);
        Regex::new(&format!(r"(?i)(?:\s*(?:{particles}))+\s*$")).unwrap()
    });
    static WHITESPACE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s+").unwrap());

    let mut text = raw.trim().to_string();
    for word in FILLER_WORDS.iter() {
        text = word.replace_all(&text, "");
    }
    for (word, full) in ABBREVIATED_WORDS.iter() {
        text = word.replace_all(&text, full);
    }
    text = FRAMING.replace(&text, " ").into_owned();
    text = TRAILING.replace(&text, " ").into_owned();
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// A case insensitive word that only matches when it isn't glued to a
/// neighboring letter, digit or underscore.
///
/// Thai vowel signs and tone marks above or below a consonant are combining
/// marks, not letters, so they don't glue. That is, `ครับ` is a whole word in
/// `วันนี้ครับ` (after `้`) but `นะ` is not a whole word in `ชนะ`. This
/// differs from `\b` in the `regex` crate, which treats marks as word
/// characters and would make Thai words whole only next to whitespace.
///
/// Every word in the tables starts and ends with a letter.
#[derive(Debug)]
struct WholeWord(Regex);

impl WholeWord {
    fn new(word: &str) -> WholeWord {
        let re = Regex::new(&format!("(?i){}", regex::escape(word))).unwrap();
        WholeWord(re)
    }

    fn replace_all(&self, text: &str, with: &str) -> String {
        static WORD_BEFORE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]\z").unwrap());
        static WORD_AFTER: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\A[\p{L}\p{N}_]").unwrap());

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in self.0.find_iter(text) {
            if WORD_BEFORE.is_match(&text[..m.start()])
                || WORD_AFTER.is_match(&text[m.end()..])
            {
                continue;
            }
            out.push_str(&text[last..m.start()]);
            out.push_str(with);
            last = m.end();
        }
        out.push_str(&text[last..]);
        out
    }
}

/// Escapes each phrase and joins them into a regex alternation, preserving
/// their order.
fn alternation(phrases: &[&str]) -> String {
    phrases.iter().map(|p| regex::escape(p)).collect::<Vec<_>>().join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> String {
        normalize(raw).as_str().to_string()
    }

    #[test]
    fn removes_standalone_fillers() {
        for &word in FILLERS {
            assert_eq!(norm(&format!("พรุ่งนี้ {word}")), "พรุ่งนี้", "{word}");
            assert_eq!(norm(&format!("{word} 3 คืน")), "3 คืน", "{word}");
            assert_eq!(
                norm(&format!("15 {word} มกราคม")),
                "15 มกราคม",
                "{word}",
            );
        }
    }

    #[test]
    fn fillers_after_marks() {
        for &word in FILLERS {
            let attached = format!("พรุ่งนี้{word}");
            assert_eq!(norm(&attached), "พรุ่งนี้", "{word}");
        }
    }

    #[test]
    fn keeps_fillers_inside_longer_words() {
        // `นะ` is a substring of `ชนะ` and must survive.
        assert_eq!(norm("ชนะ"), "ชนะ");
        for &word in FILLERS {
            let attached = format!("3 คืน{word}");
            assert_eq!(norm(&attached), attached, "{word}");
            let attached = format!("{word}5 มกราคม");
            assert_eq!(norm(&attached), attached, "{word}");
        }
    }

    #[test]
    fn abbreviations() {
        assert_eq!(norm("วันนี้ ครับ"), "วันนี้");
        assert_eq!(norm("ครับ วันนี้"), "วันนี้");
        assert_eq!(norm("วันนี้ครับ"), "วันนี้");
        assert_eq!(norm("พรุ่งนี้ครับ"), "พรุ่งนี้");
        assert_eq!(norm("3 คืนครับ"), "3 คืนครับ");
    }

    #[test]
    fn framing_phrases() {
        assert_eq!(norm("อยากเช็คอินวันที่ 15 มกราคม"), "15 มกราคม");
        assert_eq!(norm("ขอเข้าพักพรุ่งนี้"), "พรุ่งนี้");
        assert_eq!(norm("เข้าพรุ่งนี้"), "พรุ่งนี้");
        assert_eq!(norm("check in เป็นวันที่ 5 มีนาคม"), "5 มีนาคม");
        assert_eq!(norm("อยาก CHECK OUT 7 มีนา"), "7 มีนา");
        assert_eq!(norm("จะไปเช็คอินพรุ่งนี้"), "พรุ่งนี้");
    }

    #[test]
    fn framing_only_at_start() {
        assert_eq!(norm("15 มกราคม เช็คอิน"), "15 มกราคม เช็คอิน");
    }

    /// Earlier framing entries shadow later ones that they prefix. Stripping
    /// repeats, so a shadowed entry can still be removed on a later pass.
    #[test]
    fn framing_shadowing() {
        assert_eq!(norm("เช็คอินวันที่ 5 มกราคม"), "วันที่ 5 มกราคม");
        assert_eq!(norm("น่าจะออกวันที่ 5 มกราคม"), "5 มกราคม");
    }

    #[test]
    fn trailing_particles() {
        assert_eq!(norm("พรุ่งนี้ได้ไหมครับ"), "พรุ่งนี้");
        assert_eq!(norm("3 คืนได้ไหมคะ"), "3 คืน");
        assert_eq!(norm("วันนี้ ได้ไหม"), "วันนี้");
        assert_eq!(norm("วันนี้ครับผม"), "วันนี้");
        assert_eq!(norm("ได้ไหม วันนี้"), "ได้ไหม วันนี้");
    }

    #[test]
    fn whitespace() {
        assert_eq!(norm("  15   มกราคม \t"), "15 มกราคม");
        assert_eq!(norm(""), "");
        assert_eq!(norm("   "), "");
        assert_eq!(norm("ค่ะ"), "");
    }

    #[test]
    fn everything_together() {
        assert_eq!(
            norm(" อยากเช็คอินวันที่ อืม 15 มกราคม นะ ได้ไหมครับ "),
            "15 มกราคม",
        );
    }

    #[test]
    fn stacked_framing() {
        assert_eq!(norm("อืม อยากเช็คอินวันที่ 15 มกราคม"), "15 มกราคม");
        assert_eq!(norm("เข้า เข้า 15 มกราคม"), "15 มกราคม");
        assert_eq!(norm("ค่ะ ขอเข้าพัก อืม พรุ่งนี้"), "พรุ่งนี้");
    }

    #[test]
    fn idempotent() {
        let phrases = [
            "อยากเช็คอินวันที่ 15 มกราคม ค่ะ",
            "พรุ่งนี้ ครับ",
            "วันนี้ครับ",
            "  3   คืน ",
            "อีก 2 วัน ได้ไหม",
            "หนึ่งสัปดาห์",
            "some english text",
            "อืม อยากเช็คอินวันที่ 15 มกราคม",
            "เข้า เข้า 15 มกราคม",
            "น่าจะออกวันที่ 5 มกราคม",
            "เช็คอินวันที่ 5 มกราคม",
            "ได้ไหม วันนี้",
            "a\tb",
        ];
        for phrase in phrases {
            let once = normalize(phrase);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "{phrase}");
        }
    }

    #[test]
    fn arbitrary_input_does_not_panic() {
        for raw in ["\u{0}", "((((", r"\b", "$", "🙂 ค่ะ 🙂", "Check In"] {
            let _ = normalize(raw);
        }
    }
}
