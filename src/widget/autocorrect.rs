use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z']+").expect("Invalid word pattern"));

// Misspellings residents commonly type into the widget
const COMMON_MISSPELLINGS: [(&str, &str); 12] = [
    ("flod", "flood"),
    ("floood", "flood"),
    ("fllod", "flood"),
    ("emergancy", "emergency"),
    ("emergeny", "emergency"),
    ("emergencey", "emergency"),
    ("evacuaton", "evacuation"),
    ("evacution", "evacuation"),
    ("shelte", "shelter"),
    ("sheltr", "shelter"),
    ("rsik", "risk"),
    ("wether", "weather"),
];

pub trait Autocorrect: Send + Sync {
    fn correct(&self, text: &str) -> String;
}

/// Leaves input untouched.
#[derive(Default)]
pub struct NoAutocorrect;

impl Autocorrect for NoAutocorrect {
    fn correct(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Replaces whole words found in a dictionary of known misspellings,
/// keeping all caps or a leading capital letter.
pub struct DictionaryAutocorrect {
    words: HashMap<String, String>,
}

impl DictionaryAutocorrect {
    pub fn new<I, K, V>(words: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
        }
    }
}

impl Default for DictionaryAutocorrect {
    fn default() -> Self {
        Self::new(COMMON_MISSPELLINGS)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_shouted(word: &str) -> bool {
    word.chars().filter(|c| c.is_alphabetic()).count() > 1
        && !word.chars().any(|c| c.is_lowercase())
}

/// Give `fixed` the same casing as the misspelled `word`.
fn match_case(word: &str, fixed: &str) -> String {
    if is_shouted(word) {
        fixed.to_uppercase()
    } else if word.starts_with(|c: char| c.is_uppercase()) {
        capitalize(fixed)
    } else {
        fixed.to_string()
    }
}

impl Autocorrect for DictionaryAutocorrect {
    fn correct(&self, text: &str) -> String {
        WORD.replace_all(text, |caps: &Captures| {
            let word = &caps[0];
            match self.words.get(&word.to_lowercase()) {
                Some(fixed) => match_case(word, fixed),
                None => word.to_string(),
            }
        })
        .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_fixes_known_misspellings() {
        let autocorrect = DictionaryAutocorrect::default();
        assert_eq!(
            autocorrect.correct("Is there a flod rsik near me?"),
            "Is there a flood risk near me?"
        );
    }

    #[test]
    fn it_keeps_leading_capitals() {
        let autocorrect = DictionaryAutocorrect::default();
        assert_eq!(autocorrect.correct("Emergancy!"), "Emergency!");
    }

    #[test]
    fn it_keeps_all_caps() {
        let autocorrect = DictionaryAutocorrect::default();
        assert_eq!(autocorrect.correct("FLOD RSIK"), "FLOOD RISK");
        assert_eq!(autocorrect.correct("Flod RSIK now"), "Flood RISK now");
    }

    #[test]
    fn it_leaves_correct_text_alone() {
        let autocorrect = DictionaryAutocorrect::default();
        let text = "Where is the nearest shelter?";
        assert_eq!(autocorrect.correct(text), text);
        assert_eq!(NoAutocorrect.correct("flod"), "flod");
    }

    #[test]
    fn it_only_replaces_whole_words() {
        let autocorrect = DictionaryAutocorrect::new([("flod", "flood")]);
        assert_eq!(autocorrect.correct("flodding"), "flodding");
    }
}
