use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// English package embedded in the binary, installed when the package
/// source is `builtin`.
pub const BUILTIN_LEXICON: &str = include_str!("../../data/en_core_lexicon.json");

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Exception {
    pub lemma: String,
    pub pos: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SuffixRule {
    pub suffix: String,
    #[serde(default)]
    pub replacement: String,
    pub pos: String,
    // measured in chars, on the lowercased word
    pub min_length: usize,
}

impl SuffixRule {
    pub fn stem(&self, word: &str) -> Option<String> {
        if word.chars().count() < self.min_length {
            return None;
        }
        let stripped = word.strip_suffix(self.suffix.as_str())?;
        if stripped.is_empty() {
            return None;
        }
        Some(format!("{}{}", stripped, self.replacement))
    }
}

/// On-disk model package: irregular forms, known base forms and ordered
/// suffix rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Lexicon {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub exceptions: FxHashMap<String, Exception>,
    #[serde(default)]
    pub base_forms: FxHashMap<String, String>,
    #[serde(default)]
    pub rules: Vec<SuffixRule>,
}

impl Lexicon {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, String> {
        let lexicon: Lexicon = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    pub fn builtin() -> Result<Self, String> {
        Self::from_slice(BUILTIN_LEXICON.as_bytes())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("lexicon has no name".to_string());
        }
        if let Some(i) = self.rules.iter().position(|r| r.suffix.is_empty()) {
            return Err(format!("rule {} has an empty suffix", i));
        }
        Ok(())
    }

    pub fn exception(&self, word: &str) -> Option<&Exception> {
        self.exceptions.get(word)
    }

    pub fn base_form_pos(&self, word: &str) -> Option<&str> {
        self.base_forms.get(word).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(suffix: &str, replacement: &str, min_length: usize) -> SuffixRule {
        SuffixRule {
            suffix: suffix.to_string(),
            replacement: replacement.to_string(),
            pos: "NOUN".to_string(),
            min_length,
        }
    }

    #[test]
    fn test_builtin_lexicon_parses() {
        let lexicon = Lexicon::builtin().unwrap();
        assert_eq!(lexicon.name, "en_core_lexicon");
        assert!(!lexicon.rules.is_empty());
        assert_eq!(lexicon.exception("children").unwrap().lemma, "child");
        assert_eq!(lexicon.exception("running").unwrap().lemma, "run");
        assert_eq!(lexicon.base_form_pos("book"), Some("NOUN"));
    }

    #[test]
    fn test_rule_stem() {
        assert_eq!(rule("ies", "y", 5).stem("cities"), Some("city".to_string()));
        assert_eq!(rule("s", "", 4).stem("books"), Some("book".to_string()));
        // too short
        assert_eq!(rule("s", "", 4).stem("bus"), None);
        // suffix does not match
        assert_eq!(rule("ing", "", 6).stem("books"), None);
    }

    #[test]
    fn test_min_length_counts_chars() {
        assert_eq!(rule("s", "", 4).stem("cafés"), Some("café".to_string()));
        assert_eq!(rule("s", "", 5).stem("cafés"), Some("café".to_string()));
        assert_eq!(rule("s", "", 6).stem("cafés"), None);
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let lexicon = Lexicon::from_slice(br#"{"name": "tiny", "version": "0.1.0"}"#).unwrap();
        assert!(lexicon.exceptions.is_empty());
        assert!(lexicon.base_forms.is_empty());
        assert!(lexicon.rules.is_empty());
    }

    #[test]
    fn test_invalid_packages_are_rejected() {
        assert!(Lexicon::from_slice(b"not json").is_err());
        assert!(Lexicon::from_slice(br#"{"name": " ", "version": "1"}"#).is_err());
        let empty_suffix = br#"{"name": "x", "version": "1",
            "rules": [{"suffix": "", "pos": "NOUN", "min_length": 1}]}"#;
        assert!(Lexicon::from_slice(empty_suffix).is_err());
    }
}
