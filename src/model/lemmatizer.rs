use crate::error::AnnotateError;
use crate::model::lexicon::Lexicon;
use crate::model::loader::{AnnotatedToken, LanguageModel};
use crate::model::tokenizer::{TokenizationError, WordTokenizer, is_numeric_token, is_word_token};

pub const POS_NUMBER: &str = "NUM";
pub const POS_PUNCTUATION: &str = "PUNCT";
pub const POS_OTHER: &str = "X";

#[derive(Debug, Clone)]
pub struct LexiconModel {
    lexicon: Lexicon,
    tokenizer: WordTokenizer,
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

// "runn" -> "run", "stopp" -> "stop"
fn undouble(stem: &str) -> Option<String> {
    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let before = chars.next()?;
    if last == before && last.is_alphabetic() && !is_vowel(last) {
        let mut undoubled = stem.to_string();
        undoubled.pop();
        return Some(undoubled);
    }
    None
}

impl LexiconModel {
    pub fn new(lexicon: Lexicon) -> Result<Self, regex::Error> {
        Ok(Self {
            lexicon,
            tokenizer: WordTokenizer::new()?,
        })
    }

    pub fn version(&self) -> &str {
        &self.lexicon.version
    }

    /// Lemma and POS of a single token.
    pub fn lemmatize(&self, word: &str) -> (String, String) {
        if !is_word_token(word) {
            return (word.to_string(), POS_PUNCTUATION.to_string());
        }
        if is_numeric_token(word) {
            return (word.to_string(), POS_NUMBER.to_string());
        }

        let lower = word.to_lowercase();
        if let Some(exception) = self.lexicon.exception(&lower) {
            return (exception.lemma.clone(), exception.pos.clone());
        }
        if let Some(pos) = self.lexicon.base_form_pos(&lower) {
            return (lower, pos.to_string());
        }

        self.apply_rules(&lower)
            .unwrap_or_else(|| (lower, POS_OTHER.to_string()))
    }

    // A rule whose stem names a known base form wins; otherwise the first
    // rule that applied at all. A rule that leaves the word unchanged
    // ("ss" -> "ss") ends the search so later rules cannot strip it.
    fn apply_rules(&self, lower: &str) -> Option<(String, String)> {
        let mut first_applicable: Option<(String, String)> = None;

        for rule in &self.lexicon.rules {
            let Some(stem) = rule.stem(lower) else {
                continue;
            };
            if stem == lower {
                return first_applicable.or(Some((stem, rule.pos.clone())));
            }

            let mut candidates = vec![stem.clone(), format!("{}e", stem)];
            if let Some(undoubled) = undouble(&stem) {
                candidates.push(undoubled);
            }
            for candidate in candidates {
                if let Some(pos) = self.lexicon.base_form_pos(&candidate) {
                    return Some((candidate, pos.to_string()));
                }
            }

            if first_applicable.is_none() {
                first_applicable = Some((stem, rule.pos.clone()));
            }
        }

        first_applicable
    }
}

impl LanguageModel for LexiconModel {
    fn name(&self) -> &str {
        &self.lexicon.name
    }

    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedToken>, AnnotateError> {
        let tokens = self.tokenizer.tokenize(text).map_err(|e| match e {
            TokenizationError::EmptyInput => AnnotateError::EmptyInput,
        })?;

        Ok(tokens
            .into_iter()
            .map(|token| {
                let (lemma, pos) = self.lemmatize(&token.word);
                AnnotatedToken {
                    position: token.position,
                    text: token.word,
                    lemma,
                    pos,
                }
            })
            .collect())
    }
}
