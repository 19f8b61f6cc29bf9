use regex::Regex;

#[derive(Debug)]
pub enum TokenizationError {
    EmptyInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub position: u32,
    pub word: String,
}

// Words keep inner apostrophes and hyphens ("don't", "well-known"); any other
// non-space character stands alone as punctuation.
const TOKEN_PATTERN: &str = r"\w+(?:['’-]\w+)*|[^\w\s]";

#[derive(Debug, Clone)]
pub struct WordTokenizer {
    token_pattern: Regex,
}

pub fn is_word_token(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric())
}

pub fn is_numeric_token(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

impl WordTokenizer {
    pub fn new() -> Result<WordTokenizer, regex::Error> {
        let token_pattern = Regex::new(TOKEN_PATTERN)?;
        Ok(WordTokenizer { token_pattern })
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, TokenizationError> {
        if text.trim().is_empty() {
            return Err(TokenizationError::EmptyInput);
        }

        let tokens = self
            .token_pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, m)| Token {
                position: position as u32,
                word: m.as_str().to_string(),
            })
            .collect();

        Ok(tokens)
    }
}
