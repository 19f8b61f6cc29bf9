pub mod lemmatizer;
pub mod lexicon;
pub mod loader;
pub mod package;
pub mod tokenizer;
