use std::path::{Path, PathBuf};

pub fn get_model_package_path<P: AsRef<Path>>(model_directory: P, model_name: &str) -> PathBuf {
    model_directory.as_ref().join(model_name)
}

pub fn get_lexicon_path<P: AsRef<Path>>(package_path: P) -> PathBuf {
    package_path.as_ref().join("lexicon.json")
}

pub fn is_remote_source(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

// Compression is picked by the source's extension, query strings ignored.
pub fn source_extension(source: &str) -> Option<&str> {
    let without_query = source.split(['?', '#']).next().unwrap_or(source);
    let file_name = without_query.rsplit('/').next().unwrap_or(without_query);
    Path::new(file_name).extension().and_then(|s| s.to_str())
}
