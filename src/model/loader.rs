use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::config::Config;
use crate::error::{AcquireError, AnnotateError, LoadError};
use crate::model::lemmatizer::LexiconModel;
use crate::model::lexicon::Lexicon;
use crate::model::package;
use crate::utils::paths::{get_lexicon_path, get_model_package_path};

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedToken {
    pub position: u32,
    pub text: String,
    pub lemma: String,
    pub pos: String,
}

pub trait LanguageModel: Send + Sync {
    fn name(&self) -> &str;

    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedToken>, AnnotateError>;
}

/// Source of model handles. `load` must report a missing package as
/// `LoadError::NotFound` so the caller knows an `acquire` can help.
pub trait ModelLoader: Send + Sync {
    fn model_name(&self) -> &str;

    fn load(&self) -> Result<Arc<dyn LanguageModel>, LoadError>;

    fn acquire(&self) -> Result<(), AcquireError>;
}

#[derive(Debug, Clone)]
pub struct PackageLoader {
    model_name: String,
    model_directory: PathBuf,
    package_source: String,
    download_timeout: Option<Duration>,
}

impl PackageLoader {
    pub fn new<P: AsRef<Path>>(model_name: &str, model_directory: P, package_source: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            model_directory: model_directory.as_ref().to_path_buf(),
            package_source: package_source.to_string(),
            download_timeout: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut loader = Self::new(
            &config.model_name,
            config.model_directory_path(),
            &config.package_source,
        );
        loader.download_timeout = config.download_timeout();
        loader
    }

    pub fn package_path(&self) -> PathBuf {
        get_model_package_path(&self.model_directory, &self.model_name)
    }

    pub fn lexicon_path(&self) -> PathBuf {
        get_lexicon_path(self.package_path())
    }
}

impl ModelLoader for PackageLoader {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn load(&self) -> Result<Arc<dyn LanguageModel>, LoadError> {
        let path = self.lexicon_path();
        debug!("loading model package from {}", path.display());

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(path));
            }
            Err(e) => return Err(LoadError::Io(e)),
        };

        let lexicon = Lexicon::from_slice(&bytes).map_err(LoadError::Invalid)?;
        let model = LexiconModel::new(lexicon).map_err(LoadError::invalid)?;
        info!(
            "loaded model {} {} from {}",
            model.name(),
            model.version(),
            self.package_path().display()
        );
        Ok(Arc::new(model))
    }

    fn acquire(&self) -> Result<(), AcquireError> {
        let bytes = package::fetch_package(&self.package_source, self.download_timeout)?;
        let bytes = package::decode_package(&self.package_source, bytes)?;
        package::install_package(&self.package_path(), &bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lexicon::BUILTIN_LEXICON;

    #[test]
    fn test_load_missing_package_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = PackageLoader::new("en_core_lexicon", dir.path(), "builtin");

        match loader.load() {
            Err(LoadError::NotFound(path)) => assert_eq!(path, loader.lexicon_path()),
            Err(e) => panic!("expected NotFound, got {}", e),
            Ok(_) => panic!("expected NotFound, got a model"),
        }
    }

    #[test]
    fn test_load_corrupt_package_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let loader = PackageLoader::new("en_core_lexicon", dir.path(), "builtin");
        fs::create_dir_all(loader.package_path()).unwrap();
        fs::write(loader.lexicon_path(), b"{ truncated").unwrap();

        let err = loader.load().err().unwrap();
        assert!(matches!(err, LoadError::Invalid(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_acquire_builtin_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let loader = PackageLoader::new("en_core_lexicon", dir.path(), "builtin");

        assert!(loader.load().is_err());
        loader.acquire().unwrap();

        let model = loader.load().unwrap();
        assert_eq!(model.name(), "en_core_lexicon");
        let tokens = model.annotate("books").unwrap();
        assert_eq!(tokens[0].lemma, "book");
    }

    #[test]
    fn test_acquire_from_local_file() {
        let source_dir = tempfile::tempdir().unwrap();
        let source = source_dir.path().join("lexicon.json");
        fs::write(&source, BUILTIN_LEXICON).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let loader = PackageLoader::new("en_core_lexicon", dir.path(), source.to_str().unwrap());
        loader.acquire().unwrap();

        assert!(loader.lexicon_path().exists());
        assert!(loader.load().is_ok());
    }

    #[test]
    fn test_acquire_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere").join("lexicon.json");
        let loader = PackageLoader::new("en_core_lexicon", dir.path(), missing.to_str().unwrap());

        assert!(matches!(loader.acquire(), Err(AcquireError::Io(_))));
        assert!(!loader.lexicon_path().exists());
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            model_name: "tiny".to_string(),
            model_directory: "/srv/models".to_string(),
            download_timeout_secs: Some(5),
            ..Config::default()
        };
        let loader = PackageLoader::from_config(&config);

        assert_eq!(loader.model_name(), "tiny");
        assert_eq!(loader.lexicon_path(), PathBuf::from("/srv/models/tiny/lexicon.json"));
        assert_eq!(loader.download_timeout, Some(Duration::from_secs(5)));
    }
}
