use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::error::{AnnotateError, ModelError};
use crate::model::loader::{LanguageModel, ModelLoader};
use crate::protocol::types::{LemmaRequest, LemmaResult, METHOD_DOWNLOADED};

// UNLOADED -> LOADING -> LOADED | LOAD_FAILED. A failed initializer leaves
// the cell empty, so LOAD_FAILED is retried by the next request.
pub struct LemmaService {
    loader: Box<dyn ModelLoader>,
    model: OnceCell<Arc<dyn LanguageModel>>,
}

impl LemmaService {
    pub fn new<L: ModelLoader + 'static>(loader: L) -> Self {
        Self {
            loader: Box::new(loader),
            model: OnceCell::new(),
        }
    }

    pub fn model_name(&self) -> &str {
        self.loader.model_name()
    }

    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// Runs the load path without lemmatizing anything.
    pub fn warm_up(&self) -> Result<(), ModelError> {
        self.model().map(|_| ())
    }

    /// Never fails: anything that goes wrong after input validation comes
    /// back as a degraded result echoing the word.
    pub fn lemmatize(&self, request: &LemmaRequest) -> LemmaResult {
        let word = request.word();
        match self.try_lemmatize(word) {
            Ok(result) => result,
            Err(e) => {
                warn!("returning degraded result for {:?}: {}", word, e);
                LemmaResult::degraded(word, e.to_string())
            }
        }
    }

    fn try_lemmatize(&self, word: &str) -> Result<LemmaResult, ModelError> {
        let (model, acquired) = self.model()?;

        let tokens = panic::catch_unwind(AssertUnwindSafe(|| model.annotate(word)))
            .map_err(|_| ModelError::Panicked)?
            .map_err(ModelError::Annotate)?;
        let token = tokens
            .into_iter()
            .next()
            .ok_or(ModelError::Annotate(AnnotateError::NoTokens))?;

        let result = LemmaResult::lemmatized(word, token.lemma, token.pos);
        if acquired {
            return Ok(result.with_method(METHOD_DOWNLOADED));
        }
        Ok(result)
    }

    // The flag is true only for the caller whose initializer acquired the package.
    fn model(&self) -> Result<(Arc<dyn LanguageModel>, bool), ModelError> {
        let mut acquired = false;
        let model = self
            .model
            .get_or_try_init(|| self.load_or_acquire(&mut acquired))?;
        Ok((Arc::clone(model), acquired))
    }

    fn load_or_acquire(&self, acquired: &mut bool) -> Result<Arc<dyn LanguageModel>, ModelError> {
        match self.loader.load() {
            Ok(model) => Ok(model),
            Err(e) if e.is_not_found() => {
                warn!("{}, acquiring {}", e, self.loader.model_name());
                self.loader.acquire().map_err(ModelError::Acquire)?;
                // exactly one retry
                let model = self.loader.load().map_err(ModelError::Reload)?;
                info!("model {} acquired and loaded", self.loader.model_name());
                *acquired = true;
                Ok(model)
            }
            Err(e) => Err(ModelError::Load(e)),
        }
    }
}
