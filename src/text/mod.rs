use include_dir::{include_dir, Dir};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;
use std::collections::HashMap;

use crate::error::TextError;
use crate::session::{Difficulty, SessionConfig, TextCategory};

static TEXT_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/text/data");

static BUILTIN: Lazy<TextCatalog> = Lazy::new(TextCatalog::from_embedded);

/// Returned when a bucket has nothing to offer
pub const DEFAULT_TEXT: &str = "The quick brown fox jumps over the lazy dog.";

#[derive(Deserialize, Debug)]
struct CategoryTable {
    category: TextCategory,
    buckets: HashMap<Difficulty, Vec<String>>,
}

/// Practice texts keyed by (category, difficulty)
#[derive(Debug, Default, Clone)]
pub struct TextCatalog {
    buckets: HashMap<(TextCategory, Difficulty), Vec<String>>,
}

impl TextCatalog {
    /// The catalog compiled into the binary, built on first use
    pub fn builtin() -> &'static TextCatalog {
        &BUILTIN
    }

    fn from_embedded() -> Self {
        let mut catalog = Self::default();

        for file in TEXT_DIR.files() {
            let name = file.path().display().to_string();
            let parsed = file
                .contents_utf8()
                .ok_or_else(|| TextError::Encoding(name.clone()))
                .and_then(|contents| catalog.add_table(&name, contents));

            if let Err(e) = parsed {
                tracing::warn!("skipping text table: {e}");
            }
        }

        catalog
    }

    /// Parse one category table and merge its buckets
    pub fn add_table(&mut self, name: &str, json: &str) -> Result<(), TextError> {
        let table: CategoryTable = from_str(json).map_err(|source| TextError::Parse {
            file: name.to_string(),
            source,
        })?;

        for (difficulty, texts) in table.buckets {
            self.buckets
                .entry((table.category, difficulty))
                .or_default()
                .extend(texts.into_iter().filter(|t| !t.is_empty()));
        }

        Ok(())
    }

    pub fn bucket(&self, category: TextCategory, difficulty: Difficulty) -> &[String] {
        self.buckets
            .get(&(category, difficulty))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Uniformly pick one text from the bucket, or `DEFAULT_TEXT` if it is empty
    pub fn select_with<R: Rng + ?Sized>(
        &self,
        category: TextCategory,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> &str {
        match self.bucket(category, difficulty).choose(rng) {
            Some(text) => text.as_str(),
            None => {
                tracing::warn!(%category, %difficulty, "empty text bucket, using default");
                DEFAULT_TEXT
            }
        }
    }

    pub fn select(&self, category: TextCategory, difficulty: Difficulty) -> String {
        self.select_with(category, difficulty, &mut rand::thread_rng())
            .to_string()
    }
}

/// Pick a practice text for the given settings
pub fn select_text(config: &SessionConfig) -> String {
    let text = TextCatalog::builtin().select(config.category, config.difficulty);
    tracing::info!(
        category = %config.category,
        difficulty = %config.difficulty,
        chars = text.chars().count(),
        "selected text"
    );
    text
}
