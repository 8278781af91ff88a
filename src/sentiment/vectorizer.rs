//! Bag-of-words / TF-IDF text vectorizer with a serializable vocabulary.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TextEmbedder;

/// Current on-disk format version.
pub const VECTORIZER_FORMAT_VERSION: i64 = 1;

/// Words of two or more word characters, Unicode aware.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token regex must compile"));

#[derive(Debug, Error, PartialEq)]
pub enum VectorizerError {
    #[error("Cannot fit a vectorizer on an empty corpus")]
    EmptyCorpus,
    #[error("No terms survived the vocabulary filters")]
    EmptyVocabulary,
    #[error("{0}")]
    Invalid(String),
}

/// Row normalization applied after weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    #[default]
    L2,
    None,
}

/// Options used by [`TextVectorizer::fit`].
#[derive(Debug, Clone)]
pub struct FitOptions {
    pub lowercase: bool,
    pub ngram_max: usize,
    /// Drop terms appearing in fewer documents than this.
    pub min_df: usize,
    /// Keep only the terms with the highest document frequency.
    pub max_features: Option<usize>,
    pub use_idf: bool,
    pub sublinear_tf: bool,
    pub norm: Norm,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            ngram_max: 2,
            min_df: 1,
            max_features: Some(20_000),
            use_idf: true,
            sublinear_tf: false,
            norm: Norm::L2,
        }
    }
}

/// Maps raw text to a dense feature vector over a fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextVectorizer {
    pub format_version: i64,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
    /// Term -> column index. Indices cover `0..vocabulary.len()` exactly once.
    pub vocabulary: BTreeMap<String, usize>,
    /// Per-column IDF weights; plain term counts when absent.
    #[serde(default)]
    pub idf: Option<Vec<f32>>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

fn default_true() -> bool {
    true
}

fn default_ngram_max() -> usize {
    1
}

impl TextVectorizer {
    /// Learn a vocabulary (and IDF weights when requested) from a corpus.
    pub fn fit<S: AsRef<str>>(docs: &[S], options: &FitOptions) -> Result<Self, VectorizerError> {
        if docs.is_empty() {
            return Err(VectorizerError::EmptyCorpus);
        }
        let ngram_max = options.ngram_max.max(1);
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in docs {
            let terms = analyze(doc.as_ref(), options.lowercase, ngram_max);
            for term in terms.into_iter().collect::<BTreeSet<_>>() {
                *doc_freq.entry(term).or_default() += 1;
            }
        }

        let mut kept: Vec<(String, usize)> = doc_freq
            .into_iter()
            .filter(|(_, df)| *df >= options.min_df.max(1))
            .collect();
        if let Some(limit) = options.max_features
            && kept.len() > limit
        {
            // Highest document frequency first; alphabetical among equals.
            kept.sort_by(|(a, df_a), (b, df_b)| df_b.cmp(df_a).then_with(|| a.cmp(b)));
            kept.truncate(limit);
            kept.sort_by(|(a, _), (b, _)| a.cmp(b));
        }
        if kept.is_empty() {
            return Err(VectorizerError::EmptyVocabulary);
        }

        let n_docs = docs.len() as f32;
        let idf = options.use_idf.then(|| {
            kept.iter()
                .map(|(_, df)| ((1.0 + n_docs) / (1.0 + *df as f32)).ln() + 1.0)
                .collect()
        });
        let vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(idx, (term, _))| (term, idx))
            .collect();
        Ok(Self {
            format_version: VECTORIZER_FORMAT_VERSION,
            lowercase: options.lowercase,
            ngram_max,
            vocabulary,
            idf,
            sublinear_tf: options.sublinear_tf,
            norm: options.norm,
        })
    }

    /// Check structural invariants of a loaded vectorizer.
    pub fn validate(&self) -> Result<(), VectorizerError> {
        if self.format_version != VECTORIZER_FORMAT_VERSION {
            return Err(VectorizerError::Invalid(format!(
                "Unsupported format_version {} (expected {})",
                self.format_version, VECTORIZER_FORMAT_VERSION
            )));
        }
        if self.ngram_max == 0 {
            return Err(VectorizerError::Invalid("ngram_max must be >= 1".into()));
        }
        if self.vocabulary.is_empty() {
            return Err(VectorizerError::EmptyVocabulary);
        }
        let dim = self.vocabulary.len();
        let mut seen = vec![false; dim];
        for (term, &idx) in &self.vocabulary {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(VectorizerError::Invalid(format!(
                        "Column {idx} is assigned twice (at {term:?})"
                    )));
                }
                None => {
                    return Err(VectorizerError::Invalid(format!(
                        "Column {idx} for {term:?} is outside 0..{dim}"
                    )));
                }
            }
        }
        if let Some(idf) = &self.idf
            && idf.len() != dim
        {
            return Err(VectorizerError::Invalid(format!(
                "idf length {} does not match vocabulary size {dim}",
                idf.len()
            )));
        }
        Ok(())
    }

    /// Number of output features.
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// Terms (unigrams followed by higher n-grams) the vectorizer would count.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        analyze(text, self.lowercase, self.ngram_max)
    }

    /// Vectorize one document. Terms outside the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut row = vec![0.0f32; self.dim()];
        for term in self.analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&term)
                && let Some(cell) = row.get_mut(idx)
            {
                *cell += 1.0;
            }
        }
        if self.sublinear_tf {
            for value in row.iter_mut().filter(|v| **v > 0.0) {
                *value = 1.0 + value.ln();
            }
        }
        if let Some(idf) = &self.idf {
            for (value, weight) in row.iter_mut().zip(idf) {
                *value *= weight;
            }
        }
        if self.norm == Norm::L2 {
            let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
            if norm > 0.0 {
                for value in &mut row {
                    *value /= norm;
                }
            }
        }
        row
    }
}

impl TextEmbedder for TextVectorizer {
    fn dim(&self) -> usize {
        TextVectorizer::dim(self)
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        self.transform(text)
    }
}

fn analyze(text: &str, lowercase: bool, ngram_max: usize) -> Vec<String> {
    let source = if lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    let tokens: Vec<&str> = TOKEN_PATTERN
        .find_iter(&source)
        .map(|m| m.as_str())
        .collect();
    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    for n in 2..=ngram_max {
        terms.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unigram_counts() -> FitOptions {
        FitOptions {
            ngram_max: 1,
            use_idf: false,
            norm: Norm::None,
            max_features: None,
            ..FitOptions::default()
        }
    }

    #[test]
    fn tokenizer_drops_single_characters_and_punctuation() {
        let terms = analyze("A great, GREAT buy!", true, 1);
        assert_eq!(terms, vec!["great", "great", "buy"]);
    }

    #[test]
    fn bigrams_follow_unigrams() {
        let terms = analyze("not good at all", true, 2);
        assert_eq!(
            terms,
            vec!["not", "good", "at", "all", "not good", "good at", "at all"]
        );
    }

    #[test]
    fn fit_assigns_alphabetical_columns_and_counts_terms() {
        let vectorizer =
            TextVectorizer::fit(&["good product", "bad product"], &unigram_counts()).unwrap();
        assert_eq!(vectorizer.dim(), 3);
        assert_eq!(vectorizer.vocabulary["bad"], 0);
        assert_eq!(vectorizer.vocabulary["good"], 1);
        assert_eq!(vectorizer.vocabulary["product"], 2);
        assert_eq!(
            vectorizer.transform("Good good product, unknown"),
            vec![0.0, 2.0, 1.0]
        );
        vectorizer.validate().unwrap();
    }

    #[test]
    fn idf_downweights_common_terms_and_rows_are_unit_length() {
        let options = FitOptions {
            ngram_max: 1,
            ..FitOptions::default()
        };
        let vectorizer = TextVectorizer::fit(&["good product", "bad product"], &options).unwrap();
        let idf = vectorizer.idf.as_ref().unwrap();
        assert!(idf[vectorizer.vocabulary["good"]] > idf[vectorizer.vocabulary["product"]]);
        let row = vectorizer.transform("good product");
        let norm: f32 = row.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
        assert!(vectorizer.transform("").iter().all(|v| *v == 0.0));
    }

    #[test]
    fn max_features_ranks_by_document_frequency() {
        let options = FitOptions {
            max_features: Some(1),
            ..unigram_counts()
        };
        let docs = [
            "great great great great great common",
            "common x1",
            "common y1",
        ];
        let vectorizer = TextVectorizer::fit(&docs, &options).unwrap();
        let terms: Vec<&str> = vectorizer.vocabulary.keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["common"]);
    }

    #[test]
    fn max_features_breaks_ties_alphabetically() {
        let options = FitOptions {
            max_features: Some(2),
            ..unigram_counts()
        };
        let vectorizer =
            TextVectorizer::fit(&["zeta beta ok", "ok alpha", "meh"], &options).unwrap();
        let terms: Vec<&str> = vectorizer.vocabulary.keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["alpha", "ok"]);
    }

    #[test]
    fn min_df_can_empty_the_vocabulary() {
        let options = FitOptions {
            min_df: 3,
            ..unigram_counts()
        };
        assert_eq!(
            TextVectorizer::fit(&["one two", "three four"], &options),
            Err(VectorizerError::EmptyVocabulary)
        );
        assert_eq!(
            TextVectorizer::fit::<&str>(&[], &options),
            Err(VectorizerError::EmptyCorpus)
        );
    }

    #[test]
    fn validate_rejects_duplicate_columns() {
        let mut vectorizer =
            TextVectorizer::fit(&["good product"], &unigram_counts()).unwrap();
        vectorizer.vocabulary.insert("extra".into(), 0);
        assert!(matches!(
            vectorizer.validate(),
            Err(VectorizerError::Invalid(_))
        ));
    }
}
