use crate::{error::Result, handler::Transform, source::SourceReader};
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map;
use tracing::{info, instrument, trace, warn};

/// Mapping from normalized word to occurrence count.
///
/// Keys are never empty and counts are never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WordFrequencies {
    counts: HashMap<String, usize>,
}

impl WordFrequencies {
    /// Counts one occurrence of `word`. Empty words are ignored.
    fn record(&mut self, word: String) -> bool {
        if word.is_empty() {
            return false;
        }
        *self.counts.entry(word).or_insert(0) += 1;
        true
    }

    /// Occurrence count of `word`, if it was seen.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no word survived the pipeline.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates over `(word, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }

    /// Returns up to `limit` words, most frequent first. Ties are broken
    /// alphabetically so the order is deterministic.
    #[must_use]
    pub fn most_frequent(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut words: Vec<_> = self.iter().collect();
        words.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        words.truncate(limit);
        words
    }
}

impl<'a> IntoIterator for &'a WordFrequencies {
    type Item = (&'a String, &'a usize);
    type IntoIter = hash_map::Iter<'a, String, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Counters collected while folding the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Raw words read from the source
    pub total_words: usize,

    /// Words the transform chain reduced to nothing
    pub dropped_words: usize,

    /// Distinct words in the frequency map
    pub unique_words: usize,
}

/// Reduces a word source to a frequency map through a transform chain.
///
/// The map is computed once, when the pipeline is built.
#[derive(Debug, Clone)]
pub struct WordPipeline {
    frequencies: WordFrequencies,
    stats: PipelineStats,
}

impl WordPipeline {
    /// Reads every word from `reader`, runs it through `transforms` in order
    /// and counts the non-empty results.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the source cannot be read. Nothing is
    /// retried.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagcloud::{BuiltinHandler, SourceReader, WordPipeline};
    ///
    /// let reader = SourceReader::list(["cat", "dog", "cat", "CAT"]);
    /// let pipeline = WordPipeline::build(&reader, &[BuiltinHandler::Normalize.transform()])?;
    ///
    /// assert_eq!(pipeline.frequencies().get("cat"), Some(3));
    /// assert_eq!(pipeline.frequencies().get("dog"), Some(1));
    /// # Ok::<(), tagcloud::Error>(())
    /// ```
    #[instrument(skip_all, fields(transforms = transforms.len()))]
    pub fn build(reader: &SourceReader, transforms: &[Transform]) -> Result<Self> {
        let mut frequencies = WordFrequencies::default();
        let mut stats = PipelineStats::default();

        for word in reader.words() {
            let word = word?;
            stats.total_words += 1;

            let processed = Self::process(word, transforms);
            if !frequencies.record(processed) {
                stats.dropped_words += 1;
            }
        }

        stats.unique_words = frequencies.len();

        if frequencies.is_empty() {
            warn!("No words left after filtering ({} read)", stats.total_words);
        } else {
            info!(
                "✓ Counted {} words ({} unique, {} dropped)",
                stats.total_words, stats.unique_words, stats.dropped_words
            );
        }

        Ok(Self { frequencies, stats })
    }

    /// Folds a single word through every transform.
    fn process(word: String, transforms: &[Transform]) -> String {
        transforms.iter().fold(word, |word, transform| {
            let next = transform.apply(&word);
            if next.is_empty() && !word.is_empty() {
                trace!("'{}' dropped by {}", word, transform.name());
            }
            next
        })
    }

    /// The resulting frequency map.
    #[must_use]
    pub const fn frequencies(&self) -> &WordFrequencies {
        &self.frequencies
    }

    /// Counters collected while building.
    #[must_use]
    pub const fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Consumes the pipeline, returning the frequency map.
    #[must_use]
    pub fn into_frequencies(self) -> WordFrequencies {
        self.frequencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{BuiltinHandler, HandlerRegistry};
    use crate::stopwords::StopWords;
    use assert_fs::prelude::*;

    fn build(words: &[&str], transforms: &[Transform]) -> WordPipeline {
        WordPipeline::build(&SourceReader::list(words.iter().copied()), transforms).unwrap()
    }

    #[test]
    fn test_counts_normalized_words() {
        let pipeline = build(
            &["cat", "dog", "cat", "CAT"],
            &[BuiltinHandler::Normalize.transform()],
        );
        let frequencies = pipeline.frequencies();

        assert_eq!(frequencies.len(), 2);
        assert_eq!(frequencies.get("cat"), Some(3));
        assert_eq!(frequencies.get("dog"), Some(1));
        assert_eq!(frequencies.total(), 4);
    }

    #[test]
    fn test_without_transforms_counts_exact_strings() {
        let pipeline = build(&["cat", "Cat", "cat"], &[]);

        assert_eq!(pipeline.frequencies().get("cat"), Some(2));
        assert_eq!(pipeline.frequencies().get("Cat"), Some(1));
    }

    #[test]
    fn test_dropped_words_never_become_keys() {
        let registry = HandlerRegistry::new(StopWords::builtin());
        let exclusion = registry.exclusion(&["dog"]);
        let strip = BuiltinHandler::StripPunctuation.transform();

        for chain in [
            vec![strip.clone(), exclusion.clone()],
            vec![exclusion.clone(), strip.clone()],
        ] {
            let pipeline = build(&["the", "dog", "...", "cat"], &chain);
            let frequencies = pipeline.frequencies();

            assert_eq!(frequencies.get(""), None);
            assert_eq!(frequencies.get("the"), None);
            assert_eq!(frequencies.get("dog"), None);
            assert_eq!(frequencies.get("cat"), Some(1));
            assert_eq!(pipeline.stats().dropped_words, 3);
        }
    }

    #[test]
    fn test_transform_order_matters() {
        let registry = HandlerRegistry::new(StopWords::builtin());
        let normalize = BuiltinHandler::Normalize.transform();
        let exclusion = registry.exclusion::<&str>(&[]);

        let excluded_after = build(&["The", "Rust"], &[normalize.clone(), exclusion.clone()]);
        assert_eq!(excluded_after.frequencies().get("the"), None);
        assert_eq!(excluded_after.frequencies().get("rust"), Some(1));

        let excluded_before = build(&["The", "Rust"], &[exclusion, normalize]);
        assert_eq!(excluded_before.frequencies().get("the"), Some(1));
    }

    #[test]
    fn test_transforms_are_folded_not_fanned_out() {
        let suffix = Transform::new("suffix", |word| format!("{word}!"));
        let pipeline = build(&["go"], &[suffix.clone(), suffix]);

        assert_eq!(pipeline.frequencies().get("go!!"), Some(1));
        assert_eq!(pipeline.frequencies().len(), 1);
    }

    #[test]
    fn test_stats() {
        let pipeline = build(
            &["a", "cat", "a", "dog"],
            &[BuiltinHandler::DropShort.transform()],
        );

        assert_eq!(
            pipeline.stats(),
            PipelineStats {
                total_words: 4,
                dropped_words: 2,
                unique_words: 2,
            }
        );
    }

    #[test]
    fn test_most_frequent_is_deterministic() {
        let pipeline = build(&["b", "a", "c", "c", "b", "d"], &[]);
        let top = pipeline.frequencies().most_frequent(3);

        assert_eq!(top, vec![("b", 2), ("c", 2), ("a", 1)]);
    }

    #[test]
    fn test_reads_file_source() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("input.txt");
        input.write_str("Rust rust\nRUST cloud").unwrap();

        let pipeline = WordPipeline::build(
            &SourceReader::file(input.path()),
            &[BuiltinHandler::Normalize.transform()],
        )
        .unwrap();

        assert_eq!(pipeline.frequencies().get("rust"), Some(3));
        assert_eq!(pipeline.frequencies().get("cloud"), Some(1));
    }

    #[test]
    fn test_io_failure_propagates() {
        let result = WordPipeline::build(&SourceReader::file("/nonexistent/input.txt"), &[]);
        assert!(result.unwrap_err().is_io());
    }

    #[test]
    fn test_empty_source_gives_empty_map() {
        let pipeline = build(&[], &[]);
        assert!(pipeline.frequencies().is_empty());
        assert_eq!(pipeline.stats(), PipelineStats::default());
    }

    #[test]
    fn test_serializes_as_object() {
        let frequencies = build(&["cat", "cat"], &[]).into_frequencies();
        let json = serde_json::to_string(&frequencies).unwrap();

        assert_eq!(json, r#"{"cat":2}"#);
    }
}
