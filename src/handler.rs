//! Named word modifications and their resolution.
//!
//! A [`Transform`] maps one word to one word. Returning an empty string drops
//! the word. The [`HandlerRegistry`] turns user-supplied modification names
//! into transforms and synthesizes the stop-word exclusion transform.

use crate::stopwords::StopWords;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

const MIN_WORD_CHARS: usize = 3;
const EXCLUSION_NAME: &str = "exclude";

type TransformFn = dyn Fn(&str) -> String + Send + Sync;

/// A named pure function from one word to one word.
///
/// An empty result means "drop this word".
#[derive(Clone)]
pub struct Transform {
    name: String,
    func: Arc<TransformFn>,
}

impl Transform {
    /// Wraps a function as a named transform.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Name the transform was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the transform to a single word.
    #[must_use]
    pub fn apply(&self, word: &str) -> String {
        (self.func)(word)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.name).finish()
    }
}

/// Closed catalog of built-in word modifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinHandler {
    /// Lowercases the word
    Normalize,
    /// Trims leading and trailing characters that are not letters or digits
    StripPunctuation,
    /// Drops words made only of digits
    DropNumbers,
    /// Drops words shorter than three characters
    DropShort,
}

impl BuiltinHandler {
    /// Every built-in handler.
    pub const ALL: [Self; 4] = [
        Self::Normalize,
        Self::StripPunctuation,
        Self::DropNumbers,
        Self::DropShort,
    ];

    /// Name used to request this handler.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normalize => "normalize",
            Self::StripPunctuation => "strip-punctuation",
            Self::DropNumbers => "drop-numbers",
            Self::DropShort => "drop-short",
        }
    }

    /// Looks up a handler by its exact name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|handler| handler.name() == name)
    }

    /// Applies the handler to a single word.
    #[must_use]
    pub fn apply(self, word: &str) -> String {
        match self {
            Self::Normalize => word.to_lowercase(),
            Self::StripPunctuation => word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string(),
            Self::DropNumbers => {
                if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
                    String::new()
                } else {
                    word.to_string()
                }
            }
            Self::DropShort => {
                if word.chars().count() < MIN_WORD_CHARS {
                    String::new()
                } else {
                    word.to_string()
                }
            }
        }
    }

    /// Wraps the handler as a [`Transform`].
    #[must_use]
    pub fn transform(self) -> Transform {
        Transform::new(self.name(), move |word| self.apply(word))
    }
}

/// A requested name paired with what it resolved to.
#[derive(Debug)]
pub(crate) struct HandlerDescriptor {
    name: String,
    handler: Option<BuiltinHandler>,
}

impl HandlerDescriptor {
    fn lookup(name: &str) -> Self {
        Self {
            name: name.to_string(),
            handler: BuiltinHandler::from_name(name),
        }
    }
}

/// Outcome of resolving modification names.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Transforms for the recognized names, in request order
    pub recognized: Vec<Transform>,
    /// Names that matched no handler, in request order
    pub unrecognized: Vec<String>,
}

impl Resolution {
    /// Returns true if every requested name was recognized.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unrecognized.is_empty()
    }
}

/// Source of the transforms a resolver chains together.
pub trait HandlerCatalog {
    /// Resolves every requested modification name.
    fn resolve_names(&self, names: &[String]) -> Resolution;

    /// Builds the exclusion transform that ends the chain.
    fn exclusion_for(&self, excluded: &[String]) -> Transform;
}

impl<H: HandlerCatalog + ?Sized> HandlerCatalog for &H {
    fn resolve_names(&self, names: &[String]) -> Resolution {
        (**self).resolve_names(names)
    }

    fn exclusion_for(&self, excluded: &[String]) -> Transform {
        (**self).exclusion_for(excluded)
    }
}

/// Maps modification names to transforms.
#[derive(Debug, Clone)]
pub struct HandlerRegistry {
    stop_words: StopWords,
}

impl HandlerRegistry {
    /// Creates a registry that excludes the given stop words.
    #[must_use]
    pub const fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    /// Stop words this registry excludes.
    #[must_use]
    pub const fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Resolves every name, collecting unknown names instead of stopping at
    /// the first one.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Resolution {
        let mut resolution = Resolution::default();

        for descriptor in names.iter().map(|name| HandlerDescriptor::lookup(name.as_ref())) {
            match descriptor.handler {
                Some(handler) => resolution.recognized.push(handler.transform()),
                None => resolution.unrecognized.push(descriptor.name),
            }
        }

        debug!(
            recognized = resolution.recognized.len(),
            unrecognized = resolution.unrecognized.len(),
            "Resolved handlers"
        );

        resolution
    }

    /// Builds the transform that drops stop words and `excluded` words.
    pub fn exclusion<S: AsRef<str>>(&self, excluded: &[S]) -> Transform {
        let banned: HashSet<String> = self
            .stop_words
            .iter()
            .chain(excluded.iter().map(|word| word.as_ref()))
            .map(str::to_string)
            .collect();

        Transform::new(EXCLUSION_NAME, move |word| {
            if banned.contains(word) {
                String::new()
            } else {
                word.to_string()
            }
        })
    }
}

impl HandlerCatalog for HandlerRegistry {
    fn resolve_names(&self, names: &[String]) -> Resolution {
        self.resolve(names)
    }

    fn exclusion_for(&self, excluded: &[String]) -> Transform {
        self.exclusion(excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> HandlerRegistry {
        HandlerRegistry::new(StopWords::builtin())
    }

    #[test]
    fn test_resolve_preserves_order() {
        let resolution = registry().resolve(&["strip-punctuation", "normalize"]);

        assert!(resolution.is_complete());
        let names: Vec<_> = resolution.recognized.iter().map(Transform::name).collect();
        assert_eq!(names, vec!["strip-punctuation", "normalize"]);
    }

    #[test]
    fn test_resolve_collects_all_unknown_names() {
        let resolution = registry().resolve(&["foo", "normalize", "bar"]);

        assert!(!resolution.is_complete());
        assert_eq!(resolution.unrecognized, vec!["foo", "bar"]);
        assert_eq!(resolution.recognized.len(), 1);
        assert_eq!(resolution.recognized[0].name(), "normalize");
    }

    #[test]
    fn test_resolve_empty() {
        let resolution = registry().resolve::<&str>(&[]);
        assert!(resolution.is_complete());
        assert!(resolution.recognized.is_empty());
    }

    #[test]
    fn test_builtin_handlers() {
        assert_eq!(BuiltinHandler::Normalize.apply("CaT"), "cat");
        assert_eq!(BuiltinHandler::StripPunctuation.apply("\"cat!\""), "cat");
        assert_eq!(BuiltinHandler::StripPunctuation.apply("don't"), "don't");
        assert_eq!(BuiltinHandler::StripPunctuation.apply("--"), "");
        assert_eq!(BuiltinHandler::DropNumbers.apply("2024"), "");
        assert_eq!(BuiltinHandler::DropNumbers.apply("r2d2"), "r2d2");
        assert_eq!(BuiltinHandler::DropShort.apply("ox"), "");
        assert_eq!(BuiltinHandler::DropShort.apply("cow"), "cow");
    }

    #[test]
    fn test_names_round_trip() {
        for handler in BuiltinHandler::ALL {
            assert_eq!(BuiltinHandler::from_name(handler.name()), Some(handler));
        }
        assert_eq!(BuiltinHandler::from_name("Normalize"), None);
    }

    #[test]
    fn test_exclusion_merges_stop_words_and_user_words() {
        let exclude = registry().exclusion(&["cloud"]);

        assert_eq!(exclude.name(), "exclude");
        assert_eq!(exclude.apply("the"), "");
        assert_eq!(exclude.apply("cloud"), "");
        assert_eq!(exclude.apply("rust"), "rust");
    }

    #[test]
    fn test_transform_debug_shows_name() {
        let transform = BuiltinHandler::Normalize.transform();
        assert_eq!(format!("{transform:?}"), "Transform(\"normalize\")");
    }

    #[test]
    fn test_catalog_works_through_a_reference() {
        fn chain<H: HandlerCatalog>(handlers: H, names: &[String]) -> Vec<Transform> {
            let mut transforms = handlers.resolve_names(names).recognized;
            transforms.push(handlers.exclusion_for(&["cargo".to_string()]));
            transforms
        }

        let registry = registry();
        let transforms = chain(&registry, &["drop-short".to_string()]);

        let names: Vec<_> = transforms.iter().map(Transform::name).collect();
        assert_eq!(names, vec!["drop-short", "exclude"]);
        assert_eq!(transforms[0].apply("ox"), "");
        assert_eq!(transforms[1].apply("cargo"), "");
        assert_eq!(transforms[1].apply("and"), "");
    }
}
