use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use std::vec;
use tracing::trace;

/// Where raw words come from.
///
/// Creating a reader never touches the filesystem. The file is opened when
/// [`SourceReader::words`] is first polled and closed when the returned
/// iterator is dropped or exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceReader {
    /// Whitespace-separated words of a text file, in file order
    File(PathBuf),
    /// One word per list element, in list order
    List(Vec<String>),
}

impl SourceReader {
    /// Creates a file-backed reader.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Creates a list-backed reader.
    #[must_use]
    pub fn list<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(words.into_iter().map(Into::into).collect())
    }

    /// Returns the input file path for file-backed readers.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path.as_path()),
            Self::List(_) => None,
        }
    }

    /// Returns a lazy, single-pass sequence of raw words.
    ///
    /// For file-backed readers an open or read failure is yielded once as
    /// [`Error::Io`], or as [`Error::InvalidUtf8`] when a line is not UTF-8,
    /// after which the sequence ends.
    #[must_use]
    pub fn words(&self) -> Words<'_> {
        match self {
            Self::File(path) => Words::File(FileWords::new(path)),
            Self::List(words) => Words::List(words.iter()),
        }
    }
}

/// Iterator over the raw words of a [`SourceReader`].
#[derive(Debug)]
pub enum Words<'a> {
    /// Words read lazily from a file
    File(FileWords<'a>),
    /// Words borrowed from an in-memory list
    List(std::slice::Iter<'a, String>),
}

impl Iterator for Words<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::File(words) => words.next(),
            Self::List(words) => words.next().cloned().map(Ok),
        }
    }
}

#[derive(Debug)]
enum FileState {
    Unopened,
    Reading(Lines<BufReader<File>>),
    Done,
}

/// Lazily tokenizes a text file on whitespace.
#[derive(Debug)]
pub struct FileWords<'a> {
    path: &'a Path,
    state: FileState,
    pending: vec::IntoIter<String>,
}

impl<'a> FileWords<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            state: FileState::Unopened,
            pending: Vec::new().into_iter(),
        }
    }

    fn fail(&mut self, source: std::io::Error) -> Option<Result<String>> {
        self.state = FileState::Done;
        if source.kind() == std::io::ErrorKind::InvalidData {
            Some(Err(Error::invalid_utf8(self.path)))
        } else {
            Some(Err(Error::io(self.path, source)))
        }
    }
}

impl Iterator for FileWords<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(word) = self.pending.next() {
                return Some(Ok(word));
            }

            match &mut self.state {
                FileState::Unopened => match File::open(self.path) {
                    Ok(file) => {
                        trace!("Opened {}", self.path.display());
                        self.state = FileState::Reading(BufReader::new(file).lines());
                    }
                    Err(e) => return self.fail(e),
                },
                FileState::Reading(lines) => match lines.next() {
                    Some(Ok(line)) => {
                        self.pending = line
                            .split_whitespace()
                            .map(str::to_string)
                            .collect::<Vec<_>>()
                            .into_iter();
                    }
                    Some(Err(e)) => return self.fail(e),
                    None => {
                        // Drops the reader, closing the file.
                        self.state = FileState::Done;
                    }
                },
                FileState::Done => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_list_reader_keeps_order() {
        let reader = SourceReader::list(["cat", "dog", "cat"]);
        let words: Vec<_> = reader.words().collect::<Result<_>>().unwrap();

        assert_eq!(words, vec!["cat", "dog", "cat"]);
        assert!(reader.path().is_none());
    }

    #[test]
    fn test_list_elements_are_single_tokens() {
        let reader = SourceReader::list(["two words"]);
        let words: Vec<_> = reader.words().collect::<Result<_>>().unwrap();

        assert_eq!(words, vec!["two words"]);
    }

    #[test]
    fn test_file_reader_splits_on_whitespace() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("input.txt");
        input
            .write_str("  the quick\tbrown\n\nfox   jumps\r\nover ")
            .unwrap();

        let reader = SourceReader::file(input.path());
        let words: Vec<_> = reader.words().collect::<Result<_>>().unwrap();

        assert_eq!(words, vec!["the", "quick", "brown", "fox", "jumps", "over"]);
        assert_eq!(reader.path(), Some(input.path()));
    }

    #[test]
    fn test_empty_file_yields_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("empty.txt");
        input.touch().unwrap();

        let reader = SourceReader::file(input.path());
        assert_eq!(reader.words().count(), 0);
    }

    #[test]
    fn test_construction_does_not_touch_filesystem() {
        let reader = SourceReader::file("/nonexistent/path/words.txt");
        assert!(matches!(reader, SourceReader::File(_)));
    }

    #[test]
    fn test_missing_file_fails_once() {
        let reader = SourceReader::file("/nonexistent/path/words.txt");
        let mut words = reader.words();

        let first = words.next().unwrap();
        assert!(first.unwrap_err().is_io());
        assert!(words.next().is_none());
    }

    #[test]
    fn test_non_utf8_file_is_an_encoding_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("latin1.txt");
        input.write_binary(b"caf\xe9 cloud cloud").unwrap();

        let reader = SourceReader::file(input.path());
        let mut words = reader.words();

        let err = words.next().unwrap().unwrap_err();
        assert!(err.is_invalid_utf8());
        assert!(!err.is_io());
        assert_eq!(err, Error::invalid_utf8(input.path()));
        assert!(words.next().is_none());
    }

    #[test]
    fn test_words_before_bad_line_are_yielded() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("mixed.txt");
        input.write_binary(b"good words\ncaf\xe9\n").unwrap();

        let reader = SourceReader::file(input.path());
        let mut words = reader.words();

        assert_eq!(words.next().unwrap().unwrap(), "good");
        assert_eq!(words.next().unwrap().unwrap(), "words");
        assert!(words.next().unwrap().unwrap_err().is_invalid_utf8());
        assert!(words.next().is_none());
    }
}
