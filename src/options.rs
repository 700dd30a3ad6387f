use std::path::PathBuf;

const DEFAULT_OUTPUT_FILE_NAME: &str = "tagcloud";
const DEFAULT_WIDTH: i64 = 1000;
const DEFAULT_HEIGHT: i64 = 1000;
const DEFAULT_FONT_NAME: &str = "Arial";
const DEFAULT_FONT_SIZE: i32 = 20;
const DEFAULT_SPIRAL: &str = "log";
const DEFAULT_IMAGE_FORMAT: &str = "png";
const DEFAULT_INPUT_FORMAT: &str = "txt";

/// Unvalidated user options, as they arrive from the command line.
///
/// Nothing here is checked. Numbers stay signed and selectors stay strings so
/// that every invalid value reaches [`crate::ConfigResolver`] intact and is
/// reported there.
///
/// Use [`RawOptions::builder()`] to construct options with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOptions {
    /// Directory the rendered image will be written to
    pub output_dir: PathBuf,

    /// Output file name without extension
    pub output_file_name: String,

    /// Image width in pixels
    pub width: i64,

    /// Image height in pixels
    pub height: i64,

    /// Font family name for tags
    pub font_name: String,

    /// Font size for tags
    pub font_size: i32,

    /// Explicit word list (mutually exclusive with `input_file`)
    pub tags: Vec<String>,

    /// Color scheme selector
    pub color_scheme: i32,

    /// Spiral selector (`log`, `sqr`, `rnd`)
    pub spiral: String,

    /// Output image format selector (`png`, `bmp`, `jpeg`)
    pub image_format: String,

    /// Input file format selector
    pub input_format: String,

    /// Path to the input text file (mutually exclusive with `tags`)
    pub input_file: Option<PathBuf>,

    /// Names of word modifications to apply, in order
    pub modifications: Vec<String>,

    /// Words to drop in addition to the stop words
    pub excluded_words: Vec<String>,
}

impl RawOptions {
    /// Creates a new options builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagcloud::RawOptions;
    ///
    /// let options = RawOptions::builder()
    ///     .size(800, 600)
    ///     .tags(["rust", "cloud"])
    ///     .build();
    ///
    /// assert_eq!(options.width, 800);
    /// ```
    #[must_use]
    pub fn builder() -> RawOptionsBuilder {
        RawOptionsBuilder::default()
    }
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font_name: DEFAULT_FONT_NAME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            tags: Vec::new(),
            color_scheme: 0,
            spiral: DEFAULT_SPIRAL.to_string(),
            image_format: DEFAULT_IMAGE_FORMAT.to_string(),
            input_format: DEFAULT_INPUT_FORMAT.to_string(),
            input_file: None,
            modifications: Vec::new(),
            excluded_words: Vec::new(),
        }
    }
}

/// Builder for creating [`RawOptions`].
///
/// Unlike most builders, `build` never fails: validation is the resolver's job.
#[derive(Debug, Default)]
pub struct RawOptionsBuilder {
    options: RawOptions,
}

impl RawOptionsBuilder {
    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output_dir = path.into();
        self
    }

    /// Sets the output file name (without extension).
    #[must_use]
    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.options.output_file_name = name.into();
        self
    }

    /// Sets the image width and height.
    #[must_use]
    pub fn size(mut self, width: i64, height: i64) -> Self {
        self.options.width = width;
        self.options.height = height;
        self
    }

    /// Sets the image width.
    #[must_use]
    pub fn width(mut self, width: i64) -> Self {
        self.options.width = width;
        self
    }

    /// Sets the image height.
    #[must_use]
    pub fn height(mut self, height: i64) -> Self {
        self.options.height = height;
        self
    }

    /// Sets the font family name.
    #[must_use]
    pub fn font_name(mut self, name: impl Into<String>) -> Self {
        self.options.font_name = name.into();
        self
    }

    /// Sets the font size.
    #[must_use]
    pub fn font_size(mut self, size: i32) -> Self {
        self.options.font_size = size;
        self
    }

    /// Sets the explicit word list.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the color scheme selector.
    #[must_use]
    pub fn color_scheme(mut self, selector: i32) -> Self {
        self.options.color_scheme = selector;
        self
    }

    /// Sets the spiral selector.
    #[must_use]
    pub fn spiral(mut self, selector: impl Into<String>) -> Self {
        self.options.spiral = selector.into();
        self
    }

    /// Sets the output image format selector.
    #[must_use]
    pub fn image_format(mut self, selector: impl Into<String>) -> Self {
        self.options.image_format = selector.into();
        self
    }

    /// Sets the input file format selector.
    #[must_use]
    pub fn input_format(mut self, selector: impl Into<String>) -> Self {
        self.options.input_format = selector.into();
        self
    }

    /// Sets the input text file.
    #[must_use]
    pub fn input_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.input_file = Some(path.into());
        self
    }

    /// Sets the ordered list of modification names.
    #[must_use]
    pub fn modifications<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.modifications = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the user-excluded words.
    #[must_use]
    pub fn excluded_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.excluded_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> RawOptions {
        self.options
    }
}
