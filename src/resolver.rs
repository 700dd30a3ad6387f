use crate::{
    config::{
        ColorScheme, Configuration, FontSpec, ImageFormat, InputFormat, Point, Size, Spiral,
        SpiralKind,
    },
    error::{Error, Result},
    font::{FontCatalog, SystemFontCatalog},
    handler::{HandlerCatalog, HandlerRegistry, Transform},
    options::RawOptions,
    pipeline::WordPipeline,
    source::SourceReader,
};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Turns [`RawOptions`] into a validated [`Configuration`].
///
/// Steps run in a fixed order and the first failing step ends resolution:
///
/// 1. output directory exists
/// 2. output file name
/// 3. image size is positive
/// 4. image center
/// 5. font size is positive and the font family exists
/// 6. color scheme
/// 7. spiral
/// 8. image format
/// 9. input file format
/// 10. exactly one input source
/// 11. every modification name is known (all unknown names are reported)
/// 12. the word pipeline runs
pub struct ConfigResolver<F = SystemFontCatalog, H = HandlerRegistry> {
    handlers: H,
    fonts: F,
}

impl<F: FontCatalog, H: HandlerCatalog> ConfigResolver<F, H> {
    /// Creates a resolver that takes transforms from `handlers` and checks
    /// fonts against `fonts`.
    #[must_use]
    pub const fn new(handlers: H, fonts: F) -> Self {
        Self { handlers, fonts }
    }

    /// Resolves `options` into a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first invalid field,
    /// [`Error::UnknownHandlers`] listing every unknown modification,
    /// [`Error::InvalidUtf8`] if the input file is not UTF-8 text, or
    /// [`Error::Io`] if the input file cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagcloud::{ConfigResolver, FontCatalog, HandlerRegistry, RawOptions, StopWords};
    ///
    /// struct AnyFont;
    ///
    /// impl FontCatalog for AnyFont {
    ///     fn resolve_family(&self, requested: &str) -> String {
    ///         requested.to_string()
    ///     }
    /// }
    ///
    /// let resolver = ConfigResolver::new(HandlerRegistry::new(StopWords::builtin()), AnyFont);
    /// let options = RawOptions::builder()
    ///     .tags(["Rust", "rust", "the"])
    ///     .modifications(["normalize"])
    ///     .build();
    ///
    /// let config = resolver.resolve(options)?;
    /// assert_eq!(config.frequencies().get("rust"), Some(2));
    /// assert_eq!(config.frequencies().get("the"), None);
    /// # Ok::<(), tagcloud::Error>(())
    /// ```
    #[instrument(skip_all)]
    pub fn resolve(&self, options: RawOptions) -> Result<Configuration> {
        let output_dir = Self::output_dir(&options)?;
        let output_file_name = Self::output_file_name(&options);
        let image_size = Self::image_size(&options)?;
        let image_center = Self::image_center(image_size);
        let font = self.font(&options)?;
        let color_scheme = Self::color_scheme(&options)?;
        let spiral = Self::spiral(&options, image_center)?;
        let image_format = Self::image_format(&options)?;
        let input_format = Self::input_format(&options)?;
        let source = Self::source(&options)?;
        let transforms = self.transforms(&options)?;
        let pipeline = WordPipeline::build(&source, &transforms)?;

        info!(
            "✓ Configuration resolved: {}x{} {:?}, {} unique words",
            image_size.width,
            image_size.height,
            image_format,
            pipeline.frequencies().len()
        );

        Ok(Configuration {
            output_dir,
            output_file_name,
            image_size,
            image_center,
            font,
            color_scheme,
            spiral,
            image_format,
            input_format,
            source,
            transforms,
            pipeline,
        })
    }

    fn output_dir(options: &RawOptions) -> Result<PathBuf> {
        if !options.output_dir.is_dir() {
            return Err(Error::validation(format!(
                "Output directory doesn't exist: {}",
                options.output_dir.display()
            )));
        }

        debug!("Output directory: {}", options.output_dir.display());
        Ok(options.output_dir.clone())
    }

    fn output_file_name(options: &RawOptions) -> String {
        debug!("Output file name: {}", options.output_file_name);
        options.output_file_name.clone()
    }

    fn image_size(options: &RawOptions) -> Result<Size> {
        if options.width <= 0 || options.height <= 0 {
            return Err(Error::validation("Image size must be greater than zero"));
        }

        let (Ok(width), Ok(height)) = (u32::try_from(options.width), u32::try_from(options.height))
        else {
            return Err(Error::validation(format!(
                "Image size {}x{} is too large",
                options.width, options.height
            )));
        };

        debug!("Image size: {}x{}", width, height);
        Ok(Size { width, height })
    }

    fn image_center(size: Size) -> Point {
        let center = size.center();
        debug!("Image center: ({}, {})", center.x, center.y);
        center
    }

    fn font(&self, options: &RawOptions) -> Result<FontSpec> {
        let size = u32::try_from(options.font_size)
            .ok()
            .filter(|&size| size > 0)
            .ok_or_else(|| Error::validation("Font size must be greater than zero"))?;

        let resolved = self.fonts.resolve_family(&options.font_name);
        if resolved != options.font_name {
            debug!(
                "Font '{}' would be substituted by '{}'",
                options.font_name, resolved
            );
            return Err(Error::validation(format!(
                "Font name is unknown: {}",
                options.font_name
            )));
        }

        debug!("Font: {} {}", options.font_name, size);
        Ok(FontSpec {
            name: options.font_name.clone(),
            size,
        })
    }

    fn color_scheme(options: &RawOptions) -> Result<ColorScheme> {
        let scheme = ColorScheme::from_selector(options.color_scheme).ok_or_else(|| {
            Error::validation(format!(
                "Unknown color scheme is given: {}",
                options.color_scheme
            ))
        })?;

        debug!("Color scheme: {:?}", scheme);
        Ok(scheme)
    }

    fn spiral(options: &RawOptions, center: Point) -> Result<Spiral> {
        let kind = SpiralKind::from_selector(&options.spiral).ok_or_else(|| {
            Error::validation(format!("Unknown spiral is given: {}", options.spiral))
        })?;

        debug!("Spiral: {:?}", kind);
        Ok(Spiral::new(kind, center))
    }

    fn image_format(options: &RawOptions) -> Result<ImageFormat> {
        let format = ImageFormat::from_selector(&options.image_format).ok_or_else(|| {
            Error::validation(format!(
                "Unknown image format is given: {}",
                options.image_format
            ))
        })?;

        debug!("Image format: {:?}", format);
        Ok(format)
    }

    fn input_format(options: &RawOptions) -> Result<InputFormat> {
        let format = InputFormat::from_selector(&options.input_format).ok_or_else(|| {
            Error::validation(format!(
                "Unknown input file format is given: {}",
                options.input_format
            ))
        })?;

        debug!("Input format: {:?}", format);
        Ok(format)
    }

    fn source(options: &RawOptions) -> Result<SourceReader> {
        let input_file = options
            .input_file
            .as_ref()
            .filter(|path| !path.as_os_str().is_empty());
        let has_tags = options.tags.first().is_some_and(|tag| !tag.is_empty());

        match (input_file, has_tags) {
            (Some(path), false) => {
                debug!("Source: file {}", path.display());
                Ok(SourceReader::file(path.clone()))
            }
            (None, true) => {
                debug!("Source: {} listed words", options.tags.len());
                Ok(SourceReader::list(options.tags.iter().cloned()))
            }
            _ => Err(Error::validation(
                "You need to set exactly one input source: an input file or a words list",
            )),
        }
    }

    fn transforms(&self, options: &RawOptions) -> Result<Vec<Transform>> {
        let resolution = self.handlers.resolve_names(&options.modifications);
        if !resolution.is_complete() {
            return Err(Error::unknown_handlers(resolution.unrecognized));
        }

        let mut transforms = resolution.recognized;
        transforms.push(self.handlers.exclusion_for(&options.excluded_words));

        debug!(
            "Transforms: {:?}",
            transforms.iter().map(Transform::name).collect::<Vec<_>>()
        );
        Ok(transforms)
    }
}
