use crate::handler::Transform;
use crate::pipeline::{WordFrequencies, WordPipeline};
use crate::source::SourceReader;
use image::Rgb;
use std::path::{Path, PathBuf};

/// Image dimensions in pixels. Both sides are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Returns the image center using integer division.
    #[must_use]
    pub const fn center(self) -> Point {
        Point {
            x: self.width / 2,
            y: self.height / 2,
        }
    }
}

/// A pixel position on the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal offset from the left edge
    pub x: u32,
    /// Vertical offset from the top edge
    pub y: u32,
}

/// Font family and size used for tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    /// Family name, exactly as requested
    pub name: String,
    /// Size in points
    pub size: u32,
}

/// Color scheme for painting tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Black tags on a white background
    BlackWhite,
    /// Greens and browns on dark olive
    Camouflage,
    /// Neon tones on deep purple
    Cyberpunk,
}

impl ColorScheme {
    /// Looks up a scheme by its numeric selector.
    #[must_use]
    pub const fn from_selector(selector: i32) -> Option<Self> {
        match selector {
            0 => Some(Self::BlackWhite),
            1 => Some(Self::Camouflage),
            2 => Some(Self::Cyberpunk),
            _ => None,
        }
    }

    /// Returns the background color.
    #[must_use]
    pub const fn background(self) -> Rgb<u8> {
        match self {
            Self::BlackWhite => Rgb([255, 255, 255]),
            Self::Camouflage => Rgb([34, 49, 29]),
            Self::Cyberpunk => Rgb([13, 2, 33]),
        }
    }

    /// Returns the colors tags are painted with, cycled by the renderer.
    #[must_use]
    pub fn palette(self) -> &'static [Rgb<u8>] {
        const BLACK_WHITE: [Rgb<u8>; 2] = [Rgb([0, 0, 0]), Rgb([64, 64, 64])];
        const CAMOUFLAGE: [Rgb<u8>; 4] = [
            Rgb([120, 134, 107]),
            Rgb([75, 83, 32]),
            Rgb([150, 113, 23]),
            Rgb([189, 183, 107]),
        ];
        const CYBERPUNK: [Rgb<u8>; 4] = [
            Rgb([255, 0, 160]),
            Rgb([0, 255, 249]),
            Rgb([187, 0, 255]),
            Rgb([255, 238, 0]),
        ];

        match self {
            Self::BlackWhite => &BLACK_WHITE,
            Self::Camouflage => &CAMOUFLAGE,
            Self::Cyberpunk => &CYBERPUNK,
        }
    }
}

/// Shape of the curve tags are placed along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpiralKind {
    /// Archimedean-style logarithmic spiral
    Logarithmic,
    /// Square spiral walking outwards ring by ring
    Square,
    /// Random points drifting away from the center
    Random,
}

impl SpiralKind {
    /// Looks up a spiral by its selector, ignoring case.
    #[must_use]
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.to_lowercase().as_str() {
            "log" => Some(Self::Logarithmic),
            "sqr" => Some(Self::Square),
            "rnd" => Some(Self::Random),
            _ => None,
        }
    }
}

/// A spiral anchored at the image center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spiral {
    /// Curve shape
    pub kind: SpiralKind,
    /// Starting point
    pub center: Point,
}

impl Spiral {
    /// Creates a spiral of the given kind around `center`.
    #[must_use]
    pub const fn new(kind: SpiralKind, center: Point) -> Self {
        Self { kind, center }
    }
}

/// Encoding of the rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// Windows bitmap
    Bmp,
    /// JPEG
    Jpeg,
}

impl ImageFormat {
    /// Looks up a format by its selector, ignoring case.
    #[must_use]
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Jpeg => "jpeg",
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => Self::Png,
            ImageFormat::Bmp => Self::Bmp,
            ImageFormat::Jpeg => Self::Jpeg,
        }
    }
}

/// Format of the input text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// Plain whitespace-separated text
    Txt,
}

impl InputFormat {
    /// Looks up an input format. Only the exact selector `txt` is known.
    #[must_use]
    pub fn from_selector(selector: &str) -> Option<Self> {
        (selector == "txt").then_some(Self::Txt)
    }
}

/// Fully resolved configuration handed to the renderer.
///
/// Only [`crate::ConfigResolver`] can create one, and only when every field
/// passed validation. The word pipeline has already run, so
/// [`Configuration::frequencies`] is ready to use.
#[derive(Debug)]
pub struct Configuration {
    pub(crate) output_dir: PathBuf,
    pub(crate) output_file_name: String,
    pub(crate) image_size: Size,
    pub(crate) image_center: Point,
    pub(crate) font: FontSpec,
    pub(crate) color_scheme: ColorScheme,
    pub(crate) spiral: Spiral,
    pub(crate) image_format: ImageFormat,
    pub(crate) input_format: InputFormat,
    pub(crate) source: SourceReader,
    pub(crate) transforms: Vec<Transform>,
    pub(crate) pipeline: WordPipeline,
}

impl Configuration {
    /// Directory the image is written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output file name without extension.
    #[must_use]
    pub fn output_file_name(&self) -> &str {
        &self.output_file_name
    }

    /// Full path of the image file, extension included.
    #[must_use]
    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(format!(
            "{}.{}",
            self.output_file_name,
            self.image_format.extension()
        ))
    }

    /// Image dimensions.
    #[must_use]
    pub const fn image_size(&self) -> Size {
        self.image_size
    }

    /// Image center.
    #[must_use]
    pub const fn image_center(&self) -> Point {
        self.image_center
    }

    /// Tag font.
    #[must_use]
    pub const fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Color scheme.
    #[must_use]
    pub const fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    /// Layout spiral.
    #[must_use]
    pub const fn spiral(&self) -> Spiral {
        self.spiral
    }

    /// Output image format.
    #[must_use]
    pub const fn image_format(&self) -> ImageFormat {
        self.image_format
    }

    /// Input file format.
    #[must_use]
    pub const fn input_format(&self) -> InputFormat {
        self.input_format
    }

    /// Where words were read from.
    #[must_use]
    pub const fn source(&self) -> &SourceReader {
        &self.source
    }

    /// Ordered transform chain, exclusion last.
    #[must_use]
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// The word pipeline built from the source and transforms.
    #[must_use]
    pub const fn pipeline(&self) -> &WordPipeline {
        &self.pipeline
    }

    /// Shortcut for the pipeline's frequency map.
    #[must_use]
    pub const fn frequencies(&self) -> &WordFrequencies {
        self.pipeline.frequencies()
    }
}
