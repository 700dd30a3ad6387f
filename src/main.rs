use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tagcloud::{
    ConfigResolver, Configuration, HandlerRegistry, RawOptions, StopWords, SystemFontCatalog,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "tagcloud",
    version,
    author,
    about = "Count words for a tag cloud",
    long_about = "Validate tag cloud options and count the words of a text.\n\n\
    Words come either from a text file (--input) or from an explicit list (--words), \
    never both. Each word passes through the requested modifications in order, then \
    stop words and excluded words are dropped.\n\n\
    USAGE EXAMPLES:\n  \
      # Count the words of a file\n  \
      tagcloud --input speech.txt -m \"strip-punctuation normalize\"\n\n  \
      # Use an explicit word list and a cyberpunk palette\n  \
      tagcloud --words \"rust cargo rust\" -c 2 -r sqr\n\n  \
      # Dump the frequency table as JSON\n  \
      tagcloud --input speech.txt --json",
    disable_help_flag = true
)]
struct Cli {
    /// Output directory for the image
    #[arg(
        short,
        long,
        default_value = ".",
        value_name = "PATH",
        env = "TAGCLOUD_OUTPUT_DIR"
    )]
    output: PathBuf,

    /// Output file name without extension
    #[arg(long, default_value = "tagcloud")]
    name: String,

    /// Image width in pixels
    #[arg(short, long, default_value_t = 1000, allow_negative_numbers = true)]
    width: i64,

    /// Image height in pixels
    #[arg(short, long, default_value_t = 1000, allow_negative_numbers = true)]
    height: i64,

    /// Tag font family
    #[arg(short = 'n', long, default_value = "Arial", env = "TAGCLOUD_FONT")]
    font: String,

    /// Tag font size
    #[arg(short = 's', long, default_value_t = 20, allow_negative_numbers = true)]
    font_size: i32,

    /// Color scheme: 0 black/white, 1 camouflage, 2 cyberpunk
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    color: i32,

    /// Spiral: log, sqr or rnd
    #[arg(short = 'r', long, default_value = "log")]
    spiral: String,

    /// Image format: png, bmp or jpeg
    #[arg(short = 'i', long, default_value = "png")]
    image_format: String,

    /// Input file format
    #[arg(short = 'f', long, default_value = "txt")]
    format: String,

    /// Input text file
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Explicit words, space separated
    #[arg(long, value_delimiter = ' ', num_args = 1..)]
    words: Vec<String>,

    /// Word modifications to apply in order, space separated
    #[arg(short, long, value_delimiter = ' ', num_args = 1..)]
    modifications: Vec<String>,

    /// Additional words to drop, space separated
    #[arg(short, long, value_delimiter = ' ', num_args = 1..)]
    exclude: Vec<String>,

    /// Number of top words to print
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Print the frequency table as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

impl From<Cli> for RawOptions {
    fn from(cli: Cli) -> Self {
        let mut builder = Self::builder()
            .output_dir(cli.output)
            .output_file_name(cli.name)
            .size(cli.width, cli.height)
            .font_name(cli.font)
            .font_size(cli.font_size)
            .color_scheme(cli.color)
            .spiral(cli.spiral)
            .image_format(cli.image_format)
            .input_format(cli.format)
            .tags(cli.words)
            .modifications(cli.modifications)
            .excluded_words(cli.exclude);

        if let Some(input) = cli.input {
            builder = builder.input_file(input);
        }

        builder.build()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = parse_cli()?;

    setup_tracing(cli.verbose)?;

    let top = cli.top;
    let json = cli.json;

    // Stop words and fonts are loaded once per run.
    let registry = HandlerRegistry::new(StopWords::builtin());
    let resolver = ConfigResolver::new(registry, SystemFontCatalog::load());

    let config = resolver
        .resolve(RawOptions::from(cli))
        .context("Failed to resolve configuration")?;

    if json {
        let output = serde_json::to_string_pretty(config.frequencies())
            .context("Failed to serialize word frequencies")?;
        println!("{output}");
    } else {
        print_summary(&config, top);
    }

    Ok(())
}

/// Parses arguments. Help and version requests are not failures.
fn parse_cli() -> anyhow::Result<Cli> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            err.print().context("Failed to print usage")?;
            Err(tagcloud::Error::parse(err.kind().to_string()).into())
        }
    }
}

fn print_summary(config: &Configuration, top: usize) {
    let stats = config.pipeline().stats();

    println!("Output file:   {}", config.output_file().display());
    println!(
        "Image:         {}x{} {:?}, {:?} spiral, {:?} colors",
        config.image_size().width,
        config.image_size().height,
        config.image_format(),
        config.spiral().kind,
        config.color_scheme()
    );
    println!(
        "Font:          {} {}",
        config.font().name,
        config.font().size
    );
    println!(
        "Words:         {} read, {} dropped, {} unique",
        stats.total_words, stats.dropped_words, stats.unique_words
    );

    let words = config.frequencies().most_frequent(top);
    if words.is_empty() {
        return;
    }

    println!();
    let width = words.iter().map(|(word, _)| word.chars().count()).max().unwrap_or(0);
    for (word, count) in words {
        println!("  {word:<width$}  {count:>6}");
    }
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("tagcloud=info"),
        1 => EnvFilter::new("tagcloud=debug"),
        _ => EnvFilter::new("tagcloud=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
