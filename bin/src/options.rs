//! Command line options

use accelerators::SplitMethod;
use clap::{Parser, ValueEnum};

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// BVH split method names accepted on the command line.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SplitArg {
    Sah,
    Middle,
    EqualCounts,
}

impl From<SplitArg> for SplitMethod {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Sah => SplitMethod::SAH,
            SplitArg::Middle => SplitMethod::Middle,
            SplitArg::EqualCounts => SplitMethod::EqualCounts,
        }
    }
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Path traces a small demo scene.", long_about = None)]
pub struct Options {
    /// Image width.
    #[arg(long, value_name = "NUM", default_value_t = 320, help = "Image width in pixels.")]
    pub width: usize,

    /// Image height.
    #[arg(long, value_name = "NUM", default_value_t = 240, help = "Image height in pixels.")]
    pub height: usize,

    /// Samples per pixel.
    #[arg(
        long = "spp",
        short = 's',
        value_name = "NUM",
        default_value_t = 16,
        help = "Number of samples taken per pixel."
    )]
    pub samples_per_pixel: usize,

    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 0,
        help = "Use specified number of threads for rendering; 0 uses all logical CPUs."
    )]
    n_threads: usize,

    /// Maximum path length.
    #[arg(
        long = "maxdepth",
        short = 'd',
        value_name = "NUM",
        default_value_t = 8,
        help = "Maximum number of bounces along a path."
    )]
    pub max_depth: usize,

    /// Tile size.
    #[arg(
        long = "tilesize",
        short = 'p',
        value_name = "NUM",
        default_value_t = 16,
        help = "Size in pixels of square tiles rendered per thread."
    )]
    pub tile_size: usize,

    /// Path to the image file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "render.png",
        help = "Write the final image to the given filename."
    )]
    pub image_file: String,

    /// Trace primary rays as 8-ray packets.
    #[arg(long, help = "Trace primary rays in packets of 8.")]
    pub packets: bool,

    /// Random seed.
    #[arg(long, value_name = "NUM", default_value_t = 0, help = "Seed for the random number generators.")]
    pub seed: u64,

    /// BVH split method.
    #[arg(long, value_enum, default_value_t = SplitArg::Sah, help = "BVH split method.")]
    pub split: SplitArg,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress the progress bar.")]
    pub quiet: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = std::thread::available_parallelism().map_or(1, |n| n.get());
        match self.n_threads {
            0 => max_threads,
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Returns an error if any option is out of range.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("Invalid resolution {}x{}.", self.width, self.height));
        }
        if self.samples_per_pixel == 0 {
            return Err("Samples per pixel must be positive.".to_string());
        }
        if self.tile_size == 0 {
            return Err("Tile size must be positive.".to_string());
        }
        if self.max_depth == 0 {
            return Err("Maximum depth must be positive.".to_string());
        }
        Ok(())
    }
}
