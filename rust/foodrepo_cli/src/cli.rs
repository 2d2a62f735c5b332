use clap::{
    Parser,
    Subcommand,
};
use foodrepo::{
    DetectionMode,
    HttpPeakClient,
    MergeWidth,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Increase logging verbosity (can be repeated: -v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease logging verbosity (can be repeated: -q for warn, -qq for error)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the sample catalog.
    ListSamples(ListSamplesArgs),
    /// Fetch peak lists and write binned profiles.
    Profile(ProfileArgs),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum SerializationFormat {
    Json,
    #[default]
    PrettyJson,
    Ndjson,
}

#[derive(Parser, Debug, Clone)]
pub struct ListSamplesArgs {
    /// The path to the sample list csv.
    #[arg(short, long, default_value = "sample_list.csv")]
    pub catalog: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct ProfileArgs {
    /// The path to the sample list csv.
    #[arg(short, long, default_value = "sample_list.csv")]
    pub catalog: PathBuf,

    /// Sample ids to profile (comma separated or repeated).
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub ids: Vec<String>,

    /// Detection mode of the peak lists.
    #[arg(short, long, default_value_t, value_enum)]
    pub mode: DetectionMode,

    /// Retention-time merge width in minutes (0.05 - 1.0, step 0.05).
    #[arg(short = 'w', long, default_value_t = MergeWidth::default().get())]
    pub merge_width: f64,

    /// Base url of the peak list API.
    #[arg(long, default_value = HttpPeakClient::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// The path to the output file; stdout if omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// The format to use for the output
    #[arg(short, long, default_value_t, value_enum)]
    pub format: SerializationFormat,
}
