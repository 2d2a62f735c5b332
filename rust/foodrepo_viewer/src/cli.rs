use clap::Parser;
use foodrepo::{
    DetectionMode,
    HttpPeakClient,
    MergeWidth,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (can be repeated: -v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease logging verbosity (can be repeated: -q for warn, -qq for error)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long,
        value_name = "FILE",
        help = "Path to the sample list (.csv)",
        short = 'c',
        default_value = "sample_list.csv"
    )]
    pub catalog: PathBuf,

    #[arg(
        long,
        value_name = "URL",
        help = "Base url of the peak list API",
        default_value = HttpPeakClient::DEFAULT_BASE_URL
    )]
    pub base_url: String,

    #[arg(
        long,
        short = 'w',
        help = "Initial retention-time merge width in minutes (0.05 - 1.0)",
        default_value_t = MergeWidth::default()
    )]
    pub merge_width: MergeWidth,

    #[arg(long, short = 'm', help = "Initial detection mode", default_value_t, value_enum)]
    pub mode: DetectionMode,

    #[arg(
        long,
        value_name = "FILE",
        help = "Append every handled UI command as a JSON line to this file"
    )]
    pub session_log: Option<PathBuf>,
}

impl Cli {
    pub fn default_log_level(&self) -> &'static str {
        match self.verbose as i16 - self.quiet as i16 {
            i16::MIN..=-2 => "error",
            -1 => "warn",
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
