use foodrepo::{
    BatchReport,
    CandidateRow,
    HttpPeakClient,
    MergeWidth,
    PeakSource,
    SampleCatalog,
    SessionState,
    run_batch_with,
};
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use serde::Serialize;
use std::fs::File;
use std::io::{
    self,
    BufWriter,
    Write,
};
use tracing::{
    info,
    instrument,
    warn,
};

use crate::cli::{
    ListSamplesArgs,
    ProfileArgs,
    SerializationFormat,
};
use crate::error::CliError;

/// Main function for the 'list-samples' subcommand.
pub fn main_list_samples(args: ListSamplesArgs) -> Result<(), CliError> {
    let catalog = SampleCatalog::load(&args.catalog)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "id\tdisplayName\tcategory")?;
    for sample in catalog.samples() {
        writeln!(
            out,
            "{}\t{}\t{}",
            sample.id, sample.display_name, sample.category
        )?;
    }
    Ok(())
}

/// Main function for the 'profile' subcommand.
#[instrument(skip_all)]
pub fn main_profile(args: ProfileArgs) -> Result<(), CliError> {
    let merge_width = MergeWidth::try_new(args.merge_width)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let catalog = SampleCatalog::load(&args.catalog)?;

    let mut session = SessionState::new(args.mode);
    session.commit_selection(args.ids.iter().map(|id| CandidateRow::new(id.trim(), true)));

    let client = HttpPeakClient::new(args.base_url);
    info!(
        "Profiling {} samples ({} mode, merge width {}) from {}",
        session.selection().len(),
        session.mode(),
        merge_width.get(),
        client.base_url()
    );
    let report = profile_with_progress(&client, &catalog, &session, merge_width)?;

    for warning in report.warnings.iter() {
        eprintln!("warning: {}", warning);
    }

    match args.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(&path)?);
            write_profiles(writer, &report, args.format)?;
            info!(
                "Wrote {} profiles to {}",
                report.profiles.len(),
                path.display()
            );
        }
        None => write_profiles(io::stdout().lock(), &report, args.format)?,
    }
    Ok(())
}

/// Runs the batch pass with a progress bar over the selected samples.
fn profile_with_progress<S: PeakSource + ?Sized>(
    source: &S,
    catalog: &SampleCatalog,
    session: &SessionState,
    merge_width: MergeWidth,
) -> Result<BatchReport, CliError> {
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
    )
    .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let pb = ProgressBar::new(session.selection().len() as u64).with_style(style);

    let report = run_batch_with(
        source,
        catalog,
        session.selection(),
        session.mode(),
        merge_width.get(),
        |sample_id| {
            pb.set_message(sample_id.to_string());
            pb.inc(1);
        },
    );
    pb.finish_and_clear();
    let report = report?;

    if !report.warnings.is_empty() {
        warn!("{} samples reported warnings", report.warnings.len());
    }
    Ok(report)
}

fn write_profiles<W: Write>(
    writer: W,
    report: &BatchReport,
    format: SerializationFormat,
) -> Result<(), CliError> {
    let mut serializer = JsonStreamSerializer::new(writer, format);
    for profile in report.profiles.iter() {
        serializer.serialize(profile)?;
    }
    serializer.finish()?;
    Ok(())
}

pub struct JsonStreamSerializer<W: Write> {
    writer: W,
    format: SerializationFormat,
    is_first: bool,
}

impl<W: Write> JsonStreamSerializer<W> {
    pub fn new(writer: W, format: SerializationFormat) -> Self {
        Self {
            writer,
            format,
            is_first: true,
        }
    }

    pub fn serialize<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        match self.format {
            SerializationFormat::Ndjson => {
                serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
                self.writer.write_all(b"\n")?;
            }
            SerializationFormat::Json | SerializationFormat::PrettyJson => {
                if self.is_first {
                    self.writer.write_all(b"[")?;
                    self.is_first = false;
                } else {
                    self.writer.write_all(b",")?;
                }

                if matches!(self.format, SerializationFormat::PrettyJson) {
                    serde_json::to_writer_pretty(&mut self.writer, item)
                } else {
                    serde_json::to_writer(&mut self.writer, item)
                }
                .map_err(io::Error::other)?;
            }
        }
        Ok(())
    }

    /// Closes the JSON array, if any.
    pub fn finish(mut self) -> io::Result<()> {
        match self.format {
            SerializationFormat::Json | SerializationFormat::PrettyJson => {
                if self.is_first {
                    self.writer.write_all(b"[]")?;
                } else {
                    self.writer.write_all(b"]")?;
                }
            }
            SerializationFormat::Ndjson => {}
        }
        self.writer.flush()
    }
}
