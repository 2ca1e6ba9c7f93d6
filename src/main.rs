use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mmwave_capture::aggregate::average_frames;
use mmwave_capture::converter::TableConverter;
use mmwave_capture::export::{self, PointJson, TableFormat};
use mmwave_capture::summary::CaptureSummary;
use mmwave_capture::{Capture, CaptureParser, DecoderConfig, FrameMode, PersonLayout};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Decoder for mmWave radar serial captures
#[derive(Parser)]
#[command(name = "mmwave-capture")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a point-cloud capture into per-frame point records
    Points {
        /// Input capture file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (.json, .csv or .parquet)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Output format (auto-detected from extension if not specified)
        #[arg(short, long, value_enum)]
        format: Option<PointsFormat>,

        /// Emit decoded coordinates only instead of raw hex fields (JSON)
        #[arg(long)]
        decoded: bool,
    },

    /// Compute per-frame average positions of a point-cloud capture
    Average {
        /// Input capture file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (.csv, .parquet or .json)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Points with any axis outside [-LIMIT, LIMIT] are ignored
        #[arg(short, long, default_value_t = 10.0)]
        limit: f64,
    },

    /// Decode a person-tracking capture into a fixed-width table
    Persons {
        /// Input capture file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (.csv or .parquet)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Capture header layout
        #[arg(short, long, value_enum, default_value = "d3")]
        layout: Layout,

        /// Maximum persons per frame in the table
        #[arg(short, long, default_value_t = 5)]
        max_persons: usize,
    },

    /// Show general information about a capture
    Info {
        /// Input capture file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Capture mode
        #[arg(short, long, value_enum, default_value = "points")]
        mode: Mode,

        /// Header layout for person captures
        #[arg(short, long, value_enum, default_value = "d3")]
        layout: Layout,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PointsFormat {
    Json,
    Csv,
    Parquet,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    /// Lines start at the TLV2 block
    D2,
    /// Full frame header
    D3,
}

impl From<Layout> for PersonLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::D2 => PersonLayout::Debug2,
            Layout::D3 => PersonLayout::Debug3,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Points,
    Persons,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Points {
            input,
            output,
            format,
            decoded,
        } => points_command(input, output, format, decoded)?,

        Commands::Average {
            input,
            output,
            limit,
        } => average_command(input, output, limit)?,

        Commands::Persons {
            input,
            output,
            layout,
            max_persons,
        } => persons_command(input, output, layout, max_persons)?,

        Commands::Info {
            input,
            mode,
            layout,
        } => info_command(input, mode, layout)?,
    }

    Ok(())
}

fn decode(input: &Path, parser: &CaptureParser) -> Result<Capture> {
    println!("Decoding {}...", input.display());
    let start = Instant::now();
    let capture = parser
        .from_file(input)
        .with_context(|| format!("Failed to read capture file: {}", input.display()))?;

    println!(
        "Decoded {} frames, skipped {} lines ({:.3}s)",
        capture.frames.len(),
        capture.report.skipped.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(capture)
}

fn create_output(output: &Path) -> Result<BufWriter<File>> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    Ok(BufWriter::new(file))
}

fn points_command(
    input: PathBuf,
    output: PathBuf,
    format: Option<PointsFormat>,
    decoded: bool,
) -> Result<()> {
    let format = match format {
        Some(f) => f,
        None => match output.extension().and_then(|s| s.to_str()) {
            Some("json") => PointsFormat::Json,
            Some("csv") => PointsFormat::Csv,
            Some("parquet") => PointsFormat::Parquet,
            _ => anyhow::bail!(
                "Cannot determine output format from extension. Use --format to specify."
            ),
        },
    };

    let parser = CaptureParser::new(DecoderConfig::new(FrameMode::PointCloud));
    let capture = decode(&input, &parser)?;

    match format {
        PointsFormat::Json => {
            let shape = if decoded {
                PointJson::Decoded
            } else {
                PointJson::Raw
            };
            export::write_points_json(&capture.frames, shape, create_output(&output)?)
                .with_context(|| format!("Failed to write JSON: {}", output.display()))?;
        }
        PointsFormat::Csv | PointsFormat::Parquet => {
            let table_format = match format {
                PointsFormat::Parquet => TableFormat::Parquet,
                _ => TableFormat::Csv,
            };
            let mut df = TableConverter::points(&capture.frames)?;
            export::write_table(&mut df, &output, table_format)
                .with_context(|| format!("Failed to write table: {}", output.display()))?;
        }
    }

    println!("Saved to {}", output.display());
    Ok(())
}

fn average_command(input: PathBuf, output: PathBuf, limit: f64) -> Result<()> {
    let parser = CaptureParser::new(
        DecoderConfig::new(FrameMode::PointCloud).with_coordinate_limit(limit),
    );
    let capture = decode(&input, &parser)?;
    let averages = average_frames(&capture.frames, parser.config().coordinate_limit);

    export::write_averages(&averages, &output)
        .with_context(|| format!("Failed to write averages: {}", output.display()))?;

    println!("Saved {} averages to {}", averages.len(), output.display());
    Ok(())
}

fn persons_command(
    input: PathBuf,
    output: PathBuf,
    layout: Layout,
    max_persons: usize,
) -> Result<()> {
    let config = DecoderConfig::new(FrameMode::PersonTracking)
        .with_person_layout(layout.into())
        .with_max_persons(max_persons);
    let capture = decode(&input, &CaptureParser::new(config))?;

    let mut df = TableConverter::persons(&capture.frames, max_persons)?;
    println!("Table has {} rows and {} columns", df.height(), df.width());

    export::write_table_auto(&mut df, &output)
        .with_context(|| format!("Failed to write table: {}", output.display()))?;

    println!("Saved to {}", output.display());
    Ok(())
}

fn info_command(input: PathBuf, mode: Mode, layout: Layout) -> Result<()> {
    let config = match mode {
        Mode::Points => DecoderConfig::new(FrameMode::PointCloud),
        Mode::Persons => {
            DecoderConfig::new(FrameMode::PersonTracking).with_person_layout(layout.into())
        }
    };

    let metadata = std::fs::metadata(&input)
        .with_context(|| format!("Failed to read capture file: {}", input.display()))?;
    let capture = decode(&input, &CaptureParser::new(config))?;
    let summary = CaptureSummary::from_capture(&capture);

    let record_name = match mode {
        Mode::Points => "Points",
        Mode::Persons => "Persons",
    };

    println!("\nFile Information:");
    println!("  Path:           {}", input.display());
    println!(
        "  Size:           {} bytes ({:.2} MB)",
        metadata.len(),
        metadata.len() as f64 / 1_048_576.0
    );
    println!("\nCapture Information:");
    println!("  Lines:          {}", summary.lines_read);
    println!("  Frames:         {}", summary.frames);
    println!("  Skipped:        {}", summary.skipped);
    if let (Some(first), Some(last)) = (&summary.first_timestamp, &summary.last_timestamp) {
        println!("  Time range:     {} to {}", first, last);
    }
    println!("  {:15} {}", format!("{}:", record_name), summary.total_records);
    if let (Some(min), Some(max)) = (summary.min_records, summary.max_records) {
        println!("  Per frame:      {} to {}", min, max);
    }
    println!("  Raw fields:     {} records", summary.records_with_raw_fields);
    if let Mode::Points = mode {
        println!("  Length mismatch: {} frames", summary.length_mismatches);
    }

    if !capture.report.skipped.is_empty() {
        println!("\nSkipped lines:");
        for skipped in capture.report.skipped.iter().take(10) {
            println!("  line {:6} {}", skipped.line_number, skipped.reason);
        }
        if capture.report.skipped.len() > 10 {
            println!("  ... and {} more", capture.report.skipped.len() - 10);
        }
    }

    Ok(())
}
