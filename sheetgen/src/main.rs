use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use sheetgen_core::config::DEFAULT_CONFIG_FILE;
use sheetgen_core::writer::MAX_DATA_ROWS;
use sheetgen_core::{
    GenerationEvent, GenerationRequest, GeneratorConfig, SheetGenerator, StopReason, reader,
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod console;
mod prompt;

use console::{Console, group_thousands};
use prompt::{Preset, Prompter};

#[derive(Parser)]
#[command(name = "sheetgen")]
#[command(about = "Generate synthetic Excel files for benchmarks", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory whose subfolders can receive the generated file
    #[arg(short, long, value_name = "DIR")]
    resources_dir: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Destination folder, skips the folder prompt
    #[arg(long, value_name = "NAME")]
    folder: Option<String>,

    /// Target file size in MB, skips the size prompt
    #[arg(long, value_name = "MB")]
    target_mb: Option<String>,

    /// Maximum number of data rows, skips the row prompt
    #[arg(long, value_name = "ROWS")]
    max_rows: Option<String>,

    /// Record schema (person, sale, transaction), skips the schema prompt
    #[arg(long, value_name = "KIND")]
    schema: Option<String>,

    /// Output file name, skips the file name prompt
    #[arg(long, value_name = "NAME")]
    file_name: Option<String>,

    /// Seed for reproducible random fields
    #[arg(long)]
    seed: Option<u64>,

    /// Output format of the final report
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Re-open the written file and check rows and header styling
    #[arg(long)]
    verify: bool,

    /// Increase diagnostic logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let console = Console::new(cli.format == OutputFormat::Json);
    match run(&cli, &console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console.error(format!("Error: {:#}", e));
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = if let Some(config_path) = &cli.config {
        GeneratorConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_config_path.exists() {
            GeneratorConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            GeneratorConfig::default()
        }
    };

    if let Some(dir) = &cli.resources_dir {
        config.resources_root = dir.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run(cli: &Cli, console: &Console) -> Result<()> {
    let config = load_config(cli)?;
    let generator = SheetGenerator::with_config(config);

    if !console.is_quiet() && io::stdout().is_terminal() {
        // Clear the screen before the prompt sequence
        print!("\x1B[2J\x1B[1;1H");
    }
    console.header("Excel benchmark test file generator");
    console.blank();

    let folders = generator.available_folders();
    if folders.is_empty() {
        anyhow::bail!(
            "No folders available in {}",
            generator.config().resources_root.display()
        );
    }
    console.info(format!("Available folders: {}", folders.join(", ")));
    console.blank();

    let preset = Preset {
        folder: cli.folder.clone(),
        target_mb: cli.target_mb.clone(),
        max_rows: cli.max_rows.clone(),
        schema: cli.schema.clone(),
        file_name: cli.file_name.clone(),
    };
    let default_file_name = format!("test-data-{}", chrono::Utc::now().timestamp_millis());

    // Prompts go to stderr when stdout carries the JSON report
    let answers = if console.is_quiet() {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stderr());
        prompt::collect_answers(
            &mut prompter,
            &preset,
            &folders,
            &generator.config().defaults,
            &default_file_name,
        )?
    } else {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
        prompt::collect_answers(
            &mut prompter,
            &preset,
            &folders,
            &generator.config().defaults,
            &default_file_name,
        )?
    };

    let request = GenerationRequest {
        folder: answers.folder,
        file_name: answers.file_name,
        target_mb: answers.target_mb,
        max_rows: answers.max_rows,
        schema: answers.schema,
        seed: cli.seed,
    };

    console.blank();
    console.header("Starting Excel file generation");
    console.info(format!("Target size: {}MB", request.target_mb));
    console.info(format!("Max rows: {}", group_thousands(request.max_rows)));
    console.info(format!("Data type: {}", request.schema.label()));
    if request.max_rows > MAX_DATA_ROWS {
        console.warn(format!(
            "A worksheet holds at most {} data rows; generation stops there",
            group_thousands(MAX_DATA_ROWS)
        ));
    }
    console.info("Generating data...");

    let report = generator
        .generate(&request, |event| match event {
            GenerationEvent::Progress(progress) => console.progress(&progress),
            GenerationEvent::Generated(outcome) => {
                console.blank();
                if outcome.stop_reason == StopReason::TargetSize {
                    console.info(format!(
                        "Target size {}MB reached. Generation complete.",
                        request.target_mb
                    ));
                }
                console.info(format!("Generated {} rows", group_thousands(outcome.rows)));
            }
            GenerationEvent::Saving(_) => console.info("Saving file..."),
        })
        .with_context(|| format!("Failed to generate {}", request.file_name))?;

    if cli.verify {
        let sheet = reader::read_back(&report.path)?;
        if sheet.data_rows as u64 != report.rows || sheet.columns != report.columns {
            anyhow::bail!(
                "Verification failed: expected {} rows x {} columns, found {} x {}",
                report.rows,
                report.columns,
                sheet.data_rows,
                sheet.columns
            );
        }
        if !sheet.header_style.is_highlighted() {
            anyhow::bail!("Verification failed: header row is not bold with a solid fill");
        }
        console.success(format!(
            "Verified {} rows and {} columns in '{}'",
            group_thousands(sheet.data_rows as u64),
            sheet.columns,
            sheet.sheet_name
        ));
    }

    match cli.format {
        OutputFormat::Human => console::print_human(console, &report),
        OutputFormat::Json => console::print_json(&report)?,
    }

    console.blank();
    console.success("🎉 Excel file generation complete!");
    console.info("You can now run the benchmark in the processing application.");

    Ok(())
}
