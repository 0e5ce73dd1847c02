//! sheetgen-core: synthetic Excel file generation
//!
//! Generates benchmark spreadsheets of a chosen record schema until a target
//! file size or a row cap is reached, then reports what was written.

pub mod batch;
pub mod config;
pub mod estimate;
pub mod folders;
pub mod generator;
pub mod reader;
pub mod report;
pub mod schema;
pub mod validation;
pub mod writer;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

pub use batch::{GenerationOutcome, GenerationPlan, Progress, RowSink, StopReason};
pub use config::{ConfigError, GeneratorConfig};
pub use generator::RowGenerator;
pub use report::FileReport;
pub use schema::{FieldValue, Record, SchemaKind};
pub use validation::ValidationError;

/// Everything needed for one generated file
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Subfolder of the resources root
    pub folder: String,
    /// File name including the `.xlsx` extension
    pub file_name: String,
    pub target_mb: f64,
    pub max_rows: u64,
    pub schema: SchemaKind,
    /// Seed for reproducible random fields
    pub seed: Option<u64>,
}

/// Milestones reported while a file is produced
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    Progress(Progress),
    Generated(GenerationOutcome),
    Saving(PathBuf),
}

/// Main generator interface
pub struct SheetGenerator {
    config: GeneratorConfig,
}

impl SheetGenerator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a new generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Folders under the resources root that can receive a file
    pub fn available_folders(&self) -> Vec<String> {
        folders::available_folders(&self.config.resources_root)
    }

    pub fn output_path(&self, folder: &str, file_name: &str) -> PathBuf {
        self.config.resources_root.join(folder).join(file_name)
    }

    /// Generate, save and stat one file
    pub fn generate<F>(&self, request: &GenerationRequest, mut on_event: F) -> Result<FileReport>
    where
        F: FnMut(GenerationEvent),
    {
        let header_fill = self.config.header_fill_rgb()?;
        let columns = writer::columns_for(request.schema, self.config.column_width);
        let mut sink = writer::XlsxSink::new(&self.config.sheet_name, &columns, header_fill)?;

        let max_rows = if request.max_rows > writer::MAX_DATA_ROWS {
            info!(
                requested = request.max_rows,
                "Row cap exceeds worksheet capacity, capping at {}",
                writer::MAX_DATA_ROWS
            );
            writer::MAX_DATA_ROWS
        } else {
            request.max_rows
        };

        let plan = GenerationPlan::new(request.target_mb, max_rows, self.config.batch_size);
        info!(
            schema = %request.schema,
            target_bytes = plan.target_bytes,
            max_rows = plan.max_rows,
            "Generating rows"
        );

        let mut row_generator = RowGenerator::new(request.schema, request.seed);
        let outcome = batch::generate_rows(&plan, &mut row_generator, &mut sink, |progress| {
            on_event(GenerationEvent::Progress(progress))
        })
        .context("Failed to generate rows")?;
        on_event(GenerationEvent::Generated(outcome));

        let path = self.output_path(&request.folder, &request.file_name);
        on_event(GenerationEvent::Saving(path.clone()));
        sink.save(&path)?;
        info!(path = %path.display(), rows = outcome.rows, "Saved workbook");

        FileReport::from_output(&path, request.schema, &outcome)
    }
}

impl Default for SheetGenerator {
    fn default() -> Self {
        Self::new()
    }
}
