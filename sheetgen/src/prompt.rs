//! Interactive prompt sequence

use anyhow::{Context, Result};
use colored::Colorize;
use sheetgen_core::SchemaKind;
use sheetgen_core::config::PromptDefaults;
use sheetgen_core::validation::{self, ValidationError};
use std::io::{BufRead, Write};

/// Line-based prompts over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    fn ask_line(&mut self, question: &str, default: &str) -> Result<String> {
        write!(
            self.output,
            "{} {} {} ",
            "?".green().bold(),
            question.bold(),
            format!("({})", default).bright_black()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            anyhow::bail!("Input closed before '{}' was answered", question);
        }
        let answer = line.trim();
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        })
    }

    /// Ask until `parse` accepts the answer. An empty answer takes `default`.
    pub fn input<T, F>(&mut self, question: &str, default: &str, parse: F) -> Result<T>
    where
        F: Fn(&str) -> Result<T, ValidationError>,
    {
        loop {
            let answer = self.ask_line(question, default)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{}", format!(">> {}", e).red())?,
            }
        }
    }

    /// Numbered menu. Returns the index of the chosen entry.
    pub fn select(&mut self, question: &str, choices: &[String]) -> Result<usize> {
        if choices.is_empty() {
            anyhow::bail!("No choices available for '{}'", question);
        }

        writeln!(self.output, "{} {}", "?".green().bold(), question.bold())?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, choice)?;
        }

        let count = choices.len();
        loop {
            let answer = self.ask_line(&format!("Enter a number [1-{}]", count), "1")?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return Ok(n - 1),
                _ => writeln!(
                    self.output,
                    "{}",
                    format!(">> Please enter a number between 1 and {}.", count).red()
                )?,
            }
        }
    }
}

/// Answers given up front as command line flags
#[derive(Debug, Default, Clone)]
pub struct Preset {
    pub folder: Option<String>,
    pub target_mb: Option<String>,
    pub max_rows: Option<String>,
    pub schema: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Answers {
    pub folder: String,
    pub target_mb: f64,
    pub max_rows: u64,
    pub schema: SchemaKind,
    /// Includes the `.xlsx` extension
    pub file_name: String,
}

/// Run the prompt sequence, skipping every question the preset answers
pub fn collect_answers<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    preset: &Preset,
    folders: &[String],
    defaults: &PromptDefaults,
    default_file_name: &str,
) -> Result<Answers> {
    let folder = match &preset.folder {
        Some(folder) => {
            if !folders.contains(folder) {
                anyhow::bail!(
                    "Folder '{}' not found (available: {})",
                    folder,
                    folders.join(", ")
                );
            }
            folder.clone()
        }
        None => {
            let labels: Vec<String> = folders.iter().map(|f| format!("{}/ folder", f)).collect();
            let choice = prompter.select("Select the destination folder:", &labels)?;
            folders[choice].clone()
        }
    };

    let target_mb = match &preset.target_mb {
        Some(value) => validation::parse_target_mb(value)
            .with_context(|| format!("Invalid target size '{}'", value))?,
        None => prompter.input(
            "Target file size (MB):",
            &defaults.target_mb.to_string(),
            validation::parse_target_mb,
        )?,
    };

    let max_rows = match &preset.max_rows {
        Some(value) => validation::parse_max_rows(value)
            .with_context(|| format!("Invalid row cap '{}'", value))?,
        None => prompter.input(
            "Maximum number of rows:",
            &defaults.max_rows.to_string(),
            validation::parse_max_rows,
        )?,
    };

    let schema = match &preset.schema {
        Some(value) => value.parse::<SchemaKind>()?,
        None => {
            let labels: Vec<String> = SchemaKind::ALL
                .iter()
                .map(|s| s.label().to_string())
                .collect();
            let choice = prompter.select("Select the data type to generate:", &labels)?;
            SchemaKind::ALL[choice]
        }
    };

    let file_name = match &preset.file_name {
        Some(value) => validation::parse_file_name(value)
            .with_context(|| format!("Invalid file name '{}'", value))?,
        None => prompter.input(
            "File name (.xlsx is added automatically):",
            default_file_name,
            validation::parse_file_name,
        )?,
    };

    Ok(Answers {
        folder,
        target_mb,
        max_rows,
        schema,
        file_name,
    })
}
