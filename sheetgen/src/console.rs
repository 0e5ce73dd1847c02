//! Console output: status lines, progress and the final report

use anyhow::Result;
use colored::*;
use sheetgen_core::{FileReport, Progress};
use std::fmt::Display;
use std::io::{self, Write};

/// Emoji-prefixed status lines.
///
/// A quiet console only prints errors, which keeps stdout clean for the JSON
/// report.
pub struct Console {
    quiet: bool,
}

impl Console {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn header(&self, msg: impl Display) {
        if !self.quiet {
            println!("{}", format!("🚀 {}", msg).cyan().bold());
        }
    }

    pub fn info(&self, msg: impl Display) {
        if !self.quiet {
            println!("{}", format!("ℹ {}", msg).blue());
        }
    }

    pub fn success(&self, msg: impl Display) {
        if !self.quiet {
            println!("{}", format!("✅ {}", msg).green());
        }
    }

    pub fn warn(&self, msg: impl Display) {
        if !self.quiet {
            println!("{}", format!("⚠️  {}", msg).yellow());
        }
    }

    pub fn error(&self, msg: impl Display) {
        eprintln!("{}", format!("❌ {}", msg).red());
    }

    pub fn blank(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Rewrite the progress line in place
    pub fn progress(&self, progress: &Progress) {
        if self.quiet {
            return;
        }
        let line = format!(
            "Progress: {:.1}% ({} / {} rows)",
            progress.percent(),
            group_thousands(progress.rows),
            group_thousands(progress.projected_rows)
        );
        print!("\r{}", line.blue());
        let _ = io::stdout().flush();
    }
}

/// Print the report in human-readable format
pub fn print_human(console: &Console, report: &FileReport) {
    console.success("File created!");
    console.info(format!("Location: {}", report.path.display()));
    console.info(format!("Actual size: {}", report.size));
    console.info(format!("Total rows: {}", group_thousands(report.rows)));
    console.info(format!("Total columns: {}", report.columns));
}

/// Print the report in JSON format
pub fn print_json(report: &FileReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// `1234567` as `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(100_000), "100,000");
        assert_eq!(group_thousands(10_000_000), "10,000,000");
    }
}
