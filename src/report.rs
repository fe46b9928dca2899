//! Human-readable run output.
//!
//! Everything here goes to one writer (stdout for the CLI). Color is only
//! applied when the caller says the writer is a terminal.

use crate::app::Summary;
use crate::config::Config;
use crate::rewrite::FileVisitResult;
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::io::{self, IsTerminal, Stdout, Write};
use std::path::Path;

pub struct Reporter<W: Write> {
    out: W,
    color: bool,
}

impl Reporter<Stdout> {
    /// Report to stdout, colored when stdout is a terminal.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let color = out.is_terminal();
        Self { out, color }
    }
}

impl<W: Write> Reporter<W> {
    /// Plain (uncolored) reporter over any writer.
    pub fn new(out: W) -> Self {
        Self { out, color: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self, config: &Config) -> io::Result<()> {
        writeln!(self.out, "Searching for: {}", config.search_term())?;
        writeln!(self.out, "in the directory: {}", config.root_dir().display())?;
        writeln!(self.out, "and replacing with: {}", config.replacement_term())
    }

    pub fn modified(&mut self, result: &FileVisitResult) -> io::Result<()> {
        let line = format!(
            "Modified {} ({} replacements)",
            result.path.display(),
            result.replacement_count
        );
        if self.color {
            writeln!(self.out, "{} {}", "✓".green(), line)
        } else {
            writeln!(self.out, "{line}")
        }
    }

    /// Unified line diff between the original and rewritten content.
    pub fn diff(&mut self, file: &Path, original: &str, modified: &str) -> io::Result<()> {
        let header_old = format!("--- {} (original)", file.display());
        let header_new = format!("+++ {} (modified)", file.display());
        if self.color {
            writeln!(self.out, "{}", header_old.dimmed())?;
            writeln!(self.out, "{}", header_new.dimmed())?;
        } else {
            writeln!(self.out, "{header_old}")?;
            writeln!(self.out, "{header_new}")?;
        }

        let diff = TextDiff::from_lines(original, modified);
        for change in diff.iter_all_changes() {
            let (sign, text) = match change.tag() {
                ChangeTag::Delete => ('-', change.to_string()),
                ChangeTag::Insert => ('+', change.to_string()),
                ChangeTag::Equal => continue,
            };
            let line = format!("{sign}{text}");
            let line = if line.ends_with('\n') {
                line
            } else {
                format!("{line}\n")
            };
            if self.color {
                let painted = match sign {
                    '-' => line.red(),
                    _ => line.green(),
                };
                write!(self.out, "{painted}")?;
            } else {
                write!(self.out, "{line}")?;
            }
        }
        Ok(())
    }

    pub fn summary(&mut self, summary: &Summary, dry_run: bool) -> io::Result<()> {
        let verb = if dry_run { "would change" } else { "changed" };
        writeln!(self.out)?;
        if self.color {
            writeln!(self.out, "{}", "Summary:".bold())?;
        } else {
            writeln!(self.out, "Summary:")?;
        }
        writeln!(self.out, "  {} files scanned", summary.files_scanned)?;
        writeln!(self.out, "  {} files {}", summary.files_changed, verb)?;
        writeln!(self.out, "  {} replacements", summary.replacements)?;
        self.out.flush()
    }
}
