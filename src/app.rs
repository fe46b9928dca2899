use crate::config::Config;
use crate::report::Reporter;
use crate::rewrite::{FileRewrite, FileVisitResult};
use crate::walk;
use crate::Error;
use std::io::Write;

/// Running totals for one run. Per-file results are not kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub replacements: usize,
}

impl Summary {
    fn record(&mut self, result: &FileVisitResult) {
        self.files_scanned += 1;
        if result.changed {
            self.files_changed += 1;
            self.replacements += result.replacement_count;
        }
    }
}

/// Walk `config.root_dir()` and rewrite every matching source file.
///
/// Changes are reported as they happen. The first error of any kind stops
/// the run; files already rewritten stay rewritten.
pub fn search<W: Write>(config: &Config, reporter: &mut Reporter<W>) -> Result<Summary, Error> {
    reporter.banner(config)?;

    if config.dry_run() {
        log::info!("dry run: no files will be written");
    }

    let mut summary = Summary::default();

    for path in walk::source_files(config.root_dir()) {
        let path = path?;
        log::debug!("visiting {}", path.display());

        let plan = FileRewrite::plan(path, config.search_term(), config.replacement_term())?;
        let preview = (config.show_diff() && plan.is_change())
            .then(|| (plan.original().to_owned(), plan.updated().to_owned()));

        let result = plan.commit(config.dry_run())?;
        log::debug!(
            "{} occurrences in {}",
            result.replacement_count,
            result.path.display()
        );
        summary.record(&result);

        if !result.changed {
            continue;
        }

        reporter.modified(&result)?;
        if let Some((original, updated)) = preview {
            reporter.diff(&result.path, &original, &updated)?;
        }
    }

    log::info!(
        "{} of {} files matched, {} replacements",
        summary.files_changed,
        summary.files_scanned,
        summary.replacements
    );

    reporter.summary(&summary, config.dry_run())?;
    Ok(summary)
}
