use anyhow::{Context, Result};
use log::{info, warn};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use mzxml_diff::compare::{compare_sources, CompareError, CompareOptions};
use mzxml_diff::mzxml::MzXmlReader;
use mzxml_diff::source::ScanSource;

/// Exit status when differences were reported under `--fail-on-diff`
pub const EXIT_DIFFERENCES: i32 = 2;

/// Compare the last two of `files` and print the report to stdout
pub fn run(files: &[PathBuf], options: CompareOptions, fail_on_diff: bool) -> Result<()> {
    let [.., first_path, second_path] = files else {
        anyhow::bail!("two input files are required");
    };
    if files.len() > 2 {
        warn!("{} input files given, comparing the last two", files.len());
    }

    let mut first = ScanSource::new(open(first_path)?);
    let mut second = ScanSource::new(open(second_path)?);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = compare_sources(&mut first, &mut second, &options, &mut out);
    out.flush().context("Failed to write comparison report")?;

    match result {
        Ok(summary) => {
            if fail_on_diff && summary.has_differences() {
                std::process::exit(EXIT_DIFFERENCES);
            }
            Ok(())
        }
        // the count report is already on stdout
        Err(CompareError::ScanCountMismatch { .. }) => std::process::exit(1),
        Err(e) => Err(e).context("Comparison failed"),
    }
}

fn open(path: &Path) -> Result<MzXmlReader> {
    let reader = MzXmlReader::open(path)
        .with_context(|| format!("could not open input file {}", path.display()))?;
    info!(
        "{}: {} scans{}",
        path.display(),
        reader.last_scan(),
        if reader.index().is_indexed() { "" } else { " (unindexed)" }
    );
    Ok(reader)
}
