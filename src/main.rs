//! # mzxml-diff
//!
//! Compares two mzXML files scan by scan and prints every header field and
//! peak that differs.
//!
//! ## Usage
//!
//! ```bash
//! # Full comparison
//! mzxml-diff before.mzXML after.mzXML
//!
//! # Peaks only, ignoring zero-intensity peaks
//! mzxml-diff before.mzXML after.mzXML --noHeaders --noZeroInt
//!
//! # Non-zero exit status when anything differs
//! mzxml-diff --fail-on-diff before.mzXML after.mzXML
//! ```

use clap::Parser;

mod cli;

fn main() {
    let cli = match cli::Cli::try_parse().and_then(|cli| cli.validate().map(|_| cli)) {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    cli::init_logging(cli.verbosity());

    if let Err(e) = cli::dispatch(cli) {
        #[cfg(feature = "colorized_output")]
        {
            eprintln!("{}", console::style(format!("{:#}", e)).red().for_stderr());
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            eprintln!("{:#}", e);
        }

        std::process::exit(1);
    }
}
