/*!
 * Command-line interface for proj2prompt
 */

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use proj2prompt::clipboard::{Clipboard, SystemClipboard};
use proj2prompt::config::{Args, Config};
use proj2prompt::error::Result;
use proj2prompt::writer::write_output_file;

fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries the generated text
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "proj2prompt", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(Config::from_args(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", e.context(), e);
            ExitCode::FAILURE
        }
    }
}

/// Validate, explore, then hand the text to its destinations
fn run(config: Config) -> Result<()> {
    config.validate()?;
    let text = proj2prompt::explore(&config)?;
    deliver(&config, &text, &SystemClipboard)
}

/// Send the text to the file, the clipboard, or stdout
fn deliver(config: &Config, text: &str, clipboard: &dyn Clipboard) -> Result<()> {
    if let Some(path) = &config.output_file {
        write_output_file(path, text)?;
        println!("Output written to file: {}", path.display());
    }

    if config.clipboard {
        clipboard.copy(text)?;
        println!("Output copied to clipboard.");
    }

    if config.prints_to_stdout() {
        println!("{}", text);
    }

    Ok(())
}
