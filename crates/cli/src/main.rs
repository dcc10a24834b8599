mod commands;
mod exit_code;

pub use exit_code::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphql-loader")]
#[command(about = "Turn .graphql files with #import directives into JavaScript modules", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to GraphQL config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Project name (for multi-project configs)
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show informational output (per-file lines, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate modules and write them per `extensions.loader`
    ///
    /// Without FILES, every document matched by the project's `documents`
    /// patterns is built.
    Build {
        /// Entry files to build
        files: Vec<PathBuf>,
    },

    /// Print the generated module for one entry file to stdout
    Print {
        /// Entry file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_info: !cli.quiet,
    };

    let result = match cli.command {
        Commands::Build { files } => {
            commands::build::run(cli.config, cli.project.as_deref(), files, output_opts).await
        }
        Commands::Print { file } => commands::print::run(&file).await,
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(error) => {
            eprintln!("{} {error:#}", "✗".red().bold());
            ExitCode::from_error(&error)
        }
    };
    tracing::debug!(%code, "Exiting");
    if code != ExitCode::Success {
        code.exit();
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` / `--no-color`
/// 2. `NO_COLOR` (any value disables colors)
/// 3. `CLICOLOR_FORCE` (non-empty, non-zero forces colors)
/// 4. `CLICOLOR=0` disables colors
/// 5. TTY detection by `colored`
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}

#[cfg(test)]
mod color_tests {
    use super::configure_colors;
    use colored::control::{self, SHOULD_COLORIZE};
    use std::sync::Mutex;

    // Env vars and the color override are process-global
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn with_env(vars: &[(&str, &str)], f: impl FnOnce()) {
        let _lock = TEST_MUTEX.lock().unwrap();
        let names = ["NO_COLOR", "CLICOLOR", "CLICOLOR_FORCE"];
        let saved: Vec<_> = names.iter().map(|name| std::env::var_os(name)).collect();

        for name in names {
            std::env::remove_var(name);
        }
        for (name, value) in vars {
            std::env::set_var(name, value);
        }
        control::unset_override();

        f();

        control::unset_override();
        for (name, value) in names.iter().zip(saved) {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }

    #[test]
    fn color_flag_beats_no_color_env() {
        with_env(&[("NO_COLOR", "1")], || {
            configure_colors(true, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn no_color_flag_disables() {
        with_env(&[("CLICOLOR_FORCE", "1")], || {
            configure_colors(false, true);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn empty_no_color_env_disables() {
        with_env(&[("NO_COLOR", "")], || {
            configure_colors(false, false);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn clicolor_force_enables() {
        with_env(&[("CLICOLOR_FORCE", "1")], || {
            configure_colors(false, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn clicolor_zero_disables() {
        with_env(&[("CLICOLOR", "0")], || {
            configure_colors(false, false);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }
}
