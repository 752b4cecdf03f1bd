use bedrock_manager::config::DEFAULT_CONFIG_FILE;
use bedrock_manager::{ManagerError, EXIT_IO_ERROR};
use clap::{CommandFactory, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_help_subcommand = true)]
struct Args {
  #[command(subcommand)]
  action: Option<Action>,
}

#[derive(Subcommand, Debug)]
enum Action {
  /// Run a bedrock server instance according to the config
  Run {
    /// Manager config file
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
  },
  /// Upgrade the installed bedrock server (not implemented)
  Upgrade,
  /// Print this help
  Help,
}

fn init_logging() {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::try_from_env("BEDROCK_MANAGER_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn,bedrock_manager=info")),
    )
    .init();
}

fn write_help(mut out: &mut dyn Write) -> io::Result<()> {
  Args::command().write_long_help(&mut out)?;
  out.flush()
}

fn failure(error: ManagerError) -> ExitCode {
  println!("Error: {error}");
  ExitCode::from(error.exit_code())
}

fn main() -> ExitCode {
  init_logging();

  match Args::parse().action.unwrap_or(Action::Help) {
    Action::Run { config } => {
      println!("Running Bedrock server from config \"{}\"...", config.display());
      match bedrock_manager::run_bedrock_server(&config) {
        Ok(status) if status.success() => {
          println!("Done.");
          ExitCode::SUCCESS
        }
        Ok(status) => {
          println!("Server exited with {status}");
          ExitCode::FAILURE
        }
        Err(error) => failure(error),
      }
    }
    Action::Upgrade => match bedrock_manager::upgrade() {
      Ok(()) => ExitCode::SUCCESS,
      Err(error) => failure(error),
    },
    Action::Help => match write_help(&mut io::stdout()) {
      Ok(()) => ExitCode::SUCCESS,
      Err(error) => {
        eprintln!("Error: cannot write help: {error}");
        ExitCode::from(EXIT_IO_ERROR)
      }
    },
  }
}
