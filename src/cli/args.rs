use crate::bundler::ConfigOverrides;
use crate::constants::{exit_codes, verbosity};
use crate::init::InitInput;
use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for rnscaffold.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a project from a template and install its dependencies.
    Init(InitArgs),
    /// Print the merged bundler configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Destination directory of the new project.
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Framework manifest holding the core UI library peer dependency.
    #[arg(long, value_name = "PATH")]
    pub framework_manifest: Option<PathBuf>,

    /// Project name. When given, ARGS are appended after it as the remaining options.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// `<NAME> [--template <TEMPLATE>] [--npm]`
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl InitArgs {
    /// What `init` receives: the bare `--name` plus the trailing arguments, or the
    /// trailing arguments alone.
    pub fn input(&self) -> InitInput {
        match &self.name {
            Some(name) => InitInput::from_name(name.clone(), self.args.clone()),
            None => InitInput::Args(self.args.clone()),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Project bundler config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Port the bundler server listens on.
    #[arg(long)]
    pub port: Option<u16>,

    /// Number of bundler workers.
    #[arg(long = "max-workers")]
    pub max_workers: Option<usize>,

    /// Reporter used for bundler output.
    #[arg(long)]
    pub reporter: Option<String>,

    /// Discard the bundler cache on start.
    #[arg(long = "reset-cache")]
    pub reset_cache: bool,

    /// Folders to watch (comma-separated).
    #[arg(long = "watch-folders", value_delimiter = ',')]
    pub watch_folders: Option<Vec<PathBuf>>,

    /// Extra source extensions, tried before the configured ones (comma-separated).
    #[arg(long = "source-exts", value_delimiter = ',')]
    pub source_exts: Option<Vec<String>>,
}

impl From<ConfigArgs> for ConfigOverrides {
    fn from(args: ConfigArgs) -> Self {
        ConfigOverrides {
            config: args.config,
            max_workers: args.max_workers,
            port: args.port,
            reporter: args.reporter,
            reset_cache: args.reset_cache.then_some(true),
            watch_folders: args.watch_folders,
            source_exts: args.source_exts,
        }
    }
}

/// Parse command line arguments, printing help when required inputs are missing.
pub fn get_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument
            || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        {
            let mut command = Cli::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
