pub mod args;
pub mod runner;

pub use args::{get_cli, get_log_level_from_verbose, Cli, Commands, ConfigArgs, InitArgs};
pub use runner::{run, run_config, run_init};
