use rnscaffold::{
    cli::{get_cli, get_log_level_from_verbose, run},
    constants::exit_codes,
    error::default_error_handler,
};

fn main() {
    let cli = get_cli();
    let log_level = get_log_level_from_verbose(cli.verbose);
    env_logger::Builder::new().filter_level(log_level).init();

    match run(cli.command) {
        Ok(exit_codes::SUCCESS) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => default_error_handler(err),
    }
}
