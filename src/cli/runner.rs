use crate::{
    bundler::{ConfigLoader, ConfigOverrides},
    cli::{Commands, ConfigArgs, InitArgs},
    constants::exit_codes,
    error::{Error, Result},
    init::{InitOutcome, Initializer, PlaceholderTemplate, SystemPackageManagers},
    renderer::MiniJinjaRenderer,
};

/// Runs a parsed command and returns the process exit code.
pub fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Init(args) => run_init(args),
        Commands::Config(args) => run_config(args),
    }
}

/// Creates a project with the real template engine and package manager.
pub fn run_init(args: InitArgs) -> Result<i32> {
    let templates = PlaceholderTemplate;
    let package_managers = SystemPackageManagers;
    let renderer = MiniJinjaRenderer::new();

    let input = args.input();
    let mut initializer = Initializer::new(&templates, &package_managers, &renderer);
    if let Some(manifest) = args.framework_manifest {
        initializer = initializer.with_framework_manifest(manifest);
    }

    match initializer.init(&args.project_dir, input)? {
        InitOutcome::Created(project) => {
            log::info!("Created {} in {}", project.name, project.root.display());
            Ok(exit_codes::SUCCESS)
        }
        InitOutcome::Aborted(_) => Ok(exit_codes::FAILURE),
    }
}

/// Prints the merged bundler configuration.
pub fn run_config(args: ConfigArgs) -> Result<i32> {
    let overrides = ConfigOverrides::from(args);
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(anyhow::anyhow!("Failed to create tokio runtime: {e}")))?;
    let config = rt.block_on(ConfigLoader::system().load(&overrides))?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(exit_codes::SUCCESS)
}
