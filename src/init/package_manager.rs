//! Package manager collaborator: npm or yarn bound to a project directory.

use log::{debug, info};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Installs and removes packages in a project.
///
/// Package specifiers use the `name@version` form (the version is optional).
pub trait PackageManager {
    /// Adds runtime dependencies.
    fn install(&self, packages: &[String]) -> Result<()>;
    /// Adds development dependencies.
    fn install_dev(&self, packages: &[String]) -> Result<()>;
    /// Removes dependencies.
    fn uninstall(&self, packages: &[String]) -> Result<()>;
}

/// Creates package managers bound to a project directory.
pub trait PackageManagerProvider {
    fn bind(&self, project_dir: &Path, force_npm: bool) -> Box<dyn PackageManager>;
}

/// The package manager client used to run commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Client {
    Yarn,
    Npm,
}

impl Client {
    fn program(self) -> &'static str {
        match (self, cfg!(windows)) {
            (Client::Yarn, false) => "yarn",
            (Client::Yarn, true) => "yarn.cmd",
            (Client::Npm, false) => "npm",
            (Client::Npm, true) => "npm.cmd",
        }
    }
}

impl Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Client::Yarn => "yarn",
            Client::Npm => "npm",
        };
        write!(f, "{s}")
    }
}

/// Kind of package operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Install,
    InstallDev,
    Uninstall,
}

/// Runs the real `yarn` or `npm` executable in the project directory.
#[derive(Debug, Clone)]
pub struct CommandPackageManager {
    project_dir: PathBuf,
    client: Client,
}

impl CommandPackageManager {
    pub fn new<P: Into<PathBuf>>(project_dir: P, client: Client) -> Self {
        Self { project_dir: project_dir.into(), client }
    }

    pub fn client(&self) -> Client {
        self.client
    }

    /// Arguments passed to the client for an operation, without the program name.
    pub fn command_args(&self, operation: Operation, packages: &[String]) -> Vec<String> {
        let flags: &[&str] = match (self.client, operation) {
            (Client::Yarn, Operation::Install) => &["add", "--exact"],
            (Client::Yarn, Operation::InstallDev) => &["add", "--dev", "--exact"],
            (Client::Yarn, Operation::Uninstall) => &["remove"],
            (Client::Npm, Operation::Install) => &["install", "--save", "--save-exact"],
            (Client::Npm, Operation::InstallDev) => &["install", "--save-dev", "--save-exact"],
            (Client::Npm, Operation::Uninstall) => &["uninstall", "--save"],
        };
        flags.iter().map(|flag| flag.to_string()).chain(packages.iter().cloned()).collect()
    }

    fn run(&self, operation: Operation, packages: &[String]) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }
        let args = self.command_args(operation, packages);
        let command = format!("{} {}", self.client, args.join(" "));
        info!("Running `{command}` in {}", self.project_dir.display());

        let status = Command::new(self.client.program())
            .args(&args)
            .current_dir(&self.project_dir)
            .stdin(Stdio::null())
            .status()?;

        if !status.success() {
            return Err(Error::PackageManagerFailed { command, status });
        }
        Ok(())
    }
}

impl PackageManager for CommandPackageManager {
    fn install(&self, packages: &[String]) -> Result<()> {
        self.run(Operation::Install, packages)
    }

    fn install_dev(&self, packages: &[String]) -> Result<()> {
        self.run(Operation::InstallDev, packages)
    }

    fn uninstall(&self, packages: &[String]) -> Result<()> {
        self.run(Operation::Uninstall, packages)
    }
}

/// Binds [`CommandPackageManager`]s, preferring yarn when it is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPackageManagers;

impl PackageManagerProvider for SystemPackageManagers {
    fn bind(&self, project_dir: &Path, force_npm: bool) -> Box<dyn PackageManager> {
        let client = select_client(force_npm, yarn_version().as_deref());
        debug!("Using {client} in {}", project_dir.display());
        Box::new(CommandPackageManager::new(project_dir, client))
    }
}

/// Picks npm when forced or when yarn is unavailable.
pub fn select_client(force_npm: bool, yarn_version: Option<&str>) -> Client {
    match (force_npm, yarn_version) {
        (false, Some(version)) => {
            debug!("Found yarn {version}");
            Client::Yarn
        }
        _ => Client::Npm,
    }
}

/// Returns the installed yarn version, if any.
pub fn yarn_version() -> Option<String> {
    let output = Command::new(Client::Yarn.program())
        .arg("--version")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!version.is_empty()).then_some(version)
}
