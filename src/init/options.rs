//! Options bag accepted by `init`.

use clap::Parser;
use log::debug;

const TEMPLATE_FLAG: &str = "--template";
const NPM_FLAG: &str = "--npm";

/// Options parsed from the `init` argument sequence.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "init", no_binary_name = true, disable_help_flag = true)]
pub struct InitOptions {
    /// Name of the project to create.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Template to instantiate instead of the built-in one.
    #[arg(long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Use npm even when yarn is available.
    #[arg(long)]
    pub npm: bool,
}

impl InitOptions {
    /// Parses an argument sequence where the first non-flag token is the project name.
    ///
    /// Unknown flags are dropped before parsing. An unknown `--flag` without `=`
    /// takes the following non-flag token as its value, so `--foo bar App` names
    /// the project `App`.
    pub fn parse<I, S>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::try_parse_from(known_args(args))
    }
}

fn is_known_flag(token: &str) -> bool {
    token == NPM_FLAG
        || token == TEMPLATE_FLAG
        || token.strip_prefix(TEMPLATE_FLAG).is_some_and(|rest| rest.starts_with('='))
}

/// Keeps positionals and the flags `init` understands, in order.
fn known_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = args.into_iter().map(|arg| arg.as_ref().to_string()).peekable();
    let mut kept = Vec::new();
    while let Some(token) = tokens.next() {
        if token == "--" {
            kept.push(token);
            kept.extend(tokens.by_ref());
            break;
        }
        if !token.starts_with('-') || token == "-" || is_known_flag(&token) {
            kept.push(token);
            continue;
        }
        debug!("Ignoring unknown init flag {token}");
        if !token.contains('=') {
            if let Some(value) = tokens.next_if(|next| !next.starts_with('-')) {
                debug!("Ignoring value {value} of {token}");
            }
        }
    }
    kept
}

/// The second argument of `init`: a full argument vector or a bare project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitInput {
    /// Ready-made argument sequence.
    Args(Vec<String>),
    /// A project name; `rest` holds the remaining process arguments appended after it.
    Name { name: String, rest: Vec<String> },
}

impl InitInput {
    /// Builds the `Name` variant from a project name and the remaining process arguments.
    pub fn from_name<I: IntoIterator<Item = String>>(name: impl Into<String>, rest: I) -> Self {
        InitInput::Name { name: name.into(), rest: rest.into_iter().collect() }
    }

    /// Flattens the input into the argument sequence handed to the options parser.
    pub fn into_args(self) -> Vec<String> {
        match self {
            InitInput::Args(args) => args,
            InitInput::Name { name, rest } => {
                if name.is_empty() {
                    return Vec::new();
                }
                std::iter::once(name).chain(rest).collect()
            }
        }
    }
}

impl From<Vec<String>> for InitInput {
    fn from(args: Vec<String>) -> Self {
        InitInput::Args(args)
    }
}
