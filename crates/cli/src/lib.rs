//! normform CLI -- check and decompose relations into normal forms.

pub mod error;
pub mod input;
pub mod report;

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use normform_core::NormalForm;

pub use error::Error;

#[derive(Debug, Parser)]
#[command(
    name = "normform",
    about = "Normal-form checking and decomposition of relational tables"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decompose a table into relations satisfying a target normal form
    Normalize(NormalizeArgs),
    /// Report which normal forms a table satisfies
    Check(InputArgs),
}

/// Where the relation comes from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// CSV file with a header row
    #[arg(long)]
    pub table: PathBuf,
    /// Comma-separated key attributes, e.g. "SID, CourseID"
    #[arg(long)]
    pub key: String,
    /// File of functional dependencies, one per line
    #[arg(long)]
    pub fds: Option<PathBuf>,
    /// File of multivalued dependencies, one per line
    #[arg(long)]
    pub mvds: Option<PathBuf>,
    /// Comma-separated attributes that may hold lists
    #[arg(long)]
    pub multivalued: Option<String>,
    /// Relation name (defaults to the table's file stem)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Normal form to decompose into
    #[arg(long)]
    pub target: Target,
    /// Also report the highest normal form of the input table
    #[arg(long)]
    pub highest: bool,
    /// Rename an output relation, e.g. `Student_CourseID=Course`
    #[arg(long, value_name = "OLD=NEW")]
    pub rename: Vec<Rename>,
    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
    /// Write the report to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Target {
    #[value(name = "1nf")]
    First,
    #[value(name = "2nf")]
    Second,
    #[value(name = "3nf")]
    Third,
    #[value(name = "bcnf")]
    BoyceCodd,
    #[value(name = "4nf")]
    Fourth,
    #[value(name = "5nf")]
    Fifth,
}

impl From<Target> for NormalForm {
    fn from(target: Target) -> Self {
        match target {
            Target::First => Self::First,
            Target::Second => Self::Second,
            Target::Third => Self::Third,
            Target::BoyceCodd => Self::BoyceCodd,
            Target::Fourth => Self::Fourth,
            Target::Fifth => Self::Fifth,
        }
    }
}

/// An `OLD=NEW` pair applied to the output relation names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

impl FromStr for Rename {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once('=')
            .ok_or_else(|| format!("expected OLD=NEW, found `{s}`"))?;
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(format!("expected OLD=NEW, found `{s}`"));
        }
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}
