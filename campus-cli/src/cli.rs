//! Command line arguments.

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use campus_lib::api::Resource;

#[derive(Debug, Parser)]
#[command(
    name = "campus",
    version,
    about = "Browse and manage campus dashboard records"
)]
pub struct Cli {
    /// API base URL
    #[arg(long, env = "CAMPUS_URL")]
    pub url: String,

    /// Bearer token
    #[arg(long, env = "CAMPUS_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, env = "CAMPUS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Also log to the terminal
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one page of a resource
    List {
        #[arg(value_enum)]
        resource: ResourceKind,

        /// Search text
        #[arg(long, short, default_value = "")]
        search: String,

        /// Page to print (1-based)
        #[arg(long, short, default_value_t = 1)]
        page: u32,

        /// Rows per page
        #[arg(long, short, default_value_t = 10)]
        limit: u32,

        /// Column to sort the page by; repeat to flip the direction
        #[arg(long)]
        sort: Vec<String>,

        /// Print every page from `--page` on
        #[arg(long)]
        all: bool,
    },

    /// Delete records by id
    Delete {
        #[arg(value_enum)]
        resource: ResourceKind,

        /// Ids to delete
        #[arg(required = true)]
        ids: Vec<String>,

        /// Allow deleting several ids, one after another
        #[arg(long)]
        batch: bool,
    },
}

/// Resources reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    School,
    Student,
    Score,
    Admin,
    Log,
}

impl ResourceKind {
    pub fn resource(self) -> Resource {
        match self {
            ResourceKind::School => Resource::SCHOOL,
            ResourceKind::Student => Resource::STUDENT,
            ResourceKind::Score => Resource::SCORE,
            ResourceKind::Admin => Resource::ADMIN,
            ResourceKind::Log => Resource::LOG,
        }
    }
}
