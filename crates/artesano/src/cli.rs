//! Clap derive structures for the `artesano` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only clap types appear here so `build.rs` can include this file to
//! render man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// artesano -- manage the workshop's feedstock and product catalog
#[derive(Debug, Parser)]
#[command(
    name = "artesano",
    version,
    about = "Manage the furniture workshop catalog from the command line",
    long_about = "Browse, search, create, update and delete feedstocks (raw materials)\n\
        and products against the catalog backend, and report how many units\n\
        of a product the current stock allows.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "ARTESANO_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, env = "ARTESANO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ARTESANO_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "ARTESANO_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ARTESANO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage feedstocks (raw materials)
    #[command(alias = "fs", alias = "f")]
    Feedstocks(FeedstocksArgs),

    /// Manage products and their composition
    #[command(alias = "pr")]
    Products(ProductsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Paging and search arguments shared by list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Zero-based page index
    #[arg(long, default_value = "0")]
    pub page: u32,

    /// Page size (1-100); defaults to the configured size
    #[arg(long, short = 'n')]
    pub size: Option<u32>,

    /// Search term
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

// ── Feedstocks ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FeedstocksArgs {
    #[command(subcommand)]
    pub command: FeedstocksCommand,
}

#[derive(Debug, Subcommand)]
pub enum FeedstocksCommand {
    /// List one page of feedstocks
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a feedstock and the products that use it
    Get {
        /// Feedstock ID
        id: i64,
    },

    /// Register a new feedstock
    Create {
        /// Unique feedstock code
        #[arg(long)]
        code: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Quantity in stock (comma or dot decimal separator)
        #[arg(long, default_value = "0")]
        stock: String,

        /// Unit of measure (KG, M, M2, M3, UN, L)
        #[arg(long, short = 'u', default_value = "KG")]
        unit: String,
    },

    /// Replace fields of an existing feedstock
    Update {
        /// Feedstock ID
        id: i64,

        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        stock: Option<String>,

        #[arg(long, short = 'u')]
        unit: Option<String>,
    },

    /// Delete a feedstock no product uses
    #[command(alias = "rm")]
    Delete {
        /// Feedstock ID
        id: i64,
    },
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

/// Which field a product search matches.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SearchBy {
    /// Product name
    Name,
    /// Name of a feedstock in the composition
    Feedstock,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List one page of products
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Field the search term matches
        #[arg(long, value_enum, default_value = "name")]
        by: SearchBy,
    },

    /// Show a product with its composition
    Get {
        /// Product ID
        id: i64,
    },

    /// Register a new product
    Create {
        /// Unique product code
        #[arg(long)]
        code: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long)]
        price: String,

        /// Composition line, repeatable
        #[arg(long = "line", short = 'l', value_name = "FEEDSTOCK_ID=QTY", required = true)]
        lines: Vec<String>,
    },

    /// Replace fields of an existing product
    Update {
        /// Product ID
        id: i64,

        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<String>,

        /// Replace the whole composition with these lines
        #[arg(long = "line", short = 'l', value_name = "FEEDSTOCK_ID=QTY")]
        lines: Vec<String>,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        id: i64,
    },

    /// Report how many units the current stock allows
    Capacity {
        /// Product ID
        id: i64,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key: api_url, timeout, insecure, ca_cert
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
