//! Command dispatch: bridges CLI args -> catalog calls -> output formatting.

pub mod config_cmd;
pub mod feedstocks;
pub mod products;
pub mod util;

use artesano_core::Catalog;

use crate::cli::{Command, GlobalOpts};
use crate::config::Defaults;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    catalog: &Catalog,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<(), CliError> {
    match cmd {
        Command::Feedstocks(args) => feedstocks::handle(catalog, args, global, defaults).await,
        Command::Products(args) => products::handle(catalog, args, global, defaults).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
