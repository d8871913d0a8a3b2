//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::str::FromStr;

use rust_decimal::Decimal;

use artesano_core::form::parse_decimal;
use artesano_core::{CompositionInput, EntityId, ListView, UnitOfMeasure};

use crate::cli::ListArgs;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, `--yes` is required.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Build the list view for a `list` command.
pub fn list_view(args: &ListArgs, default_size: u32) -> ListView {
    let mut view = ListView::new(args.size.unwrap_or(default_size));
    if let Some(ref term) = args.search {
        view.set_search_term(term);
    }
    view.with_page(args.page)
}

pub fn parse_unit(raw: &str) -> Result<UnitOfMeasure, CliError> {
    UnitOfMeasure::from_str(raw.trim()).map_err(|_| CliError::Validation {
        field: "unit".into(),
        reason: format!("expected one of KG, M, M2, M3, UN, L; got '{raw}'"),
    })
}

/// Parse a `FEEDSTOCK_ID=QTY` composition line.
pub fn parse_line(raw: &str) -> Result<CompositionInput, CliError> {
    let invalid = |reason: String| CliError::Validation {
        field: "line".into(),
        reason,
    };

    let (id, qty) = raw
        .split_once('=')
        .ok_or_else(|| invalid(format!("expected FEEDSTOCK_ID=QTY, got '{raw}'")))?;
    let feedstock_id = EntityId::from_str(id)
        .map_err(|_| invalid(format!("'{id}' is not a feedstock ID")))?;
    let quantity = parse_decimal("Quantity", qty)?;
    if quantity <= Decimal::ZERO {
        return Err(invalid(format!("quantity for feedstock {feedstock_id} must be greater than zero")));
    }

    Ok(CompositionInput {
        feedstock_id,
        quantity,
    })
}

pub fn parse_lines(raw: &[String]) -> Result<Vec<CompositionInput>, CliError> {
    raw.iter().map(|line| parse_line(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_line_parses() {
        let line = parse_line("3=1,5").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(line.feedstock_id, EntityId::new(3));
        assert_eq!(line.quantity, Decimal::new(15, 1));
    }

    #[test]
    fn composition_line_rejects_garbage() {
        assert!(parse_line("3").is_err());
        assert!(parse_line("abc=2").is_err());
        assert!(parse_line("3=0").is_err());
    }

    #[test]
    fn unit_is_case_insensitive() {
        assert!(matches!(parse_unit("m3"), Ok(UnitOfMeasure::M3)));
        assert!(parse_unit("ton").is_err());
    }

    #[test]
    fn search_term_keeps_requested_page() {
        let args = ListArgs {
            page: 2,
            size: None,
            search: Some("mesa".into()),
        };
        let view = list_view(&args, 5);
        assert_eq!(view.current_page(), 2);
        assert_eq!(view.page_size(), 5);
        assert_eq!(view.search_term(), "mesa");
    }
}
