//! Feedstock command handlers.

use rust_decimal::Decimal;
use tabled::Tabled;

use artesano_core::form::parse_decimal;
use artesano_core::{Catalog, EntityId, Feedstock, FeedstockForm, FeedstockRequest, guard};

use crate::cli::{FeedstocksArgs, FeedstocksCommand, GlobalOpts, OutputFormat};
use crate::config::Defaults;
use crate::error::{self, CliError};
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct FeedstockRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Used by")]
    used_by: String,
}

impl From<&Feedstock> for FeedstockRow {
    fn from(f: &Feedstock) -> Self {
        Self {
            id: f.id.to_string(),
            code: f.code.clone(),
            name: f.name.clone(),
            stock: f.stock.normalize().to_string(),
            unit: f.unit_of_measure.clone(),
            used_by: f.dependent_count().to_string(),
        }
    }
}

#[derive(Tabled)]
struct UsageRow {
    #[tabled(rename = "Product")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty / unit")]
    quantity: String,
}

fn detail(f: &Feedstock) -> String {
    let mut out = [
        format!("ID:     {}", f.id),
        format!("Code:   {}", f.code),
        format!("Name:   {}", f.name),
        format!("Stock:  {} {}", f.stock.normalize(), f.unit_of_measure),
    ]
    .join("\n");

    if f.products.is_empty() {
        out.push_str("\nUsed by: no products");
    } else {
        let rows: Vec<UsageRow> = f
            .products
            .iter()
            .map(|p| UsageRow {
                code: p.product_code.clone(),
                name: p.name.clone(),
                quantity: p.quantity.normalize().to_string(),
            })
            .collect();
        out.push_str(&format!("\nUsed by {} product(s):\n", f.products.len()));
        out.push_str(&output::render_table(&rows));
    }
    out
}

/// Apply the flags given to `update` on top of the stored record.
fn overlay(
    mut request: FeedstockRequest,
    code: Option<String>,
    name: Option<String>,
    stock: Option<&str>,
    unit: Option<&str>,
) -> Result<FeedstockRequest, CliError> {
    if let Some(code) = code {
        request.code = code;
    }
    if let Some(name) = name {
        request.name = name;
    }
    if let Some(raw) = stock {
        let stock = parse_decimal("Stock", raw)?;
        if stock < Decimal::ZERO {
            return Err(CliError::Validation {
                field: "stock".into(),
                reason: "cannot be negative".into(),
            });
        }
        request.stock = stock;
    }
    if let Some(raw) = unit {
        request.unit_of_measure = util::parse_unit(raw)?;
    }
    Ok(request)
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    catalog: &Catalog,
    args: FeedstocksArgs,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<(), CliError> {
    match args.command {
        FeedstocksCommand::List(list) => {
            let view = util::list_view(&list, defaults.feedstock_page_size);
            let pb = output::spinner(global, "Fetching feedstocks");
            let page = catalog.fetch_feedstocks(&view).await;
            pb.finish_and_clear();
            let page = page?;

            let out = output::render_list(
                &global.output,
                &page.items,
                |f| FeedstockRow::from(f),
                |f| f.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            if matches!(global.output, OutputFormat::Table) && !global.quiet {
                eprintln!(
                    "page {} of {}, {} feedstock(s)",
                    view.current_page() + 1,
                    view.last_page(page.total) + 1,
                    page.total
                );
            }
            Ok(())
        }

        FeedstocksCommand::Get { id } => {
            let feedstock = catalog.get_feedstock(EntityId::new(id)).await?;
            let out = output::render_single(&global.output, &feedstock, detail, |f| {
                f.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FeedstocksCommand::Create {
            code,
            name,
            stock,
            unit,
        } => {
            let form = FeedstockForm {
                code,
                name,
                stock,
                unit: util::parse_unit(&unit)?,
            };
            let created = catalog.create_feedstock(form.to_request()?).await?;
            let out = output::render_single(&global.output, &created, detail, |f| {
                f.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FeedstocksCommand::Update {
            id,
            code,
            name,
            stock,
            unit,
        } => {
            let existing = catalog.get_feedstock(EntityId::new(id)).await?;
            let request = overlay(
                FeedstockRequest::from_existing(&existing),
                code,
                name,
                stock.as_deref(),
                unit.as_deref(),
            )?;
            let updated = catalog.update_feedstock(existing.id, request).await?;
            let out = output::render_single(&global.output, &updated, detail, |f| {
                f.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FeedstocksCommand::Delete { id } => {
            let feedstock = catalog.get_feedstock(EntityId::new(id)).await?;

            // Locked feedstocks fail before any prompt.
            guard::check_feedstock_deletable(&feedstock)?;

            let prompt = guard::confirm_prompt(&feedstock.name);
            if !util::confirm(&prompt, "feedstocks delete", global.yes)? {
                if !global.quiet {
                    eprintln!("Aborted");
                }
                return Ok(());
            }

            catalog
                .delete_feedstock(&feedstock)
                .await
                .map_err(error::delete_error)?;
            if !global.quiet {
                eprintln!("✓ Deleted feedstock \"{}\"", feedstock.name);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artesano_core::UnitOfMeasure;

    fn request() -> FeedstockRequest {
        FeedstockRequest {
            code: "CARV-01".into(),
            name: "Carvalho".into(),
            stock: Decimal::from(10),
            unit_of_measure: UnitOfMeasure::M3,
        }
    }

    #[test]
    fn overlay_only_touches_given_fields() {
        let updated = overlay(request(), None, Some("Carvalho seco".into()), Some("7,5"), None)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(updated.code, "CARV-01");
        assert_eq!(updated.name, "Carvalho seco");
        assert_eq!(updated.stock, Decimal::new(75, 1));
        assert_eq!(updated.unit_of_measure, UnitOfMeasure::M3);
    }

    #[test]
    fn overlay_rejects_negative_stock() {
        assert!(overlay(request(), None, None, Some("-1"), None).is_err());
    }
}
