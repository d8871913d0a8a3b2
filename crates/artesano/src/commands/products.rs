//! Product command handlers.

use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use tabled::Tabled;

use artesano_core::capacity::{self, line_limit};
use artesano_core::form::parse_decimal;
use artesano_core::{
    Catalog, CompositionLine, EntityId, Product, ProductRequest, SearchType, guard,
};

use crate::cli::{GlobalOpts, OutputFormat, ProductsArgs, ProductsCommand, SearchBy};
use crate::config::Defaults;
use crate::error::{self, CliError};
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Unit price")]
    unit_price: String,
    #[tabled(rename = "Feedstocks")]
    lines: String,
    #[tabled(rename = "Can build")]
    possible: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.to_string(),
            code: p.code.clone(),
            name: p.name.clone(),
            unit_price: format!("{:.2}", p.unit_price),
            lines: p.composition.len().to_string(),
            possible: p.possible_units().to_string(),
        }
    }
}

#[derive(Tabled)]
struct CompositionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Feedstock")]
    name: String,
    #[tabled(rename = "Qty / unit")]
    quantity: String,
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Allows")]
    allows: String,
}

impl From<&CompositionLine> for CompositionRow {
    fn from(line: &CompositionLine) -> Self {
        Self {
            id: line.feedstock_id.to_string(),
            name: line.name.clone(),
            quantity: line.quantity.normalize().to_string(),
            stock: line.stock.normalize().to_string(),
            allows: line_limit(line).map_or_else(|| "-".into(), |l| l.floor().to_string()),
        }
    }
}

fn detail(p: &Product) -> String {
    let mut out = [
        format!("ID:         {}", p.id),
        format!("Code:       {}", p.code),
        format!("Name:       {}", p.name),
        format!("Unit price: {:.2}", p.unit_price),
        format!("Can build:  {}", p.possible_units()),
    ]
    .join("\n");
    let rows: Vec<CompositionRow> = p.composition.iter().map(CompositionRow::from).collect();
    out.push('\n');
    out.push_str(&output::render_table(&rows));
    out
}

// ── Capacity report ─────────────────────────────────────────────────

/// Serializable capacity report for structured output formats.
#[derive(serde::Serialize)]
struct CapacityReport<'a> {
    product_id: EntityId,
    product_code: &'a str,
    possible_units: i64,
    bottleneck: Option<&'a CompositionLine>,
    composition: &'a [CompositionLine],
}

impl<'a> CapacityReport<'a> {
    fn new(product: &'a Product) -> Self {
        Self {
            product_id: product.id,
            product_code: &product.code,
            possible_units: capacity::possible_units(&product.composition),
            bottleneck: capacity::bottleneck(&product.composition),
            composition: &product.composition,
        }
    }
}

fn capacity_text(report: &CapacityReport<'_>, color: bool) -> String {
    let units = report.possible_units.to_string();
    let units = match (color, report.possible_units > 0) {
        (false, _) => units,
        (true, true) => units.green().bold().to_string(),
        (true, false) => units.red().bold().to_string(),
    };
    let mut out = format!("{}: {units} unit(s) can be built", report.product_code);

    match report.bottleneck {
        Some(line) => {
            let name = if color {
                line.name.yellow().to_string()
            } else {
                line.name.clone()
            };
            out.push_str(&format!(
                "\nLimited by {name}: {} in stock, {} per unit",
                line.stock.normalize(),
                line.quantity.normalize()
            ));
        }
        None => out.push_str("\nNo composition line consumes stock"),
    }

    let rows: Vec<CompositionRow> = report
        .composition
        .iter()
        .map(CompositionRow::from)
        .collect();
    out.push('\n');
    out.push_str(&output::render_table(&rows));
    out
}

// ── Request building ────────────────────────────────────────────────

fn parse_price(raw: &str) -> Result<Decimal, CliError> {
    let price = parse_decimal("Unit price", raw)?;
    if price < Decimal::ZERO {
        return Err(CliError::Validation {
            field: "price".into(),
            reason: "cannot be negative".into(),
        });
    }
    Ok(price)
}

fn build_request(
    code: String,
    name: String,
    price: &str,
    lines: &[String],
) -> Result<ProductRequest, CliError> {
    let request = ProductRequest {
        code,
        name,
        unit_price: parse_price(price)?,
        composition: util::parse_lines(lines)?,
    }
    .without_empty_lines();
    if request.composition.is_empty() {
        return Err(CliError::Validation {
            field: "line".into(),
            reason: "a product needs at least one feedstock".into(),
        });
    }
    Ok(request)
}

fn search_type(by: SearchBy) -> SearchType {
    match by {
        SearchBy::Name => SearchType::Name,
        SearchBy::Feedstock => SearchType::Feedstock,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    catalog: &Catalog,
    args: ProductsArgs,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List { list, by } => {
            let mut view = util::list_view(&list, defaults.product_page_size);
            view.set_search_type(search_type(by));
            let view = view.with_page(list.page);

            let pb = output::spinner(global, "Fetching products");
            let page = catalog.fetch_products(&view).await;
            pb.finish_and_clear();
            let page = page?;

            let out = output::render_list(
                &global.output,
                &page.items,
                |p| ProductRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            if matches!(global.output, OutputFormat::Table) && !global.quiet {
                eprintln!(
                    "page {} of {}, {} product(s)",
                    view.current_page() + 1,
                    view.last_page(page.total) + 1,
                    page.total
                );
            }
            Ok(())
        }

        ProductsCommand::Get { id } => {
            let product = catalog.get_product(EntityId::new(id)).await?;
            let out =
                output::render_single(&global.output, &product, detail, |p| p.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Create {
            code,
            name,
            price,
            lines,
        } => {
            let request = build_request(code, name, &price, &lines)?;
            let created = catalog.create_product(request).await?;
            let out =
                output::render_single(&global.output, &created, detail, |p| p.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Update {
            id,
            code,
            name,
            price,
            lines,
        } => {
            let existing = catalog.get_product(EntityId::new(id)).await?;
            let mut request = ProductRequest::from_existing(&existing);
            if let Some(code) = code {
                request.code = code;
            }
            if let Some(name) = name {
                request.name = name;
            }
            if let Some(ref raw) = price {
                request.unit_price = parse_price(raw)?;
            }
            if !lines.is_empty() {
                request.composition = util::parse_lines(&lines)?;
            }

            let updated = catalog
                .update_product(existing.id, request.without_empty_lines())
                .await?;
            let out =
                output::render_single(&global.output, &updated, detail, |p| p.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Delete { id } => {
            let product = catalog.get_product(EntityId::new(id)).await?;

            let prompt = guard::confirm_prompt(&product.name);
            if !util::confirm(&prompt, "products delete", global.yes)? {
                if !global.quiet {
                    eprintln!("Aborted");
                }
                return Ok(());
            }

            catalog
                .delete_product(product.id)
                .await
                .map_err(error::delete_error)?;
            if !global.quiet {
                eprintln!("✓ Deleted product \"{}\"", product.name);
            }
            Ok(())
        }

        ProductsCommand::Capacity { id } => {
            let product = catalog.get_product(EntityId::new(id)).await?;
            let report = CapacityReport::new(&product);
            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                &report,
                |r| capacity_text(r, color),
                |r| r.possible_units.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: EntityId::new(4),
            code: "MESA-01".into(),
            name: "Mesa".into(),
            unit_price: Decimal::from(1500),
            composition: vec![
                CompositionLine {
                    feedstock_id: EntityId::new(1),
                    feedstock_code: "CARV-01".into(),
                    name: "Carvalho".into(),
                    stock: Decimal::from(10),
                    quantity: Decimal::from(2),
                },
                CompositionLine {
                    feedstock_id: EntityId::new(2),
                    feedstock_code: "VERN-01".into(),
                    name: "Verniz".into(),
                    stock: Decimal::from(3),
                    quantity: Decimal::from(1),
                },
            ],
        }
    }

    #[test]
    fn capacity_report_names_bottleneck() {
        let p = product();
        let report = CapacityReport::new(&p);
        assert_eq!(report.possible_units, 3);

        let text = capacity_text(&report, false);
        assert!(text.starts_with("MESA-01: 3 unit(s)"));
        assert!(text.contains("Limited by Verniz"));
    }

    #[test]
    fn request_without_lines_is_rejected() {
        let result = build_request("X".into(), "Y".into(), "10", &[]);
        assert!(matches!(result, Err(CliError::Validation { ref field, .. }) if field == "line"));
    }

    #[test]
    fn request_parses_price_and_lines() {
        let request = build_request(
            "MESA-01".into(),
            "Mesa".into(),
            "1500,50",
            &["1=2".into(), "2=0,25".into()],
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(request.unit_price, Decimal::new(150_050, 2));
        assert_eq!(request.composition.len(), 2);
    }
}
