// ── Production capacity ──
//
// How many whole units of a product the current feedstock stock allows.
// Pure functions over composition lines; order of lines never matters.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::model::CompositionLine;

/// Units of product one line's stock allows, or `None` when the line
/// imposes no limit (`quantity <= 0`).
///
/// A ratio too large for `Decimal` saturates toward the sign of the stock.
pub fn line_limit(line: &CompositionLine) -> Option<Decimal> {
    if line.quantity <= Decimal::ZERO {
        return None;
    }
    Some(
        line.stock
            .checked_div(line.quantity)
            .unwrap_or(if line.stock.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }),
    )
}

/// `floor(min(stock / quantity))` over lines with a positive quantity.
///
/// No lines, or only lines with `quantity <= 0`, yields `0`. Negative stock
/// is not rejected: its (negative) floor comes back unchanged.
pub fn possible_units(lines: &[CompositionLine]) -> i64 {
    let Some(min) = lines.iter().filter_map(line_limit).min() else {
        return 0;
    };
    let floored = min.floor();
    floored.to_i64().unwrap_or(if floored.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// The line that determines [`possible_units`]; the first one on ties.
pub fn bottleneck(lines: &[CompositionLine]) -> Option<&CompositionLine> {
    let mut best: Option<(&CompositionLine, Decimal)> = None;
    for line in lines {
        let Some(limit) = line_limit(line) else {
            continue;
        };
        if best.is_none_or(|(_, current)| limit < current) {
            best = Some((line, limit));
        }
    }
    best.map(|(line, _)| line)
}
