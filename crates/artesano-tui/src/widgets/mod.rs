//! Small rendering helpers shared by the screens.

pub mod form_field;
pub mod pager;
pub mod sub_tabs;

use ratatui::layout::Rect;
use rust_decimal::Decimal;

/// A `width` × `height` rectangle centered in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Move a row selection by `delta`, clamped to `len` rows.
pub fn step_selection(selected: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = selected.unwrap_or(0).min(len - 1);
    Some(current.saturating_add_signed(delta).min(len - 1))
}

/// Keep a selection valid after the rows changed underneath it.
pub fn clamp_selection(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(selected.unwrap_or(0).min(len - 1))
    }
}

/// Decimal without trailing zeros (`12.50` → `12.5`).
pub fn fmt_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Price with two decimals.
pub fn fmt_price(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect(100, 100, area);
        assert_eq!(r, Rect::new(2, 1, 36, 8));
    }

    #[test]
    fn selection_stays_in_bounds() {
        assert_eq!(step_selection(Some(0), 3, -1), Some(0));
        assert_eq!(step_selection(Some(1), 3, 5), Some(2));
        assert_eq!(step_selection(None, 0, 1), None);
        assert_eq!(clamp_selection(Some(7), 2), Some(1));
        assert_eq!(clamp_selection(Some(0), 0), None);
    }

    #[test]
    fn decimals_drop_trailing_zeros() {
        assert_eq!(fmt_decimal(Decimal::new(1250, 2)), "12.5");
        assert_eq!(fmt_price(Decimal::new(15, 0)), "15.00");
    }
}
