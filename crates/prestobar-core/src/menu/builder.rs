//! Assembly of the concrete menus shown by the plugin.

use crate::aggregate::FareSummary;
use crate::money::format_dollars;

use super::types::{MenuItem, MenuLine};

/// Title of the fare payment submenu
const FARE_PAYMENTS_TITLE: &str = "Fare payments";

/// "Fare payments ($<total>)" with one leaf per month and separators between.
pub fn fare_payments_menu(summary: &FareSummary, leaf_color: &str) -> MenuItem {
    let leaves: Vec<MenuItem> = summary
        .months
        .iter()
        .map(|month| {
            MenuItem::new(format!("{} ({})", month.label, format_dollars(month.total)))
                .color(leaf_color)
        })
        .collect();

    let mut submenu = Vec::with_capacity(leaves.len() * 2);
    let last = leaves.len().saturating_sub(1);
    for (i, leaf) in leaves.into_iter().enumerate() {
        submenu.push(MenuLine::Item(leaf));
        if i != last {
            submenu.push(MenuLine::Separator);
        }
    }

    MenuItem::new(format!(
        "{} ({})",
        FARE_PAYMENTS_TITLE,
        format_dollars(summary.grand_total)
    ))
    .submenu(submenu)
}

/// Two-line warning payload: a title glyph and one dropdown message
pub fn notice(
    icon: Option<String>,
    title: &str,
    message: &str,
    warning_color: &str,
) -> Vec<MenuLine> {
    vec![
        MenuItem::new(title)
            .image(icon)
            .color(warning_color)
            .dropdown(false)
            .into(),
        MenuLine::Separator,
        MenuItem::new(message)
            .color(warning_color)
            .dropdown(true)
            .into(),
    ]
}

/// Inputs of the full balance view
pub struct BalanceView<'a> {
    pub icon: Option<String>,
    /// Balance exactly as the service displays it
    pub balance_text: &'a str,
    pub balance_color: &'a str,
    /// Relative time of the last card system update, e.g. "2 hours ago"
    pub updated_phrase: &'a str,
    pub freshness_color: &'a str,
    pub url: &'a str,
    pub fares: MenuItem,
}

/// Title, last-updated status line and fare payment history
pub fn balance_view(view: BalanceView<'_>) -> Vec<MenuLine> {
    vec![
        MenuItem::new(view.balance_text)
            .image(view.icon)
            .color(view.balance_color)
            .dropdown(false)
            .into(),
        MenuLine::Separator,
        MenuItem::new(format!(
            "PRESTO system last updated {}",
            view.updated_phrase
        ))
        .href(view.url)
        .color(view.freshness_color)
        .into(),
        MenuLine::Separator,
        view.fares.into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::MonthlyTotals;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn summary(months: &[(&str, rust_decimal::Decimal)]) -> FareSummary {
        let mut totals = MonthlyTotals::new();
        let mut grand_total = rust_decimal::Decimal::ZERO;
        for (label, amount) in months {
            totals.add(label, *amount);
            grand_total += *amount;
        }
        FareSummary {
            months: totals,
            grand_total,
        }
    }

    #[test]
    fn test_separator_only_between_leaves() {
        let menu = fare_payments_menu(
            &summary(&[("2024 Jan", dec!(6.60)), ("2024 Feb", dec!(3.30))]),
            "white",
        );

        assert_eq!(menu.text, "Fare payments ($9.90)");
        assert_eq!(menu.submenu.len(), 3);
        assert_eq!(
            menu.submenu.iter().filter(|l| l.is_separator()).count(),
            1
        );
        assert!(menu.submenu[1].is_separator());
        assert_eq!(
            menu.submenu[0].as_item().map(|i| i.text.as_str()),
            Some("2024 Jan ($6.60)")
        );
        assert_eq!(
            menu.submenu[2].as_item().map(|i| i.text.as_str()),
            Some("2024 Feb ($3.30)")
        );
        assert_eq!(
            menu.submenu[2].as_item().and_then(|i| i.color.as_deref()),
            Some("white")
        );
    }

    #[test]
    fn test_single_month_has_no_separator() {
        let menu = fare_payments_menu(&summary(&[("2024 Jan", dec!(3.30))]), "white");
        assert_eq!(menu.submenu.len(), 1);
        assert!(!menu.submenu[0].is_separator());
    }

    #[test]
    fn test_empty_history() {
        let menu = fare_payments_menu(&FareSummary::default(), "white");
        assert_eq!(menu.text, "Fare payments ($0.00)");
        assert!(menu.submenu.is_empty());
    }

    #[test]
    fn test_notice_shape() {
        let lines = notice(None, ":warning:", "Bad credentials?", "orange");
        assert_eq!(lines.len(), 3);
        let title = lines[0].as_item().expect("title item");
        assert_eq!(title.dropdown, Some(false));
        assert_eq!(title.color.as_deref(), Some("orange"));
        assert!(lines[1].is_separator());
        let message = lines[2].as_item().expect("message item");
        assert_eq!(message.text, "Bad credentials?");
        assert_eq!(message.dropdown, Some(true));
    }
}
