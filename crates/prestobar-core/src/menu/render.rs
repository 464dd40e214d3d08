//! BitBar/xbar/SwiftBar plugin text protocol.
//!
//! ```text
//! $10.00 | color=green image=iVBOR... dropdown=false
//! ---
//! PRESTO system last updated 2 hours ago | color=green href=https://prestocard.ca
//! ---
//! Fare payments ($42.90)
//! --2024 Jan ($6.60) | color=white
//! -----
//! --2024 Feb ($36.30) | color=white
//! ```

use super::types::{MenuItem, MenuLine};

/// Marker the host renders as a horizontal rule
const SEPARATOR: &str = "---";

/// Prefix added per submenu level
const LEVEL_PREFIX: &str = "--";

/// Stands in for '-' at the start of item text
const ESCAPED_DASH: char = '\u{2010}';

/// Render a menu to plugin output, one line per item, newline-terminated
pub fn render(lines: &[MenuLine]) -> String {
    let mut out = String::new();
    render_level(lines, 0, &mut out);
    out
}

fn render_level(lines: &[MenuLine], depth: usize, out: &mut String) {
    let prefix = LEVEL_PREFIX.repeat(depth);
    for line in lines {
        match line {
            MenuLine::Separator => {
                out.push_str(&prefix);
                out.push_str(SEPARATOR);
                out.push('\n');
            }
            MenuLine::Item(item) => {
                out.push_str(&prefix);
                out.push_str(&render_item(item));
                out.push('\n');
                render_level(&item.submenu, depth + 1, out);
            }
        }
    }
}

fn render_item(item: &MenuItem) -> String {
    let text = sanitize_text(&item.text);

    let mut attrs = Vec::new();
    if let Some(color) = &item.color {
        attrs.push(format!("color={}", color));
    }
    if let Some(href) = &item.href {
        attrs.push(format!("href={}", href));
    }
    if let Some(image) = &item.image {
        attrs.push(format!("image={}", image));
    }
    if let Some(dropdown) = item.dropdown {
        attrs.push(format!("dropdown={}", dropdown));
    }

    if attrs.is_empty() {
        text
    } else {
        format!("{} | {}", text, attrs.join(" "))
    }
}

/// Keep one item on one line, out of the attribute section and at its own level.
///
/// A leading "--" would be read as nesting or a separator, so that run of
/// dashes is swapped for hyphens. A single leading '-' ("-$3.00") is kept.
fn sanitize_text(text: &str) -> String {
    let text = text.replace(['\r', '\n'], " ").replace('|', "¦");
    if !text.starts_with(LEVEL_PREFIX) {
        return text;
    }

    let rest = text.trim_start_matches('-');
    let dashes = text.len() - rest.len();
    let mut escaped: String = std::iter::repeat_n(ESCAPED_DASH, dashes).collect();
    escaped.push_str(rest);
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_flat_items() {
        let menu = vec![
            MenuItem::new("$10.00").color("green").dropdown(false).into(),
            MenuLine::Separator,
            MenuItem::new("Updated")
                .color("green")
                .href("https://prestocard.ca")
                .into(),
        ];
        assert_eq!(
            render(&menu),
            "$10.00 | color=green dropdown=false\n---\nUpdated | color=green href=https://prestocard.ca\n"
        );
    }

    #[test]
    fn test_render_submenu_prefixes() {
        let menu = vec![MenuItem::new("Fare payments ($6.60)")
            .submenu(vec![
                MenuItem::new("2024 Jan ($3.30)").color("white").into(),
                MenuLine::Separator,
                MenuItem::new("2024 Feb ($3.30)")
                    .submenu(vec![MenuItem::new("nested").into()])
                    .into(),
            ])
            .into()];
        assert_eq!(
            render(&menu),
            "Fare payments ($6.60)\n--2024 Jan ($3.30) | color=white\n-----\n--2024 Feb ($3.30)\n----nested\n"
        );
    }

    #[test]
    fn test_render_sanitizes_text() {
        let menu = vec![MenuItem::new("error: a | b\nc").into()];
        assert_eq!(render(&menu), "error: a ¦ b c\n");
    }

    #[test]
    fn test_render_escapes_leading_dashes() {
        let menu = vec![
            MenuItem::new("---").color("orange").into(),
            MenuItem::new("--nested?").into(),
            MenuItem::new("-$3.00").into(),
        ];
        assert_eq!(
            render(&menu),
            "\u{2010}\u{2010}\u{2010} | color=orange\n\u{2010}\u{2010}nested?\n-$3.00\n"
        );
    }

    #[test]
    fn test_render_image_attribute() {
        let menu = vec![MenuItem::new(":warning:")
            .image(Some("iVBORw==".to_string()))
            .into()];
        assert_eq!(render(&menu), ":warning: | image=iVBORw==\n");
    }
}
