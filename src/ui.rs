//! Plain-text and JSON rendering of a list page for the command line.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::state::{AppRecord, ListView, ViewQuery};

/// Column headers, in display order.
const HEADERS: [&str; 5] = ["NAME", "VERSION", "MARKETPLACE", "INSTALLED", "STATUS"];

/// Cell texts of one record, in [`HEADERS`] order.
fn cells(app: &AppRecord) -> [&str; 5] {
    [
        app.name.as_str(),
        app.version.as_str(),
        app.marketplace_version.as_str(),
        if app.is_installed() { "yes" } else { "no" },
        app.status.as_deref().unwrap_or("-"),
    ]
}

/// Append `text` padded with spaces to `width` display columns.
fn push_padded(out: &mut String, text: &str, width: usize) {
    out.push_str(text);
    for _ in text.width()..width {
        out.push(' ');
    }
}

/// What: Render one page as an aligned table with a footer.
///
/// Inputs:
/// - `view`: Page and filtered total
/// - `query`: Inputs the page was derived from
///
/// Output:
/// - Multi-line text ending in a newline.
///
/// Details:
/// - Columns are aligned by display width so wide characters stay aligned.
/// - The footer reads "Showing X-Y of N apps", or explains why nothing is shown.
#[must_use]
pub fn render_table(view: &ListView, query: &ViewQuery) -> String {
    let Some(items) = view.items.as_ref() else {
        return "No apps loaded.\n".to_string();
    };
    if items.is_empty() {
        return format!("No apps match \"{}\".\n", query.filter_text);
    }
    let mut widths = HEADERS.map(UnicodeWidthStr::width);
    for app in items {
        for (w, cell) in widths.iter_mut().zip(cells(app)) {
            *w = (*w).max(cell.width());
        }
    }
    let mut out = String::new();
    let rows = std::iter::once(HEADERS).chain(items.iter().map(cells));
    for row in rows {
        let mut line = String::new();
        for (i, (cell, w)) in row.iter().zip(widths).enumerate() {
            if i + 1 == HEADERS.len() {
                line.push_str(cell);
            } else {
                push_padded(&mut line, cell, w);
                line.push_str("  ");
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    let start = crate::logic::view::page_start(query.page_offset, view.total);
    let _ = writeln!(
        out,
        "Showing {}-{} of {} apps",
        start + 1,
        start + items.len(),
        view.total
    );
    out
}

/// What: Render one page as JSON.
///
/// Inputs:
/// - `view`: Page and filtered total
///
/// Output:
/// - `{"items": [...] | null, "total": N}` pretty-printed.
///
/// # Errors
/// - Returns `Err` if a record's extra fields cannot be serialized
pub fn render_json(view: &ListView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "items": view.items,
        "total": view.total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MarketplaceApp;

    fn rec(name: &str, status: Option<&str>) -> AppRecord {
        let app = MarketplaceApp {
            id: name.to_lowercase(),
            name: name.into(),
            version: "1.0".into(),
            extra: serde_json::Map::new(),
        };
        match status {
            Some(s) => AppRecord::installed(app, s.into(), "0.9".into()),
            None => AppRecord::from_marketplace(app),
        }
    }

    #[test]
    /// What: Table aligns columns and shows a range footer
    ///
    /// - Input: Two records, one installed; offset 0
    /// - Output: Header row, two aligned rows with installed flags, "Showing 1-2 of 2 apps"
    fn ui_table_alignment_and_footer() {
        let view = ListView {
            items: Some(vec![rec("Alpha", None), rec("Beta Bot", Some("enabled"))]),
            total: 2,
        };
        let out = render_table(&view, &ViewQuery::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("NAME      VERSION"));
        assert!(lines[1].starts_with("Alpha     1.0"));
        assert!(lines[0].contains("INSTALLED  STATUS"));
        assert!(lines[1].ends_with("no         -"));
        assert!(lines[2].ends_with("yes        enabled"));
        assert_eq!(lines[3], "Showing 1-2 of 2 apps");
    }

    #[test]
    /// What: Empty and unloaded views render explanatory text
    ///
    /// - Input: items None; items empty with filter "zz"
    /// - Output: "No apps loaded." and "No apps match \"zz\"."
    fn ui_table_empty_states() {
        let q = ViewQuery {
            filter_text: "zz".into(),
            ..ViewQuery::default()
        };
        assert_eq!(render_table(&ListView::default(), &q), "No apps loaded.\n");
        let empty = ListView {
            items: Some(Vec::new()),
            total: 0,
        };
        assert_eq!(render_table(&empty, &q), "No apps match \"zz\".\n");
    }

    #[test]
    /// What: JSON output carries items and total
    ///
    /// - Input: One record, total 1
    /// - Output: items[0].marketplaceVersion == "1.0", total == 1
    fn ui_json_shape() {
        let view = ListView {
            items: Some(vec![rec("Alpha", None)]),
            total: 1,
        };
        let text = render_json(&view).expect("serializable");
        let v: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(v["items"][0]["marketplaceVersion"], "1.0");
        assert_eq!(v["total"], 1);
    }
}
