//! HTML rendering for the dashboard and its error page

use crate::models::analysis::AnalysisSummary;
use crate::models::market::Asset;

const STYLE: &str = r#"
body { background: #111; color: #ddd; font-family: sans-serif; margin: 2rem; }
h1 { font-size: 1.5rem; }
form { margin-bottom: 1.5rem; }
select, input, button { background: #222; color: #ddd; border: 1px solid #444; padding: 0.3rem; }
table.summary { border-collapse: collapse; margin-bottom: 1.5rem; }
table.summary th, table.summary td { border: 1px solid #333; padding: 0.4rem 0.8rem; text-align: left; }
.signal-Buy { color: #00cc96; font-weight: bold; }
.signal-Sell { color: #ef553b; font-weight: bold; }
.signal-Hold { color: #aaa; font-weight: bold; }
.error { color: #ef553b; }
"#;

/// Everything the dashboard page shows
pub struct DashboardView<'a> {
    pub assets: &'a [Asset],
    pub selected: &'a str,
    pub days: u32,
    pub summary: &'a AnalysisSummary,
    pub chart_svg: &'a str,
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Asset `<option>` list. The selected id is always present, even when the
/// listing does not contain it.
fn asset_options(assets: &[Asset], selected: &str) -> String {
    let mut html = String::new();
    if !assets.iter().any(|a| a.id == selected) {
        html.push_str(&format!(
            "<option value=\"{id}\" selected>{id}</option>\n",
            id = escape_html(selected)
        ));
    }
    for asset in assets {
        let marker = if asset.id == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape_html(&asset.id),
            marker,
            escape_html(&asset.label())
        ));
    }
    html
}

fn selector_form(assets: &[Asset], selected: &str, days: u32) -> String {
    format!(
        concat!(
            "<form method=\"post\" action=\"/\">\n",
            "<label for=\"coin\">Coin</label>\n",
            "<select id=\"coin\" name=\"coin\">\n{options}</select>\n",
            "<label for=\"days\">Days</label>\n",
            "<input id=\"days\" name=\"days\" type=\"number\" min=\"1\" max=\"365\" value=\"{days}\">\n",
            "<button type=\"submit\">Analyze</button>\n",
            "</form>\n"
        ),
        options = asset_options(assets, selected),
        days = days,
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape_html(title),
    )
}

pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    let summary = view.summary;
    let mut body = String::new();

    body.push_str("<h1>Crypto Dashboard</h1>\n");
    body.push_str(&selector_form(view.assets, view.selected, view.days));
    body.push_str(&format!(
        "<h2>{}</h2>\n",
        escape_html(&view.selected.to_uppercase())
    ));

    let rows = [
        ("Price", escape_html(&summary.price)),
        ("Market Cap", escape_html(&summary.market_cap)),
        ("Volume / Market Cap", escape_html(&summary.volume_percent)),
        ("Volume Ratio (7 / all)", escape_html(&summary.vol_ratio)),
        (
            "Signal",
            format!(
                "<span class=\"signal-{signal}\">{signal}</span>",
                signal = summary.signal
            ),
        ),
        ("Updated", escape_html(&summary.time)),
    ];
    body.push_str("<table class=\"summary\">\n");
    for (label, value) in rows {
        body.push_str(&format!("<tr><th>{}</th><td>{}</td></tr>\n", label, value));
    }
    body.push_str("</table>\n");

    body.push_str("<div class=\"chart\">\n");
    body.push_str(view.chart_svg);
    body.push_str("\n</div>\n");

    page(&format!("{} | Crypto Dashboard", view.selected), &body)
}

/// Error page that still lets the user pick another asset
pub fn render_error_page(message: &str, assets: &[Asset], selected: &str, days: u32) -> String {
    let mut body = String::new();
    body.push_str("<h1>Crypto Dashboard</h1>\n");
    body.push_str(&selector_form(assets, selected, days));
    body.push_str(&format!(
        "<p class=\"error\">{}</p>\n",
        escape_html(message)
    ));
    page("Error | Crypto Dashboard", &body)
}
