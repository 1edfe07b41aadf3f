use std::fmt::Write;

use crate::accumulator::DisplayTotals;

/// 页面上展示的用户信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardInfo {
    pub name: String,
    pub ip: String,
    pub phone: String,
    pub interface: String,
}

pub fn render_dashboard(info: &DashboardInfo, totals: &DisplayTotals) -> String {
    let mut page = String::with_capacity(2048);
    let status_class = if totals.over_cap() { "over" } else { "ok" };

    page.push_str(concat!(
        "<!DOCTYPE html>\n",
        "<html lang=\"en\">\n",
        "<head>\n",
        "<meta charset=\"utf-8\">\n",
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        "<title>Traffic Dashboard</title>\n",
        "<style>\n",
        "body{font-family:sans-serif;max-width:40em;margin:2em auto;padding:0 1em;color:#222}\n",
        "table{border-collapse:collapse;width:100%}\n",
        "td{padding:.4em;border-bottom:1px solid #ddd}\n",
        "td.value{text-align:right;font-variant-numeric:tabular-nums}\n",
        ".bar{background:#eee;height:1em;border-radius:.5em;overflow:hidden}\n",
        ".bar>div{height:100%;background:#4a90d9}\n",
        ".over .bar>div{background:#d9534f}\n",
        ".over .remaining{color:#d9534f;font-weight:bold}\n",
        "</style>\n",
        "</head>\n",
    ));

    // 写入 String 不会失败
    let _ = write!(
        page,
        concat!(
            "<body class=\"{status}\">\n",
            "<h1>{name}</h1>\n",
            "<p>IP: {ip} &middot; Phone: {phone} &middot; Interface: {interface}</p>\n",
            "<div class=\"bar\"><div style=\"width:{percent:.1}%\"></div></div>\n",
            "<table>\n",
            "<tr><td>Received</td><td class=\"value\">{received:.2} GB</td></tr>\n",
            "<tr><td>Transmitted</td><td class=\"value\">{transmitted:.2} GB</td></tr>\n",
            "<tr><td>Total</td><td class=\"value\">{total:.2} GB</td></tr>\n",
            "<tr><td>Cap</td><td class=\"value\">{cap:.2} GB</td></tr>\n",
            "<tr><td>Remaining</td><td class=\"value remaining\">{remaining:.2} GB</td></tr>\n",
            "</table>\n",
        ),
        status = status_class,
        name = escape_html(&info.name),
        ip = escape_html(&info.ip),
        phone = escape_html(&info.phone),
        interface = escape_html(&info.interface),
        percent = totals.usage_percent(),
        received = totals.received_gb,
        transmitted = totals.transmitted_gb,
        total = totals.total_gb,
        cap = totals.cap_gb,
        remaining = totals.remaining_gb,
    );

    if totals.over_cap() {
        page.push_str("<p class=\"remaining\">Traffic cap exceeded.</p>\n");
    }
    page.push_str("</body>\n</html>\n");
    page
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
