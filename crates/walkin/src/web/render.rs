//! Server-rendered HTML for the four screens.
//!
//! Pages are built with `format!` into plain strings. Every value that came
//! from a customer or from the data files goes through [`escape`].

use std::fmt::Write as _;

use crate::branding::LOGO_WIDTH;
use crate::dashboard::{customers, QueueSummary};
use crate::intake::IntakeForm;
use crate::record::CustomerRecord;

const CSS: &str = r"
body{margin:0;background:#1e3a8a;color:#fff;font-family:-apple-system,system-ui,sans-serif;font-size:16px}
.container{max-width:960px;margin:0 auto;padding:1.5rem}
h1,h2,h3{color:#fff}
.logo-container{text-align:center;margin:1rem 0 2rem}
.logo-container img{max-width:100%;height:auto;border-radius:10px}
.customer-form{background:#2563eb;padding:2rem;border-radius:15px;margin:1rem auto;max-width:560px}
label{display:block;margin:.75rem 0 .25rem;font-weight:bold}
input,textarea{box-sizing:border-box;width:100%;background:#1e40af;color:#fff;border:2px solid #3b82f6;border-radius:8px;font-size:16px;padding:12px}
.row{display:flex;gap:1rem}.row>div{flex:1}
button{background:#dc2626;color:#fff;border:none;padding:.75rem 2rem;border-radius:8px;font-size:16px;font-weight:bold;cursor:pointer}
button:hover{background:#b91c1c}
button.success{background:#059669}button.success:hover{background:#047857}
button.link{background:transparent;padding:.25rem .5rem;font-size:20px}
.wide{width:100%;margin-top:1rem}
.nav{display:flex;gap:.5rem;margin-bottom:1rem}.nav form{flex:1}.nav button{width:100%}
.metrics{display:flex;gap:1rem}
.metric-container{flex:1;background:#2563eb;padding:1rem;border-radius:10px;text-align:center}
.metric-container h3{margin:.25rem 0;font-size:1.75rem}
.queue-item{display:flex;justify-content:space-between;align-items:center;background:#3b82f6;padding:1.5rem;border-radius:10px;margin:.5rem 0;border-left:4px solid #60a5fa}
.queue-item p{margin:.2rem 0}
.notice{padding:1rem;border-radius:8px;margin:1rem 0}
.notice-success{background:#059669}.notice-error{background:#b91c1c}.notice-info{background:#1d4ed8}
table{width:100%;border-collapse:collapse;background:#1e40af;border-radius:8px}
th,td{text-align:left;padding:.5rem .75rem;border-bottom:1px solid #3b82f6}
.search{display:flex;gap:.5rem;margin-bottom:1rem}
.secret{text-align:right;margin-top:2rem}
@media (max-width:1024px){button{padding:1rem 2rem;font-size:18px}input,textarea{font-size:18px;padding:16px}}
";

/// Severity of an inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Something was saved or removed.
    Success,
    /// Something went wrong.
    Error,
    /// Neutral information.
    Info,
}

/// An inline message shown above a screen's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Message text (unescaped).
    pub text: String,
}

impl Notice {
    /// A success message.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    /// An error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    /// An informational message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    fn html(&self) -> String {
        let class = match self.kind {
            NoticeKind::Success => "notice-success",
            NoticeKind::Error => "notice-error",
            NoticeKind::Info => "notice-info",
        };
        format!(
            r#"<div class="notice {class}" role="status">{}</div>"#,
            escape(&self.text)
        )
    }
}

/// Heading shared by every screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Whether a logo is available at `/logo`.
    pub has_logo: bool,
    /// Text shown when there is no logo.
    pub title: String,
}

impl Header {
    fn html(&self) -> String {
        if self.has_logo {
            format!(
                r#"<div class="logo-container"><img src="/logo" width="{LOGO_WIDTH}" alt="{}"></div>"#,
                escape(&self.title)
            )
        } else {
            format!(
                r#"<div class="logo-container"><h2>📝 {}</h2></div>"#,
                escape(&self.title)
            )
        }
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn layout(title: &str, header: &Header, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title><style>{CSS}</style></head>
<body><div class="container">{header}{body}</div></body></html>"#,
        title = escape(title),
        header = header.html(),
    )
}

fn notice_html(notice: Option<&Notice>) -> String {
    notice.map(Notice::html).unwrap_or_default()
}

/// The customer-facing intake form, pre-filled with `form`.
#[must_use]
pub fn public_page(header: &Header, form: &IntakeForm, notice: Option<&Notice>) -> String {
    let body = format!(
        r#"<h1>🌟 Welcome! Please fill out your information</h1>
{notice}
<form class="customer-form" method="post" action="/intake">
<label for="name">Full Name *</label>
<input id="name" name="name" value="{name}" placeholder="Enter your full name" autocomplete="name">
<label for="phone">Phone Number *</label>
<input id="phone" name="phone" value="{phone}" placeholder="Enter your phone number" type="tel" autocomplete="tel">
<div class="row">
<div><label for="date">Preferred Date</label><input id="date" name="date" type="date" value="{date}"></div>
<div><label for="time">Preferred Time</label><input id="time" name="time" type="time" value="{time}"></div>
</div>
<label for="notes">Additional Notes</label>
<textarea id="notes" name="notes" rows="3" placeholder="Any special requests or notes?">{notes}</textarea>
<button class="wide" type="submit">Submit Information</button>
</form>
<form class="secret" method="post" action="/backend"><button class="link" title="Backend Access" type="submit">🔧</button></form>"#,
        notice = notice_html(notice),
        name = escape(&form.name),
        phone = escape(&form.phone),
        date = escape(&form.date),
        time = escape(&form.time),
        notes = escape(&form.notes),
    );
    layout(&header.title, header, &body)
}

/// The backend password gate.
#[must_use]
pub fn login_page(header: &Header, notice: Option<&Notice>) -> String {
    let body = format!(
        r#"<h1>🔐 Backend Access</h1>
{notice}
<form class="customer-form" method="post" action="/login">
<label for="password">Enter Password</label>
<input id="password" name="password" type="password" autocomplete="current-password" autofocus>
<button class="wide" type="submit">Login</button>
</form>
<form method="post" action="/nav/public"><button class="link" type="submit">← Back</button></form>"#,
        notice = notice_html(notice),
    );
    layout("Backend Access", header, &body)
}

fn nav_bar() -> &'static str {
    r#"<div class="nav">
<form method="post" action="/nav/queue"><button type="submit">📋 Live Queue</button></form>
<form method="post" action="/nav/customers"><button type="submit">👥 All Customers</button></form>
<form method="post" action="/nav/public"><button type="submit">🌐 Public Form</button></form>
<form method="post" action="/logout"><button type="submit">🚪 Logout</button></form>
</div><hr>"#
}

/// The live queue dashboard.
#[must_use]
pub fn queue_page(header: &Header, summary: &QueueSummary, notice: Option<&Notice>) -> String {
    let mut body = String::from(nav_bar());
    body.push_str("<h1>📋 Live Queue Management</h1>");
    body.push_str(&notice_html(notice));

    let _ = write!(
        body,
        r#"<div class="metrics">
<div class="metric-container"><h3>{waiting}</h3><p>Waiting</p></div>
<div class="metric-container"><h3>{total}</h3><p>{total_label}</p></div>
<div class="metric-container"><h3>{wait}</h3><p>Est. Wait</p></div>
</div><hr>"#,
        waiting = summary.waiting_count(),
        total = summary.total_count,
        total_label = summary.total_label(),
        wait = summary.estimated_wait(),
    );

    if summary.waiting.is_empty() {
        body.push_str(&Notice::info("No customers in queue at the moment.").html());
    } else {
        body.push_str("<h2>🎯 Current Queue</h2>");
        for record in &summary.waiting {
            let notes = if record.notes.is_empty() {
                String::new()
            } else {
                format!("<p>📝 {}</p>", escape(&record.notes))
            };
            let _ = write!(
                body,
                r#"<div class="queue-item"><div>
<p><strong>{name}</strong></p>
<p>📱 {phone}</p>
<p>📅 {date} at {time}</p>
{notes}<p>⏰ Added: {added}</p>
</div>
<form method="post" action="/queue/{id}/assign"><button class="success" type="submit">✅ Assign</button></form>
</div>"#,
                name = escape(&record.name),
                phone = escape(&record.phone),
                date = record.date,
                time = record.time,
                added = record.timestamp.format("%H:%M"),
                id = record.id,
            );
        }
    }

    if summary.has_records {
        body.push_str(
            r#"<hr><form method="post" action="/queue/clear"><button type="submit">🗑️ Clear All Queue</button></form>"#,
        );
    }

    layout("Live Queue", header, &body)
}

/// The customer log dashboard, filtered by `term`.
#[must_use]
pub fn customers_page(
    header: &Header,
    records: &[CustomerRecord],
    term: &str,
    notice: Option<&Notice>,
) -> String {
    let mut body = String::from(nav_bar());
    body.push_str("<h1>👥 Customer Management</h1>");
    body.push_str(&notice_html(notice));

    if records.is_empty() {
        body.push_str(&Notice::info("No customers registered yet.").html());
        return layout("Customers", header, &body);
    }

    let _ = write!(
        body,
        r#"<form class="search" method="get" action="/">
<input name="q" value="{term}" placeholder="Search by name or phone" aria-label="Search customers">
<button type="submit">🔍 Search</button>
</form>"#,
        term = escape(term),
    );

    let filtered = customers::filter_customers(records, term);
    let _ = write!(
        body,
        "<p><strong>Total Customers: {}</strong></p>",
        filtered.len()
    );

    if filtered.is_empty() {
        body.push_str(&Notice::info("No customers found matching your search.").html());
    } else {
        body.push_str("<table><thead><tr>");
        for column in customers::CSV_HEADER {
            let _ = write!(body, "<th>{column}</th>");
        }
        body.push_str("</tr></thead><tbody>");
        for record in &filtered {
            body.push_str("<tr>");
            for cell in customers::row(record) {
                let _ = write!(body, "<td>{}</td>", escape(&cell));
            }
            body.push_str("</tr>");
        }
        body.push_str("</tbody></table>");

        let _ = write!(
            body,
            r#"<form method="get" action="/customers/export.csv">
<input type="hidden" name="q" value="{term}">
<button class="success wide" type="submit">📥 Download CSV</button>
</form>"#,
            term = escape(term),
        );
    }

    body.push_str(
        r#"<hr><form method="post" action="/customers/clear"><button type="submit">🗑️ Clear All Customers</button></form>"#,
    );

    layout("Customers", header, &body)
}
