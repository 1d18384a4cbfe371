//! Server-side HTML rendering.
//!
//! Pages are plain `format!` templates; every piece of record data goes
//! through [`escape`] before it lands in markup.

use axum::response::Html;
use chrono::NaiveDateTime;

use crate::core::register::{HARDWARE, REASONS};
use crate::models::{Record, StatusLabel};
use crate::utils::date::format_local;

const CSS: &str = r#"
    :root {
        --bg: #0f0f10; --card: #161617; --muted: #9aa0a6; --accent: #4caf50;
        --accent-2: #3aa0ff; --danger: #ff6b6b; --warn: #ffcc33;
        --input-bg: #1f1f20; --border: #2a2a2a;
        font-family: Inter, Roboto, Arial, sans-serif;
    }
    html, body { margin: 0; background: var(--bg); color: #e6e6e6; }
    a { color: var(--accent-2); }
    .card { background: var(--card); border: 1px solid var(--border); padding: 24px; border-radius: 12px;
            width: 760px; max-width: calc(100vw - 80px); margin: 20px auto; }
    .card.wide { width: auto; max-width: calc(100vw - 40px); }
    .topbar { display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px; gap: 8px; }
    h1 { margin: 0 0 12px 0; font-size: 20px; }
    label { display: block; margin-top: 12px; color: var(--muted); font-size: 13px; }
    input[type="text"], select, textarea { width: 100%; box-sizing: border-box; padding: 10px 12px; margin-top: 6px;
            background: var(--input-bg); border: 1px solid var(--border); color: #eaeaea; border-radius: 8px; font-size: 14px; }
    textarea { min-height: 70px; resize: vertical; }
    .two-columns { display: flex; gap: 12px; } .two-columns > * { flex: 1; }
    .row-right { display: flex; justify-content: flex-end; gap: 10px; margin-top: 14px; }
    button { cursor: pointer; border-radius: 8px; border: 1px solid var(--border); padding: 6px 10px;
             background: transparent; color: var(--muted); }
    button.primary { background: var(--accent); color: #061006; border: none; padding: 10px 16px; font-weight: 600; }
    button.danger { background: var(--danger); color: #160000; border: none; }
    button.ok { background: var(--accent); color: #062009; border: none; }
    .link-btn { color: var(--muted); text-decoration: none; border: 1px solid var(--border); padding: 8px 12px; border-radius: 8px; }
    table { width: 100%; border-collapse: collapse; font-size: 13px; }
    th, td { border-bottom: 1px solid var(--border); padding: 6px 8px; text-align: left; vertical-align: top; }
    th { color: var(--muted); }
    form.inline { display: inline-flex; gap: 4px; margin: 0 2px 0 0; }
    form.inline input[type="text"] { width: 130px; padding: 4px 6px; margin: 0; }
    .actions { display: flex; flex-wrap: wrap; gap: 4px; }
    .status-overdue { color: var(--danger); font-weight: 700; }
    .status-active { color: var(--accent); }
    .status-in_stock { color: var(--accent-2); }
    .status-returned { color: var(--muted); }
    tr.pending td:first-child { border-left: 4px solid var(--warn); }
    .badge-pending { color: var(--warn); font-size: 11px; margin-left: 4px; }
    .panel-overdue { padding: 10px; border-left: 4px solid var(--danger); background: #33111166; border-radius: 6px; margin-bottom: 12px; }
    .panel-overdue ul { margin: 6px 0 0 18px; padding: 0; } .panel-overdue li { color: #ff9999; margin-bottom: 4px; }
    .notes { color: var(--muted); font-size: 12px; margin: 4px 0; padding-left: 16px; }
    .muted { color: var(--muted); font-size: 13px; }
"#;

/// Minimal HTML escaping for text and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn render_page(title: &str, content: &str) -> Html<String> {
    Html(format!(
        r#"<!doctype html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1"><title>{title}</title><style>{CSS}</style></head><body>{content}</body></html>"#,
        title = escape(title),
    ))
}

pub fn error_page(message: &str) -> Html<String> {
    let content = format!(
        r#"<div class="card"><h1>Error</h1><p>{}</p><p><a href="/">Back</a></p></div>"#,
        escape(message)
    );
    render_page("Error", &content)
}

/// Overdue loans panel; empty string when nothing is overdue.
pub fn overdue_panel(overdue: &[(&Record, NaiveDateTime)]) -> String {
    if overdue.is_empty() {
        return String::new();
    }

    let items: String = overdue
        .iter()
        .map(|(r, due)| {
            format!(
                "<li><strong>ID {}</strong> · {} · Asset: {} · Due: {}</li>",
                r.id,
                escape(r.borrower()),
                escape(&r.asset_tag),
                format_local(due)
            )
        })
        .collect();

    format!(r#"<div class="panel-overdue"><b style="color:var(--danger)">Overdue loans:</b><ul>{items}</ul></div>"#)
}

fn options(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!(r#"<option value="{v}">{label}</option>"#, v = escape(v), label = escape(&capitalize(v))))
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Registration form with the live overdue panel.
pub fn form_page(responsibles: &[String], overdue_html: &str, max_note_len: usize) -> Html<String> {
    let responsible_opts: String = responsibles
        .iter()
        .map(|r| format!(r#"<option value="{v}">{v}</option>"#, v = escape(r)))
        .collect();

    let content = format!(
        r#"<div class="card">
  <div class="topbar"><h1>Register movement</h1><a class="link-btn" href="/records">View records</a></div>
  <div id="overdue">{overdue_html}</div>
  <form method="POST" action="/register">
    <label>Kind</label>
    <select name="kind" id="kind" onchange="toggleLoan()" required>
      <option value="" disabled selected>Select the kind...</option>
      <option value="entry">Entry</option><option value="exit">Exit</option><option value="loan">Loan</option>
    </select>
    <label>Responsible</label>
    <select name="responsible" required><option value="" disabled selected>Select the responsible...</option>{responsible_opts}</select>
    <div class="two-columns">
      <div><label>Asset tag (7+ digits)</label><input type="text" name="asset_tag" pattern="\d{{7,}}" inputmode="numeric" placeholder="1234567" required></div>
      <div><label>Workflow</label><input type="text" name="workflow" placeholder="P-1234567"></div>
      <div><label>Date</label><input type="text" name="started_at" id="started_at" placeholder="DD/MM/YYYY HH:MM" required></div>
    </div>
    <label>Reason</label>
    <select name="reason" id="reason" onchange="toggleOther('reason')" required><option value="" disabled selected>Select the reason...</option>{reasons}</select>
    <div id="reason_detail_div" style="display:none"><label>Describe the reason</label><textarea name="reason_detail"></textarea></div>
    <label>Hardware</label>
    <select name="hardware" id="hardware" onchange="toggleOther('hardware')" required><option value="" disabled selected>Select the hardware...</option>{hardware}</select>
    <div id="hardware_detail_div" style="display:none"><label>Describe the hardware</label><input type="text" name="hardware_detail"></div>
    <div class="two-columns">
      <div><label>Brand</label><input type="text" name="brand"></div>
      <div><label>Model</label><input type="text" name="model"></div>
    </div>
    <div id="loan_fields" style="display:none" class="two-columns">
      <div><label>Borrowed by</label><input type="text" name="borrower"></div>
      <div><label>Due date</label><input type="text" name="due_at" placeholder="DD/MM/YYYY HH:MM"></div>
    </div>
    <label>Note</label>
    <textarea name="note" maxlength="{max_note_len}" placeholder="Up to {max_note_len} characters"></textarea>
    <div class="row-right"><button type="reset">Clear</button><button class="primary" type="submit">Save</button></div>
  </form>
</div>
<script>
  function pad(n) {{ return String(n).padStart(2, '0'); }}
  function nowLocal() {{
    const d = new Date();
    return pad(d.getDate()) + '/' + pad(d.getMonth() + 1) + '/' + d.getFullYear() + ' ' + pad(d.getHours()) + ':' + pad(d.getMinutes());
  }}
  function toggleLoan() {{
    document.getElementById('loan_fields').style.display = document.getElementById('kind').value === 'loan' ? 'flex' : 'none';
  }}
  function toggleOther(name) {{
    document.getElementById(name + '_detail_div').style.display = document.getElementById(name).value === 'other' ? 'block' : 'none';
  }}
  document.getElementById('started_at').value = nowLocal();
  setInterval(function () {{
    fetch('/overdue').then(r => r.text()).then(html => {{ document.getElementById('overdue').innerHTML = html; }}).catch(() => {{}});
  }}, 60000);
</script>"#,
        reasons = options(&REASONS),
        hardware = options(&HARDWARE),
    );

    render_page("Hardware control", &content)
}

/// One line of the list view.
pub struct ListRow<'a> {
    pub record: &'a Record,
    pub status: StatusLabel,
    pub pending: bool,
}

fn hidden_id(id: u64) -> String {
    format!(r#"<input type="hidden" name="id" value="{id}">"#)
}

fn row_actions(row: &ListRow<'_>) -> String {
    let r = row.record;
    let mut html = String::new();
    let open = !r.returned;

    if open && (r.is_loan() || r.is_entry()) {
        html.push_str(&format!(
            r#"<form class="inline" method="POST" action="/return">{}<button class="ok" type="submit" title="Mark as returned">Return</button></form>"#,
            hidden_id(r.id)
        ));
    }
    if open && r.is_loan() {
        html.push_str(&format!(
            r#"<form class="inline" method="POST" action="/extend">{}<input type="text" name="due_at" placeholder="DD/MM/YYYY HH:MM" value="{}"><button type="submit" title="Extend loan">Extend</button></form>"#,
            hidden_id(r.id),
            escape(r.due_at().unwrap_or(""))
        ));
    }
    if open && r.is_entry() {
        let label = if r.in_stock() { "Unstock" } else { "Stock" };
        html.push_str(&format!(
            r#"<form class="inline" method="POST" action="/stock">{}<button type="submit">{label}</button></form>"#,
            hidden_id(r.id)
        ));
    }
    html.push_str(&format!(
        r#"<form class="inline" method="POST" action="/hide" onsubmit="return confirm('Delete this record?');">{}<button class="danger" type="submit" title="Delete record">Delete</button></form>"#,
        hidden_id(r.id)
    ));

    format!(r#"<div class="actions">{html}</div>"#)
}

fn notes_cell(r: &Record, max_note_len: usize) -> String {
    let items: String = r
        .notes
        .iter()
        .map(|n| format!("<li>{} · {}</li>", escape(&n.recorded_at), escape(&n.text)))
        .collect();
    let list = if items.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="notes">{items}</ul>"#)
    };

    format!(
        r#"<details><summary>{count}</summary>{list}<form class="inline" method="POST" action="/notes">{id}<input type="text" name="text" maxlength="{max_note_len}" placeholder="New note"><button type="submit">Add</button></form></details>"#,
        count = r.notes.len(),
        id = hidden_id(r.id),
    )
}

/// The records report.
pub fn list_page(
    rows: &[ListRow<'_>],
    overdue_html: &str,
    query: &str,
    pending_count: usize,
    max_note_len: usize,
) -> Html<String> {
    let body: String = if rows.is_empty() {
        r#"<tr><td colspan="13" class="muted">No records.</td></tr>"#.to_string()
    } else {
        rows.iter()
            .map(|row| {
                let r = row.record;
                let pending_badge = if row.pending {
                    r#"<span class="badge-pending">pending</span>"#
                } else {
                    ""
                };
                format!(
                    r#"<tr data-id="{id}"{tr_class}><td>{id}</td><td>{kind}</td><td>{responsible}</td><td>{borrower}</td><td>{asset}</td><td>{workflow}</td><td>{reason}</td><td>{hardware}</td><td>{brand} {model}</td><td>{start}</td><td>{due}</td><td class="status-{tag}">{status}{pending_badge}</td><td>{notes}</td><td>{actions}</td></tr>"#,
                    id = r.id,
                    tr_class = if row.pending { r#" class="pending""# } else { "" },
                    kind = r.kind().label(),
                    responsible = escape(&r.responsible),
                    borrower = escape(r.borrower()),
                    asset = escape(&r.asset_tag),
                    workflow = escape(&r.workflow),
                    reason = escape(r.reason_display()),
                    hardware = escape(r.hardware_display()),
                    brand = escape(&r.brand),
                    model = escape(&r.model),
                    start = escape(&r.started_at),
                    due = escape(r.due_at().unwrap_or("")),
                    tag = row.status.tag(),
                    status = escape(&row.status.to_string()),
                    notes = notes_cell(r, max_note_len),
                    actions = row_actions(row),
                )
            })
            .collect()
    };

    let content = format!(
        r#"<div class="card wide">
  <div class="topbar">
    <h1>Records ({total})</h1>
    <form method="GET" action="/records" style="display:flex;gap:6px;margin:0">
      <input type="text" name="q" value="{q}" placeholder="Search..." style="margin:0;width:220px">
      <button type="submit">Filter</button>
    </form>
    <div style="display:flex;gap:6px">
      <a class="link-btn" href="/records?order=asc">Oldest first</a>
      <a class="link-btn" href="/export.csv">Export CSV</a>
      <a class="link-btn" href="/">New movement</a>
    </div>
  </div>
  {overdue_html}
  <p class="muted">{pending_count} entries pending for more than a week without exit or note.</p>
  <table id="records">
    <thead><tr><th>ID</th><th>Kind</th><th>Responsible</th><th>Borrower</th><th>Asset</th><th>Workflow</th><th>Reason</th><th>Hardware</th><th>Brand / model</th><th>Date</th><th>Due</th><th>Status</th><th>Notes</th><th>Actions</th></tr></thead>
    <tbody>{body}</tbody>
  </table>
</div>"#,
        total = rows.len(),
        q = escape(query),
    );

    render_page("Records", &content)
}
