//! Route handlers for the web front-end.
//!
//! Store access is synchronous file IO, so every handler hops onto the
//! blocking pool through [`blocking`].

use axum::Json;
use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, HeaderValue, Uri, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};

use crate::core::{RecordActions, RegisterLogic, RegistrationForm};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFilter;
use crate::export::json_csv::csv_bytes;
use crate::models::{Record, SubmissionMeta};
use crate::utils::date::{format_local, now_minute, parse_local_datetime};
use crate::web::error::WebResult;
use crate::web::extract::ClientIp;
use crate::web::state::AppState;
use crate::web::views::{self, ListRow};

pub const EXPORT_FILE_NAME: &str = "hardware_records.csv";

async fn blocking<T, F>(f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Server(format!("blocking task failed: {e}")))?
}

fn parse_id(raw: &str) -> AppResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid record id: '{}'", raw.trim())))
}

fn records_redirect() -> Redirect {
    Redirect::to("/records")
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub async fn index(State(state): State<AppState>) -> WebResult<Html<String>> {
    let store = state.store.clone();
    let records = blocking(move || store.list()).await?;

    let overdue = state.engine.overdue_loans(&records, now_minute());
    Ok(views::form_page(
        &state.config.responsibles,
        &views::overdue_panel(&overdue),
        state.config.max_note_len,
    ))
}

// ---------------------------------------------------------------------------
// GET /overdue
// ---------------------------------------------------------------------------

/// Bare panel fragment polled by the form page.
pub async fn overdue(State(state): State<AppState>) -> WebResult<Html<String>> {
    let store = state.store.clone();
    let records = blocking(move || store.list()).await?;

    let overdue = state.engine.overdue_loans(&records, now_minute());
    Ok(Html(views::overdue_panel(&overdue)))
}

// ---------------------------------------------------------------------------
// GET /records
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Case-insensitive text search over the visible columns.
    pub q: Option<String>,
    /// `desc` (default, newest first) or `asc`.
    pub order: Option<String>,
}

fn matches_query(record: &Record, needle: &str) -> bool {
    [
        record.responsible.as_str(),
        record.borrower(),
        record.asset_tag.as_str(),
        record.workflow.as_str(),
        record.reason_display(),
        record.hardware_display(),
        record.brand.as_str(),
        record.model.as_str(),
        record.kind().as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Sort key: parsed start date, then id. Unparseable dates sort first.
fn sort_records(records: &mut [&Record], ascending: bool) {
    records.sort_by_key(|r| (parse_local_datetime(&r.started_at), r.id));
    if !ascending {
        records.reverse();
    }
}

pub async fn records(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> WebResult<Html<String>> {
    let store = state.store.clone();
    let all = blocking(move || store.list()).await?;
    let now = now_minute();

    let pending = state.engine.compute_pending_entry_set(&all, now);
    let overdue = state.engine.overdue_loans(&all, now);

    let needle = query.q.as_deref().map(str::trim).unwrap_or("").to_lowercase();
    let ascending = query
        .order
        .as_deref()
        .is_some_and(|o| o.eq_ignore_ascii_case("asc"));

    let mut visible: Vec<&Record> = all
        .iter()
        .filter(|r| !r.hidden)
        .filter(|r| needle.is_empty() || matches_query(r, &needle))
        .collect();
    sort_records(&mut visible, ascending);

    let rows: Vec<ListRow<'_>> = visible
        .into_iter()
        .map(|record| ListRow {
            record,
            status: state.engine.compute_status(record, now),
            pending: pending.contains(&record.id),
        })
        .collect();

    Ok(views::list_page(
        &rows,
        &views::overdue_panel(&overdue),
        query.q.as_deref().unwrap_or(""),
        pending.len(),
        state.config.max_note_len,
    ))
}

// ---------------------------------------------------------------------------
// GET /export.csv
// ---------------------------------------------------------------------------

pub async fn export_csv(
    State(state): State<AppState>,
    Query(filter): Query<ExportFilter>,
) -> WebResult<Response> {
    let store = state.store.clone();
    let engine = state.engine;
    let bytes = blocking(move || {
        let records = store.list()?;
        let rows = filter.apply(&engine, &records, now_minute())?;
        tracing::info!(rows = rows.len(), "CSV export requested");
        csv_bytes(&rows)
    })
    .await?;

    let disposition = format!("attachment; filename={EXPORT_FILE_NAME}");
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(|e| AppError::Server(e.to_string()))?,
    );

    Ok((headers, bytes).into_response())
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub records: usize,
}

pub async fn health(State(state): State<AppState>) -> WebResult<Json<HealthResponse>> {
    let store = state.store.clone();
    let records = blocking(move || store.list()).await?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        records: records.len(),
    }))
}

// ---------------------------------------------------------------------------
// POST /register
// ---------------------------------------------------------------------------

pub async fn register(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Form(form): Form<RegistrationForm>,
) -> WebResult<Redirect> {
    let store = state.store.clone();
    let max_note_len = state.config.max_note_len;

    blocking(move || {
        let now = now_minute();
        let submitted = SubmissionMeta::web(ip, format_local(&now));
        RegisterLogic::apply(store.as_ref(), &form, submitted, max_note_len, now)
    })
    .await?;

    Ok(records_redirect())
}

// ---------------------------------------------------------------------------
// POST /return, /hide, /stock
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IdForm {
    pub id: String,
}

pub async fn mark_returned(
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> WebResult<Redirect> {
    let id = parse_id(&form.id)?;
    let store = state.store.clone();
    blocking(move || RecordActions::mark_returned(store.as_ref(), id)).await?;
    Ok(records_redirect())
}

pub async fn hide(State(state): State<AppState>, Form(form): Form<IdForm>) -> WebResult<Redirect> {
    let id = parse_id(&form.id)?;
    let store = state.store.clone();
    blocking(move || RecordActions::hide(store.as_ref(), id)).await?;
    Ok(records_redirect())
}

pub async fn toggle_stock(
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> WebResult<Redirect> {
    let id = parse_id(&form.id)?;
    let store = state.store.clone();
    blocking(move || RecordActions::toggle_stock(store.as_ref(), id)).await?;
    Ok(records_redirect())
}

// ---------------------------------------------------------------------------
// POST /extend
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExtendForm {
    pub id: String,
    pub due_at: String,
}

pub async fn extend(
    State(state): State<AppState>,
    Form(form): Form<ExtendForm>,
) -> WebResult<Redirect> {
    let id = parse_id(&form.id)?;
    let store = state.store.clone();
    blocking(move || RecordActions::extend_due(store.as_ref(), id, &form.due_at)).await?;
    Ok(records_redirect())
}

// ---------------------------------------------------------------------------
// POST /notes
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NoteForm {
    pub id: String,
    pub text: String,
}

/// Append a note, then send the user back where the form was posted from.
pub async fn add_note(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<NoteForm>,
) -> WebResult<Redirect> {
    let id = parse_id(&form.id)?;
    let store = state.store.clone();
    let max_len = state.config.max_note_len;
    blocking(move || {
        RecordActions::append_note(store.as_ref(), id, &form.text, max_len, now_minute())
    })
    .await?;

    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    let back = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|referer| local_path(referer, host))
        .unwrap_or_else(|| "/records".to_string());
    Ok(Redirect::to(&back))
}

/// Path and query of `referer` when it points back at this server.
fn local_path(referer: &str, host: Option<&str>) -> Option<String> {
    if referer.contains('\\') {
        return None;
    }
    let uri: Uri = referer.parse().ok()?;
    match uri.authority() {
        Some(authority) if host != Some(authority.as_str()) => return None,
        None if uri.scheme().is_some() => return None,
        _ => {}
    }

    let path = uri.path_and_query()?.as_str();
    if path.starts_with('/') && !path.starts_with("//") {
        Some(path.to_string())
    } else {
        None
    }
}
