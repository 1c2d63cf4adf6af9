//! Translation of loosely-typed list parameters into a MongoDB predicate
//! plus a pagination window.
//!
//! Every clause is AND-combined and omitted entirely when its input is
//! absent, empty, or "all" — an omitted clause must not restrict results.
//! The non-empty hygiene clause is the only one that is always present.

use crate::dtos::DocumentListParams;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use mongodb::bson::{doc, DateTime as BsonDateTime, Document as BsonDocument};
use service_core::error::AppError;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// A fully resolved query: predicate (without the window) plus skip/take.
#[derive(Debug, Clone)]
pub struct DocumentQuery {
    pub predicate: BsonDocument,
    pub page: u64,
    pub limit: u64,
    pub skip: u64,
    /// True when no clause beyond hygiene applies; gates seed bootstrap.
    pub unfiltered: bool,
}

pub fn build(params: &DocumentListParams) -> Result<DocumentQuery, AppError> {
    let mut clauses = vec![doc! {
        "name": { "$ne": "" },
        "origin": { "$ne": "" },
        "type": { "$ne": "" },
    }];

    if let Some(search) = text_input(&params.search) {
        clauses.push(doc! {
            "$or": [
                { "name": contains(search) },
                { "origin": contains(search) },
                { "type": contains(search) },
            ],
        });
    }

    if let Some(doc_type) = select_input(&params.doc_type) {
        clauses.push(doc! { "type": doc_type });
    }

    if let Some(origin) = select_input(&params.origin) {
        clauses.push(doc! { "origin": origin });
    }

    if let Some(date) = text_input(&params.date) {
        let (start, end) = day_window(date)?;
        clauses.push(doc! { "createdAt": { "$gte": start, "$lt": end } });
    }

    // Independent of the `type` clause above: both may be supplied, and
    // contradictory values legitimately match nothing.
    if let Some(document_type) = select_input(&params.document_type) {
        clauses.push(doc! { "type": document_type });
    }

    if let Some(emitter) = text_input(&params.emitter) {
        clauses.push(doc! { "emitter": contains(emitter) });
    }

    // Currency filters are substring matches against the formatted string,
    // not numeric comparisons: "200" matches "R$ 200,00" and "R$ 1.200,00".
    if let Some(tribute) = text_input(&params.tribute_value) {
        clauses.push(doc! { "tributeValue": contains(tribute) });
    }

    if let Some(liquid) = text_input(&params.liquid_value) {
        clauses.push(doc! { "liquidValue": contains(liquid) });
    }

    let unfiltered = clauses.len() == 1;
    let page = parse_window_param(&params.page, "page", 1)?.max(1);
    let limit = parse_window_param(&params.limit, "limit", DEFAULT_PAGE_SIZE)?
        .clamp(1, MAX_PAGE_SIZE);

    // The window math must not wrap for arbitrary numeric input.
    let skip = page
        .saturating_sub(1)
        .checked_mul(limit)
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Invalid page parameter: {}", page)))?;

    Ok(DocumentQuery {
        predicate: doc! { "$and": clauses },
        page,
        limit,
        skip,
        unfiltered,
    })
}

/// Case-insensitive contains clause; user text is escaped so characters
/// like `$` and `.` in currency strings match literally.
fn contains(text: &str) -> BsonDocument {
    doc! { "$regex": regex::escape(text), "$options": "i" }
}

/// Free-text input: present and non-empty after trimming, otherwise None.
fn text_input(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Select-control input: like text, but the "all" sentinel means no filter.
fn select_input(value: &Option<String>) -> Option<&str> {
    text_input(value).filter(|v| *v != "all")
}

/// Half-open one-day window `[date 00:00, date+1d 00:00)` in UTC.
fn day_window(date: &str) -> Result<(BsonDateTime, BsonDateTime), AppError> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid date filter: {}", date)))?;
    let start = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
    let end = start + Duration::days(1);
    Ok((BsonDateTime::from_chrono(start), BsonDateTime::from_chrono(end)))
}

fn parse_window_param(
    value: &Option<String>,
    name: &str,
    default: u64,
) -> Result<u64, AppError> {
    match text_input(value) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid {} parameter: {}", name, raw))),
    }
}
