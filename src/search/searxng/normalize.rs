// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Flattening of SearXNG documents into search records

use serde_json::{Number, Value};

use crate::search::types::{empty_object, zero_score, ImageRecord, PageRecord, SearchRecord};

/// Normalize a SearXNG JSON document
///
/// Emits one page per `results` entry, then one image per `images` entry,
/// each in document order. Missing or mistyped fields become empty values;
/// this never fails.
pub fn normalize(raw: &Value) -> Vec<SearchRecord> {
    let pages = entries(raw, "results").map(|entry| SearchRecord::Page(page_record(entry)));
    let images = entries(raw, "images").map(|entry| SearchRecord::Image(image_record(entry)));
    pages.chain(images).collect()
}

fn page_record(entry: &Value) -> PageRecord {
    PageRecord {
        title: str_field(entry, "title"),
        url: str_field(entry, "url"),
        content: str_field(entry, "content"),
        score: score_field(entry),
        engine: str_field(entry, "engine"),
        parsed_url: entry
            .get("parsed_url")
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(empty_object),
        published_date: None,
    }
}

fn image_record(entry: &Value) -> ImageRecord {
    let source = str_field(entry, "source");
    ImageRecord {
        image_url: str_field(entry, "img_src"),
        image_description: str_field(entry, "title"),
        source_url: if source.is_empty() {
            str_field(entry, "url")
        } else {
            source
        },
        engine: str_field(entry, "engine"),
    }
}

pub(crate) fn entries<'a>(raw: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    raw.get(key).and_then(Value::as_array).into_iter().flatten()
}

/// Numeric `score`, kept as given; anything else counts as 0
pub(crate) fn score_field(entry: &Value) -> Number {
    match entry.get("score") {
        Some(Value::Number(n)) => n.clone(),
        _ => zero_score(),
    }
}

pub(crate) fn str_field(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
