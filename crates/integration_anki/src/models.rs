//! AnkiConnect wire types

use serde::{Deserialize, Serialize};

/// Request envelope shared by every action
#[derive(Debug, Serialize)]
pub(crate) struct AnkiRequest<'a> {
    pub action: &'a str,
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

/// Response envelope; exactly one of `result` / `error` is meaningful
#[derive(Debug, Deserialize)]
pub(crate) struct AnkiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateDeckParams<'a> {
    pub deck: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct StoreMediaParams<'a> {
    pub filename: &'a str,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddNoteParams<'a> {
    pub note: NewNote<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewNote<'a> {
    pub deck_name: &'a str,
    pub model_name: &'a str,
    pub fields: NoteFields<'a>,
    pub options: NoteOptions,
    pub tags: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct NoteFields<'a> {
    #[serde(rename = "Front")]
    pub front: &'a str,
    #[serde(rename = "Back")]
    pub back: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoteOptions {
    pub allow_duplicate: bool,
}
