//! AnkiConnect integration
//!
//! Client for the AnkiConnect add-on (<https://foosoft.net/projects/anki-connect/>),
//! the HTTP automation interface of the Anki desktop application.
//! Covers what card creation needs: liveness, decks, media and notes.

pub mod client;
mod models;

pub use client::{ANKI_CONNECT_VERSION, AnkiConfig, AnkiConnectClient, AnkiError};
