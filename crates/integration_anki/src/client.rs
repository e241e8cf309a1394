//! AnkiConnect client
//!
//! HTTP client for the AnkiConnect JSON-RPC style endpoint. Every call is a
//! `POST` of `{action, version, params}` to a single URL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{
    AddNoteParams, AnkiRequest, AnkiResponse, CreateDeckParams, NewNote, NoteFields, NoteOptions,
    StoreMediaParams,
};

/// AnkiConnect API version spoken by this client
pub const ANKI_CONNECT_VERSION: u8 = 6;

/// AnkiConnect client errors
#[derive(Debug, Error)]
pub enum AnkiError {
    /// AnkiConnect could not be reached
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// AnkiConnect answered with a non-success HTTP status
    #[error("Server error: {0}")]
    ServerError(String),

    /// Response body was not a valid AnkiConnect envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Anki refused the action (duplicate note, unknown model, ...)
    #[error("Anki rejected '{action}': {message}")]
    Rejected { action: String, message: String },

    /// A media file could not be read before upload
    #[error("Failed to read media file {}: {source}", .path.display())]
    MediaFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnkiError {
    fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// AnkiConnect configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnkiConfig {
    /// AnkiConnect endpoint (default: <http://localhost:8765>)
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Timeout of a liveness probe in milliseconds (default: 2000)
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,

    /// Marker tag added to every created note
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Note type used for new notes; must have `Front` and `Back` fields
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

fn default_url() -> String {
    "http://localhost:8765".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_probe_timeout() -> u64 {
    2_000
}

fn default_tag() -> String {
    "auto-llm".to_string()
}

fn default_model_name() -> String {
    "Basic".to_string()
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
            probe_timeout_ms: default_probe_timeout(),
            tag: default_tag(),
            model_name: default_model_name(),
        }
    }
}

impl AnkiConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("anki.url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("anki.timeout_secs must be greater than 0".to_string());
        }
        if self.model_name.trim().is_empty() {
            return Err("anki.model_name must not be empty".to_string());
        }
        Ok(())
    }
}

/// AnkiConnect HTTP client
#[derive(Debug)]
pub struct AnkiConnectClient {
    client: Client,
    config: AnkiConfig,
}

impl AnkiConnectClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: AnkiConfig) -> Result<Self, AnkiError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        Self::with_timeout(config, timeout)
    }

    /// Create a client whose requests give up after `timeout`
    ///
    /// Liveness checks use this with the much shorter probe timeout.
    pub fn with_timeout(config: AnkiConfig, timeout: Duration) -> Result<Self, AnkiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnkiError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Send one action and unwrap the `{result, error}` envelope
    ///
    /// A non-null `error` becomes [`AnkiError::Rejected`]. A null `result`
    /// without error is returned as `None`.
    pub async fn invoke<T: DeserializeOwned>(
        &self,
        action: &str,
        params: Option<serde_json::Value>,
    ) -> Result<Option<T>, AnkiError> {
        let request = AnkiRequest {
            action,
            version: ANKI_CONNECT_VERSION,
            params,
        };

        let response = self
            .client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnkiError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnkiError::ServerError(format!("HTTP {status}")));
        }

        let body: AnkiResponse<T> = response
            .json()
            .await
            .map_err(|e| AnkiError::InvalidResponse(e.to_string()))?;

        if let Some(message) = body.error {
            warn!(action, error = %message, "AnkiConnect rejected action");
            return Err(AnkiError::Rejected {
                action: action.to_string(),
                message,
            });
        }

        Ok(body.result)
    }

    fn params<P: Serialize>(params: &P) -> Result<serde_json::Value, AnkiError> {
        serde_json::to_value(params).map_err(|e| AnkiError::InvalidResponse(e.to_string()))
    }

    /// AnkiConnect API version reported by the add-on
    #[instrument(skip(self))]
    pub async fn version(&self) -> Result<u32, AnkiError> {
        self.invoke::<u32>("version", None)
            .await?
            .ok_or_else(|| AnkiError::InvalidResponse("version returned no result".to_string()))
    }

    /// Create a deck; existing decks are left untouched
    #[instrument(skip(self))]
    pub async fn create_deck(&self, deck: &str) -> Result<(), AnkiError> {
        let params = Self::params(&CreateDeckParams { deck })?;
        let id: Option<u64> = self.invoke("createDeck", Some(params)).await?;
        debug!(deck, deck_id = ?id, "Deck ready");
        Ok(())
    }

    /// Upload a file into Anki's media folder under `filename`
    ///
    /// An existing file with the same name is overwritten.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn store_media_file(&self, filename: &str, path: &Path) -> Result<(), AnkiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| AnkiError::MediaFile {
                path: path.to_path_buf(),
                source,
            })?;

        let params = Self::params(&StoreMediaParams {
            filename,
            data: BASE64.encode(&bytes),
        })?;
        let stored: Option<String> = self.invoke("storeMediaFile", Some(params)).await?;

        debug!(filename, bytes = bytes.len(), stored = ?stored, "Media stored");
        Ok(())
    }

    /// Add a Front/Back note and return its id
    ///
    /// Duplicates are not allowed; Anki reports them as a rejection.
    #[instrument(skip(self, front, back))]
    pub async fn add_note(
        &self,
        deck: &str,
        front: &str,
        back: &str,
        tags: &[String],
    ) -> Result<u64, AnkiError> {
        let params = Self::params(&AddNoteParams {
            note: NewNote {
                deck_name: deck,
                model_name: &self.config.model_name,
                fields: NoteFields { front, back },
                options: NoteOptions {
                    allow_duplicate: false,
                },
                tags,
            },
        })?;

        let note_id = self
            .invoke::<u64>("addNote", Some(params))
            .await?
            .ok_or_else(|| AnkiError::InvalidResponse("addNote returned no note id".to_string()))?;

        debug!(deck, note_id, "Note added");
        Ok(note_id)
    }
}
