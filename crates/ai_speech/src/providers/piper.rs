//! Piper Local Text-to-Speech Provider
//!
//! Implements `TextToSpeech` by driving the Piper CLI in JSON-input mode.
//! Each voice model is loaded once into its own long-running Piper process
//! and reused for every following utterance in that voice.
//!
//! # Prerequisites
//!
//! - Piper must be installed and available in PATH (or configured by path)
//! - One voice model (.onnx) and config (.onnx.json) per voice in `voices_dir`
//!
//! # Installing voices
//!
//! ```bash
//! mkdir -p ~/.local/share/piper/voices
//! cd ~/.local/share/piper/voices
//! wget https://huggingface.co/rhasspy/piper-voices/resolve/main/en/en_US/lessac/medium/en_US-lessac-medium.onnx
//! wget https://huggingface.co/rhasspy/piper-voices/resolve/main/en/en_US/lessac/medium/en_US-lessac-medium.onnx.json
//! ```
//!
//! # Protocol
//!
//! With `--json-input --output_dir <dir>`, Piper reads one JSON object per
//! line on stdin, writes a WAV file into `<dir>` and prints its path on
//! stdout. The file is then moved to the requested destination.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::text::strip_example_prefix;
use crate::voices::voice_for_language;

/// A running Piper process with one voice model loaded
struct LoadedVoice {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    last_stderr: Arc<parking_lot::Mutex<Option<String>>>,
    // Dropped after `child`, which is killed on drop
    output_dir: TempDir,
}

impl LoadedVoice {
    /// Start Piper for `voice`
    async fn load(config: &SpeechConfig, voice: &str) -> Result<Self, SpeechError> {
        let model_path = config.model_path(voice);
        if !model_path.exists() {
            return Err(SpeechError::ModelNotAvailable(format!(
                "{voice} (expected at {})",
                model_path.display()
            )));
        }

        let output_dir = tempfile::Builder::new()
            .prefix("vocabforge-piper-")
            .tempdir()?;

        let mut cmd = Command::new(&config.piper_executable);
        cmd.args(&config.piper_args)
            .arg("--model")
            .arg(&model_path)
            .arg("--json-input")
            .arg("--output_dir")
            .arg(output_dir.path())
            .arg("--length_scale")
            .arg(config.length_scale.to_string())
            .arg("--quiet")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Starting piper: {:?}", cmd);

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpeechError::NotAvailable(format!(
                    "Piper not found at '{}'. Please install Piper.",
                    config.piper_executable.display()
                ))
            } else {
                SpeechError::SynthesisFailed(format!("Failed to run piper: {e}"))
            }
        })?;

        let missing = |stream: &str| SpeechError::SynthesisFailed(format!("Piper {stream} unavailable"));
        let stdin = child.stdin.take().ok_or_else(|| missing("stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| missing("stdout"))?;
        let stderr = child.stderr.take().ok_or_else(|| missing("stderr"))?;

        // Drain stderr so the pipe never fills; keep the last line for errors
        let last_stderr = Arc::new(parking_lot::Mutex::new(None));
        let sink = Arc::clone(&last_stderr);
        let voice_name = voice.to_string();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(voice = %voice_name, "piper: {line}");
                *sink.lock() = Some(line);
            }
        });

        info!(voice, model = %model_path.display(), "Loaded Piper voice");

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            last_stderr,
            output_dir,
        })
    }

    /// Synthesize one utterance, returning the path Piper wrote
    async fn speak(&mut self, text: &str) -> Result<PathBuf, SpeechError> {
        let mut request = serde_json::json!({ "text": text }).to_string();
        request.push('\n');

        if let Err(e) = self.write_request(&request).await {
            return Err(self.failure(&format!("Failed to write to piper stdin: {e}")));
        }

        match self.stdout.next_line().await {
            Ok(Some(line)) => {
                let path = PathBuf::from(line.trim());
                if path.is_absolute() {
                    Ok(path)
                } else {
                    Ok(self.output_dir.path().join(path))
                }
            },
            Ok(None) => Err(self.failure("Piper exited before producing audio")),
            Err(e) => Err(self.failure(&format!("Failed to read piper output: {e}"))),
        }
    }

    async fn write_request(&mut self, request: &str) -> std::io::Result<()> {
        self.stdin.write_all(request.as_bytes()).await?;
        self.stdin.flush().await
    }

    /// Build a synthesis error carrying whatever Piper reported
    fn failure(&mut self, what: &str) -> SpeechError {
        let status = self.child.try_wait().ok().flatten();
        let stderr = self.last_stderr.lock().clone();

        let mut message = what.to_string();
        if let Some(status) = status {
            message.push_str(&format!(" (exit status {status})"));
        }
        if let Some(stderr) = stderr {
            message.push_str(&format!(": {}", stderr.trim()));
        }
        SpeechError::SynthesisFailed(message)
    }
}

/// Move a file, falling back to copy + delete across file systems
async fn move_file(from: &Path, to: &Path) -> Result<(), SpeechError> {
    if tokio::fs::rename(from, to).await.is_err() {
        tokio::fs::copy(from, to).await?;
        tokio::fs::remove_file(from).await?;
    }
    Ok(())
}

/// Local TTS provider using Piper
///
/// Loaded voices are cached by voice identifier for the lifetime of the
/// synthesizer, so each model is loaded at most once. The cache lock is held
/// for the whole utterance, which also serializes loads of the same voice.
pub struct PiperSynthesizer {
    config: SpeechConfig,
    voices: Mutex<HashMap<String, LoadedVoice>>,
}

impl fmt::Debug for PiperSynthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PiperSynthesizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PiperSynthesizer {
    /// Create a new Piper synthesizer
    ///
    /// No process is started until the first utterance.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        Ok(Self {
            config,
            voices: Mutex::new(HashMap::new()),
        })
    }

    /// Identifiers of the voices currently loaded, sorted
    pub async fn loaded_voices(&self) -> Vec<String> {
        let mut loaded: Vec<String> = self.voices.lock().await.keys().cloned().collect();
        loaded.sort();
        loaded
    }
}

#[async_trait]
impl TextToSpeech for PiperSynthesizer {
    #[instrument(skip(self, text, destination), fields(text_len = text.len()))]
    async fn synthesize_to_file(
        &self,
        text: &str,
        language_code: &str,
        destination: &Path,
    ) -> Result<(), SpeechError> {
        let text = strip_example_prefix(text);
        if text.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Cannot synthesize empty text".to_string(),
            ));
        }

        let voice = voice_for_language(&self.config, language_code).to_string();
        let timeout = Duration::from_millis(self.config.timeout_ms);

        let mut voices = self.voices.lock().await;
        let loaded = match voices.entry(voice.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(LoadedVoice::load(&self.config, &voice).await?),
        };

        // A failed or stuck process is evicted and reloaded on next use
        let produced = match tokio::time::timeout(timeout, loaded.speak(text)).await {
            Ok(Ok(path)) => path,
            Ok(Err(e)) => {
                warn!(voice = %voice, error = %e, "Piper synthesis failed");
                voices.remove(&voice);
                return Err(e);
            },
            Err(_) => {
                warn!(voice = %voice, "Piper synthesis timed out");
                voices.remove(&voice);
                return Err(SpeechError::Timeout(self.config.timeout_ms));
            },
        };
        drop(voices);

        let size = tokio::fs::metadata(&produced).await?.len();
        if size == 0 {
            warn!("Piper produced empty output");
            return Err(SpeechError::SynthesisFailed(
                "Piper produced empty output".to_string(),
            ));
        }

        move_file(&produced, destination).await?;
        debug!(voice = %voice, bytes = size, destination = %destination.display(), "Audio written");

        Ok(())
    }

    async fn is_available(&self) -> bool {
        let executable = &self.config.piper_executable;
        let executable_exists = executable.exists()
            || Command::new(executable)
                .args(&self.config.piper_args)
                .arg("--help")
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
                .is_ok_and(|s| s.success());

        let model_exists = self
            .config
            .model_path(&self.config.default_voice)
            .exists();

        debug!(
            "Piper availability: executable={}, default model={}",
            executable_exists, model_exists
        );

        executable_exists && model_exists
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(voices_dir: &Path) -> SpeechConfig {
        SpeechConfig {
            piper_executable: PathBuf::from("/nonexistent/piper"),
            voices_dir: voices_dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SpeechConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            PiperSynthesizer::new(config),
            Err(SpeechError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn empty_text_is_rejected_before_loading() {
        let dir = tempfile::tempdir().unwrap();
        let tts = PiperSynthesizer::new(test_config(dir.path())).unwrap();

        let result = tts
            .synthesize_to_file("Exemple :", "en", &dir.path().join("out.mp3"))
            .await;

        assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
        assert!(tts.loaded_voices().await.is_empty());
    }

    #[tokio::test]
    async fn missing_model_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let tts = PiperSynthesizer::new(test_config(dir.path())).unwrap();

        let result = tts
            .synthesize_to_file("hello", "en", &dir.path().join("out.mp3"))
            .await;

        match result {
            Err(SpeechError::ModelNotAvailable(msg)) => {
                assert!(msg.contains("en_US-lessac-medium"));
            },
            other => unreachable!("expected ModelNotAvailable, got {other:?}"),
        }
        assert!(tts.loaded_voices().await.is_empty());
    }

    #[tokio::test]
    async fn missing_executable_is_not_available() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en_US-lessac-medium.onnx"), b"model").unwrap();
        let tts = PiperSynthesizer::new(test_config(dir.path())).unwrap();

        let result = tts
            .synthesize_to_file("hello", "en", &dir.path().join("out.mp3"))
            .await;

        assert!(matches!(result, Err(SpeechError::NotAvailable(_))));
        assert!(!tts.is_available().await);
    }
}
