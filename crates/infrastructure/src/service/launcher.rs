//! Start local services on demand
//!
//! A [`ServiceLauncher`] owns one service: its probe, where its executable
//! may live and how to start it. `ensure_running` probes first, and only if
//! the service is down locates the executable, starts it detached and polls
//! the probe until it answers or the attempt budget runs out.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::Duration;

use application::error::ApplicationError;
use application::ports::ServiceControlPort;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::probe::AvailabilityProbe;

/// Launcher errors
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Service is down and none of its candidate executables exist
    #[error("{service} is not running and no executable was found")]
    NotFound { service: String },

    /// Executable was found but could not be started
    #[error("Failed to start {service} from {}: {source}", .path.display())]
    Spawn {
        service: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Service never answered within the polling budget
    #[error("{service} did not become ready after {attempts} attempts")]
    Unavailable { service: String, attempts: u32 },
}

impl From<LaunchError> for ApplicationError {
    fn from(err: LaunchError) -> Self {
        match err {
            LaunchError::NotFound { service } | LaunchError::Spawn { service, .. } => {
                Self::ServiceNotFound { service }
            },
            LaunchError::Unavailable { service, attempts } => {
                Self::ServiceUnavailable { service, attempts }
            },
        }
    }
}

/// Polling budget after a launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Pause before each readiness probe in milliseconds (default: 2000)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Number of readiness probes after launching (default: 30)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

const fn default_poll_interval() -> u64 {
    2_000
}

const fn default_max_attempts() -> u32 {
    30
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl LauncherConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("launcher.max_attempts must be greater than 0".to_string());
        }
        Ok(())
    }

    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// How to find and start a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Human-readable name used in logs and errors
    pub name: String,
    /// Executables to try in order; bare names are looked up on the search path
    pub candidates: Vec<PathBuf>,
    /// Arguments passed on launch
    pub args: Vec<String>,
}

/// Starts a process that outlives the caller
#[cfg_attr(test, automock)]
pub trait ProcessSpawner: Send + Sync {
    fn spawn_detached(&self, program: &Path, args: &[String]) -> std::io::Result<()>;
}

/// Spawns into its own process group with all stdio discarded
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSpawner;

impl ProcessSpawner for DetachedSpawner {
    #[allow(clippy::zombie_processes)] // the service must outlive this process
    fn spawn_detached(&self, program: &Path, args: &[String]) -> std::io::Result<()> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const DETACHED_PROCESS: u32 = 0x0000_0008;
            const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
            cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
        }

        let child = cmd.spawn()?;
        debug!(pid = child.id(), program = %program.display(), "Spawned detached process");
        Ok(())
    }
}

/// Brings one local service up on demand
pub struct ServiceLauncher {
    descriptor: ServiceDescriptor,
    probe: Arc<dyn AvailabilityProbe>,
    spawner: Arc<dyn ProcessSpawner>,
    config: LauncherConfig,
    search_path: Option<OsString>,
}

impl fmt::Debug for ServiceLauncher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceLauncher")
            .field("descriptor", &self.descriptor)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ServiceLauncher {
    /// Create a launcher using the process search path and detached spawning
    pub fn new(
        descriptor: ServiceDescriptor,
        probe: Arc<dyn AvailabilityProbe>,
        config: LauncherConfig,
    ) -> Self {
        Self {
            descriptor,
            probe,
            spawner: Arc::new(DetachedSpawner),
            config,
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Replace how processes are started
    #[must_use]
    pub fn with_spawner(mut self, spawner: Arc<dyn ProcessSpawner>) -> Self {
        self.spawner = spawner;
        self
    }

    /// Replace the directories bare candidate names are searched in
    #[must_use]
    pub fn with_search_path(mut self, search_path: Option<OsString>) -> Self {
        self.search_path = search_path;
        self
    }

    /// First candidate that exists, resolving bare names on the search path
    pub fn locate(&self) -> Option<PathBuf> {
        self.descriptor
            .candidates
            .iter()
            .find_map(|candidate| resolve_candidate(candidate, self.search_path.as_deref()))
    }

    /// Return once the service answers its probe, starting it if needed
    #[instrument(skip(self), fields(service = %self.descriptor.name))]
    pub async fn ensure_running(&self) -> Result<(), LaunchError> {
        if self.probe.is_up().await {
            debug!("Service already running");
            return Ok(());
        }

        let name = &self.descriptor.name;
        let Some(program) = self.locate() else {
            warn!("No executable found");
            return Err(LaunchError::NotFound {
                service: name.clone(),
            });
        };

        info!(program = %program.display(), "Starting service");
        self.spawner
            .spawn_detached(&program, &self.descriptor.args)
            .map_err(|source| LaunchError::Spawn {
                service: name.clone(),
                path: program.clone(),
                source,
            })?;

        let interval = self.config.poll_interval();
        for attempt in 1..=self.config.max_attempts {
            tokio::time::sleep(interval).await;
            if self.probe.is_up().await {
                info!(attempt, "Service ready");
                return Ok(());
            }
            debug!(attempt, max_attempts = self.config.max_attempts, "Service not ready yet");
        }

        warn!(attempts = self.config.max_attempts, "Service did not become ready");
        Err(LaunchError::Unavailable {
            service: name.clone(),
            attempts: self.config.max_attempts,
        })
    }
}

#[async_trait]
impl ServiceControlPort for ServiceLauncher {
    fn service_name(&self) -> String {
        self.descriptor.name.clone()
    }

    async fn ensure_running(&self) -> Result<(), ApplicationError> {
        Self::ensure_running(self).await.map_err(Into::into)
    }
}

/// Resolve one candidate to an existing file
///
/// Paths with a directory part are taken as-is; bare names are joined with
/// every search path entry in order.
fn resolve_candidate(candidate: &Path, search_path: Option<&std::ffi::OsStr>) -> Option<PathBuf> {
    if candidate.is_absolute() || candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    std::env::split_paths(search_path?)
        .map(|dir| dir.join(candidate))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use tempfile::TempDir;
    use tokio::time::Instant;

    use super::*;

    /// Probe that starts answering after a number of calls
    struct ScriptedProbe {
        calls: AtomicU32,
        up_from_call: Option<u32>,
    }

    impl ScriptedProbe {
        fn never() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                up_from_call: None,
            })
        }

        fn up_from(call: u32) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                up_from_call: Some(call),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AvailabilityProbe for ScriptedProbe {
        async fn is_up(&self) -> bool {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.up_from_call.is_some_and(|from| call >= from)
        }
    }

    fn fake_executable(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"#!/bin/sh\n").unwrap();
        path
    }

    fn descriptor(candidates: Vec<PathBuf>) -> ServiceDescriptor {
        ServiceDescriptor {
            name: "Ollama".to_string(),
            candidates,
            args: vec!["serve".to_string()],
        }
    }

    fn launcher(
        descriptor: ServiceDescriptor,
        probe: Arc<dyn AvailabilityProbe>,
        spawner: MockProcessSpawner,
    ) -> ServiceLauncher {
        ServiceLauncher::new(descriptor, probe, LauncherConfig::default())
            .with_spawner(Arc::new(spawner))
            .with_search_path(None)
    }

    #[tokio::test]
    async fn running_service_is_left_alone() {
        let probe = ScriptedProbe::up_from(1);
        let mut spawner = MockProcessSpawner::new();
        spawner.expect_spawn_detached().never();

        let launcher = launcher(descriptor(vec![]), probe.clone(), spawner);

        launcher.ensure_running().await.unwrap();
        launcher.ensure_running().await.unwrap();
        assert_eq!(probe.calls(), 2);
    }

    #[tokio::test]
    async fn missing_executable_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let probe = ScriptedProbe::never();
        let mut spawner = MockProcessSpawner::new();
        spawner.expect_spawn_detached().never();

        let launcher = launcher(
            descriptor(vec![dir.path().join("missing"), PathBuf::from("ollama")]),
            probe.clone(),
            spawner,
        );

        let err = launcher.ensure_running().await.unwrap_err();
        assert!(matches!(err, LaunchError::NotFound { ref service } if service == "Ollama"));
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn launched_service_ready_after_polling() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_executable(&dir, "ollama");
        let probe = ScriptedProbe::up_from(4);

        let expected = program.clone();
        let mut spawner = MockProcessSpawner::new();
        spawner
            .expect_spawn_detached()
            .withf(move |program, args| program == expected.as_path() && args == ["serve"])
            .times(1)
            .returning(|_, _| Ok(()));

        let launcher = launcher(descriptor(vec![program]), probe.clone(), spawner);

        let start = Instant::now();
        launcher.ensure_running().await.unwrap();

        assert_eq!(probe.calls(), 4);
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_thirty_polls() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_executable(&dir, "ollama");
        let probe = ScriptedProbe::never();

        let mut spawner = MockProcessSpawner::new();
        spawner
            .expect_spawn_detached()
            .times(1)
            .returning(|_, _| Ok(()));

        let launcher = launcher(descriptor(vec![program]), probe.clone(), spawner);

        let start = Instant::now();
        let err = launcher.ensure_running().await.unwrap_err();

        assert!(matches!(err, LaunchError::Unavailable { attempts: 30, .. }));
        assert_eq!(probe.calls(), 31);
        assert_eq!(start.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn spawn_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_executable(&dir, "anki");

        let mut spawner = MockProcessSpawner::new();
        spawner.expect_spawn_detached().times(1).returning(|_, _| {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "not executable",
            ))
        });

        let launcher = launcher(descriptor(vec![program]), ScriptedProbe::never(), spawner);

        let err = launcher.ensure_running().await.unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));

        let app: ApplicationError = err.into();
        assert!(matches!(app, ApplicationError::ServiceNotFound { .. }));
    }

    #[test]
    fn bare_names_resolve_on_search_path() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let expected = fake_executable(&second, "ollama");
        let search_path = std::env::join_paths([first.path(), second.path()]).unwrap();

        let launcher = ServiceLauncher::new(
            descriptor(vec![PathBuf::from("ollama")]),
            ScriptedProbe::never(),
            LauncherConfig::default(),
        )
        .with_search_path(Some(search_path));

        assert_eq!(launcher.locate(), Some(expected));
    }

    #[test]
    fn first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let second = fake_executable(&dir, "anki-second");
        let third = fake_executable(&dir, "anki-third");

        let launcher = ServiceLauncher::new(
            descriptor(vec![dir.path().join("anki-first"), second.clone(), third]),
            ScriptedProbe::never(),
            LauncherConfig::default(),
        )
        .with_search_path(None);

        assert_eq!(launcher.locate(), Some(second));
    }

    #[test]
    fn unavailable_maps_to_service_unavailable() {
        let err = LaunchError::Unavailable {
            service: "Anki".to_string(),
            attempts: 30,
        };
        let app: ApplicationError = err.into();
        assert!(matches!(
            app,
            ApplicationError::ServiceUnavailable { attempts: 30, ref service } if service == "Anki"
        ));
    }

    #[test]
    fn config_rejects_zero_attempts() {
        let config = LauncherConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(LauncherConfig::default().validate().is_ok());
    }
}
