//! Service control port - Make sure a local service is up

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for starting a local background service on demand
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ServiceControlPort: Send + Sync {
    /// Human-readable service name
    fn service_name(&self) -> String;

    /// Return once the service answers, starting it if needed
    ///
    /// Fails with `ServiceNotFound` when no executable can be located and
    /// with `ServiceUnavailable` when it never answers.
    async fn ensure_running(&self) -> Result<(), ApplicationError>;
}
