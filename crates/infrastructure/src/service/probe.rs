//! Liveness probes for local services
//!
//! A probe answers one question: does the service respond right now?
//! Transport failures of any kind count as "down" and are never surfaced.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use tracing::{debug, instrument};

/// Reports whether a service is currently reachable
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    async fn is_up(&self) -> bool;
}

/// HTTP probe: up when a `GET` of the endpoint answers with a 2xx status in time
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpProbe {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl AvailabilityProbe for HttpProbe {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn is_up(&self) -> bool {
        match self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => {
                let up = response.status().is_success();
                debug!(status = %response.status(), up, "Probe answered");
                up
            },
            Err(e) => {
                debug!(error = %e, "Probe failed");
                false
            },
        }
    }
}
