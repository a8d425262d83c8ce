//! Write-only destinations for a finalized selection.
use anyhow::{bail, Result};
use bevy::prelude::*;

/// Receives the id of the color the user settled on. `submit` blocks and is
/// only ever called off the main thread on native targets.
pub trait SelectionSink: Send + Sync + 'static {
    fn name(&self) -> &'static str;
    fn submit(&self, swatch_id: u32) -> Result<()>;
}

/// `<endpoint>?colorId=<id>`, appending with `&` when the endpoint already has a query.
pub fn submit_url(endpoint: &str, swatch_id: u32) -> Result<String> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        bail!("no submit endpoint configured");
    }
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        bail!("submit endpoint must be http(s): {endpoint}");
    }
    let sep = if endpoint.contains('?') { '&' } else { '?' };
    // a decimal integer is already URL-safe
    Ok(format!("{endpoint}{sep}colorId={swatch_id}"))
}

/// Upper bound on one submission, connect through response.
#[cfg(not(target_arch = "wasm32"))]
pub const HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Fire-and-forget GET; the response is never read. Any answer, whatever its
/// status, counts as delivered; only transport failures are errors.
#[cfg(not(target_arch = "wasm32"))]
pub struct HttpSink {
    endpoint: String,
    agent: ureq::Agent,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, HTTP_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: std::time::Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            endpoint: endpoint.into(),
            agent,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SelectionSink for HttpSink {
    fn name(&self) -> &'static str {
        "http"
    }

    fn submit(&self, swatch_id: u32) -> Result<()> {
        use anyhow::Context;
        let url = submit_url(&self.endpoint, swatch_id)?;
        debug!(target: "submit", "GET {url}");
        let response = self
            .agent
            .get(&url)
            .call()
            .with_context(|| format!("GET {url}"))?;
        debug!(target: "submit", "GET {url} answered {}", response.status());
        Ok(())
    }
}

/// Only logs the selection; used when no endpoint is configured and on wasm32.
pub struct LogSink;

impl SelectionSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    fn submit(&self, swatch_id: u32) -> Result<()> {
        info!(target: "submit", "selected color #{swatch_id}");
        Ok(())
    }
}
