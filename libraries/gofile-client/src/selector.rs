//! Upload server selection.
//!
//! Every candidate is probed concurrently and the selector waits for all of
//! them. A single failed probe fails the whole selection. When every probe
//! succeeds, the candidates are shuffled with a seeded RNG and the first one
//! wins, so the pick depends only on the candidate list and the seed.

use crate::envelope::transport_error;
use crate::error::{GofileError, Result};
use async_trait::async_trait;
use futures_util::future::join_all;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 0;

/// Liveness check for a single upload server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerProbe: Send + Sync {
    async fn probe(&self, server: &str) -> Result<()>;
}

/// Probes a server with a `HEAD` request against its upload host.
pub struct HttpProbe<'a> {
    http: &'a Client,
    upload_url: &'a str,
}

impl<'a> HttpProbe<'a> {
    /// `upload_url` is the host template containing `{server}`.
    pub fn new(http: &'a Client, upload_url: &'a str) -> Self {
        Self { http, upload_url }
    }
}

#[async_trait]
impl ServerProbe for HttpProbe<'_> {
    async fn probe(&self, server: &str) -> Result<()> {
        let url = self
            .upload_url
            .replace(crate::config::SERVER_PLACEHOLDER, server);
        debug!(url = %url, server = %server, "Probing upload server");

        let response = self.http.head(&url).send().await.map_err(transport_error)?;
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            return Err(GofileError::ServerError {
                status: status.as_u16(),
                message: format!("Probe of {} failed", server),
            });
        }

        Ok(())
    }
}

/// Picks one upload server out of a candidate list.
pub struct ServerSelector<P> {
    probe: P,
    seed: u64,
}

impl<P: ServerProbe> ServerSelector<P> {
    pub fn new(probe: P) -> Self {
        Self::with_seed(probe, DEFAULT_SEED)
    }

    pub fn with_seed(probe: P, seed: u64) -> Self {
        Self { probe, seed }
    }

    /// Choose a server. A pinned server is returned as-is without probing.
    pub async fn select(&self, candidates: &[String], pinned: Option<&str>) -> Result<String> {
        self.select_cancellable(candidates, pinned, &CancellationToken::new())
            .await
    }

    /// Like [`select`](Self::select), abandoning in-flight probes once
    /// `cancel` fires.
    pub async fn select_cancellable(
        &self,
        candidates: &[String],
        pinned: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<String> {
        if let Some(server) = pinned {
            debug!(server = %server, "Using pinned upload server");
            return Ok(server.to_string());
        }

        if candidates.is_empty() {
            return Err(GofileError::NoServerAvailable);
        }

        // One slot per candidate, in candidate order.
        let probes = join_all(candidates.iter().map(|server| self.probe.probe(server)));

        let outcomes = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Server selection cancelled");
                return Err(GofileError::Cancelled);
            }
            outcomes = probes => outcomes,
        };

        for (server, outcome) in candidates.iter().zip(outcomes) {
            if let Err(e) = outcome {
                warn!(server = %server, error = %e, "Upload server probe failed");
                return Err(e);
            }
        }

        let mut survivors = candidates.to_vec();
        let mut rng = StdRng::seed_from_u64(self.seed);
        survivors.shuffle(&mut rng);

        let chosen = survivors
            .into_iter()
            .next()
            .ok_or(GofileError::NoServerAvailable)?;

        debug!(server = %chosen, candidates = candidates.len(), "Selected upload server");
        Ok(chosen)
    }
}
