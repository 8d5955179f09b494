//! Publication fan-out and per-target reporting.

use async_trait::async_trait;
use derive_getters::Getters;
use futures::future::join_all;
use postilion_core::Platform;
use postilion_error::PostilionResult;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A single external platform the fan-out can publish to.
#[async_trait]
pub trait PlatformPublisher: Send + Sync {
    /// The platform this publisher posts to.
    fn platform(&self) -> Platform;

    /// Publish one image-with-caption post.
    async fn publish(&self, image_url: &str, caption: &str) -> PostilionResult<()>;
}

/// Aggregated outcome of one fan-out, one entry per requested target.
///
/// Failures are recorded as messages rather than aborting siblings;
/// partial success is an accepted terminal outcome.
#[derive(Debug, Clone, Default, Getters)]
pub struct PublishReport {
    /// Per-target outcome, keyed by platform
    results: BTreeMap<Platform, Result<(), String>>,
}

impl PublishReport {
    /// Record the outcome for one target.
    pub fn record(&mut self, platform: Platform, outcome: Result<(), String>) {
        self.results.insert(platform, outcome);
    }

    /// Platforms that published successfully.
    pub fn succeeded(&self) -> Vec<Platform> {
        self.results
            .iter()
            .filter(|(_, outcome)| outcome.is_ok())
            .map(|(platform, _)| *platform)
            .collect()
    }

    /// Platforms that failed to publish.
    pub fn failed(&self) -> Vec<Platform> {
        self.results
            .iter()
            .filter(|(_, outcome)| outcome.is_err())
            .map(|(platform, _)| *platform)
            .collect()
    }

    /// Whether every requested target succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.results.values().all(|outcome| outcome.is_ok())
    }

    /// Outcome for one platform, if it was a target.
    pub fn outcome(&self, platform: Platform) -> Option<&Result<(), String>> {
        self.results.get(&platform)
    }
}

/// Dispatches a finished draft to a set of platforms.
///
/// Each target publish is an independent call; the calls run concurrently
/// and the report is assembled only after every one has settled.
#[derive(Default)]
pub struct FanOut {
    publishers: BTreeMap<Platform, Arc<dyn PlatformPublisher>>,
}

impl FanOut {
    /// Create an empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a publisher for its platform, replacing any previous one.
    pub fn register(mut self, publisher: Arc<dyn PlatformPublisher>) -> Self {
        self.publishers.insert(publisher.platform(), publisher);
        self
    }

    /// Publish to every platform in `targets` and collect the per-target
    /// outcomes. A target with no registered publisher is reported failed.
    #[instrument(skip(self, image_url, caption), fields(targets = targets.len()))]
    pub async fn publish(
        &self,
        image_url: &str,
        caption: &str,
        targets: &BTreeSet<Platform>,
    ) -> PublishReport {
        let calls = targets.iter().map(|platform| {
            let publisher = self.publishers.get(platform).cloned();
            async move {
                let outcome = match publisher {
                    Some(publisher) => publisher
                        .publish(image_url, caption)
                        .await
                        .map_err(|e| e.to_string()),
                    None => Err("no publisher configured".to_string()),
                };
                (*platform, outcome)
            }
        });

        let mut report = PublishReport::default();
        for (platform, outcome) in join_all(calls).await {
            match &outcome {
                Ok(()) => info!(platform = %platform, "Published"),
                Err(e) => warn!(platform = %platform, error = %e, "Publish failed"),
            }
            report.record(platform, outcome);
        }
        report
    }
}
