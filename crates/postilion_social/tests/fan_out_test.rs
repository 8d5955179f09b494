//! Fan-out behavior over mock publishers.

use async_trait::async_trait;
use postilion_core::Platform;
use postilion_error::{PostilionResult, PublishError};
use postilion_social::{FanOut, PlatformPublisher};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct MockPublisher {
    platform: Platform,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockPublisher {
    fn new(platform: Platform, fail: bool) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(Self {
                platform,
                fail,
                calls: calls.clone(),
            }),
            calls,
        )
    }
}

#[async_trait]
impl PlatformPublisher for MockPublisher {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn publish(&self, _image_url: &str, _caption: &str) -> PostilionResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(PublishError::new(self.platform.to_string(), "rejected"))?
        }
        Ok(())
    }
}

fn all_platforms() -> BTreeSet<Platform> {
    BTreeSet::from([Platform::Telegram, Platform::Instagram, Platform::Facebook])
}

#[tokio::test]
async fn test_one_failure_does_not_block_siblings() {
    let (telegram, telegram_calls) = MockPublisher::new(Platform::Telegram, false);
    let (instagram, instagram_calls) = MockPublisher::new(Platform::Instagram, true);
    let (facebook, facebook_calls) = MockPublisher::new(Platform::Facebook, false);
    let fanout = FanOut::new()
        .register(telegram)
        .register(instagram)
        .register(facebook);

    let report = fanout
        .publish("https://cdn.example/a.jpg", "caption", &all_platforms())
        .await;

    assert_eq!(telegram_calls.load(Ordering::SeqCst), 1);
    assert_eq!(instagram_calls.load(Ordering::SeqCst), 1);
    assert_eq!(facebook_calls.load(Ordering::SeqCst), 1);

    assert!(report.outcome(Platform::Telegram).unwrap().is_ok());
    assert!(report.outcome(Platform::Instagram).unwrap().is_err());
    assert!(report.outcome(Platform::Facebook).unwrap().is_ok());
    assert!(!report.all_succeeded());
}

#[tokio::test]
async fn test_single_target_publishes_only_there() {
    let (telegram, telegram_calls) = MockPublisher::new(Platform::Telegram, false);
    let (facebook, facebook_calls) = MockPublisher::new(Platform::Facebook, false);
    let fanout = FanOut::new().register(telegram).register(facebook);

    let report = fanout
        .publish(
            "https://cdn.example/a.jpg",
            "caption",
            &BTreeSet::from([Platform::Facebook]),
        )
        .await;

    assert_eq!(telegram_calls.load(Ordering::SeqCst), 0);
    assert_eq!(facebook_calls.load(Ordering::SeqCst), 1);
    assert!(report.all_succeeded());
    assert!(report.outcome(Platform::Telegram).is_none());
}

#[tokio::test]
async fn test_unregistered_target_is_reported_failed() {
    let (telegram, _) = MockPublisher::new(Platform::Telegram, false);
    let fanout = FanOut::new().register(telegram);

    let report = fanout
        .publish("https://cdn.example/a.jpg", "caption", &all_platforms())
        .await;

    assert!(report.outcome(Platform::Telegram).unwrap().is_ok());
    assert!(report.outcome(Platform::Instagram).unwrap().is_err());
    assert_eq!(report.failed().len(), 2);
}
