//! The operations consumed from the queue service, and queue resolution.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::batch::BatchEntry;
use crate::error::{BoxError, Error, FailedEntry, Result};

/// Remote queue operations used by this crate.
///
/// [`SqsQueue`](crate::SqsQueue) is the production implementation.
#[async_trait]
pub trait QueueService: Send + Sync {
    /// Looks up the URL of the queue called `name`; `None` when no such queue exists.
    async fn queue_url(&self, name: &str) -> std::result::Result<Option<String>, BoxError>;

    /// Sends one batch request; returns the entries the service rejected.
    async fn send_batch(
        &self,
        queue_url: &str,
        entries: &[BatchEntry],
    ) -> std::result::Result<Vec<FailedEntry>, BoxError>;

    /// URLs of every queue visible to the caller.
    async fn list_queue_urls(&self) -> std::result::Result<Vec<String>, BoxError>;

    async fn queue_attributes(
        &self,
        queue_url: &str,
    ) -> std::result::Result<BTreeMap<String, String>, BoxError>;

    async fn queue_tags(
        &self,
        queue_url: &str,
    ) -> std::result::Result<BTreeMap<String, String>, BoxError>;
}

/// The queue messages are sent to, resolved once per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueTarget {
    url: String,
}

impl QueueTarget {
    /// Uses `identifier` directly when it is an absolute URL with a host,
    /// otherwise looks it up as a queue name.
    pub async fn resolve<Q>(queue: &Q, identifier: &str) -> Result<Self>
    where
        Q: QueueService + ?Sized,
    {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(Error::EmptyQueueIdentifier);
        }

        if let Some(url) = literal_url(identifier) {
            log::debug!("using queue url {url}");
            return Ok(Self { url });
        }

        log::debug!("resolving url of queue {identifier}");
        match queue.queue_url(identifier).await {
            Ok(Some(url)) => Ok(Self { url }),
            Ok(None) => Err(Error::QueueNotFound(identifier.to_string())),
            Err(source) => Err(Error::Resolution {
                name: identifier.to_string(),
                source,
            }),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn literal_url(identifier: &str) -> Option<String> {
    url::Url::parse(identifier)
        .ok()
        .filter(url::Url::has_host)
        .map(|_| identifier.to_string())
}
