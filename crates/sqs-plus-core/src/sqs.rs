//! `aws-sdk-sqs` implementation of [`QueueService`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sqs as sqs;
use sqs::error::{DisplayErrorContext, SdkError};
use sqs::types::{QueueAttributeName, SendMessageBatchRequestEntry};

use crate::batch::BatchEntry;
use crate::error::{BoxError, FailedEntry};
use crate::queue::QueueService;

/// Client for an SQS endpoint.
///
/// # Example
///
/// ```no_run
/// use sqsplus::{QueueTarget, SqsQueue};
///
/// # async fn example() -> sqsplus::Result<()> {
/// let config = aws_config::from_env().load().await;
/// let queue = SqsQueue::from_config(config);
///
/// let target = QueueTarget::resolve(&queue, "orders").await?;
/// println!("{}", target.url());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SqsQueue {
    /// The AWS SDK configuration used for SQS operations
    pub config: SdkConfig,
    /// The SQS client instance
    pub client: sqs::Client,
}

impl SqsQueue {
    /// Creates a client from a pre-built AWS SDK config.
    ///
    /// The caller decides credentials, region and endpoint (e.g. a `--local`
    /// flag pointing at LocalStack).
    pub fn from_config(config: SdkConfig) -> Self {
        let client = sqs::Client::new(&config);
        Self { config, client }
    }
}

fn sdk_error<E, R>(err: SdkError<E, R>) -> BoxError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    DisplayErrorContext(err).to_string().into()
}

#[async_trait]
impl QueueService for SqsQueue {
    async fn queue_url(&self, name: &str) -> Result<Option<String>, BoxError> {
        match self.client.get_queue_url().queue_name(name).send().await {
            Ok(output) => Ok(output.queue_url),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_queue_does_not_exist()) =>
            {
                Ok(None)
            }
            Err(err) => Err(sdk_error(err)),
        }
    }

    async fn send_batch(
        &self,
        queue_url: &str,
        entries: &[BatchEntry],
    ) -> Result<Vec<FailedEntry>, BoxError> {
        let entries = entries
            .iter()
            .map(|entry| {
                SendMessageBatchRequestEntry::builder()
                    .id(entry.id.as_str())
                    .message_body(&entry.body)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let output = self
            .client
            .send_message_batch()
            .queue_url(queue_url)
            .set_entries(Some(entries))
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(output
            .failed()
            .iter()
            .map(|failed| FailedEntry {
                id: failed.id().to_string(),
                code: failed.code().to_string(),
                message: failed.message().map(str::to_string),
                sender_fault: failed.sender_fault(),
            })
            .collect())
    }

    /// Follows `NextToken` until every page has been read.
    async fn list_queue_urls(&self) -> Result<Vec<String>, BoxError> {
        let mut queues = Vec::new();

        let mut output = self.client.list_queues().send().await.map_err(sdk_error)?;
        loop {
            if let Some(mut list) = output.queue_urls {
                queues.append(&mut list);
            }

            let Some(token) = output.next_token else {
                break;
            };

            output = self
                .client
                .list_queues()
                .set_next_token(Some(token))
                .send()
                .await
                .map_err(sdk_error)?;
        }

        Ok(queues)
    }

    async fn queue_attributes(&self, queue_url: &str) -> Result<BTreeMap<String, String>, BoxError> {
        let output = self
            .client
            .get_queue_attributes()
            .queue_url(queue_url)
            .attribute_names(QueueAttributeName::All)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(output
            .attributes
            .unwrap_or_default()
            .into_iter()
            .map(|(name, value)| (name.as_str().to_string(), value))
            .collect())
    }

    async fn queue_tags(&self, queue_url: &str) -> Result<BTreeMap<String, String>, BoxError> {
        let output = self
            .client
            .list_queue_tags()
            .queue_url(queue_url)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(output.tags.unwrap_or_default().into_iter().collect())
    }
}
