use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::batch::BatchEntry;
use crate::error::{BoxError, FailedEntry};
use crate::queue::QueueService;

/// In-memory queue service that records every call.
#[derive(Default)]
pub struct FakeQueue {
    queues: Vec<String>,
    fail_lookups: bool,
    fail_batch: Option<usize>,
    reject: Option<(usize, FailedEntry)>,
    lookups: Mutex<Vec<String>>,
    attempts: Mutex<usize>,
    sent: Mutex<Vec<(String, Vec<BatchEntry>)>>,
}

impl FakeQueue {
    pub fn url_for(name: &str) -> String {
        format!("http://sqs.us-east-1.localhost.localstack.cloud:4566/000000000000/{name}")
    }

    pub fn with_queue(mut self, name: &str) -> Self {
        self.queues.push(name.to_string());
        self
    }

    pub fn failing_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    /// The `number`th send request (1-based) fails outright.
    pub fn failing_batch(mut self, number: usize) -> Self {
        self.fail_batch = Some(number);
        self
    }

    /// The `number`th send request (1-based) reports `entry` as failed.
    pub fn rejecting(mut self, number: usize, entry: FailedEntry) -> Self {
        self.reject = Some((number, entry));
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    /// Send requests made, including failed ones.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    /// Batches the fake accepted, with the queue URL each went to.
    pub fn sent(&self) -> Vec<(String, Vec<BatchEntry>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueService for FakeQueue {
    async fn queue_url(&self, name: &str) -> Result<Option<String>, BoxError> {
        self.lookups.lock().unwrap().push(name.to_string());
        if self.fail_lookups {
            return Err("AccessDenied".into());
        }
        Ok(self
            .queues
            .iter()
            .find(|q| q.as_str() == name)
            .map(|q| Self::url_for(q)))
    }

    async fn send_batch(
        &self,
        queue_url: &str,
        entries: &[BatchEntry],
    ) -> Result<Vec<FailedEntry>, BoxError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };

        if self.fail_batch == Some(attempt) {
            return Err("RequestThrottled".into());
        }
        if let Some((number, entry)) = &self.reject {
            if *number == attempt {
                return Ok(vec![entry.clone()]);
            }
        }

        self.sent
            .lock()
            .unwrap()
            .push((queue_url.to_string(), entries.to_vec()));
        Ok(Vec::new())
    }

    async fn list_queue_urls(&self) -> Result<Vec<String>, BoxError> {
        Ok(self.queues.iter().map(|q| Self::url_for(q)).collect())
    }

    async fn queue_attributes(&self, queue_url: &str) -> Result<BTreeMap<String, String>, BoxError> {
        let name = crate::list::queue_name(queue_url);
        Ok(BTreeMap::from([
            (
                "QueueArn".to_string(),
                format!("arn:aws:sqs:us-east-1:000000000000:{name}"),
            ),
            ("VisibilityTimeout".to_string(), "30".to_string()),
        ]))
    }

    async fn queue_tags(&self, queue_url: &str) -> Result<BTreeMap<String, String>, BoxError> {
        let name = crate::list::queue_name(queue_url);
        Ok(BTreeMap::from([("queue".to_string(), name.to_string())]))
    }
}
