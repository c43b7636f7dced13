//! Groups payloads into `SendMessageBatch` requests.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::id::EntryId;
use crate::payload::Payload;

/// SQS accepts at most 10 entries per `SendMessageBatch` call.
pub const MAX_BATCH_SIZE: usize = 10;

/// One message within a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchEntry {
    pub id: EntryId,
    pub body: String,
}

/// An ordered, non-empty group of entries sent in one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch {
    number: usize,
    entries: Vec<BatchEntry>,
}

impl Batch {
    /// 1-based position of this batch in the run.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Batcher {
    size: usize,
}

impl Default for Batcher {
    fn default() -> Self {
        Self {
            size: MAX_BATCH_SIZE,
        }
    }
}

impl Batcher {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 || size > MAX_BATCH_SIZE {
            return Err(Error::InvalidBatchSize {
                size,
                max: MAX_BATCH_SIZE,
            });
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Splits `payloads` into `ceil(len / size)` batches, preserving order.
    ///
    /// Every batch but the last holds exactly `size` entries. Each entry id is
    /// derived from the message body; a body repeated within one batch gets a
    /// `-{position}` suffix so ids stay unique inside the request.
    pub fn batch(&self, payloads: &[Payload]) -> Result<Vec<Batch>> {
        payloads
            .chunks(self.size)
            .enumerate()
            .map(|(index, chunk)| {
                Ok(Batch {
                    number: index + 1,
                    entries: entries(chunk)?,
                })
            })
            .collect()
    }
}

fn entries(chunk: &[Payload]) -> Result<Vec<BatchEntry>> {
    let mut seen = HashSet::with_capacity(chunk.len());

    chunk
        .iter()
        .enumerate()
        .map(|(position, payload)| {
            let body = payload.to_json()?;
            let mut id = EntryId::for_content(body.as_bytes());
            if !seen.insert(id.clone()) {
                let unique = id.with_position(position)?;
                log::warn!(
                    "duplicate message from {} in the same batch, sending it as {}",
                    payload.origin.path.display(),
                    unique
                );
                seen.insert(unique.clone());
                id = unique;
            }
            Ok(BatchEntry { id, body })
        })
        .collect()
}
