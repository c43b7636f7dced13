//! # sqs-plus-core
//!
//! Core library for sending JSON messages from disk to AWS SQS.
//!
//! The send pipeline reads payloads from a file or directory, assigns each a
//! content-derived entry id, groups them into batches of at most ten and sends
//! the batches one after another, stopping at the first failure.
//!
//! ## Example
//!
//! ```no_run
//! use sqsplus::{discover, send_batches, Batcher, Input, QueueTarget, SqsQueue};
//!
//! # async fn example() -> sqsplus::Result<()> {
//! let payloads = discover(&Input::Directory("messages".into()))?;
//! let batches = Batcher::default().batch(&payloads)?;
//!
//! let config = aws_config::from_env().load().await;
//! let queue = SqsQueue::from_config(config);
//! let target = QueueTarget::resolve(&queue, "orders").await?;
//!
//! let record = send_batches(&queue, &target, &batches, &mut |sent: usize, total: usize| {
//!     println!("{sent}/{total}");
//! })
//! .await?;
//! println!("sent {} messages", record.sent);
//! # Ok(())
//! # }
//! ```

mod batch;
mod error;
mod id;
mod list;
mod payload;
mod queue;
mod send;
mod sqs;

#[cfg(test)]
mod test_utils;

pub use batch::{Batch, BatchEntry, Batcher, MAX_BATCH_SIZE};
pub use error::{BoxError, DocumentError, Error, FailedEntry, Result, SendFailure};
pub use id::EntryId;
pub use list::{list_queues, queue_name, QueueFilter, QueueInfo};
pub use payload::{
    discover, json_files, parse_file, parse_lines, parse_whole_file, Document, Input, Origin,
    Payload,
};
pub use queue::{QueueService, QueueTarget};
pub use send::{send_batch, send_batches, Progress, SubmissionRecord};
pub use sqs::SqsQueue;
