use crate::batch::Batch;
use crate::error::{Error, Result, SendFailure};
use crate::queue::{QueueService, QueueTarget};

/// Receives `(sent, total)` after every batch the queue accepts.
pub trait Progress {
    fn update(&mut self, sent: usize, total: usize);
}

impl<F: FnMut(usize, usize)> Progress for F {
    fn update(&mut self, sent: usize, total: usize) {
        (*self)(sent, total)
    }
}

/// Outcome of a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub sent: usize,
    pub total: usize,
    pub batches: usize,
}

/// Sends one batch to `target`.
///
/// Entries rejected by the service fail the batch just like a failed request.
pub async fn send_batch<Q>(
    queue: &Q,
    target: &QueueTarget,
    batch: &Batch,
) -> std::result::Result<(), SendFailure>
where
    Q: QueueService + ?Sized,
{
    // SQS doesn't allow empty batch requests
    if batch.is_empty() {
        return Ok(());
    }

    let failed = queue
        .send_batch(target.url(), batch.entries())
        .await
        .map_err(SendFailure::Service)?;

    if failed.is_empty() {
        Ok(())
    } else {
        Err(SendFailure::Entries(failed))
    }
}

/// Sends `batches` to `target` one at a time, in order.
///
/// The first failing batch ends the run: later batches are never attempted and
/// batches already sent stay sent. `progress` is told about every accepted
/// batch.
pub async fn send_batches<Q, P>(
    queue: &Q,
    target: &QueueTarget,
    batches: &[Batch],
    progress: &mut P,
) -> Result<SubmissionRecord>
where
    Q: QueueService + ?Sized,
    P: Progress + ?Sized,
{
    let total = batches.iter().map(Batch::len).sum();
    let mut record = SubmissionRecord {
        sent: 0,
        total,
        batches: batches.len(),
    };

    for batch in batches {
        log::debug!(
            "sending batch {}/{} ({} messages) to {}",
            batch.number(),
            batches.len(),
            batch.len(),
            target.url()
        );

        if let Err(source) = send_batch(queue, target, batch).await {
            log::debug!("batch {}/{} failed: {source}", batch.number(), batches.len());
            return Err(Error::Submission {
                batch: batch.number(),
                batches: batches.len(),
                sent: record.sent,
                total,
                source,
            });
        }

        record.sent += batch.len();
        progress.update(record.sent, total);
    }

    log::info!(
        "sent {} messages in {} batches to {}",
        record.sent,
        record.batches,
        target.url()
    );
    Ok(record)
}
