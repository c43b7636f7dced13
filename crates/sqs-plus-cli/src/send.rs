use std::path::PathBuf;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use sqsplus::{Batcher, Input, QueueTarget, SqsQueue, MAX_BATCH_SIZE};

use crate::settings::Settings;

/// Send messages to the queue, from either a single file or from a directory
/// containing json files
#[derive(Debug, clap::Args)]
pub struct SendMessage {
    /// Queue name or URL
    #[arg(
        value_name = "QUEUE",
        required_unless_present = "queue_name",
        conflicts_with = "queue_name"
    )]
    queue: Option<String>,

    /// Queue name or URL, as an alternative to the positional argument
    #[arg(short = 'q', long = "queue-name", value_name = "QUEUE")]
    queue_name: Option<String>,

    /// File with one JSON object, or one JSON object per line
    #[arg(
        short,
        long,
        required_unless_present = "directory",
        conflicts_with = "directory"
    )]
    file: Option<PathBuf>,

    /// Directory searched recursively for .json files
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Messages per SendMessageBatch request (1-10)
    #[arg(short, long, default_value_t = MAX_BATCH_SIZE)]
    batch_size: usize,
}

impl SendMessage {
    fn input(&self) -> anyhow::Result<Input> {
        match (&self.file, &self.directory) {
            (Some(file), None) => Ok(Input::File(file.clone())),
            (None, Some(dir)) => Ok(Input::Directory(dir.clone())),
            (Some(_), Some(_)) => anyhow::bail!("only one of --file or --directory can be provided"),
            (None, None) => anyhow::bail!("either --file or --directory must be provided"),
        }
    }

    pub async fn run(self, settings: &Settings) -> anyhow::Result<()> {
        let identifier = self
            .queue
            .as_deref()
            .or(self.queue_name.as_deref())
            .context("a queue name or URL is required")?;
        let input = self.input()?;
        let batcher = Batcher::new(self.batch_size)?;

        // everything is read and validated before the queue is contacted
        let payloads = sqsplus::discover(&input)?;
        if payloads.is_empty() {
            println!("No messages found");
            return Ok(());
        }
        let batches = batcher.batch(&payloads)?;

        let queue = SqsQueue::from_config(settings.sdk_config().await);
        let target = QueueTarget::resolve(&queue, identifier).await?;
        log::info!(
            "sending {} messages in {} batches to {}",
            payloads.len(),
            batches.len(),
            target.url()
        );

        let bar = progress_bar(payloads.len())?;
        let mut progress = |sent: usize, total: usize| {
            bar.set_length(total as u64);
            bar.set_position(sent as u64);
        };
        let result = sqsplus::send_batches(&queue, &target, &batches, &mut progress).await;

        match result {
            Ok(record) => {
                bar.finish_and_clear();
                println!(
                    "Sent {} messages to {} in {} batches",
                    record.sent,
                    target.url(),
                    record.batches
                );
                Ok(())
            }
            Err(e) => {
                bar.abandon();
                Err(e.into())
            }
        }
    }
}

fn progress_bar(total: usize) -> anyhow::Result<ProgressBar> {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} messages ({eta})")?
            .progress_chars("#>-"),
    );
    Ok(bar)
}
