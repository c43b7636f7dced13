mod common;

use std::collections::HashSet;
use std::fs;

use common::{create_test_queue, local_config, localstack, receive_bodies};
use sqsplus::{discover, send_batches, Batcher, Error, Input, QueueTarget, SqsQueue};

#[tokio::test]
#[ignore = "starts a LocalStack container; needs Docker"]
async fn sends_a_directory_to_localstack() {
    let (endpoint_url, container) = localstack().await.unwrap();
    let queue_url = create_test_queue(&container, "sqs-plus-send").await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    for n in 0..12 {
        fs::write(
            dir.path().join(format!("{n:02}.json")),
            format!(r#"{{"order": {n}}}"#),
        )
        .unwrap();
    }

    let payloads = discover(&Input::Directory(dir.path().to_path_buf())).unwrap();
    let batches = Batcher::default().batch(&payloads).unwrap();

    let config = local_config(&endpoint_url, None).load().await;
    let queue = SqsQueue::from_config(config);

    // resolved by name, then sent to the URL the service returned
    let target = QueueTarget::resolve(&queue, "sqs-plus-send").await.unwrap();
    assert_eq!(
        target.url().rsplit('/').next(),
        queue_url.rsplit('/').next()
    );

    let mut progress = Vec::new();
    let record = send_batches(&queue, &target, &batches, &mut |sent: usize, total: usize| {
        progress.push((sent, total))
    })
    .await
    .unwrap();

    assert_eq!(record.sent, 12);
    assert_eq!(progress, vec![(10, 12), (12, 12)]);

    let received: HashSet<String> = receive_bodies(&queue.client, target.url(), 12)
        .await
        .into_iter()
        .collect();
    let expected: HashSet<String> = (0..12).map(|n| format!(r#"{{"order":{n}}}"#)).collect();
    assert_eq!(received, expected);

    container.stop().await.unwrap();
}

#[tokio::test]
#[ignore = "starts a LocalStack container; needs Docker"]
async fn unknown_queue_is_not_found() {
    let (endpoint_url, container) = localstack().await.unwrap();

    let config = local_config(&endpoint_url, None).load().await;
    let queue = SqsQueue::from_config(config);

    let err = QueueTarget::resolve(&queue, "does-not-exist")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::QueueNotFound(_)), "{err:?}");

    container.stop().await.unwrap();
}
