//! Queue listing with optional name filters.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::queue::QueueService;

/// A queue and, when requested, its tags and attributes.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct QueueInfo {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

/// Selects queues by name.
///
/// An empty filter selects every queue. In partial mode a name also matches
/// when it contains one of the filters, ignoring case.
#[derive(Clone, Debug, Default)]
pub struct QueueFilter {
    names: Vec<String>,
    partial: bool,
}

impl QueueFilter {
    pub fn exact<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            partial: false,
        }
    }

    pub fn partial<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            partial: true,
            ..Self::exact(names)
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        if self.names.is_empty() {
            return true;
        }
        let lower = name.to_lowercase();
        self.names.iter().any(|wanted| {
            wanted == name || (self.partial && lower.contains(&wanted.to_lowercase()))
        })
    }
}

/// The queue name is the last path segment of its URL.
pub fn queue_name(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or(url)
}

/// Lists the queues selected by `filter`, fetching tags and attributes for
/// each when `with_details` is set.
pub async fn list_queues<Q>(
    queue: &Q,
    filter: &QueueFilter,
    with_details: bool,
) -> Result<Vec<QueueInfo>>
where
    Q: QueueService + ?Sized,
{
    let urls = queue.list_queue_urls().await.map_err(Error::List)?;
    log::debug!("found {} queues", urls.len());

    let mut queues = Vec::new();
    for url in urls {
        let name = queue_name(&url).to_string();
        if !filter.matches(&name) {
            continue;
        }

        let (tags, attributes) = if with_details {
            let describe = |source| Error::Describe {
                url: url.clone(),
                source,
            };
            let attributes = queue.queue_attributes(&url).await.map_err(describe)?;
            let tags = queue.queue_tags(&url).await.map_err(describe)?;
            (Some(tags), Some(attributes))
        } else {
            (None, None)
        };

        queues.push(QueueInfo {
            name,
            url,
            tags,
            attributes,
        });
    }

    Ok(queues)
}
