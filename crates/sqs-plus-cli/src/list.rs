use std::collections::BTreeMap;
use std::fmt::Write;

use sqsplus::{QueueFilter, QueueInfo, SqsQueue};

use crate::settings::Settings;

/// Lists aws queues based on name or all queues if no name is provided
#[derive(Debug, clap::Args)]
pub struct ListQueues {
    /// List queues with this name; may be repeated
    #[arg(short = 'q', long = "queue-name", value_name = "NAME")]
    names: Vec<String>,

    /// Only list queues whose name matches exactly, instead of containing a
    /// name (case-insensitive)
    #[arg(long)]
    exact: bool,

    /// Skip fetching tags and attributes
    #[arg(long)]
    no_attributes: bool,

    /// Print one JSON object per queue instead of a tree
    #[arg(long)]
    json: bool,
}

impl ListQueues {
    fn filter(&self) -> QueueFilter {
        if self.exact {
            QueueFilter::exact(self.names.iter().cloned())
        } else {
            QueueFilter::partial(self.names.iter().cloned())
        }
    }

    pub async fn run(self, settings: &Settings) -> anyhow::Result<()> {
        let queue = SqsQueue::from_config(settings.sdk_config().await);

        if !self.json {
            println!("Listing queues");
        }
        let queues = sqsplus::list_queues(&queue, &self.filter(), !self.no_attributes).await?;

        if self.json {
            for info in &queues {
                println!("{}", serde_json::to_string(info)?);
            }
            return Ok(());
        }

        if queues.is_empty() {
            println!("No queues found");
            return Ok(());
        }

        print!("{}", render(&queues));
        Ok(())
    }
}

struct Node {
    text: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    fn map(title: &str, entries: &BTreeMap<String, String>) -> Self {
        Self {
            text: title.to_string(),
            children: entries
                .iter()
                .map(|(key, value)| Node::leaf(format!("{key}: {value}")))
                .collect(),
        }
    }

    fn write_children(&self, out: &mut String, prefix: &str) {
        for (i, child) in self.children.iter().enumerate() {
            let last = i + 1 == self.children.len();
            let (branch, indent) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            let _ = writeln!(out, "{prefix}{branch}{}", child.text);
            child.write_children(out, &format!("{prefix}{indent}"));
        }
    }
}

/// Renders queues as a tree: URL first, then tags and attributes.
fn render(queues: &[QueueInfo]) -> String {
    let root = Node {
        text: "Queues".to_string(),
        children: queues
            .iter()
            .map(|info| {
                let mut children = vec![Node::leaf(info.url.as_str())];
                if let Some(tags) = &info.tags {
                    children.push(Node::map("Tags", tags));
                }
                if let Some(attributes) = &info.attributes {
                    children.push(Node::map("Attributes", attributes));
                }
                Node {
                    text: info.name.clone(),
                    children,
                }
            })
            .collect(),
    };

    let mut out = format!("{}\n", root.text);
    root.write_children(&mut out, "");
    out
}
