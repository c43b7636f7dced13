use clap::{Parser, Subcommand};

mod list;
mod send;
mod settings;

#[tokio::main(flavor = "current_thread")]
pub async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = cli.run().await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

#[derive(Debug, Parser)]
#[command(name = "sqs-plus", version)]
#[command(
    about = "extends the aws sqs command, making several functions simpler to do",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    settings: settings::Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Lists aws queues
    ListQueues(list::ListQueues),
    /// Send messages to the queue
    SendMessage(send::SendMessage),
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::ListQueues(command) => command.run(&self.settings).await,
            Commands::SendMessage(command) => command.run(&self.settings).await,
        }
    }
}
