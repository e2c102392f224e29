use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use walletflow::application::controller::FlowController;
use walletflow::application::wallet::Wallet;
use walletflow::config::WalletConfig;
use walletflow::domain::contact::ContactDirectory;
use walletflow::domain::ports::PersistenceBox;
use walletflow::infrastructure::in_memory::InMemoryStore;
use walletflow::infrastructure::json_file::JsonFileStore;
#[cfg(feature = "storage-rocksdb")]
use walletflow::infrastructure::rocksdb::RocksDbStore;
use walletflow::interfaces::console::{ConsoleView, parse_command};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file overriding delays, starting balance and bank name
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file holding the wallet state. Without it state lives in memory.
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Path to a RocksDB database (optional). Requires the storage-rocksdb feature.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn open_store(cli: &Cli) -> walletflow::error::Result<PersistenceBox> {
    if let Some(db_path) = &cli.db_path {
        #[cfg(feature = "storage-rocksdb")]
        {
            return Ok(Box::new(RocksDbStore::open(db_path)?));
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        {
            let fallback = db_path.with_extension("json");
            warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to JSON file storage at {}.",
                fallback.display()
            );
            return Ok(Box::new(JsonFileStore::open(fallback)?));
        }
    }

    match &cli.data_file {
        Some(path) => Ok(Box::new(JsonFileStore::open(path)?)),
        None => Ok(Box::new(InMemoryStore::new())),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_ansi(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => WalletConfig::load(path).into_diagnostic()?,
        None => WalletConfig::default(),
    };
    let store = open_store(&cli).into_diagnostic()?;
    let starting_balance = config.starting_balance().into_diagnostic()?;
    let mut wallet = Wallet::hydrate(store, starting_balance)
        .await
        .into_diagnostic()?;

    let view = ConsoleView::new(std::io::stdout());
    let mut controller = FlowController::new(config, ContactDirectory::default(), Box::new(view));

    // Intents from stdin and timer events are applied on this one task.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.into_diagnostic()? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(intents) => {
                        for intent in intents {
                            controller.handle(&mut wallet, intent).await.into_diagnostic()?;
                        }
                    }
                    Err(e) => eprintln!("Error reading command: {}", e),
                }
            }
            Some(event) = controller.next_timer() => {
                controller.on_timer(&mut wallet, event).await.into_diagnostic()?;
            }
        }
    }

    // Let in-flight flows finish before reporting.
    controller.settle(&mut wallet).await.into_diagnostic()?;

    println!(
        "final balance={} unread={}",
        wallet.balance().format(),
        wallet.notifications().unread_count()
    );

    Ok(())
}
