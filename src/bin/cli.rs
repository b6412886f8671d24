//! tarkv CLI
//!
//! Command-line interface for a tar-backed key-value store.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tarkv::{keygen, Config, Store, SyncStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// tarkv CLI
#[derive(Parser, Debug)]
#[command(name = "tarkv")]
#[command(about = "Key-value store kept inside a tar archive")]
#[command(version)]
struct Args {
    /// Archive file (created if missing)
    #[arg(short, long, default_value = "store.tar")]
    file: PathBuf,

    /// When to fsync appended records
    #[arg(short, long, value_enum, default_value = "on-close")]
    sync: SyncArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SyncArg {
    EveryWrite,
    OnClose,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every key
    Keys,

    /// Print the value of a key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Put {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Report whether a key exists
    Exists {
        /// The key to check
        key: String,
    },

    /// Print every key with its value
    Dump,

    /// List and dump the archive, then write "test" under a random key
    Demo {
        /// Length of the generated key
        #[arg(short, long, default_value = "12")]
        key_len: usize,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tarkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("tarkv v{}", tarkv::VERSION);
    tracing::info!("Archive: {}", args.file.display());

    let sync_strategy = match args.sync {
        SyncArg::EveryWrite => SyncStrategy::EveryWrite,
        SyncArg::OnClose => SyncStrategy::OnClose,
    };
    let config = Config::builder()
        .path(&args.file)
        .sync_strategy(sync_strategy)
        .build();

    let store = match Store::open_with(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open {}: {}", args.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = run(&store, args.command);
    let closed = store.close();

    match (outcome, closed) {
        (Ok(code), Ok(())) => code,
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(store: &Store, command: Commands) -> tarkv::Result<ExitCode> {
    match command {
        Commands::Keys => {
            for key in store.keys() {
                println!("{}", key);
            }
        }
        Commands::Get { key } => match store.read(&key) {
            Ok(value) => println!("{}", String::from_utf8_lossy(&value)),
            Err(e) if e.is_not_found() => {
                eprintln!("{}", e);
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => return Err(e),
        },
        Commands::Put { key, value } => store.write(&key, value.as_bytes())?,
        Commands::Exists { key } => println!("{}", store.exists(&key)),
        Commands::Dump => dump(store)?,
        Commands::Demo { key_len } => {
            println!("Keys: {:?}", store.keys());
            dump(store)?;

            let key = keygen::random_key(&mut rand::thread_rng(), key_len);
            store.write(&key, b"test")?;
            tracing::info!("Wrote demo record {}", key);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn dump(store: &Store) -> tarkv::Result<()> {
    for key in store.keys() {
        let value = store.read(&key)?;
        println!("{} {}", key, String::from_utf8_lossy(&value).trim());
    }
    Ok(())
}
