use std::path::PathBuf;

use clap::{Parser, Subcommand};

use nestegg::store::ProfileStore;

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Deterministic retirement planning engine (growth, allocation, income flows, withdrawal simulations)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the tool-invocation HTTP API.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        /// Directory holding the profile document; defaults to ~/.nestegg.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    nestegg::init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port, data_dir } => {
            let store = match data_dir {
                Some(dir) => ProfileStore::new(dir),
                None => ProfileStore::open_default(),
            };
            if let Err(e) = nestegg::api::run_http_server(port, store).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
    }
}
