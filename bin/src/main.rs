mod cli;
mod log;
mod panic_hook;

use clap::Parser;
use tvl_snapshot::SnapshotConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    panic_hook::set();
    log::init();

    let _cli = cli::Cli::parse();

    match tvl_snapshot::snapshot(&SnapshotConfig::default()).await {
        Ok(_) => tracing::info!("Done"),
        Err(err) => {
            tracing::error!("Error: {err}");
            std::process::exit(1);
        }
    }
}
