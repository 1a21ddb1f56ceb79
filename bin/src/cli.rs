use clap::Parser;

/// Export a point-in-time snapshot of ZeroLend user balances on Zircuit to
/// `out/tvl-snapshot-zerolend.csv`.
#[derive(Parser, Debug)]
#[command(name = "tvl-snapshot-zerolend", bin_name = "tvl-snapshot-zerolend", version)]
pub struct Cli {}
