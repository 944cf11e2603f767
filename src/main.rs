use clap::Parser;

use erp_metrics::cli::{self, Cli};
use erp_metrics::logging::init_tracing;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
