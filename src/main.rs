use std::path::PathBuf;

use clap::Parser;
use segline_lib::RunOptions;

#[derive(Parser)]
#[command(name = "segline")]
#[command(about = "Replay timeline input scripts and print the resulting events and layout")]
struct Cli {
    /// Timeline settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay script (JSON)
    script: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let options = RunOptions {
        config_path: cli.config,
        script: cli.script,
    };

    if let Err(e) = segline_lib::run(options).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
