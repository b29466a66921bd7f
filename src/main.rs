use asn_cidr_summary::cli::Args;
use asn_cidr_summary::logging::{init_logging, LOG_CONFIG_FILE};
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging(LOG_CONFIG_FILE);
    log::info!("#Start main()");

    let args = Args::parse();
    match asn_cidr_summary::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red());
            ExitCode::FAILURE
        }
    }
}
