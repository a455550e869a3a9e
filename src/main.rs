use clap::Parser;
use fastasplit::cli::{self, Args, SplitConfig};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode
{
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level())).init();

    match SplitConfig::try_from(&args).and_then(|config| cli::run(&config))
    {
        Ok(summary) =>
        {
            info!("Created {} files", summary.destinations.len());
            ExitCode::SUCCESS
        }
        Err(e) =>
        {
            eprintln!("fastasplit: {}", e);
            ExitCode::FAILURE
        }
    }
}
