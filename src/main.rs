use std::process::ExitCode;

use clap::Parser;
use fincalc::calculators::{evaluate_slug, registry, share};
use fincalc::config::{Cli, Command, ComputeArgs};
use fincalc::error::CalcError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Serve(args) => serve(args.addr()).await,
        Command::List => {
            for entry in registry() {
                println!("{:<22} {}", entry.slug, entry.title);
            }
            Ok(())
        }
        Command::Compute(args) => compute(&args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(addr: std::net::SocketAddr) -> Result<(), CalcError> {
    fincalc::reference::preload()?;
    fincalc::api::run_http_server(addr).await?;
    Ok(())
}

fn compute(args: &ComputeArgs) -> Result<(), CalcError> {
    let raw = share::query_to_raw(&args.query)?;
    let evaluation = evaluate_slug(&args.slug, &raw)?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&evaluation)?
    } else {
        serde_json::to_string(&evaluation)?
    };
    println!("{json}");
    Ok(())
}
