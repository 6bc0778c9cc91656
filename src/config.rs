use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "fincalc", version, about = "Personal finance calculators")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the web UI and JSON API.
    Serve(ServeArgs),
    /// List calculator slugs and titles.
    List,
    /// Evaluate one calculator and print the result as JSON.
    Compute(ComputeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "FINCALC_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
    #[arg(long, env = "FINCALC_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Args)]
pub struct ComputeArgs {
    /// Calculator slug, e.g. `mortgage`.
    pub slug: String,
    #[arg(
        long,
        default_value = "",
        help = "Field values as a query string, e.g. \"principal=25000&termMonths=48\""
    )]
    pub query: String,
    #[arg(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_flags_override_defaults() {
        let cli = Cli::try_parse_from(["fincalc", "serve", "--host", "127.0.0.1", "--port", "9000"])
            .expect("valid args");
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.addr(), SocketAddr::from(([127, 0, 0, 1], 9000)));
    }

    #[test]
    fn compute_takes_slug_and_query() {
        let cli = Cli::try_parse_from([
            "fincalc",
            "compute",
            "loan",
            "--query",
            "principal=1000&termMonths=12",
        ])
        .expect("valid args");
        let Command::Compute(args) = cli.command else {
            panic!("expected compute");
        };
        assert_eq!(args.slug, "loan");
        assert_eq!(args.query, "principal=1000&termMonths=12");
        assert!(!args.pretty);
    }

    #[test]
    fn compute_requires_a_slug() {
        assert!(Cli::try_parse_from(["fincalc", "compute"]).is_err());
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Cli::try_parse_from(["fincalc", "serve", "--port", "70000"]).is_err());
    }
}
