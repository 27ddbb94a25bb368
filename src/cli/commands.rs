use crate::diagnostics::report_diagnostics;
use crate::generator::generate_from_description;
use crate::registry::load_description;
use crate::server::{ClientCodeService, HttpServer};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for routesmith.
///
/// Provides commands for generating a typed client from a service
/// description, serving it over HTTP, and fetching it from a running
/// service.
#[derive(Parser)]
#[command(name = "routesmith")]
#[command(about = "routesmith CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for routesmith
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a typed client from a service description
    Generate {
        /// Path to the service description file (YAML or JSON)
        #[arg(short, long)]
        registry: PathBuf,

        /// Output file for the generated client (default: {slug}_client.rs)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name for the generated client type (default: derived from the
        /// service name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Serve the generated client for download
    Serve {
        /// Path to the service description file (YAML or JSON)
        #[arg(short, long)]
        registry: PathBuf,

        /// Address and port to bind the server to
        #[arg(long, default_value = "0.0.0.0:8080", env = "ROUTESMITH_ADDR")]
        addr: String,

        /// Name for the generated client type
        #[arg(long)]
        name: Option<String>,

        /// Route paths to leave out of the generated client
        #[arg(long)]
        exclude: Vec<String>,
    },
    /// Download a generated client from a running service
    Fetch {
        /// Base URL of the serving endpoint
        #[arg(long)]
        url: String,

        /// Destination file for the downloaded client
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Execute the CLI command provided by the user.
///
/// # Errors
///
/// Returns an error if the service description cannot be loaded, generation
/// fails, the server fails to start, or the fetch fails; the binary maps
/// that to a non-zero exit code.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            registry,
            output,
            name,
        } => {
            let description = load_description(registry)?;
            let (source, diagnostics) =
                generate_from_description(&description, name.as_deref())?;
            report_diagnostics(&diagnostics);
            let output = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("{}_client.rs", description.slug())));
            std::fs::write(&output, source)?;
            println!("✅ Generated client → {output:?}");
            Ok(())
        }
        Commands::Serve {
            registry,
            addr,
            name,
            exclude,
        } => {
            let description = load_description(registry)?;
            let service = ClientCodeService::new(description, name.clone(), exclude);
            let handle = HttpServer(service).start(addr.as_str())?;
            println!("🚀 Serving generated client on {addr}");
            handle
                .join()
                .map_err(|e| anyhow::anyhow!("server thread failed: {e:?}"))?;
            Ok(())
        }
        Commands::Fetch { url, output } => crate::fetch::fetch_client(url, output),
    }
}
