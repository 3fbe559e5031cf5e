use catalog_sync::core::CatalogError;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "catalog-sync")]
#[command(about = "Synchronize the Rancher community catalog into the CMP service catalog")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update CMP modules, service definitions and the service catalog
    Sync(cli::sync::SyncArgs),
    /// List templates found in the local catalog
    List {
        #[command(flatten)]
        catalog: cli::CatalogArgs,
        /// Search query to filter templates
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Preview a template's compose documents with options substituted
    Render {
        #[command(flatten)]
        catalog: cli::CatalogArgs,
        /// Template directory name
        template: String,
        /// Order option as KEY=VALUE (repeatable)
        #[arg(short, long = "option", value_parser = cli::render::parse_option)]
        option: Vec<(String, String)>,
    },
    /// Store CMP and Rancher credentials in the OS keychain
    Login,
}

#[tokio::main]
async fn main() -> Result<(), CatalogError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sync(args) => cli::sync::run(args).await,
        Commands::List { catalog, search } => cli::list::run(catalog, search),
        Commands::Render {
            catalog,
            template,
            option,
        } => cli::render::run(catalog, template, option),
        Commands::Login => cli::login::run(),
    };

    // Display error with helpful suggestions
    if let Err(ref e) = result {
        eprintln!("\n{}", catalog_sync::core::format_error_with_help(e));
    }

    result
}
