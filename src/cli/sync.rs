use super::{print_template, scan_catalog, CatalogArgs};
use catalog_sync::cmp::CmpClient;
use catalog_sync::core::credentials::{
    CredentialStore, CMP_API_KEY, CMP_SECRET_KEY, RANCHER_ACCESS_KEY, RANCHER_SECRET_KEY,
};
use catalog_sync::core::CatalogResult;
use catalog_sync::module::RancherEndpoint;
use catalog_sync::sync::{CatalogReconciler, SyncReport};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
    /// CMP API root URL
    #[arg(long)]
    pub cmp_url: Option<String>,
    /// Rancher project API root embedded in generated modules
    #[arg(long)]
    pub rancher_url: Option<String>,
    /// CMP API key (basic auth username)
    #[arg(long, env = "CMP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// CMP secret key (basic auth password)
    #[arg(long, env = "CMP_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,
    /// Rancher access key
    #[arg(long, env = "RANCHER_ACCESS_KEY", hide_env_values = true)]
    pub rancher_access_key: Option<String>,
    /// Rancher secret key
    #[arg(long, env = "RANCHER_SECRET_KEY", hide_env_values = true)]
    pub rancher_secret_key: Option<String>,
}

pub async fn run(args: SyncArgs) -> CatalogResult<()> {
    let mut config = args.catalog.load_config()?;
    if let Some(url) = args.cmp_url {
        config.cmp_base_url = url;
    }
    if let Some(url) = args.rancher_url {
        config.rancher_url = url;
    }

    let catalog = scan_catalog(&config)?;
    for template in &catalog.templates {
        print_template(template);
    }

    let api_key = CredentialStore::resolve(args.api_key, CMP_API_KEY)?;
    let secret_key = CredentialStore::resolve(args.secret_key, CMP_SECRET_KEY)?;
    let endpoint = RancherEndpoint {
        url: config.rancher_url.clone(),
        access_key: CredentialStore::resolve(args.rancher_access_key, RANCHER_ACCESS_KEY)?,
        secret_key: CredentialStore::resolve(args.rancher_secret_key, RANCHER_SECRET_KEY)?,
    };

    println!();
    println!("Synchronizing with {}...", config.cmp_base_url);
    let client = CmpClient::new(&config.cmp_base_url, &api_key, &secret_key)?;
    let report = CatalogReconciler::new(&client, &endpoint, &config.module)
        .reconcile(&catalog.templates)
        .await?;

    print_report(&report);
    println!("Done.");

    Ok(())
}

fn print_report(report: &SyncReport) {
    for name in &report.modules_created {
        println!("  ✓ Created module {}", name);
    }
    for name in &report.modules_updated {
        println!("  ✓ Updated module {}", name);
    }
    for name in &report.service_defs_created {
        println!("  ✓ Created service definition {}", name);
    }
    for (name, reason) in &report.skipped {
        println!("  - Skipped {}: {}", name, reason);
    }
    println!(
        "Service catalog: {} entr(ies), {} added",
        report.catalog.service_defs.len(),
        report.catalog_ids_added.len()
    );
}
