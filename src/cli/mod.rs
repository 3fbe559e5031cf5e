pub mod list;
pub mod login;
pub mod render;
pub mod sync;

use catalog_sync::config::Config;
use catalog_sync::core::path::templates_dir;
use catalog_sync::core::CatalogResult;
use catalog_sync::repo::{ensure_local_copy, LocalCopy};
use catalog_sync::template::{TemplateCatalog, TemplateMetadata};
use clap::Args;
use std::path::PathBuf;

/// Options shared by every command that reads the catalog checkout
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Local catalog checkout (cloned if missing)
    #[arg(long)]
    pub repo_dir: Option<PathBuf>,
}

impl CatalogArgs {
    pub fn load_config(&self) -> CatalogResult<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(dir) = &self.repo_dir {
            config.repo_dir = Some(dir.to_string_lossy().to_string());
        }
        Ok(config)
    }
}

/// Make sure the catalog is checked out, then scan its templates
pub fn scan_catalog(config: &Config) -> CatalogResult<TemplateCatalog> {
    let repo_dir = config.get_repo_dir()?;

    println!("Looking for local catalog...");
    match ensure_local_copy(&config.catalog_repo_url, &repo_dir)? {
        LocalCopy::Existing => println!("Found local catalog in '{}'...", repo_dir.display()),
        LocalCopy::Cloned => println!(
            "✓ Cloned {} into '{}'",
            config.catalog_repo_url,
            repo_dir.display()
        ),
    }

    println!("Scanning catalog...");
    let catalog = TemplateCatalog::discover(&templates_dir(&repo_dir))?;

    for skipped in &catalog.skipped {
        eprintln!(
            "Warning: skipped template {}: {}",
            skipped.dir.display(),
            skipped.reason
        );
    }

    Ok(catalog)
}

/// One line per template, followed by its questions sorted by label
pub fn print_template(template: &TemplateMetadata) {
    println!(
        "\t[{}] {} - DC={}, RC={}",
        template.category,
        template.name,
        template.has_compose_dir(),
        template.has_rancher_compose()
    );

    let mut questions: Vec<_> = template.questions().iter().collect();
    questions.sort_by(|a, b| a.label().cmp(b.label()));
    for question in questions {
        println!("\t\t{} ({})", question.label(), question.variable);
    }
}
