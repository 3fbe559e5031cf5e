use super::{scan_catalog, CatalogArgs};
use catalog_sync::core::{CatalogError, CatalogResult};
use catalog_sync::module::{placeholders, substitute_placeholders, ModuleSourceGenerator};
use catalog_sync::template::metadata::{DOCKER_COMPOSE_FILE, RANCHER_COMPOSE_FILE};
use std::collections::{BTreeSet, HashMap};

/// Parse a `KEY=VALUE` option
pub fn parse_option(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// Print a template's compose documents with order options applied,
/// as the generated module would submit them.
pub fn run(args: CatalogArgs, template: String, options: Vec<(String, String)>) -> CatalogResult<()> {
    let config = args.load_config()?;
    let catalog = scan_catalog(&config)?;

    let metadata = catalog
        .find(&template)
        .ok_or_else(|| CatalogError::Config(format!("Template '{}' not found", template)))?;

    // Declared defaults first, explicit options win
    let mut variables: HashMap<String, String> = metadata
        .questions()
        .iter()
        .filter_map(|q| q.default_text().map(|d| (q.variable.clone(), d)))
        .collect();
    variables.extend(options);

    let (docker_compose, rancher_compose) = ModuleSourceGenerator::compose_texts(metadata)?;
    let docker_compose = substitute_placeholders(&docker_compose, &variables);
    let rancher_compose = substitute_placeholders(&rancher_compose, &variables);

    let version_dir = metadata
        .path
        .join(metadata.compose.as_ref().map(|c| c.version_dir.as_str()).unwrap_or_default());

    println!("# {}", version_dir.join(DOCKER_COMPOSE_FILE).display());
    print!("{}", docker_compose);
    if !rancher_compose.is_empty() {
        println!();
        println!("# {}", version_dir.join(RANCHER_COMPOSE_FILE).display());
        print!("{}", rancher_compose);
    }

    let unresolved: BTreeSet<String> = placeholders(&docker_compose)
        .into_iter()
        .chain(placeholders(&rancher_compose))
        .collect();
    if !unresolved.is_empty() {
        eprintln!(
            "Warning: unresolved placeholders: {}",
            unresolved.into_iter().collect::<Vec<_>>().join(", ")
        );
    }

    Ok(())
}
