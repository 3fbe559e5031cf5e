use super::{print_template, scan_catalog, CatalogArgs};
use catalog_sync::core::CatalogResult;

pub fn run(args: CatalogArgs, search: Option<String>) -> CatalogResult<()> {
    let config = args.load_config()?;
    let mut catalog = scan_catalog(&config)?;

    if let Some(query) = &search {
        let query_lower = query.to_lowercase();
        catalog.templates.retain(|t| {
            t.name.to_lowercase().contains(&query_lower)
                || t.short_name.to_lowercase().contains(&query_lower)
                || t.description.to_lowercase().contains(&query_lower)
        });
    }

    if catalog.templates.is_empty() {
        match &search {
            Some(query) => println!("No templates found matching '{}'.", query),
            None => println!("No templates found."),
        }
        return Ok(());
    }

    for template in &catalog.templates {
        print_template(template);
    }

    let deployable = catalog.deployable().count();
    println!();
    println!(
        "{} template(s), {} deployable, {} skipped",
        catalog.templates.len(),
        deployable,
        catalog.skipped.len()
    );

    Ok(())
}
