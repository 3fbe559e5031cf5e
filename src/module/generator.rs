use super::substitution::substitute_placeholders;
use crate::core::{CatalogError, CatalogResult};
use crate::template::TemplateMetadata;
use std::collections::HashMap;

/// Script skeleton; `${FIELD}` markers are filled at generation time.
const MODULE_TEMPLATE: &str = include_str!("deploy_module.py");

/// Rancher API endpoint and credentials baked into generated modules
#[derive(Debug, Clone)]
pub struct RancherEndpoint {
    /// Project-scoped API root, e.g. `http://rancher:8080/v2-beta/projects/1a5`
    pub url: String,
    pub access_key: String,
    pub secret_key: String,
}

/// Generates the CMP module that deploys a template
pub struct ModuleSourceGenerator;

impl ModuleSourceGenerator {
    /// Generate module source for a template.
    ///
    /// The compose documents are frozen into the script; the module never
    /// reads the catalog checkout when it runs.
    pub fn generate(metadata: &TemplateMetadata, endpoint: &RancherEndpoint) -> CatalogResult<String> {
        let (docker_compose, rancher_compose) = Self::compose_texts(metadata)?;
        let version_dir = metadata
            .compose
            .as_ref()
            .map(|c| c.version_dir.as_str())
            .unwrap_or_default();

        let mut fields = HashMap::new();
        fields.insert("TEMPLATE_NAME".to_string(), single_line(&metadata.short_name));
        fields.insert("TEMPLATE_VERSION".to_string(), single_line(&metadata.version));
        fields.insert("VERSION_DIR".to_string(), single_line(version_dir));
        fields.insert("TEMPLATE_LITERAL".to_string(), string_literal(&metadata.short_name)?);
        fields.insert("RANCHER_URL".to_string(), string_literal(&endpoint.url)?);
        fields.insert("RANCHER_ACCESS_KEY".to_string(), string_literal(&endpoint.access_key)?);
        fields.insert("RANCHER_SECRET_KEY".to_string(), string_literal(&endpoint.secret_key)?);
        fields.insert("DOCKER_COMPOSE".to_string(), string_literal(&docker_compose)?);
        fields.insert("RANCHER_COMPOSE".to_string(), string_literal(&rancher_compose)?);

        Ok(substitute_placeholders(MODULE_TEMPLATE, &fields))
    }

    /// Text of the docker-compose and rancher-compose files, as written
    /// in the template.
    ///
    /// The rancher-compose text is empty when the template has none.
    pub fn compose_texts(metadata: &TemplateMetadata) -> CatalogResult<(String, String)> {
        let compose = metadata.compose.as_ref().ok_or_else(|| {
            CatalogError::Config(format!(
                "Template '{}' has no version directory with a docker-compose.yml",
                metadata.short_name
            ))
        })?;

        let rancher_compose = compose
            .rancher_compose
            .as_ref()
            .map(|rancher| rancher.text.clone())
            .unwrap_or_default();

        Ok((compose.docker_compose.clone(), rancher_compose))
    }
}

/// A JSON string literal, which is also a valid Python string literal.
fn string_literal(text: &str) -> CatalogResult<String> {
    Ok(serde_json::to_string(text)?)
}

fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}
