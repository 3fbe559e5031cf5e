use super::metadata::TemplateMetadata;
use crate::core::{CatalogError, CatalogResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// A template directory that could not be turned into metadata.
#[derive(Debug, Clone)]
pub struct SkippedTemplate {
    pub dir: PathBuf,
    pub reason: String,
}

/// All templates found in a catalog checkout, sorted by `category/name`.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    pub templates: Vec<TemplateMetadata>,
    pub skipped: Vec<SkippedTemplate>,
}

impl TemplateCatalog {
    /// Scan every immediate subdirectory of `templates_dir`.
    ///
    /// Template-scoped failures (bad config.yml, unsupported question types)
    /// are recorded in `skipped`; anything else aborts the scan.
    pub fn discover(templates_dir: &Path) -> CatalogResult<Self> {
        if !templates_dir.is_dir() {
            return Err(CatalogError::Path(format!(
                "Templates directory not found: {}",
                templates_dir.display()
            )));
        }

        let mut catalog = Self::default();

        for entry in WalkDir::new(templates_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let dir = entry.path();
            match Self::load_template(dir) {
                Ok(metadata) => {
                    info!(
                        template = %metadata.short_name,
                        category = %metadata.category,
                        has_compose = metadata.has_compose_dir(),
                        questions = metadata.questions().len(),
                        "discovered template"
                    );
                    catalog.templates.push(metadata);
                }
                Err(e) if e.is_template_scoped() => {
                    warn!(dir = %dir.display(), error = %e, "skipping template");
                    catalog.skipped.push(SkippedTemplate {
                        dir: dir.to_path_buf(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        catalog
            .templates
            .sort_by(|a, b| a.sort_key().cmp(&b.sort_key()).then_with(|| a.short_name.cmp(&b.short_name)));

        Ok(catalog)
    }

    /// Parse a template and check every question type translates.
    fn load_template(dir: &Path) -> CatalogResult<TemplateMetadata> {
        let metadata = TemplateMetadata::load(dir)?;
        for question in metadata.questions() {
            question.input_type().map_err(|e| match e {
                CatalogError::UnsupportedType(msg) => CatalogError::UnsupportedType(format!(
                    "{} (question '{}' in {})",
                    msg, question.variable, metadata.short_name
                )),
                other => other,
            })?;
        }
        Ok(metadata)
    }

    /// Find a template by directory name.
    pub fn find(&self, short_name: &str) -> Option<&TemplateMetadata> {
        self.templates.iter().find(|t| t.short_name == short_name)
    }

    /// Templates with a deployable version directory.
    pub fn deployable(&self) -> impl Iterator<Item = &TemplateMetadata> {
        self.templates.iter().filter(|t| t.has_compose_dir())
    }
}
