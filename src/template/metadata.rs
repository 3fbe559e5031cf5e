use crate::core::{CatalogError, CatalogResult};
use crate::template::question::Question;
use crate::template::scalar_text;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const CONFIG_FILE: &str = "config.yml";
pub const DOCKER_COMPOSE_FILE: &str = "docker-compose.yml";
pub const RANCHER_COMPOSE_FILE: &str = "rancher-compose.yml";
pub const DEFAULT_CATEGORY: &str = "General";

/// Key in rancher-compose.yml holding catalog properties
const CATALOG_KEY: &str = ".catalog";

/// Template config.yml
#[derive(Debug, Deserialize)]
struct TemplateConfig {
    #[serde(deserialize_with = "scalar_as_string")]
    name: String,
    #[serde(deserialize_with = "scalar_as_string")]
    description: String,
    #[serde(deserialize_with = "scalar_as_string")]
    version: String,
    #[serde(default)]
    category: Option<String>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

/// Metadata for one template directory.
#[derive(Debug, Clone)]
pub struct TemplateMetadata {
    /// Directory basename; modules are matched on this.
    pub short_name: String,
    pub path: PathBuf,
    /// Display name; service definitions are matched on this.
    pub name: String,
    pub description: String,
    pub version: String,
    pub category: String,
    /// `None` when no version directory holds a docker-compose.yml.
    pub compose: Option<ComposeInfo>,
}

/// The active version directory and its compose files.
///
/// File text is kept verbatim (quoting and comments included); it is
/// validated as YAML on load.
#[derive(Debug, Clone)]
pub struct ComposeInfo {
    pub version_dir: String,
    pub docker_compose: String,
    pub rancher_compose: Option<RancherCompose>,
}

#[derive(Debug, Clone)]
pub struct RancherCompose {
    pub text: String,
    pub questions: Vec<Question>,
}

impl TemplateMetadata {
    /// Parse a template directory.
    pub fn load(template_dir: &Path) -> CatalogResult<Self> {
        let short_name = template_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                CatalogError::Config(format!(
                    "Template path has no directory name: {}",
                    template_dir.display()
                ))
            })?;

        let config = load_config(template_dir)?;

        let compose = match select_version_dir(template_dir)? {
            Some(version_dir) => Some(load_compose(&template_dir.join(&version_dir), version_dir)?),
            None => None,
        };

        Ok(Self {
            short_name,
            path: template_dir.to_path_buf(),
            name: config.name,
            description: config.description,
            version: config.version,
            category: config.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            compose,
        })
    }

    pub fn has_compose_dir(&self) -> bool {
        self.compose.is_some()
    }

    pub fn has_rancher_compose(&self) -> bool {
        self.rancher_compose().is_some()
    }

    pub fn has_questions(&self) -> bool {
        !self.questions().is_empty()
    }

    pub fn rancher_compose(&self) -> Option<&RancherCompose> {
        self.compose.as_ref().and_then(|c| c.rancher_compose.as_ref())
    }

    pub fn questions(&self) -> &[Question] {
        self.rancher_compose()
            .map(|r| r.questions.as_slice())
            .unwrap_or(&[])
    }

    /// Ordering key used for listings and reconciliation.
    pub fn sort_key(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

fn load_config(template_dir: &Path) -> CatalogResult<TemplateConfig> {
    let config_path = template_dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        return Err(CatalogError::Config(format!(
            "{} not found in {}",
            CONFIG_FILE,
            template_dir.display()
        )));
    }

    let content = fs::read_to_string(&config_path)?;
    serde_yaml::from_str(&content).map_err(|e| {
        CatalogError::Config(format!(
            "Invalid {} in {}: {}",
            CONFIG_FILE,
            template_dir.display(),
            e
        ))
    })
}

fn version_dir_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)").expect("valid version directory pattern"))
}

/// Order version directory names by their leading number, then by full name.
pub fn compare_version_dirs(a: &str, b: &str) -> Ordering {
    let number = |name: &str| {
        version_dir_pattern()
            .captures(name)
            .and_then(|c| c[1].parse::<u64>().ok())
    };
    number(a).cmp(&number(b)).then_with(|| a.cmp(b))
}

/// Pick the highest numbered subdirectory that contains a docker-compose.yml.
pub fn select_version_dir(template_dir: &Path) -> CatalogResult<Option<String>> {
    let mut candidates = Vec::new();

    for entry in fs::read_dir(template_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if version_dir_pattern().is_match(&name) && path.join(DOCKER_COMPOSE_FILE).is_file() {
            candidates.push(name);
        }
    }

    Ok(candidates
        .into_iter()
        .max_by(|a, b| compare_version_dirs(a, b)))
}

fn load_compose(compose_dir: &Path, version_dir: String) -> CatalogResult<ComposeInfo> {
    let docker_compose = fs::read_to_string(compose_dir.join(DOCKER_COMPOSE_FILE))?;
    if serde_yaml::from_str::<Value>(&docker_compose)?.is_null() {
        return Err(CatalogError::Config(format!(
            "{} in {} is empty",
            DOCKER_COMPOSE_FILE,
            compose_dir.display()
        )));
    }

    let rancher_path = compose_dir.join(RANCHER_COMPOSE_FILE);
    let rancher_compose = if rancher_path.is_file() {
        let text = fs::read_to_string(&rancher_path)?;
        let document: Value = serde_yaml::from_str(&text)?;
        let questions = extract_questions(&document, &rancher_path)?;
        Some(RancherCompose { text, questions })
    } else {
        None
    };

    Ok(ComposeInfo {
        version_dir,
        docker_compose,
        rancher_compose,
    })
}

/// Read `.catalog.questions`.
fn extract_questions(document: &Value, source: &Path) -> CatalogResult<Vec<Question>> {
    let questions = match document.get(CATALOG_KEY).and_then(|c| c.get("questions")) {
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(questions) => questions.clone(),
    };

    serde_yaml::from_value(questions).map_err(|e| {
        CatalogError::Config(format!(
            "Invalid questions in {}: {}",
            source.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONFIG: &str = "name: WordPress\ndescription: Blogging platform\nversion: 4.5.2\ncategory: Blog\n";

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_full_template() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("wordpress");
        write(&dir.join(CONFIG_FILE), CONFIG);
        write(&dir.join("0").join(DOCKER_COMPOSE_FILE), "wordpress:\n  image: wordpress:4.4\n");
        write(&dir.join("1").join(DOCKER_COMPOSE_FILE), "wordpress:\n  image: wordpress:4.5\n  ports:\n    - ${PUBLIC_PORT}:80\n");
        write(
            &dir.join("1").join(RANCHER_COMPOSE_FILE),
            ".catalog:\n  name: WordPress\n  questions:\n    - variable: PUBLIC_PORT\n      label: 'Public port:'\n      type: int\n      required: true\n    - variable: db_name\n      type: string\n",
        );

        let metadata = TemplateMetadata::load(&dir).unwrap();
        assert_eq!(metadata.short_name, "wordpress");
        assert_eq!(metadata.name, "WordPress");
        assert_eq!(metadata.version, "4.5.2");
        assert_eq!(metadata.category, "Blog");
        assert_eq!(metadata.sort_key(), "Blog/WordPress");

        let compose = metadata.compose.as_ref().unwrap();
        assert_eq!(compose.version_dir, "1");
        assert!(compose.docker_compose.contains("image: wordpress:4.5"));
        assert!(metadata.has_rancher_compose());
        assert!(metadata.has_questions());
        assert_eq!(metadata.questions()[0].label(), "Public port:");
        assert_eq!(metadata.questions()[1].label(), "db_name");
    }

    #[test]
    fn test_compose_text_is_kept_verbatim() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("vault");
        let docker_compose = "# secrets\nvault:\n  environment:\n    PORT: '${PORT}'\n    PW: \"${PW}\"\n";
        let rancher_compose = ".catalog:\n  questions:\n    - variable: PW\n      type: password\n";
        write(&dir.join(CONFIG_FILE), CONFIG);
        write(&dir.join("0").join(DOCKER_COMPOSE_FILE), docker_compose);
        write(&dir.join("0").join(RANCHER_COMPOSE_FILE), rancher_compose);

        let metadata = TemplateMetadata::load(&dir).unwrap();
        let compose = metadata.compose.as_ref().unwrap();
        assert_eq!(compose.docker_compose, docker_compose);
        assert_eq!(metadata.rancher_compose().unwrap().text, rancher_compose);
    }

    #[test]
    fn test_numeric_name_and_description_are_accepted() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("2048");
        write(&dir.join(CONFIG_FILE), "name: 2048\ndescription: 42\nversion: 0.1\n");

        let metadata = TemplateMetadata::load(&dir).unwrap();
        assert_eq!(metadata.name, "2048");
        assert_eq!(metadata.description, "42");
        assert_eq!(metadata.version, "0.1");
    }

    #[test]
    fn test_category_defaults_to_general() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("ghost");
        write(&dir.join(CONFIG_FILE), "name: Ghost\ndescription: Blog\nversion: 1\n");

        let metadata = TemplateMetadata::load(&dir).unwrap();
        assert_eq!(metadata.category, DEFAULT_CATEGORY);
        assert_eq!(metadata.version, "1");
    }

    #[test]
    fn test_no_version_dir_means_no_compose() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("bare");
        write(&dir.join(CONFIG_FILE), CONFIG);
        // Numbered dir without docker-compose.yml and a non-numbered dir with one
        write(&dir.join("2").join(RANCHER_COMPOSE_FILE), ".catalog: {}\n");
        write(&dir.join("latest").join(DOCKER_COMPOSE_FILE), "a:\n  image: b\n");

        let metadata = TemplateMetadata::load(&dir).unwrap();
        assert!(!metadata.has_compose_dir());
        assert!(!metadata.has_rancher_compose());
        assert!(metadata.questions().is_empty());
    }

    #[test]
    fn test_missing_config_is_config_error() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("broken");
        fs::create_dir_all(&dir).unwrap();

        let err = TemplateMetadata::load(&dir).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn test_missing_required_field_is_config_error() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("noversion");
        write(&dir.join(CONFIG_FILE), "name: X\ndescription: Y\n");

        let err = TemplateMetadata::load(&dir).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_rancher_compose_without_questions() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("redis");
        write(&dir.join(CONFIG_FILE), CONFIG);
        write(&dir.join("0").join(DOCKER_COMPOSE_FILE), "redis:\n  image: redis\n");
        write(&dir.join("0").join(RANCHER_COMPOSE_FILE), "redis:\n  scale: 1\n");

        let metadata = TemplateMetadata::load(&dir).unwrap();
        assert!(metadata.has_rancher_compose());
        assert!(!metadata.has_questions());
    }

    #[test]
    fn test_version_dirs_compare_numerically() {
        assert_eq!(compare_version_dirs("10", "2"), Ordering::Greater);
        assert_eq!(compare_version_dirs("2", "2-beta"), Ordering::Less);
        assert_eq!(compare_version_dirs("3", "3"), Ordering::Equal);
    }

    #[test]
    fn test_select_highest_version_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("t");
        for version in ["2", "10", "9"] {
            write(&dir.join(version).join(DOCKER_COMPOSE_FILE), "a:\n  image: b\n");
        }
        write(&dir.join("11").join("README.md"), "no compose here");

        assert_eq!(select_version_dir(&dir).unwrap(), Some("10".to_string()));
    }
}
