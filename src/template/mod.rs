//! Rancher catalog templates: discovery, metadata parsing and question translation.

pub mod discovery;
pub mod metadata;
pub mod question;

pub use discovery::{SkippedTemplate, TemplateCatalog};
pub use metadata::{ComposeInfo, RancherCompose, TemplateMetadata};
pub use question::{InputType, Question, QuestionTranslator};

use serde_yaml::Value;

/// Render a YAML scalar as text; non-scalars fall back to their YAML form.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
