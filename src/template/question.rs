use crate::core::{CatalogError, CatalogResult};
use crate::template::scalar_text;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// A user-configurable parameter declared under `.catalog.questions`
/// in a template's rancher-compose.yml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Question {
    pub variable: String,
    /// Falls back to `variable` when the key is absent; see [`Question::label`].
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Source (Rancher) type name; see [`QuestionTranslator`].
    #[serde(rename = "type")]
    pub question_type: String,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub options: Vec<Value>,
    #[serde(default)]
    pub default: Option<Value>,
}

impl Question {
    /// Declared label, or the variable name when none is declared.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.variable)
    }

    /// Label with trailing colons removed.
    pub fn display_label(&self) -> &str {
        self.label().trim_end_matches(':')
    }

    /// Description, falling back to the variable name.
    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.variable)
    }

    /// Target input type for this question.
    pub fn input_type(&self) -> CatalogResult<InputType> {
        QuestionTranslator::translate(&self.question_type)
    }

    /// Declared options coerced to text, in declaration order.
    pub fn option_texts(&self) -> Vec<String> {
        self.options.iter().map(scalar_text).collect()
    }

    /// Declared default value as text, if any.
    pub fn default_text(&self) -> Option<String> {
        self.default.as_ref().map(scalar_text)
    }
}

/// CMP input field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Password,
    Checkbox,
    Number,
    Select,
    Textarea,
}

/// Maps Rancher question types onto CMP input types.
pub struct QuestionTranslator;

impl QuestionTranslator {
    /// Every source type the translator accepts.
    pub const SOURCE_TYPES: [&'static str; 7] = [
        "string",
        "password",
        "boolean",
        "int",
        "enum",
        "service",
        "multiline",
    ];

    pub fn translate(source_type: &str) -> CatalogResult<InputType> {
        match source_type {
            "string" => Ok(InputType::Text),
            "password" => Ok(InputType::Password),
            "boolean" => Ok(InputType::Checkbox),
            "int" => Ok(InputType::Number),
            "enum" => Ok(InputType::Select),
            "service" => Ok(InputType::Text),
            "multiline" => Ok(InputType::Textarea),
            other => Err(CatalogError::UnsupportedType(format!(
                "'{}' (supported: {})",
                other,
                Self::SOURCE_TYPES.join(", ")
            ))),
        }
    }
}
