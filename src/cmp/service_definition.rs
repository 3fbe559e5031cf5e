use super::documents::{ModuleAction, ServiceActions, ServiceDefinitionDoc, ServiceQuestion};
use crate::core::CatalogResult;
use crate::template::{InputType, Question, TemplateMetadata};

/// Prefix marking service definition categories that came from the Rancher catalog
pub const CATEGORY_PREFIX: &str = "RANCHER ";

const COST: &str = "0";
const COST_TYPE: &str = "p/month";
const LEAD_TIME: &str = "15";
const LEAD_TIME_UNIT: &str = "minute";

/// Builds CMP service definitions from template metadata
pub struct ServiceDefinitionBuilder;

impl ServiceDefinitionBuilder {
    /// Build the service definition for a template whose order action runs `module_id`.
    ///
    /// Output depends only on the arguments, so re-runs produce identical documents.
    pub fn build(metadata: &TemplateMetadata, module_id: &str) -> CatalogResult<ServiceDefinitionDoc> {
        let questions = metadata
            .questions()
            .iter()
            .map(Self::build_question)
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(ServiceDefinitionDoc {
            name: metadata.name.clone(),
            description: metadata.description.clone(),
            category: format!("{}{}", CATEGORY_PREFIX, metadata.category),
            cost: COST.to_string(),
            cost_type: COST_TYPE.to_string(),
            lead_time: LEAD_TIME.to_string(),
            lead_time_unit: LEAD_TIME_UNIT.to_string(),
            questions,
            actions: ServiceActions {
                create_order: vec![ModuleAction::module(module_id)],
            },
        })
    }

    fn build_question(question: &Question) -> CatalogResult<ServiceQuestion> {
        let input_type = question.input_type()?;

        // A checkbox can always be left unticked
        let required = match input_type {
            InputType::Checkbox => false,
            _ => question.required.unwrap_or(false),
        };

        let options = match input_type {
            InputType::Select => Some(question.option_texts()),
            _ => None,
        };

        Ok(ServiceQuestion {
            id: question.variable.clone(),
            question: question.display_label().to_string(),
            description: question.display_description().to_string(),
            input_type,
            required,
            options,
        })
    }
}
