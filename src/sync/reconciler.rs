use crate::cmp::{
    CatalogApi, CatalogDoc, ModuleUpdate, NewModule, RemoteEntity, ServiceDefinitionBuilder,
};
use crate::config::ModuleSettings;
use crate::core::CatalogResult;
use crate::module::{ModuleSourceGenerator, RancherEndpoint};
use crate::template::TemplateMetadata;
use std::collections::HashMap;
use tracing::{info, warn};

/// What a reconciliation run did
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Template short names whose module was created
    pub modules_created: Vec<String>,
    /// Template short names whose module source was re-sent
    pub modules_updated: Vec<String>,
    /// Display names of newly created service definitions
    pub service_defs_created: Vec<String>,
    /// Display names matched to an existing service definition
    pub service_defs_reused: Vec<String>,
    /// Service definition ids appended to the catalog
    pub catalog_ids_added: Vec<String>,
    /// Templates left out, with the reason
    pub skipped: Vec<(String, String)>,
    /// The catalog as persisted
    pub catalog: CatalogDoc,
}

/// Name to id lookup over a remote listing; later entries win.
pub fn index_by_name(entities: &[RemoteEntity]) -> HashMap<String, String> {
    entities
        .iter()
        .map(|e| (e.name.clone(), e.id.clone()))
        .collect()
}

/// Pushes local templates into the CMP catalog.
///
/// Modules are keyed by template directory name, service definitions by
/// display name. Existing service definitions are never edited.
pub struct CatalogReconciler<'a, A: CatalogApi> {
    api: &'a A,
    endpoint: &'a RancherEndpoint,
    settings: &'a ModuleSettings,
}

impl<'a, A: CatalogApi> CatalogReconciler<'a, A> {
    pub fn new(api: &'a A, endpoint: &'a RancherEndpoint, settings: &'a ModuleSettings) -> Self {
        Self {
            api,
            endpoint,
            settings,
        }
    }

    /// Run one reconciliation. Any API failure aborts the run.
    pub async fn reconcile(&self, templates: &[TemplateMetadata]) -> CatalogResult<SyncReport> {
        let mut report = SyncReport::default();

        let mut service_defs_by_name = index_by_name(&self.api.list_service_definitions().await?);
        let mut modules_by_name = index_by_name(&self.api.list_modules().await?);
        info!(
            modules = modules_by_name.len(),
            service_defs = service_defs_by_name.len(),
            "fetched remote state"
        );

        // Rejected templates must not reach the remote side at all
        let mut deployable: Vec<&TemplateMetadata> = Vec::new();
        for template in templates {
            if !template.has_compose_dir() {
                warn!(template = %template.short_name, "no deployable version directory, skipping");
                report.skipped.push((
                    template.short_name.clone(),
                    "no version directory with a docker-compose.yml".to_string(),
                ));
                continue;
            }

            if let Err(e) = template
                .questions()
                .iter()
                .try_for_each(|question| question.input_type().map(|_| ()))
            {
                warn!(template = %template.short_name, error = %e, "unsupported question, skipping");
                report.skipped.push((template.short_name.clone(), e.to_string()));
                continue;
            }

            deployable.push(template);
        }
        deployable.sort_by_key(|t| t.sort_key());

        // Modules first: every service definition embeds a module id
        let mut module_ids = Vec::with_capacity(deployable.len());
        for template in &deployable {
            let source_code = ModuleSourceGenerator::generate(template, self.endpoint)?;

            match modules_by_name.get(&template.short_name) {
                Some(module_id) => {
                    info!(template = %template.short_name, module_id = %module_id, "updating module");
                    let update = ModuleUpdate {
                        name: template.short_name.clone(),
                        file_type: self.settings.file_type.clone(),
                        source_code,
                    };
                    self.api.update_module(module_id, &update).await?;
                    module_ids.push(module_id.clone());
                    report.modules_updated.push(template.short_name.clone());
                }
                None => {
                    info!(template = %template.short_name, "creating module");
                    let module = NewModule {
                        name: template.short_name.clone(),
                        language: self.settings.language.clone(),
                        event_source: self.settings.event_source.clone(),
                        file_type: self.settings.file_type.clone(),
                        source_code,
                    };
                    let created = self.api.create_module(&module).await?;
                    modules_by_name.insert(template.short_name.clone(), created.id.clone());
                    module_ids.push(created.id);
                    report.modules_created.push(template.short_name.clone());
                }
            }
        }

        let mut service_def_ids = Vec::new();
        for (template, module_id) in deployable.iter().zip(&module_ids) {
            if let Some(existing) = service_defs_by_name.get(&template.name) {
                info!(template = %template.name, service_def_id = %existing, "service definition exists");
                service_def_ids.push(existing.clone());
                report.service_defs_reused.push(template.name.clone());
                continue;
            }

            let service_definition = match ServiceDefinitionBuilder::build(template, module_id) {
                Ok(doc) => doc,
                Err(e) if e.is_template_scoped() => {
                    warn!(template = %template.name, error = %e, "cannot build service definition, skipping");
                    report.skipped.push((template.short_name.clone(), e.to_string()));
                    continue;
                }
                Err(e) => return Err(e),
            };

            info!(template = %template.name, "creating service definition");
            let created = self
                .api
                .create_service_definition(&service_definition)
                .await?;
            service_defs_by_name.insert(template.name.clone(), created.id.clone());
            service_def_ids.push(created.id);
            report.service_defs_created.push(template.name.clone());
        }

        let mut catalog = self.api.get_service_catalog().await?;
        report.catalog_ids_added = catalog.merge_ids(&service_def_ids);
        info!(added = report.catalog_ids_added.len(), "updating service catalog");
        self.api.update_service_catalog(&catalog).await?;
        report.catalog = catalog;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmp::ServiceDefinitionDoc;
    use crate::core::CatalogError;
    use crate::template::{ComposeInfo, Question, RancherCompose};
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        CreateModule(String),
        UpdateModule(String),
        CreateServiceDef(String),
        UpdateCatalog(Vec<String>),
    }

    #[derive(Default)]
    struct FakeApi {
        modules: Mutex<Vec<RemoteEntity>>,
        service_defs: Mutex<Vec<RemoteEntity>>,
        catalog: Mutex<CatalogDoc>,
        calls: Mutex<Vec<Call>>,
        created_docs: Mutex<Vec<ServiceDefinitionDoc>>,
        fail_service_def_creation: bool,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn creates(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| matches!(c, Call::CreateModule(_) | Call::CreateServiceDef(_)))
                .count()
        }
    }

    impl CatalogApi for FakeApi {
        async fn list_modules(&self) -> CatalogResult<Vec<RemoteEntity>> {
            Ok(self.modules.lock().unwrap().clone())
        }

        async fn create_module(&self, module: &NewModule) -> CatalogResult<RemoteEntity> {
            let mut modules = self.modules.lock().unwrap();
            let entity = RemoteEntity {
                id: format!("mod-{}", modules.len() + 1),
                name: module.name.clone(),
            };
            modules.push(entity.clone());
            self.calls.lock().unwrap().push(Call::CreateModule(module.name.clone()));
            Ok(entity)
        }

        async fn update_module(&self, module_id: &str, _module: &ModuleUpdate) -> CatalogResult<()> {
            self.calls.lock().unwrap().push(Call::UpdateModule(module_id.to_string()));
            Ok(())
        }

        async fn list_service_definitions(&self) -> CatalogResult<Vec<RemoteEntity>> {
            Ok(self.service_defs.lock().unwrap().clone())
        }

        async fn create_service_definition(
            &self,
            service_definition: &ServiceDefinitionDoc,
        ) -> CatalogResult<RemoteEntity> {
            if self.fail_service_def_creation {
                return Err(CatalogError::Transport {
                    method: "POST".to_string(),
                    url: "/service_defs".to_string(),
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            let mut defs = self.service_defs.lock().unwrap();
            let entity = RemoteEntity {
                id: format!("sd-{}", defs.len() + 1),
                name: service_definition.name.clone(),
            };
            defs.push(entity.clone());
            self.created_docs.lock().unwrap().push(service_definition.clone());
            self.calls
                .lock()
                .unwrap()
                .push(Call::CreateServiceDef(service_definition.name.clone()));
            Ok(entity)
        }

        async fn get_service_catalog(&self) -> CatalogResult<CatalogDoc> {
            Ok(self.catalog.lock().unwrap().clone())
        }

        async fn update_service_catalog(&self, catalog: &CatalogDoc) -> CatalogResult<()> {
            *self.catalog.lock().unwrap() = catalog.clone();
            self.calls
                .lock()
                .unwrap()
                .push(Call::UpdateCatalog(catalog.service_defs.clone()));
            Ok(())
        }
    }

    fn template(short_name: &str, name: &str, category: &str) -> TemplateMetadata {
        TemplateMetadata {
            short_name: short_name.to_string(),
            path: PathBuf::from("templates").join(short_name),
            name: name.to_string(),
            description: format!("{} template", name),
            version: "1.0".to_string(),
            category: category.to_string(),
            compose: Some(ComposeInfo {
                version_dir: "0".to_string(),
                docker_compose: "app:\n  image: app\n".to_string(),
                rancher_compose: None,
            }),
        }
    }

    fn entity(id: &str, name: &str) -> RemoteEntity {
        RemoteEntity {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn endpoint() -> RancherEndpoint {
        RancherEndpoint {
            url: "http://rancher:8080/v2-beta/projects/1a5".to_string(),
            access_key: "a".to_string(),
            secret_key: "s".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_run_creates_everything() {
        let api = FakeApi::default();
        let endpoint = endpoint();
        let settings = ModuleSettings::default();
        let templates = vec![
            template("wordpress", "WordPress", "Blog"),
            template("mysql", "MySQL", "Database"),
        ];

        let report = CatalogReconciler::new(&api, &endpoint, &settings)
            .reconcile(&templates)
            .await
            .unwrap();

        assert_eq!(report.modules_created, vec!["wordpress", "mysql"]);
        assert_eq!(report.service_defs_created, vec!["WordPress", "MySQL"]);
        assert_eq!(report.catalog.service_defs, vec!["sd-1", "sd-2"]);

        let docs = api.created_docs.lock().unwrap();
        assert_eq!(docs[0].actions.create_order[0].module_id, "mod-1");
        assert_eq!(docs[1].actions.create_order[0].module_id, "mod-2");
        assert_eq!(docs[1].category, "RANCHER Database");
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let api = FakeApi::default();
        api.modules.lock().unwrap().push(entity("mod-9", "wordpress"));
        api.service_defs.lock().unwrap().push(entity("sd-1", "WordPress"));
        api.catalog.lock().unwrap().service_defs.push("sd-1".to_string());
        let endpoint = endpoint();
        let settings = ModuleSettings::default();
        let templates = vec![template("wordpress", "WordPress", "Blog")];

        let report = CatalogReconciler::new(&api, &endpoint, &settings)
            .reconcile(&templates)
            .await
            .unwrap();

        assert_eq!(api.creates(), 0);
        assert_eq!(
            api.calls(),
            vec![
                Call::UpdateModule("mod-9".to_string()),
                Call::UpdateCatalog(vec!["sd-1".to_string()]),
            ]
        );
        assert_eq!(report.modules_updated, vec!["wordpress"]);
        assert_eq!(report.service_defs_reused, vec!["WordPress"]);
        assert!(report.catalog_ids_added.is_empty());
    }

    #[tokio::test]
    async fn test_catalog_merge_appends_new_ids_once() {
        let api = FakeApi::default();
        api.service_defs.lock().unwrap().push(entity("sd-1", "WordPress"));
        api.catalog.lock().unwrap().service_defs.push("sd-1".to_string());
        let endpoint = endpoint();
        let settings = ModuleSettings::default();
        let templates = vec![
            template("wordpress", "WordPress", "Blog"),
            template("ghost", "Ghost", "Blog"),
            // Same display name from a different directory reuses the id
            template("ghost-legacy", "Ghost", "Blog"),
        ];

        let report = CatalogReconciler::new(&api, &endpoint, &settings)
            .reconcile(&templates)
            .await
            .unwrap();

        assert_eq!(report.modules_created.len(), 3);
        assert_eq!(report.service_defs_created, vec!["Ghost"]);
        assert_eq!(report.catalog.service_defs, vec!["sd-1", "sd-2"]);
        assert_eq!(report.catalog_ids_added, vec!["sd-2"]);
    }

    #[tokio::test]
    async fn test_templates_processed_in_category_name_order() {
        let api = FakeApi::default();
        let endpoint = endpoint();
        let settings = ModuleSettings::default();
        let templates = vec![
            template("zabbix", "Zabbix", "Monitoring"),
            template("wordpress", "WordPress", "Blog"),
            template("alpha", "Alpha", "Monitoring"),
        ];

        let report = CatalogReconciler::new(&api, &endpoint, &settings)
            .reconcile(&templates)
            .await
            .unwrap();

        assert_eq!(report.modules_created, vec!["wordpress", "alpha", "zabbix"]);
    }

    #[tokio::test]
    async fn test_undeployable_and_invalid_templates_are_skipped() {
        let api = FakeApi::default();
        let endpoint = endpoint();
        let settings = ModuleSettings::default();

        let mut bare = template("bare", "Bare", "General");
        bare.compose = None;

        let mut odd = template("odd", "Odd", "General");
        let question: Question = serde_yaml::from_str("variable: ratio\nlabel: Ratio\ntype: float\n").unwrap();
        if let Some(compose) = odd.compose.as_mut() {
            compose.rancher_compose = Some(RancherCompose {
                text: String::new(),
                questions: vec![question],
            });
        }

        let templates = vec![bare, odd, template("redis", "Redis", "General")];
        let report = CatalogReconciler::new(&api, &endpoint, &settings)
            .reconcile(&templates)
            .await
            .unwrap();

        assert_eq!(report.service_defs_created, vec!["Redis"]);
        let skipped: Vec<_> = report.skipped.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(skipped, vec!["bare", "odd"]);
        assert!(report.skipped[1].1.contains("float"));
        assert_eq!(report.modules_created, vec!["redis"]);
        assert!(!api.calls().contains(&Call::CreateModule("bare".to_string())));
        assert!(!api.calls().contains(&Call::CreateModule("odd".to_string())));
    }

    #[tokio::test]
    async fn test_unsupported_question_never_reaches_remote() {
        let api = FakeApi::default();
        // An existing module must not be updated either
        api.modules.lock().unwrap().push(entity("mod-3", "odd"));
        let endpoint = endpoint();
        let settings = ModuleSettings::default();

        let mut odd = template("odd", "Odd", "General");
        let question: Question = serde_yaml::from_str("variable: cert\ntype: certificate\n").unwrap();
        if let Some(compose) = odd.compose.as_mut() {
            compose.rancher_compose = Some(RancherCompose {
                text: String::new(),
                questions: vec![question],
            });
        }

        let report = CatalogReconciler::new(&api, &endpoint, &settings)
            .reconcile(&[odd])
            .await
            .unwrap();

        assert_eq!(api.calls(), vec![Call::UpdateCatalog(Vec::new())]);
        assert!(report.modules_updated.is_empty());
        assert_eq!(report.skipped.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_aborts_run() {
        let api = FakeApi {
            fail_service_def_creation: true,
            ..FakeApi::default()
        };
        let endpoint = endpoint();
        let settings = ModuleSettings::default();
        let templates = vec![template("wordpress", "WordPress", "Blog")];

        let err = CatalogReconciler::new(&api, &endpoint, &settings)
            .reconcile(&templates)
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert!(!api
            .calls()
            .iter()
            .any(|c| matches!(c, Call::UpdateCatalog(_))));
    }

    #[test]
    fn test_index_by_name() {
        let index = index_by_name(&[entity("1", "a"), entity("2", "b")]);
        assert_eq!(index.get("b").map(String::as_str), Some("2"));
    }
}
