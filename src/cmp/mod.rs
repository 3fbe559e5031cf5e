//! CMP (catalog-management platform) integration.

pub mod client;
pub mod documents;
pub mod service_definition;

pub use client::{CatalogApi, CmpClient};
pub use documents::{
    CatalogDoc, ModuleAction, ModuleUpdate, NewModule, RemoteEntity, ServiceActions,
    ServiceDefinitionDoc, ServiceQuestion,
};
pub use service_definition::ServiceDefinitionBuilder;
