//! CMP module generation: the deployment script registered for each template.

pub mod generator;
pub mod substitution;

pub use generator::{ModuleSourceGenerator, RancherEndpoint};
pub use substitution::{placeholders, substitute_placeholders};
