pub mod classifier;
pub mod collect_service;
pub mod publish_service;

pub use collect_service::{CollectReport, CollectResult, CollectService};
pub use publish_service::{build_document, write_document};
