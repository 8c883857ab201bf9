//! Core types for the app-builder service.

mod config;
mod file_record;
mod request;

pub use config::AppConfig;
pub use file_record::GeneratedFile;
pub use request::{GenerateAppRequest, GenerateAppResponse, PackageRequest};
