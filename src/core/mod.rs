pub mod engine;
pub mod projection;
pub mod query;
pub mod render;

pub use crate::domain::model::{DatabaseLocation, Registry, Service};
pub use crate::domain::ports::RegistryLoader;
pub use crate::utils::error::Result;
