pub mod config;
pub mod error;
pub mod service;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use service::GameService;
