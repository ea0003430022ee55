mod core;
mod gateway;
mod models;

pub use core::Config;
pub use gateway::GatewayConfig;
pub use models::{ImageModelConfig, ModelsConfig, RouteConfig};
