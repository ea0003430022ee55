pub mod schema;

pub use schema::{Config, GatewayConfig, ImageModelConfig, ModelsConfig, RouteConfig};
