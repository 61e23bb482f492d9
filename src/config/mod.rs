pub mod models;

pub use models::ClientConfig;
