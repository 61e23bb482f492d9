pub mod client;
pub mod cloudflare;
pub mod http;
pub mod models;

pub use client::Transport;
pub use cloudflare::Cloudflare;
pub use http::HttpClient;
