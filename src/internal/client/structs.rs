pub mod client_config;
pub mod request_context;
pub mod webdav_client;
pub mod webdav_client_builder;

// 重导出公共类型
pub use client_config::ClientConfig;
pub use request_context::RequestContext;
pub use webdav_client::WebDavClient;
pub use webdav_client_builder::WebDavClientBuilder;
