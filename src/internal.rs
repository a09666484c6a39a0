pub mod auth;
pub mod client;
pub mod error;
pub mod path;
pub mod remote_file;
pub mod transport;
pub mod webdav;
