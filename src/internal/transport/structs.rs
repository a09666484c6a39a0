pub mod transport_response;
pub mod webdav_request;

pub use transport_response::{BodyStream, TransportResponse};
pub use webdav_request::{RequestBody, UploadStream, WebDavRequest};
