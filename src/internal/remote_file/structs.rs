pub mod read_stream;
pub mod resource_info;

pub use read_stream::ReadStream;
pub use resource_info::ResourceInfo;
