pub mod parse_multi_status;
pub mod request_builder;
