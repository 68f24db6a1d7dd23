//! 各评级规则的实现.

pub mod charset;
pub mod container_streams;
pub mod mime_version;
pub mod single_stream;
