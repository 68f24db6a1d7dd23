//! # dpres-core
//!
//! dpres 核心库, 提供保存等级、未知值哨兵、受控词表和统一错误类型.
//!
//! 本 crate 不依赖任何数据文件, 为 `dpres-format` 和 `dpres-grading` 提供底层基础设施.

pub mod charset;
pub mod content_type;
pub mod error;
pub mod grade;
pub mod mimetype;
pub mod unknown_value;

// 重导出常用类型
pub use charset::ALLOWED_CHARSETS;
pub use content_type::{ContentType, TechMetadata};
pub use error::{DpresError, DpresResult};
pub use grade::{Grade, weakest_grade};
pub use unknown_value::UnknownValue;
