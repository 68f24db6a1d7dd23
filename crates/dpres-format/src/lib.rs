//! # dpres-format
//!
//! dpres 文件格式词表库: 词表记录结构、评级表索引、JSON 加载以及筛选视图.
//!
//! 本 crate 只读取词表, 不写回数据文件.

pub mod container_table;
pub mod format_table;
pub mod loader;
pub mod record;
pub mod selection;
pub mod vocabulary;

// 重导出常用类型
pub use container_table::{ContainerProfile, ContainerTable, StreamFormat};
pub use format_table::{FormatTable, FormatVersionEntry};
pub use record::{ContainerRecord, FileFormatRecord, FormatVersionRecord};
pub use selection::{FlatFormatVersion, FormatSelection};
pub use vocabulary::{SharedVocabulary, Vocabulary};
