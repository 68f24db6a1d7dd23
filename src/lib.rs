//! # dpres
//!
//! 数字长期保存 (DPS) 文件格式词表与等级评定引擎.
//!
//! 给定文件的 MIME 类型、版本和内嵌流描述, 给出其保存等级:
//! - **推荐** / **可接受**: 格式与版本在词表中收录
//! - **比特级 (附推荐格式)** / **比特级**: 只保证比特级保存
//! - **不可接受**: 未收录, 或字符集、内嵌流不符合要求
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use dpres::grading::{StreamDescriptor, StreamMap};
//!
//! let grader = dpres::default_grader()?;
//! let streams = StreamMap::from([
//!     (0, StreamDescriptor::new("video/mp4", "(:unap)")),
//!     (1, StreamDescriptor::new("audio/aac", "(:unap)")),
//! ]);
//! let verdict = grader.grade(Some("video/mp4"), "(:unap)", &streams)?;
//! println!("等级: {verdict}");
//! # Ok::<(), dpres::core::DpresError>(())
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `dpres-core` | 等级、未知值、内容类型等受控词表与统一错误 |
//! | `dpres-format` | 词表记录、评级表、JSON 加载与筛选视图 |
//! | `dpres-grading` | 评级规则与评级门面 |

use std::sync::Arc;

/// 核心类型与受控词表
pub use dpres_core as core;

/// 文件格式词表
pub use dpres_format as format;

/// 评级引擎
pub use dpres_grading as grading;

/// 获取 dpres 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 加载内置词表
pub fn default_vocabulary() -> dpres_core::DpresResult<dpres_format::Vocabulary> {
    dpres_format::Vocabulary::builtin()
}

/// 创建基于内置词表和默认配置的评级器
pub fn default_grader() -> dpres_core::DpresResult<dpres_grading::Grader> {
    Ok(dpres_grading::Grader::new(Arc::new(default_vocabulary()?)))
}
