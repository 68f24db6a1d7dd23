//! # dpres-grading
//!
//! dpres 评级引擎. 组合 MIME/版本查表、字符集校验、容器内嵌流分析和单流约束,
//! 按最弱等级合并为文件的最终保存等级.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use dpres_format::Vocabulary;
//! use dpres_grading::{Grader, StreamMap};
//!
//! let vocabulary = Arc::new(Vocabulary::builtin()?);
//! let grader = Grader::new(vocabulary);
//! let verdict = grader.grade(Some("application/pdf"), "A-1a", &StreamMap::new())?;
//! println!("{verdict}");
//! # Ok::<(), dpres_core::DpresError>(())
//! ```

pub mod config;
pub mod grader;
pub mod rule;
pub mod rules;
pub mod stream;

// 重导出常用类型
pub use config::GraderConfig;
pub use grader::{Assessment, Grader, RuleGrade, Verdict};
pub use rule::{GradingRequest, GradingRule, RuleContext};
pub use stream::{StreamDescriptor, StreamMap};
