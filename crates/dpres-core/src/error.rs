//! 统一错误类型定义.
//!
//! 所有 dpres crate 共用的错误类型, 支持跨模块传播.

use thiserror::Error;

/// dpres 统一错误类型
#[derive(Debug, Error)]
pub enum DpresError {
    /// 流描述缺少评级所需的字段 (调用方违反约定)
    #[error("流 #{index} 缺少字段 '{field}'")]
    MalformedStream {
        /// 流索引
        index: usize,
        /// 缺失的字段名
        field: &'static str,
    },

    /// 未找到指定的流
    #[error("未找到流: 索引 {0}")]
    StreamNotFound(usize),

    /// 对空集合求最弱等级
    #[error("无法对空的等级集合求最弱等级")]
    EmptyGradeSet,

    /// 未知的等级字符串
    #[error("未知的保存等级: {0}")]
    UnknownGrade(String),

    /// 词表数据错误 (JSON 结构不符等)
    #[error("数据错误: {0}")]
    Data(String),

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// dpres 统一 Result 类型
pub type DpresResult<T> = Result<T, DpresError>;
