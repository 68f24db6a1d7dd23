//! 评级规则.
//!
//! 规则集合固定且封闭, 以枚举表示, 由评级门面逐一判断适用性并调用.
//! 每条规则都是无状态的纯函数, 所需的表通过 [`RuleContext`] 以引用传入.

use std::fmt;

use serde::Serialize;

use dpres_core::{DpresResult, Grade};
use dpres_format::Vocabulary;

use crate::config::GraderConfig;
use crate::rules;
use crate::stream::StreamMap;

/// 规则求值所需的只读上下文
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// 词表快照
    pub vocabulary: &'a Vocabulary,
    /// 评级配置
    pub config: &'a GraderConfig,
}

/// 一次评级请求
#[derive(Debug, Clone, Copy)]
pub struct GradingRequest<'a> {
    /// 文件 MIME 类型
    pub mimetype: &'a str,
    /// 文件版本
    pub version: &'a str,
    /// 文件的流
    pub streams: &'a StreamMap,
}

/// 评级规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GradingRule {
    /// 按 (MIME 类型, 版本) 精确查表
    #[serde(rename = "mime_version")]
    MimeVersion,
    /// 文本类格式的字符集校验
    #[serde(rename = "charset")]
    Charset,
    /// 容器内嵌流的兼容性
    #[serde(rename = "container_streams")]
    ContainerStreams,
    /// 非容器格式不得携带多个流
    #[serde(rename = "single_stream")]
    SingleStream,
}

impl GradingRule {
    /// 全部规则
    pub const ALL: &[GradingRule] = &[
        Self::MimeVersion,
        Self::Charset,
        Self::ContainerStreams,
        Self::SingleStream,
    ];

    /// 规则名称
    pub const fn name(self) -> &'static str {
        match self {
            Self::MimeVersion => "mime_version",
            Self::Charset => "charset",
            Self::ContainerStreams => "container_streams",
            Self::SingleStream => "single_stream",
        }
    }

    /// 该文件格式是否在本规则的管辖范围内
    ///
    /// 只有容器规则需要版本, 其余规则按 MIME 类型判断.
    pub fn is_supported(self, ctx: &RuleContext<'_>, mimetype: &str, version: &str) -> bool {
        match self {
            Self::MimeVersion => rules::mime_version::is_supported(ctx, mimetype),
            Self::Charset => rules::charset::is_supported(ctx, mimetype),
            Self::ContainerStreams => {
                rules::container_streams::is_supported(ctx, mimetype, version)
            }
            Self::SingleStream => rules::single_stream::is_supported(ctx, mimetype),
        }
    }

    /// 按本规则给出等级
    pub fn grade(self, ctx: &RuleContext<'_>, request: &GradingRequest<'_>) -> DpresResult<Grade> {
        match self {
            Self::MimeVersion => Ok(rules::mime_version::grade(ctx, request)),
            Self::Charset => Ok(rules::charset::grade(ctx, request)),
            Self::ContainerStreams => rules::container_streams::grade(ctx, request),
            Self::SingleStream => Ok(rules::single_stream::grade(request)),
        }
    }
}

impl fmt::Display for GradingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
