//! 被评级文件的流描述.
//!
//! 流由调用方提供, 以流索引为键. 文件本身是容器时, 索引 0 描述容器自身,
//! 其余索引描述容器内嵌的音视频流.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dpres_core::{DpresError, DpresResult};
use dpres_format::StreamFormat;

/// 流索引 -> 流描述, 按索引有序
pub type StreamMap = BTreeMap<usize, StreamDescriptor>;

/// 流描述
///
/// 字段均为可选: 文本类文件常常只声明字符集. 规则在真正需要某个字段时才要求它存在.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// MIME 类型
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    /// 版本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// 声明的字符集 (文本类格式)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
}

impl StreamDescriptor {
    /// 创建带 MIME 类型和版本的流描述
    pub fn new(mimetype: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            mimetype: Some(mimetype.into()),
            version: Some(version.into()),
            charset: None,
        }
    }

    /// 只声明字符集的流描述
    pub fn with_charset_only(charset: impl Into<String>) -> Self {
        Self {
            charset: Some(charset.into()),
            ..Self::default()
        }
    }

    /// 设置字符集
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// 取 MIME 类型, 缺失时报告调用方错误
    pub fn require_mimetype(&self, index: usize) -> DpresResult<&str> {
        self.mimetype
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .ok_or(DpresError::MalformedStream {
                index,
                field: "mimetype",
            })
    }

    /// 取版本, 缺失时报告调用方错误
    pub fn require_version(&self, index: usize) -> DpresResult<&str> {
        self.version.as_deref().ok_or(DpresError::MalformedStream {
            index,
            field: "version",
        })
    }

    /// 转为流格式键
    pub fn stream_format(&self, index: usize) -> DpresResult<StreamFormat> {
        let mimetype = self.require_mimetype(index)?;
        let version = self.require_version(index)?;
        Ok(StreamFormat::new(mimetype, version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_map_from_json() {
        let json = r#"{
            "0": {"mimetype": "video/mp4", "version": "(:unap)"},
            "1": {"mimetype": "audio/aac", "version": "(:unap)"}
        }"#;
        let streams: StreamMap = serde_json::from_str(json).unwrap();
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[&1].mimetype.as_deref(), Some("audio/aac"));
        assert_eq!(streams[&0].charset, None);
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let stream = StreamDescriptor::with_charset_only("UTF-8");
        let err = stream.stream_format(3).unwrap_err();
        assert!(matches!(
            err,
            DpresError::MalformedStream {
                index: 3,
                field: "mimetype"
            }
        ));

        let stream = StreamDescriptor {
            mimetype: Some("audio/aac".to_string()),
            ..StreamDescriptor::default()
        };
        assert!(matches!(
            stream.require_version(1),
            Err(DpresError::MalformedStream {
                field: "version",
                ..
            })
        ));
    }

    #[test]
    fn test_stream_format_folds_mimetype_case() {
        let stream = StreamDescriptor::new("Audio/AAC", "(:unap)");
        assert_eq!(
            stream.stream_format(1).unwrap(),
            StreamFormat::new("audio/aac", "(:unap)")
        );
    }
}
