//! 词表 JSON 记录结构.
//!
//! 两份数据文件都以顶层 `"file_formats"` 键包裹记录列表:
//! - 文件格式词表: 每条记录是一个格式及其全部版本
//! - 容器评级表: 每条记录是一个容器版本在某个等级下允许包含的音视频流

use serde::{Deserialize, Serialize};

use dpres_core::{ContentType, Grade, TechMetadata};

/// 数据文件顶层结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    /// 记录列表
    pub file_formats: Vec<T>,
}

/// 文件格式记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFormatRecord {
    /// 格式标识, 如 `FI_DPRES_PDF_1`
    #[serde(rename = "_id", default)]
    pub id: String,
    /// MIME 类型
    pub mimetype: String,
    /// 内容类型
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    /// 完整名称
    #[serde(default)]
    pub format_name_long: String,
    /// 简称
    #[serde(default)]
    pub format_name_short: String,
    /// 常见扩展名
    #[serde(default)]
    pub typical_extensions: Vec<String>,
    /// 必需的技术元数据
    #[serde(default, deserialize_with = "empty_as_none")]
    pub required_metadata: Option<TechMetadata>,
    /// 允许的字符集, 为空表示与字符集无关
    #[serde(default)]
    pub charsets: Vec<String>,
    /// 与其它格式的关系
    #[serde(default)]
    pub relations: Vec<Relation>,
    /// 各版本
    #[serde(default)]
    pub versions: Vec<FormatVersionRecord>,
}

/// 格式版本记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatVersionRecord {
    /// 版本标识, 如 `FI_DPRES_PDF_1_A-1A`
    #[serde(rename = "_id", default)]
    pub id: String,
    /// 版本字符串, 无版本概念时为 `(:unap)`
    pub version: String,
    /// 保存等级
    pub grade: Grade,
    /// PRONOM 注册键
    #[serde(default)]
    pub format_registry_key: String,
    /// 入库流程是否支持
    #[serde(default)]
    pub support_in_dps_ingest: bool,
    /// 是否处于当前规范中
    #[serde(default)]
    pub active: bool,
    /// 加入规范的版本, 为空表示非正式支持
    #[serde(default)]
    pub added_in_dps_spec: String,
    /// 移出规范的版本
    #[serde(default)]
    pub removed_in_dps_spec: String,
    /// 格式规范来源
    #[serde(default, alias = "format_spec_sources")]
    pub format_sources: Vec<FormatSource>,
}

impl FormatVersionRecord {
    /// 是否为规范正式收录的版本
    pub fn is_official(&self) -> bool {
        !self.added_in_dps_spec.trim().is_empty()
    }
}

/// 格式规范来源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSource {
    /// 来源标识
    #[serde(default)]
    pub pid: String,
    /// 来源地址
    #[serde(default)]
    pub url: String,
    /// 文献引用
    #[serde(default)]
    pub reference: String,
}

/// 格式之间的关系
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// 关系类型, 如 "is superseded by"
    #[serde(rename = "type", default)]
    pub relation_type: String,
    /// 关联格式标识
    #[serde(default)]
    pub format: String,
}

/// 容器评级记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// 容器 MIME 类型
    pub mimetype: String,
    /// 容器版本
    pub version: String,
    /// 该档位的等级
    pub grade: Grade,
    /// 允许的音频流
    #[serde(default)]
    pub audio_streams: Vec<StreamRecord>,
    /// 允许的视频流
    #[serde(default)]
    pub video_streams: Vec<StreamRecord>,
}

/// 容器中允许的流格式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    /// 流 MIME 类型
    pub mimetype: String,
    /// 流版本
    pub version: String,
}

/// 旧数据用空字符串表示 "无必需元数据"
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<TechMetadata>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let quoted = serde_json::Value::String(value.to_string());
            serde_json::from_value(quoted)
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_record_with_defaults() {
        let json = r#"{
            "mimetype": "bbb/ccc",
            "content_type": "still image",
            "required_metadata": "",
            "charsets": ["UTF-8"],
            "versions": [
                {"version": "1", "grade": "fi-dpres-recommended-file-format", "active": true}
            ]
        }"#;
        let record: FileFormatRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.mimetype, "bbb/ccc");
        assert_eq!(record.content_type, Some(ContentType::StillImage));
        assert_eq!(record.required_metadata, None);
        assert!(record.relations.is_empty());
        assert_eq!(record.versions[0].grade, Grade::Recommended);
        assert!(!record.versions[0].is_official());
    }

    #[test]
    fn test_parse_required_metadata() {
        let json = r#"{"mimetype": "text/csv", "required_metadata": "ADDML"}"#;
        let record: FileFormatRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.required_metadata, Some(TechMetadata::Addml));
    }

    #[test]
    fn test_format_spec_sources_alias() {
        let json = r#"{
            "version": "1.7",
            "grade": "fi-dpres-acceptable-file-format",
            "format_spec_sources": [{"pid": "ISO_32000-1", "url": "", "reference": "PDF 1.7"}]
        }"#;
        let version: FormatVersionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(version.format_sources.len(), 1);
        assert_eq!(version.format_sources[0].pid, "ISO_32000-1");
    }
}
