//! 词表筛选与汇总视图.
//!
//! 这些视图只读取记录, 不修改数据文件.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use dpres_core::{ContentType, Grade, TechMetadata};

use crate::container_table::{ContainerProfile, StreamFormat};
use crate::record::{ContainerRecord, FileFormatRecord, FormatVersionRecord, Relation};

/// 格式筛选条件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSelection {
    /// 包含已退出当前规范的版本
    pub deprecated: bool,
    /// 包含未正式收录的版本 (如仅比特级保存的格式)
    pub unofficial: bool,
}

impl FormatSelection {
    fn accepts(&self, version: &FormatVersionRecord) -> bool {
        let official = self.unofficial || version.is_official();
        let active = self.deprecated || version.active;
        official && active
    }
}

/// 按条件筛选格式, 每个格式只保留满足条件的版本
///
/// 没有任何版本满足条件的格式不出现在结果中.
pub fn select_formats(
    records: &[FileFormatRecord],
    selection: FormatSelection,
) -> Vec<FileFormatRecord> {
    records
        .iter()
        .filter_map(|record| {
            let versions: Vec<FormatVersionRecord> = record
                .versions
                .iter()
                .filter(|version| selection.accepts(version))
                .cloned()
                .collect();
            if versions.is_empty() {
                return None;
            }
            Some(FileFormatRecord {
                versions,
                ..record.clone()
            })
        })
        .collect()
}

/// 展平后的格式版本: 格式级字段与版本字段合并
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatFormatVersion {
    /// MIME 类型
    pub mimetype: String,
    /// 内容类型
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    /// 完整名称
    pub format_name_long: String,
    /// 简称
    pub format_name_short: String,
    /// 常见扩展名
    pub typical_extensions: Vec<String>,
    /// 必需的技术元数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_metadata: Option<TechMetadata>,
    /// 允许的字符集
    pub charsets: Vec<String>,
    /// 与其它格式的关系
    pub relations: Vec<Relation>,
    /// 版本字段
    #[serde(flatten)]
    pub version: FormatVersionRecord,
}

/// 把每个格式拆成逐版本的扁平记录
pub fn flatten_versions(records: &[FileFormatRecord]) -> Vec<FlatFormatVersion> {
    records
        .iter()
        .flat_map(|record| {
            record.versions.iter().map(move |version| FlatFormatVersion {
                mimetype: record.mimetype.clone(),
                content_type: record.content_type,
                format_name_long: record.format_name_long.clone(),
                format_name_short: record.format_name_short.clone(),
                typical_extensions: record.typical_extensions.clone(),
                required_metadata: record.required_metadata,
                charsets: record.charsets.clone(),
                relations: record.relations.clone(),
                version: version.clone(),
            })
        })
        .collect()
}

/// MIME 类型 -> (版本 -> 等级), 只含当前规范中的版本
///
/// 共享 MIME 类型的多个格式合并到同一键下. `text_only` 时只保留声明了字符集的格式.
pub fn mimetypes_grading(
    records: &[FileFormatRecord],
    text_only: bool,
) -> BTreeMap<String, BTreeMap<String, Grade>> {
    let mut grading: BTreeMap<String, BTreeMap<String, Grade>> = BTreeMap::new();
    for record in records {
        if text_only && record.charsets.is_empty() {
            continue;
        }
        let versions: BTreeMap<String, Grade> = record
            .versions
            .iter()
            .filter(|version| version.active)
            .map(|version| (version.version.clone(), version.grade))
            .collect();
        if versions.is_empty() {
            continue;
        }
        grading
            .entry(record.mimetype.clone())
            .or_default()
            .extend(versions);
    }
    grading
}

/// 容器 MIME 类型 -> 允许的流格式集合
///
/// `grade` 为 `Some` 时只统计该等级的档位. 同一容器的多个档位合并.
pub fn containers_streams_grading(
    records: &[ContainerRecord],
    grade: Option<Grade>,
) -> BTreeMap<String, BTreeSet<StreamFormat>> {
    let mut grading: BTreeMap<String, BTreeSet<StreamFormat>> = BTreeMap::new();
    for record in records {
        if grade.is_some_and(|grade| grade != record.grade) {
            continue;
        }
        let profile = ContainerProfile::from(record);
        grading
            .entry(record.mimetype.clone())
            .or_default()
            .extend(profile.allowed_streams().cloned());
    }
    grading
}
