//! 格式版本评级表.
//!
//! 以 (MIME 类型, 版本) 为键的只读索引. MIME 类型忽略大小写, 版本精确匹配.

use std::collections::HashMap;

use dpres_core::{Grade, mimetype};

use crate::record::FileFormatRecord;

/// 一个已评级的 (MIME 类型, 版本) 条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatVersionEntry {
    /// MIME 类型 (保留原始大小写)
    pub mimetype: String,
    /// 版本字符串
    pub version: String,
    /// 保存等级
    pub grade: Grade,
    /// 允许的字符集, 为空表示与字符集无关
    pub allowed_charsets: Vec<String>,
}

impl FormatVersionEntry {
    /// 创建条目
    pub fn new(mimetype: impl Into<String>, version: impl Into<String>, grade: Grade) -> Self {
        Self {
            mimetype: mimetype.into(),
            version: version.into(),
            grade,
            allowed_charsets: Vec::new(),
        }
    }

    /// 设置允许的字符集
    pub fn with_charsets<I, S>(mut self, charsets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_charsets = charsets.into_iter().map(Into::into).collect();
        self
    }

    /// 是否对字符集敏感
    pub fn is_charset_sensitive(&self) -> bool {
        !self.allowed_charsets.is_empty()
    }
}

/// 格式版本评级表
#[derive(Debug, Clone, Default)]
pub struct FormatTable {
    /// 条目, 保持数据文件中的顺序
    entries: Vec<FormatVersionEntry>,
    /// 规范化 MIME 类型 -> 条目下标
    by_mimetype: HashMap<String, Vec<usize>>,
}

impl FormatTable {
    /// 由条目列表构建索引
    pub fn new(entries: Vec<FormatVersionEntry>) -> Self {
        let mut by_mimetype: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_mimetype
                .entry(mimetype::normalize(&entry.mimetype))
                .or_default()
                .push(idx);
        }
        Self {
            entries,
            by_mimetype,
        }
    }

    /// 由文件格式记录构建, 只收录处于当前规范中的版本
    pub fn from_records(records: &[FileFormatRecord]) -> Self {
        let entries = records
            .iter()
            .flat_map(|record| {
                record
                    .versions
                    .iter()
                    .filter(|version| version.active)
                    .map(move |version| FormatVersionEntry {
                        mimetype: record.mimetype.clone(),
                        version: version.version.clone(),
                        grade: version.grade,
                        allowed_charsets: record.charsets.clone(),
                    })
            })
            .collect();
        Self::new(entries)
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 遍历所有条目
    pub fn iter(&self) -> impl Iterator<Item = &FormatVersionEntry> {
        self.entries.iter()
    }

    /// 表中是否存在该 MIME 类型 (任意版本)
    pub fn contains_mimetype(&self, mimetype: &str) -> bool {
        self.by_mimetype.contains_key(&mimetype::normalize(mimetype))
    }

    /// 该 MIME 类型的所有版本条目
    pub fn versions_of(&self, mimetype: &str) -> impl Iterator<Item = &FormatVersionEntry> {
        self.by_mimetype
            .get(&mimetype::normalize(mimetype))
            .into_iter()
            .flatten()
            .map(|&idx| &self.entries[idx])
    }

    /// 精确查找 (MIME 类型, 版本), 多条匹配时取第一条
    pub fn find(&self, mimetype: &str, version: &str) -> Option<&FormatVersionEntry> {
        self.versions_of(mimetype)
            .find(|entry| entry.version == version)
    }

    /// 该 MIME 类型是否声明了允许的字符集
    pub fn is_charset_sensitive(&self, mimetype: &str) -> bool {
        self.versions_of(mimetype)
            .any(FormatVersionEntry::is_charset_sensitive)
    }
}
