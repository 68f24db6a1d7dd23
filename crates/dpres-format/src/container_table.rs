//! 音视频容器评级表.
//!
//! 同一个容器 (MIME 类型, 版本) 可以有多个档位, 每个档位声明一个等级及该等级下
//! 允许包含的音频流和视频流.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use dpres_core::{Grade, mimetype};

use crate::record::{ContainerRecord, StreamRecord};

/// 流格式键: 规范化的 MIME 类型与原样的版本
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StreamFormat {
    /// MIME 类型 (小写)
    pub mimetype: String,
    /// 版本
    pub version: String,
}

impl StreamFormat {
    /// 创建流格式键, MIME 类型会被规范化
    pub fn new(mimetype: &str, version: impl Into<String>) -> Self {
        Self {
            mimetype: mimetype::normalize(mimetype),
            version: version.into(),
        }
    }
}

impl From<&StreamRecord> for StreamFormat {
    fn from(record: &StreamRecord) -> Self {
        Self::new(&record.mimetype, record.version.clone())
    }
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mimetype, self.version)
    }
}

/// 容器的一个评级档位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerProfile {
    /// 容器 MIME 类型
    pub mimetype: String,
    /// 容器版本
    pub version: String,
    /// 档位等级
    pub grade: Grade,
    /// 允许的音频流
    pub allowed_audio_streams: BTreeSet<StreamFormat>,
    /// 允许的视频流
    pub allowed_video_streams: BTreeSet<StreamFormat>,
}

impl ContainerProfile {
    /// 创建不含任何允许流的档位
    pub fn new(mimetype: impl Into<String>, version: impl Into<String>, grade: Grade) -> Self {
        Self {
            mimetype: mimetype.into(),
            version: version.into(),
            grade,
            allowed_audio_streams: BTreeSet::new(),
            allowed_video_streams: BTreeSet::new(),
        }
    }

    /// 添加允许的音频流
    pub fn with_audio(mut self, mimetype: &str, version: &str) -> Self {
        self.allowed_audio_streams
            .insert(StreamFormat::new(mimetype, version));
        self
    }

    /// 添加允许的视频流
    pub fn with_video(mut self, mimetype: &str, version: &str) -> Self {
        self.allowed_video_streams
            .insert(StreamFormat::new(mimetype, version));
        self
    }

    /// 该档位是否接纳此流格式 (音频或视频)
    pub fn admits(&self, stream: &StreamFormat) -> bool {
        self.allowed_audio_streams.contains(stream) || self.allowed_video_streams.contains(stream)
    }

    /// 音频与视频允许流的并集
    pub fn allowed_streams(&self) -> impl Iterator<Item = &StreamFormat> {
        self.allowed_audio_streams
            .iter()
            .chain(self.allowed_video_streams.iter())
    }
}

impl From<&ContainerRecord> for ContainerProfile {
    fn from(record: &ContainerRecord) -> Self {
        Self {
            mimetype: record.mimetype.clone(),
            version: record.version.clone(),
            grade: record.grade,
            allowed_audio_streams: record.audio_streams.iter().map(StreamFormat::from).collect(),
            allowed_video_streams: record.video_streams.iter().map(StreamFormat::from).collect(),
        }
    }
}

/// 容器评级表
#[derive(Debug, Clone, Default)]
pub struct ContainerTable {
    /// 档位, 保持数据文件中的顺序
    profiles: Vec<ContainerProfile>,
    /// 规范化 MIME 类型 -> 档位下标
    by_mimetype: HashMap<String, Vec<usize>>,
}

impl ContainerTable {
    /// 由档位列表构建索引
    pub fn new(profiles: Vec<ContainerProfile>) -> Self {
        let mut by_mimetype: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, profile) in profiles.iter().enumerate() {
            by_mimetype
                .entry(mimetype::normalize(&profile.mimetype))
                .or_default()
                .push(idx);
        }
        Self {
            profiles,
            by_mimetype,
        }
    }

    /// 由容器记录构建
    pub fn from_records(records: &[ContainerRecord]) -> Self {
        Self::new(records.iter().map(ContainerProfile::from).collect())
    }

    /// 档位数量
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// 遍历所有档位
    pub fn iter(&self) -> impl Iterator<Item = &ContainerProfile> {
        self.profiles.iter()
    }

    /// 表中是否存在该容器 MIME 类型 (任意版本)
    pub fn contains_mimetype(&self, mimetype: &str) -> bool {
        self.by_mimetype.contains_key(&mimetype::normalize(mimetype))
    }

    /// 与容器 (MIME 类型, 版本) 匹配的全部档位
    pub fn profiles_for<'a>(
        &'a self,
        mimetype: &str,
        version: &'a str,
    ) -> impl Iterator<Item = &'a ContainerProfile> {
        self.by_mimetype
            .get(&mimetype::normalize(mimetype))
            .into_iter()
            .flatten()
            .map(|&idx| &self.profiles[idx])
            .filter(move |profile| profile.version == version)
    }
}
