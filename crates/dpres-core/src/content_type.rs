//! 内容类型与技术元数据词表.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 文件格式的内容类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    /// 文本
    #[serde(rename = "text")]
    Text,
    /// 音频
    #[serde(rename = "audio")]
    Audio,
    /// 视频
    #[serde(rename = "video")]
    Video,
    /// 静态图像
    #[serde(rename = "still image")]
    StillImage,
    /// 网页归档
    #[serde(rename = "web archive")]
    WebArchive,
    /// 地理空间数据
    #[serde(rename = "geospatial data")]
    Geospatial,
    /// 数据库
    #[serde(rename = "databases")]
    Database,
    /// 研究数据
    #[serde(rename = "research data")]
    Research,
    /// 科学软件
    #[serde(rename = "scientific software")]
    Scientific,
    /// 音频容器
    #[serde(rename = "audiocontainer")]
    AudioContainer,
    /// 视频容器
    #[serde(rename = "videocontainer")]
    VideoContainer,
}

impl ContentType {
    /// 是否为音视频容器
    pub const fn is_container(self) -> bool {
        matches!(self, Self::AudioContainer | Self::VideoContainer)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::StillImage => "still image",
            Self::WebArchive => "web archive",
            Self::Geospatial => "geospatial data",
            Self::Database => "databases",
            Self::Research => "research data",
            Self::Scientific => "scientific software",
            Self::AudioContainer => "audiocontainer",
            Self::VideoContainer => "videocontainer",
        };
        write!(f, "{name}")
    }
}

/// 必需的技术元数据模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechMetadata {
    /// 图像 (MIX)
    #[serde(rename = "MIX")]
    Mix,
    /// 音频 (audioMD)
    #[serde(rename = "audioMD")]
    AudioMd,
    /// 视频 (videoMD)
    #[serde(rename = "videoMD")]
    VideoMd,
    /// CSV (ADDML)
    #[serde(rename = "ADDML")]
    Addml,
}

impl fmt::Display for TechMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mix => "MIX",
            Self::AudioMd => "audioMD",
            Self::VideoMd => "videoMD",
            Self::Addml => "ADDML",
        };
        write!(f, "{name}")
    }
}
