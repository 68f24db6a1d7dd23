//! 评级配置.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use dpres_core::{DpresError, DpresResult, mimetype};

/// 评级配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraderConfig {
    /// 可以合法携带多个流的非容器格式 (如多页图像), 单流规则不适用于它们
    #[serde(default = "default_multi_stream_formats")]
    pub multi_stream_formats: Vec<String>,
}

fn default_multi_stream_formats() -> Vec<String> {
    vec!["image/tiff".to_string(), "image/gif".to_string()]
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            multi_stream_formats: default_multi_stream_formats(),
        }
    }
}

impl GraderConfig {
    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> DpresResult<Self> {
        serde_json::from_str(json).map_err(|err| DpresError::Data(format!("解析评级配置失败: {err}")))
    }

    /// 从 JSON 文件读取
    pub fn load(path: impl AsRef<Path>) -> DpresResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// 该 MIME 类型是否允许携带多个流
    pub fn is_multi_stream_format(&self, mime: &str) -> bool {
        self.multi_stream_formats
            .iter()
            .any(|candidate| mimetype::eq(candidate, mime))
    }
}
