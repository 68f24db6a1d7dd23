//! 评级请求的命令行与文件表示.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use dpres_core::UnknownValue;
use dpres_grading::{StreamDescriptor, StreamMap};

/// 批量文件中的单个评级请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRequest {
    /// 文件 MIME 类型, 缺失时评为不可用
    #[serde(default)]
    pub mimetype: Option<String>,
    /// 文件版本, 缺省为 "不适用"
    #[serde(default = "default_version")]
    pub version: String,
    /// 流描述, 以索引为键
    #[serde(default)]
    pub streams: StreamMap,
}

/// 缺省版本
pub fn default_version() -> String {
    UnknownValue::NotApplicable.as_str().to_string()
}

/// 解析 `INDEX=MIMETYPE[;VERSION[;CHARSET]]` 形式的流描述
///
/// 空字段视为未声明, 例如 `0=;;UTF-8` 只声明字符集.
pub fn parse_stream_spec(spec: &str) -> Result<(usize, StreamDescriptor)> {
    let (index, rest) = spec
        .split_once('=')
        .with_context(|| format!("流描述缺少 '=': {spec}"))?;
    let index: usize = index
        .trim()
        .parse()
        .with_context(|| format!("无效的流索引: {index}"))?;

    let mut fields = rest.split(';').map(str::trim);
    let mut next = || {
        fields
            .next()
            .filter(|field| !field.is_empty())
            .map(str::to_string)
    };
    let descriptor = StreamDescriptor {
        mimetype: next(),
        version: next(),
        charset: next(),
    };
    if fields.next().is_some() {
        bail!("流描述字段过多: {spec}");
    }
    Ok((index, descriptor))
}

/// 合并流文件和命令行流描述, 命令行中的同索引描述覆盖文件中的
pub fn collect_streams(file: Option<&Path>, specs: &[String]) -> Result<StreamMap> {
    let mut streams = match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("读取流文件失败: {}", path.display()))?;
            serde_json::from_str::<StreamMap>(&text)
                .with_context(|| format!("解析流文件失败: {}", path.display()))?
        }
        None => StreamMap::new(),
    };
    for spec in specs {
        let (index, descriptor) = parse_stream_spec(spec)?;
        streams.insert(index, descriptor);
    }
    Ok(streams)
}

/// 读取批量请求文件 (JSON 数组)
pub fn read_batch(path: &Path) -> Result<Vec<GradeRequest>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("读取批量文件失败: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("解析批量文件失败: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_stream_spec() {
        let (index, stream) = parse_stream_spec("1=audio/aac;(:unap)").unwrap();
        assert_eq!(index, 1);
        assert_eq!(stream, StreamDescriptor::new("audio/aac", "(:unap)"));

        let (_, stream) = parse_stream_spec("0 = text/csv ; (:unap) ; UTF-8").unwrap();
        assert_eq!(
            stream,
            StreamDescriptor::new("text/csv", "(:unap)").with_charset("UTF-8")
        );
    }

    #[test]
    fn test_parse_partial_stream_spec() {
        let (_, stream) = parse_stream_spec("0=;;UTF-8").unwrap();
        assert_eq!(stream, StreamDescriptor::with_charset_only("UTF-8"));

        let (_, stream) = parse_stream_spec("2=video/h264").unwrap();
        assert_eq!(stream.mimetype.as_deref(), Some("video/h264"));
        assert_eq!(stream.version, None);
    }

    #[test]
    fn test_parse_invalid_stream_spec() {
        assert!(parse_stream_spec("audio/aac").is_err());
        assert!(parse_stream_spec("x=audio/aac").is_err());
        assert!(parse_stream_spec("0=a;b;c;d").is_err());
    }

    #[test]
    fn test_collect_streams_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"0": {{"mimetype": "video/mp4", "version": "(:unap)"}},
                "1": {{"mimetype": "audio/mpeg", "version": "1"}}}}"#
        )
        .unwrap();
        let specs = vec!["1=audio/aac;(:unap)".to_string()];
        let streams = collect_streams(Some(file.path()), &specs).unwrap();
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[&1], StreamDescriptor::new("audio/aac", "(:unap)"));
    }

    #[test]
    fn test_read_batch_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"mimetype": "application/pdf", "version": "A-1a"}},
                {{"mimetype": "video/mp2t"}},
                {{}}]"#
        )
        .unwrap();
        let requests = read_batch(file.path()).unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].version, "(:unap)");
        assert!(requests[1].streams.is_empty());
        assert_eq!(requests[2].mimetype, None);
    }
}
