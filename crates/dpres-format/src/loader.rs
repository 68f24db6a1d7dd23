//! 词表 JSON 读取.
//!
//! 内置数据随 crate 一起编译, 也可以从任意路径读取自定义数据.

use std::fs;
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;

use dpres_core::{DpresError, DpresResult};

use crate::record::{ContainerRecord, Document, FileFormatRecord};

/// 内置文件格式词表
const BUILTIN_FILE_FORMATS: &str = include_str!("../data/file_formats.json");

/// 内置容器评级表
const BUILTIN_CONTAINER_STREAMS: &str = include_str!("../data/av_container_grading.json");

/// 从字符串解析文件格式词表
pub fn parse_file_formats(json: &str) -> DpresResult<Vec<FileFormatRecord>> {
    parse_document(json, "文件格式词表")
}

/// 从字符串解析容器评级表
pub fn parse_container_streams(json: &str) -> DpresResult<Vec<ContainerRecord>> {
    parse_document(json, "容器评级表")
}

/// 从文件读取文件格式词表
pub fn read_file_formats(path: impl AsRef<Path>) -> DpresResult<Vec<FileFormatRecord>> {
    let path = path.as_ref();
    let records = parse_file_formats(&fs::read_to_string(path)?)?;
    debug!("读取文件格式词表: {}, 格式数={}", path.display(), records.len());
    Ok(records)
}

/// 从文件读取容器评级表
pub fn read_container_streams(path: impl AsRef<Path>) -> DpresResult<Vec<ContainerRecord>> {
    let path = path.as_ref();
    let records = parse_container_streams(&fs::read_to_string(path)?)?;
    debug!("读取容器评级表: {}, 档位数={}", path.display(), records.len());
    Ok(records)
}

/// 内置文件格式词表
pub fn builtin_file_formats() -> DpresResult<Vec<FileFormatRecord>> {
    parse_file_formats(BUILTIN_FILE_FORMATS)
}

/// 内置容器评级表
pub fn builtin_container_streams() -> DpresResult<Vec<ContainerRecord>> {
    parse_container_streams(BUILTIN_CONTAINER_STREAMS)
}

fn parse_document<T: DeserializeOwned>(json: &str, what: &str) -> DpresResult<Vec<T>> {
    serde_json::from_str::<Document<T>>(json)
        .map(|doc| doc.file_formats)
        .map_err(|err| DpresError::Data(format!("解析{what}失败: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_data_parses() {
        let formats = builtin_file_formats().unwrap();
        assert!(!formats.is_empty());
        assert!(formats.iter().all(|f| !f.mimetype.is_empty()));

        let containers = builtin_container_streams().unwrap();
        assert!(!containers.is_empty());
    }

    #[test]
    fn test_read_file_formats_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"file_formats": [{{"mimetype": "aaa/bbb", "versions": []}}]}}"#
        )
        .unwrap();

        let records = read_file_formats(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mimetype, "aaa/bbb");
    }

    #[test]
    fn test_missing_top_level_key_is_data_error() {
        let result = parse_container_streams(r#"{"containers": []}"#);
        assert!(matches!(result, Err(DpresError::Data(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_file_formats(dir.path().join("absent.json"));
        assert!(matches!(result, Err(DpresError::Io(_))));
    }
}
