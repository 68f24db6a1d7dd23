//! MIME 类型比较.
//!
//! MIME 类型一律忽略大小写比较, 版本字符串一律精确比较.

/// 规范化 MIME 类型: 去除首尾空白并转为小写
pub fn normalize(mimetype: &str) -> String {
    mimetype.trim().to_ascii_lowercase()
}

/// 忽略大小写比较两个 MIME 类型
pub fn eq(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
