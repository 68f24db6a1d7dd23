//! 字符集词表.

/// 文本类格式允许的字符集
pub const ALLOWED_CHARSETS: &[&str] = &["ISO-8859-15", "UTF-8", "UTF-16", "UTF-32"];

/// 判断 `charset` 是否属于 `allowed` (字符集名称不区分大小写)
pub fn is_allowed<S: AsRef<str>>(charset: &str, allowed: &[S]) -> bool {
    let charset = charset.trim();
    allowed
        .iter()
        .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(charset))
}
