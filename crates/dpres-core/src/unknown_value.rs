//! 未知值哨兵.
//!
//! 数字长期保存服务的受控词表用一组保留字符串表示 "不适用"、"不可用" 等,
//! 例如没有版本概念的格式以 `(:unap)` 作为版本键.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 未知值哨兵
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnknownValue {
    /// 无法访问
    #[serde(rename = "(:unac)")]
    Unaccessible,
    /// 不允许公开
    #[serde(rename = "(:unal)")]
    Unallowed,
    /// 不适用
    #[serde(rename = "(:unap)")]
    NotApplicable,
    /// 值不可用
    #[serde(rename = "(:unav)", alias = "(:unavail)")]
    Unavailable,
    /// 未知
    #[serde(rename = "(:unkn)")]
    Unknown,
    /// 无
    #[serde(rename = "(:none)")]
    None,
    /// 空值
    #[serde(rename = "(:null)")]
    Null,
    /// 待定
    #[serde(rename = "(:tba)")]
    ToBeAnnounced,
    /// 等等
    #[serde(rename = "(:etal)")]
    EtAl,
}

impl UnknownValue {
    /// 所有哨兵值
    pub const ALL: &[UnknownValue] = &[
        Self::Unaccessible,
        Self::Unallowed,
        Self::NotApplicable,
        Self::Unavailable,
        Self::Unknown,
        Self::None,
        Self::Null,
        Self::ToBeAnnounced,
        Self::EtAl,
    ];

    /// 词表中的规范取值
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unaccessible => "(:unac)",
            Self::Unallowed => "(:unal)",
            Self::NotApplicable => "(:unap)",
            Self::Unavailable => "(:unav)",
            Self::Unknown => "(:unkn)",
            Self::None => "(:none)",
            Self::Null => "(:null)",
            Self::ToBeAnnounced => "(:tba)",
            Self::EtAl => "(:etal)",
        }
    }

    /// 解析哨兵字符串, 非哨兵返回 `None`
    ///
    /// `(:unavail)` 视为 `(:unav)` 的别名.
    pub fn parse(value: &str) -> Option<UnknownValue> {
        let value = value.trim();
        if value == "(:unavail)" {
            return Some(Self::Unavailable);
        }
        Self::ALL.iter().find(|v| v.as_str() == value).copied()
    }

    /// 判断字符串是否为 "值不可用"
    pub fn is_unavailable(value: &str) -> bool {
        Self::parse(value) == Some(Self::Unavailable)
    }
}

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
