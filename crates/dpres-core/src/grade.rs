//! 数字长期保存等级定义.
//!
//! 五个等级构成全序, 由强到弱: 推荐 > 可接受 > 比特级 (附推荐格式) > 比特级 > 不可接受.
//! 多条规则同时适用时, 取其中最弱的等级.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DpresError, DpresResult};

/// 保存等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// 推荐格式
    #[serde(rename = "fi-dpres-recommended-file-format")]
    Recommended,
    /// 可接受格式
    #[serde(rename = "fi-dpres-acceptable-file-format")]
    Acceptable,
    /// 比特级保存, 且需附带推荐格式版本
    #[serde(rename = "fi-dpres-bit-level-file-format-with-recommended")]
    WithRecommended,
    /// 仅比特级保存
    #[serde(rename = "fi-dpres-bit-level-file-format")]
    BitLevel,
    /// 不可接受
    #[serde(rename = "fi-dpres-unacceptable-file-format")]
    Unacceptable,
}

impl Grade {
    /// 所有等级, 由强到弱
    pub const ALL: &[Grade] = &[
        Self::Recommended,
        Self::Acceptable,
        Self::WithRecommended,
        Self::BitLevel,
        Self::Unacceptable,
    ];

    /// 等级序号, 不可接受为 0, 推荐为 4
    pub const fn rank(self) -> u8 {
        match self {
            Self::Unacceptable => 0,
            Self::BitLevel => 1,
            Self::WithRecommended => 2,
            Self::Acceptable => 3,
            Self::Recommended => 4,
        }
    }

    /// 受控词表中的取值
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "fi-dpres-recommended-file-format",
            Self::Acceptable => "fi-dpres-acceptable-file-format",
            Self::WithRecommended => "fi-dpres-bit-level-file-format-with-recommended",
            Self::BitLevel => "fi-dpres-bit-level-file-format",
            Self::Unacceptable => "fi-dpres-unacceptable-file-format",
        }
    }

    /// 简短名称, 用于命令行参数
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Recommended => "RECOMMENDED",
            Self::Acceptable => "ACCEPTABLE",
            Self::WithRecommended => "WITH_RECOMMENDED",
            Self::BitLevel => "BIT_LEVEL",
            Self::Unacceptable => "UNACCEPTABLE",
        }
    }

    /// 返回两者中较弱的等级
    pub fn weaker(self, other: Grade) -> Grade {
        if other.rank() < self.rank() {
            other
        } else {
            self
        }
    }
}

impl PartialOrd for Grade {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Grade {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = DpresError;

    /// 同时接受词表取值和简短名称 (简短名称不区分大小写)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .find(|grade| grade.as_str() == s || grade.short_name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| DpresError::UnknownGrade(s.to_string()))
    }
}

/// 求一组等级中最弱的等级
///
/// 空集合没有合法的归约结果, 返回 [`DpresError::EmptyGradeSet`].
pub fn weakest_grade<I>(grades: I) -> DpresResult<Grade>
where
    I: IntoIterator<Item = Grade>,
{
    grades
        .into_iter()
        .reduce(Grade::weaker)
        .ok_or(DpresError::EmptyGradeSet)
}
