//! 评级门面.
//!
//! 给定文件的 MIME 类型、版本和流, 选出适用的规则, 逐一求值后取最弱等级.
//! 评级是只依赖输入和词表快照的纯函数, [`Grader`] 可以在线程间共享.

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Serialize, Serializer};

use dpres_core::{DpresResult, Grade, UnknownValue, weakest_grade};
use dpres_format::Vocabulary;

use crate::config::GraderConfig;
use crate::rule::{GradingRequest, GradingRule, RuleContext};
use crate::stream::StreamMap;

/// 评级结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// 得到的等级
    Graded(Grade),
    /// 输入格式本身未知, 原样报告为 "值不可用"
    Unavailable,
}

impl Verdict {
    /// 等级, 不可用时为 `None`
    pub const fn grade(self) -> Option<Grade> {
        match self {
            Self::Graded(grade) => Some(grade),
            Self::Unavailable => None,
        }
    }

    /// 受控词表中的取值
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Graded(grade) => grade.as_str(),
            Self::Unavailable => UnknownValue::Unavailable.as_str(),
        }
    }
}

impl From<Grade> for Verdict {
    fn from(grade: Grade) -> Self {
        Self::Graded(grade)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 单条规则给出的等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleGrade {
    /// 规则
    pub rule: GradingRule,
    /// 该规则给出的等级
    pub grade: Grade,
}

/// 带逐条规则明细的评级结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    /// 最终结论
    pub verdict: Verdict,
    /// 适用规则各自给出的等级, 按规则顺序
    pub rule_grades: Vec<RuleGrade>,
}

/// 评级器
#[derive(Debug, Clone)]
pub struct Grader {
    /// 词表快照
    vocabulary: Arc<Vocabulary>,
    /// 评级配置
    config: GraderConfig,
}

impl Grader {
    /// 以默认配置创建
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self::with_config(vocabulary, GraderConfig::default())
    }

    /// 以指定配置创建
    pub fn with_config(vocabulary: Arc<Vocabulary>, config: GraderConfig) -> Self {
        Self { vocabulary, config }
    }

    /// 当前使用的词表快照
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// 当前配置
    pub fn config(&self) -> &GraderConfig {
        &self.config
    }

    fn context(&self) -> RuleContext<'_> {
        RuleContext {
            vocabulary: &self.vocabulary,
            config: &self.config,
        }
    }

    /// 适用于该 (MIME 类型, 版本) 的规则, 按固定顺序
    pub fn applicable_rules(&self, mimetype: &str, version: &str) -> Vec<GradingRule> {
        let ctx = self.context();
        GradingRule::ALL
            .iter()
            .copied()
            .filter(|rule| rule.is_supported(&ctx, mimetype, version))
            .collect()
    }

    /// 评级并返回每条适用规则的明细
    pub fn assess(
        &self,
        mimetype: Option<&str>,
        version: &str,
        streams: &StreamMap,
    ) -> DpresResult<Assessment> {
        let mimetype = match mimetype.map(str::trim) {
            Some(m) if !m.is_empty() && !UnknownValue::is_unavailable(m) => m,
            _ => return Ok(unavailable()),
        };
        if UnknownValue::is_unavailable(version) {
            return Ok(unavailable());
        }

        let rules = self.applicable_rules(mimetype, version);
        if rules.is_empty() {
            debug!("没有规则适用于 {mimetype}, 判为不可接受");
            return Ok(Assessment {
                verdict: Verdict::Graded(Grade::Unacceptable),
                rule_grades: Vec::new(),
            });
        }

        let ctx = self.context();
        let request = GradingRequest {
            mimetype,
            version,
            streams,
        };
        let rule_grades = rules
            .into_iter()
            .map(|rule| -> DpresResult<RuleGrade> {
                let grade = rule.grade(&ctx, &request)?;
                debug!("{mimetype} {version}: 规则 {rule} 给出 {grade}");
                Ok(RuleGrade { rule, grade })
            })
            .collect::<DpresResult<Vec<_>>>()?;

        let grade = weakest_grade(rule_grades.iter().map(|rg| rg.grade))?;
        Ok(Assessment {
            verdict: Verdict::Graded(grade),
            rule_grades,
        })
    }

    /// 评级
    ///
    /// - MIME 类型缺失、为空或为 "值不可用" (版本为 "值不可用" 亦同) 时返回 [`Verdict::Unavailable`]
    /// - 没有任何规则适用时为不可接受
    /// - 否则取所有适用规则中最弱的等级
    pub fn grade(
        &self,
        mimetype: Option<&str>,
        version: &str,
        streams: &StreamMap,
    ) -> DpresResult<Verdict> {
        self.assess(mimetype, version, streams)
            .map(|assessment| assessment.verdict)
    }
}

fn unavailable() -> Assessment {
    Assessment {
        verdict: Verdict::Unavailable,
        rule_grades: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures;
    use crate::stream::StreamDescriptor;

    fn grader() -> Grader {
        Grader::new(Arc::new(fixtures::vocabulary()))
    }

    #[test]
    fn test_unavailable_inputs() {
        let grader = grader();
        let streams = StreamMap::new();
        for mimetype in [None, Some(""), Some("  "), Some("(:unav)"), Some("(:unavail)")] {
            assert_eq!(
                grader.grade(mimetype, "1.2", &streams).unwrap(),
                Verdict::Unavailable
            );
        }
        assert_eq!(
            grader
                .grade(Some("application/pdf"), "(:unav)", &streams)
                .unwrap(),
            Verdict::Unavailable
        );
    }

    #[test]
    fn test_unknown_mimetype_is_unacceptable() {
        let grader = grader();
        let assessment = grader
            .assess(Some("application/x-nothing"), "1", &StreamMap::new())
            .unwrap();
        assert_eq!(assessment.verdict, Verdict::Graded(Grade::Unacceptable));
        assert!(assessment.rule_grades.is_empty());
    }

    #[test]
    fn test_applicable_rules() {
        let grader = grader();
        assert_eq!(
            grader.applicable_rules("text/csv", "(:unap)"),
            vec![
                GradingRule::MimeVersion,
                GradingRule::Charset,
                GradingRule::SingleStream
            ]
        );
        assert_eq!(
            grader.applicable_rules("video/mp4", "(:unap)"),
            vec![GradingRule::MimeVersion, GradingRule::ContainerStreams]
        );
        assert_eq!(
            grader.applicable_rules("image/tiff", "6.0"),
            vec![GradingRule::MimeVersion]
        );
        // 未收录的容器版本不启用容器规则
        assert_eq!(
            grader.applicable_rules("video/mp4", "2"),
            vec![GradingRule::MimeVersion]
        );
    }

    #[test]
    fn test_container_only_format_with_unknown_version() {
        use dpres_format::{ContainerProfile, ContainerTable, FormatTable, Vocabulary};

        // 容器表收录了 video/x-foo, 但格式表没有
        let vocabulary = Vocabulary::new(
            FormatTable::default(),
            ContainerTable::new(vec![
                ContainerProfile::new("video/x-foo", "1", Grade::Recommended)
                    .with_audio("audio/aac", "(:unap)"),
            ]),
        );
        let grader = Grader::new(Arc::new(vocabulary));

        let verdict = grader
            .grade(Some("video/x-foo"), "2", &StreamMap::new())
            .unwrap();
        assert_eq!(verdict, Verdict::Graded(Grade::Unacceptable));

        let streams = StreamMap::from([(0, StreamDescriptor::new("video/x-foo", "2"))]);
        let verdict = grader.grade(Some("video/x-foo"), "2", &streams).unwrap();
        assert_eq!(verdict, Verdict::Graded(Grade::Unacceptable));

        // 已收录的版本仍由容器规则评级
        let streams = StreamMap::from([
            (0, StreamDescriptor::new("video/x-foo", "1")),
            (1, StreamDescriptor::new("audio/aac", "(:unap)")),
        ]);
        let verdict = grader.grade(Some("video/x-foo"), "1", &streams).unwrap();
        assert_eq!(verdict, Verdict::Graded(Grade::Recommended));
    }

    #[test]
    fn test_weakest_rule_wins() {
        let grader = grader();
        let streams = StreamMap::from([
            (0, StreamDescriptor::new("video/quicktime", "(:unap)")),
            (1, StreamDescriptor::new("audio/aac", "(:unap)")),
        ]);
        // 外壳可接受, 内嵌流推荐
        let assessment = grader
            .assess(Some("video/quicktime"), "(:unap)", &streams)
            .unwrap();
        assert_eq!(assessment.verdict, Verdict::Graded(Grade::Acceptable));
        assert_eq!(assessment.rule_grades.len(), 2);
    }

    #[test]
    fn test_single_stream_demotes_simple_format() {
        let grader = grader();
        let streams = StreamMap::from([
            (0, StreamDescriptor::new("application/pdf", "A-1a")),
            (1, StreamDescriptor::new("image/jpeg", "1.01")),
        ]);
        assert_eq!(
            grader
                .grade(Some("application/pdf"), "A-1a", &streams)
                .unwrap(),
            Verdict::Graded(Grade::Unacceptable)
        );
    }

    #[test]
    fn test_multi_stream_exclusion_from_config() {
        let streams = StreamMap::from([
            (0, StreamDescriptor::new("image/tiff", "6.0")),
            (1, StreamDescriptor::new("image/tiff", "6.0")),
        ]);
        let verdict = grader().grade(Some("image/tiff"), "6.0", &streams).unwrap();
        assert_eq!(verdict, Verdict::Graded(Grade::Recommended));

        let strict = Grader::with_config(
            Arc::new(fixtures::vocabulary()),
            GraderConfig {
                multi_stream_formats: Vec::new(),
            },
        );
        let verdict = strict.grade(Some("image/tiff"), "6.0", &streams).unwrap();
        assert_eq!(verdict, Verdict::Graded(Grade::Unacceptable));
    }

    #[test]
    fn test_verdict_display_and_serialize() {
        assert_eq!(Verdict::Unavailable.to_string(), "(:unav)");
        let json = serde_json::to_string(&Verdict::Graded(Grade::Acceptable)).unwrap();
        assert_eq!(json, "\"fi-dpres-acceptable-file-format\"");
        assert_eq!(Verdict::Graded(Grade::BitLevel).grade(), Some(Grade::BitLevel));
        assert_eq!(Verdict::Unavailable.grade(), None);
    }
}
