//! 非容器格式不得携带多个流.
//!
//! 本规则只会降级, 不会越过 MIME/版本规则给出的上限.

use dpres_core::Grade;

use crate::rule::{GradingRequest, RuleContext};

/// 已知的非容器格式, 且不在多流例外名单中
pub fn is_supported(ctx: &RuleContext<'_>, mimetype: &str) -> bool {
    ctx.vocabulary.formats.contains_mimetype(mimetype)
        && !ctx.vocabulary.containers.contains_mimetype(mimetype)
        && !ctx.config.is_multi_stream_format(mimetype)
}

/// 多于一个流时不可接受, 否则推荐
pub fn grade(request: &GradingRequest<'_>) -> Grade {
    if request.streams.len() > 1 {
        Grade::Unacceptable
    } else {
        Grade::Recommended
    }
}
