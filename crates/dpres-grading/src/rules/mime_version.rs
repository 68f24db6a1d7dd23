//! 按 (MIME 类型, 版本) 精确查表.
//!
//! 已知格式的未知版本一律不可接受.

use dpres_core::Grade;
use log::debug;

use crate::rule::{GradingRequest, RuleContext};

/// MIME 类型出现在格式表中即适用
pub fn is_supported(ctx: &RuleContext<'_>, mimetype: &str) -> bool {
    ctx.vocabulary.formats.contains_mimetype(mimetype)
}

/// 查到的等级, 版本未登记时为不可接受
pub fn grade(ctx: &RuleContext<'_>, request: &GradingRequest<'_>) -> Grade {
    match ctx.vocabulary.formats.find(request.mimetype, request.version) {
        Some(entry) => entry.grade,
        None => {
            debug!(
                "未登记的版本: {} {}, 判为不可接受",
                request.mimetype, request.version
            );
            Grade::Unacceptable
        }
    }
}
