//! 文本类格式的字符集校验.
//!
//! 只管辖声明了允许字符集的格式. 任一流声明了不允许的字符集, 整个文件即不可接受,
//! 与其它流是否合规无关.

use dpres_core::{Grade, charset};
use log::debug;

use crate::rule::{GradingRequest, RuleContext};

/// 格式表中该 MIME 类型声明了非空字符集时适用
pub fn is_supported(ctx: &RuleContext<'_>, mimetype: &str) -> bool {
    ctx.vocabulary.formats.is_charset_sensitive(mimetype)
}

/// 以版本查表结果为基础等级, 再逐流校验声明的字符集
///
/// 未声明字符集的流不参与校验.
pub fn grade(ctx: &RuleContext<'_>, request: &GradingRequest<'_>) -> Grade {
    let Some(entry) = ctx
        .vocabulary
        .formats
        .find(request.mimetype, request.version)
    else {
        return Grade::Unacceptable;
    };

    let violation = request.streams.iter().find_map(|(index, stream)| {
        stream
            .charset
            .as_deref()
            .filter(|declared| !charset::is_allowed(declared, &entry.allowed_charsets))
            .map(|declared| (*index, declared))
    });

    match violation {
        Some((index, declared)) => {
            debug!(
                "流 #{} 的字符集 {} 不在 {} 允许范围内",
                index, declared, request.mimetype
            );
            Grade::Unacceptable
        }
        None => entry.grade,
    }
}
