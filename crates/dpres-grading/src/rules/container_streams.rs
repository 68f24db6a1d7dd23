//! 容器内嵌流的兼容性.
//!
//! 容器外壳本身的等级由 MIME/版本规则负责, 这里只看容器里装了什么.
//! 索引 0 是容器自身, 仅用于查找档位; 其余流按 (MIME 类型, 版本) 去重后逐一
//! 在该容器的各档位中查找. 任一内嵌格式不在任何档位中, 整个文件不可接受;
//! 否则取所有命中档位中最弱的等级.

use std::collections::BTreeSet;

use dpres_core::{DpresError, DpresResult, Grade, weakest_grade};
use dpres_format::{ContainerProfile, StreamFormat};
use log::{debug, warn};

use crate::rule::{GradingRequest, RuleContext};

/// 容器表中存在该 (MIME 类型, 版本) 的档位时适用
pub fn is_supported(ctx: &RuleContext<'_>, mimetype: &str, version: &str) -> bool {
    ctx.vocabulary
        .containers
        .profiles_for(mimetype, version)
        .next()
        .is_some()
}

/// 按内嵌流给容器评级
pub fn grade(ctx: &RuleContext<'_>, request: &GradingRequest<'_>) -> DpresResult<Grade> {
    let embedded = request
        .streams
        .iter()
        .filter(|(index, _)| **index != 0)
        .map(|(index, stream)| stream.stream_format(*index))
        .collect::<DpresResult<BTreeSet<StreamFormat>>>()?;

    // 空容器不扣分
    if embedded.is_empty() {
        return Ok(Grade::Recommended);
    }

    let container = request
        .streams
        .get(&0)
        .ok_or_else(|| {
            warn!("{} 含内嵌流但缺少索引 0 的容器流", request.mimetype);
            DpresError::StreamNotFound(0)
        })?;
    let container_mimetype = container.require_mimetype(0)?;
    let container_version = container.require_version(0)?;

    let tiers: Vec<&ContainerProfile> = ctx
        .vocabulary
        .containers
        .profiles_for(container_mimetype, container_version)
        .collect();

    let mut matched = Vec::with_capacity(embedded.len());
    for stream in &embedded {
        let before = matched.len();
        matched.extend(
            tiers
                .iter()
                .filter(|tier| tier.admits(stream))
                .map(|tier| tier.grade),
        );
        if matched.len() == before {
            debug!(
                "{} {} 不允许包含 {}, 判为不可接受",
                container_mimetype, container_version, stream
            );
            return Ok(Grade::Unacceptable);
        }
    }

    weakest_grade(matched)
}
