//! 词表快照.
//!
//! [`Vocabulary`] 是一次性构建、之后只读的评级表快照, 可以通过 `Arc` 在线程间共享.
//! 重新加载时构建新的快照并整体替换, 从不修改正在被读取的快照.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info};

use dpres_core::DpresResult;

use crate::container_table::ContainerTable;
use crate::format_table::FormatTable;
use crate::loader;
use crate::record::{ContainerRecord, FileFormatRecord};

/// 评级所需的两张只读表
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// 格式版本评级表
    pub formats: FormatTable,
    /// 容器评级表
    pub containers: ContainerTable,
}

impl Vocabulary {
    /// 由两张表组成快照
    pub fn new(formats: FormatTable, containers: ContainerTable) -> Self {
        Self {
            formats,
            containers,
        }
    }

    /// 由原始记录构建快照
    pub fn from_records(formats: &[FileFormatRecord], containers: &[ContainerRecord]) -> Self {
        let vocabulary = Self::new(
            FormatTable::from_records(formats),
            ContainerTable::from_records(containers),
        );
        debug!(
            "构建词表快照: 格式版本={}, 容器档位={}",
            vocabulary.formats.len(),
            vocabulary.containers.len()
        );
        vocabulary
    }

    /// 内置数据构建的快照
    pub fn builtin() -> DpresResult<Self> {
        let formats = loader::builtin_file_formats()?;
        let containers = loader::builtin_container_streams()?;
        Ok(Self::from_records(&formats, &containers))
    }

    /// 从数据文件构建快照
    pub fn load(formats_path: impl AsRef<Path>, containers_path: impl AsRef<Path>) -> DpresResult<Self> {
        let formats = loader::read_file_formats(formats_path)?;
        let containers = loader::read_container_streams(containers_path)?;
        Ok(Self::from_records(&formats, &containers))
    }
}

/// 可原子替换的当前词表快照
///
/// 读者取得 `Arc` 后即释放锁, 评级过程中不持有锁.
#[derive(Debug)]
pub struct SharedVocabulary {
    current: RwLock<Arc<Vocabulary>>,
}

impl SharedVocabulary {
    /// 以初始快照创建
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            current: RwLock::new(Arc::new(vocabulary)),
        }
    }

    /// 取得当前快照
    pub fn snapshot(&self) -> Arc<Vocabulary> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// 整体替换为新快照, 返回被替换的旧快照
    pub fn replace(&self, vocabulary: Vocabulary) -> Arc<Vocabulary> {
        let next = Arc::new(vocabulary);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        info!(
            "替换词表快照: 格式版本={}, 容器档位={}",
            next.formats.len(),
            next.containers.len()
        );
        std::mem::replace(&mut *guard, next)
    }
}

impl From<Vocabulary> for SharedVocabulary {
    fn from(vocabulary: Vocabulary) -> Self {
        Self::new(vocabulary)
    }
}
