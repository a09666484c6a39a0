use chrono::{DateTime, FixedOffset};

/// 单个远程资源（文件或目录）的元数据，由 ReadDir / Stat 产生，构造后不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceInfo {
    pub(crate) name: String,                           // 最后一段路径名
    pub(crate) path: String,                           // 相对根 URL 的绝对路径，`/` 分隔，已解码
    pub(crate) size: u64,                              // 文件大小（字节），目录为 0
    pub(crate) modified: Option<DateTime<FixedOffset>>, // 解析失败时为 None
    pub(crate) is_dir: bool,                           // 是否目录
    pub(crate) content_type: Option<String>,           // MIME 类型
    pub(crate) etag: Option<String>,                   // 去掉引号后的 ETag
}

impl ResourceInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 只对文件有意义
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn modified(&self) -> Option<DateTime<FixedOffset>> {
        self.modified
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }
}
