use super::WebDavClient;
use crate::client::RequestContext;
use crate::error::WebDavError;
use crate::internal::path::path_resolver::normalize;
use crate::internal::webdav::enums::Depth;
use crate::remote_file::ResourceInfo;

impl WebDavClient {
    /// 读取单个资源的元数据（`Depth: 0`）。
    ///
    /// 资源不存在（404 或 multistatus 中没有条目）时返回的错误满足 [`WebDavError::is_not_found`]。
    pub async fn stat(
        &self,
        ctx: &RequestContext,
        path: &str,
    ) -> Result<ResourceInfo, WebDavError> {
        let path = normalize(path);
        let items = self.propfind(ctx, "Stat", &path, Depth::Zero).await?;

        let mut fallback = None;
        for item in items {
            if item.path() == path {
                return Ok(item);
            }
            fallback.get_or_insert(item);
        }

        fallback.ok_or(WebDavError::NotFound {
            operation: "Stat",
            path,
        })
    }
}
