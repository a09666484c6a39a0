use futures_util::future::join_all;

use super::WebDavClient;
use crate::client::RequestContext;
use crate::error::WebDavError;
use crate::internal::path::path_resolver::normalize;
use crate::internal::webdav::enums::Depth;
use crate::remote_file::ResourceInfo;

impl WebDavClient {
    /// 列出目录的直接子项（`Depth: 1`），不包含目录自身，顺序与服务端返回一致。
    pub async fn read_dir(
        &self,
        ctx: &RequestContext,
        path: &str,
    ) -> Result<Vec<ResourceInfo>, WebDavError> {
        let path = normalize(path);
        let items = self.propfind(ctx, "ReadDir", &path, Depth::One).await?;

        Ok(items.into_iter().filter(|item| item.path() != path).collect())
    }

    /// 并发读取多个路径的元数据，结果与输入一一对应
    ///
    /// 不会做递归处理，所以需要递归请自行处理
    pub async fn stat_many(
        &self,
        ctx: &RequestContext,
        paths: &[&str],
    ) -> Vec<Result<ResourceInfo, WebDavError>> {
        let tasks = paths.iter().map(|path| self.stat(ctx, path));

        // 并发获取全部结果
        join_all(tasks).await
    }
}
