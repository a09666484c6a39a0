use super::WebDavClient;
use crate::client::RequestContext;
use crate::error::WebDavError;
use crate::internal::webdav::enums::Depth;

impl WebDavClient {
    /// 对根目录发一次 `Depth: 0` 的 PROPFIND，验证地址可达、账号可用。
    ///
    /// 失败时不改变客户端状态（认证缓存只在协商成功时写入）。
    pub async fn connect(&self, ctx: &RequestContext) -> Result<(), WebDavError> {
        self.propfind(ctx, "Connect", "/", Depth::Zero).await?;
        Ok(())
    }
}
