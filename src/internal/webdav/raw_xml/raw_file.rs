use serde::Deserialize;

/// 对应 WebDAV 响应 XML 顶层的 `<D:multistatus>` 节点
///
/// 所有字段都是可选的：单个 `<D:response>` 缺字段时只跳过它本身，不会让整份文档解析失败。
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct MultiStatus {
    /// `<D:response>` 节点列表，每个 response 表示一个资源（文件或目录）
    #[serde(rename = "response", default)]
    pub responses: Vec<Response>,
}

/// 对应单个 `<D:response>` 节点
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Response {
    /// `<D:href>`：资源路径（URL 编码，需要解码才能显示原始文件名）；
    /// 207 的失败成员可能在一个 response 里列出多个 href
    #[serde(rename = "href", default)]
    pub hrefs: Vec<String>,
    /// `<D:propstat>`：资源属性集和对应状态码的列表
    #[serde(rename = "propstat", default)]
    pub propstats: Vec<PropStat>,
    /// `<D:status>`：DELETE/COPY/MOVE 的 207 响应里，成员级别的状态
    #[serde(default)]
    pub status: Option<String>,
}

/// 对应 `<D:propstat>` 节点：一个属性集 + 对应的 HTTP 状态
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PropStat {
    /// `<D:prop>`：资源的具体属性
    #[serde(default)]
    pub prop: Option<Prop>,
    /// `<D:status>`：该属性集对应的 HTTP 状态，如 "HTTP/1.1 200 OK"
    #[serde(default)]
    pub status: Option<String>,
}

/// 对应 `<D:prop>` 节点，列出资源的常用属性；数值与时间保留原始字符串，转换失败不影响整体解析
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Prop {
    /// `<resourcetype>`：资源类型（文件/目录）
    #[serde(rename = "resourcetype", default)]
    pub resource_type: Option<ResourceType>,

    /// `<getcontentlength>`：文件大小（字节），目录一般没有此字段
    #[serde(rename = "getcontentlength", default)]
    pub content_length: Option<String>,

    /// `<getlastmodified>`：最后修改时间（HTTP-date 格式）
    #[serde(rename = "getlastmodified", default)]
    pub last_modified: Option<String>,

    /// `<getcontenttype>`：MIME 类型（如 "text/plain" 或 "application/pdf"）
    #[serde(rename = "getcontenttype", default)]
    pub content_type: Option<String>,

    /// `<getetag>`：实体标签（文件内容的标识符，可用于缓存或变更检测）
    #[serde(rename = "getetag", default)]
    pub etag: Option<String>,

    /// `<displayname>`：显示名（用户友好的文件/目录名）
    #[serde(rename = "displayname", default)]
    pub display_name: Option<String>,
}

/// `<resourcetype>` 节点
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ResourceType {
    /// `<collection/>` 存在表示是目录，否则是文件
    #[serde(rename = "collection", default)]
    pub is_collection: Option<EmptyElement>,
}

/// 空元素的占位结构，例如 `<collection/>`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EmptyElement {}

/// 从 "HTTP/1.1 200 OK" 中取出状态码
pub fn parse_status_line(status: &str) -> Option<u16> {
    status
        .split_whitespace()
        .find_map(|t| t.parse::<u16>().ok())
}
