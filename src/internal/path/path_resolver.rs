//! 远程路径规范化与 URL 拼接。
//!
//! 对外的路径一律是以 `/` 开头、`/` 分隔、已解码的可读形式（例如 `/新建文件夹/a b.txt`）；
//! 只有在拼成请求 URL 时才逐段做百分号编码。

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::error::WebDavError;

/// 路径段编码集合：除 RFC 3986 unreserved 外全部编码
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// 规范化远程路径。
///
/// - 合并重复的 `/`
/// - 去掉 `.`，`..` 向上退一级，但永远不会越过根目录
/// - 结果以 `/` 开头，不带尾部斜杠（根目录本身为 `/`）
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}

/// 拼接两个路径并规范化。`rel` 开头的 `/` 不会让结果跳回根目录，它始终相对于 `base`。
pub fn join(base: &str, rel: &str) -> String {
    normalize(&format!("{base}/{rel}"))
}

/// 父目录，根目录的父目录仍是根目录
pub fn parent(path: &str) -> String {
    let path = normalize(path);
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

/// 最后一段路径名，根目录返回空字符串
pub fn file_name(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}

/// 从根到叶依次列出全部祖先（含自身，不含根）。
///
/// `/a/b/c` => `["/a", "/a/b", "/a/b/c"]`
pub fn ancestors(path: &str) -> Vec<String> {
    let path = normalize(path);
    let mut current = String::new();
    let mut result = Vec::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current.push('/');
        current.push_str(segment);
        result.push(current.clone());
    }
    result
}

/// 逐段百分号编码，保留 `/`，不带开头的 `/`
pub fn encode(path: &str) -> String {
    normalize(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| utf8_percent_encode(s, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// 校验并格式化服务端根 URL，保证路径以 `/` 结尾。
pub fn format_base_url(url: &str) -> Result<Url, WebDavError> {
    if url.is_empty() {
        return Err(WebDavError::InvalidUrl("路径为空".to_string()));
    }

    let mut base_url =
        Url::parse(url).map_err(|e| WebDavError::InvalidUrl(e.to_string()))?;

    if base_url.cannot_be_a_base() {
        return Err(WebDavError::InvalidUrl(format!("{url} 不能作为根路径")));
    }

    if !base_url.path().ends_with('/') {
        let new_path = format!("{}/", base_url.path());
        base_url.set_path(&new_path);
    }

    base_url.set_query(None);
    base_url.set_fragment(None);

    Ok(base_url)
}

/// 把远程路径解析成请求 URL。
///
/// `collection` 为 true 时追加尾部 `/`，PROPFIND 目录与 MKCOL 需要它。
pub fn resolve_url(base_url: &Url, path: &str, collection: bool) -> Url {
    let encoded = encode(path);
    let mut url = base_url.clone();

    let mut full_path = format!("{}{}", base_url.path(), encoded);
    if collection && !encoded.is_empty() {
        full_path.push('/');
    }
    url.set_path(&full_path);
    url
}

/// 把 multistatus 中的 href 转成相对根 URL 的可读路径。
///
/// href 可能是完整 URL，也可能是绝对路径；两者都先解码，再去掉根 URL 的路径前缀。
pub fn href_to_path(base_url: &Url, href: &str) -> String {
    let raw_path = match Url::parse(href) {
        Ok(url) => url.path().to_string(),
        Err(_) => href.split(['?', '#']).next().unwrap_or("").to_string(),
    };

    let decoded = percent_decode_str(&raw_path).decode_utf8_lossy();
    let base_path = percent_decode_str(base_url.path()).decode_utf8_lossy();
    let base_trimmed = base_path.trim_end_matches('/');

    let relative = if decoded.starts_with(base_path.as_ref()) {
        &decoded[base_path.len()..]
    } else if decoded == base_trimmed {
        ""
    } else {
        decoded.as_ref()
    };

    normalize(relative)
}
