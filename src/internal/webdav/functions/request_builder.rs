//! 各个 WebDAV 动词的请求构造。
//!
//! 这里只负责方法、URL、请求头与请求体的精确形态；认证头由客户端在发送前附加。

use bytes::Bytes;
use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, RANGE};
use reqwest::Method;
use url::Url;

use crate::error::WebDavError;
use crate::internal::transport::structs::{RequestBody, WebDavRequest};
use crate::internal::webdav::enums::{Depth, Overwrite, WebDavMethod};

/// 内部使用的PROPFIND请求体
///
/// rfc4918 9.1: allprop 返回规范中定义的全部属性
pub const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:propfind xmlns:D="DAV:">
  <D:allprop/>
</D:propfind>"#;

pub const HEADER_DEPTH: HeaderName = HeaderName::from_static("depth");
pub const HEADER_DESTINATION: HeaderName = HeaderName::from_static("destination");
pub const HEADER_OVERWRITE: HeaderName = HeaderName::from_static("overwrite");

/// PROPFIND：目录列表用 `Depth: 1`，单个资源用 `Depth: 0`
pub fn propfind(url: Url, depth: Depth) -> Result<WebDavRequest, WebDavError> {
    let method = WebDavMethod::PROPFIND.to_head_method()?;

    Ok(WebDavRequest::new(method, url)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/xml"))
        .header(ACCEPT, HeaderValue::from_static("application/xml"))
        .header(HEADER_DEPTH, HeaderValue::from_static(depth.as_str()))
        .body(RequestBody::Bytes(Bytes::from_static(PROPFIND_BODY.as_bytes()))))
}

/// MKCOL：无请求体，成功为 201
pub fn mkcol(url: Url) -> Result<WebDavRequest, WebDavError> {
    let method = WebDavMethod::MKCOL.to_head_method()?;
    Ok(WebDavRequest::new(method, url))
}

/// COPY / MOVE：`Destination` 为目标的绝对 URL，`Overwrite` 为 `T`/`F`
pub fn copy_move(
    method: WebDavMethod,
    source: Url,
    destination: &Url,
    overwrite: Overwrite,
) -> Result<WebDavRequest, WebDavError> {
    let destination = HeaderValue::from_str(destination.as_str())
        .map_err(|e| WebDavError::InvalidHeader(e.to_string()))?;

    Ok(WebDavRequest::new(method.to_head_method()?, source)
        .header(HEADER_DESTINATION, destination)
        .header(HEADER_OVERWRITE, HeaderValue::from_static(overwrite.as_str())))
}

/// `Range` 头的值：length 为 0 时是从 offset 读到末尾的开区间；区间末端超出 u64 时返回错误
pub fn range_header(offset: u64, length: u64) -> Result<String, WebDavError> {
    if length == 0 {
        return Ok(format!("bytes={offset}-"));
    }

    let last = offset.checked_add(length - 1).ok_or_else(|| {
        WebDavError::InvalidHeader(format!("字节区间越界: offset={offset}, length={length}"))
    })?;
    Ok(format!("bytes={offset}-{last}"))
}

/// GET，可选字节区间 `(offset, length)`
pub fn get(url: Url, range: Option<(u64, u64)>) -> Result<WebDavRequest, WebDavError> {
    let mut request = WebDavRequest::new(Method::GET, url);

    if let Some((offset, length)) = range {
        let value = HeaderValue::from_str(&range_header(offset, length)?)
            .map_err(|e| WebDavError::InvalidHeader(e.to_string()))?;
        request = request.header(RANGE, value);
    }

    Ok(request)
}

/// PUT，请求体原样发送
pub fn put(url: Url, body: RequestBody) -> WebDavRequest {
    WebDavRequest::new(Method::PUT, url).body(body)
}

/// DELETE；`Depth: infinity` 让服务端递归删除集合
pub fn delete(url: Url, depth: Option<Depth>) -> WebDavRequest {
    let request = WebDavRequest::new(Method::DELETE, url);
    match depth {
        Some(depth) => {
            request.header(HEADER_DEPTH, HeaderValue::from_static(depth.as_str()))
        }
        None => request,
    }
}

/// OPTIONS，用于在流式上传前触发认证挑战
pub fn options(url: Url) -> WebDavRequest {
    WebDavRequest::new(Method::OPTIONS, url)
}
