use chrono::{DateTime, FixedOffset};
use reqwest::StatusCode;
use tracing::warn;
use url::Url;

use crate::internal::path::path_resolver::{file_name, href_to_path};
use crate::remote_file::ResourceInfo;
use crate::webdav::structs::{parse_status_line, MultiStatus, Prop, PropStat, Response};

pub trait ToResourceInfo {
    /// 转换成资源列表，顺序与服务端返回一致。
    ///
    /// 单个 response 缺少 href 或没有 2xx 的 propstat 时跳过并记录 warn，不影响其余条目。
    fn to_resource_info(self, base_url: &Url) -> Vec<ResourceInfo>;

    /// DELETE/COPY/MOVE 返回 207 时，找出第一个失败的成员（路径 + 状态码）。
    ///
    /// `tolerate_not_found` 为 true 时 404 视为成功（删除本就不存在的成员）。
    fn first_failure(
        &self,
        base_url: &Url,
        tolerate_not_found: bool,
    ) -> Option<(String, StatusCode)>;
}

fn is_success_line(status: Option<&str>) -> bool {
    status
        .and_then(parse_status_line)
        .map(|code| (200..=299).contains(&code))
        .unwrap_or(false)
}

fn take_ok_prop(propstats: Vec<PropStat>) -> Option<Prop> {
    // 从 propstats 中拿到第一个 HTTP 状态是 2xx 的 prop（直接 move 出来）
    propstats
        .into_iter()
        .find(|ps| is_success_line(ps.status.as_deref()))
        .and_then(|ps| ps.prop)
}

fn parse_http_date(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    let raw = raw?.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

fn clean_etag(raw: Option<String>) -> Option<String> {
    // 去掉 ETag 的首尾引号以及多余空格，保留弱校验前缀 W/
    raw.map(|s| {
        let s = s.trim();
        match s.strip_prefix("W/") {
            Some(weak) => format!("W/{}", weak.trim_matches('"')),
            None => s.trim_matches('"').to_string(),
        }
    })
}

impl ToResourceInfo for MultiStatus {
    fn to_resource_info(self, base_url: &Url) -> Vec<ResourceInfo> {
        let mut resources = Vec::with_capacity(self.responses.len());

        for Response { hrefs, propstats, .. } in self.responses {
            let Some(href) = hrefs.into_iter().next() else {
                warn!("multistatus 条目缺少 href，已跳过");
                continue;
            };

            let Some(prop) = take_ok_prop(propstats) else {
                warn!(%href, "multistatus 条目没有 2xx 属性集，已跳过");
                continue;
            };

            let Prop {
                resource_type,
                content_length,
                last_modified,
                content_type,
                etag,
                ..
            } = prop;

            let path = href_to_path(base_url, &href);
            let is_dir = resource_type
                .as_ref()
                .and_then(|rt| rt.is_collection.as_ref())
                .is_some();

            let size = if is_dir {
                0
            } else {
                content_length
                    .as_deref()
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(0)
            };

            let modified = parse_http_date(last_modified.as_deref());
            if modified.is_none() && last_modified.is_some() {
                warn!(%path, raw = ?last_modified, "getlastmodified 无法解析");
            }

            resources.push(ResourceInfo {
                name: file_name(&path).to_string(),
                path,
                size,
                modified,
                is_dir,
                content_type: content_type.filter(|s| !s.is_empty()),
                etag: clean_etag(etag),
            });
        }

        resources
    }

    fn first_failure(
        &self,
        base_url: &Url,
        tolerate_not_found: bool,
    ) -> Option<(String, StatusCode)> {
        self.responses.iter().find_map(|response| {
            let code = response
                .status
                .as_deref()
                .and_then(parse_status_line)
                .and_then(|c| StatusCode::from_u16(c).ok())?;

            if code.is_success() || (tolerate_not_found && code == StatusCode::NOT_FOUND) {
                return None;
            }

            let path = response
                .hrefs
                .first()
                .map(|href| href_to_path(base_url, href))
                .unwrap_or_default();
            Some((path, code))
        })
    }
}
