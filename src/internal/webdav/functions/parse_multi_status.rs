use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;
use tracing::warn;

use crate::webdav::structs::{MultiStatus, Response};

/// 解析 multistatus 响应体。
///
/// 文档不是合法 XML（标签不闭合、没有根节点等）时返回错误；
/// 每个 `<response>` 单独反序列化，某一条形态不对只跳过它并记一条警告，不影响其余条目。
pub fn parse_multi_status(body: &[u8]) -> Result<MultiStatus, String> {
    let xml_text = String::from_utf8_lossy(body);

    if xml_text.trim().is_empty() {
        return Err("multistatus 响应体为空".to_string());
    }

    let mut reader = Reader::from_str(&xml_text);
    let mut responses = Vec::new();
    let mut seen_root = false;
    let mut in_root = false;

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|e| format!("XML 格式错误: {e}"))?;

        match event {
            Event::Start(_) | Event::Empty(_) if !in_root && seen_root => {
                return Err("XML 存在多个根节点".to_string());
            }
            Event::Start(_) if !in_root => {
                seen_root = true;
                in_root = true;
            }
            Event::Empty(_) if !in_root => seen_root = true,
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                let is_response = e.local_name().as_ref() == b"response";
                reader
                    .read_to_end(QName(&name))
                    .map_err(|e| format!("XML 格式错误: {e}"))?;

                if is_response {
                    let end = reader.buffer_position() as usize;
                    match from_str::<Response>(&xml_text[start..end]) {
                        Ok(response) => responses.push(response),
                        Err(e) => warn!(error = %e, "跳过无法解析的 response"),
                    }
                }
            }
            Event::End(_) => in_root = false,
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err("缺少 multistatus 根节点".to_string());
    }
    if in_root {
        return Err("multistatus 根节点没有闭合".to_string());
    }

    Ok(MultiStatus { responses })
}
