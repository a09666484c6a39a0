//! `WWW-Authenticate` 解析。
//!
//! 一个头里可能并列多个挑战（`Basic realm="x", Digest realm="y", nonce="z"`），
//! 服务端也可能发送多个 `WWW-Authenticate` 头，这里统一拆成 [`Challenge`] 列表。

use std::collections::HashMap;

use reqwest::header::{HeaderMap, WWW_AUTHENTICATE};

/// 单个认证挑战：方案名（小写）与参数（键小写）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub scheme: String,
    pub params: HashMap<String, String>,
}

impl Challenge {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// 从响应头里收集全部挑战
pub fn challenges_from_headers(headers: &HeaderMap) -> Vec<Challenge> {
    headers
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(parse_challenges)
        .collect()
}

/// 解析单个 `WWW-Authenticate` 头的值
pub fn parse_challenges(header: &str) -> Vec<Challenge> {
    let mut parser = Parser { input: header.as_bytes(), pos: 0 };
    let mut challenges: Vec<Challenge> = Vec::new();

    loop {
        parser.skip_separators();
        let token = parser.token();
        if token.is_empty() {
            // 非法字符，跳过一个字节避免死循环
            if parser.pos >= parser.input.len() {
                break;
            }
            parser.pos += 1;
            continue;
        }

        parser.skip_spaces();
        if parser.peek() == Some(b'=') {
            parser.pos += 1;
            parser.skip_spaces();
            let value = parser.value();
            if let Some(current) = challenges.last_mut() {
                current.params.insert(token.to_ascii_lowercase(), value);
            }
        } else {
            challenges.push(Challenge {
                scheme: token.to_ascii_lowercase(),
                params: HashMap::new(),
            });
        }
    }

    challenges
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b',')) {
            self.pos += 1;
        }
    }

    fn token(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == b'=' || c == b',' || c == b' ' || c == b'\t' || c == b'"' {
                break;
            }
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    fn value(&mut self) -> String {
        if self.peek() != Some(b'"') {
            // token68 结尾可能带 '='
            let start = self.pos;
            while let Some(c) = self.peek() {
                if c == b',' || c == b' ' || c == b'\t' {
                    break;
                }
                self.pos += 1;
            }
            return String::from_utf8_lossy(&self.input[start..self.pos])
                .into_owned();
        }

        self.pos += 1;
        let mut out = Vec::new();
        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                b'\\' => {
                    if let Some(escaped) = self.peek() {
                        out.push(escaped);
                        self.pos += 1;
                    }
                }
                b'"' => break,
                other => out.push(other),
            }
        }
        String::from_utf8_lossy(&out).into_owned()
    }
}
