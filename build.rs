//! 构建时根据 src/tests/servers.toml 生成真实服务端测试用的枚举，供 tests 模块 include! 使用。
//!
//! 内置的内存服务端不需要任何配置；这里列出的是可选的线上服务端，
//! 每个 id 对应 `src/tests/env/{id}.env`，缺失时从 `.env.example` 复制一份模板。

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let servers_path = Path::new(&manifest_dir).join("src/tests/servers.toml");
    println!("cargo:rerun-if-changed=src/tests/servers.toml");
    println!("cargo:rerun-if-changed=src/tests/env");

    let server_ids: Vec<String> = fs::read_to_string(&servers_path)
        .map(|content| parse_server_ids(&content))
        .unwrap_or_default()
        .into_iter()
        .filter(|id| is_valid_id(id))
        .collect();

    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };
    let out_path = Path::new(&out_dir).join("test_servers.rs");

    if let Err(e) = fs::write(&out_path, render(&server_ids)) {
        println!("cargo:warning=写入 test_servers.rs 失败: {e}");
    }

    ensure_env_files(&manifest_dir, &server_ids);
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut c = part.chars();
            match c.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(c.flat_map(|c| c.to_lowercase())).collect(),
            }
        })
        .collect()
}

/// 解析 `servers = ["a", "b"]`（可跨行），`#` 开头的行视为注释
fn parse_server_ids(content: &str) -> Vec<String> {
    let body: String = content
        .lines()
        .filter(|l| !l.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");

    let Some(start) = body.find("servers") else {
        return Vec::new();
    };
    let rest = &body[start..];
    let (Some(open), Some(close)) = (rest.find('['), rest.find(']')) else {
        return Vec::new();
    };
    if close < open {
        return Vec::new();
    }

    rest[open + 1..close]
        .split(',')
        .map(|s| s.trim().trim_matches('"').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn render(server_ids: &[String]) -> String {
    let mut variants = String::new();
    let mut as_str_arms = String::new();
    let mut all = String::new();

    for id in server_ids {
        let variant = to_pascal_case(id);
        variants.push_str(&format!("    {variant},\n"));
        as_str_arms.push_str(&format!("            TestServer::{variant} => \"{id}\",\n"));
        all.push_str(&format!("            TestServer::{variant},\n"));
    }

    // 没有配置任何服务端时生成一个占位变体，避免空枚举
    if variants.is_empty() {
        variants.push_str("    __None,\n");
        as_str_arms.push_str("            TestServer::__None => \"\",\n");
    }

    format!(
        r#"// 自动生成，请勿手改。服务端列表来自 src/tests/servers.toml

/// 可选的线上 WebDAV 服务端，用于在测试中选择读取哪个 env 文件。
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestServer {{
{variants}}}

#[allow(dead_code)]
impl TestServer {{
    /// 服务端 id（与 env 文件名 {{id}}.env 对应）
    pub fn as_str(&self) -> &'static str {{
        match self {{
{as_str_arms}        }}
    }}

    /// 全部已配置的服务端，便于轮询测试
    pub fn all() -> &'static [TestServer] {{
        &[
{all}        ]
    }}
}}

/// env 文件中需要的变量名
#[allow(dead_code)]
pub mod env_var_names {{
    /// WebDAV 根 URL
    pub const WEBDAV_URL: &str = "WEBDAV_URL";
    pub const WEBDAV_USERNAME: &str = "WEBDAV_USERNAME";
    pub const WEBDAV_PASSWORD: &str = "WEBDAV_PASSWORD";
    /// 测试时允许读写的目录，默认为 /webdav_client_test
    pub const WEBDAV_TEST_DIR: &str = "WEBDAV_TEST_DIR";
}}
"#
    )
}

/// 为每个服务端补齐 env 文件，用户只需填写 URL/账号/密码
fn ensure_env_files(manifest_dir: &str, server_ids: &[String]) {
    let env_dir = Path::new(manifest_dir).join("src/tests/env");
    let Ok(template) = fs::read_to_string(env_dir.join(".env.example")) else {
        return;
    };

    for id in server_ids {
        let env_file = env_dir.join(format!("{id}.env"));
        if !env_file.exists() {
            if let Err(e) = fs::write(&env_file, &template) {
                println!("cargo:warning=生成 {} 失败: {e}", env_file.display());
            }
        }
    }
}
