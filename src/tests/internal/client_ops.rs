//! 客户端操作测试，跑在内置的内存 WebDAV 服务端上
//!
//! 测试项：
//! - Connect：账号正确 / 错误
//! - ReadDir 并发、Stat、Read、ReadStream、ReadStreamRange
//! - Mkdir / MkdirAll 的幂等与父目录缺失
//! - Copy / Rename 的覆盖语义
//! - Remove / RemoveAll 的幂等删除
//! - Write / WriteStream，包括父目录缺失

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::io::AsyncReadExt;

use super::mock_server::MockWebDavServer;
use crate::auth::enums::AuthState;
use crate::error::ErrorKind;
use crate::{is_not_found, RequestContext, WebDavClient};

fn ctx() -> RequestContext {
    RequestContext::background()
}

// ═══════════════════════════ Connect ═══════════════════════════

#[tokio::test]
async fn connect_with_valid_and_invalid_credentials() {
    let server = MockWebDavServer::start().await;

    let client = server.client();
    client.connect(&ctx()).await.unwrap();
    assert_eq!(client.auth_state(), AuthState::BasicNegotiated);

    let wrong = WebDavClient::new(&server.url(), "no", "no").unwrap();
    let err = wrong.connect(&ctx()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    // 被拒绝的账号不应留下已协商的方案
    assert_eq!(wrong.auth_state(), AuthState::Unauthenticated);

    let anonymous = WebDavClient::new(&server.url(), "", "").unwrap();
    let err = anonymous.connect(&ctx()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(anonymous.auth_state(), AuthState::Unauthenticated);
}

// ═══════════════════════════ 读取 ═══════════════════════════

#[tokio::test]
async fn read_dir_concurrent() {
    let server = MockWebDavServer::start().await;
    let client = Arc::new(server.client());

    let mut handles = Vec::new();
    for _ in 0..2 {
        let c = Arc::clone(&client);
        handles.push(tokio::spawn(async move { c.read_dir(&ctx(), "/").await }));
    }

    for h in handles {
        let entries = h.await.unwrap().unwrap();
        assert_eq!(entries.len(), 2, "entries: {entries:?}");

        let file = entries.iter().find(|e| e.name() == "hello.txt").unwrap();
        assert!(!file.is_dir());
        assert_eq!(file.size(), 15);
        assert_eq!(file.path(), "/hello.txt");

        let dir = entries.iter().find(|e| e.name() == "test").unwrap();
        assert!(dir.is_dir());
        assert_eq!(dir.path(), "/test");
    }
}

#[tokio::test]
async fn read_dir_of_subdirectory_excludes_itself() {
    let server = MockWebDavServer::start().await;
    let entries = server.client().read_dir(&ctx(), "test/").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path(), "/test/test.txt");
}

#[tokio::test]
async fn read_whole_file() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    let data = client.read(&ctx(), "/hello.txt").await.unwrap();
    assert_eq!(&data[..], b"hello gowebdav\n");

    let err = client.read(&ctx(), "/404.txt").await.unwrap_err();
    assert!(is_not_found(&err));
    assert_eq!(err.path(), Some("/404.txt"));
}

#[tokio::test]
async fn read_stream_as_async_read() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    let stream = client.read_stream(&ctx(), "/hello.txt").await.unwrap();
    let mut out = String::new();
    stream.into_async_read().read_to_string(&mut out).await.unwrap();
    assert_eq!(out, "hello gowebdav\n");

    assert!(client.read_stream(&ctx(), "/404/hello.txt").await.is_err());
}

#[tokio::test]
async fn read_stream_range() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    let data = client
        .read_stream_range(&ctx(), "/hello.txt", 4, 4)
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(&data[..], b"o go");

    let data = client
        .read_stream_range(&ctx(), "/hello.txt", 6, 0)
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(&data[..], b"gowebdav\n");
}

#[tokio::test]
async fn read_stream_closed_early_releases_connection() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    let mut stream = client.read_stream(&ctx(), "/hello.txt").await.unwrap();
    assert!(stream.next().await.is_some());
    stream.close();

    // 连接已归还，后续请求照常进行
    let data = client.read(&ctx(), "/test/test.txt").await.unwrap();
    assert_eq!(&data[..], b"test test gowebdav\n");
}

#[tokio::test]
async fn stat_file_dir_and_missing() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    let info = client.stat(&ctx(), "/hello.txt").await.unwrap();
    assert_eq!(info.name(), "hello.txt");
    assert_eq!(info.path(), "/hello.txt");
    assert_eq!(info.size(), 15);
    assert!(!info.is_dir());

    let info = client.stat(&ctx(), "/test").await.unwrap();
    assert!(info.is_dir());
    assert_eq!(info.name(), "test");

    let err = client.stat(&ctx(), "/404.txt").await.unwrap_err();
    assert!(is_not_found(&err));
}

#[tokio::test]
async fn stat_many_keeps_input_order() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    let results = client
        .stat_many(&ctx(), &["/test/test.txt", "/404.txt", "/hello.txt"])
        .await;
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().name(), "test.txt");
    assert!(results[1].as_ref().unwrap_err().is_not_found());
    assert_eq!(results[2].as_ref().unwrap().name(), "hello.txt");
}

// ═══════════════════════════ 目录 ═══════════════════════════

#[tokio::test]
async fn mkdir_is_idempotent_and_needs_parent() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    assert!(client.stat(&ctx(), "/newdir").await.unwrap_err().is_not_found());

    client.mkdir(&ctx(), "/newdir", 0o755).await.unwrap();
    client.mkdir(&ctx(), "/newdir", 0o755).await.unwrap();
    assert_eq!(server.fs_stat("/newdir").await.map(|(dir, _)| dir), Some(true));

    let err = client.mkdir(&ctx(), "/404/newdir", 0o755).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(server.fs_stat("/404").await.is_none());
}

#[tokio::test]
async fn mkdir_all_creates_every_level() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    client.mkdir_all(&ctx(), "/dir/dir/dir", 0o755).await.unwrap();
    assert_eq!(server.fs_stat("/dir/dir/dir").await.map(|(dir, _)| dir), Some(true));

    // 部分层级已存在
    client.mkdir_all(&ctx(), "/dir/dir/other", 0o755).await.unwrap();
    let info = client.stat(&ctx(), "/dir/dir/other").await.unwrap();
    assert!(info.is_dir());
}

// ═══════════════════════════ 复制与移动 ═══════════════════════════

#[tokio::test]
async fn copy_respects_overwrite() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    assert!(server.fs_stat("/copy.txt").await.is_none());

    client.copy(&ctx(), "/hello.txt", "/copy.txt", false).await.unwrap();
    assert_eq!(server.fs_stat("/copy.txt").await, Some((false, 15)));
    assert_eq!(server.fs_stat("/hello.txt").await, Some((false, 15)));

    let err = client
        .copy(&ctx(), "/hello.txt", "/copy.txt", false)
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    client.copy(&ctx(), "/test/test.txt", "/copy.txt", true).await.unwrap();
    assert_eq!(
        server.fs_read("/copy.txt").await.as_deref(),
        Some(&b"test test gowebdav\n"[..])
    );
}

#[tokio::test]
async fn copy_into_missing_parent() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    client
        .copy(&ctx(), "/hello.txt", "/a/b/copy.txt", false)
        .await
        .unwrap();
    assert_eq!(server.fs_stat("/a/b/copy.txt").await, Some((false, 15)));
}

#[tokio::test]
async fn rename_moves_and_replaces() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    client.rename(&ctx(), "/hello.txt", "/copy.txt", false).await.unwrap();
    assert_eq!(server.fs_stat("/copy.txt").await, Some((false, 15)));
    assert!(server.fs_stat("/hello.txt").await.is_none());

    client
        .rename(&ctx(), "/test/test.txt", "/copy.txt", true)
        .await
        .unwrap();
    assert_eq!(server.fs_stat("/copy.txt").await, Some((false, 19)));
    assert!(client.stat(&ctx(), "/test/test.txt").await.unwrap_err().is_not_found());
}

// ═══════════════════════════ 删除 ═══════════════════════════

#[tokio::test]
async fn remove_is_idempotent() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    client.remove(&ctx(), "/hello.txt").await.unwrap();
    assert!(server.fs_stat("/hello.txt").await.is_none());

    client.remove(&ctx(), "/hello.txt").await.unwrap();
    client.remove(&ctx(), "/404.txt").await.unwrap();
}

#[tokio::test]
async fn remove_all_never_fails_on_nothing() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    client.remove_all(&ctx(), "/test/test.txt").await.unwrap();
    assert!(server.fs_stat("/test/test.txt").await.is_none());

    client.remove_all(&ctx(), "/404.txt").await.unwrap();
    client.remove_all(&ctx(), "/404/404/404.txt").await.unwrap();

    client.remove_all(&ctx(), "/test").await.unwrap();
    assert!(server.fs_stat("/test").await.is_none());
}

#[tokio::test]
async fn remove_root_is_rejected() {
    let server = MockWebDavServer::start().await;
    let err = server.client().remove_all(&ctx(), "/").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(server.fs_stat("/hello.txt").await.is_some());
}

// ═══════════════════════════ 写入 ═══════════════════════════

#[tokio::test]
async fn write_creates_file_and_missing_parents() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    client
        .write(&ctx(), "/newfile.txt", &b"foo bar\n"[..], 0o660)
        .await
        .unwrap();
    assert_eq!(server.fs_stat("/newfile.txt").await, Some((false, 8)));

    client
        .write(&ctx(), "/404/newfile.txt", "foo bar\n", 0o660)
        .await
        .unwrap();
    assert_eq!(
        server.fs_read("/404/newfile.txt").await.as_deref(),
        Some(&b"foo bar\n"[..])
    );
}

#[tokio::test]
async fn write_stream_from_async_read() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    client
        .write_stream(&ctx(), "/newfile.txt", &b"foo bar\n"[..], 0o660)
        .await
        .unwrap();
    assert_eq!(server.fs_stat("/newfile.txt").await, Some((false, 8)));
    assert_eq!(client.auth_state(), AuthState::BasicNegotiated);

    client
        .write_stream(&ctx(), "/404/works.txt", &b"foo bar\n"[..], 0o660)
        .await
        .unwrap();
    assert_eq!(server.fs_stat("/404/works.txt").await, Some((false, 8)));
}

#[tokio::test]
async fn write_then_read_round_trip_with_unicode_path() {
    let server = MockWebDavServer::start().await;
    let client = server.client();

    client
        .write(&ctx(), "/新建 文件夹/报告#1.txt", "内容", 0o644)
        .await
        .unwrap();

    let entries = client.read_dir(&ctx(), "/新建 文件夹").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name(), "报告#1.txt");
    assert_eq!(entries[0].path(), "/新建 文件夹/报告#1.txt");

    let data = client.read(&ctx(), entries[0].path()).await.unwrap();
    assert_eq!(std::str::from_utf8(&data).unwrap(), "内容");
}
