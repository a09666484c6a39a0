//! 线上服务端冒烟测试：只对 env 文件里填写了 URL 的服务端运行，其余直接跳过。

use crate::path::join;
use crate::tests::{init_tracing, load_account_optional, TestServer};
use crate::RequestContext;

#[tokio::test]
async fn round_trip_on_configured_servers() {
    init_tracing();
    let ctx = RequestContext::background();

    for server in TestServer::all() {
        let Some(account) = load_account_optional(*server) else {
            println!("跳过 {}：未配置 WEBDAV_URL", server.as_str());
            continue;
        };
        let client = account.to_client();
        let dir = &account.test_dir;

        client.connect(&ctx).await.unwrap();
        client.remove_all(&ctx, dir).await.unwrap();
        client.mkdir_all(&ctx, &join(dir, "nested/deeper"), 0o755).await.unwrap();

        let file = join(dir, "nested/hello.txt");
        client.write(&ctx, &file, "hello gowebdav\n", 0o644).await.unwrap();
        assert_eq!(&client.read(&ctx, &file).await.unwrap()[..], b"hello gowebdav\n");

        let info = client.stat(&ctx, &file).await.unwrap();
        assert_eq!(info.size(), 15);
        assert!(!info.is_dir());

        let copied = join(dir, "copied.txt");
        client.copy(&ctx, &file, &copied, true).await.unwrap();
        let moved = join(dir, "moved.txt");
        client.rename(&ctx, &copied, &moved, true).await.unwrap();

        let names: Vec<String> = client
            .read_dir(&ctx, dir)
            .await
            .unwrap()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert!(names.contains(&"nested".to_string()));
        assert!(names.contains(&"moved.txt".to_string()));
        assert!(!names.contains(&"copied.txt".to_string()));

        client.remove_all(&ctx, dir).await.unwrap();
        assert!(client.stat(&ctx, dir).await.unwrap_err().is_not_found());
        println!("{} 通过 ✅", server.as_str());
    }
}
