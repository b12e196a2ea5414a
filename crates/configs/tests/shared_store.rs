use common::utils::logging::init_logging_test;
use configs::{LoadError, SharedStore, Store};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct ServerConfig {
    port: u16,
    #[serde(default)]
    worker_threads: Option<usize>,
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_readers_after_load() -> Result<(), anyhow::Error> {
    init_logging_test();
    let store: Store = r#"{"server": {"port": 8088, "worker_threads": 8}}"#.parse()?;
    let shared = SharedStore::from(store);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move { shared.get::<ServerConfig>("server").await }));
    }
    for handle in handles {
        let server = handle.await??;
        assert_eq!(server.port, 8088);
        assert_eq!(server.worker_threads, Some(8));
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn loads_interleave_with_reads() -> Result<(), anyhow::Error> {
    let shared = SharedStore::new();

    let mut handles = Vec::new();
    for i in 0..8u16 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            shared.load_from_str(&format!(r#"{{"section{i}": {{"port": {i}}}}}"#)).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    assert_eq!(shared.len().await, 8);
    for i in 0..8u16 {
        let server: ServerConfig = shared.get(&format!("section{i}")).await?;
        assert_eq!(server.port, i);
    }
    Ok(())
}

#[tokio::test]
async fn loads_from_file() -> Result<(), anyhow::Error> {
    let tmp = std::env::temp_dir().join(format!("configs_shared_{}.json", uuid::Uuid::new_v4()));
    tokio::fs::write(&tmp, r#"{"server": {"port": 7000}}"#).await?;

    let shared = SharedStore::new();
    let result = shared.load_from_file(&tmp).await;
    let _ = tokio::fs::remove_file(&tmp).await;
    result?;

    let mut server = ServerConfig { port: 1, worker_threads: Some(2) };
    shared.get_into("server", Some(&mut server)).await?;
    assert_eq!(server.port, 7000);
    assert_eq!(server.worker_threads, None);

    let missing = shared.load_from_file(&tmp).await.unwrap_err();
    assert!(matches!(missing, LoadError::Open { .. }));
    Ok(())
}
