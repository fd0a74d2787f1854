#![allow(dead_code)]

use std::sync::Arc;

use github_webhook_receiver::config::Config;
use github_webhook_receiver::inbound::webhook::EventDispatcher;
use github_webhook_receiver::infrastructure::file_sink::FileSink;
use github_webhook_receiver::infrastructure::handlers::default_dispatcher;
use github_webhook_receiver::server::Server;
use tempfile::TempDir;

pub const SECRET: &str = "It's a Secret to Everybody";

pub struct TestApp {
    pub addr: String,
    pub log_dir: TempDir,
}

pub fn test_config(secret: &str, capacity: usize) -> Config {
    let mut config = Config::load().unwrap();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.webhook.secret = secret.to_string();
    config.webhook.recent_capacity = capacity;
    config
}

pub async fn spawn_server() -> String {
    spawn_app(SECRET, 10).await.addr
}

pub async fn spawn_app(secret: &str, capacity: usize) -> TestApp {
    spawn_app_with(secret, capacity, default_dispatcher()).await
}

pub async fn spawn_app_with(secret: &str, capacity: usize, dispatcher: EventDispatcher) -> TestApp {
    spawn_configured(test_config(secret, capacity), dispatcher).await
}

pub async fn spawn_app_with_body_limit(secret: &str, max_body_bytes: usize) -> TestApp {
    let mut config = test_config(secret, 10);
    config.webhook.max_body_bytes = max_body_bytes;
    spawn_configured(config, default_dispatcher()).await
}

async fn spawn_configured(mut config: Config, dispatcher: EventDispatcher) -> TestApp {
    let log_dir = tempfile::tempdir().unwrap();
    config.webhook.log_dir = log_dir.path().join("webhook_logs");

    let sink = Arc::new(FileSink::new(config.webhook.log_dir.clone()));
    let server = Server::with_components(&config, dispatcher, sink)
        .await
        .unwrap();

    let port = server.port();
    tokio::spawn(server.run());

    TestApp {
        addr: format!("http://{}:{}", config.server.host, port),
        log_dir,
    }
}
