#![allow(dead_code)]

use reqwest::Client;
use sqlx::PgPool;
use std::net::{SocketAddr, TcpListener};
use wayfarer::app;
use wayfarer::config::environment::Environment;
use wayfarer::modules::Modules;

async fn spawn_app(pool: PgPool) -> SocketAddr {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).unwrap();
    let addr = listener.local_addr().unwrap();

    let modules = Modules::use_custom(
        pool,
        addr,
        "SECRET",
        "VERY_SECRET",
        Environment::Development,
    );
    let router = app(&modules);

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(router.into_make_service())
            .await
            .unwrap()
    });

    addr
}

pub struct AppData {
    pub addr: SocketAddr,
}

impl AppData {
    pub async fn new(pool: PgPool) -> Self {
        Self {
            addr: spawn_app(pool).await,
        }
    }

    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build reqwest client")
    }

    pub fn api(&self, uri: &str) -> String {
        format!("http://{}/api{uri}", self.addr)
    }
}
