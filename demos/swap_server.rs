//! Example: a line-based server whose routing table is replaced while it runs.
//!
//! This example shows how to:
//! - Hand a `HandlerCell` to the listener loop in place of the router
//! - Replace the router from an admin command without dropping connections
//! - Reject a broken routing table and keep serving the old one
//!
//! Run with: cargo run --example swap_server
//!
//! Then, in another terminal:
//!   nc 127.0.0.1 7878
//!   GET /
//!   RELOAD /=200 /status=204
//!   GET /status
//!   RELOAD
//!   GET /status

use hotswap_handler::error::ValidationError;
use hotswap_handler::prelude::*;
use std::collections::HashMap;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// A routing table mapping paths to status codes.
struct RouteTable {
    routes: HashMap<String, u16>,
}

impl RouteTable {
    fn parse(table: &str) -> Self {
        let routes = table
            .split_whitespace()
            .filter_map(|entry| {
                let (path, status) = entry.split_once('=')?;
                Some((path.to_string(), status.parse().ok()?))
            })
            .collect();
        Self { routes }
    }
}

impl Validate for RouteTable {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.routes.is_empty() {
            return Err(ValidationError::invalid_field(
                "routes",
                "a routing table needs at least one route",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Handler<String> for RouteTable {
    type Response = String;

    async fn handle(&self, path: String) -> String {
        match self.routes.get(&path) {
            Some(status) => format!("{} {}", status, path),
            None => format!("404 {}", path),
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    println!("=== Swap Server Example ===\n");

    let router = HandlerCell::builder(RouteTable::parse("/=200"))
        .with_name("lines")
        .build();

    let _subscription = router.on_replace(|| {
        println!("[Event] Routing table replaced");
    });

    let listener = TcpListener::bind("127.0.0.1:7878").await?;
    println!("Listening on 127.0.0.1:7878\n");

    loop {
        let (socket, peer) = listener.accept().await?;
        let router = router.clone();

        tokio::spawn(async move {
            let (reader, mut writer) = socket.into_split();
            let mut lines = BufReader::new(reader).lines();

            while let Ok(Some(line)) = lines.next_line().await {
                let reply = match line.split_once(' ') {
                    Some(("GET", path)) => router.dispatch(path.to_string()).await,
                    Some(("RELOAD", table)) => reload(&router, table),
                    None if line == "RELOAD" => reload(&router, ""),
                    _ => "400 expected GET <path> or RELOAD <path=status>...".to_string(),
                };

                if writer.write_all(format!("{}\n", reply).as_bytes()).await.is_err() {
                    break;
                }
            }

            println!("[Conn] {} closed", peer);
        });
    }
}

fn reload(router: &HandlerCell<RouteTable>, table: &str) -> String {
    match router.try_replace(RouteTable::parse(table)) {
        Ok(()) => "200 reloaded".to_string(),
        Err(e) => format!("422 {}", e),
    }
}
