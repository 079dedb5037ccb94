use std::net::SocketAddr;

use axum::Router;

use tokio::net::TcpListener;

use crate::client::Client;

// Binds a stub vendor server on an ephemeral local port and serves the
// given routes in a background task. The task ends together with the
// test runtime.
pub(crate) async fn spawn_server(app: Router) -> SocketAddr {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let _ = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

// A client with test credentials pointed at a local stub server.
pub(crate) fn local_client(address: SocketAddr) -> Client {
    Client::new("tok", "secret")
        .endpoint(&format!("http://{address}"))
        .unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
