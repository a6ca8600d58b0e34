use std::io::Result;
use tokio::net::TcpListener;

/// Creates a `TcpListener` bound to a random, available port on the local
/// loopback address (`127.0.0.1`) and returns it with the assigned port.
///
/// Useful for tests and demos where a provider must start on a
/// guaranteed-free port without manual configuration; pass the listener to
/// `RpcServer::serve_with_listener` and advertise the returned port.
pub async fn bind_tcp_listener_on_random_port() -> Result<(TcpListener, u16)> {
    // Port 0 asks the OS to substitute an available ephemeral port.
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    Ok((listener, port))
}
