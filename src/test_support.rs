use crate::protocol::IoPolicy;
use crate::service::{Server, ServerHandle};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

/// A connected pair of loopback sockets.
pub(crate) fn tcp_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let client = TcpStream::connect(addr).unwrap();
    let (server, _) = listener.accept().unwrap();
    (server, client)
}

/// Policy used by servers started in tests: short enough that a stuck
/// framing read fails the test quickly.
pub(crate) fn test_policy() -> IoPolicy {
    IoPolicy::new(Duration::from_secs(2), 625_000)
}

/// Start a server with both listeners on ephemeral loopback ports.
pub(crate) fn start_test_server() -> ServerHandle {
    Server::bind_addrs("127.0.0.1:0", "127.0.0.1:0", test_policy())
        .unwrap()
        .start()
        .unwrap()
}
