/// Mock upstream tests need a localhost listener; some sandboxes forbid it.
pub fn mock_upstream_unavailable() -> bool {
    match std::net::TcpListener::bind(("127.0.0.1", 0)) {
        Ok(_) => false,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("skipping mock upstream test: binding localhost is not permitted");
            true
        }
        Err(err) => panic!("failed to bind localhost for mock upstream: {err}"),
    }
}
