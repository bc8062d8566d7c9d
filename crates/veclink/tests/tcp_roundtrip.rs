//! End-to-end exchange over localhost TCP through the public facade.

use std::thread;

use veclink::frame::Features;
use veclink::peer::Connection;
use veclink::transport::TcpTransport;
use veclink::types::Value;

fn echo_server(transport: TcpTransport, features: Features) -> thread::JoinHandle<usize> {
    thread::spawn(move || {
        let stream = transport.accept().unwrap();
        let mut conn = Connection::accept(stream, features).unwrap();
        let mut served = 0usize;
        loop {
            match conn.recv() {
                Ok(value) => {
                    conn.send(&value).unwrap();
                    served += 1;
                }
                Err(err) if err.is_end_of_stream() => return served,
                Err(err) => panic!("server receive failed: {err}"),
            }
        }
    })
}

#[test]
fn echo_roundtrip_over_tcp() {
    let transport = TcpTransport::bind("127.0.0.1:0").unwrap();
    let addr = transport.local_addr();
    let server = echo_server(transport, Features::new());

    let stream = TcpTransport::connect(addr).unwrap();
    let mut conn = Connection::connect(stream, Features::new()).unwrap();

    let v = Value::list(vec![
        Value::int(42),
        Value::from("Hello, World!"),
        Value::dict(
            Value::symbol_vec(vec!["key1".into(), "key2".into()]),
            Value::int_vec(vec![100, 200]),
        ),
    ]);

    conn.send(&v).unwrap();
    assert_eq!(conn.recv().unwrap(), v);

    drop(conn);
    assert_eq!(server.join().unwrap(), 1);
}

#[test]
fn compressed_echo_roundtrip_over_tcp() {
    let features = Features::new().with_compressed();
    let transport = TcpTransport::bind("127.0.0.1:0").unwrap();
    let addr = transport.local_addr();
    let server = echo_server(transport, features);

    let stream = TcpTransport::connect(addr).unwrap();
    let mut conn = Connection::connect(stream, features).unwrap();
    assert!(conn.compress());

    let big = Value::long_vec((0..50_000).collect());
    conn.send(&big).unwrap();
    assert_eq!(conn.recv().unwrap(), big);

    drop(conn);
    assert_eq!(server.join().unwrap(), 1);
}

#[test]
fn buffered_flag_echoes_through_handshake() {
    let transport = TcpTransport::bind("127.0.0.1:0").unwrap();
    let addr = transport.local_addr();
    let server = echo_server(transport, Features::new().with_buffered());

    let stream = TcpTransport::connect(addr).unwrap();
    let conn = Connection::connect(stream, Features::new().with_buffered()).unwrap();
    assert!(conn.peer().is_buffered());

    drop(conn);
    assert_eq!(server.join().unwrap(), 0);
}
