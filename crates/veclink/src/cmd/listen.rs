use tracing::{info, warn};
use veclink_frame::Features;
use veclink_peer::Connection;
use veclink_transport::TcpTransport;

use crate::cmd::ListenArgs;
use crate::exit::{peer_error, transport_error, CliResult, SUCCESS};
use crate::output::{print_value, OutputFormat};

pub fn run(args: ListenArgs, format: OutputFormat) -> CliResult<i32> {
    let transport =
        TcpTransport::bind(&args.addr).map_err(|err| transport_error("bind failed", err))?;

    let mut features = Features::new();
    if args.compress {
        features = features.with_compressed();
    }

    let mut received = 0usize;
    loop {
        let stream = transport
            .accept()
            .map_err(|err| transport_error("accept failed", err))?;

        let mut conn = match Connection::accept(stream, features) {
            Ok(conn) => conn,
            Err(err) => {
                warn!(error = %err, "handshake failed, dropping connection");
                continue;
            }
        };

        loop {
            match conn.recv() {
                Ok(value) => {
                    print_value(&value, format);
                    if args.echo {
                        conn.send(&value)
                            .map_err(|err| peer_error("echo failed", err))?;
                    }
                    received += 1;
                    if args.count.is_some_and(|n| received >= n) {
                        return Ok(SUCCESS);
                    }
                }
                Err(err) if err.is_end_of_stream() => {
                    info!("peer closed connection");
                    break;
                }
                Err(err) => return Err(peer_error("receive failed", err)),
            }
        }
    }
}
