use std::fs;

use veclink_frame::Features;
use veclink_peer::Connection;
use veclink_transport::TcpTransport;

use crate::cmd::SendArgs;
use crate::exit::{peer_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::json::value_from_json;
use crate::output::{print_value, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let value = resolve_value(&args)?;

    let mut features = Features::new();
    if args.compress {
        features = features.with_compressed();
    }

    let stream = TcpTransport::connect(&args.addr)
        .map_err(|err| transport_error("connect failed", err))?;
    let mut conn = Connection::connect(stream, features)
        .map_err(|err| peer_error("handshake failed", err))?;

    conn.send(&value)
        .map_err(|err| peer_error("send failed", err))?;

    if args.wait {
        let response = conn.recv().map_err(|err| peer_error("receive failed", err))?;
        print_value(&response, format);
    }

    Ok(SUCCESS)
}

fn resolve_value(args: &SendArgs) -> CliResult<veclink_types::Value> {
    let raw = if let Some(json) = &args.json {
        json.clone()
    } else if let Some(path) = &args.file {
        fs::read_to_string(path).map_err(|err| {
            crate::exit::io_error(&format!("failed reading {}", path.display()), err)
        })?
    } else {
        return Err(CliError::new(USAGE, "one of --json or --file is required"));
    };

    let parsed: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|err| CliError::new(USAGE, format!("payload is not valid JSON: {err}")))?;
    Ok(value_from_json(&parsed))
}
