use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use veclink_frame::{
    FEATURE_BUFFERED, FEATURE_COMPRESSED, FEATURE_UNSUPPORTED, HEADER_SIZE,
    UNCOMPRESSED_SIZE_LIMIT,
};
use veclink_peer::{Handshake, HANDSHAKE_SIZE, IPC_VERSION};

use crate::cmd::InfoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct InfoOutput {
    protocol_version: String,
    version_word: u32,
    header_size: usize,
    handshake_size: usize,
    uncompressed_size_limit: usize,
    feature_compressed: u32,
    feature_buffered: u32,
    feature_unsupported: u32,
}

pub fn run(_args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let (major, minor, patch) = Handshake::new().version_parts();
    let out = InfoOutput {
        protocol_version: format!("{major}.{minor}.{patch}"),
        version_word: IPC_VERSION,
        header_size: HEADER_SIZE,
        handshake_size: HANDSHAKE_SIZE,
        uncompressed_size_limit: UNCOMPRESSED_SIZE_LIMIT,
        feature_compressed: FEATURE_COMPRESSED,
        feature_buffered: FEATURE_BUFFERED,
        feature_unsupported: FEATURE_UNSUPPORTED,
    };

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            table.add_row(vec!["protocol version".to_string(), out.protocol_version]);
            table.add_row(vec!["version word".to_string(), out.version_word.to_string()]);
            table.add_row(vec!["header size".to_string(), out.header_size.to_string()]);
            table.add_row(vec![
                "handshake size".to_string(),
                out.handshake_size.to_string(),
            ]);
            table.add_row(vec![
                "uncompressed size limit".to_string(),
                out.uncompressed_size_limit.to_string(),
            ]);
            table.add_row(vec![
                "COMPRESSED".to_string(),
                format!("0x{:08x}", out.feature_compressed),
            ]);
            table.add_row(vec![
                "BUFFERED".to_string(),
                format!("0x{:08x}", out.feature_buffered),
            ]);
            table.add_row(vec![
                "UNSUPPORTED".to_string(),
                format!("0x{:08x}", out.feature_unsupported),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "protocol {} (word {}), header {}B, handshake {}B, compression above {}B",
                out.protocol_version,
                out.version_word,
                out.header_size,
                out.handshake_size,
                out.uncompressed_size_limit
            );
        }
    }

    Ok(SUCCESS)
}
