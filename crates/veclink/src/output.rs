use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use veclink_types::{tag, Value};

use crate::json::value_to_json;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ValueOutput {
    tag: u32,
    kind: &'static str,
    value: serde_json::Value,
}

pub fn print_value(value: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = ValueOutput {
                tag: value.tag(),
                kind: kind_name(value),
                value: value_to_json(value),
            };
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
                .set_header(vec!["TAG", "KIND", "VALUE"])
                .add_row(vec![
                    format!("0x{:05x}", value.tag()),
                    kind_name(value).to_string(),
                    value_to_json(value).to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "tag=0x{:05x} kind={} value={}",
                value.tag(),
                kind_name(value),
                value_to_json(value)
            );
        }
    }
}

pub fn kind_name(value: &Value) -> &'static str {
    match value.tag() {
        tag::NIL => "nil",
        tag::ANY => "any",
        tag::LAMBDA_REC => "lambda-rec",
        tag::REAGENT => "reagent",
        t if tag::is_vector(t) => "vector",
        t if tag::is_scalar(t) => "scalar",
        tag::DICT | tag::DICT_TABLE => "dict",
        tag::TABLE => "table",
        tag::PATTERN => "pattern",
        tag::LAMBDA | tag::CLOSURE => "lambda",
        _ => "other",
    }
}
