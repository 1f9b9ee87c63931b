use crate::domain::models::{ErrorBody, JsonError, JsonOut};
use crate::error::error_code;
use serde::Serialize;

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    print_with_status(json, true, data, row)
}

/// Like `print_one`, but the envelope carries `ok` as given.
pub fn print_with_status<T: Serialize>(
    json: bool,
    ok: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

pub fn print_error(json: bool, err: &anyhow::Error) {
    if json {
        let out = JsonError {
            ok: false,
            error: ErrorBody {
                code: error_code(err).to_string(),
                message: format!("{:#}", err),
            },
        };
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{}", s),
            Err(_) => eprintln!("error: {:#}", err),
        }
    } else {
        eprintln!("error: {:#}", err);
    }
}
