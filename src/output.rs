//! CLI response formatting and output.
//!
//! Provides the JSON envelope, printing, and exit code mapping.

use serde::Serialize;
use slipway::Error;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> CliResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code().to_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// Print a command result as a JSON envelope and map it to an exit code.
pub fn print_result<T: Serialize>(result: slipway::Result<(T, i32)>) -> u8 {
    let (response, exit_code) = match result {
        Ok((data, code)) => (CliResponse::success(data), code),
        Err(ref err) => (CliResponse::from_error(err), error_exit_code(err)),
    };

    match serde_json::to_string_pretty(&response) {
        Ok(payload) => println!("{}", payload),
        Err(err) => eprintln!("Failed to serialize response: {}", err),
    }

    clamp_exit_code(exit_code)
}

/// Validation failures exit 2, everything else 1.
fn error_exit_code(err: &Error) -> i32 {
    match err {
        Error::InvalidBase(_) | Error::InvalidReleaseId(_) | Error::InvalidArgument(_) => 2,
        _ => 1,
    }
}

fn clamp_exit_code(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
