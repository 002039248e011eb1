//! Request dispatch onto the two cell operations.
//!
//! Requests arrive either as typed [`Request`] values or as command lines:
//!
//! ```text
//! SET A1 =A2+A3
//! GET A1
//! ```
//!
//! Every request yields a [`Response`] with an HTTP-style status and a body.

use cellstore_engine::engine::CellStore;
use tracing::warn;

use crate::error::{CellstoreError, Result};
use crate::sheet::{RawValue, Sheet};

#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    SetCellValue { id: String, value: RawValue },
    GetCellValue { id: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn error(err: &CellstoreError) -> Response {
        Response {
            status: err.status(),
            body: err.to_string(),
        }
    }
}

impl Request {
    /// Parse a `SET <id> <value>` or `GET <id>` command line.
    ///
    /// Keywords are case-insensitive. The value is the rest of the line after
    /// the id, kept verbatim (it may contain spaces).
    pub fn parse(line: &str) -> Result<Request> {
        let line = line.trim();
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();

        match keyword.to_ascii_uppercase().as_str() {
            "GET" => {
                let id = rest.trim();
                if id.is_empty() || id.contains(char::is_whitespace) {
                    return Err(CellstoreError::Command(format!("usage: GET <id> (got '{}')", line)));
                }
                Ok(Request::GetCellValue { id: id.to_string() })
            }
            "SET" => {
                let (id, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if id.is_empty() {
                    return Err(CellstoreError::Command(format!(
                        "usage: SET <id> <value> (got '{}')",
                        line
                    )));
                }
                Ok(Request::SetCellValue {
                    id: id.to_string(),
                    value: RawValue::Text(value.trim_start().to_string()),
                })
            }
            _ => Err(CellstoreError::Command(line.to_string())),
        }
    }
}

impl<S: CellStore> Sheet<S> {
    pub fn dispatch(&self, request: Request) -> Response {
        let result = match &request {
            Request::SetCellValue { id, value } => self
                .set_cell_value(id, value.clone())
                .map(|()| Response {
                    status: 202,
                    body: "Success".to_string(),
                }),
            Request::GetCellValue { id } => self.get_cell_value(id).map(|value| Response {
                status: 200,
                body: value,
            }),
        };

        result.unwrap_or_else(|err| {
            let err = CellstoreError::from(err);
            warn!(request = ?request, error = %err, "request failed");
            Response::error(&err)
        })
    }

    /// Parse and dispatch one command line.
    pub fn dispatch_line(&self, line: &str) -> Response {
        match Request::parse(line) {
            Ok(request) => self.dispatch(request),
            Err(err) => {
                warn!(error = %err, "bad command");
                Response::error(&err)
            }
        }
    }
}
