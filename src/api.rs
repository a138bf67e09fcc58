/*!
The request and response shapes of the check-out calculation.

These mirror what a booking front end sends and expects back: a JSON object
with `checkIn` and `durationOrCheckout` going in, and either `checkIn` and
`checkOut` or an error with an HTTP-like `status` and a `detail` coming out.
*/

use {bstr::ByteSlice, jiff::civil::Date};

use crate::checkout::{self, Failure, Stay};

/// The status used when a request is well formed but couldn't be resolved.
pub const BAD_REQUEST: u16 = 400;

/// The status used when a request doesn't have the required shape.
pub const UNPROCESSABLE: u16 = 422;

/// A request to compute a stay.
///
/// Both fields are required and must be strings. Unknown fields are ignored.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub check_in: String,
    pub duration_or_checkout: String,
}

impl Request {
    /// Decode and validate a request from JSON.
    pub fn from_json(bytes: &[u8]) -> Result<Request, ErrorResponse> {
        serde_json::from_slice(bytes).map_err(|err| {
            log::debug!(
                "rejecting request `{}`: {err}",
                bytes.trim_ascii().as_bstr(),
            );
            ErrorResponse { status: UNPROCESSABLE, detail: err.to_string() }
        })
    }
}

/// A successfully computed stay.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub check_in: String,
    pub check_out: String,
}

impl From<Stay> for Response {
    fn from(stay: Stay) -> Response {
        Response { check_in: stay.check_in, check_out: stay.check_out }
    }
}

/// A request that failed, with a status and a message that is safe to show
/// to an end user.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub detail: String,
}

impl From<Failure> for ErrorResponse {
    fn from(failure: Failure) -> ErrorResponse {
        ErrorResponse {
            status: BAD_REQUEST,
            detail: failure.message().to_string(),
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.detail)
    }
}

impl std::error::Error for ErrorResponse {}

/// Computes the stay for a request relative to `today`.
///
/// Every calculation failure, including `Failure::InvalidDateCalculation`,
/// is a 400.
pub fn handle(req: &Request, today: Date) -> Result<Response, ErrorResponse> {
    let stay =
        checkout::calculate(&req.check_in, &req.duration_or_checkout, today)?;
    Ok(Response::from(stay))
}

/// Decodes a JSON request, handles it and writes the JSON result to `wtr`.
///
/// Errors from decoding or handling the request are written as an
/// `ErrorResponse`. An error is returned only when writing fails.
pub fn respond(
    json: &[u8],
    today: Date,
    mut wtr: impl std::io::Write,
) -> anyhow::Result<()> {
    let result =
        Request::from_json(json).and_then(|req| handle(&req, today));
    match result {
        Ok(res) => serde_json::to_writer(&mut wtr, &res)?,
        Err(err) => serde_json::to_writer(&mut wtr, &err)?,
    }
    Ok(())
}
