//! Trace id extraction from inbound request headers.

use http::HeaderMap;
use http::header::HeaderName;
use tracing::debug;

/// Header carrying the AWS X-Ray trace id.
pub const DEFAULT_TRACE_HEADER: &str = "X-Amzn-Trace-Id";

/// Trace id used when no usable header is available.
pub const MISSING_TRACE_ID: &str = "N/A";

/// Resolve the trace id from an optional header map.
///
/// Returns the header value unchanged when present. Bytes outside visible
/// ASCII are decoded lossily rather than dropped. No headers, a missing
/// header, or an empty value resolve to [`MISSING_TRACE_ID`].
pub fn trace_id_from_headers(headers: Option<&HeaderMap>, header_name: &str) -> String {
    let Some(headers) = headers else {
        return MISSING_TRACE_ID.to_string();
    };

    match headers.get(header_name) {
        Some(v) => match v.to_str() {
            Ok(s) => trace_id_from_value(Some(s)),
            Err(_) => {
                debug!(header = header_name, "Decoding non-ASCII trace header lossily");
                trace_id_from_value(Some(&String::from_utf8_lossy(v.as_bytes())))
            }
        },
        None => MISSING_TRACE_ID.to_string(),
    }
}

/// Resolve the trace id from an optional raw header value.
pub fn trace_id_from_value(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING_TRACE_ID.to_string(),
    }
}

/// Whether `name` is usable as an HTTP header name.
pub fn is_valid_header_name(name: &str) -> bool {
    HeaderName::from_bytes(name.as_bytes()).is_ok()
}
