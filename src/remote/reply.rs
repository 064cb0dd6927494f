//! Reply normalization for the remote payroll service.
//!
//! The backend sometimes prepends diagnostic text to its JSON reply, leaving
//! the real payload on the last line of the body. Decoding therefore tries a
//! whole-body parse first and falls back to the last non-empty line. This
//! tolerance is deliberate and logged at `warn` so the upstream artifact
//! stays visible instead of being silently normalized away.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{ServiceError, ServiceResult};

/// The decoded business reply for a document fetch.
///
/// `ok == true` means `msg` carries the document's HTML payload;
/// `ok == false` means `msg` carries the service's failure message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentReply {
    /// Whether the service produced the requested document.
    pub ok: bool,
    /// HTML payload on success, failure message otherwise.
    pub msg: String,
}

/// The decoded business reply for a vacation existence-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(crate) struct VacationReply {
    /// Whether the existence-check itself succeeded.
    pub ok: bool,
    /// Whether a vacation paycheck exists for the queried period.
    pub msg: bool,
}

/// Decodes a raw reply body into the expected JSON shape.
///
/// Tries the whole body first; if that fails, retries with the last
/// non-empty newline-delimited line. Returns `UnexpectedPayload` when
/// neither parse succeeds or the body is empty.
fn decode_reply<T: DeserializeOwned>(endpoint: &str, body: &str) -> ServiceResult<T> {
    if let Ok(reply) = serde_json::from_str::<T>(body) {
        return Ok(reply);
    }

    let last_line = body
        .trim()
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| ServiceError::UnexpectedPayload {
            endpoint: endpoint.to_string(),
            message: "empty reply body".to_string(),
        })?;

    match serde_json::from_str::<T>(last_line.trim()) {
        Ok(reply) => {
            warn!(endpoint, "reply carried diagnostic text before its JSON payload");
            Ok(reply)
        }
        Err(e) => Err(ServiceError::UnexpectedPayload {
            endpoint: endpoint.to_string(),
            message: format!("trailing line is not the expected JSON: {}", e),
        }),
    }
}

/// Decodes a document-fetch reply body.
///
/// # Example
///
/// ```
/// use stv_paydocs::remote::decode_document_reply;
///
/// let reply = decode_document_reply(
///     "folha_pagamento_html.php",
///     "{\"ok\":true,\"msg\":\"<html/>\"}",
/// ).unwrap();
/// assert!(reply.ok);
/// assert_eq!(reply.msg, "<html/>");
/// ```
pub fn decode_document_reply(endpoint: &str, body: &str) -> ServiceResult<DocumentReply> {
    decode_reply(endpoint, body)
}

/// Decodes a vacation existence-check reply body into the existence flag.
///
/// Returns `true` only when the service replied `ok` with a positive flag.
pub fn decode_vacation_reply(endpoint: &str, body: &str) -> ServiceResult<bool> {
    let reply: VacationReply = decode_reply(endpoint, body)?;
    Ok(reply.ok && reply.msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "folha_pagamento_html.php";

    #[test]
    fn test_decode_clean_json_body() {
        let reply =
            decode_document_reply(ENDPOINT, r#"{"ok":true,"msg":"<html>pay</html>"}"#).unwrap();
        assert!(reply.ok);
        assert_eq!(reply.msg, "<html>pay</html>");
    }

    #[test]
    fn test_decode_failure_reply() {
        let reply =
            decode_document_reply(ENDPOINT, r#"{"ok":false,"msg":"sem resultados"}"#).unwrap();
        assert!(!reply.ok);
        assert_eq!(reply.msg, "sem resultados");
    }

    #[test]
    fn test_decode_body_with_diagnostic_prefix() {
        let body = "Notice: undefined index on line 42\n{\"ok\":true,\"msg\":\"<html/>\"}";
        let reply = decode_document_reply(ENDPOINT, body).unwrap();
        assert!(reply.ok);
        assert_eq!(reply.msg, "<html/>");
    }

    #[test]
    fn test_decode_body_with_several_noise_lines() {
        let body = "warning one\nwarning two\n\n{\"ok\":false,\"msg\":\"nada\"}\n";
        let reply = decode_document_reply(ENDPOINT, body).unwrap();
        assert!(!reply.ok);
    }

    #[test]
    fn test_decode_rejects_non_json_trailing_line() {
        let result = decode_document_reply(ENDPOINT, "Fatal error: something broke");
        assert!(matches!(
            result,
            Err(crate::error::ServiceError::UnexpectedPayload { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_empty_body() {
        let result = decode_document_reply(ENDPOINT, "  \n  ");
        assert!(matches!(
            result,
            Err(crate::error::ServiceError::UnexpectedPayload { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        // Valid JSON, but not the document reply shape.
        let result = decode_document_reply(ENDPOINT, r#"{"status":"ok"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_vacation_reply_true_requires_both_flags() {
        let check = "folha_pagamento_tem_ferias.php";
        assert!(decode_vacation_reply(check, r#"{"ok":true,"msg":true}"#).unwrap());
        assert!(!decode_vacation_reply(check, r#"{"ok":true,"msg":false}"#).unwrap());
        assert!(!decode_vacation_reply(check, r#"{"ok":false,"msg":true}"#).unwrap());
    }

    #[test]
    fn test_vacation_reply_with_diagnostic_prefix() {
        let check = "folha_pagamento_tem_ferias.php";
        let body = "deprecated call\n{\"ok\":true,\"msg\":true}";
        assert!(decode_vacation_reply(check, body).unwrap());
    }
}
