//! Smart-HTTP pack client
//!
//! Two requests, both buffered in full before anything is parsed:
//!
//! 1. `GET {remote}/info/refs?service=git-upload-pack`: ref discovery; the
//!    advertised head id is extracted from the pkt-line response.
//! 2. `POST {remote}/git-upload-pack`: negotiation; the body wants the head
//!    id and immediately signals `done`, and the response carries the pack.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::remote::pkt_line;
use crate::errors::KitError;
use bytes::Bytes;

const UPLOAD_PACK_CONTENT_TYPE: &str = "application/x-git-upload-pack-request";

/// Capability set sent with the first want line.
pub const CAPABILITIES: &str = "delete-refs side-band-64k quiet ofs-delta agent=kit/0.1.0";

pub struct PackClient {
    remote_url: String,
    client: reqwest::Client,
}

impl PackClient {
    pub fn new(remote_url: &str) -> Self {
        PackClient {
            remote_url: remote_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Discover the advertised head reference id.
    ///
    /// Transport failures map to [`KitError::ProtocolError`]. The HTTP
    /// status itself is not inspected on this request; only the pack fetch
    /// checks for a 200.
    pub async fn discover_ref(&self) -> anyhow::Result<ObjectId> {
        let url = format!("{}/info/refs?service=git-upload-pack", self.remote_url);
        tracing::debug!(%url, "ref discovery");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| KitError::ProtocolError {
                status: 0,
                message: e.to_string(),
            })?;

        let body = response.bytes().await.map_err(|e| KitError::ProtocolError {
            status: 0,
            message: e.to_string(),
        })?;

        let head = parse_advertised_head(&body)?;
        tracing::debug!(%head, "advertised head");

        Ok(head)
    }

    /// Negotiate and download the pack for `want`, returning the whole
    /// response body.
    pub async fn fetch_pack(&self, want: &ObjectId) -> anyhow::Result<Bytes> {
        let url = format!("{}/git-upload-pack", self.remote_url);
        tracing::debug!(%url, %want, "pack fetch");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, UPLOAD_PACK_CONTENT_TYPE)
            .body(negotiation_body(want))
            .send()
            .await
            .map_err(|e| KitError::ProtocolError {
                status: 0,
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.as_u16() != 200 {
            let message = response.text().await.unwrap_or_default();
            return Err(KitError::ProtocolError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body = response.bytes().await.map_err(|e| KitError::ProtocolError {
            status: status.as_u16(),
            message: e.to_string(),
        })?;
        tracing::debug!(bytes = body.len(), "pack downloaded");

        Ok(body)
    }
}

/// Extract the head id from a ref advertisement.
///
/// The advertisement opens with a `# service=git-upload-pack` banner line;
/// the head id is the 40 hex characters starting 9 bytes after the first
/// newline (4 bytes of flush packet plus the next line's 4-digit length
/// prefix).
pub fn parse_advertised_head(body: &[u8]) -> anyhow::Result<ObjectId> {
    let newline = body
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| KitError::ProtocolError {
            status: 0,
            message: "ref advertisement has no banner line".to_string(),
        })?;

    let start = newline + 9;
    let end = start + OBJECT_ID_LENGTH;
    if body.len() < end {
        return Err(KitError::ProtocolError {
            status: 0,
            message: "ref advertisement truncated before head id".to_string(),
        }
        .into());
    }

    let hex = std::str::from_utf8(&body[start..end]).map_err(|_| KitError::ProtocolError {
        status: 0,
        message: "advertised head id is not valid text".to_string(),
    })?;

    ObjectId::try_parse(hex.to_string())
}

/// Build the negotiation request body: a want line carrying the capability
/// set, a flush packet, and a done line.
pub fn negotiation_body(want: &ObjectId) -> Vec<u8> {
    let mut body = pkt_line::data_pkt(format!("want {} {}\n", want.as_ref(), CAPABILITIES).as_bytes());
    body.extend_from_slice(&pkt_line::flush_pkt());
    body.extend_from_slice(&pkt_line::data_pkt(b"done\n"));
    body
}
