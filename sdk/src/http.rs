//! Blocking HTTP transport for the invoicing API.
//!
//! # Design
//! `Transport` is the only place in the crate that touches the network.
//! The header set (content type, SDK user agent, optional credential) is
//! fixed at construction and applied to every request; each call performs
//! exactly one round trip, with no retries and no caching. Status
//! interpretation happens here once, so the resource layer never inspects
//! raw responses: any 2xx is success, 204 means "no content", everything
//! else becomes an `ApiError::Http` carrying the status and raw body.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Successful outcome of one round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 2xx with a JSON body.
    Json(serde_json::Value),
    /// 204: success with no content.
    Empty,
}

/// Owns the HTTP agent and the header set shared by every request.
///
/// The agent keeps connections alive across calls; beyond that the
/// transport is stateless and safe to share across threads behind an
/// `Arc`.
pub struct Transport {
    agent: ureq::Agent,
    headers: Vec<(&'static str, String)>,
}

impl Transport {
    /// User-Agent sent with every request.
    pub const USER_AGENT: &'static str =
        concat!("invoice-sdk-rust/", env!("CARGO_PKG_VERSION"));

    pub fn new(token: Option<&str>) -> Self {
        // 4xx/5xx come back as data, not Err; execute() owns status
        // interpretation.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        let mut headers: Vec<(&'static str, String)> = vec![
            ("Content-Type", "application/json".to_string()),
            ("User-Agent", Self::USER_AGENT.to_string()),
        ];
        if let Some(token) = token {
            headers.push(("Authorization", format!("Token {token}")));
        }

        Self { agent, headers }
    }

    /// Perform one HTTP round trip.
    ///
    /// `url` must be absolute; `query` pairs are appended to it. Returns
    /// `Payload::Empty` for 204, `Payload::Json` for any other 2xx, and
    /// `ApiError::Http` carrying the status and raw body otherwise.
    pub fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        query: &[(String, String)],
        body: Option<&str>,
    ) -> Result<Payload, ApiError> {
        let result = match (method, body) {
            (HttpMethod::Get, _) => self.prepare(self.agent.get(url), query).call(),
            (HttpMethod::Delete, _) => self.prepare(self.agent.delete(url), query).call(),
            (HttpMethod::Post, Some(body)) => {
                self.prepare(self.agent.post(url), query).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => self.prepare(self.agent.post(url), query).send_empty(),
            (HttpMethod::Patch, Some(body)) => {
                self.prepare(self.agent.patch(url), query).send(body.as_bytes())
            }
            (HttpMethod::Patch, None) => self.prepare(self.agent.patch(url), query).send_empty(),
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        tracing::debug!(method = method.as_str(), url, status, "http round trip");

        if !(200..300).contains(&status) {
            return Err(ApiError::Http { status, body: text });
        }
        if status == 204 {
            return Ok(Payload::Empty);
        }
        let value = serde_json::from_str(&text)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(Payload::Json(value))
    }

    /// Apply the fixed headers and the call's query pairs to a request.
    fn prepare<Any>(
        &self,
        mut request: ureq::RequestBuilder<Any>,
        query: &[(String, String)],
    ) -> ureq::RequestBuilder<Any> {
        for (name, value) in &self.headers {
            request = request.header(*name, value.as_str());
        }
        for (key, value) in query {
            request = request.query(key, value);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_match_the_wire() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn default_headers_identify_the_sdk() {
        let transport = Transport::new(None);
        assert!(transport
            .headers
            .contains(&("Content-Type", "application/json".to_string())));
        assert!(transport
            .headers
            .iter()
            .any(|(name, value)| *name == "User-Agent" && value.starts_with("invoice-sdk-rust/")));
        assert!(!transport.headers.iter().any(|(name, _)| *name == "Authorization"));
    }

    #[test]
    fn token_becomes_an_authorization_header() {
        let transport = Transport::new(Some("secret"));
        assert!(transport
            .headers
            .contains(&("Authorization", "Token secret".to_string())));
    }
}
