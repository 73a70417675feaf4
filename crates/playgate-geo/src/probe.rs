//! The jurisdiction probe.

use crate::config::GateConfig;
use async_trait::async_trait;
use playgate_core::{GateError, GeoComplianceStatus, Result};
use reqwest::header::CACHE_CONTROL;
use tracing::debug;

/// Abstract seam for the compliance check, so the controller can be
/// exercised without a network.
#[async_trait]
pub trait GeoProbe: Send + Sync {
    /// Fetch the current jurisdiction verdict.
    ///
    /// # Errors
    /// Any transport, status, or parse fault. Callers treat an error as
    /// "verdict unchanged"; the probe never decides to block on its own.
    async fn fetch_status(&self) -> Result<GeoComplianceStatus>;
}

/// HTTP implementation against the portal's compliance endpoint.
///
/// The client is deliberately built without a request timeout: a hung check
/// simply leaves the optimistic default in place.
pub struct HttpGeoProbe {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpGeoProbe {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn from_config(cfg: &GateConfig) -> Self {
        Self::new(cfg.endpoint())
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GeoProbe for HttpGeoProbe {
    async fn fetch_status(&self) -> Result<GeoComplianceStatus> {
        debug!(endpoint = %self.endpoint, "running compliance check");

        let resp = self
            .client
            .get(&self.endpoint)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| GateError::Endpoint(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GateError::Endpoint(format!("status {status}")));
        }

        resp.json::<GeoComplianceStatus>()
            .await
            .map_err(|e| GateError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    /// Serve exactly one canned HTTP response on a loopback port and hand
    /// back the endpoint URL plus the request the probe sent.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();

            // Read until end of headers.
            let mut req = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).unwrap_or(0);
                if n == 0 {
                    break;
                }
                req.extend_from_slice(&buf[..n]);
                if req.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let _ = tx.send(String::from_utf8_lossy(&req).to_string());

            let resp = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(resp.as_bytes());
        });

        (format!("http://{addr}/api/compliance-check"), rx)
    }

    #[tokio::test]
    async fn blocked_verdict_is_adopted() {
        let (url, _req) = serve_once("HTTP/1.1 200 OK", r#"{"blocked":true}"#);
        let probe = HttpGeoProbe::new(url);

        let status = probe.fetch_status().await.unwrap();
        assert!(status.blocked);
    }

    #[tokio::test]
    async fn missing_field_means_not_blocked() {
        let (url, _req) = serve_once("HTTP/1.1 200 OK", "{}");
        let probe = HttpGeoProbe::new(url);

        let status = probe.fetch_status().await.unwrap();
        assert!(!status.blocked);
    }

    #[tokio::test]
    async fn request_disables_caching() {
        let (url, req) = serve_once("HTTP/1.1 200 OK", "{}");
        let probe = HttpGeoProbe::new(url);
        probe.fetch_status().await.unwrap();

        let request = req.recv().unwrap().to_ascii_lowercase();
        assert!(request.contains("cache-control: no-store"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_endpoint_fault() {
        let (url, _req) = serve_once("HTTP/1.1 403 Forbidden", "{}");
        let probe = HttpGeoProbe::new(url);

        let err = probe.fetch_status().await.unwrap_err();
        assert!(matches!(err, GateError::Endpoint(_)));
    }

    #[tokio::test]
    async fn garbage_body_is_a_malformed_response() {
        let (url, _req) = serve_once("HTTP/1.1 200 OK", "geo says no");
        let probe = HttpGeoProbe::new(url);

        let err = probe.fetch_status().await.unwrap_err();
        assert!(matches!(err, GateError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_endpoint_fault() {
        // Bind a port, learn it, then close the listener before probing.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let probe = HttpGeoProbe::new(format!("http://{addr}/api/compliance-check"));
        let err = probe.fetch_status().await.unwrap_err();
        assert!(matches!(err, GateError::Endpoint(_)));
    }
}
