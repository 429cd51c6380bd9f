//! HTTP(S) loader.
//!
//! One blocking GET per call, bounded by a timeout. Failures are never
//! retried.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, instrument};

use pitch_core::{
    application::{ApplicationError, ports::ScaffoldLoader},
    domain::Scaffold,
    error::{PitchError, PitchResult},
};

use super::parse_document;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a scaffold document from a URL.
#[derive(Debug, Clone)]
pub struct UrlLoader {
    client: Client,
    timeout: Duration,
}

impl UrlLoader {
    /// Build a loader whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> PitchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pitch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PitchError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn load_failed(&self, source: &str, reason: String) -> PitchError {
        ApplicationError::LoadFailed {
            location: source.to_string(),
            reason,
        }
        .into()
    }

    fn describe(&self, e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!("request timed out after {}s", self.timeout.as_secs_f32())
        } else {
            format!("request failed: {e}")
        }
    }
}

impl ScaffoldLoader for UrlLoader {
    #[instrument(skip(self), fields(timeout_ms = self.timeout.as_millis() as u64))]
    fn get(&self, source: &str) -> PitchResult<Scaffold> {
        let response = self
            .client
            .get(source)
            .send()
            .map_err(|e| self.load_failed(source, self.describe(&e)))?;

        let status = response.status();
        debug!(status = %status, "received response");
        if !status.is_success() {
            return Err(self.load_failed(source, format!("server responded with {status}")));
        }

        let body = response
            .text()
            .map_err(|e| self.load_failed(source, self.describe(&e)))?;

        parse_document(source, &body)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
    };

    use super::*;

    /// Serve one canned HTTP response on a random local port.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: text/yaml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/scaffold.yaml")
    }

    fn load_reason(err: PitchError) -> String {
        match err {
            PitchError::Application(ApplicationError::LoadFailed { reason, .. }) => reason,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fetches_and_parses_document() {
        let url = serve_once("200 OK", "files:\n  a.txt:\n    mode: 0644\n    template: remote\n");

        let scaffold = UrlLoader::new(DEFAULT_TIMEOUT).unwrap().get(&url).unwrap();
        assert_eq!(scaffold.files["a.txt"].template, "remote");
    }

    #[test]
    fn non_success_status_is_a_load_error() {
        let url = serve_once("404 Not Found", "missing");

        let err = UrlLoader::new(DEFAULT_TIMEOUT).unwrap().get(&url).unwrap_err();
        assert!(load_reason(err).contains("404"));
    }

    #[test]
    fn slow_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                thread::sleep(Duration::from_secs(2));
                drop(stream);
            }
        });

        let loader = UrlLoader::new(Duration::from_millis(200)).unwrap();
        let err = loader.get(&format!("http://{addr}/slow.yaml")).unwrap_err();
        assert!(load_reason(err).contains("timed out"));
    }

    #[test]
    fn unreachable_host_is_a_load_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = UrlLoader::new(Duration::from_secs(2))
            .unwrap()
            .get(&format!("http://{addr}/gone.yaml"))
            .unwrap_err();
        assert!(load_reason(err).starts_with("request failed"));
    }
}
