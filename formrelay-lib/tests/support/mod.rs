//! Local mock of the form-processing collaborator.
//!
//! Serves the server side of the wire contract on a loopback listener: reads
//! the multipart submission, checks the script-origin marker header, and
//! replies with whatever envelope (or raw body) the test's responder chooses.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use formrelay_lib::Envelope;
use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Fixed destination the collaborator substitutes when the incoming field set
/// carries a truthy `redirect` flag.
pub const REDIRECT_OVERRIDE_URL: &str = "https://partner.example.com/welcome";

/// What the mock saw for one request.
pub struct Received {
    /// Value of the `X-Requested-With` header, if present.
    pub requested_with: Option<String>,
    /// Raw multipart body text.
    pub body: String,
}

impl Received {
    /// Extracts a field value from the multipart body.
    pub fn field(&self, name: &str) -> Option<String> {
        field_value(&self.body, name)
    }
}

/// What the mock sends back.
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn envelope(envelope: &Envelope) -> Self {
        Self {
            status: 200,
            body: serde_json::to_string(envelope).expect("serialize envelope"),
        }
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Collaborator behavior for the common case: enforce the marker header and
/// apply the redirect-flag override, otherwise defer to `fallback`.
pub fn collaborator(fallback: impl Fn(&Received) -> Reply + Send + Sync + 'static) -> impl Fn(Received) -> Reply + Send + Sync + 'static {
    move |received: Received| {
        if received.requested_with.as_deref() != Some("XMLHttpRequest") {
            return Reply::envelope(&Envelope::error("expected a script-originated request"));
        }
        if received.field("redirect").is_some_and(|flag| flag == "true") {
            return Reply::envelope(&Envelope::redirect(REDIRECT_OVERRIDE_URL));
        }
        fallback(&received)
    }
}

pub struct MockServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Binds a loopback listener and serves `respond` until dropped.
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(Received) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock listener");
        let addr = listener.local_addr().expect("mock listener addr");
        let respond = Arc::new(respond);

        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let respond = respond.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |request: Request<Incoming>| {
                        let respond = respond.clone();
                        async move {
                            let requested_with = request
                                .headers()
                                .get("X-Requested-With")
                                .and_then(|value| value.to_str().ok())
                                .map(str::to_owned);
                            let body = match request.into_body().collect().await {
                                Ok(collected) => {
                                    String::from_utf8_lossy(&collected.to_bytes()).into_owned()
                                }
                                Err(_) => String::new(),
                            };
                            let reply = respond(Received {
                                requested_with,
                                body,
                            });
                            let response = Response::builder()
                                .status(reply.status)
                                .header("Content-Type", "application/json")
                                .body(Full::new(Bytes::from(reply.body)))
                                .expect("build mock response");
                            Ok::<_, Infallible>(response)
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self { addr, handle }
    }

    /// Absolute URL for an action path on this mock.
    pub fn action(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Base URL of this mock.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Pulls a field's value out of a raw multipart body.
///
/// Good enough for tests: finds the `name="..."` part header and returns the
/// first line of the part's content.
fn field_value(body: &str, name: &str) -> Option<String> {
    let marker = format!("name=\"{name}\"");
    let after_marker = &body[body.find(&marker)? + marker.len()..];
    let content = &after_marker[after_marker.find("\r\n\r\n")? + 4..];
    let end = content.find("\r\n").unwrap_or(content.len());
    Some(content[..end].to_owned())
}
