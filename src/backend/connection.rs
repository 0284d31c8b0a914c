//! Gateway connection setup and line framing.
//!
//! Handles TCP and TLS connection setup and wraps the stream in a
//! newline-delimited JSON session.

use futures::{SinkExt, StreamExt};
use rustls::RootCertStore;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::gateway::{self, GatewayCommand, GatewayEvent, MAX_FRAME_LEN};

/// Anything the session can run over: a TCP stream, a TLS stream, or an
/// in-memory pipe in tests.
pub trait GatewayStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> GatewayStream for T {}

pub struct GatewaySession {
    framed: Framed<Box<dyn GatewayStream>, LinesCodec>,
}

impl GatewaySession {
    pub fn new<S: GatewayStream + 'static>(stream: S) -> Self {
        let stream: Box<dyn GatewayStream> = Box::new(stream);
        Self {
            framed: Framed::new(stream, LinesCodec::new_with_max_length(MAX_FRAME_LEN)),
        }
    }

    pub async fn send(&mut self, command: &GatewayCommand) -> Result<()> {
        let line = gateway::encode_command(command)?;
        self.framed.send(line).await?;
        Ok(())
    }

    /// Next event from the gateway, or `None` once it hangs up.
    ///
    /// Frames that fail to decode are logged and skipped; the platform adds
    /// event types faster than clients learn them.
    pub async fn next_event(&mut self) -> Result<Option<GatewayEvent>> {
        while let Some(line) = self.framed.next().await {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match gateway::decode_event(&line) {
                Ok(event) => return Ok(Some(event)),
                Err(e) => warn!("skipping gateway frame: {}", e),
            }
        }
        Ok(None)
    }
}

/// Create a TLS connector from the platform's trust store, falling back to
/// the bundled webpki roots when none load.
pub fn create_tls_connector() -> TlsConnector {
    let mut root_store = RootCertStore::empty();

    let native = rustls_native_certs::load_native_certs();
    for e in &native.errors {
        debug!("native certificate error: {}", e);
    }
    let (added, ignored) = root_store.add_parsable_certificates(native.certs);
    debug!(added, ignored, "loaded native root certificates");

    if added == 0 {
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    let config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    TlsConnector::from(Arc::new(config))
}

/// Establish a connection to a gateway with optional TLS
pub async fn establish_connection(host: &str, port: u16, use_tls: bool) -> Result<GatewaySession> {
    let stream = TcpStream::connect((host, port)).await?;
    stream.set_nodelay(true)?;

    if !use_tls {
        return Ok(GatewaySession::new(stream));
    }

    let server_name = rustls::pki_types::ServerName::try_from(host.to_string())
        .map_err(|e| ClientError::InvalidServerName(format!("{}: {}", host, e)))?;
    let tls_stream = create_tls_connector().connect(server_name, stream).await?;
    Ok(GatewaySession::new(tls_stream))
}
