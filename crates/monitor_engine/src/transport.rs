use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::TransportError;

/// Opens streaming connections. The engine owns one and calls it per attempt.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn connect(&self, url: &Url) -> Result<Connection, TransportError>;
}

/// Outbound half of an open connection.
#[async_trait::async_trait]
pub trait FrameSink: Send {
    async fn send_text(&mut self, text: String) -> Result<(), TransportError>;
    async fn close(&mut self);
}

/// Inbound half of an open connection.
#[async_trait::async_trait]
pub trait FrameSource: Send {
    /// Next text frame, or `None` once the peer has closed.
    async fn next_text(&mut self) -> Option<Result<String, TransportError>>;
}

pub struct Connection {
    pub sink: Box<dyn FrameSink>,
    pub source: Box<dyn FrameSource>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketTransport;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[async_trait::async_trait]
impl Transport for WebSocketTransport {
    async fn connect(&self, url: &Url) -> Result<Connection, TransportError> {
        let (stream, _response) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|err| TransportError::Handshake(err.to_string()))?;
        let (sink, source) = stream.split();
        Ok(Connection {
            sink: Box::new(WsSink(sink)),
            source: Box::new(WsSource(source)),
        })
    }
}

struct WsSink(SplitSink<WsStream, Message>);

#[async_trait::async_trait]
impl FrameSink for WsSink {
    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.0
            .send(Message::Text(text))
            .await
            .map_err(|err| TransportError::Send(err.to_string()))
    }

    async fn close(&mut self) {
        let _ = self.0.close().await;
    }
}

struct WsSource(SplitStream<WsStream>);

#[async_trait::async_trait]
impl FrameSource for WsSource {
    async fn next_text(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.0.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Close(_)) => return None,
                // Binary and protocol-level ping/pong frames carry no progress.
                Ok(_) => continue,
                Err(err) => return Some(Err(TransportError::Connection(err.to_string()))),
            }
        }
    }
}
