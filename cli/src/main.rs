use std::time::Duration;

use clap::{Parser, Subcommand};
use futures_util::{SinkExt, StreamExt};
use protocol::{ClientId, ClientMessage, ServerMessage, Word, WordId};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid websocket URL: {0}")]
    InvalidUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("websocket error: {0}")]
    Ws(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("message encode failed: {0}")]
    Encode(#[from] protocol::EncodeError),
    #[error("timed out waiting for {0}")]
    Timeout(&'static str),
    #[error("expected `init` as the first message, got `{0}`")]
    NoInit(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<tokio_tungstenite::tungstenite::Error> for CliError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Ws(Box::new(error))
    }
}

#[derive(Parser, Debug)]
#[command(name = "magnets-cli", about = "Shared magnet board websocket CLI")]
struct Cli {
    #[arg(long, env = "MAGNETS_URL", default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Seconds to wait for `init` or an echoed broadcast.
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// GET /healthz on the same host.
    Ping,
    /// Print every server message as one JSON line.
    Watch {
        /// Stop after this many messages.
        #[arg(long)]
        count: Option<usize>,
    },
    /// Print the words from the `init` snapshot.
    Words {
        /// Only words currently on the canvas.
        #[arg(long, default_value_t = false)]
        on_canvas: bool,
    },
    /// Put a tray word on the canvas.
    Place {
        word_id: WordId,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Move a word that is on the canvas.
    Move {
        word_id: WordId,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Send a word back to the tray.
    Remove { word_id: WordId },
    /// Report a cursor position once.
    Cursor {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Command::Ping => run_ping(&cli.url).await,
        Command::Watch { count } => run_watch(&cli.url, count).await,
        Command::Words { on_canvas } => run_words(&cli.url, on_canvas, timeout).await,
        Command::Place { word_id, x, y } => {
            run_request(&cli.url, ClientMessage::AddToCanvas { word_id, x, y }, timeout).await
        }
        Command::Move { word_id, x, y } => run_request(&cli.url, ClientMessage::MoveWord { word_id, x, y }, timeout).await,
        Command::Remove { word_id } => run_request(&cli.url, ClientMessage::RemoveFromCanvas { word_id }, timeout).await,
        Command::Cursor { x, y } => run_request(&cli.url, ClientMessage::Cursor { x, y }, timeout).await,
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn run_ping(url: &str) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let response = client.get(health_url(url)?).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_watch(url: &str, count: Option<usize>) -> Result<(), CliError> {
    let mut stream = connect(url).await?;
    let mut seen = 0_usize;
    while count.is_none_or(|limit| seen < limit) {
        let message = recv_next(&mut stream).await?;
        println!("{}", protocol::encode_server_message(&message)?);
        seen += 1;
    }
    stream.close(None).await?;
    Ok(())
}

async fn run_words(url: &str, on_canvas: bool, timeout: Duration) -> Result<(), CliError> {
    let mut stream = connect(url).await?;
    let (_, words) = wait_for_init(&mut stream, timeout).await?;
    let words: Vec<Word> = words.into_iter().filter(|w| !on_canvas || w.on_canvas).collect();
    println!("{}", serde_json::to_string_pretty(&words)?);
    stream.close(None).await?;
    Ok(())
}

/// Send one message and print the broadcast it produced.
async fn run_request(url: &str, request: ClientMessage, timeout: Duration) -> Result<(), CliError> {
    let mut stream = connect(url).await?;
    let (own_id, _) = wait_for_init(&mut stream, timeout).await?;

    let text = protocol::encode_client_message(&request)?;
    stream.send(Message::text(text)).await?;

    let wait = async {
        loop {
            let message = recv_next(&mut stream).await?;
            if is_echo_of(&request, &own_id, &message) {
                return Ok::<_, CliError>(message);
            }
        }
    };
    let echo = tokio::time::timeout(timeout, wait)
        .await
        .map_err(|_| CliError::Timeout("the broadcast (the request may have been a no-op)"))??;

    println!("{}", protocol::encode_server_message(&echo)?);
    stream.close(None).await?;
    Ok(())
}

// =============================================================================
// TRANSPORT
// =============================================================================

async fn connect(url: &str) -> Result<WsStream, CliError> {
    if !(url.starts_with("ws://") || url.starts_with("wss://")) {
        return Err(CliError::InvalidUrl(url.to_owned()));
    }
    let (stream, _) = connect_async(url).await?;
    Ok(stream)
}

async fn wait_for_init(stream: &mut WsStream, timeout: Duration) -> Result<(ClientId, Vec<Word>), CliError> {
    let first = tokio::time::timeout(timeout, recv_next(stream))
        .await
        .map_err(|_| CliError::Timeout("init"))??;
    match first {
        ServerMessage::Init { client_id, words, .. } => Ok((client_id.unwrap_or_default(), words)),
        other => Err(CliError::NoInit(other.kind())),
    }
}

/// Next decoded server message, skipping non-text and undecodable frames.
async fn recv_next(stream: &mut WsStream) -> Result<ServerMessage, CliError> {
    loop {
        let Some(message) = stream.next().await else {
            return Err(CliError::WsClosed);
        };
        match message? {
            Message::Text(text) => {
                if let Some(message) = decode_or_skip(text.as_str()) {
                    return Ok(message);
                }
            }
            Message::Close(_) => return Err(CliError::WsClosed),
            _ => {}
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Decode one server frame. Unknown types and malformed frames are reported
/// on stderr and dropped.
fn decode_or_skip(text: &str) -> Option<ServerMessage> {
    match protocol::decode_server_message(text) {
        Ok(message) => Some(message),
        Err(protocol::DecodeError::UnknownType(kind)) => {
            eprintln!("warning: ignoring unknown message type `{kind}`");
            None
        }
        Err(e) => {
            eprintln!("warning: ignoring undecodable frame: {e}");
            None
        }
    }
}

/// `ws://host:port/ws` → `http://host:port/healthz` (and `wss` → `https`).
fn health_url(ws_url: &str) -> Result<String, CliError> {
    let (scheme, rest) = if let Some(rest) = ws_url.strip_prefix("ws://") {
        ("http", rest)
    } else if let Some(rest) = ws_url.strip_prefix("wss://") {
        ("https", rest)
    } else {
        return Err(CliError::InvalidUrl(ws_url.to_owned()));
    };
    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() {
        return Err(CliError::InvalidUrl(ws_url.to_owned()));
    }
    Ok(format!("{scheme}://{host}/healthz"))
}

/// Whether `message` is the broadcast the server produces for our `request`.
fn is_echo_of(request: &ClientMessage, own_id: &str, message: &ServerMessage) -> bool {
    match (request, message) {
        (
            ClientMessage::AddToCanvas { word_id, .. },
            ServerMessage::WordAddedToCanvas { word_id: got, added_by: by, .. },
        )
        | (ClientMessage::MoveWord { word_id, .. }, ServerMessage::WordMoved { word_id: got, moved_by: by, .. })
        | (
            ClientMessage::RemoveFromCanvas { word_id },
            ServerMessage::WordRemovedFromCanvas { word_id: got, removed_by: by },
        ) => word_id == got && by == own_id,
        (ClientMessage::Cursor { .. }, ServerMessage::CursorMoved { client_id, .. }) => client_id == own_id,
        _ => false,
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
