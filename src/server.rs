use std::net::SocketAddr;
use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::protocol::{CommandFactory, Parser, Value};
use crate::provider::ApiKeys;

/// Read buffer growth per `read` call
const READ_CHUNK: usize = 8192;

/// Connections holding more unparsed bytes than this are dropped
const MAX_PENDING: usize = 1024 * 1024;

/// TCP server exposing the running-phase key handle
pub struct Server {
  listener: TcpListener,
  local_addr: SocketAddr,
  cmd_factory: Arc<CommandFactory>,
  keys: ApiKeys,
}

impl Server {
  /// Create and bind TCP server to specified address
  pub async fn bind(addr: &str, keys: ApiKeys) -> Result<Self> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    info!("TCP server bound to {}", local_addr);

    Ok(Self {
      listener,
      local_addr,
      cmd_factory: Arc::new(CommandFactory::init()),
      keys,
    })
  }

  /// Get local listening address
  pub fn local_addr(&self) -> SocketAddr {
    self.local_addr
  }

  /// Process a RESP command and return the response
  async fn process_command(&self, value: Value) -> Value {
    self.cmd_factory.execute(value, &self.keys).await
  }

  /// Handle a single client connection
  async fn handle_connection(
    self: Arc<Self>,
    mut stream: TcpStream,
    peer_addr: SocketAddr,
  ) -> std::io::Result<()> {
    // Holds bytes not yet parsed into a complete command
    let mut pending = BytesMut::with_capacity(READ_CHUNK);

    loop {
      pending.reserve(READ_CHUNK);
      match stream.read_buf(&mut pending).await {
        Ok(0) => {
          info!("Connection closed by client: {}", peer_addr);
          break;
        }
        Ok(_) => {
          loop {
            let (value, consumed) = match Parser::parse(&pending) {
              Ok(Some(frame)) => frame,
              Ok(None) => break,
              Err(e) => {
                warn!("Protocol error from {}: {}", peer_addr, e);
                let reply = Value::error(format!("ERR protocol error: {}", e));
                stream.write_all(&reply.encode()).await?;
                return Ok(());
              }
            };
            pending.advance(consumed);

            // Arguments may carry secrets, so the frame itself is not logged
            debug!("Received command from {}", peer_addr);

            let response = self.process_command(value).await;
            stream.write_all(&response.encode()).await?;
          }

          if pending.len() > MAX_PENDING {
            warn!(
              "Dropping {}: {} bytes without a complete command",
              peer_addr,
              pending.len()
            );
            break;
          }
        }
        Err(e) => {
          error!("Error reading from {}: {}", peer_addr, e);
          break;
        }
      }
    }

    info!("Connection handler ended for {}", peer_addr);
    Ok(())
  }

  /// Start server, accept and process connections
  pub async fn run(self: Arc<Self>) {
    info!("Server started, listening on {}", self.local_addr);

    loop {
      match self.listener.accept().await {
        Ok((stream, peer_addr)) => {
          info!("New connection accepted from {}", peer_addr);

          let server = Arc::clone(&self);

          // Spawn an independent task for each connection
          tokio::spawn(async move {
            if let Err(e) = server.handle_connection(stream, peer_addr).await {
              warn!("Error handling connection from {}: {}", peer_addr, e);
            }
          });
        }
        Err(e) => {
          error!("Failed to accept connection: {}", e);
        }
      }
    }
  }
}
