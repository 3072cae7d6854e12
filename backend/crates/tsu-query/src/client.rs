use crate::reply::parse_status;
use crate::{QueryError, QueryResult, Record, ServerVersion, parse_records};

use std::future::Future;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use log::debug;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

const GREETING: &str = "TS3";

/// A ServerQuery session. Every network operation is bounded by `timeout`.
pub struct QueryClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    timeout: Duration,
}

impl QueryClient {
    /// Connect and consume the `TS3` greeting and welcome banner.
    pub async fn connect(address: &str, timeout: Duration) -> QueryResult<Self> {
        let stream = with_timeout("connect", timeout, TcpStream::connect(address))
            .await?
            .map_err(|source| QueryError::Connect {
                address: address.to_string(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let (read_half, writer) = stream.into_split();
        let mut client = Self {
            reader: BufReader::new(read_half),
            writer,
            timeout,
        };

        let greeting = client.read_line().await?;
        if greeting != GREETING {
            return Err(QueryError::protocol(format!(
                "unexpected greeting '{}' from {}",
                greeting, address
            )));
        }

        let banner = client.read_line().await?;
        debug!("ServerQuery banner: {}", banner);

        Ok(client)
    }

    /// Send a raw command line and collect its records.
    pub async fn execute(&mut self, command: &str) -> QueryResult<Vec<Record>> {
        debug!("ServerQuery > {}", command);
        let line = format!("{}\n", command);
        with_timeout("write", self.timeout, self.writer.write_all(line.as_bytes())).await??;

        let mut data = String::new();
        loop {
            let line = self.read_line().await?;
            if line.starts_with("error ") {
                parse_status(&line)?;
                break;
            }
            if !data.is_empty() {
                data.push('|');
            }
            data.push_str(&line);
        }

        Ok(parse_records(&data))
    }

    /// `version` command.
    pub async fn version(&mut self) -> QueryResult<ServerVersion> {
        let records = self.execute("version").await?;
        ServerVersion::from_records(&records)
    }

    /// Say goodbye. Errors are ignored, the connection is dropped either way.
    pub async fn quit(mut self) {
        let _ = with_timeout("quit", self.timeout, self.writer.write_all(b"quit\n")).await;
    }

    /// Next non-empty line with the `\n\r` framing stripped.
    async fn read_line(&mut self) -> QueryResult<String> {
        loop {
            let mut buf = String::new();
            let read = with_timeout("reply", self.timeout, self.reader.read_line(&mut buf)).await??;
            if read == 0 {
                return Err(QueryError::protocol("connection closed by server"));
            }
            let line = buf.trim_matches(['\r', '\n']);
            if !line.is_empty() {
                debug!("ServerQuery < {}", line);
                return Ok(line.to_string());
            }
        }
    }
}

#[track_caller]
fn with_timeout<F: Future>(
    operation: &'static str,
    timeout: Duration,
    future: F,
) -> impl Future<Output = QueryResult<F::Output>> {
    let location = Location::caller();
    async move {
        tokio::time::timeout(timeout, future)
            .await
            .map_err(|_| QueryError::Timeout {
                operation,
                timeout_secs: timeout.as_secs(),
                location: ErrorLocation::from(location),
            })
    }
}
