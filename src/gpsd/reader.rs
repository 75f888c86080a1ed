use crate::domain::{Endpoint, Fix};
use crate::gpsd::report::Report;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, instrument, trace, warn};

/// Enables watch mode with JSON (non-legacy) reports.
const WATCH_COMMAND: &str = "?WATCH={\"enable\":true,\"json\":true};\n";

/// Longest report kept in memory. gpsd's own reports stay well below this.
const MAX_REPORT_LEN: u64 = 64 * 1024;

/// Reads the first TPV report from the daemon at `endpoint`.
///
/// `budget` is a wall-clock deadline for the whole operation, connection setup included. When it expires the
/// pending read is dropped together with the socket and [`ReaderError::Timeout`] is returned.
#[instrument(skip(endpoint), fields(endpoint = %endpoint))]
pub async fn acquire_fix(endpoint: &Endpoint, budget: Duration) -> Result<Fix, ReaderError> {
    info!("📡 Acquiring fix from {}...", endpoint);
    let fix = timeout(budget, read_first_fix(endpoint))
        .await
        .map_err(|_| ReaderError::Timeout(budget))??;

    info!("📡 Acquiring fix from {}... OK", endpoint);
    Ok(fix)
}

async fn read_first_fix(endpoint: &Endpoint) -> Result<Fix, ReaderError> {
    let stream = TcpStream::connect((endpoint.host(), endpoint.port()))
        .await
        .map_err(|source| ReaderError::Connect {
            endpoint: endpoint.clone(),
            source,
        })?;

    let (reader, mut writer) = stream.into_split();
    writer.write_all(WATCH_COMMAND.as_bytes()).await?;
    debug!("📡 Subscribed to {}", endpoint);

    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    while let Some(read) = read_report_line(&mut reader, &mut line).await? {
        if read == ReportLine::TooLong {
            warn!("⚠️ Skipping report longer than {} bytes", MAX_REPORT_LEN);
            continue;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let text = String::from_utf8_lossy(&line);
        match serde_json::from_slice::<Report>(&line) {
            Ok(Report::Tpv(tpv)) => {
                debug!(report = text.trim(), "🔸 Received TPV report");
                return Ok(tpv.into());
            }
            Ok(Report::Version(version)) => {
                debug!("🔹 Connected to gpsd {} (protocol {}.{})", version.release, version.proto_major, version.proto_minor);
            }
            Ok(Report::Error(error)) => warn!("⚠️ gpsd reported an error: {}", error.message),
            Ok(Report::Other) => trace!(report = text.trim(), "Skipping report"),
            Err(e) => warn!("⚠️ Skipping malformed report: {}", e),
        }
    }

    warn!("🔴 {} closed the connection before reporting a fix", endpoint);
    Err(ReaderError::ConnectionClosed)
}

#[derive(Debug, PartialEq)]
enum ReportLine {
    Complete,
    TooLong,
}

/// Reads raw bytes up to the next newline into `line`, `None` at end of stream.
///
/// At most [`MAX_REPORT_LEN`] bytes are buffered. The rest of a longer line is read and dropped, and `line` is left
/// empty.
async fn read_report_line<R>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<Option<ReportLine>>
where
    R: AsyncBufRead + Unpin,
{
    line.clear();
    let read = (&mut *reader).take(MAX_REPORT_LEN).read_until(b'\n', line).await?;
    if read == 0 {
        return Ok(None);
    }
    if line.ends_with(b"\n") || (read as u64) < MAX_REPORT_LEN {
        return Ok(Some(ReportLine::Complete));
    }

    loop {
        line.clear();
        let read = (&mut *reader).take(MAX_REPORT_LEN).read_until(b'\n', line).await?;
        if read == 0 || line.ends_with(b"\n") {
            line.clear();
            return Ok(Some(ReportLine::TooLong));
        }
    }
}

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("no fix within {0:?}")]
    Timeout(Duration),
    #[error("could not connect to {endpoint}: {source}")]
    Connect { endpoint: Endpoint, source: io::Error },
    #[error("connection error: {0}")]
    Io(#[from] io::Error),
    #[error("daemon closed the connection before reporting a fix")]
    ConnectionClosed,
}

impl ReaderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ReaderError::Timeout(_))
    }
}
