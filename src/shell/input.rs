//! Line input read off the async runtime.
//!
//! Blocking reads happen on a plain thread. The shell only awaits the
//! channel, so ending a session never waits on a pending read.

use crate::{Error, Result};
use std::io::{self, BufRead, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Lines from the input thread. Closed at end of input.
pub type LineReceiver = UnboundedReceiver<io::Result<String>>;

/// Spawns a thread that forwards lines from `reader`.
///
/// The channel closes at end of input or after forwarding the first read
/// error. The thread stops once the receiver is gone.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn_line_reader<R>(reader: R) -> Result<LineReceiver>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("haven-input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
            tracing::debug!("input reader finished");
        })
        .map_err(|e| Error::op("spawn_input_reader", e))?;
    Ok(rx)
}

/// Reads stdin lines on a background thread.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn stdin_lines() -> Result<LineReceiver> {
    spawn_line_reader(BufReader::new(io::stdin()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    async fn collect(mut rx: LineReceiver) -> Vec<io::Result<String>> {
        let mut lines = Vec::new();
        while let Some(line) = rx.recv().await {
            lines.push(line);
        }
        lines
    }

    #[tokio::test]
    async fn test_forwards_lines_then_closes() {
        let rx = spawn_line_reader(Cursor::new("hello\r\n\nquit\n".to_string())).unwrap();
        let lines: Vec<String> = collect(rx).await.into_iter().map(std::result::Result::unwrap).collect();
        assert_eq!(lines, ["hello", "", "quit"]);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    #[tokio::test]
    async fn test_read_error_is_forwarded_once() {
        let rx = spawn_line_reader(BufReader::new(Broken)).unwrap();
        let lines = collect(rx).await;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_err());
    }
}
