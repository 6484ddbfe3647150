//! Line input on a dedicated OS thread.
//!
//! A blocking read can't be cancelled, so it must not live on the runtime's
//! blocking pool: shutting the runtime down would wait for the next line.
//! The reader thread is detached instead and dies with the process.

use std::io::BufRead;

use tokio::sync::mpsc;

/// Forward every line of `input` into a channel.
///
/// The receiver yields `None` once the input reaches end of file. The thread
/// stops on its own when the receiver is dropped and the next line arrives.
///
/// # Errors
///
/// Returns an error if the reader thread cannot be spawned.
pub fn spawn_line_reader<R>(input: R) -> std::io::Result<mpsc::Receiver<std::io::Result<String>>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    std::thread::Builder::new()
        .name("smarthomed-input".to_string())
        .spawn(move || {
            for line in input.lines() {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor, Read};

    use super::*;

    /// Input that never produces a byte.
    struct Stalled;

    impl Read for Stalled {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            loop {
                std::thread::park();
            }
        }
    }

    #[tokio::test]
    async fn should_forward_lines_in_order_then_close() {
        let mut lines = spawn_line_reader(Cursor::new("all on\r\nnext\n")).unwrap();

        assert_eq!(lines.recv().await.unwrap().unwrap(), "all on");
        assert_eq!(lines.recv().await.unwrap().unwrap(), "next");
        assert!(lines.recv().await.is_none());
    }

    #[tokio::test]
    async fn should_forward_read_errors() {
        let mut lines = spawn_line_reader(Cursor::new(vec![0xff, 0xfe, b'\n'])).unwrap();

        assert!(lines.recv().await.unwrap().is_err());
    }

    // The runtime of this test shuts down while the reader is still blocked;
    // the test only finishes if shutdown does not wait for it.
    #[tokio::test]
    async fn should_not_hold_runtime_while_input_is_pending() {
        let mut lines = spawn_line_reader(BufReader::new(Stalled)).unwrap();

        tokio::select! {
            biased;
            _ = lines.recv() => panic!("no input was produced"),
            () = std::future::ready(()) => {}
        }
    }
}
