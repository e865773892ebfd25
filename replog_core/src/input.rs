//! Shared interactive line feed.
//!
//! Interactive flows and the rest timer both consume user input. A
//! single reader thread forwards stdin lines over a channel; [`LineFeed`]
//! exposes them as a [`BufRead`] for prompts, and [`FeedInterrupt`]
//! polls the same channel without blocking so a line typed during a
//! countdown skips the rest instead of leaking into the next prompt.

use crate::timer::InterruptSource;
use std::io::{self, BufRead, Read};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;

type SharedReceiver = Arc<Mutex<Receiver<String>>>;

/// Channel-backed line input with a single underlying consumer.
pub struct LineFeed {
    rx: SharedReceiver,
    buf: Vec<u8>,
    pos: usize,
    eof: bool,
}

impl LineFeed {
    /// Spawn the stdin reader thread and return the feed.
    ///
    /// The thread exits on stdin EOF or when the feed is dropped.
    pub fn from_stdin() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self::from_receiver(rx)
    }

    /// Build a feed over an existing channel (used by tests).
    pub fn from_receiver(rx: Receiver<String>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
            buf: Vec::new(),
            pos: 0,
            eof: false,
        }
    }

    /// Interrupt strategy polling this feed's channel.
    pub fn interrupt(&self) -> FeedInterrupt {
        FeedInterrupt {
            rx: Arc::clone(&self.rx),
        }
    }
}

impl Read for LineFeed {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = {
            let available = self.fill_buf()?;
            let n = available.len().min(out.len());
            out[..n].copy_from_slice(&available[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for LineFeed {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.buf.len() && !self.eof {
            self.buf.clear();
            self.pos = 0;

            let rx = self
                .rx
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "input feed poisoned"))?;
            match rx.recv() {
                Ok(line) => {
                    self.buf.extend_from_slice(line.as_bytes());
                    self.buf.push(b'\n');
                }
                Err(_) => self.eof = true,
            }
        }
        Ok(&self.buf[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.buf.len());
    }
}

/// Skip signal that drains pending lines from a [`LineFeed`] channel.
pub struct FeedInterrupt {
    rx: SharedReceiver,
}

impl InterruptSource for FeedInterrupt {
    fn pending(&mut self) -> bool {
        let Ok(rx) = self.rx.lock() else {
            return false;
        };
        match rx.try_recv() {
            Ok(_) => true,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn test_reads_lines_in_order() {
        let (tx, rx) = channel();
        tx.send("first".to_string()).unwrap();
        tx.send("second".to_string()).unwrap();
        drop(tx);

        let mut feed = LineFeed::from_receiver(rx);
        let mut line = String::new();
        feed.read_line(&mut line).unwrap();
        assert_eq!(line, "first\n");

        line.clear();
        feed.read_line(&mut line).unwrap();
        assert_eq!(line, "second\n");

        line.clear();
        let n = feed.read_line(&mut line).unwrap();
        assert_eq!(n, 0); // EOF once the sender is gone
    }

    #[test]
    fn test_interrupt_consumes_pending_line() {
        let (tx, rx) = channel();
        let feed = LineFeed::from_receiver(rx);
        let mut interrupt = feed.interrupt();

        assert!(!interrupt.pending());
        tx.send(String::new()).unwrap();
        assert!(interrupt.pending());
        // The line was consumed by the interrupt, not left for prompts
        assert!(!interrupt.pending());
    }
}
