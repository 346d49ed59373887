//! Text sizing capability probe
//!
//! Asks the terminal where the cursor is (CPR) before and after drawing a
//! space with `w=2` and then with `s=2`. A terminal that understands OSC 66
//! advances two columns for each; one that ignores it does not move.

use log::{debug, warn};
use regex::Regex;
use std::fmt;
use std::io::{self, IsTerminal};
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::text_sizing::set_text_sizing_enabled;

const CURSOR_POSITION_REQUEST: &[u8] = b"\x1b[6n";

static CURSOR_POSITION_REPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[(\d+);(\d+)R").unwrap_or_else(|e| panic!("invalid CPR pattern: {e}"))
});

/// Level of OSC 66 support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    None,
    /// Only the width parameter is honored
    WidthOnly,
    Full,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::None => write!(f, "none"),
            Capability::WidthOnly => write!(f, "width only"),
            Capability::Full => write!(f, "full"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("cannot switch terminal to raw mode: {0}")]
    RawMode(#[source] io::Error),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("timed out after {0:?} waiting for cursor position report")]
    Timeout(Duration),

    #[error("text sizing probe is not supported on this platform")]
    Unsupported,
}

/// Classify cursor columns observed before the probe (`c1`), after the
/// width probe (`c2`) and after the scale probe (`c3`)
pub fn classify(c1: u16, c2: u16, c3: u16) -> Capability {
    if c2 == c1 {
        return Capability::None;
    }

    let width = i32::from(c2) - i32::from(c1) == 2;
    let scale = i32::from(c3) - i32::from(c2) == 2;
    match (width, scale) {
        (true, true) => Capability::Full,
        (true, false) => Capability::WidthOnly,
        _ => Capability::None,
    }
}

/// Terminal the probe talks to
pub trait ProbeIo {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Read whatever input is available, waiting at most `timeout`.
    /// `Ok(None)` means nothing arrived in time.
    fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<usize>>;
}

/// Runs the CPR protocol over a [`ProbeIo`]
pub struct Prober<T: ProbeIo> {
    io: T,
    timeout: Duration,
    pending: String,
}

impl<T: ProbeIo> Prober<T> {
    pub fn new(io: T, timeout: Duration) -> Self {
        Self {
            io,
            timeout,
            pending: String::new(),
        }
    }

    pub fn run(&mut self) -> Result<Capability, ProbeError> {
        self.io.send(b"\r")?;
        let c1 = self.cursor_column()?;

        self.io.send(b"\x1b]66;w=2; \x07")?;
        let c2 = self.cursor_column()?;

        self.io.send(b"\x1b]66;s=2; \x07")?;
        let c3 = self.cursor_column()?;

        // clear what the probe drew
        self.io.send(b"\r\x1b[K")?;

        let capability = classify(c1, c2, c3);
        debug!(
            "text sizing probe columns {} {} {}: {}",
            c1, c2, c3, capability
        );
        Ok(capability)
    }

    fn cursor_column(&mut self) -> Result<u16, ProbeError> {
        self.io.send(CURSOR_POSITION_REQUEST)?;

        let deadline = Instant::now() + self.timeout;
        let mut buf = [0u8; 32];

        loop {
            if let Some(column) = self.take_report() {
                return Ok(column);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(ProbeError::Timeout(self.timeout));
            }

            match self.io.recv(&mut buf, remaining)? {
                Some(0) => {
                    return Err(ProbeError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "terminal input closed",
                    )))
                }
                Some(n) => self.pending.push_str(&String::from_utf8_lossy(&buf[..n])),
                None => continue,
            }
        }
    }

    /// Consume the first complete report in the pending input
    fn take_report(&mut self) -> Option<u16> {
        let (column, end) = {
            let captures = CURSOR_POSITION_REPORT.captures(&self.pending)?;
            let whole = captures.get(0)?;
            let column = captures.get(2)?.as_str().parse::<u16>().ok();
            (column, whole.end())
        };
        self.pending.drain(..end);
        column
    }
}

/// Raw mode for the lifetime of the guard
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> Result<Self, ProbeError> {
        crossterm::terminal::enable_raw_mode().map_err(ProbeError::RawMode)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = crossterm::terminal::disable_raw_mode() {
            warn!("Failed to restore terminal mode after probe: {}", e);
        }
    }
}

#[cfg(unix)]
mod stdio {
    use nix::errno::Errno;
    use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
    use std::fs::File;
    use std::io::{self, Read, Write};
    use std::os::fd::AsFd;
    use std::time::Duration;

    use super::ProbeIo;

    /// The controlling terminal through stdout and a duplicate of stdin
    pub struct StdioTerminal {
        input: File,
        output: io::Stdout,
    }

    impl StdioTerminal {
        pub fn open() -> io::Result<Self> {
            let fd = io::stdin().as_fd().try_clone_to_owned()?;
            Ok(Self {
                input: File::from(fd),
                output: io::stdout(),
            })
        }
    }

    impl ProbeIo for StdioTerminal {
        fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
            self.output.write_all(bytes)?;
            self.output.flush()
        }

        fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<usize>> {
            let millis = u16::try_from(timeout.as_millis()).unwrap_or(u16::MAX);
            let mut fds = [PollFd::new(self.input.as_fd(), PollFlags::POLLIN)];

            match poll(&mut fds, PollTimeout::from(millis)) {
                Ok(0) | Err(Errno::EINTR) => Ok(None),
                Ok(_) => self.input.read(buf).map(Some),
                Err(e) => Err(e.into()),
            }
        }
    }
}

/// Probe the terminal on stdin/stdout.
///
/// Returns [`Capability::None`] without probing when stdin or stdout is not
/// a terminal. Raw mode is restored on every exit path.
pub fn detect_text_sizing(timeout: Duration) -> Result<Capability, ProbeError> {
    if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        debug!("not attached to a terminal, skipping text sizing probe");
        return Ok(Capability::None);
    }
    probe_stdio(timeout)
}

#[cfg(unix)]
fn probe_stdio(timeout: Duration) -> Result<Capability, ProbeError> {
    let terminal = stdio::StdioTerminal::open()?;
    let _raw = RawModeGuard::acquire()?;
    Prober::new(terminal, timeout).run()
}

#[cfg(not(unix))]
fn probe_stdio(_timeout: Duration) -> Result<Capability, ProbeError> {
    Err(ProbeError::Unsupported)
}

/// Probe and turn text sizing on when fully supported.
///
/// Probe failures are logged and reported as [`Capability::None`].
pub fn detect_and_enable(timeout: Duration) -> Capability {
    match detect_text_sizing(timeout) {
        Ok(capability) => {
            if capability == Capability::Full {
                set_text_sizing_enabled(true);
            }
            capability
        }
        Err(e) => {
            debug!("text sizing probe failed: {}", e);
            Capability::None
        }
    }
}
