// TiltFace - Serial Command Link
//
// Commands go out on the console UART (the same line the logger uses), one
// token per line.  The desktop side skips any line it does not recognise, so
// log output interleaves harmlessly.

use std::io::{self, Write};

use tiltface::hal::CommandLink;
use tiltface::Command;

pub struct ConsoleLink {
    out: io::Stdout,
}

impl ConsoleLink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl CommandLink for ConsoleLink {
    fn send(&mut self, command: Command) -> anyhow::Result<()> {
        // Lock so a log line from another thread cannot split the token.
        let mut out = self.out.lock();
        writeln!(out, "{}", command.token())?;
        out.flush()?;
        Ok(())
    }
}
