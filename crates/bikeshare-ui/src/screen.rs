//! Terminal clearing between screens.

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};

/// Clears the terminal between major session steps unless disabled.
#[derive(Debug, Clone, Copy)]
pub struct Screen {
    enabled: bool,
}

impl Screen {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A screen that never clears (tests, `--no-clear`).
    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn clear<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        if self.enabled {
            crossterm::execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_screen_writes_nothing() {
        let mut out = Vec::new();
        Screen::disabled().clear(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_enabled_screen_writes_escape_sequence() {
        let mut out = Vec::new();
        Screen::new(true).clear(&mut out).unwrap();
        assert!(out.starts_with(b"\x1b["));
    }
}
