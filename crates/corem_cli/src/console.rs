//! Terminal-backed prompter.
//!
//! # Responsibility
//! - Read plain answers line by line from stdin.
//! - Read secure answers without echo when stdin is a terminal.
//!
//! # Invariants
//! - Raw mode is always restored, including on early return.
//! - End of stdin maps to `PromptError::Closed`; Ctrl-C at a hidden prompt
//!   maps to `PromptError::Interrupted`.

use corem_core::{PromptError, PromptResult, Prompter};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, BufRead, IsTerminal, Write};

pub struct ConsolePrompter {
    stdin: io::Stdin,
}

impl ConsolePrompter {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }

    fn read_plain(&mut self) -> PromptResult<String> {
        let mut line = String::new();
        let read = self.stdin.lock().read_line(&mut line)?;
        if read == 0 {
            return Err(PromptError::Closed);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    fn read_hidden(&mut self) -> PromptResult<String> {
        let _guard = RawModeGuard::enable()?;
        let mut secret = String::new();
        let outcome = loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match apply_key(&mut secret, key) {
                KeyStep::Continue => {}
                KeyStep::Submit => break Ok(secret),
                KeyStep::Interrupt => break Err(PromptError::Interrupted),
                KeyStep::Close => break Err(PromptError::Closed),
            }
        };
        print!("\r\n");
        io::stdout().flush()?;
        outcome
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyStep {
    Continue,
    Submit,
    Interrupt,
    Close,
}

/// Applies one key press to the hidden answer being typed.
fn apply_key(secret: &mut String, key: KeyEvent) -> KeyStep {
    if key.kind != KeyEventKind::Press {
        return KeyStep::Continue;
    }
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => KeyStep::Submit,
        KeyCode::Char('c') if control => KeyStep::Interrupt,
        KeyCode::Char('d') if control && secret.is_empty() => KeyStep::Close,
        KeyCode::Char(_) if control => KeyStep::Continue,
        KeyCode::Backspace => {
            secret.pop();
            KeyStep::Continue
        }
        KeyCode::Char(ch) => {
            secret.push(ch);
            KeyStep::Continue
        }
        _ => KeyStep::Continue,
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ConsolePrompter {
    fn read_line(&mut self, label: &str, secure: bool) -> PromptResult<String> {
        print!("{label}");
        io::stdout().flush()?;
        if secure && self.stdin.is_terminal() {
            self.read_hidden()
        } else {
            self.read_plain()
        }
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_key, KeyStep};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typed_keys_edit_hidden_answer_until_enter() {
        let mut secret = String::new();
        for ch in "pws".chars() {
            assert_eq!(apply_key(&mut secret, press(KeyCode::Char(ch))), KeyStep::Continue);
        }
        apply_key(&mut secret, press(KeyCode::Backspace));
        apply_key(&mut secret, press(KeyCode::Char('d')));
        assert_eq!(apply_key(&mut secret, press(KeyCode::Enter)), KeyStep::Submit);
        assert_eq!(secret, "pwd");
    }

    #[test]
    fn ctrl_c_interrupts_and_ctrl_d_closes_only_when_empty() {
        let mut secret = String::from("half");
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);

        assert_eq!(apply_key(&mut secret, ctrl_c), KeyStep::Interrupt);
        assert_eq!(apply_key(&mut secret, ctrl_d), KeyStep::Continue);
        assert_eq!(secret, "half");

        let mut empty = String::new();
        assert_eq!(apply_key(&mut empty, ctrl_d), KeyStep::Close);
    }
}
