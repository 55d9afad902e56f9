use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub mod input;
pub mod render;

pub type Backend = CrosstermBackend<Stdout>;

/// Raw-mode terminal with mouse capture, restored on [`Tui::exit`].
pub struct Tui {
    pub terminal: Terminal<Backend>,
    /// Whether the terminal reports key releases and keypad keys.
    pub keyboard_enhanced: bool,
}

impl Tui {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)
            .context("failed to enter the alternate screen")?;

        // Without the kitty protocol there are no release events and no
        // way to tell NumpadEnter from Enter.
        let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true))
            && execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES,
                )
            )
            .is_ok();
        tracing::debug!(keyboard_enhanced, "terminal ready");

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        Ok(Self {
            terminal,
            keyboard_enhanced,
        })
    }

    pub fn exit(&mut self) -> Result<()> {
        if self.keyboard_enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        restore()?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    Ok(())
}

/// Puts the terminal back before the default hook prints the panic.
pub fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        let _ = restore();
        hook(info);
    }));
}
