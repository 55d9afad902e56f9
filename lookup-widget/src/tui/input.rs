use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::message::Message;
use crate::state::SessionState;
use crate::tui::render::{HitMap, Target};

const PAGE: i16 = 10;

/// Translates one terminal event into widget messages.
pub fn event_messages(
    state: &SessionState,
    hits: &HitMap,
    event: Event,
    reports_release: bool,
) -> Vec<Message> {
    match event {
        Event::Key(key) => key_messages(state, key, reports_release),
        Event::Mouse(mouse) => mouse_messages(state, hits, mouse),
        Event::Paste(text) => {
            let mut value = state.current_input.clone();
            value.push_str(text.trim_end_matches(['\r', '\n']));
            vec![Message::InputChanged(value)]
        }
        _ => Vec::new(),
    }
}

pub fn key_messages(state: &SessionState, key: KeyEvent, reports_release: bool) -> Vec<Message> {
    let code = key_code(&key);
    if key.kind == KeyEventKind::Release {
        return vec![Message::KeyUp(code)];
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let shortcut = match key.code {
            KeyCode::Char('c') => Some(Message::Quit),
            KeyCode::Char('t') => Some(Message::ToggleTheme),
            KeyCode::Char('f') => Some(Message::CycleFont),
            KeyCode::Char('p') => Some(Message::TogglePlayback),
            KeyCode::Char('s') => Some(Message::SearchIconClicked),
            _ => None,
        };
        if let Some(message) = shortcut {
            return vec![message];
        }
    }

    let typing = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    let mut messages = vec![Message::KeyDown(code.clone())];
    match key.code {
        KeyCode::Esc => return vec![Message::Quit],
        KeyCode::Char(c) if typing => {
            let mut value = state.current_input.clone();
            value.push(c);
            messages.push(Message::InputChanged(value));
        }
        KeyCode::Backspace => {
            let mut value = state.current_input.clone();
            if value.pop().is_some() {
                messages.push(Message::InputChanged(value));
            }
        }
        KeyCode::Up => messages.push(Message::Scroll(-1)),
        KeyCode::Down => messages.push(Message::Scroll(1)),
        KeyCode::PageUp => messages.push(Message::Scroll(-PAGE)),
        KeyCode::PageDown => messages.push(Message::Scroll(PAGE)),
        _ => {}
    }
    if !reports_release {
        messages.push(Message::KeyUp(code));
    }
    messages
}

pub fn mouse_messages(state: &SessionState, hits: &HitMap, mouse: MouseEvent) -> Vec<Message> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match hits.at(mouse.column, mouse.row) {
            Some(Target::SearchIcon) => vec![Message::SearchIconClicked],
            Some(Target::FontSelector) => vec![Message::FontSelectorClicked],
            Some(Target::FontOption(font)) => vec![Message::SelectFont(font)],
            Some(Target::ThemeToggle) => vec![Message::ToggleTheme],
            Some(Target::PlayButton) if state.is_audio_playing => vec![Message::PauseClicked],
            Some(Target::PlayButton) => vec![Message::PlayClicked],
            None => Vec::new(),
        },
        MouseEventKind::Moved | MouseEventKind::Drag(_)
            if state.is_dropdown_rotated && !hits.in_font_region(mouse.column, mouse.row) =>
        {
            vec![Message::FontSelectorLeft]
        }
        MouseEventKind::ScrollUp => vec![Message::Scroll(-1)],
        MouseEventKind::ScrollDown => vec![Message::Scroll(1)],
        _ => Vec::new(),
    }
}

/// Dom `KeyboardEvent.code` style name for a key, assuming a US layout.
pub fn key_code(key: &KeyEvent) -> String {
    let keypad = key.state.contains(KeyEventState::KEYPAD);
    match key.code {
        KeyCode::Enter if keypad => "NumpadEnter".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        KeyCode::Char(c) if c.is_ascii_digit() && keypad => format!("Numpad{c}"),
        KeyCode::Char(c) if c.is_ascii_digit() => format!("Digit{c}"),
        KeyCode::Char(c) => char_code(c).to_owned(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".into(),
        KeyCode::Esc => "Escape".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Insert => "Insert".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::Up => "ArrowUp".into(),
        KeyCode::Down => "ArrowDown".into(),
        KeyCode::Left => "ArrowLeft".into(),
        KeyCode::Right => "ArrowRight".into(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "Unidentified".into(),
    }
}

fn char_code(c: char) -> &'static str {
    match c {
        ' ' => "Space",
        '-' | '_' => "Minus",
        '=' | '+' => "Equal",
        '[' | '{' => "BracketLeft",
        ']' | '}' => "BracketRight",
        '\\' | '|' => "Backslash",
        ';' | ':' => "Semicolon",
        '\'' | '"' => "Quote",
        ',' | '<' => "Comma",
        '.' | '>' => "Period",
        '/' | '?' => "Slash",
        '`' | '~' => "Backquote",
        '!' => "Digit1",
        '@' => "Digit2",
        '#' => "Digit3",
        '$' => "Digit4",
        '%' => "Digit5",
        '^' => "Digit6",
        '&' => "Digit7",
        '*' => "Digit8",
        '(' => "Digit9",
        ')' => "Digit0",
        _ => "Unidentified",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Font;
    use ratatui::layout::Rect;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn hits() -> HitMap {
        HitMap {
            search_icon: Rect::new(70, 3, 2, 1),
            font_selector: Rect::new(50, 0, 8, 1),
            font_options: vec![(Font::Monospace, Rect::new(50, 1, 9, 1))],
            theme_toggle: Rect::new(61, 0, 5, 1),
            play_button: Rect::new(75, 5, 5, 3),
        }
    }

    #[test]
    fn key_codes_follow_dom_names() {
        assert_eq!(key_code(&press(KeyCode::Char('a'))), "KeyA");
        assert_eq!(key_code(&press(KeyCode::Char('Q'))), "KeyQ");
        assert_eq!(key_code(&press(KeyCode::Char('7'))), "Digit7");
        assert_eq!(key_code(&press(KeyCode::Char(' '))), "Space");
        assert_eq!(key_code(&press(KeyCode::Char('?'))), "Slash");
        assert_eq!(key_code(&press(KeyCode::Enter)), "Enter");
        assert_eq!(key_code(&press(KeyCode::Up)), "ArrowUp");
        assert_eq!(key_code(&press(KeyCode::Char('é'))), "Unidentified");
    }

    #[test]
    fn keypad_enter_is_numpad_enter() {
        let mut key = press(KeyCode::Enter);
        key.state = KeyEventState::KEYPAD;
        assert_eq!(key_code(&key), "NumpadEnter");
    }

    #[test]
    fn typing_appends_to_the_input() {
        let mut state = SessionState::default();
        state.current_input = "hell".into();
        let messages = key_messages(&state, press(KeyCode::Char('o')), true);
        assert_eq!(
            messages,
            vec![
                Message::KeyDown("KeyO".into()),
                Message::InputChanged("hello".into())
            ]
        );
    }

    #[test]
    fn backspace_on_empty_input_changes_nothing() {
        let state = SessionState::default();
        let messages = key_messages(&state, press(KeyCode::Backspace), true);
        assert_eq!(messages, vec![Message::KeyDown("Backspace".into())]);
    }

    #[test]
    fn release_events_become_key_up() {
        let state = SessionState::default();
        let messages = key_messages(&state, release(KeyCode::Enter), true);
        assert_eq!(messages, vec![Message::KeyUp("Enter".into())]);
    }

    #[test]
    fn press_doubles_as_release_without_enhancement() {
        let state = SessionState::default();
        let messages = key_messages(&state, press(KeyCode::Enter), false);
        assert_eq!(
            messages,
            vec![Message::KeyDown("Enter".into()), Message::KeyUp("Enter".into())]
        );
    }

    #[test]
    fn control_shortcuts() {
        let state = SessionState::default();
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(key_messages(&state, ctrl('t'), true), vec![Message::ToggleTheme]);
        assert_eq!(key_messages(&state, ctrl('c'), true), vec![Message::Quit]);
        assert_eq!(key_messages(&state, ctrl('s'), true), vec![Message::SearchIconClicked]);
        assert_eq!(key_messages(&state, press(KeyCode::Esc), true), vec![Message::Quit]);
    }

    #[test]
    fn modified_letters_are_not_typed() {
        let mut state = SessionState::default();
        state.current_input = "word".into();
        for modifiers in [KeyModifiers::CONTROL, KeyModifiers::ALT] {
            let key = KeyEvent::new(KeyCode::Char('a'), modifiers);
            assert_eq!(
                key_messages(&state, key, true),
                vec![Message::KeyDown("KeyA".into())]
            );
        }
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(
            key_messages(&state, shifted, true),
            vec![
                Message::KeyDown("KeyA".into()),
                Message::InputChanged("wordA".into())
            ]
        );
    }

    #[test]
    fn clicks_map_to_targets() {
        let mut state = SessionState::default();
        let hits = hits();
        assert_eq!(mouse_messages(&state, &hits, click(70, 3)), vec![Message::SearchIconClicked]);
        assert_eq!(mouse_messages(&state, &hits, click(52, 0)), vec![Message::FontSelectorClicked]);
        assert_eq!(
            mouse_messages(&state, &hits, click(55, 1)),
            vec![Message::SelectFont(Font::Monospace)]
        );
        assert_eq!(mouse_messages(&state, &hits, click(62, 0)), vec![Message::ToggleTheme]);
        assert_eq!(mouse_messages(&state, &hits, click(76, 6)), vec![Message::PlayClicked]);
        state.is_audio_playing = true;
        assert_eq!(mouse_messages(&state, &hits, click(76, 6)), vec![Message::PauseClicked]);
        assert!(mouse_messages(&state, &hits, click(0, 20)).is_empty());
    }

    #[test]
    fn leaving_the_selector_closes_the_dropdown() {
        let mut state = SessionState::default();
        state.is_dropdown_rotated = true;
        let moved = |column, row| MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        assert!(mouse_messages(&state, &hits(), moved(51, 0)).is_empty());
        assert!(mouse_messages(&state, &hits(), moved(51, 1)).is_empty());
        assert_eq!(
            mouse_messages(&state, &hits(), moved(10, 10)),
            vec![Message::FontSelectorLeft]
        );
    }

    #[test]
    fn paste_appends_without_newlines() {
        let mut state = SessionState::default();
        state.current_input = "ad ".into();
        let messages = event_messages(&state, &HitMap::default(), Event::Paste("hoc\n".into()), true);
        assert_eq!(messages, vec![Message::InputChanged("ad hoc".into())]);
    }
}
