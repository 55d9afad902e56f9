use crate::message::{Action, LookupOutcome, Message};
use crate::state::{RequestId, SessionState};

pub const ENTER_CODES: [&str; 2] = ["Enter", "NumpadEnter"];

/// Applies one message to the state and returns the side effects it asks for.
pub fn update(state: &mut SessionState, message: Message) -> Vec<Action> {
    match message {
        Message::InputChanged(value) => {
            state.current_input = value;
            Vec::new()
        }
        Message::KeyUp(code) => {
            state.last_key_code = code;
            Vec::new()
        }
        Message::KeyDown(code) => {
            if ENTER_CODES.contains(&code.as_str()) {
                submit(state)
            } else {
                Vec::new()
            }
        }
        Message::SearchIconClicked => submit(state),
        Message::LookupFinished { id, outcome } => {
            finish_lookup(state, id, outcome);
            Vec::new()
        }
        Message::ToggleTheme => {
            state.is_dark_theme = !state.is_dark_theme;
            Vec::new()
        }
        Message::SelectFont(font) => {
            state.selected_font = font;
            state.is_dropdown_rotated = false;
            Vec::new()
        }
        Message::CycleFont => {
            state.selected_font = state.selected_font.next();
            Vec::new()
        }
        Message::FontSelectorClicked => {
            state.is_dropdown_rotated = true;
            Vec::new()
        }
        Message::FontSelectorLeft => {
            state.is_dropdown_rotated = false;
            Vec::new()
        }
        Message::PlayClicked => play(state),
        Message::PauseClicked => pause(state),
        Message::TogglePlayback => {
            if state.is_audio_playing {
                pause(state)
            } else {
                play(state)
            }
        }
        Message::AudioEnded { url } => {
            if is_current_clip(state, &url) {
                state.is_audio_playing = false;
            }
            Vec::new()
        }
        Message::AudioFailed { url, reason } => {
            tracing::warn!(%url, "pronunciation playback failed: {reason}");
            if is_current_clip(state, &url) {
                state.is_audio_playing = false;
                state.status = Some(format!("audio unavailable: {reason}"));
            }
            Vec::new()
        }
        Message::Scroll(delta) => {
            state.scroll = state.scroll.saturating_add_signed(delta);
            Vec::new()
        }
        Message::Quit => {
            state.should_quit = true;
            Vec::new()
        }
    }
}

fn submit(state: &mut SessionState) -> Vec<Action> {
    state.results.clear();
    state.not_found = false;
    state.status = None;
    state.scroll = 0;
    state.is_audio_playing = false;

    let word = std::mem::take(&mut state.current_input);
    let id = state.last_request.next();
    state.last_request = id;
    if let Some(previous) = state.pending.replace(id) {
        tracing::debug!(%previous, %id, "lookup superseded");
    }
    tracing::info!(%id, word = %word, "looking up");

    vec![Action::StopAudio, Action::Lookup { id, word }]
}

fn finish_lookup(state: &mut SessionState, id: RequestId, outcome: LookupOutcome) {
    if state.pending != Some(id) {
        tracing::debug!(%id, pending = ?state.pending, "dropping stale lookup response");
        return;
    }
    state.pending = None;
    match outcome {
        LookupOutcome::Found(results) => {
            tracing::info!(%id, entries = results.len(), "lookup finished");
            state.results = results;
            state.not_found = false;
        }
        LookupOutcome::NotFound => {
            tracing::info!(%id, "word not found");
            state.results.clear();
            state.not_found = true;
        }
        LookupOutcome::Failed(reason) => {
            tracing::warn!(%id, "lookup failed: {reason}");
            state.status = Some(format!("lookup failed: {reason}"));
        }
    }
}

fn is_current_clip(state: &SessionState, url: &str) -> bool {
    let current = state.audio_source() == Some(url);
    if !current {
        tracing::debug!(%url, "ignoring report about a clip no longer shown");
    }
    current
}

fn play(state: &mut SessionState) -> Vec<Action> {
    if state.is_audio_playing {
        return Vec::new();
    }
    match state.audio_source() {
        Some(url) => {
            let url = url.to_owned();
            state.is_audio_playing = true;
            vec![Action::PlayAudio { url }]
        }
        None => Vec::new(),
    }
}

fn pause(state: &mut SessionState) -> Vec<Action> {
    if !state.is_audio_playing {
        return Vec::new();
    }
    state.is_audio_playing = false;
    vec![Action::PauseAudio]
}
