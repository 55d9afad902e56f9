use dictionary::{DictionaryError, LookupResult};

use crate::state::{Font, RequestId};

/// Everything that can happen to the widget: user input, finished lookups
/// and playback notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    InputChanged(String),
    /// Dom-style code of a released key, e.g. `KeyA` or `NumpadEnter`.
    KeyUp(String),
    KeyDown(String),
    SearchIconClicked,
    LookupFinished {
        id: RequestId,
        outcome: LookupOutcome,
    },
    ToggleTheme,
    SelectFont(Font),
    CycleFont,
    FontSelectorClicked,
    FontSelectorLeft,
    PlayClicked,
    PauseClicked,
    TogglePlayback,
    /// Playback notifications name the clip they belong to, so a report
    /// about an earlier word's clip can be told apart.
    AudioEnded {
        url: String,
    },
    AudioFailed {
        url: String,
        reason: String,
    },
    Scroll(i16),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(Vec<LookupResult>),
    NotFound,
    Failed(String),
}

impl From<Result<Vec<LookupResult>, DictionaryError>> for LookupOutcome {
    fn from(result: Result<Vec<LookupResult>, DictionaryError>) -> Self {
        match result {
            Ok(entries) => LookupOutcome::Found(entries),
            Err(DictionaryError::NotFound(_)) => LookupOutcome::NotFound,
            Err(other) => LookupOutcome::Failed(other.to_string()),
        }
    }
}

/// Side effects requested by [`crate::update::update`]; the app loop runs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Lookup { id: RequestId, word: String },
    PlayAudio { url: String },
    PauseAudio,
    StopAudio,
}
