//! The widget as data: [`view`] turns the session state into a [`Page`]
//! that the terminal front-end only has to lay out.

use dictionary::{LookupResult, Meaning};

use crate::state::{Font, SessionState};
use crate::theme::Theme;

pub const NOT_FOUND_MESSAGE: &str = "Sorry. We have nothing for you...";

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub theme: Theme,
    pub font: Font,
    pub header: Header<'a>,
    pub body: Body<'a>,
    pub status: Option<&'a str>,
    pub scroll: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub input: &'a str,
    pub last_key_code: &'a str,
    pub font_label: &'static str,
    pub dropdown_open: bool,
    pub dark: bool,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body<'a> {
    Empty,
    NotFound(&'static str),
    Entry(EntryView<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryView<'a> {
    pub word: &'a str,
    pub phonetic: Option<&'a str>,
    pub audio: AudioControl,
    pub meanings: Vec<MeaningView<'a>>,
    pub sources: &'a [String],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioControl {
    Unavailable,
    Play,
    Pause,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeaningView<'a> {
    pub part_of_speech: &'a str,
    pub definitions: Vec<DefinitionView<'a>>,
    /// The meaning's own synonyms, `None` when it lists none.
    pub synonyms: Option<Vec<&'a str>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionView<'a> {
    pub text: &'a str,
    pub example: Option<&'a str>,
}

pub fn view(state: &SessionState) -> Page<'_> {
    let body = if state.not_found {
        Body::NotFound(NOT_FOUND_MESSAGE)
    } else {
        match state.results.first() {
            Some(entry) => Body::Entry(entry_view(entry, state.is_audio_playing)),
            None => Body::Empty,
        }
    };

    Page {
        theme: Theme::for_dark_flag(state.is_dark_theme),
        font: state.selected_font,
        header: Header {
            input: &state.current_input,
            last_key_code: &state.last_key_code,
            font_label: state.selected_font.label(),
            dropdown_open: state.is_dropdown_rotated,
            dark: state.is_dark_theme,
            loading: state.is_loading(),
        },
        body,
        status: state.status.as_deref(),
        scroll: state.scroll,
    }
}

fn entry_view(entry: &LookupResult, playing: bool) -> EntryView<'_> {
    let audio = match (entry.audio_url(), playing) {
        (None, _) => AudioControl::Unavailable,
        (Some(_), false) => AudioControl::Play,
        (Some(_), true) => AudioControl::Pause,
    };
    EntryView {
        word: &entry.word,
        phonetic: entry.phonetic_text(),
        audio,
        meanings: entry.meanings.iter().map(meaning_view).collect(),
        sources: &entry.source_urls,
    }
}

fn meaning_view(meaning: &Meaning) -> MeaningView<'_> {
    let mut synonyms: Vec<&str> = Vec::new();
    for synonym in &meaning.synonyms {
        if !synonyms.contains(&synonym.as_str()) {
            synonyms.push(synonym);
        }
    }

    MeaningView {
        part_of_speech: &meaning.part_of_speech,
        definitions: meaning
            .definitions
            .iter()
            .map(|definition| DefinitionView {
                text: &definition.definition,
                example: definition.example.as_deref(),
            })
            .collect(),
        synonyms: (!synonyms.is_empty()).then_some(synonyms),
    }
}
