use std::fmt;
use std::str::FromStr;

use dictionary::LookupResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Font {
    #[default]
    Serif,
    SansSerif,
    Monospace,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Serif, Font::SansSerif, Font::Monospace];

    pub fn label(self) -> &'static str {
        match self {
            Font::Serif => "Serif",
            Font::SansSerif => "Sans-serif",
            Font::Monospace => "Monospace",
        }
    }

    pub fn family(self) -> &'static str {
        match self {
            Font::Serif => "serif",
            Font::SansSerif => "sans-serif",
            Font::Monospace => "monospace",
        }
    }

    pub fn next(self) -> Font {
        match self {
            Font::Serif => Font::SansSerif,
            Font::SansSerif => Font::Monospace,
            Font::Monospace => Font::Serif,
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFont(pub String);

impl fmt::Display for UnknownFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown font family {:?}", self.0)
    }
}

impl std::error::Error for UnknownFont {}

impl FromStr for Font {
    type Err = UnknownFont;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Font::ALL
            .into_iter()
            .find(|font| font.family().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFont(s.to_owned()))
    }
}

/// Identity of one outbound lookup. Ids only grow, so a response can be
/// matched against the lookup the widget is still waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(u64);

impl RequestId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything the widget shows, owned by the main task and only changed by
/// [`crate::update::update`].
#[derive(Debug, Default)]
pub struct SessionState {
    pub current_input: String,
    pub last_key_code: String,
    pub results: Vec<LookupResult>,
    pub not_found: bool,
    pub is_audio_playing: bool,
    pub selected_font: Font,
    pub is_dark_theme: bool,
    pub is_dropdown_rotated: bool,
    /// Lookup whose response is still awaited.
    pub pending: Option<RequestId>,
    pub last_request: RequestId,
    /// One-line feedback for failures that are not "word not found".
    pub status: Option<String>,
    pub scroll: u16,
    pub should_quit: bool,
}

impl SessionState {
    pub fn new(selected_font: Font, is_dark_theme: bool) -> Self {
        Self {
            selected_font,
            is_dark_theme,
            ..Self::default()
        }
    }

    /// The entry on screen. Homographs beyond the first are never shown.
    pub fn current_entry(&self) -> Option<&LookupResult> {
        if self.not_found {
            None
        } else {
            self.results.first()
        }
    }

    pub fn audio_source(&self) -> Option<&str> {
        self.current_entry().and_then(LookupResult::audio_url)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
