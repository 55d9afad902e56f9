use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::Font;
use crate::theme::{font_modifier, Theme};
use crate::view::{AudioControl, Body, EntryView, MeaningView, Page};

const SEARCH_ICON: &str = "⌕";
const PLACEHOLDER: &str = "Your word";
const HINTS: &str = "Enter search · ^T theme · ^F font · ^P play · Esc quit";

/// Clickable regions of the last frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    pub search_icon: Rect,
    pub font_selector: Rect,
    pub font_options: Vec<(Font, Rect)>,
    pub theme_toggle: Rect,
    pub play_button: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    SearchIcon,
    FontSelector,
    FontOption(Font),
    ThemeToggle,
    PlayButton,
}

impl HitMap {
    pub fn at(&self, x: u16, y: u16) -> Option<Target> {
        if point_in_rect(x, y, self.search_icon) {
            return Some(Target::SearchIcon);
        }
        if point_in_rect(x, y, self.font_selector) {
            return Some(Target::FontSelector);
        }
        if let Some((font, _)) = self
            .font_options
            .iter()
            .find(|(_, rect)| point_in_rect(x, y, *rect))
        {
            return Some(Target::FontOption(*font));
        }
        if point_in_rect(x, y, self.theme_toggle) {
            return Some(Target::ThemeToggle);
        }
        if point_in_rect(x, y, self.play_button) {
            return Some(Target::PlayButton);
        }
        None
    }

    /// The selector together with its open option list.
    pub fn in_font_region(&self, x: u16, y: u16) -> bool {
        matches!(
            self.at(x, y),
            Some(Target::FontSelector | Target::FontOption(_))
        )
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

pub fn draw(frame: &mut Frame, page: &Page<'_>) -> HitMap {
    let theme = page.theme;
    let base = theme.surface().add_modifier(font_modifier(page.font));
    frame.render_widget(Block::default().style(base), frame.area());

    let options_height = if page.header.dropdown_open { 1 } else { 0 };
    let [top, options, input, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(options_height),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let mut hits = HitMap::default();
    draw_header(frame, top, page, base, &mut hits);
    if page.header.dropdown_open {
        draw_font_options(frame, options, page, base, &mut hits);
    }
    draw_input(frame, input, page, base, &mut hits);

    match &page.body {
        Body::Empty => {}
        Body::NotFound(message) => {
            let text = Paragraph::new(Line::from(*message).centered())
                .style(base.patch(theme.error()))
                .wrap(Wrap { trim: true });
            frame.render_widget(text, body);
        }
        Body::Entry(entry) => draw_entry(frame, body, entry, page, base, &mut hits),
    }

    draw_status(frame, status, page, base);
    hits
}

fn draw_header(frame: &mut Frame, area: Rect, page: &Page<'_>, base: Style, hits: &mut HitMap) {
    let theme = page.theme;
    let header = &page.header;
    let arrow = if header.dropdown_open { "▴" } else { "▾" };
    let selector = Line::from(vec![
        Span::styled(header.font_label, theme.text()),
        Span::raw(" "),
        Span::styled(arrow, theme.accent()),
    ]);
    let toggle = if header.dark {
        Line::from(vec![
            Span::styled("━━●", theme.accent()),
            Span::styled(" ☀", theme.text()),
        ])
    } else {
        Line::from(vec![
            Span::styled("○━━", theme.muted()),
            Span::styled(" ☾", theme.text()),
        ])
    };

    let [logo, selector_area, _, toggle_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(selector.width() as u16),
        Constraint::Length(3),
        Constraint::Length(toggle.width() as u16),
    ])
    .areas(area);

    let title = Line::from(vec![
        Span::styled("▤ ", theme.accent()),
        Span::styled("Dictionary", theme.text().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(title).style(base), logo);
    frame.render_widget(Paragraph::new(selector).style(base), selector_area);
    frame.render_widget(Paragraph::new(toggle).style(base), toggle_area);

    hits.font_selector = selector_area;
    hits.theme_toggle = toggle_area;
}

fn draw_font_options(
    frame: &mut Frame,
    area: Rect,
    page: &Page<'_>,
    base: Style,
    hits: &mut HitMap,
) {
    let mut constraints = vec![Constraint::Min(0)];
    for font in Font::ALL {
        constraints.push(Constraint::Length(2));
        constraints.push(Constraint::Length(font.label().chars().count() as u16));
    }
    let areas = Layout::horizontal(constraints).split(area);

    for (index, font) in Font::ALL.into_iter().enumerate() {
        let rect = areas[2 + index * 2];
        let style = if font == page.font {
            page.theme.accent().add_modifier(Modifier::BOLD)
        } else {
            page.theme.text()
        };
        let option = Paragraph::new(Span::styled(font.label(), style))
            .style(base.patch(page.theme.surface()));
        frame.render_widget(option, rect);
        hits.font_options.push((font, rect));
    }
}

fn draw_input(frame: &mut Frame, area: Rect, page: &Page<'_>, base: Style, hits: &mut HitMap) {
    let theme = page.theme;
    let block = Block::bordered()
        .title(Line::from(Span::styled(
            page.header.last_key_code,
            theme.muted(),
        )))
        .border_style(theme.accent())
        .style(base);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [text_area, icon_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(2)]).areas(inner);

    let text = if page.header.input.is_empty() {
        Line::from(vec![
            Span::styled("▏", theme.accent()),
            Span::styled(PLACEHOLDER, theme.muted()),
        ])
    } else {
        Line::from(vec![
            Span::styled(page.header.input, theme.text().add_modifier(Modifier::BOLD)),
            Span::styled("▏", theme.accent()),
        ])
    };
    frame.render_widget(Paragraph::new(text).style(base), text_area);
    frame.render_widget(
        Paragraph::new(Span::styled(SEARCH_ICON, theme.accent())).style(base),
        icon_area,
    );
    hits.search_icon = icon_area;
}

fn draw_entry(
    frame: &mut Frame,
    area: Rect,
    entry: &EntryView<'_>,
    page: &Page<'_>,
    base: Style,
    hits: &mut HitMap,
) {
    let theme = page.theme;
    let footer_height = if entry.sources.is_empty() {
        0
    } else {
        1 + entry.sources.len().min(3) as u16
    };
    let [word_area, meanings_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(footer_height),
    ])
    .areas(area);

    let [heading_area, play_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(5)]).areas(word_area);
    let mut heading = vec![Line::from(Span::styled(
        entry.word,
        theme.text().add_modifier(Modifier::BOLD),
    ))];
    if let Some(phonetic) = entry.phonetic {
        heading.push(Line::from(Span::styled(phonetic, theme.accent())));
    }
    frame.render_widget(Paragraph::new(heading).style(base), heading_area);

    let glyph = match entry.audio {
        AudioControl::Play => Span::styled(" ▶ ", theme.accent().add_modifier(Modifier::BOLD)),
        AudioControl::Pause => Span::styled(" ⏸ ", theme.accent().add_modifier(Modifier::BOLD)),
        AudioControl::Unavailable => Span::styled(" · ", theme.muted()),
    };
    frame.render_widget(Paragraph::new(Line::from(glyph).centered()).style(base), play_area);
    if entry.audio != AudioControl::Unavailable {
        hits.play_button = play_area;
    }

    let mut lines = Vec::new();
    for meaning in &entry.meanings {
        meaning_lines(&mut lines, meaning, theme, meanings_area.width);
    }
    let meanings = Paragraph::new(lines)
        .style(base)
        .wrap(Wrap { trim: false })
        .scroll((page.scroll, 0));
    frame.render_widget(meanings, meanings_area);

    if footer_height > 0 {
        let mut footer = vec![Line::from(Span::styled("Source", theme.muted()))];
        for url in entry.sources.iter().take(3) {
            footer.push(Line::from(vec![
                Span::styled(url.as_str(), theme.text().add_modifier(Modifier::UNDERLINED)),
                Span::styled(" ↗", theme.muted()),
            ]));
        }
        frame.render_widget(Paragraph::new(footer).style(base), footer_area);
    }
}

fn meaning_lines<'a>(lines: &mut Vec<Line<'a>>, meaning: &MeaningView<'a>, theme: Theme, width: u16) {
    let rule = "─".repeat(
        (width as usize).saturating_sub(meaning.part_of_speech.chars().count() + 1),
    );
    lines.push(Line::from(vec![
        Span::styled(
            meaning.part_of_speech,
            theme.text().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(rule, theme.muted()),
    ]));
    lines.push(Line::from(Span::styled("Meaning", theme.muted())));
    for definition in &meaning.definitions {
        lines.push(Line::from(vec![
            Span::styled("  • ", theme.accent()),
            Span::styled(definition.text, theme.text()),
        ]));
        if let Some(example) = definition.example {
            lines.push(Line::from(Span::styled(
                format!("    \"{example}\""),
                theme.muted(),
            )));
        }
    }
    if let Some(synonyms) = &meaning.synonyms {
        let mut row = vec![Span::styled("Synonyms ", theme.text())];
        for synonym in synonyms {
            row.push(Span::raw(" "));
            row.push(Span::styled(*synonym, theme.accent().add_modifier(Modifier::BOLD)));
        }
        lines.push(Line::from(row));
    }
    lines.push(Line::default());
}

fn draw_status(frame: &mut Frame, area: Rect, page: &Page<'_>, base: Style) {
    let theme = page.theme;
    let line = match page.status {
        Some(status) => Line::from(Span::styled(status, theme.error())),
        None if page.header.loading => Line::from(Span::styled("looking up…", theme.muted())),
        None => Line::from(Span::styled(HINTS, theme.muted())),
    };
    frame.render_widget(Paragraph::new(line).style(base), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionState;
    use crate::view::{view, NOT_FOUND_MESSAGE};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;

    fn render(state: &SessionState) -> (String, HitMap) {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let page = view(state);
        let mut hits = HitMap::default();
        terminal
            .draw(|frame| hits = draw(frame, &page))
            .unwrap();
        let screen = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        (screen, hits)
    }

    fn looked_up() -> SessionState {
        let mut state = SessionState::default();
        state.results = vec![serde_json::from_value(json!({
            "word": "keyboard",
            "phonetic": "/ˈkiːbɔːd/",
            "phonetics": [{ "audio": "" }, { "audio": "https://x/keyboard.mp3" }],
            "meanings": [
                {
                    "partOfSpeech": "noun",
                    "definitions": [{ "definition": "A panel of keys" }],
                    "synonyms": ["keypad"]
                },
                {
                    "partOfSpeech": "verb",
                    "definitions": [{ "definition": "To type on a keyboard" }]
                }
            ],
            "sourceUrls": ["https://en.wiktionary.org/wiki/keyboard"]
        }))
        .unwrap()];
        state
    }

    #[test]
    fn empty_state_shows_placeholder_and_hints() {
        let (screen, hits) = render(&SessionState::default());
        assert!(screen.contains(PLACEHOLDER));
        assert!(screen.contains("Serif"));
        assert!(screen.contains("Esc quit"));
        assert_eq!(hits.play_button, Rect::default());
        assert!(hits.search_icon.width > 0);
    }

    #[test]
    fn entry_sections_are_drawn() {
        let (screen, hits) = render(&looked_up());
        assert!(screen.contains("keyboard"));
        assert!(screen.contains("/ˈkiːbɔːd/"));
        assert!(screen.contains("A panel of keys"));
        assert!(screen.contains("To type on a keyboard"));
        assert!(screen.contains("Synonyms"));
        assert!(screen.contains("keypad"));
        assert!(screen.contains("https://en.wiktionary.org/wiki/keyboard"));
        assert!(hits.play_button.width > 0);
        assert!(screen.find("noun").unwrap() < screen.find("verb").unwrap());
    }

    #[test]
    fn not_found_hides_the_entry() {
        let mut state = looked_up();
        state.not_found = true;
        let (screen, hits) = render(&state);
        assert!(screen.contains(NOT_FOUND_MESSAGE));
        assert!(!screen.contains("A panel of keys"));
        assert!(!screen.contains("Source"));
        assert_eq!(hits.play_button, Rect::default());
    }

    #[test]
    fn open_dropdown_lists_every_font() {
        let mut state = SessionState::default();
        state.is_dropdown_rotated = true;
        let (screen, hits) = render(&state);
        assert!(screen.contains("Sans-serif"));
        assert!(screen.contains("Monospace"));
        assert_eq!(hits.font_options.len(), 3);

        let (font, rect) = hits.font_options[2];
        assert_eq!(hits.at(rect.x, rect.y), Some(Target::FontOption(font)));
        assert!(hits.in_font_region(rect.x, rect.y));
    }

    #[test]
    fn hit_map_resolves_clicks() {
        let (_, hits) = render(&looked_up());
        let icon = hits.search_icon;
        assert_eq!(hits.at(icon.x, icon.y), Some(Target::SearchIcon));
        let toggle = hits.theme_toggle;
        assert_eq!(hits.at(toggle.x, toggle.y), Some(Target::ThemeToggle));
        let play = hits.play_button;
        assert_eq!(hits.at(play.x + 1, play.y), Some(Target::PlayButton));
        assert_eq!(hits.at(0, 29), None);
    }

    #[test]
    fn dark_theme_paints_the_background() {
        let mut state = SessionState::default();
        state.is_dark_theme = true;
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let page = view(&state);
        terminal.draw(|frame| {
            draw(frame, &page);
        })
        .unwrap();
        let cell = &terminal.backend().buffer().content[0];
        assert_eq!(cell.bg, crate::theme::DARK_BACKGROUND);
    }
}
