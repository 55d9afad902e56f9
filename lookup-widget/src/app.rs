use std::sync::Arc;

use anyhow::Result;
use crossterm::event::EventStream;
use dictionary::DictionaryApi;
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use crate::audio::AudioPlayer;
use crate::fetch::FetchCoordinator;
use crate::message::{Action, Message};
use crate::state::SessionState;
use crate::tui::input::event_messages;
use crate::tui::render::{draw, HitMap};
use crate::update::update;
use crate::view::view;

/// Owns the session state and the effect runners; the only place where
/// messages are applied.
pub struct App {
    state: SessionState,
    fetch: FetchCoordinator,
    audio: AudioPlayer,
    hits: HitMap,
    messages: UnboundedReceiver<Message>,
}

impl App {
    pub fn new(
        state: SessionState,
        api: Arc<dyn DictionaryApi>,
        http: reqwest::Client,
    ) -> Result<Self> {
        let (tx, messages) = unbounded_channel();
        let audio = AudioPlayer::spawn(http, tx.clone())?;
        Ok(Self {
            state,
            fetch: FetchCoordinator::new(api, tx),
            audio,
            hits: HitMap::default(),
            messages,
        })
    }

    pub fn dispatch(&mut self, message: Message) {
        if let Message::AudioFailed { url, .. } = &message {
            self.audio.forget(url);
        }
        for action in update(&mut self.state, message) {
            self.perform(action);
        }
    }

    fn perform(&mut self, action: Action) {
        tracing::trace!(?action, "performing");
        match action {
            Action::Lookup { id, word } => self.fetch.start(id, word),
            Action::PlayAudio { url } => self.audio.play(&url),
            Action::PauseAudio => self.audio.pause(),
            Action::StopAudio => self.audio.stop(),
        }
    }

    /// Types `word` and submits it, as if entered by hand.
    pub fn submit(&mut self, word: String) {
        self.dispatch(Message::InputChanged(word));
        self.dispatch(Message::SearchIconClicked);
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let page = view(&self.state);
        let mut hits = HitMap::default();
        terminal.draw(|frame| hits = draw(frame, &page))?;
        self.hits = hits;
        Ok(())
    }

    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        reports_release: bool,
    ) -> Result<()> {
        let mut events = EventStream::new();
        loop {
            self.draw(terminal)?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => {
                        let messages = event_messages(&self.state, &self.hits, event, reports_release);
                        for message in messages {
                            self.dispatch(message);
                        }
                    }
                    Some(Err(err)) => return Err(err.into()),
                    None => break,
                },
                Some(message) = self.messages.recv() => self.dispatch(message),
            }

            if self.state.should_quit {
                tracing::info!("quitting");
                break;
            }
        }
        self.audio.stop();
        self.fetch.cancel();
        Ok(())
    }
}
