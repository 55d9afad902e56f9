use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::message::Message;

use self::output::{Clip, Output};

mod output;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

enum AudioCommand {
    Start { url: String, clip: Vec<u8> },
    Resume { url: String },
    Pause,
    Stop,
}

/// Plays pronunciation clips. The output device lives on its own thread
/// because the output stream cannot cross threads; clips are downloaded on the
/// runtime and handed over as bytes.
pub struct AudioPlayer {
    commands: Sender<AudioCommand>,
    client: reqwest::Client,
    messages: UnboundedSender<Message>,
    loaded: Option<String>,
    download: Option<JoinHandle<()>>,
}

impl AudioPlayer {
    pub fn spawn(client: reqwest::Client, messages: UnboundedSender<Message>) -> Result<Self> {
        let (commands, rx) = mpsc::channel();
        let events = messages.clone();
        thread::Builder::new()
            .name("audio".into())
            .spawn(move || audio_thread(rx, events))
            .context("failed to spawn the audio thread")?;
        Ok(Self {
            commands,
            client,
            messages,
            loaded: None,
            download: None,
        })
    }

    pub fn play(&mut self, url: &str) {
        if self.loaded.as_deref() == Some(url) {
            self.send(AudioCommand::Resume {
                url: url.to_owned(),
            });
            return;
        }
        self.stop();
        self.loaded = Some(url.to_owned());

        let client = self.client.clone();
        let commands = self.commands.clone();
        let messages = self.messages.clone();
        let url = url.to_owned();
        self.download = Some(tokio::spawn(async move {
            match download(&client, &url).await {
                Ok(clip) => {
                    tracing::debug!(%url, bytes = clip.len(), "pronunciation downloaded");
                    let _ = commands.send(AudioCommand::Start { url, clip });
                }
                Err(err) => {
                    let reason = format!("{err:#}");
                    let _ = messages.send(Message::AudioFailed { url, reason });
                }
            }
        }));
    }

    pub fn pause(&mut self) {
        // A clip still downloading would start playing after the pause.
        if self.abort_download() {
            self.loaded = None;
        }
        self.send(AudioCommand::Pause);
    }

    /// Drops a clip that failed, so the next play downloads it again.
    pub fn forget(&mut self, url: &str) {
        if self.loaded.as_deref() == Some(url) {
            self.abort_download();
            self.loaded = None;
        }
    }

    pub fn stop(&mut self) {
        self.abort_download();
        self.loaded = None;
        self.send(AudioCommand::Stop);
    }

    fn abort_download(&mut self) -> bool {
        match self.download.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    fn send(&self, command: AudioCommand) {
        if self.commands.send(command).is_err() {
            tracing::warn!("audio thread is gone");
        }
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.abort_download();
    }
}

async fn download(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .with_context(|| format!("failed to fetch {url}"))?;
    let bytes = response.bytes().await.context("failed to read the clip")?;
    Ok(bytes.to_vec())
}

struct Playback {
    url: String,
    clip: Vec<u8>,
    sink: Option<Clip>,
}

fn audio_thread(commands: Receiver<AudioCommand>, messages: UnboundedSender<Message>) {
    // Dropping the output silences every clip, so it is held for the thread's lifetime.
    let output = Output::open().map_err(|err| {
        tracing::warn!("no audio output: {err:#}");
        format!("{err:#}")
    });
    let fail = |url: String, err: anyhow::Error| {
        let reason = format!("{err:#}");
        let _ = messages.send(Message::AudioFailed { url, reason });
    };
    let mut current: Option<Playback> = None;

    loop {
        match commands.recv_timeout(POLL_INTERVAL) {
            Ok(AudioCommand::Start { url, clip }) => {
                current = None;
                let output = match &output {
                    Ok(output) => output,
                    Err(reason) => {
                        fail(url, anyhow::anyhow!("{reason}"));
                        continue;
                    }
                };
                match output.start(&clip) {
                    Ok(sink) => {
                        tracing::info!(%url, "playing pronunciation");
                        current = Some(Playback {
                            url,
                            clip,
                            sink: Some(sink),
                        });
                    }
                    Err(err) => fail(url, err),
                }
            }
            Ok(AudioCommand::Resume { url }) => {
                let playback = current.as_mut().filter(|playback| playback.url == url);
                let (Some(playback), Ok(output)) = (playback, &output) else {
                    fail(url, anyhow::anyhow!("clip is not loaded"));
                    continue;
                };
                match &playback.sink {
                    Some(sink) => sink.resume(),
                    // Finished clips start over.
                    None => match output.start(&playback.clip) {
                        Ok(sink) => playback.sink = Some(sink),
                        Err(err) => fail(url, err),
                    },
                }
            }
            Ok(AudioCommand::Pause) => {
                if let Some(sink) = current.as_ref().and_then(|p| p.sink.as_ref()) {
                    sink.pause();
                }
            }
            Ok(AudioCommand::Stop) => {
                if let Some(sink) = current.take().and_then(|p| p.sink) {
                    sink.stop();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if let Some(playback) = current.as_mut() {
            if playback.sink.as_ref().is_some_and(Clip::is_finished) {
                tracing::debug!(url = %playback.url, "pronunciation ended");
                playback.sink = None;
                let ended = Message::AudioEnded {
                    url: playback.url.clone(),
                };
                if messages.send(ended).is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("audio thread exiting");
}
