//! The sound device. Playback needs the `audio` feature, which links the
//! platform audio libraries (ALSA on Linux); without it every clip fails
//! with a readable reason.

#[cfg(feature = "audio")]
mod device {
    use std::io::Cursor;

    use anyhow::{Context, Result};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    pub struct Output {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl Output {
        pub fn open() -> Result<Self> {
            let (stream, handle) =
                OutputStream::try_default().context("failed to open the default output device")?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }

        pub fn start(&self, clip: &[u8]) -> Result<Clip> {
            let source =
                Decoder::new(Cursor::new(clip.to_vec())).context("failed to decode the clip")?;
            let sink = Sink::try_new(&self.handle).context("failed to open an audio sink")?;
            sink.append(source);
            sink.play();
            Ok(Clip(sink))
        }
    }

    pub struct Clip(Sink);

    impl Clip {
        pub fn resume(&self) {
            self.0.play();
        }

        pub fn pause(&self) {
            self.0.pause();
        }

        pub fn stop(self) {
            self.0.stop();
        }

        pub fn is_finished(&self) -> bool {
            self.0.empty()
        }
    }
}

#[cfg(not(feature = "audio"))]
mod device {
    use std::convert::Infallible;

    use anyhow::{bail, Result};

    pub enum Output {}

    impl Output {
        pub fn open() -> Result<Self> {
            bail!("built without audio support")
        }

        pub fn start(&self, _clip: &[u8]) -> Result<Clip> {
            match *self {}
        }
    }

    pub struct Clip(Infallible);

    impl Clip {
        pub fn resume(&self) {
            match self.0 {}
        }

        pub fn pause(&self) {
            match self.0 {}
        }

        pub fn stop(self) {
            match self.0 {}
        }

        pub fn is_finished(&self) -> bool {
            match self.0 {}
        }
    }
}

pub use device::{Clip, Output};
