use crate::audio::{
    error::AudioError,
    traits::PlaybackControl,
    util::{construct_sink, setup_device_config},
};
use rodio::{Decoder, OutputStream, Sink, Source};
use std::{io::Cursor, time::Duration};

pub struct PlaybackEngine {
    _stream: OutputStream,
    sink: Sink,
}

impl PlaybackEngine {
    pub fn new() -> Result<Self, AudioError> {
        let (device, stream_config, sample_format) = setup_device_config()?;
        let (stream, sink) = construct_sink(device, &stream_config, sample_format)?;

        Ok(Self {
            _stream: stream,
            sink,
        })
    }
}

impl PlaybackControl for PlaybackEngine {
    fn start(&self, data: Vec<u8>, hint: Option<&str>) -> Result<Option<Duration>, AudioError> {
        let byte_len = data.len() as u64;
        let mut builder = Decoder::builder()
            .with_data(Cursor::new(data))
            .with_byte_len(byte_len)
            .with_seekable(true)
            .with_gapless(true);
        if let Some(hint) = hint {
            builder = builder.with_hint(hint);
        }

        let decoder = builder
            .build()
            .map_err(|e| AudioError::DecodingError(e.to_string()))?;
        let duration = decoder.total_duration();

        self.sink.append(decoder);
        self.sink.play();
        Ok(duration)
    }

    fn play(&self) {
        self.sink.play();
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn stop(&self) {
        self.sink.stop();
    }

    fn seek(&self, position: Duration) -> Result<(), AudioError> {
        self.sink
            .try_seek(position)
            .map_err(|e| AudioError::StreamError(e.to_string()))
    }

    fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}
