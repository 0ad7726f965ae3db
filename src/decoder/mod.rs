use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::encoder::FRAME_BYTES;

use self::wav::WavDecoder;

mod wav;

/// The number of channels a convertible stream must carry.
pub const REQUIRED_CHANNELS: u16 = 2;
/// The bit depth a convertible stream must carry.
pub const REQUIRED_BITS_PER_SAMPLE: u16 = 16;
/// The sample rate the text output is meant to be played back at.
pub const NOMINAL_SAMPLE_RATE: u32 = 44100;

/// A WAV decoder.
///
/// Use `Decoder::open` or `Decoder::from_reader` to parse a WAV header, then
/// `Decoder::into_frame_bytes` to pull the interleaved sample data.
pub struct Decoder<R: Read> {
    decoder: WavDecoder<R>,
}

/// Information about an opened WAV stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AudioInfo {
    pub(crate) sample_rate: u32,
    pub(crate) channels: u16,
    pub(crate) bits_per_sample: u16,
    pub(crate) frames: u32,
}

impl AudioInfo {
    /// Gets the declared sample rate of the audio.
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Gets the number of channels in the audio.
    #[inline]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Gets the bit depth of each sample.
    #[inline]
    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// Gets the number of frames declared by the container.
    #[inline]
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl Decoder<BufReader<File>> {
    /// Attempts to open the specified WAV file for decoding.
    ///
    /// The file extension is not consulted; any file hound can parse is accepted here.
    /// Call `validate_layout` before reading frames.
    #[inline]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DecoderError> {
        let f = File::open(path).map_err(DecoderError::Io)?;
        Self::from_reader(BufReader::new(f))
    }
}

impl<R: Read> Decoder<R> {
    /// Parses a WAV header from any byte source.
    #[inline]
    pub fn from_reader(reader: R) -> Result<Self, DecoderError> {
        let decoder = WavDecoder::from_reader(reader)?;
        let info = decoder.info();
        debug!(
            sample_rate = info.sample_rate,
            channels = info.channels,
            bits_per_sample = info.bits_per_sample,
            frames = info.frames,
            "parsed wav header"
        );
        Ok(Self { decoder })
    }

    /// Gets information about the audio, such as frame count and sample rate.
    #[inline]
    pub fn info(&self) -> AudioInfo {
        self.decoder.info()
    }

    /// Checks that the stream is 16-bit stereo integer PCM.
    ///
    /// Any declared sample rate is accepted, but rates other than 44.1kHz are reported.
    pub fn validate_layout(&self) -> Result<(), DecoderError> {
        let info = self.info();
        if info.channels != REQUIRED_CHANNELS
            || info.bits_per_sample != REQUIRED_BITS_PER_SAMPLE
            || !self.decoder.is_integer_pcm()
        {
            return Err(DecoderError::UnsupportedLayout {
                channels: info.channels,
                bits_per_sample: info.bits_per_sample,
            });
        }
        if info.sample_rate != NOMINAL_SAMPLE_RATE {
            warn!(
                sample_rate = info.sample_rate,
                "sample rate is not {}Hz; samples are converted unchanged", NOMINAL_SAMPLE_RATE
            );
        }
        Ok(())
    }

    /// Consumes the `Decoder` and reads every frame into one buffer.
    ///
    /// The buffer holds `4 * frames` bytes: left then right sample of each frame,
    /// each as a little-endian 16-bit word.
    pub fn into_frame_bytes(self) -> Result<Vec<u8>, DecoderError> {
        let frames = self.info().frames as usize;
        let mut bytes = Vec::with_capacity(frames * FRAME_BYTES);
        // A trailing partial frame is not part of the declared frame count.
        let samples = frames * REQUIRED_CHANNELS as usize;
        for sample in self.decoder.into_samples()?.take(samples) {
            bytes.extend_from_slice(&sample?.to_le_bytes());
        }
        if bytes.len() != frames * FRAME_BYTES {
            return Err(DecoderError::IncompleteData);
        }
        Ok(bytes)
    }
}

/// An error encountered while decoding a WAV file.
#[derive(Debug, Error)]
pub enum DecoderError {
    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The container could not be parsed as WAV.
    #[error("format error: {0}")]
    Format(String),
    /// The stream is valid WAV, but not 16-bit stereo integer PCM.
    #[error("expected 16-bit stereo PCM, found {bits_per_sample}-bit audio with {channels} channel(s)")]
    UnsupportedLayout { channels: u16, bits_per_sample: u16 },
    /// The data chunk ended before all declared frames were read.
    #[error("incomplete data")]
    IncompleteData,
}
