use super::*;
use hound::{SampleFormat, WavReader, WavSpec};

pub struct WavDecoder<R> {
    reader: WavReader<R>,
    spec: WavSpec,
}

impl<R: Read> WavDecoder<R> {
    #[inline]
    pub fn from_reader(reader: R) -> Result<Self, DecoderError> {
        let reader = WavReader::new(reader).map_err(hound_err_to_decoder_err)?;
        Ok(Self {
            spec: reader.spec(),
            reader,
        })
    }

    #[inline]
    pub fn info(&self) -> AudioInfo {
        let spec = self.spec;
        AudioInfo {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            frames: self.reader.duration(),
        }
    }

    #[inline]
    pub fn is_integer_pcm(&self) -> bool {
        self.spec.sample_format == SampleFormat::Int
    }
}

impl<'reader, R: 'reader + Read> WavDecoder<R> {
    /// Iterates over the interleaved 16-bit samples of the stream.
    pub fn into_samples(
        self,
    ) -> Result<Box<dyn 'reader + Iterator<Item = Result<i16, DecoderError>>>, DecoderError> {
        let spec = self.spec;
        Ok(match (spec.bits_per_sample, spec.sample_format) {
            (16, SampleFormat::Int) => {
                let iter = self
                    .reader
                    .into_samples::<i16>()
                    .map(|sample| sample.map_err(hound_err_to_decoder_err));
                Box::new(iter)
            }
            (_, _) => {
                return Err(DecoderError::UnsupportedLayout {
                    channels: spec.channels,
                    bits_per_sample: spec.bits_per_sample,
                })
            }
        })
    }
}

fn hound_err_to_decoder_err(error: hound::Error) -> DecoderError {
    match error {
        hound::Error::IoError(ioerr) if ioerr.kind() == io::ErrorKind::UnexpectedEof => {
            DecoderError::IncompleteData
        }
        hound::Error::IoError(ioerr) => DecoderError::Io(ioerr),
        hound::Error::FormatError(fmterr) => DecoderError::Format(format!("wav: {}", fmterr)),
        hound::Error::Unsupported => DecoderError::Format("wav: unsupported format".to_owned()),
        hound::Error::InvalidSampleFormat => {
            DecoderError::Format("wav: invalid sample format".to_owned())
        }
        hound::Error::TooWide => DecoderError::Format(
            "wav: decoded samples are too wide for destination type".to_owned(),
        ),
        other => DecoderError::Format(format!("wav: {}", other)),
    }
}
