//! Offline export of traces to WAV files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use hound::{SampleFormat, WavSpec, WavWriter};

use crate::engine::{Frame, Phase};
use crate::grid::SamplingGrid;

/// Write `samples` as a mono 32-bit float WAV, repeated `periods` times.
///
/// Samples are divided by `scale` so several files can share one level;
/// a zero scale writes the samples unscaled.
pub fn export_wav(
    path: &Path,
    samples: &[f64],
    grid: &SamplingGrid,
    periods: usize,
    scale: f64,
) -> anyhow::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: grid.sample_rate().round() as u32,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let gain = if scale > 0.0 { 1.0 / scale } else { 1.0 };

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("creating {}", path.display()))?;
    for _ in 0..periods {
        for &sample in samples {
            writer.write_sample((sample * gain) as f32)?;
        }
    }
    writer
        .finalize()
        .with_context(|| format!("finalizing {}", path.display()))?;

    log::info!("wrote {} ({} periods)", path.display(), periods);
    Ok(())
}

/// Export every trace of `frame` into `dir`, all scaled by the loudest one
pub fn export_frame(
    dir: &Path,
    frame: &Frame,
    grid: &SamplingGrid,
    periods: usize,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let scale = frame.traces().map(|t| t.peak()).fold(0.0, f64::max);
    let mut written = Vec::new();

    for phase in Phase::ALL {
        let path = dir.join(format!("phase_{}.wav", phase.label().to_ascii_lowercase()));
        export_wav(&path, &frame.phase(phase).values(), grid, periods, scale)?;
        written.push(path);
    }

    let path = dir.join("neutral.wav");
    export_wav(&path, &frame.neutral.values(), grid, periods, scale)?;
    written.push(path);

    Ok(written)
}
