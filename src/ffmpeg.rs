use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::io::Write;
use raylib::prelude::*;
use tracing::{info, warn};

use crate::error::{BalloonError, BalloonResult};

/// Pipes raw RGBA frames into an ffmpeg child process encoding H.264.
pub struct Ffmpeg {
    process: Child,
    stdin: Option<ChildStdin>,
    frames: u64,
}

pub fn encoder_args(width: i32, height: i32, fps: u32, output: &Path) -> Vec<String> {
    let mut args: Vec<String> = [
        "-loglevel", "error",
        "-y",
        "-f", "rawvideo",
        "-pixel_format", "rgba",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    args.extend([
        "-video_size".to_string(), format!("{}x{}", width, height),
        "-framerate".to_string(), fps.to_string(),
        "-i".to_string(), "-".to_string(),
        "-c:v".to_string(), "libx264".to_string(),
        "-pix_fmt".to_string(), "yuv420p".to_string(),
        output.display().to_string(),
    ]);
    args
}

impl Ffmpeg {
    pub fn new(width: i32, height: i32, fps: u32, output: &Path) -> BalloonResult<Ffmpeg> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(encoder_args(width, height, fps, output))
            .spawn()
            .map_err(|e| BalloonError::recording(format!("failed to start ffmpeg: {}", e)))?;
        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| BalloonError::recording("failed to open ffmpeg stdin"))?;

        info!("recording {}x{} @ {} fps to {}", width, height, fps, output.display());
        Ok(Ffmpeg { process, stdin: Some(stdin), frames: 0 })
    }

    pub fn write(&mut self, image: &Image) -> BalloonResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| BalloonError::recording("ffmpeg stdin already closed"))?;

        let width = image.width() as usize;
        let height = image.height() as usize;
        let row_len = width * 4; // 4 bytes per pixel (RGBA)

        // SAFETY: a render texture readback is an uncompressed RGBA8 buffer of width * height pixels.
        let pixels = unsafe { std::slice::from_raw_parts(image.data() as *const u8, row_len * height) };

        // Render textures are stored bottom-up, ffmpeg expects top-down rows
        for row in pixels.chunks_exact(row_len).rev() {
            stdin
                .write_all(row)
                .map_err(|e| BalloonError::recording(format!("failed to write frame {}: {}", self.frames, e)))?;
        }
        self.frames += 1;
        Ok(())
    }
}

impl Drop for Ffmpeg {
    fn drop(&mut self) {
        // Closing stdin lets ffmpeg finalize the file
        self.stdin = None;
        match self.process.wait() {
            Ok(status) if status.success() => info!("recording finished after {} frames", self.frames),
            Ok(status) => warn!("ffmpeg exited with {}", status),
            Err(e) => warn!("failed to wait for ffmpeg: {}", e),
        }
    }
}
