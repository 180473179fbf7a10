//! Render session
//!
//! A `Renderer` owns one screen and one frame recorder. Each instruction is
//! interpreted in order against the screen; instructions that record frames
//! return them explicitly and the renderer appends them to the sequence.
//! Encoding closes the session.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gifos_anim::{
    type_text, AnimError, AnimationEncoder, CompressionAlgorithm, Compressor, EncodeStats, Frame,
    FrameRecorder, SpeedClass, TickScale,
};
use gifos_terminal::{Cursor, CursorTarget, GlyphAtlas, Rect, Screen, Theme};
use image::RgbImage;
use tracing::{debug, info, trace};

use crate::{
    instruction::{Instruction, Script},
    RenderError,
};

/// Session options beyond size and theme
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Glyph atlas, shareable between renderers
    pub atlas: Arc<GlyphAtlas>,
    pub tick_scale: TickScale,
    /// How recorded snapshots are kept in memory
    pub compression: CompressionAlgorithm,
    pub max_colors: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            atlas: Arc::new(GlyphAtlas::new(2)),
            tick_scale: TickScale::default(),
            compression: CompressionAlgorithm::Lz4,
            max_colors: gifos_anim::palette::MAX_COLORS,
        }
    }
}

/// Interpret one instruction against the screen, returning any new frames
pub fn interpret(
    screen: &mut Screen,
    instruction: &Instruction,
    compressor: Compressor,
) -> Result<Vec<Frame>, AnimError> {
    match instruction {
        Instruction::Print(text) => screen.write(text),
        Instruction::Println(text) => {
            screen.write(text);
            screen.write_char('\n');
        }
        Instruction::Type { text, speed } => {
            return type_text(screen, text, *speed, compressor);
        }
        Instruction::ClearLine => screen.clear_line(),
        Instruction::ClearScreen => screen.clear_screen(),
        Instruction::MoveCursor(target) => screen.move_cursor(*target),
        Instruction::SetCursorVisible(visible) => screen.set_cursor_visible(*visible),
        Instruction::SetHighlight(highlighted) => screen.set_highlight(*highlighted),
        Instruction::DrawImage { rect, image } => screen.draw_image(*rect, image),
        Instruction::Hold(ticks) => {
            return Ok(vec![Frame::capture(screen, *ticks, compressor)?]);
        }
    }
    Ok(Vec::new())
}

/// One render session
#[derive(Debug)]
pub struct Renderer {
    screen: Screen,
    recorder: FrameRecorder,
    options: RenderOptions,
    closed: bool,
}

impl Renderer {
    /// Create a renderer of `width × height` pixels with default options
    pub fn new(
        width: u32,
        height: u32,
        theme: impl Into<Arc<Theme>>,
    ) -> Result<Self, RenderError> {
        Self::with_options(width, height, theme, RenderOptions::default())
    }

    pub fn with_options(
        width: u32,
        height: u32,
        theme: impl Into<Arc<Theme>>,
        options: RenderOptions,
    ) -> Result<Self, RenderError> {
        let screen = Screen::new(width, height, theme.into(), options.atlas.clone())?;
        let recorder = FrameRecorder::new(Compressor::new(options.compression));

        Ok(Self {
            screen,
            recorder,
            options,
            closed: false,
        })
    }

    /// Execute one instruction, returning how many frames it recorded
    pub fn execute(&mut self, instruction: Instruction) -> Result<usize, RenderError> {
        if self.closed {
            return Err(RenderError::SessionClosed);
        }

        trace!("{instruction:?}");
        let frames = interpret(&mut self.screen, &instruction, self.recorder.compressor())?;
        let produced = frames.len();
        self.recorder.extend(frames);
        Ok(produced)
    }

    /// Play a whole script in order
    pub fn run(&mut self, script: Script) -> Result<(), RenderError> {
        debug!(
            "Running script of {} instructions ({} frames)",
            script.len(),
            script.expected_frames()
        );
        for instruction in script {
            self.execute(instruction)?;
        }
        Ok(())
    }

    pub fn print(&mut self, text: &str) -> Result<(), RenderError> {
        self.execute(Instruction::Print(text.to_string())).map(drop)
    }

    pub fn println(&mut self, text: &str) -> Result<(), RenderError> {
        self.execute(Instruction::Println(text.to_string())).map(drop)
    }

    pub fn type_text(&mut self, text: &str, speed: SpeedClass) -> Result<(), RenderError> {
        self.execute(Instruction::Type {
            text: text.to_string(),
            speed,
        })
        .map(drop)
    }

    pub fn clear_line(&mut self) -> Result<(), RenderError> {
        self.execute(Instruction::ClearLine).map(drop)
    }

    pub fn clear_screen(&mut self) -> Result<(), RenderError> {
        self.execute(Instruction::ClearScreen).map(drop)
    }

    pub fn cursor_to_home(&mut self) -> Result<(), RenderError> {
        self.execute(Instruction::MoveCursor(CursorTarget::Home)).map(drop)
    }

    pub fn cursor_to_row(&mut self, row: u32) -> Result<(), RenderError> {
        self.execute(Instruction::MoveCursor(CursorTarget::Row(row))).map(drop)
    }

    pub fn cursor_to_last_row(&mut self) -> Result<(), RenderError> {
        self.execute(Instruction::MoveCursor(CursorTarget::LastRow)).map(drop)
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<(), RenderError> {
        self.execute(Instruction::SetCursorVisible(visible)).map(drop)
    }

    pub fn set_highlight(&mut self, highlighted: bool) -> Result<(), RenderError> {
        self.execute(Instruction::SetHighlight(highlighted)).map(drop)
    }

    pub fn draw_image(&mut self, rect: Rect, image: RgbImage) -> Result<(), RenderError> {
        self.execute(Instruction::DrawImage { rect, image }).map(drop)
    }

    pub fn hold(&mut self, ticks: u32) -> Result<(), RenderError> {
        self.execute(Instruction::Hold(ticks)).map(drop)
    }

    pub fn frame_count(&self) -> usize {
        self.recorder.len()
    }

    pub fn total_ticks(&self) -> u64 {
        self.recorder.total_ticks()
    }

    pub fn frames(&self) -> &[Frame] {
        self.recorder.frames()
    }

    pub fn cursor(&self) -> Cursor {
        self.screen.cursor()
    }

    pub fn cols(&self) -> u32 {
        self.screen.cols()
    }

    pub fn rows(&self) -> u32 {
        self.screen.rows()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Encode the recorded frames into `writer` and close the session
    pub fn encode<W: Write>(
        &mut self,
        writer: W,
        looping: bool,
    ) -> Result<EncodeStats, RenderError> {
        if self.closed {
            return Err(RenderError::SessionClosed);
        }
        self.closed = true;

        let frames = std::mem::take(&mut self.recorder).into_frames();
        let stats = AnimationEncoder::new(self.options.tick_scale, looping)
            .with_max_colors(self.options.max_colors)
            .encode(&frames, writer)?;
        Ok(stats)
    }

    /// Encode to a file and close the session.
    ///
    /// The animation is written next to `path` first and renamed into place
    /// only once encoding succeeded, so a failure leaves no artifact behind.
    pub fn encode_to(
        &mut self,
        path: impl AsRef<Path>,
        looping: bool,
    ) -> Result<EncodeStats, RenderError> {
        if self.closed {
            return Err(RenderError::SessionClosed);
        }

        let path = path.as_ref();
        let partial = partial_path(path);
        let result = File::create(&partial)
            .map_err(RenderError::from)
            .and_then(|file| self.encode(BufWriter::new(file), looping))
            .and_then(|stats| {
                fs::rename(&partial, path)?;
                Ok(stats)
            });

        match result {
            Ok(stats) => {
                info!("Wrote {} frames to {}", stats.frames, path.display());
                Ok(stats)
            }
            Err(e) => {
                self.closed = true;
                let _ = fs::remove_file(&partial);
                Err(e)
            }
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "animation.gif".into());
    name.push(".partial");
    path.with_file_name(name)
}
