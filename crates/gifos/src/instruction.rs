//! Instruction set
//!
//! Every renderer call is one `Instruction`. A `Script` is an ordered list of
//! them that can be built up front and played by a `Renderer` in one pass.

use gifos_anim::SpeedClass;
use gifos_terminal::{CursorTarget, Rect};
use image::RgbImage;

#[derive(Debug, Clone)]
pub enum Instruction {
    /// Write text at the cursor
    Print(String),
    /// Write text followed by a newline
    Println(String),
    /// Type text chunk by chunk, one frame per chunk
    Type { text: String, speed: SpeedClass },
    ClearLine,
    ClearScreen,
    MoveCursor(CursorTarget),
    SetCursorVisible(bool),
    SetHighlight(bool),
    /// Blit a decoded, pre-sized image
    DrawImage { rect: Rect, image: RgbImage },
    /// Record one frame shown for the given ticks
    Hold(u32),
}

impl Instruction {
    /// Frames this instruction appends when executed
    pub fn frames_produced(&self) -> usize {
        match self {
            Instruction::Hold(_) => 1,
            Instruction::Type { text, speed } => text
                .chars()
                .count()
                .div_ceil(speed.profile().chars_per_frame),
            _ => 0,
        }
    }
}

/// Ordered list of instructions
#[derive(Debug, Clone, Default)]
pub struct Script {
    instructions: Vec<Instruction>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub fn print(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Instruction::Print(text.into()))
    }

    pub fn println(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Instruction::Println(text.into()))
    }

    pub fn type_text(&mut self, text: impl Into<String>, speed: SpeedClass) -> &mut Self {
        self.push(Instruction::Type {
            text: text.into(),
            speed,
        })
    }

    pub fn clear_line(&mut self) -> &mut Self {
        self.push(Instruction::ClearLine)
    }

    pub fn clear_screen(&mut self) -> &mut Self {
        self.push(Instruction::ClearScreen)
    }

    pub fn cursor_to_home(&mut self) -> &mut Self {
        self.push(Instruction::MoveCursor(CursorTarget::Home))
    }

    pub fn cursor_to_row(&mut self, row: u32) -> &mut Self {
        self.push(Instruction::MoveCursor(CursorTarget::Row(row)))
    }

    pub fn cursor_to_last_row(&mut self) -> &mut Self {
        self.push(Instruction::MoveCursor(CursorTarget::LastRow))
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> &mut Self {
        self.push(Instruction::SetCursorVisible(visible))
    }

    pub fn set_highlight(&mut self, highlighted: bool) -> &mut Self {
        self.push(Instruction::SetHighlight(highlighted))
    }

    pub fn draw_image(&mut self, rect: Rect, image: RgbImage) -> &mut Self {
        self.push(Instruction::DrawImage { rect, image })
    }

    pub fn hold(&mut self, ticks: u32) -> &mut Self {
        self.push(Instruction::Hold(ticks))
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of frames the script records when played
    pub fn expected_frames(&self) -> usize {
        self.instructions.iter().map(Instruction::frames_produced).sum()
    }
}

impl IntoIterator for Script {
    type Item = Instruction;
    type IntoIter = std::vec::IntoIter<Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.into_iter()
    }
}

impl Extend<Instruction> for Script {
    fn extend<T: IntoIterator<Item = Instruction>>(&mut self, iter: T) {
        self.instructions.extend(iter);
    }
}
