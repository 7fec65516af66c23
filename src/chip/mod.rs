pub mod chip8;

use std::io;
use std::path::{Path, PathBuf};

use cursive::CbSink;
use thiserror::Error;

/// The interface a host (a GUI, a terminal front end, a test harness)
/// uses to drive an emulated chip. The host owns frame pacing: it calls
/// `tick` once per frame and reads the framebuffer after `tick` returned.
pub trait Chip {
    /// Type used to address a key.
    type KeyAddress;

    /// Re-initializes the chip and loads the program at `path`. The chip is
    /// paused afterwards, also if loading failed.
    fn load_program(&mut self, path: &Path) -> Result<LoadReport, LoadProgramError>;

    /// Loads the most recently loaded program again.
    fn reset(&mut self) -> Result<LoadReport, LoadProgramError>;

    /// Runs one execution quantum. Does nothing unless the chip is running.
    fn tick(&mut self);

    /// Read only view of the pixels, row-major.
    fn framebuffer(&self) -> &[bool];

    fn status(&self) -> ExecutionState;

    fn set_key(&mut self, key: Self::KeyAddress, pressed: bool);

    fn release_keys(&mut self);

    fn pause(&mut self);

    fn resume(&mut self);

    /// Switches between running and paused. A chip waiting for a key stays
    /// waiting.
    fn toggle(&mut self) {
        match self.status() {
            ExecutionState::Running => self.pause(),
            ExecutionState::Paused => self.resume(),
            ExecutionState::WaitingForKey => {}
        }
    }
}

/// A chip that knows how to push its framebuffer to a cursive UI.
pub trait ChipWithCursiveDisplay {
    /// Sends a fresh display to `gfx_sink` if the framebuffer changed.
    fn update_ui(&mut self, gfx_sink: &CbSink);
}

/// The states of the execution controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Paused,
    Running,
    /// Suspended on a wait-for-key instruction until a key is pressed.
    WaitingForKey,
}

/// Outcome of a successful program load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of bytes copied into memory.
    pub bytes_loaded: usize,

    /// Whether the program was larger than the available memory and got cut.
    pub truncated: bool,
}

/// Errors that occur while loading a program.
#[derive(Debug, Error)]
pub enum LoadProgramError {
    #[error("Could not open program file {}: {source}", .path.display())]
    CouldNotOpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read program file {}: {source}", .path.display())]
    CouldNotReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No program has been loaded that could be reloaded.")]
    NothingToReload,
}

/// Conditions that stop the machine. The faulting instruction is not
/// executed and the program counter keeps pointing at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MachineFault {
    #[error("Call stack overflow at {address:#05X}")]
    StackOverflow { address: u16 },

    #[error("Return with empty call stack at {address:#05X}")]
    StackUnderflow { address: u16 },
}
