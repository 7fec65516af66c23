/// Tunables of the interpreter.
mod config;
/// CHIP-8 constants.
mod constants;
/// Cursive display output.
pub mod cursive_display;
/// The framebuffer and the sprite compositor.
mod display;
/// Key states and the wait-for-key latch.
mod input;
/// Main memory and the charset.
mod memory;
/// Decoding of opcodes and their execution.
mod opcodes;
/// Source of the bytes for the random instruction.
mod random;
/// Register file and call stack.
mod registers;
/// Delay and sound timer.
mod timers;
/// Convenience functions for modification of the CHIP-8 state.
mod util;


use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, error, info, trace, warn};
use ux::u4;

pub use crate::chip::chip8::{
    config::Chip8Config,
    constants::{CHIP8_HEIGHT, CHIP8_TICKS_PER_FRAME, CHIP8_WIDTH},
    display::Framebuffer,
    opcodes::{AluOp, Flow, Instruction, LoadOp, Opcode},
    random::{RandomSource, ThreadRandom},
};

use crate::chip::{
    chip8::{
        constants::CHIP8_MAX_PROGRAM_SIZE, input::InputLatch, memory::Memory,
        registers::RegisterFile, timers::Timers,
    },
    Chip, ExecutionState, LoadProgramError, LoadReport, MachineFault,
};

/// Where the current program came from, so that it can be reloaded.
#[derive(Clone)]
enum ProgramSource {
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// Represents the state of the CHIP-8.
pub struct Chip8 {
    /// 4096 bytes of main memory, charset included
    memory: Memory,

    /// V0..VF, the index register, the program counter and the call stack
    registers: RegisterFile,

    /// The delay and sound timer. Both are decremented once per tick.
    timers: Timers,

    /// The 64x32 monochrome display.
    display: Framebuffer,

    /// The keys. A key is pressed as long as the host says so.
    input: InputLatch,

    /// Whether `tick` executes instructions.
    state: ExecutionState,

    config: Chip8Config,

    /// Feeds the random instruction.
    random: Box<dyn RandomSource>,

    /// The program to reload on reset.
    program: Option<ProgramSource>,

    /// The fault that stopped the machine, if any.
    last_fault: Option<MachineFault>,
}

impl Chip for Chip8 {
    /// Keys are numbered 0x0 to 0xF, hence a nibble addresses all of them.
    type KeyAddress = u4;

    fn load_program(&mut self, path: &Path) -> Result<LoadReport, LoadProgramError> {
        self.initialize();
        info!("Loading program {}", path.display());

        let program = read_program(path).map_err(|e| {
            error!("{}", e);
            e
        })?;
        self.program = Some(ProgramSource::File(path.to_path_buf()));
        Ok(self.copy_program(&program))
    }

    fn reset(&mut self) -> Result<LoadReport, LoadProgramError> {
        match self.program.clone() {
            Some(ProgramSource::File(path)) => self.load_program(&path),
            Some(ProgramSource::Bytes(program)) => Ok(self.load_program_bytes(&program)),
            None => {
                self.initialize();
                Err(LoadProgramError::NothingToReload)
            }
        }
    }

    fn tick(&mut self) {
        if self.state != ExecutionState::Running {
            return;
        }

        self.timers.decrement();

        for _ in 0..self.config.instructions_per_tick {
            match self.step() {
                Ok(Flow::Next) if self.state == ExecutionState::Running => {}
                _ => break,
            }
        }
    }

    fn framebuffer(&self) -> &[bool] {
        self.display.pixels()
    }

    fn status(&self) -> ExecutionState {
        self.state
    }

    fn set_key(&mut self, key: u4, pressed: bool) {
        if self.input.set(key, pressed) {
            debug!("Key {:X} satisfied the pending wait", u8::from(key));
            if self.state == ExecutionState::WaitingForKey {
                self.transition(ExecutionState::Running);
            }
        }
    }

    fn release_keys(&mut self) {
        self.input.release_all();
    }

    fn pause(&mut self) {
        if self.state == ExecutionState::Running {
            self.transition(ExecutionState::Paused);
        } else {
            debug!("Ignoring pause while {:?}", self.state);
        }
    }

    fn resume(&mut self) {
        if self.state == ExecutionState::Paused {
            self.transition(ExecutionState::Running);
        } else {
            debug!("Ignoring resume while {:?}", self.state);
        }
    }
}

impl Chip8 {
    /// Constructs a new CHIP-8 and appropriately initializes all fields so
    /// that it is ready for the first execution cycle: the program counter
    /// is set to 0x200 and the charset is loaded at address 0. No program
    /// is loaded and the machine is paused.
    pub fn new() -> Self {
        Chip8::with_config(Chip8Config::default())
    }

    pub fn with_config(config: Chip8Config) -> Self {
        Chip8 {
            memory: Memory::new(),
            registers: RegisterFile::new(),
            timers: Timers::new(),
            display: Framebuffer::new(),
            input: InputLatch::new(),
            state: ExecutionState::Paused,
            config,
            random: Box::new(ThreadRandom),
            program: None,
            last_fault: None,
        }
    }

    /// Replaces the source of the random instruction, e.g., with a seeded
    /// one for reproducible runs.
    pub fn with_random_source(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Puts memory, registers, stack, timers and display back into their
    /// initial state and pauses the machine. The configuration, the random
    /// source and the pressed keys are kept.
    pub fn initialize(&mut self) {
        self.memory = Memory::new();
        self.registers = RegisterFile::new();
        self.timers = Timers::new();
        self.display = Framebuffer::new();
        self.input.cancel_wait();
        self.last_fault = None;
        if self.state != ExecutionState::Paused {
            self.transition(ExecutionState::Paused);
        }
    }

    /// Re-initializes the chip and loads `program` from a slice. Everything
    /// past `CHIP8_MAX_PROGRAM_SIZE` bytes is dropped.
    pub fn load_program_bytes(&mut self, program: &[u8]) -> LoadReport {
        self.initialize();
        self.program = Some(ProgramSource::Bytes(program.to_vec()));
        self.copy_program(program)
    }

    /// Executes exactly one instruction regardless of the execution state:
    /// fetch, decode, execute, advance the program counter, and clamp the
    /// program counter and index register to 12 bits.
    pub fn step(&mut self) -> Result<Flow, MachineFault> {
        let opcode = self.next_instruction();
        let instruction = opcode.decode();
        trace!(
            "{:#05X}: {} {}",
            self.registers.program_counter,
            opcode,
            instruction
        );

        let result = instruction.execute(self);
        match result {
            Ok(Flow::Next) => util::increment_program_counter(self),
            Ok(Flow::Suspend) => self.transition(ExecutionState::WaitingForKey),
            Err(fault) => {
                error!("{}, pausing", fault);
                self.last_fault = Some(fault);
                self.transition(ExecutionState::Paused);
            }
        }
        self.registers.mask_addresses();
        result
    }

    pub fn display(&self) -> &Framebuffer {
        &self.display
    }

    /// Returns whether the framebuffer changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        self.display.take_dirty()
    }

    pub fn register(&self, reg: u4) -> u8 {
        self.registers.get(reg)
    }

    pub fn index(&self) -> u16 {
        self.registers.index
    }

    pub fn program_counter(&self) -> u16 {
        self.registers.program_counter
    }

    pub fn stack_depth(&self) -> usize {
        self.registers.stack.depth()
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay()
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound()
    }

    pub fn is_sounding(&self) -> bool {
        self.timers.is_sounding()
    }

    pub fn memory_byte(&self, address: u16) -> u8 {
        self.memory.read(address)
    }

    pub fn last_fault(&self) -> Option<MachineFault> {
        self.last_fault
    }

    pub fn config(&self) -> &Chip8Config {
        &self.config
    }

    /// Changes the configuration. Takes effect with the next tick.
    pub fn set_config(&mut self, config: Chip8Config) {
        self.config = config;
    }

    /// Fetches the instruction the program counter points to.
    fn next_instruction(&self) -> Opcode {
        let word = self.memory.read_word(self.registers.program_counter);
        Opcode::new(&word.to_be_bytes())
    }

    fn copy_program(&mut self, program: &[u8]) -> LoadReport {
        let bytes_loaded = self.memory.load_program(program);
        let truncated = program.len() > CHIP8_MAX_PROGRAM_SIZE;
        info!("{} bytes loaded", bytes_loaded);
        if truncated {
            warn!(
                "Program truncated to {:#X} bytes, {} bytes dropped",
                CHIP8_MAX_PROGRAM_SIZE,
                program.len() - bytes_loaded
            );
        }
        LoadReport {
            bytes_loaded,
            truncated,
        }
    }

    fn transition(&mut self, to: ExecutionState) {
        debug!("{:?} -> {:?}", self.state, to);
        self.state = to;
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Chip8::new()
    }
}

/// Reads at most one byte more than fits into memory, which is enough to
/// tell whether the program has to be truncated.
fn read_program(path: &Path) -> Result<Vec<u8>, LoadProgramError> {
    let file = File::open(path).map_err(|source| LoadProgramError::CouldNotOpenFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut program = Vec::with_capacity(CHIP8_MAX_PROGRAM_SIZE + 1);
    file.take(CHIP8_MAX_PROGRAM_SIZE as u64 + 1)
        .read_to_end(&mut program)
        .map_err(|source| LoadProgramError::CouldNotReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(program)
}
