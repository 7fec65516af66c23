mod arithmetic_and_logic;
mod program_flow;
mod system;

use std::fmt;

use ux::{u12, u4};

use crate::chip::{chip8::Chip8, MachineFault};

/// Represents a CHIP-8 opcode. A CHIP-8 opcode is two bytes long and
/// stored big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// The instruction class is the most significant nibble of the opcode.
    instruction_class: u8,
    /// The payload constitutes the remaining nibbles of the opcode.
    payload: OpcodePayload,
}

/// Represents the payload of a CHIP-8 opcode. That is the opcode without
/// the most significant nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpcodePayload {
    /// The nibbles representing the payload. Each u8 only ever holds a
    /// value in range 0x0 - 0xF.
    bytes: [u8; 3],
}

impl OpcodePayload {
    /// The X field: second nibble of the opcode.
    fn x(&self) -> u4 {
        u4::new(self.bytes[0])
    }

    /// The Y field: third nibble of the opcode.
    fn y(&self) -> u4 {
        u4::new(self.bytes[1])
    }

    /// The N field: least significant nibble of the opcode.
    fn n(&self) -> u4 {
        u4::new(self.bytes[2])
    }

    /// The KK field: least significant byte of the opcode.
    fn kk(&self) -> u8 {
        (self.bytes[1] << 4) | self.bytes[2]
    }

    /// The NNN field: the whole payload read as an address.
    fn nnn(&self) -> u12 {
        u12::new((self.bytes[0] as u16) << 8 | (self.bytes[1] as u16) << 4 | self.bytes[2] as u16)
    }
}

impl Opcode {
    /// Constructs a new `Opcode` given its byte representation.
    pub fn new(opcode: &[u8; 2]) -> Opcode {
        Opcode {
            instruction_class: opcode[0] >> 4,
            payload: OpcodePayload {
                bytes: [opcode[0] & 0xF, opcode[1] >> 4, opcode[1] & 0xF],
            },
        }
    }

    pub fn word(&self) -> u16 {
        (self.instruction_class as u16) << 12
            | (self.payload.bytes[0] as u16) << 8
            | (self.payload.bytes[1] as u16) << 4
            | self.payload.bytes[2] as u16
    }

    /// Maps the opcode to its instruction. The instruction class selects
    /// the instruction, except for the classes 0x0, 0xE and 0xF, which
    /// select on KK, and class 0x8, which selects on N.
    pub fn decode(&self) -> Instruction {
        let p = &self.payload;
        match self.instruction_class {
            0x0 => match p.kk() {
                0xE0 => Instruction::Cls,
                0xEE => Instruction::Ret,
                _ => Instruction::Unknown(self.word()),
            },
            0x1 => Instruction::Jmp { address: p.nnn() },
            0x2 => Instruction::Call { address: p.nnn() },
            0x3 => Instruction::Se { x: p.x(), value: p.kk() },
            0x4 => Instruction::Sne { x: p.x(), value: p.kk() },
            0x5 => Instruction::Sre { x: p.x(), y: p.y() },
            0x6 => Instruction::Ldr { x: p.x(), value: p.kk() },
            0x7 => Instruction::Add { x: p.x(), value: p.kk() },
            0x8 => {
                let op = match p.bytes[2] {
                    0x0 => AluOp::Copy,
                    0x1 => AluOp::Or,
                    0x2 => AluOp::And,
                    0x3 => AluOp::Xor,
                    0x4 => AluOp::Add,
                    0x5 => AluOp::Sub,
                    0x6 => AluOp::Shr,
                    0x7 => AluOp::Subn,
                    0xE => AluOp::Shl,
                    _ => return Instruction::Unknown(self.word()),
                };
                Instruction::Reg {
                    op,
                    x: p.x(),
                    y: p.y(),
                }
            }
            0x9 => Instruction::Srne { x: p.x(), y: p.y() },
            0xA => Instruction::Ld { address: p.nnn() },
            0xB => Instruction::Jmpr { address: p.nnn() },
            0xC => Instruction::Rnd { x: p.x(), mask: p.kk() },
            0xD => Instruction::Drw {
                x: p.x(),
                y: p.y(),
                rows: p.n(),
            },
            0xE => match p.kk() {
                0x9E => Instruction::Skp { x: p.x() },
                0xA1 => Instruction::Sknp { x: p.x() },
                _ => Instruction::Unknown(self.word()),
            },
            _ => {
                let op = match p.kk() {
                    0x07 => LoadOp::ReadDelay,
                    0x0A => LoadOp::WaitKey,
                    0x15 => LoadOp::SetDelay,
                    0x18 => LoadOp::SetSound,
                    0x1E => LoadOp::AddIndex,
                    0x29 => LoadOp::Glyph,
                    0x33 => LoadOp::Bcd,
                    0x55 => LoadOp::Store,
                    0x65 => LoadOp::Load,
                    _ => return Instruction::Unknown(self.word()),
                };
                Instruction::Ldu { op, x: p.x() }
            }
        }
    }
}

/// A decoded instruction. The variants carry the operand fields their
/// instruction uses; `x` and `y` name registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0: clear the display.
    Cls,
    /// 00EE: return from a subroutine.
    Ret,
    /// 1nnn: jump to nnn.
    Jmp { address: u12 },
    /// 2nnn: call the subroutine at nnn.
    Call { address: u12 },
    /// 3xkk: skip the next instruction if Vx == kk.
    Se { x: u4, value: u8 },
    /// 4xkk: skip the next instruction if Vx != kk.
    Sne { x: u4, value: u8 },
    /// 5xy0: skip the next instruction if Vx == Vy.
    Sre { x: u4, y: u4 },
    /// 6xkk: Vx := kk.
    Ldr { x: u4, value: u8 },
    /// 7xkk: Vx := Vx + kk, without touching VF.
    Add { x: u4, value: u8 },
    /// 8xy_: register to register arithmetic and logic.
    Reg { op: AluOp, x: u4, y: u4 },
    /// 9xy0: skip the next instruction if Vx != Vy.
    Srne { x: u4, y: u4 },
    /// Annn: I := nnn.
    Ld { address: u12 },
    /// Bnnn: jump to nnn + V0.
    Jmpr { address: u12 },
    /// Cxkk: Vx := random byte & kk.
    Rnd { x: u4, mask: u8 },
    /// Dxyn: draw the n byte sprite at I to (Vx, Vy).
    Drw { x: u4, y: u4, rows: u4 },
    /// Ex9E: skip the next instruction if key Vx is pressed.
    Skp { x: u4 },
    /// ExA1: skip the next instruction if key Vx is not pressed.
    Sknp { x: u4 },
    /// Fx__: timers, keyboard, index register and memory transfers.
    Ldu { op: LoadOp, x: u4 },
    /// Any word that matches none of the above.
    Unknown(u16),
}

/// The operations of class 0x8, selected by N.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Copy,
    Or,
    And,
    Xor,
    Add,
    Sub,
    Shr,
    Subn,
    Shl,
}

/// The operations of class 0xF, selected by KK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOp {
    /// Fx07: Vx := DT.
    ReadDelay,
    /// Fx0A: Vx := next key press.
    WaitKey,
    /// Fx15: DT := Vx.
    SetDelay,
    /// Fx18: ST := Vx.
    SetSound,
    /// Fx1E: I := I + Vx.
    AddIndex,
    /// Fx29: I := address of the glyph for Vx.
    Glyph,
    /// Fx33: BCD of Vx to I, I+1, I+2.
    Bcd,
    /// Fx55: V0..=Vx to memory at I.
    Store,
    /// Fx65: memory at I to V0..=Vx.
    Load,
}

/// How the step continues after an instruction executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Advance the program counter to the next instruction.
    Next,
    /// Leave the program counter on this instruction and stop executing
    /// until a key is pressed.
    Suspend,
}

impl Instruction {
    /// Executes `self` relative to the given state. Note that this method
    /// in-place modifies the given state but never advances the program
    /// counter past the instruction itself; that is left to the caller.
    pub(super) fn execute(&self, state: &mut Chip8) -> Result<Flow, MachineFault> {
        match *self {
            Instruction::Cls | Instruction::Ret | Instruction::Unknown(_) => {
                system::execute(self, state)
            }
            Instruction::Jmp { .. }
            | Instruction::Call { .. }
            | Instruction::Se { .. }
            | Instruction::Sne { .. }
            | Instruction::Sre { .. }
            | Instruction::Srne { .. }
            | Instruction::Jmpr { .. }
            | Instruction::Skp { .. }
            | Instruction::Sknp { .. } => program_flow::execute(self, state),
            Instruction::Ldr { .. }
            | Instruction::Add { .. }
            | Instruction::Reg { .. }
            | Instruction::Ld { .. }
            | Instruction::Rnd { .. }
            | Instruction::Drw { .. }
            | Instruction::Ldu { .. } => arithmetic_and_logic::execute(self, state),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04X}", self.word())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn r(reg: u4) -> u8 {
            u8::from(reg)
        }

        match *self {
            Instruction::Cls => write!(f, "CLS"),
            Instruction::Ret => write!(f, "RET"),
            Instruction::Jmp { address } => write!(f, "JP {:#05X}", u16::from(address)),
            Instruction::Call { address } => write!(f, "CALL {:#05X}", u16::from(address)),
            Instruction::Se { x, value } => write!(f, "SE V{:X}, {:#04X}", r(x), value),
            Instruction::Sne { x, value } => write!(f, "SNE V{:X}, {:#04X}", r(x), value),
            Instruction::Sre { x, y } => write!(f, "SE V{:X}, V{:X}", r(x), r(y)),
            Instruction::Ldr { x, value } => write!(f, "LD V{:X}, {:#04X}", r(x), value),
            Instruction::Add { x, value } => write!(f, "ADD V{:X}, {:#04X}", r(x), value),
            Instruction::Reg { op, x, y } => {
                let mnemonic = match op {
                    AluOp::Copy => "LD",
                    AluOp::Or => "OR",
                    AluOp::And => "AND",
                    AluOp::Xor => "XOR",
                    AluOp::Add => "ADD",
                    AluOp::Sub => "SUB",
                    AluOp::Shr => "SHR",
                    AluOp::Subn => "SUBN",
                    AluOp::Shl => "SHL",
                };
                write!(f, "{} V{:X}, V{:X}", mnemonic, r(x), r(y))
            }
            Instruction::Srne { x, y } => write!(f, "SNE V{:X}, V{:X}", r(x), r(y)),
            Instruction::Ld { address } => write!(f, "LD I, {:#05X}", u16::from(address)),
            Instruction::Jmpr { address } => write!(f, "JP V0, {:#05X}", u16::from(address)),
            Instruction::Rnd { x, mask } => write!(f, "RND V{:X}, {:#04X}", r(x), mask),
            Instruction::Drw { x, y, rows } => {
                write!(f, "DRW V{:X}, V{:X}, {}", r(x), r(y), r(rows))
            }
            Instruction::Skp { x } => write!(f, "SKP V{:X}", r(x)),
            Instruction::Sknp { x } => write!(f, "SKNP V{:X}", r(x)),
            Instruction::Ldu { op, x } => match op {
                LoadOp::ReadDelay => write!(f, "LD V{:X}, DT", r(x)),
                LoadOp::WaitKey => write!(f, "LD V{:X}, K", r(x)),
                LoadOp::SetDelay => write!(f, "LD DT, V{:X}", r(x)),
                LoadOp::SetSound => write!(f, "LD ST, V{:X}", r(x)),
                LoadOp::AddIndex => write!(f, "ADD I, V{:X}", r(x)),
                LoadOp::Glyph => write!(f, "LD F, V{:X}", r(x)),
                LoadOp::Bcd => write!(f, "LD B, V{:X}", r(x)),
                LoadOp::Store => write!(f, "LD [I], V{:X}", r(x)),
                LoadOp::Load => write!(f, "LD V{:X}, [I]", r(x)),
            },
            Instruction::Unknown(word) => write!(f, "DW {:#06X}", word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(word: u16) -> Instruction {
        Opcode::new(&word.to_be_bytes()).decode()
    }

    #[test]
    fn test_fields() {
        let opcode = Opcode::new(&[0xD1, 0x2F]);
        assert_eq!(opcode.word(), 0xD12F);
        assert_eq!(opcode.payload.x(), u4::new(0x1));
        assert_eq!(opcode.payload.y(), u4::new(0x2));
        assert_eq!(opcode.payload.n(), u4::new(0xF));
        assert_eq!(opcode.payload.kk(), 0x2F);
        assert_eq!(opcode.payload.nnn(), u12::new(0x12F));
    }

    #[test]
    fn test_decode_primary_classes() {
        assert_eq!(decode(0x1CAF), Instruction::Jmp { address: u12::new(0xCAF) });
        assert_eq!(decode(0x2CAF), Instruction::Call { address: u12::new(0xCAF) });
        assert_eq!(
            decode(0x34AF),
            Instruction::Se {
                x: u4::new(4),
                value: 0xAF
            }
        );
        assert_eq!(
            decode(0xC1F0),
            Instruction::Rnd {
                x: u4::new(1),
                mask: 0xF0
            }
        );
        assert_eq!(
            decode(0xD125),
            Instruction::Drw {
                x: u4::new(1),
                y: u4::new(2),
                rows: u4::new(5)
            }
        );
    }

    #[test]
    fn test_decode_secondary_selection() {
        assert_eq!(decode(0x00E0), Instruction::Cls);
        assert_eq!(decode(0x00EE), Instruction::Ret);
        // class 0 only looks at KK
        assert_eq!(decode(0x03E0), Instruction::Cls);
        assert_eq!(
            decode(0x8124),
            Instruction::Reg {
                op: AluOp::Add,
                x: u4::new(1),
                y: u4::new(2)
            }
        );
        assert_eq!(
            decode(0x812E),
            Instruction::Reg {
                op: AluOp::Shl,
                x: u4::new(1),
                y: u4::new(2)
            }
        );
        assert_eq!(decode(0xE39E), Instruction::Skp { x: u4::new(3) });
        assert_eq!(
            decode(0xF50A),
            Instruction::Ldu {
                op: LoadOp::WaitKey,
                x: u4::new(5)
            }
        );
    }

    #[test]
    fn test_decode_unknown() {
        for word in &[0x0000, 0x0123, 0x8008, 0x800F, 0xE000, 0xF0FF, 0xF000] {
            assert_eq!(decode(*word), Instruction::Unknown(*word));
        }
    }

    #[test]
    fn test_disassembly() {
        assert_eq!(decode(0x8124).to_string(), "ADD V1, V2");
        assert_eq!(decode(0xA2F0).to_string(), "LD I, 0x2F0");
        assert_eq!(decode(0xF233).to_string(), "LD B, V2");
        assert_eq!(decode(0x0123).to_string(), "DW 0x0123");
    }
}
