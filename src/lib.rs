//! A CHIP-8 interpreter. The core implements the 35 instructions of the CHIP-8
//! instruction set, described [here](https://en.wikipedia.org/wiki/CHIP-8#Opcode_table),
//! and a tick based execution controller that a host drives at its frame
//! rate. The terminal front end draws with the cursive text user interface
//! library.
pub mod chip;
