// 16 8-bit data registers named V0 to VF
// I -> address register (12 bits used)
//
// Call stack of 16 return addresses
//
// Delay timer & Sound timer: count down at 60 times / s until 0
//
// Display res: 64 width, 32 height, stored 1 bit per pixel
//
// 35 opcodes, each are 2 bytes (big-endian)
//      NNN: address
//      KK: 8-bit constant
//      N: 4-bit constant
//      X and Y: 4-bit register identifier

pub mod decode;
pub mod disasm;
pub mod display;
pub mod emulator;
pub mod keyboard;
pub mod memory;
pub mod registers;
pub mod timer;
#[cfg(feature = "gui")]
pub mod window;

pub use decode::{Instruction, OpCode};
pub use disasm::Disassembler;
pub use display::FrameBuffer;
pub use emulator::Emulator;
pub use keyboard::{KeyMask, Keypad, NoKeys};
pub use memory::{LoadError, Memory};

pub const RAM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = RAM_SIZE - PROGRAM_START as usize;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
// in bytes, 1 pixel = 1 bit
pub const DISPLAY_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT / 8;

// Separately:
// CPU: 500 times per second
// Timer: 60 times per second
pub const CPU_FREQUENCY: f64 = 500.0;
pub const TIMER_FREQUENCY: f64 = 60.0;
