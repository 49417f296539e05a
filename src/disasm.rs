use std::fmt;

use crate::{
    decode::{Instruction, OpCode},
    memory::{Memory, TypeAddr},
    PROGRAM_START,
};

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = (self.x(), self.y());
        match self.op {
            OpCode::ClearScreen => write!(f, "CLS"),
            OpCode::PopSubroutine => write!(f, "RET"),
            OpCode::Jump => write!(f, "JP {:#X}", self.addr()),
            OpCode::PushSubroutine => write!(f, "CALL {:#X}", self.addr()),
            OpCode::JumpWithOffset => write!(f, "JP V0, {:#X}", self.addr()),
            OpCode::SkipEqualConstant => write!(f, "SE V{x:X}, {:#X}", self.byte()),
            OpCode::SkipNotEqualConstant => write!(f, "SNE V{x:X}, {:#X}", self.byte()),
            OpCode::SkipEqualRegister => write!(f, "SE V{x:X}, V{y:X}"),
            OpCode::SkipNotEqualRegister => write!(f, "SNE V{x:X}, V{y:X}"),
            OpCode::SkipIfPressed => write!(f, "SKP V{x:X}"),
            OpCode::SkipIfNotPressed => write!(f, "SKNP V{x:X}"),
            OpCode::SetRegister => write!(f, "LD V{x:X}, {:#X}", self.byte()),
            OpCode::AddToRegister => write!(f, "ADD V{x:X}, {:#X}", self.byte()),
            OpCode::SetIndexRegister => write!(f, "LD I, {:#X}", self.addr()),
            OpCode::Random => write!(f, "RND V{x:X}, {:#X}", self.byte()),
            OpCode::CopyRegister => write!(f, "LD V{x:X}, V{y:X}"),
            OpCode::Or => write!(f, "OR V{x:X}, V{y:X}"),
            OpCode::And => write!(f, "AND V{x:X}, V{y:X}"),
            OpCode::XOr => write!(f, "XOR V{x:X}, V{y:X}"),
            OpCode::Add => write!(f, "ADD V{x:X}, V{y:X}"),
            OpCode::SubtractForward => write!(f, "SUB V{x:X}, V{y:X}"),
            OpCode::RightShift => write!(f, "SHR V{x:X} {{, V{y:X}}}"),
            OpCode::SubtractBackward => write!(f, "SUBN V{x:X}, V{y:X}"),
            OpCode::LeftShift => write!(f, "SHL V{x:X} {{, V{y:X}}}"),
            OpCode::Display => write!(f, "DRW V{x:X}, V{y:X}, {:#X}", self.nibble()),
            OpCode::CopyDelayToRegister => write!(f, "LD V{x:X}, DT"),
            OpCode::GetKey => write!(f, "LD V{x:X}, K"),
            OpCode::CopyRegisterToDelay => write!(f, "LD DT, V{x:X}"),
            OpCode::CopyRegisterToSound => write!(f, "LD ST, V{x:X}"),
            OpCode::AddToIndex => write!(f, "ADD I, V{x:X}"),
            OpCode::PointChar => write!(f, "LD F, V{x:X}"),
            OpCode::ToDecimal => write!(f, "LD B, V{x:X}"),
            OpCode::StoreRegisterToMemory => write!(f, "LD [I], V{x:X}"),
            OpCode::LoadRegisterFromMemory => write!(f, "LD V{x:X}, [I]"),
            OpCode::Unknown => write!(f, "NOP"),
        }
    }
}

/// Walks the loaded program two bytes at a time, yielding each address with
/// the instruction found there.
pub struct Disassembler<'a> {
    mem: &'a Memory,
    addr: TypeAddr,
}

impl<'a> Disassembler<'a> {
    pub fn new(mem: &'a Memory) -> Self {
        Self {
            mem,
            addr: PROGRAM_START,
        }
    }
}

impl Iterator for Disassembler<'_> {
    type Item = (TypeAddr, Instruction);

    fn next(&mut self) -> Option<Self::Item> {
        if self.addr as usize >= self.mem.program_end() {
            return None;
        }
        let addr = self.addr;
        let word = self.mem.word(addr);
        self.addr += 2;
        Some((addr, Instruction::decode((word >> 8) as u8, word as u8)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mnemonic(word: u16) -> String {
        Instruction::decode((word >> 8) as u8, word as u8).to_string()
    }

    #[test]
    fn test_mnemonics() {
        let cases = [
            (0x00E0, "CLS"),
            (0x00EE, "RET"),
            (0x12E0, "JP 0x2E0"),
            (0x2ABC, "CALL 0xABC"),
            (0x3A05, "SE VA, 0x5"),
            (0x4BFF, "SNE VB, 0xFF"),
            (0x5120, "SE V1, V2"),
            (0x6C42, "LD VC, 0x42"),
            (0x7101, "ADD V1, 0x1"),
            (0x8120, "LD V1, V2"),
            (0x8121, "OR V1, V2"),
            (0x8122, "AND V1, V2"),
            (0x8123, "XOR V1, V2"),
            (0x8124, "ADD V1, V2"),
            (0x8125, "SUB V1, V2"),
            (0x8126, "SHR V1 {, V2}"),
            (0x8127, "SUBN V1, V2"),
            (0x812E, "SHL V1 {, V2}"),
            (0x9120, "SNE V1, V2"),
            (0xA250, "LD I, 0x250"),
            (0xB300, "JP V0, 0x300"),
            (0xC10F, "RND V1, 0xF"),
            (0xD125, "DRW V1, V2, 0x5"),
            (0xE09E, "SKP V0"),
            (0xE0A1, "SKNP V0"),
            (0xF307, "LD V3, DT"),
            (0xF30A, "LD V3, K"),
            (0xF315, "LD DT, V3"),
            (0xF318, "LD ST, V3"),
            (0xF31E, "ADD I, V3"),
            (0xF329, "LD F, V3"),
            (0xF333, "LD B, V3"),
            (0xF355, "LD [I], V3"),
            (0xF365, "LD V3, [I]"),
            (0xFB12, "NOP"),
            (0x0123, "NOP"),
        ];
        for (word, expected) in cases {
            assert_eq!(mnemonic(word), expected, "{word:04X}");
        }
    }

    #[test]
    fn test_disassembler_walks_program() {
        let mut mem = Memory::new();
        mem.load_rom(&[0x00, 0xE0, 0xA2, 0x50, 0xD1, 0x25]).unwrap();
        let lines: Vec<(u16, String)> = Disassembler::new(&mem)
            .map(|(addr, ins)| (addr, ins.to_string()))
            .collect();
        assert_eq!(
            lines,
            [
                (0x200, "CLS".to_string()),
                (0x202, "LD I, 0x250".to_string()),
                (0x204, "DRW V1, V2, 0x5".to_string()),
            ]
        );
    }

    #[test]
    fn test_disassembler_odd_length_covers_last_byte() {
        let mut mem = Memory::new();
        mem.load_rom(&[0x12, 0x00, 0x60]).unwrap();
        let addrs: Vec<u16> = Disassembler::new(&mem).map(|(addr, _)| addr).collect();
        assert_eq!(addrs, [0x200, 0x202]);
    }

    #[test]
    fn test_disassembler_empty_memory() {
        let mem = Memory::new();
        assert_eq!(Disassembler::new(&mem).count(), 0);
    }
}
