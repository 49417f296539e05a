use crate::memory::TypeAddr;

/// The instruction kinds understood by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    // 00E0
    // turn all pixels to 0
    ClearScreen,
    // 00EE
    PopSubroutine,

    // 1NNN
    // set PC to address NNN, "jump" to memory location
    Jump,
    // 2NNN
    PushSubroutine,
    // BNNN
    JumpWithOffset,

    // 3XKK
    SkipEqualConstant,
    // 4XKK
    SkipNotEqualConstant,
    // 5XY0
    SkipEqualRegister,
    // 9XY0
    SkipNotEqualRegister,
    // EX9E
    SkipIfPressed,
    // EXA1
    SkipIfNotPressed,

    // 6XKK
    SetRegister,
    // 7XKK
    // add KK to VX, no carry
    AddToRegister,
    // ANNN
    SetIndexRegister,
    // CXKK
    Random,

    // 8XY0
    CopyRegister,
    // 8XY1
    Or,
    // 8XY2
    And,
    // 8XY3
    XOr,
    // 8XY4
    Add,
    // 8XY5
    SubtractForward,
    // 8XY6
    RightShift,
    // 8XY7
    SubtractBackward,
    // 8XYE
    LeftShift,

    // DXYN
    // draw an N pixel tall sprite starting at I
    // at Coordinates (VX, VY)
    // XOR pixels on screen using sprite data
    // if pixels on screen were switched OFF: VF set to 1
    Display,

    // FX07
    CopyDelayToRegister,
    // FX0A
    GetKey,
    // FX15
    CopyRegisterToDelay,
    // FX18
    CopyRegisterToSound,
    // FX1E
    AddToIndex,
    // FX29
    PointChar,
    // FX33
    ToDecimal,
    // FX55
    StoreRegisterToMemory,
    // FX65
    LoadRegisterFromMemory,

    Unknown,
}

impl OpCode {
    pub fn decode_raw(ins: u16) -> Self {
        let (high, low) = ((ins >> 8) as u8, ins as u8);

        match high >> 4 {
            0x0 => match ins & 0x0FFF {
                0x0E0 => Self::ClearScreen,
                0x0EE => Self::PopSubroutine,
                _ => Self::Unknown,
            },
            0x1 => Self::Jump,
            0x2 => Self::PushSubroutine,
            0x3 => Self::SkipEqualConstant,
            0x4 => Self::SkipNotEqualConstant,
            0x5 => Self::SkipEqualRegister,
            0x6 => Self::SetRegister,
            0x7 => Self::AddToRegister,
            0x8 => match low & 0x0F {
                0x0 => Self::CopyRegister,
                0x1 => Self::Or,
                0x2 => Self::And,
                0x3 => Self::XOr,
                0x4 => Self::Add,
                0x5 => Self::SubtractForward,
                0x6 => Self::RightShift,
                0x7 => Self::SubtractBackward,
                0xE => Self::LeftShift,
                _ => Self::Unknown,
            },
            0x9 => Self::SkipNotEqualRegister,
            0xA => Self::SetIndexRegister,
            0xB => Self::JumpWithOffset,
            0xC => Self::Random,
            0xD => Self::Display,
            0xE => match low {
                0x9E => Self::SkipIfPressed,
                0xA1 => Self::SkipIfNotPressed,
                _ => Self::Unknown,
            },
            0xF => match low {
                0x07 => Self::CopyDelayToRegister,
                0x0A => Self::GetKey,
                0x15 => Self::CopyRegisterToDelay,
                0x18 => Self::CopyRegisterToSound,
                0x1E => Self::AddToIndex,
                0x29 => Self::PointChar,
                0x33 => Self::ToDecimal,
                0x55 => Self::StoreRegisterToMemory,
                0x65 => Self::LoadRegisterFromMemory,
                _ => Self::Unknown,
            },
            _ => Self::Unknown,
        }
    }
}

/// A decoded instruction: its kind plus the low 12 bits of the word, which
/// carry the operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: OpCode,
    pub payload: u16,
}

impl Instruction {
    pub fn new(op: OpCode, payload: u16) -> Self {
        Self {
            op,
            payload: payload & 0x0FFF,
        }
    }

    pub fn decode(high: u8, low: u8) -> Self {
        let ins = ((high as u16) << 8) | low as u16;
        Self::new(OpCode::decode_raw(ins), ins)
    }

    // n is starting digit of the payload, m is length
    //
    //      1100 1111 0001
    //      --------------
    //      1111 1111 1111  n = 1, m = 3
    //           1111 1111  n = 2, m = 2
    //                1111  n = 3, m = 1
    fn nth_m_digits(&self, n: u8, m: u8) -> u16 {
        let shift_places = (3 - m - (n - 1)) * 4;
        let mask = (1u16 << (m * 4)) - 1;
        (self.payload >> shift_places) & mask
    }

    pub fn x(&self) -> u8 {
        self.nth_m_digits(1, 1) as u8
    }

    pub fn y(&self) -> u8 {
        self.nth_m_digits(2, 1) as u8
    }

    pub fn byte(&self) -> u8 {
        self.nth_m_digits(2, 2) as u8
    }

    pub fn nibble(&self) -> u8 {
        self.nth_m_digits(3, 1) as u8
    }

    pub fn addr(&self) -> TypeAddr {
        self.nth_m_digits(1, 3)
    }
}
