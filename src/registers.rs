use crate::{memory::TypeAddr, PROGRAM_START};

pub const REGISTER_COUNT: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const FLAG_REGISTER: u8 = 0xF;

#[derive(Debug, Default)]
pub struct Registers {
    registers: [u8; REGISTER_COUNT],
}

impl Registers {
    pub fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
        }
    }

    pub fn set_register(&mut self, reg_num: u8, value: u8) {
        self.registers[reg_num as usize] = value;
    }

    pub fn add_to_register(&mut self, reg_num: u8, value: u8) {
        let reg = &mut self.registers[reg_num as usize];
        *reg = reg.wrapping_add(value);
    }

    pub fn get(&self, reg_num: u8) -> u8 {
        self.registers[reg_num as usize]
    }

    /// VF doubles as carry, borrow and collision flag.
    pub fn set_flag(&mut self, flag: bool) {
        self.set_register(FLAG_REGISTER, flag as u8);
    }

    pub fn flag(&self) -> u8 {
        self.get(FLAG_REGISTER)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.registers
    }

    pub fn clear(&mut self) {
        self.registers = [0; REGISTER_COUNT];
    }
}

// Special registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramCounter(pub TypeAddr);

impl Default for ProgramCounter {
    fn default() -> Self {
        Self(PROGRAM_START)
    }
}

impl ProgramCounter {
    pub fn advance(&mut self, delta: u16) {
        self.0 = self.0.wrapping_add(delta);
    }

    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndexRegister(pub TypeAddr);

impl IndexRegister {
    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }

    pub fn add(&mut self, offset: u8) {
        self.0 = self.0.wrapping_add(offset as u16);
    }
}

/// Fixed-depth call stack. Overflow and underflow can only come from a
/// malformed program, so both are fatal.
#[derive(Debug, Default)]
pub struct Stack {
    addresses: [TypeAddr; STACK_SIZE],
    sp: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            addresses: [0; STACK_SIZE],
            sp: 0,
        }
    }

    pub fn push(&mut self, addr: TypeAddr) {
        if self.sp >= STACK_SIZE {
            panic!("stack overflow: more than {STACK_SIZE} nested calls");
        }
        self.addresses[self.sp] = addr;
        self.sp += 1;
    }

    pub fn pop(&mut self) -> TypeAddr {
        if self.sp == 0 {
            panic!("stack underflow: return without a matching call");
        }
        self.sp -= 1;
        self.addresses[self.sp]
    }

    pub fn pointer(&self) -> usize {
        self.sp
    }

    /// Entries currently held, oldest first.
    pub fn frames(&self) -> &[TypeAddr] {
        &self.addresses[..self.sp]
    }

    pub fn clear(&mut self) {
        self.addresses = [0; STACK_SIZE];
        self.sp = 0;
    }
}
