use std::path::Path;

use rand::Rng;

use crate::{
    decode::{Instruction, OpCode},
    display::FrameBuffer,
    keyboard::{KeyMask, Keypad, NoKeys},
    memory::{LoadError, Memory, FONT_SPRITE_SIZE},
    registers::{IndexRegister, ProgramCounter, Registers, Stack},
    timer::{Timer, TimerClock},
    PROGRAM_START,
};

// how far to move the program counter after a handler returns
const STAY: u16 = 0;
const NEXT: u16 = 2;
const SKIP: u16 = 4;

/// The whole machine state. Each instance is independent; the keypad is the
/// only outside collaborator and is polled synchronously.
pub struct Emulator<K = NoKeys> {
    pub fb: FrameBuffer,
    pub regs: Registers,
    pub mem: Memory,
    pub pc: ProgramCounter,
    pub index: IndexRegister,
    pub stack: Stack,
    pub delay_timer: Timer,
    pub sound_timer: Timer,
    clock: TimerClock,
    keypad: K,
}

impl Emulator<NoKeys> {
    /// A machine that never sees a key press.
    pub fn new() -> Self {
        Self::init(NoKeys)
    }
}

impl Default for Emulator<NoKeys> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Keypad> Emulator<K> {
    pub fn init(keypad: K) -> Self {
        Self {
            fb: FrameBuffer::new(),
            regs: Registers::new(),
            mem: Memory::new(),
            pc: ProgramCounter(PROGRAM_START),
            index: IndexRegister(0),
            stack: Stack::new(),
            delay_timer: Timer::new(0),
            sound_timer: Timer::new(0),
            clock: TimerClock::new(),
            keypad,
        }
    }

    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.mem.load_rom(program)
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        self.mem.load_rom_by_file(path)
    }

    /// Clears registers, stack, screen and timers and goes back to the
    /// program start. The loaded program stays in memory.
    pub fn reset(&mut self) {
        self.regs.clear();
        self.stack.clear();
        self.fb.clear_buffer();
        self.delay_timer.set(0);
        self.sound_timer.set(0);
        self.index.set_addr(0);
        self.pc.set_addr(PROGRAM_START);
        self.clock.reset();
        log::info!("machine reset");
    }

    /// Decodes the instruction at PC, or `None` once PC has run past the end
    /// of the loaded program.
    pub fn fetch_decode(&self) -> Option<Instruction> {
        let pc = self.pc.0;
        if pc as usize >= self.mem.program_end() {
            return None;
        }
        Some(Instruction::decode(self.mem.get(pc), self.mem.get(pc + 1)))
    }

    /// Runs one instruction and steps the timers. Returns the new PC, or
    /// `None` when the program has ended.
    pub fn tick(&mut self) -> Option<u16> {
        let ins = self.fetch_decode()?;
        log::debug!("{:03x}: {:?} {:03x}", self.pc.0, ins.op, ins.payload);

        let delta = self.execute_ins(ins);
        self.pc.advance(delta);
        self.sync_timers();

        Some(self.pc.0)
    }

    fn sync_timers(&mut self) {
        if self.clock.sync() {
            self.delay_timer.decrement();
            self.sound_timer.decrement();
            log::trace!(
                "timers: delay={} sound={}",
                self.delay_timer.count,
                self.sound_timer.count
            );
        }
    }

    pub fn pixel(&self, pos: usize) -> u8 {
        self.fb.pixel(pos)
    }

    pub fn should_play_tone(&self) -> bool {
        self.sound_timer.is_active()
    }

    /// Executes `ins` against the machine and returns how many bytes PC
    /// should move: 0 when the handler set PC itself (or is waiting for a
    /// key), 2 for the next instruction, 4 to skip one.
    pub fn execute_ins(&mut self, ins: Instruction) -> u16 {
        let (vx, vy) = (ins.x(), ins.y());
        match ins.op {
            OpCode::ClearScreen => {
                self.fb.clear_buffer();
                NEXT
            }
            OpCode::PopSubroutine => {
                // the saved address is the call itself, so step past it
                let addr = self.stack.pop();
                self.pc.set_addr(addr);
                NEXT
            }
            OpCode::Jump => {
                self.pc.set_addr(ins.addr());
                STAY
            }
            OpCode::PushSubroutine => {
                self.stack.push(self.pc.0);
                self.pc.set_addr(ins.addr());
                STAY
            }
            OpCode::JumpWithOffset => {
                self.pc.set_addr(ins.addr() + self.regs.get(0) as u16);
                STAY
            }
            OpCode::SkipEqualConstant => skip_if(self.regs.get(vx) == ins.byte()),
            OpCode::SkipNotEqualConstant => skip_if(self.regs.get(vx) != ins.byte()),
            OpCode::SkipEqualRegister => skip_if(self.regs.get(vx) == self.regs.get(vy)),
            OpCode::SkipNotEqualRegister => skip_if(self.regs.get(vx) != self.regs.get(vy)),
            OpCode::SkipIfPressed => skip_if(self.is_key_down(vx)),
            OpCode::SkipIfNotPressed => skip_if(!self.is_key_down(vx)),
            OpCode::SetRegister => {
                self.regs.set_register(vx, ins.byte());
                NEXT
            }
            OpCode::AddToRegister => {
                self.regs.add_to_register(vx, ins.byte());
                NEXT
            }
            OpCode::SetIndexRegister => {
                self.index.set_addr(ins.addr());
                NEXT
            }
            OpCode::Random => {
                let ransuu: u8 = rand::thread_rng().gen();
                self.regs.set_register(vx, ins.byte() & ransuu);
                NEXT
            }
            OpCode::CopyRegister => {
                self.regs.set_register(vx, self.regs.get(vy));
                NEXT
            }
            OpCode::Or => {
                self.regs
                    .set_register(vx, self.regs.get(vx) | self.regs.get(vy));
                NEXT
            }
            OpCode::And => {
                self.regs
                    .set_register(vx, self.regs.get(vx) & self.regs.get(vy));
                NEXT
            }
            OpCode::XOr => {
                self.regs
                    .set_register(vx, self.regs.get(vx) ^ self.regs.get(vy));
                NEXT
            }
            OpCode::Add => {
                let (sum, carry) = self.regs.get(vx).overflowing_add(self.regs.get(vy));
                self.regs.set_register(vx, sum);
                self.regs.set_flag(carry);
                NEXT
            }
            OpCode::SubtractForward => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_register(vx, x.wrapping_sub(y));
                self.regs.set_flag(x > y);
                NEXT
            }
            OpCode::SubtractBackward => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_register(vx, y.wrapping_sub(x));
                self.regs.set_flag(y > x);
                NEXT
            }
            // Vy is ignored by both shifts
            OpCode::RightShift => {
                let vx_value = self.regs.get(vx);
                self.regs.set_register(vx, vx_value >> 1);
                self.regs.set_flag(vx_value & 1 == 1);
                NEXT
            }
            OpCode::LeftShift => {
                let vx_value = self.regs.get(vx);
                self.regs.set_register(vx, vx_value << 1);
                self.regs.set_flag(vx_value >> 7 == 1);
                NEXT
            }
            OpCode::Display => {
                self.draw(vx, vy, ins.nibble());
                NEXT
            }
            OpCode::CopyDelayToRegister => {
                self.regs.set_register(vx, self.delay_timer.count);
                NEXT
            }
            OpCode::GetKey => self.wait_for_key(vx),
            OpCode::CopyRegisterToDelay => {
                self.delay_timer.set(self.regs.get(vx));
                NEXT
            }
            OpCode::CopyRegisterToSound => {
                self.sound_timer.set(self.regs.get(vx));
                NEXT
            }
            OpCode::AddToIndex => {
                self.index.add(self.regs.get(vx));
                NEXT
            }
            OpCode::PointChar => {
                let digit = (self.regs.get(vx) & 0xF) as u16;
                self.index.set_addr(digit * FONT_SPRITE_SIZE as u16);
                NEXT
            }
            OpCode::ToDecimal => {
                let value = self.regs.get(vx);
                let i = self.index.0;
                self.mem.set(i, value / 100);
                self.mem.set(i.wrapping_add(1), value / 10 % 10);
                self.mem.set(i.wrapping_add(2), value % 10);
                NEXT
            }
            OpCode::StoreRegisterToMemory => {
                for reg in 0..=vx {
                    let reg_val = self.regs.get(reg);
                    self.mem.set(self.index.0.wrapping_add(reg as u16), reg_val);
                }
                NEXT
            }
            OpCode::LoadRegisterFromMemory => {
                for reg in 0..=vx {
                    let reg_val = self.mem.get(self.index.0.wrapping_add(reg as u16));
                    self.regs.set_register(reg, reg_val);
                }
                NEXT
            }
            OpCode::Unknown => {
                log::debug!("unknown opcode, payload {:03x} at {:03x}", ins.payload, self.pc.0);
                STAY
            }
        }
    }

    // From I to I + N, plot each row at VX, VY
    fn draw(&mut self, reg_x: u8, reg_y: u8, height: u8) {
        let (x, y) = (self.regs.get(reg_x), self.regs.get(reg_y));
        let sprite: Vec<u8> = (0..height as u16)
            .map(|row| self.mem.get(self.index.0.wrapping_add(row)))
            .collect();

        let vf = self.fb.paint(x, y, &sprite);
        self.regs.set_flag(vf);
    }

    fn is_key_down(&mut self, reg: u8) -> bool {
        let keys = KeyMask(self.keypad.pressed_keys());
        keys.is_down(self.regs.get(reg))
    }

    // PC stays put until a key shows up
    fn wait_for_key(&mut self, reg: u8) -> u16 {
        match KeyMask(self.keypad.pressed_keys()).lowest_pressed() {
            Some(key) => {
                self.regs.set_register(reg, key);
                NEXT
            }
            None => STAY,
        }
    }
}

fn skip_if(cond: bool) -> u16 {
    if cond {
        SKIP
    } else {
        NEXT
    }
}
