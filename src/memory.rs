use std::{fs, io, path::Path, path::PathBuf};

use thiserror::Error;

use crate::{MAX_PROGRAM_SIZE, PROGRAM_START, RAM_SIZE};

pub type TypeAddr = u16; // in reality u12
type FontBytes = [u8; FONT_SPRITE_SIZE * 16];

pub const FONT_SPRITE_SIZE: usize = 5;

const DEFAULT_FONT: FontBytes = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program is too large ({size} bytes), max size is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("could not read program from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("program file {} is empty", path.display())]
    Empty { path: PathBuf },
}

pub struct Memory {
    // 4k bytes
    // font data stored from 000 -> 04F, program from 200 onwards
    bytes: [u8; RAM_SIZE],
    program_len: usize,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; RAM_SIZE];
        bytes[..DEFAULT_FONT.len()].copy_from_slice(&DEFAULT_FONT);
        Self {
            bytes,
            program_len: 0,
        }
    }

    // addresses wrap inside the 4k space
    pub fn set(&mut self, addr: TypeAddr, val: u8) {
        self.bytes[addr as usize % RAM_SIZE] = val;
    }

    pub fn get(&self, addr: TypeAddr) -> u8 {
        self.bytes[addr as usize % RAM_SIZE]
    }

    /// Big-endian instruction word at `addr`.
    pub fn word(&self, addr: TypeAddr) -> u16 {
        let (l, r) = (self.get(addr), self.get(addr.wrapping_add(1)));
        ((l as u16) << 8) | r as u16
    }

    pub fn program_len(&self) -> usize {
        self.program_len
    }

    /// First address past the loaded program.
    pub fn program_end(&self) -> usize {
        PROGRAM_START as usize + self.program_len
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    // loads program instructions starting at address 0x200
    pub fn load_rom(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }

        let start_index = PROGRAM_START as usize;
        self.bytes[start_index..start_index + program.len()].copy_from_slice(program);
        self.program_len = program.len();

        log::info!("loaded program ({} bytes)", program.len());
        Ok(())
    }

    pub fn load_rom_by_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        let program = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if program.is_empty() {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }
        self.load_rom(&program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_rom(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "chip8-vm-{}-{}.ch8",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_font_at_low_addresses() {
        let mem = Memory::new();
        assert_eq!(&mem.bytes[..5], &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(&mem.bytes[75..80], &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
        // everything else is zeroed
        assert!(mem.bytes[80..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_load_rom_at_program_start() {
        let mut mem = Memory::new();
        mem.load_rom(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
        assert_eq!(&mem.bytes[0x200..0x204], &[0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(mem.program_len(), 4);
        assert_eq!(mem.program_end(), 0x204);
        assert_eq!(mem.word(0x202), 0x1200);
    }

    #[test]
    fn test_load_rom_max_size() {
        let mut mem = Memory::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE];
        mem.load_rom(&program).unwrap();
        assert_eq!(mem.program_end(), RAM_SIZE);
        assert_eq!(mem.get(0xFFF), 0xAB);
    }

    #[test]
    fn test_load_rom_too_large_is_rejected() {
        let mut mem = Memory::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE + 1];
        let err = mem.load_rom(&program).unwrap_err();
        assert!(matches!(
            err,
            LoadError::TooLarge {
                size: 3585,
                max: 3584
            }
        ));
        // no partial effect
        assert_eq!(mem.program_len(), 0);
        assert!(mem.bytes[0x200..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_load_rom_by_file() {
        let path = temp_rom("ok", &[0x6A, 0x42]);
        let mut mem = Memory::new();
        mem.load_rom_by_file(&path).unwrap();
        assert_eq!(mem.word(0x200), 0x6A42);
        assert_eq!(mem.program_len(), 2);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_rom_by_file_empty() {
        let path = temp_rom("empty", &[]);
        let mut mem = Memory::new();
        let err = mem.load_rom_by_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
        assert_eq!(mem.program_len(), 0);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_rom_by_file_missing() {
        let mut mem = Memory::new();
        let err = mem
            .load_rom_by_file("/definitely/not/a/real/rom.ch8")
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(mem.program_len(), 0);
    }

    #[test]
    fn test_addresses_wrap() {
        let mut mem = Memory::new();
        mem.set(0x1000, 0x12);
        assert_eq!(mem.get(0x000), 0x12);
        assert_eq!(mem.get(0x1000), 0x12);
    }
}
