//! Cartridge mappers: address translators from CPU/PPU address windows onto the physical PRG and
//! CHR banks of a cartridge.
//!
//! A mapper never holds ROM itself. It answers "which byte of PRG/CHR sits behind this address"
//! given its current bank registers, and it traps CPU writes into its register range.

use crate::error::LoadError;
use crate::rom::NametableMirroringMode;

pub mod mapper000;
pub mod mapper001;
pub mod mapper002;
pub mod mapper071;
pub mod mapper232;

pub use mapper000::Mapper000;
pub use mapper001::Mapper001;
pub use mapper002::Mapper002;
pub use mapper071::Mapper071;
pub use mapper232::Mapper232;

pub const PRG_BANK_SIZE: usize = 16 * 1024;
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// Result of translating a CPU read in the cartridge window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedRead {
    /// Offset into PRG ROM.
    Prg(usize),
    /// The mapper answered directly (on-board RAM).
    Data(u8),
    /// Nothing drives the bus here.
    Open,
}

/// A cartridge mapper.
pub trait Mapper {
    /// Translate a CPU read in $4020-$FFFF.
    fn map_cpu_read(&self, addr: u16) -> MappedRead;

    /// Handle a CPU write in $4020-$FFFF. Writes into ROM space update bank registers; they
    /// never modify ROM.
    fn map_cpu_write(&mut self, addr: u16, data: u8);

    /// Translate a PPU pattern-table address ($0000-$1FFF) into a CHR offset.
    fn map_ppu_read(&self, addr: u16) -> usize;

    /// Mirroring selected by the mapper, if it controls mirroring at all.
    fn mirroring(&self) -> Option<NametableMirroringMode> {
        None
    }
}

/// Build the mapper for an iNES mapper number. `chr_banks` of 0 means 8 KiB of CHR RAM.
pub fn for_id(id: u8, prg_banks: usize, chr_banks: usize, prg_ram_pages: usize) -> Result<Box<dyn Mapper>, LoadError> {
    let chr_banks = chr_banks.max(1);
    let mapper: Box<dyn Mapper> = match id {
        0 => Box::new(Mapper000::new(prg_banks)),
        1 => Box::new(Mapper001::new(prg_banks, chr_banks, prg_ram_pages)),
        2 => Box::new(Mapper002::new(prg_banks)),
        71 => Box::new(Mapper071::new(prg_banks)),
        232 => Box::new(Mapper232::new(prg_banks)),
        _ => return Err(LoadError::UnsupportedMapper(id)),
    };
    Ok(mapper)
}
