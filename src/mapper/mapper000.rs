use crate::mapper::{Mapper, MappedRead};

/// Mapper 000 (NROM): 16 or 32 KiB of PRG at $8000 with no banking. A 16 KiB image is mirrored
/// into $C000-$FFFF.
#[derive(Debug, Clone)]
pub struct Mapper000 {
    prg_banks: usize,
}

impl Mapper000 {
    pub fn new(prg_banks: usize) -> Mapper000 {
        Mapper000 { prg_banks }
    }
}

impl Mapper for Mapper000 {
    fn map_cpu_read(&self, addr: u16) -> MappedRead {
        match addr {
            0x8000..=0xFFFF => {
                let mask = if self.prg_banks > 1 { 0x7FFF } else { 0x3FFF };
                MappedRead::Prg((addr as usize) & mask)
            }
            _ => MappedRead::Open,
        }
    }

    fn map_cpu_write(&mut self, _addr: u16, _data: u8) {}

    fn map_ppu_read(&self, addr: u16) -> usize {
        (addr & 0x1FFF) as usize
    }
}
