use log::debug;

use crate::mapper::{Mapper, MappedRead, PRG_BANK_SIZE};

/// Mapper 232 (Camerica Quattro): multicart boards split into 64 KiB blocks of four 16 KiB banks.
/// $8000-$BFFF selects the block (bits 3-4), $C000-$FFFF the bank inside it (bits 0-1). $C000
/// always shows the last bank of the current block.
#[derive(Debug, Clone)]
pub struct Mapper232 {
    prg_banks: usize,
    block: usize,
    bank: usize,
}

impl Mapper232 {
    pub fn new(prg_banks: usize) -> Mapper232 {
        Mapper232 {
            prg_banks,
            block: 0,
            bank: 0,
        }
    }

    fn offset(&self, bank: usize, addr: u16) -> usize {
        let bank = ((self.block << 2) | bank) % self.prg_banks.max(1);
        bank * PRG_BANK_SIZE + (addr as usize & 0x3FFF)
    }
}

impl Mapper for Mapper232 {
    fn map_cpu_read(&self, addr: u16) -> MappedRead {
        match addr {
            0x8000..=0xBFFF => MappedRead::Prg(self.offset(self.bank, addr)),
            0xC000..=0xFFFF => MappedRead::Prg(self.offset(3, addr)),
            _ => MappedRead::Open,
        }
    }

    fn map_cpu_write(&mut self, addr: u16, data: u8) {
        match addr {
            0x8000..=0xBFFF => self.block = ((data >> 3) & 0x03) as usize,
            0xC000..=0xFFFF => self.bank = (data & 0x03) as usize,
            _ => return,
        }
        debug!("mapper 232: block {} bank {}", self.block, self.bank);
    }

    fn map_ppu_read(&self, addr: u16) -> usize {
        (addr & 0x1FFF) as usize
    }
}
