use log::debug;

use crate::mapper::{Mapper, MappedRead, PRG_BANK_SIZE};

/// Mapper 002 (UxROM): a switchable 16 KiB bank at $8000 and the last bank fixed at $C000. Any
/// write to $8000-$FFFF selects the low bank. CHR is a single fixed 8 KiB bank, usually RAM.
#[derive(Debug, Clone)]
pub struct Mapper002 {
    prg_banks: usize,
    bank: usize,
}

impl Mapper002 {
    pub fn new(prg_banks: usize) -> Mapper002 {
        Mapper002 { prg_banks, bank: 0 }
    }
}

impl Mapper for Mapper002 {
    fn map_cpu_read(&self, addr: u16) -> MappedRead {
        match addr {
            0x8000..=0xBFFF => MappedRead::Prg(self.bank * PRG_BANK_SIZE + (addr as usize & 0x3FFF)),
            0xC000..=0xFFFF => {
                let last = self.prg_banks.saturating_sub(1);
                MappedRead::Prg(last * PRG_BANK_SIZE + (addr as usize & 0x3FFF))
            }
            _ => MappedRead::Open,
        }
    }

    fn map_cpu_write(&mut self, addr: u16, data: u8) {
        if addr >= 0x8000 {
            self.bank = (data & 0x0F) as usize;
            debug!("mapper 002: PRG bank {} at $8000", self.bank);
        }
    }

    fn map_ppu_read(&self, addr: u16) -> usize {
        (addr & 0x1FFF) as usize
    }
}
