use log::debug;

use crate::mapper::{Mapper, MappedRead, PRG_BANK_SIZE};
use crate::rom::NametableMirroringMode;

/// Mapper 071 (Camerica BF909x): UxROM-style banking with the bank register at $C000-$FFFF, the
/// selected bank wrapped to the banks actually present. Boards that wire $9000-$9FFF use bit 4
/// there to pick a single-screen nametable.
#[derive(Debug, Clone)]
pub struct Mapper071 {
    prg_banks: usize,
    bank: usize,
    mirroring: Option<NametableMirroringMode>,
}

impl Mapper071 {
    pub fn new(prg_banks: usize) -> Mapper071 {
        Mapper071 {
            prg_banks,
            bank: 0,
            mirroring: None,
        }
    }
}

impl Mapper for Mapper071 {
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
        match addr {
            0x9000..=0x9FFF => {
                self.mirroring = Some(if data & 0x10 != 0 {
                    NametableMirroringMode::SingleScreenHigh
                } else {
                    NametableMirroringMode::SingleScreenLow
                });
            }
            0xC000..=0xFFFF => {
                self.bank = (data & 0x0F) as usize % self.prg_banks.max(1);
                debug!("mapper 071: PRG bank {} at $8000", self.bank);
            }
            _ => {}
        }
    }

    fn map_ppu_read(&self, addr: u16) -> usize {
        (addr & 0x1FFF) as usize
    }

    fn mirroring(&self) -> Option<NametableMirroringMode> {
        self.mirroring
    }
}
