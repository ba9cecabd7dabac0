//! Mapper 001 (MMC1).
//!
//! The CPU programs the board one bit at a time: each write to $8000-$FFFF shifts bit 0 into a
//! 5-bit register, and the fifth write latches the value into the register selected by the
//! address of that write:
//!
//! | Address     | Register                                           |
//! |-------------|----------------------------------------------------|
//! | $8000-$9FFF | control: mirroring (0-1), PRG mode (2-3), CHR mode (4) |
//! | $A000-$BFFF | CHR bank 0                                         |
//! | $C000-$DFFF | CHR bank 1                                         |
//! | $E000-$FFFF | PRG bank                                           |
//!
//! A write with bit 7 set clears the shift register and forces PRG mode 3. The board also carries
//! 8 KiB of work RAM at $6000-$7FFF.

use log::debug;

use crate::mapper::{Mapper, MappedRead, PRG_BANK_SIZE};
use crate::rom::NametableMirroringMode;

const CHR_4K: usize = 4 * 1024;
const RAM_PAGE_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone)]
pub struct Mapper001 {
    prg_banks: usize,
    chr_banks: usize,
    shift: u8,
    shift_count: u8,
    control: u8,
    chr_bank0: u8,
    chr_bank1: u8,
    prg_bank: u8,
    ram: Vec<u8>,
}

impl Mapper001 {
    pub fn new(prg_banks: usize, chr_banks: usize, prg_ram_pages: usize) -> Mapper001 {
        Mapper001 {
            prg_banks,
            chr_banks,
            shift: 0,
            shift_count: 0,
            control: 0x0C,
            chr_bank0: 0,
            chr_bank1: 0,
            prg_bank: 0,
            ram: vec![0; prg_ram_pages.max(1) * RAM_PAGE_SIZE],
        }
    }

    fn prg_mode(&self) -> u8 {
        (self.control >> 2) & 0x03
    }

    fn chr_4k_mode(&self) -> bool {
        self.control & 0x10 != 0
    }

    fn latch(&mut self, addr: u16, value: u8) {
        match addr {
            0x8000..=0x9FFF => self.control = value,
            0xA000..=0xBFFF => self.chr_bank0 = value,
            0xC000..=0xDFFF => self.chr_bank1 = value,
            _ => self.prg_bank = value & 0x0F,
        }
        debug!(
            "mapper 001: control=${:02X} chr0=${:02X} chr1=${:02X} prg=${:02X}",
            self.control, self.chr_bank0, self.chr_bank1, self.prg_bank
        );
    }

    fn prg_offset(&self, bank: usize, addr: u16) -> usize {
        (bank % self.prg_banks.max(1)) * PRG_BANK_SIZE + (addr as usize & 0x3FFF)
    }
}

impl Mapper for Mapper001 {
    fn map_cpu_read(&self, addr: u16) -> MappedRead {
        let bank = self.prg_bank as usize;
        let last = self.prg_banks.saturating_sub(1);
        match addr {
            0x6000..=0x7FFF => MappedRead::Data(self.ram[(addr as usize - 0x6000) % self.ram.len()]),
            0x8000..=0xFFFF => {
                let high = addr >= 0xC000;
                let offset = match (self.prg_mode(), high) {
                    // 32 KiB mode ignores the low bit of the bank number.
                    (0, _) | (1, _) => self.prg_offset((bank & !1) | high as usize, addr),
                    (2, false) => self.prg_offset(0, addr),
                    (2, true) => self.prg_offset(bank, addr),
                    (_, false) => self.prg_offset(bank, addr),
                    (_, true) => self.prg_offset(last, addr),
                };
                MappedRead::Prg(offset)
            }
            _ => MappedRead::Open,
        }
    }

    fn map_cpu_write(&mut self, addr: u16, data: u8) {
        match addr {
            0x6000..=0x7FFF => {
                let len = self.ram.len();
                self.ram[(addr as usize - 0x6000) % len] = data;
            }
            0x8000..=0xFFFF => {
                if data & 0x80 != 0 {
                    self.shift = 0;
                    self.shift_count = 0;
                    self.control |= 0x0C;
                    return;
                }

                self.shift = (self.shift >> 1) | ((data & 0x01) << 4);
                self.shift_count += 1;
                if self.shift_count == 5 {
                    let value = self.shift & 0x1F;
                    self.shift = 0;
                    self.shift_count = 0;
                    self.latch(addr, value);
                }
            }
            _ => {}
        }
    }

    fn map_ppu_read(&self, addr: u16) -> usize {
        let addr = (addr & 0x1FFF) as usize;
        // CHR banks are counted in 4 KiB units here.
        let chr_units = (self.chr_banks * 2).max(2);
        if self.chr_4k_mode() {
            let (bank, offset) = if addr < CHR_4K {
                (self.chr_bank0 as usize, addr)
            } else {
                (self.chr_bank1 as usize, addr - CHR_4K)
            };
            (bank % chr_units) * CHR_4K + offset
        } else {
            let bank = (self.chr_bank0 as usize & !1) % chr_units;
            bank * CHR_4K + addr
        }
    }

    fn mirroring(&self) -> Option<NametableMirroringMode> {
        Some(match self.control & 0x03 {
            0 => NametableMirroringMode::SingleScreenLow,
            1 => NametableMirroringMode::SingleScreenHigh,
            2 => NametableMirroringMode::Vertical,
            _ => NametableMirroringMode::Horizontal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expectest::prelude::*;

    fn serial_write(mapper: &mut Mapper001, addr: u16, value: u8) {
        for bit in 0..5 {
            mapper.map_cpu_write(addr, (value >> bit) & 0x01);
        }
    }

    #[test]
    fn power_on_fixes_last_bank_high() {
        let mapper = Mapper001::new(8, 1, 1);
        expect!(mapper.map_cpu_read(0x8000)).to(be_eq(MappedRead::Prg(0)));
        expect!(mapper.map_cpu_read(0xC000)).to(be_eq(MappedRead::Prg(7 * PRG_BANK_SIZE)));
    }

    #[test]
    fn five_writes_latch_prg_bank() {
        let mut mapper = Mapper001::new(8, 1, 1);
        mapper.map_cpu_write(0xE000, 0x01);
        mapper.map_cpu_write(0xE000, 0x00);
        mapper.map_cpu_write(0xE000, 0x01);
        mapper.map_cpu_write(0xE000, 0x00);
        expect!(mapper.map_cpu_read(0x8000)).to(be_eq(MappedRead::Prg(0)));

        mapper.map_cpu_write(0xE000, 0x00);
        expect!(mapper.map_cpu_read(0x8000)).to(be_eq(MappedRead::Prg(5 * PRG_BANK_SIZE)));
    }

    #[test]
    fn reset_bit_discards_partial_value() {
        let mut mapper = Mapper001::new(8, 1, 1);
        mapper.map_cpu_write(0xE000, 0x01);
        mapper.map_cpu_write(0xE000, 0x01);
        mapper.map_cpu_write(0x8000, 0x80);
        serial_write(&mut mapper, 0xE000, 0x02);
        expect!(mapper.map_cpu_read(0x8000)).to(be_eq(MappedRead::Prg(2 * PRG_BANK_SIZE)));
    }

    #[test]
    fn prg_modes() {
        let mut mapper = Mapper001::new(8, 1, 1);
        serial_write(&mut mapper, 0xE000, 0x03);

        // 32 KiB: bank 3 rounds down to the pair 2/3.
        serial_write(&mut mapper, 0x8000, 0b0_00_10);
        expect!(mapper.map_cpu_read(0x8000)).to(be_eq(MappedRead::Prg(2 * PRG_BANK_SIZE)));
        expect!(mapper.map_cpu_read(0xC000)).to(be_eq(MappedRead::Prg(3 * PRG_BANK_SIZE)));

        // First bank fixed at $8000.
        serial_write(&mut mapper, 0x8000, 0b0_10_10);
        expect!(mapper.map_cpu_read(0x8000)).to(be_eq(MappedRead::Prg(0)));
        expect!(mapper.map_cpu_read(0xC000)).to(be_eq(MappedRead::Prg(3 * PRG_BANK_SIZE)));
    }

    #[test]
    fn chr_4k_and_8k_modes() {
        let mut mapper = Mapper001::new(2, 4, 1);
        serial_write(&mut mapper, 0xA000, 0x03);
        serial_write(&mut mapper, 0xC000, 0x05);

        expect!(mapper.map_ppu_read(0x0010)).to(be_eq(2 * CHR_4K + 0x10));

        serial_write(&mut mapper, 0x8000, 0b1_11_10);
        expect!(mapper.map_ppu_read(0x0010)).to(be_eq(3 * CHR_4K + 0x10));
        expect!(mapper.map_ppu_read(0x1010)).to(be_eq(5 * CHR_4K + 0x10));
    }

    #[test]
    fn mirroring_follows_control() {
        let mut mapper = Mapper001::new(2, 1, 1);
        serial_write(&mut mapper, 0x8000, 0b0_11_10);
        expect!(mapper.mirroring()).to(be_some().value(NametableMirroringMode::Vertical));
        serial_write(&mut mapper, 0x8000, 0b0_11_01);
        expect!(mapper.mirroring()).to(be_some().value(NametableMirroringMode::SingleScreenHigh));
    }

    #[test]
    fn work_ram() {
        let mut mapper = Mapper001::new(2, 1, 1);
        mapper.map_cpu_write(0x6123, 0x5A);
        expect!(mapper.map_cpu_read(0x6123)).to(be_eq(MappedRead::Data(0x5A)));
    }
}
