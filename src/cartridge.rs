use std::fmt;
use std::path::Path;

use log::info;

use crate::bus::Device;
use crate::error::LoadError;
use crate::mapper::{self, MappedRead, Mapper, CHR_BANK_SIZE};
use crate::rom::{self, NametableMirroringMode, Rom};

/// A loaded game: PRG ROM, CHR ROM (or RAM) and the mapper that decides which banks are visible.
///
/// The cartridge sits on the CPU bus at $4020-$FFFF and is also read by the PPU for pattern data.
pub struct Cartridge {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    mirroring: NametableMirroringMode,
    mapper_id: u8,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    /// Build a cartridge from a parsed image. Fails for mapper numbers this crate does not know.
    pub fn from_rom(rom: Rom) -> Result<Cartridge, LoadError> {
        let header = rom.header;
        let mapper = mapper::for_id(header.mapper, header.prg_rom_size, header.chr_rom_size, header.prg_ram_size)?;

        let chr_is_ram = rom.chr_rom.is_empty();
        let chr = if chr_is_ram { vec![0; CHR_BANK_SIZE] } else { rom.chr_rom };

        info!(
            "cartridge: mapper {:03}, {} x 16 KiB PRG, {} x 8 KiB CHR{}, {:?} mirroring",
            header.mapper,
            header.prg_rom_size,
            header.chr_rom_size,
            if chr_is_ram { " (RAM)" } else { "" },
            header.nametable_mirror_mode
        );

        Ok(Cartridge {
            prg_rom: rom.prg_rom,
            chr,
            chr_is_ram,
            mirroring: header.nametable_mirror_mode,
            mapper_id: header.mapper,
            mapper,
        })
    }

    /// Read and parse an iNES file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Cartridge, LoadError> {
        Cartridge::from_rom(rom::read_rom(path)?)
    }

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    /// Nametable mirroring currently in effect. Mappers that switch mirroring override the header.
    pub fn mirroring(&self) -> NametableMirroringMode {
        self.mapper.mirroring().unwrap_or(self.mirroring)
    }

    /// Read a byte from the pattern tables ($0000-$1FFF of PPU space).
    pub fn ppu_read(&self, addr: u16) -> u8 {
        let offset = self.mapper.map_ppu_read(addr);
        self.chr[offset % self.chr.len()]
    }

    /// Write to the pattern tables. Only boards with CHR RAM accept the write.
    pub fn ppu_write(&mut self, addr: u16, data: u8) {
        if self.chr_is_ram {
            let offset = self.mapper.map_ppu_read(addr) % self.chr.len();
            self.chr[offset] = data;
        }
    }

    /// The two bit planes of one row of a tile: `(low, high)`. `half` picks the pattern table
    /// (0 for $0000, 1 for $1000).
    pub fn get_tile_data(&self, tile: u8, row: u8, half: u8) -> (u8, u8) {
        let addr = (half as u16 & 1) * 0x1000 + tile as u16 * 16 + (row as u16 & 0x07);
        (self.ppu_read(addr), self.ppu_read(addr + 8))
    }
}

impl Device for Cartridge {
    fn is_address_valid(&self, addr: u16) -> bool {
        addr >= 0x4020
    }

    fn read(&mut self, addr: u16) -> u8 {
        match self.mapper.map_cpu_read(addr) {
            MappedRead::Prg(offset) if !self.prg_rom.is_empty() => self.prg_rom[offset % self.prg_rom.len()],
            MappedRead::Data(data) => data,
            _ => 0,
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.mapper.map_cpu_write(addr, data);
    }
}

impl fmt::Debug for Cartridge {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("Cartridge")
            .field("mapper", &self.mapper_id)
            .field("prg_rom", &self.prg_rom.len())
            .field("chr", &self.chr.len())
            .field("chr_is_ram", &self.chr_is_ram)
            .field("mirroring", &self.mirroring())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::{INESHeader, SystemType};
    use expectest::prelude::*;

    fn rom(mapper: u8, prg_banks: usize, chr_banks: usize) -> Rom {
        let mut prg_rom = vec![0; prg_banks * 0x4000];
        for (bank, chunk) in prg_rom.chunks_mut(0x4000).enumerate() {
            chunk[0] = bank as u8;
        }
        let mut chr_rom = vec![0; chr_banks * CHR_BANK_SIZE];
        if chr_banks > 0 {
            chr_rom[0x1000 + 0x20 * 16 + 3] = 0xAA;
            chr_rom[0x1000 + 0x20 * 16 + 3 + 8] = 0x55;
        }
        Rom {
            header: INESHeader {
                prg_rom_size: prg_banks,
                chr_rom_size: chr_banks,
                nametable_mirror_mode: NametableMirroringMode::Vertical,
                trainer_exists: false,
                battery_backed: false,
                mapper,
                system_type: SystemType::NES,
                prg_ram_size: 1,
            },
            prg_rom,
            chr_rom,
        }
    }

    #[test]
    fn prg_reads_follow_the_mapper() {
        let mut cart = Cartridge::from_rom(rom(2, 4, 0)).unwrap();
        expect!(cart.read(0x8000)).to(be_eq(0));
        expect!(cart.read(0xC000)).to(be_eq(3));

        cart.write(0x8000, 2);
        expect!(cart.read(0x8000)).to(be_eq(2));
    }

    #[test]
    fn open_bus_reads_zero() {
        let mut cart = Cartridge::from_rom(rom(0, 1, 1)).unwrap();
        expect!(cart.read(0x5000)).to(be_eq(0));
    }

    #[test]
    fn tile_rows() {
        let cart = Cartridge::from_rom(rom(0, 1, 1)).unwrap();
        expect!(cart.get_tile_data(0x20, 3, 1)).to(be_eq((0xAA, 0x55)));
        expect!(cart.get_tile_data(0x20, 3, 0)).to(be_eq((0x00, 0x00)));
    }

    #[test]
    fn chr_ram_is_writable_chr_rom_is_not() {
        let mut ram_cart = Cartridge::from_rom(rom(0, 1, 0)).unwrap();
        ram_cart.ppu_write(0x0123, 0x77);
        expect!(ram_cart.ppu_read(0x0123)).to(be_eq(0x77));

        let mut rom_cart = Cartridge::from_rom(rom(0, 1, 1)).unwrap();
        rom_cart.ppu_write(0x0123, 0x77);
        expect!(rom_cart.ppu_read(0x0123)).to(be_eq(0x00));
    }

    #[test]
    fn mapper_mirroring_overrides_header() {
        let mut cart = Cartridge::from_rom(rom(71, 4, 0)).unwrap();
        expect!(cart.mirroring()).to(be_eq(NametableMirroringMode::Vertical));
        cart.write(0x9000, 0x00);
        expect!(cart.mirroring()).to(be_eq(NametableMirroringMode::SingleScreenLow));
    }

    #[test]
    fn unknown_mapper_fails_to_load() {
        expect!(Cartridge::from_rom(rom(9, 1, 1)).is_err()).to(be_true());
    }
}
