use std::fs;
use std::path::Path;

use log::info;
use nom::{
    IResult,
    bits::{
        bits,
        streaming::take as take_bits,
    },
    bytes::complete::{tag, take},
    combinator::map_opt,
    number::complete::be_u8,
    sequence::pair,
};

use crate::error::LoadError;
use crate::rom::model::*;

pub const KILOBYTE_SIZE: usize = 1024;
pub const HEADER_SIZE: usize = 16;
pub const TRAINER_SIZE: usize = 512;
pub const PRG_ROM_PAGE_SIZE: usize = 16 * KILOBYTE_SIZE;
pub const CHR_ROM_PAGE_SIZE: usize = 8 * KILOBYTE_SIZE;
pub const PRG_RAM_PAGE_SIZE: usize = 8 * KILOBYTE_SIZE;

bitflags! {
    struct Flags6: u8 {
        const VERTICAL_MIRRORING = 1 as u8;
        const BATTERY_BACKED_RAM = (1 << 1) as u8;
        const TRAINER_EXISTS = (1 << 2) as u8;
        const FOUR_SCREEN_MIRRORING = (1 << 3) as u8;
    }
}

impl Into<NametableMirroringMode> for Flags6 {
    fn into(self) -> NametableMirroringMode {
        if self.contains(Flags6::FOUR_SCREEN_MIRRORING) {
            NametableMirroringMode::FourScreen
        } else if self.contains(Flags6::VERTICAL_MIRRORING) {
            NametableMirroringMode::Vertical
        } else {
            NametableMirroringMode::Horizontal
        }
    }
}

bitflags! {
    struct Flags7: u8 {
        const VS_UNISYSTEM = 1 as u8;
        const PLAYCHOICE_10 = (1 << 1) as u8;
        // Bits 2-3 read 0b10 in an NES 2.0 header.
        const NES2_LOW = (1 << 2) as u8;
        const NES2_HIGH = (1 << 3) as u8;
    }
}

impl Into<SystemType> for Flags7 {
    fn into(self) -> SystemType {
        if self.contains(Flags7::NES2_HIGH) && !self.contains(Flags7::NES2_LOW) {
            SystemType::NES2
        } else if self.contains(Flags7::VS_UNISYSTEM) {
            SystemType::VSUnisystem
        } else if self.contains(Flags7::PLAYCHOICE_10) {
            SystemType::PlayChoice10
        } else {
            SystemType::NES
        }
    }
}

/// Split a flags byte into its high nibble (a mapper nibble in both flag bytes) and its low nibble
/// of flag bits.
fn parse_flag_bits<T>(input: &[u8], from_bits_fn: fn(u8) -> Option<T>) -> IResult<&[u8], (u8, T)> {
    bits(pair(
        take_bits::<_, _, _, (_, _)>(4usize),
        map_opt(take_bits::<_, _, _, (_, _)>(4usize), from_bits_fn)
    ))(input)
}

fn parse_ines_header(input: &[u8]) -> IResult<&[u8], INESHeader> {
    let (i, _) = tag(&b"NES\x1A"[..])(input)?;
    let (i, prg_page_count) = be_u8(i)?;
    let (i, chr_page_count) = be_u8(i)?;
    let (i, (mapper_lo, flags6)) = parse_flag_bits(i, Flags6::from_bits)?;
    let (i, (mapper_hi, flags7)) = parse_flag_bits(i, |b| Some(Flags7::from_bits_truncate(b)))?;
    let (i, prg_ram_size) = be_u8(i)?;
    let (i, _) = take(3usize)(i)?;
    let (i, padding) = take(4usize)(i)?;

    // Old dumping tools left signature strings in bytes 7-15. When the tail of the header is not
    // blank, byte 7 can't be trusted, so the upper mapper nibble is dropped.
    let archaic = padding.iter().any(|b| *b != 0);
    let mapper = if archaic { mapper_lo } else { (mapper_hi << 4) | mapper_lo };

    Ok((i, INESHeader {
        prg_rom_size: prg_page_count as usize,
        chr_rom_size: chr_page_count as usize,
        nametable_mirror_mode: flags6.into(),
        trainer_exists: flags6.contains(Flags6::TRAINER_EXISTS),
        battery_backed: flags6.contains(Flags6::BATTERY_BACKED_RAM),
        mapper,
        system_type: if archaic { SystemType::NES } else { flags7.into() },
        // A zero here still means one 8 KiB page.
        prg_ram_size: (prg_ram_size as usize).max(1),
    }))
}

fn section<'a>(data: &'a [u8], start: usize, len: usize, name: &'static str) -> Result<&'a [u8], LoadError> {
    let available = data.len().saturating_sub(start);
    if available < len {
        return Err(LoadError::Truncated { section: name, expected: len, actual: available });
    }
    Ok(&data[start..start + len])
}

/// Parse a complete iNES image held in memory.
pub fn parse_rom(data: &[u8]) -> Result<Rom, LoadError> {
    let header = match parse_ines_header(data) {
        Ok((_, header)) => header,
        Err(_) => return Err(LoadError::InvalidHeader),
    };

    let mut offset = HEADER_SIZE;
    if header.trainer_exists {
        section(data, offset, TRAINER_SIZE, "trainer")?;
        offset += TRAINER_SIZE;
    }

    let prg_len = header.prg_rom_size * PRG_ROM_PAGE_SIZE;
    let prg_rom = section(data, offset, prg_len, "PRG ROM")?.to_vec();
    offset += prg_len;

    let chr_len = header.chr_rom_size * CHR_ROM_PAGE_SIZE;
    let chr_rom = section(data, offset, chr_len, "CHR ROM")?.to_vec();

    Ok(Rom { header, prg_rom, chr_rom })
}

/// Read and parse an iNES image from disk.
pub fn read_rom<P: AsRef<Path>>(path: P) -> Result<Rom, LoadError> {
    let data = fs::read(path.as_ref())?;
    let rom = parse_rom(&data)?;
    info!(
        "loaded {}: mapper {:03}, {} x 16 KiB PRG, {} x 8 KiB CHR, {:?} mirroring, {:?}",
        path.as_ref().display(),
        rom.header.mapper,
        rom.header.prg_rom_size,
        rom.header.chr_rom_size,
        rom.header.nametable_mirror_mode,
        rom.header.system_type,
    );
    Ok(rom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use expectest::prelude::*;

    fn header_bytes(flags6: u8, flags7: u8) -> Vec<u8> {
        vec![
            0x4E, 0x45, 0x53, 0x1A, // NES<EOF>
            0x01, // Number of pages in PRG ROM
            0x01, // Number of pages in CHR ROM
            flags6,
            flags7,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ]
    }

    #[test]
    fn header() {
        // Master reference: https://wiki.nesdev.com/w/index.php/INES
        let data = vec![
            0x4E, // N
            0x45, // E
            0x53, // S
            0x1A, // <EOF>
            0x02, // Number of pages in PRG ROM (8-bit integer)
            0x01, // Number of pages in CHR ROM (8-bit integer)
            0b00110011, // Mirroring (0+3), PRG RAM flag (1), trainer flag (2), Mapper low (4..7)
            0b01000000, // System type (0..4), Mapper high (4..7)
            0x00, // Number of pages in PRG RAM (8-bit integer)
            0x00, // TV system
            0x00, // TV system, PRG RAM presence, bus conflicts
            0x00, // unused padding
            0x00, // unused padding
            0x00, // unused padding
            0x00, // unused padding
            0x00, // unused padding
        ];

        let rom = match parse_ines_header(&data[0..16]) {
            IResult::Ok((_, rom)) => rom,
            _ => panic!("Failed to parse!"),
        };

        expect!(rom.prg_rom_size).to(be_eq(2));
        expect!(rom.chr_rom_size).to(be_eq(1));
        expect!(rom.nametable_mirror_mode).to(be_eq(NametableMirroringMode::Vertical));
        expect!(rom.trainer_exists).to(be_false());
        expect!(rom.battery_backed).to(be_true());
        expect!(rom.mapper).to(be_eq(0x43));
        expect!(rom.system_type).to(be_eq(SystemType::NES));
        expect!(rom.prg_ram_size).to(be_eq(1));
    }

    #[test]
    fn nes2_is_identified() {
        let data = header_bytes(0x00, 0b0000_1000);
        let (_, header) = parse_ines_header(&data).unwrap();
        expect!(header.system_type).to(be_eq(SystemType::NES2));
    }

    #[test]
    fn archaic_header_drops_upper_mapper_nibble() {
        let mut data = header_bytes(0x10, 0x40);
        data[12..16].copy_from_slice(b"Dude");
        let (_, header) = parse_ines_header(&data).unwrap();
        expect!(header.mapper).to(be_eq(0x01));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = header_bytes(0, 0);
        data[0] = b'X';
        expect!(parse_rom(&data).is_err()).to(be_true());
    }

    #[test]
    fn skips_trainer_and_splits_sections() {
        let mut data = header_bytes(0b0000_0100, 0);
        data.extend(vec![0xEE; TRAINER_SIZE]);
        data.extend(vec![0x11; PRG_ROM_PAGE_SIZE]);
        data.extend(vec![0x22; CHR_ROM_PAGE_SIZE]);

        let rom = parse_rom(&data).unwrap();
        expect!(rom.prg_rom.len()).to(be_eq(PRG_ROM_PAGE_SIZE));
        expect!(rom.prg_rom[0]).to(be_eq(0x11));
        expect!(rom.chr_rom.len()).to(be_eq(CHR_ROM_PAGE_SIZE));
        expect!(rom.chr_rom[0]).to(be_eq(0x22));
    }

    #[test]
    fn truncated_prg_is_reported() {
        let mut data = header_bytes(0, 0);
        data.extend(vec![0; 100]);

        match parse_rom(&data) {
            Err(LoadError::Truncated { section, expected, actual }) => {
                expect!(section).to(be_eq("PRG ROM"));
                expect!(expected).to(be_eq(PRG_ROM_PAGE_SIZE));
                expect!(actual).to(be_eq(100));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
