mod common;

use std::fs;

use expectest::prelude::*;
use rustic_nes::bus::Device;
use rustic_nes::rom::{parse_rom, NametableMirroringMode};
use rustic_nes::{Cartridge, LoadError};

use common::ines_image;

fn cartridge(mapper: u8, prg_banks: usize, chr_banks: usize) -> Cartridge {
    Cartridge::from_rom(parse_rom(&ines_image(mapper, prg_banks, chr_banks)).unwrap()).unwrap()
}

fn mmc1_write(cart: &mut Cartridge, addr: u16, value: u8) {
    for bit in 0..5 {
        cart.write(addr, (value >> bit) & 0x01);
    }
}

#[test]
fn nrom_mirrors_a_single_bank() {
    let mut cart = cartridge(0, 1, 1);
    expect!(cart.mapper_id()).to(be_eq(0));
    expect!(cart.read(0x8000)).to(be_eq(0));
    expect!(cart.read(0xC000)).to(be_eq(0));
}

#[test]
fn uxrom_switches_the_low_window() {
    let mut cart = cartridge(2, 8, 0);
    cart.write(0x8000, 0x05);
    expect!(cart.read(0x8000)).to(be_eq(5));
    expect!(cart.read(0xC000)).to(be_eq(7));
}

#[test]
fn mmc1_serial_protocol_through_the_bus_interface() {
    let mut cart = cartridge(1, 8, 2);
    mmc1_write(&mut cart, 0xE000, 0x04);
    expect!(cart.read(0x8000)).to(be_eq(4));
    expect!(cart.read(0xC000)).to(be_eq(7));

    // 4 KiB CHR mode, CHR bank 0 = 4 KiB page 3 (second half of 8 KiB bank 1).
    mmc1_write(&mut cart, 0x8000, 0b1_11_11);
    mmc1_write(&mut cart, 0xA000, 0x03);
    expect!(cart.ppu_read(0x0000)).to(be_eq(1));
    expect!(cart.mirroring()).to(be_eq(NametableMirroringMode::Horizontal));

    cart.write(0x6000, 0x99);
    expect!(cart.read(0x6000)).to(be_eq(0x99));
}

#[test]
fn camerica_bank_select_wraps() {
    let mut cart = cartridge(71, 4, 0);
    cart.write(0xC000, 0x05);
    expect!(cart.read(0x8000)).to(be_eq(1));
    expect!(cart.read(0xC000)).to(be_eq(3));
}

#[test]
fn quattro_outer_and_inner_banks() {
    let mut cart = cartridge(232, 16, 0);
    cart.write(0x8000, 0x18);
    cart.write(0xC000, 0x02);
    expect!(cart.read(0x8000)).to(be_eq(14));
    expect!(cart.read(0xC000)).to(be_eq(15));
}

#[test]
fn chr_ram_when_no_chr_banks() {
    let mut cart = cartridge(2, 2, 0);
    cart.ppu_write(0x1FFF, 0x42);
    expect!(cart.ppu_read(0x1FFF)).to(be_eq(0x42));
}

#[test]
fn unsupported_mapper_is_a_load_error() {
    let result = Cartridge::from_rom(parse_rom(&ines_image(4, 2, 1)).unwrap());
    match result {
        Err(LoadError::UnsupportedMapper(id)) => {
            expect!(id).to(be_eq(4));
        }
        other => panic!("expected an unsupported mapper error, got {:?}", other),
    }
}

#[test]
fn load_from_disk() {
    let path = std::env::temp_dir().join(format!("rustic-nes-{}.nes", std::process::id()));
    fs::write(&path, ines_image(0, 2, 1)).unwrap();

    let mut cart = Cartridge::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    expect!(cart.read(0xC000)).to(be_eq(1));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = Cartridge::load("/nonexistent/rustic-nes/missing.nes");
    expect!(matches!(result, Err(LoadError::Io(_)))).to(be_true());
}
