#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rustic_nes::bus::{Bus, Device};
use rustic_nes::cpu::CPU;

/// 64 KiB of plain RAM answering every address, for exercising the CPU without a console.
pub struct FlatRam {
    pub data: Vec<u8>,
}

impl FlatRam {
    pub fn new() -> FlatRam {
        FlatRam { data: vec![0; 0x10000] }
    }
}

impl Device for FlatRam {
    fn is_address_valid(&self, _addr: u16) -> bool {
        true
    }

    fn read(&mut self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.data[addr as usize] = data;
    }
}

/// A CPU on flat RAM with each `(address, bytes)` chunk loaded. The RAM handle stays shared
/// with the test.
pub fn cpu_with(chunks: &[(u16, &[u8])]) -> (CPU, Rc<RefCell<FlatRam>>) {
    let ram = Rc::new(RefCell::new(FlatRam::new()));
    for (addr, bytes) in chunks {
        let start = *addr as usize;
        ram.borrow_mut().data[start..start + bytes.len()].copy_from_slice(bytes);
    }

    let mut bus = Bus::new();
    bus.connect(ram.clone());
    (CPU::new(bus), ram)
}

/// An iNES image. The first byte of every 16 KiB PRG bank holds the bank number and every
/// 8 KiB CHR bank is filled with its bank number.
pub fn ines_image(mapper: u8, prg_banks: usize, chr_banks: usize) -> Vec<u8> {
    let flags6 = (mapper & 0x0F) << 4;
    let flags7 = mapper & 0xF0;
    let mut image = vec![b'N', b'E', b'S', 0x1A, prg_banks as u8, chr_banks as u8, flags6, flags7, 0, 0, 0, 0, 0, 0, 0, 0];
    for bank in 0..prg_banks {
        let mut prg = vec![0; 0x4000];
        prg[0] = bank as u8;
        image.extend(prg);
    }
    for bank in 0..chr_banks {
        image.extend(vec![bank as u8; 0x2000]);
    }
    image
}

/// A 16 KiB NROM image with `program` at $8000, reset pointing at it, and the NMI vector at
/// `nmi_handler` (an absolute CPU address inside $8000-$BFFF).
pub fn nrom_image(program: &[u8], nmi_handler: u16, handler: &[u8]) -> Vec<u8> {
    let mut prg = vec![0xEA; 0x4000];
    prg[..program.len()].copy_from_slice(program);
    let offset = (nmi_handler - 0x8000) as usize;
    prg[offset..offset + handler.len()].copy_from_slice(handler);
    prg[0x3FFA] = nmi_handler as u8;
    prg[0x3FFB] = (nmi_handler >> 8) as u8;
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;

    let mut image = vec![b'N', b'E', b'S', 0x1A, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    image.extend(prg);
    image.extend(vec![0; 0x2000]);
    image
}
