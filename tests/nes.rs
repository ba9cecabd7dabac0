mod common;

use expectest::prelude::*;
use rustic_nes::rom::parse_rom;
use rustic_nes::{Cartridge, Nes};

use common::nrom_image;

fn nes_with(program: &[u8], nmi_handler: u16, handler: &[u8]) -> Nes {
    let image = nrom_image(program, nmi_handler, handler);
    let mut nes = Nes::new(Cartridge::from_rom(parse_rom(&image).unwrap()).unwrap());
    nes.reset().unwrap();
    nes
}

/// Fill $0200-$02FF, start the program and run until the DMA it triggers is over. Returns the
/// CPU cycle count at the start of the transfer and after it.
fn run_dma(program: &[u8], expected_start: u64) -> (Nes, u64) {
    let mut nes = nes_with(program, 0x8100, &[0x40]);
    for i in 0..=0xFFu16 {
        nes.cpu.bus.write(0x0200 + i, (i as u8) ^ 0x5A).unwrap();
    }
    nes.cpu.bus.write(0x0000, 0x02).unwrap();

    while !nes.dma_active() {
        nes.tick().unwrap();
    }
    // The write instruction completed before the first stalled cycle.
    expect!(nes.cpu.p_ctr).to(be_eq(0x8005));
    expect!(nes.cpu.clock_ticks).to(be_eq(expected_start + 1));

    while nes.dma_active() {
        nes.tick().unwrap();
        expect!(nes.cpu.p_ctr).to(be_eq(0x8005));
    }
    let end = nes.cpu.clock_ticks;
    (nes, end)
}

#[test]
fn oam_dma_on_even_cycle_takes_513() {
    // LDA $00 (3); STA $4014 (4): the transfer starts at cycle 7 + 3 + 4 = 14.
    let (nes, end) = run_dma(&[0xA5, 0x00, 0x8D, 0x14, 0x40], 14);
    expect!(end).to(be_eq(14 + 513));

    let ppu = nes.ppu().borrow();
    for i in 0..256 {
        expect!(ppu.oam()[i]).to(be_eq((i as u8) ^ 0x5A));
    }
}

#[test]
fn oam_dma_on_odd_cycle_takes_514() {
    // LDA #$02 (2); STA $4014 (4): the transfer starts at cycle 7 + 2 + 4 = 13.
    let (_, end) = run_dma(&[0xA9, 0x02, 0x8D, 0x14, 0x40], 13);
    expect!(end).to(be_eq(13 + 514));
}

#[test]
fn cpu_resumes_after_dma() {
    let (mut nes, end) = run_dma(&[0xA5, 0x00, 0x8D, 0x14, 0x40, 0xE8], 14);
    for _ in 0..6 {
        nes.tick().unwrap();
    }
    expect!(nes.cpu.x).to(be_eq(0x01));
    expect!(nes.cpu.clock_ticks).to(be_eq(end + 2));
}

#[test]
fn nmi_is_delivered_on_an_instruction_boundary() {
    // LDA #$80; STA $2000; loop: JMP loop. The handler counts NMIs in $10.
    let program = [0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x05, 0x80];
    let mut nes = nes_with(&program, 0x8100, &[0xE6, 0x10, 0x40]);

    nes.run_frame().unwrap();
    for _ in 0..3 * 40 {
        nes.tick().unwrap();
    }

    expect!(nes.cpu.bus.read(0x0010).unwrap()).to(be_eq(1));
    // The interrupted PC is the start of the JMP, never the middle of it.
    expect!(nes.cpu.bus.read(0x01FD).unwrap()).to(be_eq(0x80));
    expect!(nes.cpu.bus.read(0x01FC).unwrap()).to(be_eq(0x05));
    // Pushed status: B clear, bit 5 set.
    let pushed = nes.cpu.bus.read(0x01FB).unwrap();
    expect!(pushed & 0x30).to(be_eq(0x20));
    expect!(nes.cpu.stk_ptr).to(be_eq(0xFD));
}

#[test]
fn one_nmi_per_frame() {
    let program = [0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x05, 0x80];
    let mut nes = nes_with(&program, 0x8100, &[0xE6, 0x10, 0x40]);
    for _ in 0..5 {
        nes.run_frame().unwrap();
    }
    for _ in 0..3 * 40 {
        nes.tick().unwrap();
    }
    expect!(nes.cpu.bus.read(0x0010).unwrap()).to(be_eq(5));
}

#[test]
fn frames_are_262_scanlines_of_341_dots() {
    let mut nes = nes_with(&[0x4C, 0x00, 0x80], 0x8100, &[0x40]);
    nes.run_frame().unwrap();
    let first = nes.ticks();
    nes.run_frame().unwrap();
    expect!(nes.ticks() - first).to(be_eq(341 * 262));
}
