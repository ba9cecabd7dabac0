//! The console: CPU, PPU, APU registers and cartridge wired to one bus, driven by a single
//! master clock.
//!
//! Every tick advances the PPU one dot; every third tick the CPU gets a cycle, unless an OAM DMA
//! transfer holds it. NMIs raised by the PPU are handed to the CPU only on instruction boundaries.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::apu::Apu;
use crate::bus::{Bus, Ram};
use crate::controller::Buttons;
use crate::cpu::CPU;
use crate::error::EmulationError;
use crate::cartridge::Cartridge;
use crate::ppu::Ppu;

/// PPU dots per CPU cycle.
pub const PPU_TICKS_PER_CPU_CYCLE: u64 = 3;

/// OAM DMA progress. One step per CPU cycle: a halt cycle, an alignment cycle when the transfer
/// starts on an odd cycle, then 256 read/write pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DmaState {
    Idle,
    Halt,
    Align,
    Read,
    Write,
}

pub struct Nes {
    pub cpu: CPU,
    ppu: Rc<RefCell<Ppu>>,
    apu: Rc<RefCell<Apu>>,
    cartridge: Rc<RefCell<Cartridge>>,

    dma: DmaState,
    dma_page: u8,
    dma_offset: u8,
    dma_data: u8,
    dma_odd: bool,

    ticks: u64,
}

impl Nes {
    /// Wire up a console around `cartridge`. Call `reset` before running it.
    pub fn new(cartridge: Cartridge) -> Nes {
        let cartridge = Rc::new(RefCell::new(cartridge));
        let ppu = Rc::new(RefCell::new(Ppu::new(cartridge.clone())));
        let apu = Rc::new(RefCell::new(Apu::new()));

        let mut bus = Bus::new();
        bus.connect(Ram::new());
        bus.connect(ppu.clone());
        bus.connect(apu.clone());
        bus.connect(cartridge.clone());

        Nes {
            cpu: CPU::new(bus),
            ppu,
            apu,
            cartridge,
            dma: DmaState::Idle,
            dma_page: 0,
            dma_offset: 0,
            dma_data: 0,
            dma_odd: false,
            ticks: 0,
        }
    }

    /// Reset the CPU (through the reset vector) and the PPU.
    pub fn reset(&mut self) -> Result<(), EmulationError> {
        self.ppu.borrow_mut().reset();
        self.cpu.reset()?;
        self.cpu.bus.take_dma_request();
        self.dma = DmaState::Idle;
        self.ticks = 0;
        Ok(())
    }

    /// Reset, then start execution at `pc` instead of the reset vector. This is how nestest runs
    /// in automation mode.
    pub fn reset_to(&mut self, pc: u16) -> Result<(), EmulationError> {
        self.reset()?;
        self.cpu.p_ctr = pc;
        Ok(())
    }

    pub fn ppu(&self) -> &Rc<RefCell<Ppu>> {
        &self.ppu
    }

    pub fn cartridge(&self) -> &Rc<RefCell<Cartridge>> {
        &self.cartridge
    }

    /// Master clock ticks since reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn dma_active(&self) -> bool {
        self.dma != DmaState::Idle
    }

    /// Set the buttons held on controller `port` (0 or 1).
    pub fn set_buttons(&mut self, port: usize, buttons: Buttons) {
        self.apu.borrow_mut().controller_mut(port).set_buttons(buttons);
    }

    /// Advance the master clock by one PPU dot.
    pub fn tick(&mut self) -> Result<(), EmulationError> {
        self.ppu.borrow_mut().tick();

        if self.ticks % PPU_TICKS_PER_CPU_CYCLE == 0 {
            if self.dma != DmaState::Idle {
                self.dma_step()?;
            } else if self.cpu.is_idle() && self.cpu.bus.dma_pending() {
                self.start_dma();
                self.dma_step()?;
            } else {
                self.cpu.clock()?;
            }
        }

        if self.dma == DmaState::Idle && self.cpu.is_idle() && self.ppu.borrow().nmi_pending() {
            self.ppu.borrow_mut().clear_nmi();
            self.cpu.nmi()?;
        }

        self.ticks += 1;
        Ok(())
    }

    /// Run until the PPU enters vertical blank.
    pub fn run_frame(&mut self) -> Result<(), EmulationError> {
        loop {
            self.tick()?;
            if self.ppu.borrow_mut().take_frame_complete() {
                return Ok(());
            }
        }
    }

    fn start_dma(&mut self) {
        if let Some(page) = self.cpu.bus.take_dma_request() {
            self.dma_page = page;
            self.dma_offset = 0;
            // On an instruction boundary clock_ticks has no pending cycles in it.
            self.dma_odd = self.cpu.clock_ticks % 2 == 1;
            self.dma = DmaState::Halt;
            debug!("OAM DMA from ${:02X}00 at cycle {}", page, self.cpu.clock_ticks);
        }
    }

    fn dma_step(&mut self) -> Result<(), EmulationError> {
        self.cpu.stall(1);
        self.dma = match self.dma {
            DmaState::Halt if self.dma_odd => DmaState::Align,
            DmaState::Halt | DmaState::Align => DmaState::Read,
            DmaState::Read => {
                let addr = ((self.dma_page as u16) << 8) | self.dma_offset as u16;
                self.dma_data = self.cpu.bus.read(addr)?;
                DmaState::Write
            }
            DmaState::Write => {
                self.ppu.borrow_mut().write_oam(self.dma_offset, self.dma_data);
                if self.dma_offset == 0xFF {
                    debug!("OAM DMA done at cycle {}", self.cpu.clock_ticks);
                    DmaState::Idle
                } else {
                    self.dma_offset += 1;
                    DmaState::Read
                }
            }
            DmaState::Idle => DmaState::Idle,
        };
        Ok(())
    }
}

impl std::fmt::Debug for Nes {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter
            .debug_struct("Nes")
            .field("cpu", &self.cpu)
            .field("ppu", &self.ppu.borrow())
            .field("dma", &self.dma)
            .field("ticks", &self.ticks)
            .finish()
    }
}
