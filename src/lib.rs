#[macro_use]
extern crate bitflags;

#[macro_use]
extern crate lazy_static;

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod error;
pub mod mapper;
pub mod model;
pub mod nes;
pub mod ppu;
pub mod rom;

pub use crate::bus::{Bus, Device};
pub use crate::cartridge::Cartridge;
pub use crate::cpu::CPU;
pub use crate::error::{EmulationError, LoadError};
pub use crate::nes::Nes;
