//! Loading of iNES cartridge images.

pub mod model;
pub mod reader;

pub use model::{INESHeader, NametableMirroringMode, Rom, SystemType};
pub use reader::{parse_rom, read_rom};
