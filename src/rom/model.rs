/// Basic structure used to define what sort of data we should expect to pull from the ROM.
#[derive(PartialEq, Debug, Clone)]
pub struct INESHeader {
    // The number of 16 KiB PRG (Program) ROM pages.
    pub prg_rom_size: usize,
    // The number of 8 KiB CHR (Character) ROM pages. 0 means the board carries CHR RAM instead.
    pub chr_rom_size: usize,
    // The nametable mirroring mode.
    pub nametable_mirror_mode: NametableMirroringMode,
    // Whether a 512-byte trainer sits between the header and PRG ROM.
    pub trainer_exists: bool,
    // Whether the cartridge keeps PRG RAM alive with a battery.
    pub battery_backed: bool,
    // The mapper number, assembled from the high nibbles of flags 6 and 7.
    pub mapper: u8,
    // The system type.
    pub system_type: SystemType,
    // The number of 8 KiB PRG (Program) RAM pages.
    pub prg_ram_size: usize,
}

/// Definition of possible nametable mirror modes.
///
/// Reference: https://wiki.nesdev.com/w/index.php/Mirroring#Nametable_Mirroring
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum NametableMirroringMode {
    Horizontal,
    Vertical,
    SingleScreenLow,
    SingleScreenHigh,
    FourScreen,
}

/// Definition of possible system types.
///
/// Reference: https://wiki.nesdev.com/w/index.php/INES#Flags_7
#[derive(PartialEq, Debug, Clone)]
pub enum SystemType {
    NES,
    NES2,
    VSUnisystem,
    PlayChoice10,
}

/// A parsed cartridge image: the header plus the raw PRG and CHR bytes it describes.
#[derive(PartialEq, Debug, Clone)]
pub struct Rom {
    pub header: INESHeader,
    pub prg_rom: Vec<u8>,
    // Empty when the header declares no CHR ROM.
    pub chr_rom: Vec<u8>,
}
