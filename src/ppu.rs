//! Picture processing unit, modelled at the level the CPU can observe: the dot/scanline clock,
//! vertical blank and its NMI, the register window at $2000-$2007, nametable/palette memory, OAM
//! and the sprite-zero hit and sprite overflow flags. No pixels are produced.
//!
//! A frame is 262 scanlines of 341 dots. Scanline -1 is the pre-render line, 0-239 are visible,
//! 240 is idle and 241-260 are vertical blank.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::warn;

use crate::bus::Device;
use crate::cartridge::Cartridge;
use crate::rom::NametableMirroringMode;

pub const DOTS_PER_SCANLINE: u16 = 341;
pub const PRE_RENDER_SCANLINE: i16 = -1;
pub const VBLANK_SCANLINE: i16 = 241;
pub const LAST_SCANLINE: i16 = 260;
pub const OAM_SIZE: usize = 256;

bitflags! {
    /// $2000
    pub struct Control: u8 {
        const NAMETABLE_X = 1;
        const NAMETABLE_Y = 1 << 1;
        const INCREMENT_32 = 1 << 2;
        const SPRITE_TABLE = 1 << 3;
        const BACKGROUND_TABLE = 1 << 4;
        const SPRITE_16 = 1 << 5;
        const MASTER_SLAVE = 1 << 6;
        const NMI_ENABLE = 1 << 7;
    }
}

bitflags! {
    /// $2001
    pub struct Mask: u8 {
        const GREYSCALE = 1;
        const BACKGROUND_LEFT = 1 << 1;
        const SPRITES_LEFT = 1 << 2;
        const BACKGROUND = 1 << 3;
        const SPRITES = 1 << 4;
        const EMPHASIZE_RED = 1 << 5;
        const EMPHASIZE_GREEN = 1 << 6;
        const EMPHASIZE_BLUE = 1 << 7;
    }
}

bitflags! {
    /// $2002. The low five bits read back whatever was last written to any PPU register.
    pub struct Status: u8 {
        const SPRITE_OVERFLOW = 1 << 5;
        const SPRITE_ZERO_HIT = 1 << 6;
        const VBLANK = 1 << 7;
    }
}

pub struct Ppu {
    cartridge: Rc<RefCell<Cartridge>>,

    cycle: u16,
    scanline: i16,
    odd_frame: bool,
    frame: u64,

    ctrl: Control,
    mask: Mask,
    status: Status,

    oam: [u8; OAM_SIZE],
    oam_addr: u8,
    // Four nametables worth; only four-screen boards use all of it.
    vram: [u8; 4 * 1024],
    palette: [u8; 32],

    // Scroll/address latches: current and temporary VRAM address, fine X and the write toggle
    // shared by $2005 and $2006.
    v: u16,
    t: u16,
    fine_x: u8,
    w: bool,
    // VRAM address and fine X in effect at the first pixel of the current scanline.
    line_v: u16,
    line_fine_x: u8,

    read_buffer: u8,
    io_latch: u8,

    raise_nmi: bool,
    frame_complete: bool,
}

impl Ppu {
    pub fn new(cartridge: Rc<RefCell<Cartridge>>) -> Ppu {
        Ppu {
            cartridge,
            cycle: 0,
            scanline: PRE_RENDER_SCANLINE,
            odd_frame: false,
            frame: 0,
            ctrl: Control::empty(),
            mask: Mask::empty(),
            status: Status::empty(),
            oam: [0; OAM_SIZE],
            oam_addr: 0,
            vram: [0; 4 * 1024],
            palette: [0; 32],
            v: 0,
            t: 0,
            fine_x: 0,
            w: false,
            line_v: 0,
            line_fine_x: 0,
            read_buffer: 0,
            io_latch: 0,
            raise_nmi: false,
            frame_complete: false,
        }
    }

    /// Return to the power-up register state. Memory contents survive.
    pub fn reset(&mut self) {
        self.cycle = 0;
        self.scanline = PRE_RENDER_SCANLINE;
        self.odd_frame = false;
        self.ctrl = Control::empty();
        self.mask = Mask::empty();
        self.status = Status::empty();
        self.w = false;
        self.read_buffer = 0;
        self.raise_nmi = false;
        self.frame_complete = false;
    }

    pub fn cycle(&self) -> u16 {
        self.cycle
    }

    pub fn scanline(&self) -> i16 {
        self.scanline
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn oam(&self) -> &[u8; OAM_SIZE] {
        &self.oam
    }

    /// OAM DMA entry point.
    pub fn write_oam(&mut self, index: u8, data: u8) {
        self.oam[index as usize] = data;
    }

    pub fn nmi_pending(&self) -> bool {
        self.raise_nmi
    }

    pub fn clear_nmi(&mut self) {
        self.raise_nmi = false;
    }

    /// Whether vertical blank started since the last call.
    pub fn take_frame_complete(&mut self) -> bool {
        let complete = self.frame_complete;
        self.frame_complete = false;
        complete
    }

    fn rendering_enabled(&self) -> bool {
        self.mask.intersects(Mask::BACKGROUND | Mask::SPRITES)
    }

    /// Advance one dot.
    pub fn tick(&mut self) {
        let rendering = self.rendering_enabled();

        match self.scanline {
            PRE_RENDER_SCANLINE => {
                if self.cycle == 1 {
                    self.status.remove(Status::VBLANK | Status::SPRITE_ZERO_HIT | Status::SPRITE_OVERFLOW);
                }
                if rendering {
                    self.scroll_step();
                    if (280..=304).contains(&self.cycle) {
                        self.copy_vertical();
                    }
                }
            }
            0..=239 => {
                if rendering {
                    if (1..=256).contains(&self.cycle) {
                        self.check_sprite_zero((self.cycle - 1) as u8);
                    }
                    if self.cycle == 257 {
                        self.evaluate_overflow();
                    }
                    self.scroll_step();
                }
            }
            VBLANK_SCANLINE if self.cycle == 1 => {
                self.status.insert(Status::VBLANK);
                self.frame_complete = true;
                if self.ctrl.contains(Control::NMI_ENABLE) {
                    self.raise_nmi = true;
                }
            }
            _ => {}
        }

        if self.cycle == 320 && self.scanline < 240 {
            self.line_v = self.v;
            self.line_fine_x = self.fine_x;
        }

        self.cycle += 1;
        // Odd frames drop the last dot of the pre-render line while rendering.
        if self.scanline == PRE_RENDER_SCANLINE && self.cycle == DOTS_PER_SCANLINE - 1 && self.odd_frame && rendering {
            self.cycle = DOTS_PER_SCANLINE;
        }
        if self.cycle >= DOTS_PER_SCANLINE {
            self.cycle = 0;
            self.scanline += 1;
            if self.scanline > LAST_SCANLINE {
                self.scanline = PRE_RENDER_SCANLINE;
                self.odd_frame = !self.odd_frame;
                self.frame += 1;
            }
        }
    }

    fn scroll_step(&mut self) {
        let cycle = self.cycle;
        if ((1..=256).contains(&cycle) || (328..=336).contains(&cycle)) && cycle % 8 == 0 {
            self.increment_x();
        }
        if cycle == 256 {
            self.increment_y();
        }
        if cycle == 257 {
            self.copy_horizontal();
        }
    }

    fn increment_x(&mut self) {
        if self.v & 0x001F == 31 {
            self.v &= !0x001F;
            self.v ^= 0x0400;
        } else {
            self.v += 1;
        }
    }

    fn increment_y(&mut self) {
        if self.v & 0x7000 != 0x7000 {
            self.v += 0x1000;
            return;
        }
        self.v &= !0x7000;
        let mut coarse_y = (self.v & 0x03E0) >> 5;
        if coarse_y == 29 {
            coarse_y = 0;
            self.v ^= 0x0800;
        } else if coarse_y == 31 {
            coarse_y = 0;
        } else {
            coarse_y += 1;
        }
        self.v = (self.v & !0x03E0) | (coarse_y << 5);
    }

    fn copy_horizontal(&mut self) {
        self.v = (self.v & !0x041F) | (self.t & 0x041F);
    }

    fn copy_vertical(&mut self) {
        self.v = (self.v & !0x7BE0) | (self.t & 0x7BE0);
    }

    fn evaluate_overflow(&mut self) {
        let height = self.sprite_height();
        let scanline = self.scanline;
        let in_range = self
            .oam
            .chunks(4)
            .filter(|sprite| {
                let row = scanline - sprite[0] as i16;
                row >= 0 && row < height
            })
            .count();
        if in_range > 8 {
            self.status.insert(Status::SPRITE_OVERFLOW);
        }
    }

    fn sprite_height(&self) -> i16 {
        if self.ctrl.contains(Control::SPRITE_16) {
            16
        } else {
            8
        }
    }

    fn check_sprite_zero(&mut self, x: u8) {
        if self.status.contains(Status::SPRITE_ZERO_HIT) || !self.mask.contains(Mask::BACKGROUND | Mask::SPRITES) {
            return;
        }
        // Never at the rightmost pixel, nor in the left column when either layer is clipped there.
        if x == 255 || (x < 8 && !self.mask.contains(Mask::BACKGROUND_LEFT | Mask::SPRITES_LEFT)) {
            return;
        }
        if self.sprite_zero_opaque(x) && self.background_opaque(x) {
            self.status.insert(Status::SPRITE_ZERO_HIT);
        }
    }

    fn sprite_zero_opaque(&self, x: u8) -> bool {
        let height = self.sprite_height();
        // OAM holds the sprite's Y minus one.
        let row = self.scanline - (self.oam[0] as i16 + 1);
        let left = self.oam[3];
        if row < 0 || row >= height || x < left || x as u16 >= left as u16 + 8 {
            return false;
        }

        let attributes = self.oam[2];
        let mut row = row as u8;
        if attributes & 0x80 != 0 {
            row = height as u8 - 1 - row;
        }
        let column = x - left;
        let bit = if attributes & 0x40 != 0 { column } else { 7 - column };

        let index = self.oam[1];
        let (tile, half) = if height == 16 {
            let top = index & 0xFE;
            (if row >= 8 { top + 1 } else { top }, index & 0x01)
        } else {
            (index, self.ctrl.contains(Control::SPRITE_TABLE) as u8)
        };

        let (lo, hi) = self.cartridge.borrow().get_tile_data(tile, row & 0x07, half);
        ((lo >> bit) | (hi >> bit)) & 0x01 != 0
    }

    fn background_opaque(&self, x: u8) -> bool {
        let fine = self.line_fine_x as u16 + x as u16;
        let mut coarse_x = (self.line_v & 0x001F) + fine / 8;
        let mut nametable = (self.line_v >> 10) & 0x03;
        if coarse_x >= 32 {
            coarse_x -= 32;
            nametable ^= 0x01;
        }
        let coarse_y = (self.line_v >> 5) & 0x1F;
        let fine_y = ((self.line_v >> 12) & 0x07) as u8;

        let tile = self.vram[self.nametable_index(0x2000 | (nametable << 10) | (coarse_y << 5) | coarse_x)];
        let half = self.ctrl.contains(Control::BACKGROUND_TABLE) as u8;
        let (lo, hi) = self.cartridge.borrow().get_tile_data(tile, fine_y, half);
        let bit = 7 - (fine % 8) as u8;
        ((lo >> bit) | (hi >> bit)) & 0x01 != 0
    }

    fn nametable_index(&self, addr: u16) -> usize {
        let addr = (addr as usize - 0x2000) & 0x0FFF;
        let table = addr / 0x400;
        let physical = match self.cartridge.borrow().mirroring() {
            NametableMirroringMode::Horizontal => table / 2,
            NametableMirroringMode::Vertical => table & 1,
            NametableMirroringMode::SingleScreenLow => 0,
            NametableMirroringMode::SingleScreenHigh => 1,
            NametableMirroringMode::FourScreen => table,
        };
        physical * 0x400 + (addr & 0x3FF)
    }

    fn palette_index(addr: u16) -> usize {
        let index = (addr & 0x1F) as usize;
        // $3F10/$3F14/$3F18/$3F1C share storage with the backdrop entries.
        if index >= 0x10 && index % 4 == 0 {
            index - 0x10
        } else {
            index
        }
    }

    fn mem_read(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => self.cartridge.borrow().ppu_read(addr),
            0x2000..=0x3EFF => self.vram[self.nametable_index(addr)],
            _ => self.palette[Ppu::palette_index(addr)],
        }
    }

    fn mem_write(&mut self, addr: u16, data: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => self.cartridge.borrow_mut().ppu_write(addr, data),
            0x2000..=0x3EFF => {
                let index = self.nametable_index(addr);
                self.vram[index] = data;
            }
            _ => self.palette[Ppu::palette_index(addr)] = data & 0x3F,
        }
    }

    fn increment_v(&mut self) {
        let step = if self.ctrl.contains(Control::INCREMENT_32) { 32 } else { 1 };
        self.v = self.v.wrapping_add(step) & 0x7FFF;
    }
}

impl Device for Ppu {
    fn is_address_valid(&self, addr: u16) -> bool {
        (0x2000..=0x3FFF).contains(&addr)
    }

    fn read(&mut self, addr: u16) -> u8 {
        let data = match addr & 0x0007 {
            2 => {
                let data = (self.status.bits() & 0xE0) | (self.io_latch & 0x1F);
                self.status.remove(Status::VBLANK);
                self.w = false;
                data
            }
            4 => self.oam[self.oam_addr as usize],
            7 => {
                let addr = self.v & 0x3FFF;
                let data = if addr >= 0x3F00 {
                    // Palette reads are immediate; the buffer picks up the nametable underneath.
                    self.read_buffer = self.mem_read(addr - 0x1000);
                    self.mem_read(addr)
                } else {
                    let buffered = self.read_buffer;
                    self.read_buffer = self.mem_read(addr);
                    buffered
                };
                self.increment_v();
                data
            }
            _ => self.io_latch,
        };
        self.io_latch = data;
        data
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.io_latch = data;
        match addr & 0x0007 {
            0 => {
                let was_enabled = self.ctrl.contains(Control::NMI_ENABLE);
                self.ctrl = Control::from_bits_truncate(data);
                self.t = (self.t & !0x0C00) | (((data & 0x03) as u16) << 10);
                if !was_enabled && self.ctrl.contains(Control::NMI_ENABLE) && self.status.contains(Status::VBLANK) {
                    self.raise_nmi = true;
                }
            }
            1 => self.mask = Mask::from_bits_truncate(data),
            2 => warn!("write of ${:02X} to read-only PPU status register ${:04X}", data, addr),
            3 => self.oam_addr = data,
            4 => {
                self.oam[self.oam_addr as usize] = data;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            5 => {
                if !self.w {
                    self.t = (self.t & !0x001F) | (data >> 3) as u16;
                    self.fine_x = data & 0x07;
                } else {
                    self.t = (self.t & !0x73E0) | (((data & 0x07) as u16) << 12) | (((data & 0xF8) as u16) << 2);
                }
                self.w = !self.w;
            }
            6 => {
                if !self.w {
                    self.t = (self.t & 0x00FF) | (((data & 0x3F) as u16) << 8);
                } else {
                    self.t = (self.t & 0xFF00) | data as u16;
                    self.v = self.t;
                }
                self.w = !self.w;
            }
            _ => {
                self.mem_write(self.v, data);
                self.increment_v();
            }
        }
    }
}

impl fmt::Debug for Ppu {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("Ppu")
            .field("scanline", &self.scanline)
            .field("cycle", &self.cycle)
            .field("frame", &self.frame)
            .field("ctrl", &self.ctrl)
            .field("mask", &self.mask)
            .field("status", &self.status)
            .field("v", &format_args!("${:04X}", self.v))
            .field("t", &format_args!("${:04X}", self.t))
            .finish()
    }
}
