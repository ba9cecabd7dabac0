use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::error::EmulationError;

/// Size of the console's internal work RAM.
pub const RAM_SIZE: usize = 2 * 1024;

/// Writing a page number here starts a 256-byte copy into sprite memory. The scheduler owns the
/// transfer; no device sits behind this address.
pub const OAM_DMA_ADDR: u16 = 0x4014;

/// Anything that can be connected to the Bus. Each device claims a fixed set of addresses; the Bus
/// asks every device in turn whether it owns an address before dispatching to it.
pub trait Device {
    /// Whether this device answers reads and writes at `addr`.
    fn is_address_valid(&self, addr: u16) -> bool;

    /// Read a byte. Takes `&mut self` because some registers change state when read.
    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, data: u8);
}

/// Devices shared with the scheduler (the PPU, the cartridge) are connected through a shared handle.
impl<D: Device> Device for Rc<RefCell<D>> {
    fn is_address_valid(&self, addr: u16) -> bool {
        self.borrow().is_address_valid(addr)
    }

    fn read(&mut self, addr: u16) -> u8 {
        self.borrow_mut().read(addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.borrow_mut().write(addr, data)
    }
}

/// Core structure of the Bus, which routes CPU reads and writes to the connected devices.
///
/// Address ranges of connected devices must not overlap; the first device claiming an address wins.
pub struct Bus {
    devices: Vec<Box<dyn Device>>,
    /// Source page of a requested OAM DMA, latched until the scheduler picks it up.
    dma_page: Option<u8>,
}

impl Bus {
    /// Construct a new Bus with nothing connected.
    pub fn new() -> Bus {
        Bus {
            devices: Vec::new(),
            dma_page: None,
        }
    }

    /// Register a device. Devices are searched in connection order.
    pub fn connect<D: Device + 'static>(&mut self, device: D) {
        self.devices.push(Box::new(device));
    }

    /// Read a byte from whichever device owns the given address.
    pub fn read(&mut self, addr: u16) -> Result<u8, EmulationError> {
        match self.device_for(addr) {
            Some(device) => Ok(device.read(addr)),
            None => Err(EmulationError::UnmappedAddress { addr }),
        }
    }

    /// Write a byte to whichever device owns the given address. A write to $4014 only latches the
    /// DMA request.
    pub fn write(&mut self, addr: u16, data: u8) -> Result<(), EmulationError> {
        if addr == OAM_DMA_ADDR {
            debug!("OAM DMA requested from page ${:02X}", data);
            self.dma_page = Some(data);
            return Ok(());
        }

        match self.device_for(addr) {
            Some(device) => {
                device.write(addr, data);
                Ok(())
            }
            None => Err(EmulationError::UnmappedAddress { addr }),
        }
    }

    /// Read a little-endian word from two consecutive addresses.
    pub fn read_word(&mut self, addr: u16) -> Result<u16, EmulationError> {
        let lo = self.read(addr)? as u16;
        let hi = self.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    /// Whether an OAM DMA transfer is waiting to be serviced.
    pub fn dma_pending(&self) -> bool {
        self.dma_page.is_some()
    }

    /// Take the pending OAM DMA source page, clearing the request.
    pub fn take_dma_request(&mut self) -> Option<u8> {
        self.dma_page.take()
    }

    fn device_for(&mut self, addr: u16) -> Option<&mut Box<dyn Device>> {
        self.devices.iter_mut().find(|d| d.is_address_valid(addr))
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("Bus")
            .field("devices", &self.devices.len())
            .field("dma_page", &self.dma_page)
            .finish()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

/// The console's 2 KiB of work RAM, mirrored four times across $0000-$1FFF.
pub struct Ram {
    data: [u8; RAM_SIZE],
}

impl Ram {
    pub fn new() -> Ram {
        Ram { data: [0; RAM_SIZE] }
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Ram {
    fn is_address_valid(&self, addr: u16) -> bool {
        addr <= 0x1FFF
    }

    fn read(&mut self, addr: u16) -> u8 {
        self.data[(addr & 0x07FF) as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.data[(addr & 0x07FF) as usize] = data;
    }
}

/// Custom Debug so a dump of the bus does not print every byte of RAM.
impl fmt::Debug for Ram {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Ram({} bytes)", self.data.len())
    }
}
