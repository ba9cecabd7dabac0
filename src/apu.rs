use crate::bus::Device;
use crate::controller::Controller;

const APU_START: u16 = 0x4000;
const APU_END: u16 = 0x401F;

/// Open-bus bits returned alongside controller data.
const CONTROLLER_OPEN_BUS: u8 = 0x40;

/// Register window of the audio unit and the controller ports, $4000-$401F.
///
/// Sound is not synthesized: the audio registers are plain storage so that programs writing to
/// them see their own values. $4016 and $4017 are routed to the two controller ports. $4014 never
/// reaches this device; the Bus intercepts it for OAM DMA.
#[derive(Debug, Clone)]
pub struct Apu {
    registers: [u8; (APU_END - APU_START + 1) as usize],
    controllers: [Controller; 2],
}

impl Apu {
    pub fn new() -> Apu {
        Apu {
            registers: [0; (APU_END - APU_START + 1) as usize],
            controllers: [Controller::new(), Controller::new()],
        }
    }

    /// Access to a controller port (0 or 1) so a front-end can feed button state.
    pub fn controller_mut(&mut self, port: usize) -> &mut Controller {
        &mut self.controllers[port & 1]
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Apu {
    fn is_address_valid(&self, addr: u16) -> bool {
        (APU_START..=APU_END).contains(&addr)
    }

    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x4016 => self.controllers[0].read() | CONTROLLER_OPEN_BUS,
            0x4017 => self.controllers[1].read() | CONTROLLER_OPEN_BUS,
            _ => self.registers[(addr - APU_START) as usize],
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        if addr == 0x4016 {
            // One strobe line feeds both ports.
            for controller in self.controllers.iter_mut() {
                controller.write_strobe(data);
            }
        }
        self.registers[(addr - APU_START) as usize] = data;
    }
}
