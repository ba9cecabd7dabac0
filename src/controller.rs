bitflags! {
    /// Button state of a standard controller, in the order the shift register reports them.
    pub struct Buttons: u8 {
        const A = 1;
        const B = 1 << 1;
        const SELECT = 1 << 2;
        const START = 1 << 3;
        const UP = 1 << 4;
        const DOWN = 1 << 5;
        const LEFT = 1 << 6;
        const RIGHT = 1 << 7;
    }
}

/// A standard controller behind $4016/$4017.
///
/// While strobe is high the shift register keeps reloading, so reads keep returning A. When
/// strobe drops the buttons are shifted out one per read; after all eight, reads return 1.
///
/// Reference: https://wiki.nesdev.com/w/index.php/Standard_controller
#[derive(Debug, Clone)]
pub struct Controller {
    buttons: Buttons,
    shift: u8,
    strobe: bool,
}

impl Controller {
    pub fn new() -> Controller {
        Controller {
            buttons: Buttons::empty(),
            shift: 0,
            strobe: false,
        }
    }

    pub fn set_buttons(&mut self, buttons: Buttons) {
        self.buttons = buttons;
    }

    pub fn write_strobe(&mut self, data: u8) {
        self.strobe = data & 1 != 0;
        if self.strobe {
            self.shift = self.buttons.bits();
        }
    }

    pub fn read(&mut self) -> u8 {
        if self.strobe {
            return self.buttons.bits() & 1;
        }

        let bit = self.shift & 1;
        self.shift = (self.shift >> 1) | 0x80;
        bit
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
