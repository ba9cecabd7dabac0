use log::{debug, log_enabled, trace, Level};

use crate::bus::Bus;
use crate::error::EmulationError;
use crate::model::{StatusFlags, INSTRUCTIONS};

pub mod addressing;
mod execute;
mod trace;

pub use self::trace::format_line;

const STACK_PAGE: u16 = 0x0100;
const NMI_VECTOR: u16 = 0xFFFA;
const RESET_VECTOR: u16 = 0xFFFC;
const IRQ_VECTOR: u16 = 0xFFFE;

/// Power-up status: interrupts disabled, bit 5 set.
const POWER_UP_STATUS: u8 = 0x24;
/// Cycles spent by the reset and interrupt sequences.
const INTERRUPT_CYCLES: u8 = 7;

/// Core data structure for emulating a 6502 CPU.
///
/// Instructions run whole: the cycle that fetches an opcode also performs every effect of the
/// instruction, and the remaining cycles of its cost are then spent idling. `clock_ticks` is
/// therefore always ahead of the wall clock by the number of cycles still pending.
pub struct CPU {
    /// The bus through which every read and write of the CPU goes.
    pub bus: Bus,
    /// The status register. See: model::StatusFlags
    pub stat: StatusFlags,
    // The accumulator register.
    pub a: u8,
    // The X register.
    pub x: u8,
    // The Y register.
    pub y: u8,
    // The stack pointer.
    pub stk_ptr: u8,
    // The program counter.
    pub p_ctr: u16,
    /// Total cycles consumed since reset, including the ones still pending.
    pub clock_ticks: u64,
    // The number of cycles left to execute for the current instruction.
    cycles: u8,
}

impl CPU {
    /// Construct a new CPU on the given bus. Call `reset` before clocking it.
    pub fn new(bus: Bus) -> CPU {
        CPU {
            bus,
            stat: StatusFlags::from_byte(POWER_UP_STATUS),
            a: 0x00,
            x: 0x00,
            y: 0x00,
            stk_ptr: 0xFD,
            p_ctr: 0x0000,
            clock_ticks: 0,
            cycles: 0,
        }
    }

    /// Iterate forward one clock cycle. On an instruction boundary this fetches, decodes and
    /// executes the next instruction; otherwise it only burns one of the pending cycles.
    pub fn clock(&mut self) -> Result<(), EmulationError> {
        if self.cycles == 0 {
            let pc = self.p_ctr;
            let opcode = self.bus.read(pc)?;
            let instruction = INSTRUCTIONS[opcode as usize].ok_or(EmulationError::UnknownOpcode { opcode, pc })?;

            if log_enabled!(Level::Trace) {
                trace!("{}", self.trace()?);
            }

            self.p_ctr = pc.wrapping_add(1);
            let cycles = self.execute(instruction)?;
            self.cycles = cycles;
            self.clock_ticks += cycles as u64;
        }

        self.cycles -= 1;
        Ok(())
    }

    /// Run exactly one instruction, first finishing whatever is still in flight.
    pub fn step(&mut self) -> Result<(), EmulationError> {
        while self.cycles > 0 {
            self.clock()?;
        }
        self.clock()?;
        while self.cycles > 0 {
            self.clock()?;
        }
        Ok(())
    }

    /// Whether the CPU sits on an instruction boundary.
    pub fn is_idle(&self) -> bool {
        self.cycles == 0
    }

    /// Account for cycles during which the CPU is halted by someone else (OAM DMA).
    pub fn stall(&mut self, cycles: u64) {
        self.clock_ticks += cycles;
    }

    /// Reset the CPU to a known state:
    ///
    /// * A, X and Y are set to 0
    /// * The stack pointer is set to 0xFD
    /// * The status register is set to 0x24 (I and U)
    /// * The program counter is set to the value at address 0xFFFD | 0xFFFC
    /// * The cycle count is set to 7 (because this operation takes time)
    pub fn reset(&mut self) -> Result<(), EmulationError> {
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.stk_ptr = 0xFD;
        self.stat = StatusFlags::from_byte(POWER_UP_STATUS);
        self.p_ctr = self.bus.read_word(RESET_VECTOR)?;

        self.cycles = INTERRUPT_CYCLES;
        self.clock_ticks = INTERRUPT_CYCLES as u64;
        Ok(())
    }

    /// Non-maskable interrupt. Must only be called on an instruction boundary.
    pub fn nmi(&mut self) -> Result<(), EmulationError> {
        debug!("NMI at ${:04X}, cycle {}", self.p_ctr, self.clock_ticks);
        self.interrupt(NMI_VECTOR)
    }

    /// Maskable interrupt request. Ignored while the I flag is set; returns whether it was taken.
    pub fn irq(&mut self) -> Result<bool, EmulationError> {
        if self.stat.contains(StatusFlags::I) {
            return Ok(false);
        }
        self.interrupt(IRQ_VECTOR)?;
        Ok(true)
    }

    fn interrupt(&mut self, vector: u16) -> Result<(), EmulationError> {
        self.push_word(self.p_ctr)?;
        // Hardware interrupts push the status with B clear.
        self.push((self.stat - StatusFlags::B).to_byte())?;
        self.stat.insert(StatusFlags::I);
        self.p_ctr = self.bus.read_word(vector)?;

        self.cycles = INTERRUPT_CYCLES;
        self.clock_ticks += INTERRUPT_CYCLES as u64;
        Ok(())
    }

    fn push(&mut self, data: u8) -> Result<(), EmulationError> {
        self.bus.write(STACK_PAGE | self.stk_ptr as u16, data)?;
        self.stk_ptr = self.stk_ptr.wrapping_sub(1);
        Ok(())
    }

    fn pull(&mut self) -> Result<u8, EmulationError> {
        self.stk_ptr = self.stk_ptr.wrapping_add(1);
        self.bus.read(STACK_PAGE | self.stk_ptr as u16)
    }

    fn push_word(&mut self, data: u16) -> Result<(), EmulationError> {
        self.push((data >> 8) as u8)?;
        self.push(data as u8)
    }

    fn pull_word(&mut self) -> Result<u16, EmulationError> {
        let lo = self.pull()? as u16;
        let hi = self.pull()? as u16;
        Ok((hi << 8) | lo)
    }
}

impl std::fmt::Debug for CPU {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            formatter,
            "PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.p_ctr,
            self.a,
            self.x,
            self.y,
            self.stat.to_byte(),
            self.stk_ptr,
            self.clock_ticks
        )
    }
}
