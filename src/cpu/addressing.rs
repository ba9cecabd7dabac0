//! Operand resolution for the 13 addressing modes.
//!
//! Resolution is a pure function of the mode, the operand bytes following the opcode and the
//! index registers: it reports where the operand lives, whether indexing crossed a page and how
//! many operand bytes the program counter has to skip. Only pointer and operand bytes are read;
//! the operand itself is left to the instruction.
//!
//! Reference: http://www.obelisk.me.uk/6502/addressing.html

use crate::bus::Bus;
use crate::error::EmulationError;
use crate::model::AddressingMode;

/// Where an instruction finds its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No operand (IMP).
    Implied,
    /// The accumulator (ACC).
    Accumulator,
    /// A memory location. Immediate operands point at the byte after the opcode; relative
    /// operands are the branch target.
    Address(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub operand: Operand,
    /// Indexing moved the address onto another page (or a branch target lies on another page
    /// than the next instruction).
    pub page_crossed: bool,
    /// Operand bytes consumed after the opcode.
    pub bytes: u16,
}

/// Resolve the operand of an instruction whose operand bytes start at `pc`.
pub fn resolve(mode: AddressingMode, bus: &mut Bus, pc: u16, x: u8, y: u8) -> Result<Resolved, EmulationError> {
    let (operand, page_crossed) = match mode {
        AddressingMode::IMP => (Operand::Implied, false),
        AddressingMode::ACC => (Operand::Accumulator, false),
        AddressingMode::IMM => (Operand::Address(pc), false),
        AddressingMode::ZPG => (Operand::Address(bus.read(pc)? as u16), false),
        // Zero page indexing wraps around within page zero.
        AddressingMode::ZPX => (Operand::Address(bus.read(pc)?.wrapping_add(x) as u16), false),
        AddressingMode::ZPY => (Operand::Address(bus.read(pc)?.wrapping_add(y) as u16), false),
        AddressingMode::ABS => (Operand::Address(bus.read_word(pc)?), false),
        AddressingMode::ABX => indexed(bus.read_word(pc)?, x),
        AddressingMode::ABY => indexed(bus.read_word(pc)?, y),
        AddressingMode::IND => {
            // The chip never carries into the pointer's high byte: a pointer at $xxFF takes its
            // high byte from $xx00.
            let pointer = bus.read_word(pc)?;
            let lo = bus.read(pointer)? as u16;
            let hi = bus.read((pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF))? as u16;
            (Operand::Address((hi << 8) | lo), false)
        }
        AddressingMode::IDX => {
            let pointer = bus.read(pc)?.wrapping_add(x);
            (Operand::Address(zero_page_word(bus, pointer)?), false)
        }
        AddressingMode::IDY => {
            let pointer = bus.read(pc)?;
            indexed(zero_page_word(bus, pointer)?, y)
        }
        AddressingMode::REL => {
            // Signed offset from the address of the next instruction.
            let offset = bus.read(pc)? as i8;
            let next = pc.wrapping_add(1);
            let target = next.wrapping_add(offset as u16);
            (Operand::Address(target), (next & 0xFF00) != (target & 0xFF00))
        }
    };

    Ok(Resolved {
        operand,
        page_crossed,
        bytes: mode.operand_len(),
    })
}

fn indexed(base: u16, index: u8) -> (Operand, bool) {
    let addr = base.wrapping_add(index as u16);
    (Operand::Address(addr), (base & 0xFF00) != (addr & 0xFF00))
}

/// Read a pointer stored in page zero; the high byte wraps from $FF to $00.
fn zero_page_word(bus: &mut Bus, pointer: u8) -> Result<u16, EmulationError> {
    let lo = bus.read(pointer as u16)? as u16;
    let hi = bus.read(pointer.wrapping_add(1) as u16)? as u16;
    Ok((hi << 8) | lo)
}
