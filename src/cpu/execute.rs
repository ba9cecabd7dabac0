//! Instruction semantics. Each operation runs to completion in one call and reports the number of
//! cycles it cost.
//!
//! Reference: http://www.obelisk.me.uk/6502/reference.html

use crate::cpu::addressing::{self, Operand};
use crate::cpu::{CPU, IRQ_VECTOR};
use crate::error::EmulationError;
use crate::model::{Instruction, OperatingMode, StatusFlags};

impl CPU {
    /// Execute `instruction`, whose opcode has already been consumed, and return its cycle cost.
    pub(super) fn execute(&mut self, instruction: Instruction) -> Result<u8, EmulationError> {
        let resolved = addressing::resolve(instruction.addr_mode, &mut self.bus, self.p_ctr, self.x, self.y)?;
        self.p_ctr = self.p_ctr.wrapping_add(resolved.bytes);
        let operand = resolved.operand;

        let mut cycles = instruction.cycles;
        if resolved.page_crossed && instruction.page_penalty {
            cycles += 1;
        }

        match instruction.op_mode {
            // -- Loads, stores and transfers -- //
            OperatingMode::LDA => {
                self.a = self.load(operand)?;
                self.stat.set_zn(self.a);
            }
            OperatingMode::LDX => {
                self.x = self.load(operand)?;
                self.stat.set_zn(self.x);
            }
            OperatingMode::LDY => {
                self.y = self.load(operand)?;
                self.stat.set_zn(self.y);
            }
            OperatingMode::STA => self.store(operand, self.a)?,
            OperatingMode::STX => self.store(operand, self.x)?,
            OperatingMode::STY => self.store(operand, self.y)?,
            OperatingMode::TAX => {
                self.x = self.a;
                self.stat.set_zn(self.x);
            }
            OperatingMode::TAY => {
                self.y = self.a;
                self.stat.set_zn(self.y);
            }
            OperatingMode::TXA => {
                self.a = self.x;
                self.stat.set_zn(self.a);
            }
            OperatingMode::TYA => {
                self.a = self.y;
                self.stat.set_zn(self.a);
            }
            OperatingMode::TSX => {
                self.x = self.stk_ptr;
                self.stat.set_zn(self.x);
            }
            // TXS is the only transfer that leaves the flags alone.
            OperatingMode::TXS => self.stk_ptr = self.x,

            // -- Stack -- //
            OperatingMode::PHA => self.push(self.a)?,
            OperatingMode::PHP => self.push((self.stat | StatusFlags::B).to_byte())?,
            OperatingMode::PLA => {
                self.a = self.pull()?;
                self.stat.set_zn(self.a);
            }
            OperatingMode::PLP => self.stat = StatusFlags::from_byte(self.pull()?) - StatusFlags::B,

            // -- Logic and arithmetic -- //
            OperatingMode::AND => {
                self.a &= self.load(operand)?;
                self.stat.set_zn(self.a);
            }
            OperatingMode::ORA => {
                self.a |= self.load(operand)?;
                self.stat.set_zn(self.a);
            }
            OperatingMode::EOR => {
                self.a ^= self.load(operand)?;
                self.stat.set_zn(self.a);
            }
            OperatingMode::BIT => {
                let m = self.load(operand)?;
                self.stat.set(StatusFlags::Z, self.a & m == 0);
                self.stat.set(StatusFlags::V, m & (1 << 6) != 0);
                self.stat.set(StatusFlags::N, m & (1 << 7) != 0);
            }
            OperatingMode::ADC => {
                let m = self.load(operand)?;
                self.add_with_carry(m);
            }
            // A - M - (1 - C) is A + !M + C.
            OperatingMode::SBC => {
                let m = self.load(operand)?;
                self.add_with_carry(!m);
            }
            OperatingMode::CMP => {
                let m = self.load(operand)?;
                self.compare(self.a, m);
            }
            OperatingMode::CPX => {
                let m = self.load(operand)?;
                self.compare(self.x, m);
            }
            OperatingMode::CPY => {
                let m = self.load(operand)?;
                self.compare(self.y, m);
            }

            // -- Increments, decrements, shifts and rotates -- //
            OperatingMode::INC => {
                self.modify(operand, |_, m| m.wrapping_add(1))?;
            }
            OperatingMode::DEC => {
                self.modify(operand, |_, m| m.wrapping_sub(1))?;
            }
            OperatingMode::INX => {
                self.x = self.x.wrapping_add(1);
                self.stat.set_zn(self.x);
            }
            OperatingMode::INY => {
                self.y = self.y.wrapping_add(1);
                self.stat.set_zn(self.y);
            }
            OperatingMode::DEX => {
                self.x = self.x.wrapping_sub(1);
                self.stat.set_zn(self.x);
            }
            OperatingMode::DEY => {
                self.y = self.y.wrapping_sub(1);
                self.stat.set_zn(self.y);
            }
            OperatingMode::ASL => {
                self.modify(operand, shift_left)?;
            }
            OperatingMode::LSR => {
                self.modify(operand, shift_right)?;
            }
            OperatingMode::ROL => {
                self.modify(operand, rotate_left)?;
            }
            OperatingMode::ROR => {
                self.modify(operand, rotate_right)?;
            }

            // -- Jumps, calls and interrupts -- //
            OperatingMode::JMP => self.p_ctr = address(operand),
            OperatingMode::JSR => {
                self.push_word(self.p_ctr.wrapping_sub(1))?;
                self.p_ctr = address(operand);
            }
            OperatingMode::RTS => self.p_ctr = self.pull_word()?.wrapping_add(1),
            OperatingMode::RTI => {
                self.stat = StatusFlags::from_byte(self.pull()?) - StatusFlags::B;
                self.p_ctr = self.pull_word()?;
            }
            OperatingMode::BRK => {
                // BRK skips a padding byte; the pushed copy of the status carries B.
                self.push_word(self.p_ctr.wrapping_add(1))?;
                self.push((self.stat | StatusFlags::B).to_byte())?;
                self.stat.insert(StatusFlags::I);
                self.p_ctr = self.bus.read_word(IRQ_VECTOR)?;
            }

            // -- Branches -- //
            OperatingMode::BCC => cycles = self.branch(!self.stat.contains(StatusFlags::C), operand, resolved.page_crossed),
            OperatingMode::BCS => cycles = self.branch(self.stat.contains(StatusFlags::C), operand, resolved.page_crossed),
            OperatingMode::BNE => cycles = self.branch(!self.stat.contains(StatusFlags::Z), operand, resolved.page_crossed),
            OperatingMode::BEQ => cycles = self.branch(self.stat.contains(StatusFlags::Z), operand, resolved.page_crossed),
            OperatingMode::BPL => cycles = self.branch(!self.stat.contains(StatusFlags::N), operand, resolved.page_crossed),
            OperatingMode::BMI => cycles = self.branch(self.stat.contains(StatusFlags::N), operand, resolved.page_crossed),
            OperatingMode::BVC => cycles = self.branch(!self.stat.contains(StatusFlags::V), operand, resolved.page_crossed),
            OperatingMode::BVS => cycles = self.branch(self.stat.contains(StatusFlags::V), operand, resolved.page_crossed),

            // -- Flags -- //
            OperatingMode::CLC => self.stat.remove(StatusFlags::C),
            OperatingMode::CLD => self.stat.remove(StatusFlags::D),
            OperatingMode::CLI => self.stat.remove(StatusFlags::I),
            OperatingMode::CLV => self.stat.remove(StatusFlags::V),
            OperatingMode::SEC => self.stat.insert(StatusFlags::C),
            OperatingMode::SED => self.stat.insert(StatusFlags::D),
            OperatingMode::SEI => self.stat.insert(StatusFlags::I),

            // The multi-byte NOPs still read their operand.
            OperatingMode::NOP => {
                if let Operand::Address(addr) = operand {
                    self.bus.read(addr)?;
                }
            }

            // -- Undocumented -- //
            OperatingMode::LAX => {
                let m = self.load(operand)?;
                self.a = m;
                self.x = m;
                self.stat.set_zn(m);
            }
            OperatingMode::SAX => self.store(operand, self.a & self.x)?,
            OperatingMode::DCP => {
                let m = self.modify(operand, |_, m| m.wrapping_sub(1))?;
                self.compare(self.a, m);
            }
            OperatingMode::ISB => {
                let m = self.modify(operand, |_, m| m.wrapping_add(1))?;
                self.add_with_carry(!m);
            }
            OperatingMode::SLO => {
                self.a |= self.modify(operand, shift_left)?;
                self.stat.set_zn(self.a);
            }
            OperatingMode::SRE => {
                self.a ^= self.modify(operand, shift_right)?;
                self.stat.set_zn(self.a);
            }
            OperatingMode::RLA => {
                self.a &= self.modify(operand, rotate_left)?;
                self.stat.set_zn(self.a);
            }
            OperatingMode::RRA => {
                let m = self.modify(operand, rotate_right)?;
                self.add_with_carry(m);
            }
        }

        Ok(cycles)
    }

    fn load(&mut self, operand: Operand) -> Result<u8, EmulationError> {
        match operand {
            Operand::Address(addr) => self.bus.read(addr),
            Operand::Accumulator | Operand::Implied => Ok(self.a),
        }
    }

    fn store(&mut self, operand: Operand, data: u8) -> Result<(), EmulationError> {
        match operand {
            Operand::Address(addr) => self.bus.write(addr, data),
            Operand::Accumulator => {
                self.a = data;
                Ok(())
            }
            Operand::Implied => Ok(()),
        }
    }

    /// Read-modify-write: apply `f` to the operand, write the result back and set Z and N from it.
    fn modify<F>(&mut self, operand: Operand, f: F) -> Result<u8, EmulationError>
    where
        F: FnOnce(&mut StatusFlags, u8) -> u8,
    {
        let m = self.load(operand)?;
        let result = f(&mut self.stat, m);
        self.store(operand, result)?;
        self.stat.set_zn(result);
        Ok(result)
    }

    /// A,Z,C,N,V = A + M + C. Decimal mode does not exist on the 2A03.
    fn add_with_carry(&mut self, m: u8) {
        let carry = self.stat.contains(StatusFlags::C) as u16;
        let sum = self.a as u16 + m as u16 + carry;
        let result = sum as u8;

        self.stat.set(StatusFlags::C, sum > 0xFF);
        // Overflow when both inputs share a sign that the result does not.
        self.stat.set(StatusFlags::V, (!(self.a ^ m) & (self.a ^ result) & 0x80) != 0);
        self.a = result;
        self.stat.set_zn(result);
    }

    fn compare(&mut self, register: u8, m: u8) {
        self.stat.set(StatusFlags::C, register >= m);
        self.stat.set_zn(register.wrapping_sub(m));
    }

    /// Take the branch when `taken`; 2 cycles, plus one if taken, plus one more across a page.
    fn branch(&mut self, taken: bool, operand: Operand, page_crossed: bool) -> u8 {
        if !taken {
            return 2;
        }
        self.p_ctr = address(operand);
        if page_crossed {
            4
        } else {
            3
        }
    }
}

fn address(operand: Operand) -> u16 {
    match operand {
        Operand::Address(addr) => addr,
        Operand::Accumulator | Operand::Implied => 0,
    }
}

fn shift_left(stat: &mut StatusFlags, m: u8) -> u8 {
    stat.set(StatusFlags::C, m & 0x80 != 0);
    m << 1
}

fn shift_right(stat: &mut StatusFlags, m: u8) -> u8 {
    stat.set(StatusFlags::C, m & 0x01 != 0);
    m >> 1
}

fn rotate_left(stat: &mut StatusFlags, m: u8) -> u8 {
    let carry = stat.contains(StatusFlags::C) as u8;
    stat.set(StatusFlags::C, m & 0x80 != 0);
    (m << 1) | carry
}

fn rotate_right(stat: &mut StatusFlags, m: u8) -> u8 {
    let carry = stat.contains(StatusFlags::C) as u8;
    stat.set(StatusFlags::C, m & 0x01 != 0);
    (m >> 1) | (carry << 7)
}

#[cfg(test)]
mod tests {
    use crate::cpu::tests::cpu_with_program;
    use crate::model::StatusFlags;
    use expectest::prelude::*;

    /// Run SBC #m with A and P preset, returning (A, P).
    fn sbc(a: u8, m: u8, p: u8) -> (u8, u8) {
        let mut cpu = cpu_with_program(&[0xE9, m]);
        cpu.a = a;
        cpu.stat = StatusFlags::from_byte(p);
        cpu.step().unwrap();
        (cpu.a, cpu.stat.to_byte())
    }

    fn adc(a: u8, m: u8, p: u8) -> (u8, u8) {
        let mut cpu = cpu_with_program(&[0x69, m]);
        cpu.a = a;
        cpu.stat = StatusFlags::from_byte(p);
        cpu.step().unwrap();
        (cpu.a, cpu.stat.to_byte())
    }

    #[test]
    fn sbc_boundaries() {
        expect!(sbc(0xFF, 0x28, 0x85)).to(be_eq((0xD7, 0xA5)));
        expect!(sbc(0x00, 0x00, 0x07)).to(be_eq((0x00, 0x27)));
        expect!(sbc(0x5F, 0x80, 0x05)).to(be_eq((0xDF, 0xE4)));
        expect!(sbc(0x80, 0x01, 0x25)).to(be_eq((0x7F, 0x65)));
        expect!(sbc(0x00, 0x01, 0x25)).to(be_eq((0xFF, 0xA4)));
        expect!(sbc(0x7F, 0xFF, 0x25)).to(be_eq((0x80, 0xE4)));
        expect!(sbc(0x40, 0x40, 0x24)).to(be_eq((0xFF, 0xA4)));
    }

    #[test]
    fn adc_boundaries() {
        expect!(adc(0x7F, 0x01, 0x24)).to(be_eq((0x80, 0xE4)));
        expect!(adc(0xFF, 0x01, 0x24)).to(be_eq((0x00, 0x27)));
        expect!(adc(0x80, 0x80, 0x24)).to(be_eq((0x00, 0x67)));
        expect!(adc(0x00, 0x00, 0x25)).to(be_eq((0x01, 0x24)));
        expect!(adc(0x80, 0x7F, 0x25)).to(be_eq((0x00, 0x27)));
    }

    #[test]
    fn decimal_flag_does_not_change_adc() {
        expect!(adc(0x09, 0x01, 0x2C)).to(be_eq((0x0A, 0x2C)));
    }

    #[test]
    fn compare_sets_carry_when_register_is_not_smaller() {
        // LDA #$40; CMP #$40; CMP #$41
        let mut cpu = cpu_with_program(&[0xA9, 0x40, 0xC9, 0x40, 0xC9, 0x41]);
        cpu.step().unwrap();
        cpu.step().unwrap();
        expect!(cpu.stat.contains(StatusFlags::C | StatusFlags::Z)).to(be_true());
        cpu.step().unwrap();
        expect!(cpu.stat.contains(StatusFlags::C)).to(be_false());
        expect!(cpu.stat.contains(StatusFlags::N)).to(be_true());
    }

    #[test]
    fn branch_costs() {
        // BNE +2 not taken (Z set), BEQ +2 taken same page
        let mut cpu = cpu_with_program(&[0xD0, 0x02, 0xF0, 0x02]);
        cpu.stat.insert(StatusFlags::Z);
        cpu.step().unwrap();
        expect!(cpu.clock_ticks).to(be_eq(2));
        cpu.step().unwrap();
        expect!(cpu.clock_ticks).to(be_eq(5));
        expect!(cpu.p_ctr).to(be_eq(0x0206));
    }

    #[test]
    fn branch_across_page_costs_four() {
        // At $0200: BCC -3 lands on $01FF.
        let mut cpu = cpu_with_program(&[0x90, 0xFD]);
        cpu.step().unwrap();
        expect!(cpu.p_ctr).to(be_eq(0x01FF));
        expect!(cpu.clock_ticks).to(be_eq(4));
    }

    #[test]
    fn page_penalty_only_for_reads() {
        // LDX #$FF; LDA $0201,X (crosses); STA $0201,X (never pays extra)
        let mut cpu = cpu_with_program(&[0xA2, 0xFF, 0xBD, 0x01, 0x02, 0x9D, 0x01, 0x02]);
        cpu.step().unwrap();
        cpu.step().unwrap();
        expect!(cpu.clock_ticks).to(be_eq(2 + 5));
        cpu.step().unwrap();
        expect!(cpu.clock_ticks).to(be_eq(2 + 5 + 5));
    }

    #[test]
    fn jsr_and_rts() {
        // JSR $0206; BRK; BRK; BRK; LDA #$01; RTS
        let mut cpu = cpu_with_program(&[0x20, 0x06, 0x02, 0x00, 0x00, 0x00, 0xA9, 0x01, 0x60]);
        cpu.step().unwrap();
        expect!(cpu.p_ctr).to(be_eq(0x0206));
        expect!(cpu.bus.read(0x01FD).unwrap()).to(be_eq(0x02));
        expect!(cpu.bus.read(0x01FC).unwrap()).to(be_eq(0x02));
        cpu.step().unwrap();
        cpu.step().unwrap();
        expect!(cpu.p_ctr).to(be_eq(0x0203));
        expect!(cpu.stk_ptr).to(be_eq(0xFD));
    }

    #[test]
    fn php_sets_break_plp_discards_it() {
        // PHP; PLA; PHA; PLP
        let mut cpu = cpu_with_program(&[0x08, 0x68, 0x48, 0x28]);
        cpu.stat = StatusFlags::from_byte(0x21);
        cpu.step().unwrap();
        cpu.step().unwrap();
        expect!(cpu.a).to(be_eq(0x31));
        cpu.step().unwrap();
        cpu.step().unwrap();
        expect!(cpu.stat.to_byte()).to(be_eq(0x21));
    }

    #[test]
    fn plp_forces_unused_bit() {
        // LDA #$00; PHA; PLP
        let mut cpu = cpu_with_program(&[0xA9, 0x00, 0x48, 0x28]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        expect!(cpu.stat.to_byte()).to(be_eq(0x20));
    }

    #[test]
    fn rmw_on_accumulator() {
        // SEC; LDA #$81; ROL A; ROR A; LSR A; ASL A
        let mut cpu = cpu_with_program(&[0x38, 0xA9, 0x81, 0x2A, 0x6A, 0x4A, 0x0A]);
        cpu.step().unwrap();
        cpu.step().unwrap();
        cpu.step().unwrap();
        expect!(cpu.a).to(be_eq(0x03));
        expect!(cpu.stat.contains(StatusFlags::C)).to(be_true());
        cpu.step().unwrap();
        expect!(cpu.a).to(be_eq(0x81));
        cpu.step().unwrap();
        expect!(cpu.a).to(be_eq(0x40));
        expect!(cpu.stat.contains(StatusFlags::C)).to(be_true());
        cpu.step().unwrap();
        expect!(cpu.a).to(be_eq(0x80));
        expect!(cpu.stat.contains(StatusFlags::N)).to(be_true());
    }

    #[test]
    fn inc_and_dec_memory() {
        // INC $10; INC $10; DEC $11
        let mut cpu = cpu_with_program(&[0xE6, 0x10, 0xE6, 0x10, 0xC6, 0x11]);
        cpu.bus.write(0x0010, 0xFF).unwrap();
        cpu.step().unwrap();
        expect!(cpu.stat.contains(StatusFlags::Z)).to(be_true());
        cpu.step().unwrap();
        cpu.step().unwrap();
        expect!(cpu.bus.read(0x0010).unwrap()).to(be_eq(0x01));
        expect!(cpu.bus.read(0x0011).unwrap()).to(be_eq(0xFF));
        expect!(cpu.stat.contains(StatusFlags::N)).to(be_true());
        expect!(cpu.clock_ticks).to(be_eq(15));
    }

    #[test]
    fn undocumented_combinations() {
        // LAX $10; SAX $11; DCP $12; ISB $13; SLO $14; SRE $15; RLA $16; RRA $17
        let program = [
            0xA7, 0x10, 0x87, 0x11, 0xC7, 0x12, 0xE7, 0x13, 0xA7, 0x10, 0x07, 0x14, 0x47, 0x15, 0x27, 0x16, 0x67, 0x17,
        ];
        let mut cpu = cpu_with_program(&program);
        for (addr, data) in &[(0x10, 0x0F), (0x12, 0x10), (0x13, 0x04), (0x14, 0x40), (0x15, 0x03), (0x16, 0x81), (0x17, 0x02)] {
            cpu.bus.write(*addr, *data).unwrap();
        }

        cpu.step().unwrap();
        expect!((cpu.a, cpu.x)).to(be_eq((0x0F, 0x0F)));

        cpu.step().unwrap();
        expect!(cpu.bus.read(0x11).unwrap()).to(be_eq(0x0F));

        // $10 - 1 = $0F equals A: Z and C set.
        cpu.step().unwrap();
        expect!(cpu.bus.read(0x12).unwrap()).to(be_eq(0x0F));
        expect!(cpu.stat.contains(StatusFlags::Z | StatusFlags::C)).to(be_true());

        // $04 + 1 = $05; A = $0F - $05 with carry set.
        cpu.step().unwrap();
        expect!(cpu.bus.read(0x13).unwrap()).to(be_eq(0x05));
        expect!(cpu.a).to(be_eq(0x0A));

        // Reload A = $0F, then $40 << 1 = $80 ORed in.
        cpu.step().unwrap();
        cpu.step().unwrap();
        expect!(cpu.bus.read(0x14).unwrap()).to(be_eq(0x80));
        expect!(cpu.a).to(be_eq(0x8F));

        // $03 >> 1 = $01 (carry out) EORed in.
        cpu.step().unwrap();
        expect!(cpu.a).to(be_eq(0x8E));
        expect!(cpu.stat.contains(StatusFlags::C)).to(be_true());

        // $81 rotated left with carry = $03 (carry out); A = $8E & $03.
        cpu.step().unwrap();
        expect!(cpu.bus.read(0x16).unwrap()).to(be_eq(0x03));
        expect!(cpu.a).to(be_eq(0x02));

        // $02 rotated right with carry = $81; A = $02 + $81 + 0.
        cpu.step().unwrap();
        expect!(cpu.bus.read(0x17).unwrap()).to(be_eq(0x81));
        expect!(cpu.a).to(be_eq(0x83));
    }
}
