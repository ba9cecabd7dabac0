use crate::cpu::CPU;
use crate::error::EmulationError;
use crate::model::{AddressingMode, Instruction, INSTRUCTIONS};

impl CPU {
    /// Disassemble the instruction at the program counter, followed by the register state, in
    /// the column layout of nestest.log.
    pub fn trace(&mut self) -> Result<String, EmulationError> {
        let pc = self.p_ctr;
        let opcode = self.bus.read(pc)?;
        let instruction = INSTRUCTIONS[opcode as usize].ok_or(EmulationError::UnknownOpcode { opcode, pc })?;

        let mut bytes = vec![opcode];
        for offset in 1..instruction.size() {
            bytes.push(self.bus.read(pc.wrapping_add(offset))?);
        }
        Ok(format_line(pc, &bytes, &instruction, self))
    }
}

/// `C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7`
///
/// Undocumented instructions get a `*` in front of the mnemonic.
pub fn format_line(pc: u16, bytes: &[u8], instruction: &Instruction, cpu: &CPU) -> String {
    let hex = bytes.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ");
    let marker = if instruction.documented { ' ' } else { '*' };
    format!(
        "{:04X}  {:<8} {}{} {:<27} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
        pc,
        hex,
        marker,
        instruction.name,
        operand_text(pc, bytes, instruction.addr_mode),
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.stat.to_byte(),
        cpu.stk_ptr,
        cpu.clock_ticks
    )
}

fn operand_text(pc: u16, bytes: &[u8], mode: AddressingMode) -> String {
    let lo = bytes.get(1).copied().unwrap_or(0);
    let hi = bytes.get(2).copied().unwrap_or(0);
    let word = ((hi as u16) << 8) | lo as u16;
    match mode {
        AddressingMode::IMP => String::new(),
        AddressingMode::ACC => "A".to_string(),
        AddressingMode::IMM => format!("#${:02X}", lo),
        AddressingMode::ZPG => format!("${:02X}", lo),
        AddressingMode::ZPX => format!("${:02X},X", lo),
        AddressingMode::ZPY => format!("${:02X},Y", lo),
        AddressingMode::ABS => format!("${:04X}", word),
        AddressingMode::ABX => format!("${:04X},X", word),
        AddressingMode::ABY => format!("${:04X},Y", word),
        AddressingMode::IND => format!("(${:04X})", word),
        AddressingMode::IDX => format!("(${:02X},X)", lo),
        AddressingMode::IDY => format!("(${:02X}),Y", lo),
        AddressingMode::REL => format!("${:04X}", pc.wrapping_add(2).wrapping_add(lo as i8 as u16)),
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::tests::cpu_with_program;
    use expectest::prelude::*;

    #[test]
    fn trace_line_layout() {
        let mut cpu = cpu_with_program(&[0x4C, 0xF5, 0xC5]);
        cpu.clock_ticks = 7;
        expect!(cpu.trace().unwrap()).to(be_eq(
            "0200  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7".to_string(),
        ));
    }

    #[test]
    fn undocumented_marker_and_branch_target() {
        let mut cpu = cpu_with_program(&[0x04, 0xA9, 0xD0, 0xFC]);
        expect!(cpu.trace().unwrap().starts_with("0200  04 A9    *NOP $A9 ")).to(be_true());
        cpu.p_ctr = 0x0202;
        expect!(cpu.trace().unwrap().starts_with("0202  D0 FC     BNE $0200 ")).to(be_true());
    }

    #[test]
    fn indirect_forms() {
        let mut cpu = cpu_with_program(&[0xB1, 0x33, 0x6C, 0x00, 0x03, 0x0A]);
        expect!(cpu.trace().unwrap().starts_with("0200  B1 33     LDA ($33),Y ")).to(be_true());
        cpu.p_ctr = 0x0202;
        expect!(cpu.trace().unwrap().starts_with("0202  6C 00 03  JMP ($0300) ")).to(be_true());
        cpu.p_ctr = 0x0205;
        expect!(cpu.trace().unwrap().starts_with("0205  0A        ASL A ")).to(be_true());
    }
}
