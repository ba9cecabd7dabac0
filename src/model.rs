use lazy_static::lazy_static;

/// A basic structure of data defining an instruction supported by the CPU. Each instruction is
/// submitted to the CPU via a single byte which determines the functionality of the instruction
/// in how it loads its data from memory (if any) and how it operates on that data.
///
/// There are 56 documented operations, 8 undocumented ones that real software depends on, and
/// 13 addressing modes. Not all operations support all addressing modes. The input format for the
/// instruction opcode (a byte) allows for 256 total combinations; the ones that have no entry in
/// the table halt emulation.
///
/// For reference: http://www.obelisk.me.uk/6502/reference.html
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction {
    // The name of the instruction (3 alphabetic characters, all upper-case)
    pub name: &'static str,
    // The base number of cycles required for computing this instruction
    pub cycles: u8,
    // Whether crossing a page boundary while indexing costs one more cycle. Stores and
    // read-modify-write instructions always pay the worst case instead, so this is false for them.
    pub page_penalty: bool,
    // Undocumented opcodes are flagged so traces can mark them the way nestest.log does.
    pub documented: bool,
    // The operating mode to use for implementation of this instruction.
    pub op_mode: OperatingMode,
    // The addressing mode to use for implementation of this instruction.
    pub addr_mode: AddressingMode,
}

impl Instruction {
    fn new(name: &'static str, op_mode: OperatingMode, addr_mode: AddressingMode, cycles: u8) -> Instruction {
        Instruction {
            name,
            cycles,
            page_penalty: false,
            documented: true,
            op_mode,
            addr_mode,
        }
    }

    fn with_page_penalty(mut self) -> Instruction {
        self.page_penalty = true;
        self
    }

    fn undocumented(mut self) -> Instruction {
        self.documented = false;
        self
    }

    /// Total instruction length in bytes, opcode included.
    pub fn size(&self) -> u16 {
        1 + self.addr_mode.operand_len()
    }
}

bitflags! {
    /// The set of flags which are used to compose the status code bitmask on the CPU.
    /// The status code bitmask is updated after every instruction, and thus the bitmask can be used
    /// to inform future instructions about prior results, or to control various aspects of
    /// functionality, e.g., if the I flag is set (disable interrupts), then IRQ signals can be
    /// ignored (but NMI cannot).
    ///
    /// Bit 5 (U) has no storage on the chip and always reads back as 1. B only exists in the copies
    /// pushed by PHP and BRK.
    pub struct StatusFlags: u8 {
        const C = 1;      // Carry Bit
        const Z = 1 << 1; // Zero
        const I = 1 << 2; // Disable Interrupts
        const D = 1 << 3; // Decimal Mode (no effect on the 2A03)
        const B = 1 << 4; // Break
        const U = 1 << 5; // Unused
        const V = 1 << 6; // Overflow
        const N = 1 << 7; // Negative
    }
}

impl StatusFlags {
    /// Pack the flags into the byte layout used on the stack (C = bit 0 ... N = bit 7).
    pub fn to_byte(self) -> u8 {
        (self | StatusFlags::U).bits()
    }

    /// Unpack a byte into the flag set. Bit 5 is forced on.
    pub fn from_byte(data: u8) -> StatusFlags {
        StatusFlags::from_bits_truncate(data) | StatusFlags::U
    }

    /// Sets Z and N from a result byte, the convention shared by nearly every instruction.
    pub fn set_zn(&mut self, value: u8) {
        self.set(StatusFlags::Z, value == 0);
        self.set(StatusFlags::N, value & 0x80 != 0);
    }
}

/// The defined and supported addressing modes. Each of these determines how an instruction retrieves
/// the data to be used for its operation.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum AddressingMode {
    ABS,
    ABX,
    ABY,
    ACC,
    IMP,
    IMM,
    IND,
    IDX,
    IDY,
    REL,
    ZPG,
    ZPX,
    ZPY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub fn operand_len(self) -> u16 {
        match self {
            AddressingMode::ACC | AddressingMode::IMP => 0,
            AddressingMode::IMM
            | AddressingMode::IDX
            | AddressingMode::IDY
            | AddressingMode::REL
            | AddressingMode::ZPG
            | AddressingMode::ZPX
            | AddressingMode::ZPY => 1,
            AddressingMode::ABS | AddressingMode::ABX | AddressingMode::ABY | AddressingMode::IND => 2,
        }
    }
}

/// The defined and supported operating modes. Each of these determines how an instruction operates
/// on its given data. The last eight are undocumented combinations of a read-modify-write and an
/// ALU operation.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum OperatingMode {
    ADC,
    AND,
    ASL,
    BCC,
    BCS,
    BEQ,
    BIT,
    BMI,
    BNE,
    BPL,
    BRK,
    BVC,
    BVS,
    CLC,
    CLD,
    CLI,
    CLV,
    CMP,
    CPX,
    CPY,
    DEC,
    DEX,
    DEY,
    EOR,
    INC,
    INX,
    INY,
    JMP,
    JSR,
    LDA,
    LDX,
    LDY,
    LSR,
    NOP,
    ORA,
    PHA,
    PHP,
    PLA,
    PLP,
    ROL,
    ROR,
    RTI,
    RTS,
    SBC,
    SEC,
    SED,
    SEI,
    STA,
    STX,
    STY,
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
    // Undocumented
    DCP,
    ISB,
    LAX,
    RLA,
    RRA,
    SAX,
    SLO,
    SRE,
}

lazy_static! {
    /// Static mapping of instruction opcodes (their index in the vector) and some properties about those instructions.
    /// Namely:
    /// * The number of cycles that they consume
    /// * Whether a page cross while indexing adds a cycle
    /// * Their operating mode
    /// * Their addressing mode
    ///
    /// `None` marks opcodes with no defined behavior (the JAM bytes and the unstable undocumented
    /// opcodes).
    pub static ref INSTRUCTIONS: Vec<Option<Instruction>> = vec![
        Some(Instruction::new("BRK", OperatingMode::BRK, AddressingMode::IMP, 7)), // 0x00
        Some(Instruction::new("ORA", OperatingMode::ORA, AddressingMode::IDX, 6)), // 0x01
        None, // 0x02
        Some(Instruction::new("SLO", OperatingMode::SLO, AddressingMode::IDX, 8).undocumented()), // 0x03
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ZPG, 3).undocumented()), // 0x04
        Some(Instruction::new("ORA", OperatingMode::ORA, AddressingMode::ZPG, 3)), // 0x05
        Some(Instruction::new("ASL", OperatingMode::ASL, AddressingMode::ZPG, 5)), // 0x06
        Some(Instruction::new("SLO", OperatingMode::SLO, AddressingMode::ZPG, 5).undocumented()), // 0x07
        Some(Instruction::new("PHP", OperatingMode::PHP, AddressingMode::IMP, 3)), // 0x08
        Some(Instruction::new("ORA", OperatingMode::ORA, AddressingMode::IMM, 2)), // 0x09
        Some(Instruction::new("ASL", OperatingMode::ASL, AddressingMode::ACC, 2)), // 0x0A
        None, // 0x0B
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ABS, 4).undocumented()), // 0x0C
        Some(Instruction::new("ORA", OperatingMode::ORA, AddressingMode::ABS, 4)), // 0x0D
        Some(Instruction::new("ASL", OperatingMode::ASL, AddressingMode::ABS, 6)), // 0x0E
        Some(Instruction::new("SLO", OperatingMode::SLO, AddressingMode::ABS, 6).undocumented()), // 0x0F
        Some(Instruction::new("BPL", OperatingMode::BPL, AddressingMode::REL, 2)), // 0x10
        Some(Instruction::new("ORA", OperatingMode::ORA, AddressingMode::IDY, 5).with_page_penalty()), // 0x11
        None, // 0x12
        Some(Instruction::new("SLO", OperatingMode::SLO, AddressingMode::IDY, 8).undocumented()), // 0x13
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ZPX, 4).undocumented()), // 0x14
        Some(Instruction::new("ORA", OperatingMode::ORA, AddressingMode::ZPX, 4)), // 0x15
        Some(Instruction::new("ASL", OperatingMode::ASL, AddressingMode::ZPX, 6)), // 0x16
        Some(Instruction::new("SLO", OperatingMode::SLO, AddressingMode::ZPX, 6).undocumented()), // 0x17
        Some(Instruction::new("CLC", OperatingMode::CLC, AddressingMode::IMP, 2)), // 0x18
        Some(Instruction::new("ORA", OperatingMode::ORA, AddressingMode::ABY, 4).with_page_penalty()), // 0x19
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMP, 2).undocumented()), // 0x1A
        Some(Instruction::new("SLO", OperatingMode::SLO, AddressingMode::ABY, 7).undocumented()), // 0x1B
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ABX, 4).with_page_penalty().undocumented()), // 0x1C
        Some(Instruction::new("ORA", OperatingMode::ORA, AddressingMode::ABX, 4).with_page_penalty()), // 0x1D
        Some(Instruction::new("ASL", OperatingMode::ASL, AddressingMode::ABX, 7)), // 0x1E
        Some(Instruction::new("SLO", OperatingMode::SLO, AddressingMode::ABX, 7).undocumented()), // 0x1F
        Some(Instruction::new("JSR", OperatingMode::JSR, AddressingMode::ABS, 6)), // 0x20
        Some(Instruction::new("AND", OperatingMode::AND, AddressingMode::IDX, 6)), // 0x21
        None, // 0x22
        Some(Instruction::new("RLA", OperatingMode::RLA, AddressingMode::IDX, 8).undocumented()), // 0x23
        Some(Instruction::new("BIT", OperatingMode::BIT, AddressingMode::ZPG, 3)), // 0x24
        Some(Instruction::new("AND", OperatingMode::AND, AddressingMode::ZPG, 3)), // 0x25
        Some(Instruction::new("ROL", OperatingMode::ROL, AddressingMode::ZPG, 5)), // 0x26
        Some(Instruction::new("RLA", OperatingMode::RLA, AddressingMode::ZPG, 5).undocumented()), // 0x27
        Some(Instruction::new("PLP", OperatingMode::PLP, AddressingMode::IMP, 4)), // 0x28
        Some(Instruction::new("AND", OperatingMode::AND, AddressingMode::IMM, 2)), // 0x29
        Some(Instruction::new("ROL", OperatingMode::ROL, AddressingMode::ACC, 2)), // 0x2A
        None, // 0x2B
        Some(Instruction::new("BIT", OperatingMode::BIT, AddressingMode::ABS, 4)), // 0x2C
        Some(Instruction::new("AND", OperatingMode::AND, AddressingMode::ABS, 4)), // 0x2D
        Some(Instruction::new("ROL", OperatingMode::ROL, AddressingMode::ABS, 6)), // 0x2E
        Some(Instruction::new("RLA", OperatingMode::RLA, AddressingMode::ABS, 6).undocumented()), // 0x2F
        Some(Instruction::new("BMI", OperatingMode::BMI, AddressingMode::REL, 2)), // 0x30
        Some(Instruction::new("AND", OperatingMode::AND, AddressingMode::IDY, 5).with_page_penalty()), // 0x31
        None, // 0x32
        Some(Instruction::new("RLA", OperatingMode::RLA, AddressingMode::IDY, 8).undocumented()), // 0x33
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ZPX, 4).undocumented()), // 0x34
        Some(Instruction::new("AND", OperatingMode::AND, AddressingMode::ZPX, 4)), // 0x35
        Some(Instruction::new("ROL", OperatingMode::ROL, AddressingMode::ZPX, 6)), // 0x36
        Some(Instruction::new("RLA", OperatingMode::RLA, AddressingMode::ZPX, 6).undocumented()), // 0x37
        Some(Instruction::new("SEC", OperatingMode::SEC, AddressingMode::IMP, 2)), // 0x38
        Some(Instruction::new("AND", OperatingMode::AND, AddressingMode::ABY, 4).with_page_penalty()), // 0x39
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMP, 2).undocumented()), // 0x3A
        Some(Instruction::new("RLA", OperatingMode::RLA, AddressingMode::ABY, 7).undocumented()), // 0x3B
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ABX, 4).with_page_penalty().undocumented()), // 0x3C
        Some(Instruction::new("AND", OperatingMode::AND, AddressingMode::ABX, 4).with_page_penalty()), // 0x3D
        Some(Instruction::new("ROL", OperatingMode::ROL, AddressingMode::ABX, 7)), // 0x3E
        Some(Instruction::new("RLA", OperatingMode::RLA, AddressingMode::ABX, 7).undocumented()), // 0x3F
        Some(Instruction::new("RTI", OperatingMode::RTI, AddressingMode::IMP, 6)), // 0x40
        Some(Instruction::new("EOR", OperatingMode::EOR, AddressingMode::IDX, 6)), // 0x41
        None, // 0x42
        Some(Instruction::new("SRE", OperatingMode::SRE, AddressingMode::IDX, 8).undocumented()), // 0x43
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ZPG, 3).undocumented()), // 0x44
        Some(Instruction::new("EOR", OperatingMode::EOR, AddressingMode::ZPG, 3)), // 0x45
        Some(Instruction::new("LSR", OperatingMode::LSR, AddressingMode::ZPG, 5)), // 0x46
        Some(Instruction::new("SRE", OperatingMode::SRE, AddressingMode::ZPG, 5).undocumented()), // 0x47
        Some(Instruction::new("PHA", OperatingMode::PHA, AddressingMode::IMP, 3)), // 0x48
        Some(Instruction::new("EOR", OperatingMode::EOR, AddressingMode::IMM, 2)), // 0x49
        Some(Instruction::new("LSR", OperatingMode::LSR, AddressingMode::ACC, 2)), // 0x4A
        None, // 0x4B
        Some(Instruction::new("JMP", OperatingMode::JMP, AddressingMode::ABS, 3)), // 0x4C
        Some(Instruction::new("EOR", OperatingMode::EOR, AddressingMode::ABS, 4)), // 0x4D
        Some(Instruction::new("LSR", OperatingMode::LSR, AddressingMode::ABS, 6)), // 0x4E
        Some(Instruction::new("SRE", OperatingMode::SRE, AddressingMode::ABS, 6).undocumented()), // 0x4F
        Some(Instruction::new("BVC", OperatingMode::BVC, AddressingMode::REL, 2)), // 0x50
        Some(Instruction::new("EOR", OperatingMode::EOR, AddressingMode::IDY, 5).with_page_penalty()), // 0x51
        None, // 0x52
        Some(Instruction::new("SRE", OperatingMode::SRE, AddressingMode::IDY, 8).undocumented()), // 0x53
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ZPX, 4).undocumented()), // 0x54
        Some(Instruction::new("EOR", OperatingMode::EOR, AddressingMode::ZPX, 4)), // 0x55
        Some(Instruction::new("LSR", OperatingMode::LSR, AddressingMode::ZPX, 6)), // 0x56
        Some(Instruction::new("SRE", OperatingMode::SRE, AddressingMode::ZPX, 6).undocumented()), // 0x57
        Some(Instruction::new("CLI", OperatingMode::CLI, AddressingMode::IMP, 2)), // 0x58
        Some(Instruction::new("EOR", OperatingMode::EOR, AddressingMode::ABY, 4).with_page_penalty()), // 0x59
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMP, 2).undocumented()), // 0x5A
        Some(Instruction::new("SRE", OperatingMode::SRE, AddressingMode::ABY, 7).undocumented()), // 0x5B
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ABX, 4).with_page_penalty().undocumented()), // 0x5C
        Some(Instruction::new("EOR", OperatingMode::EOR, AddressingMode::ABX, 4).with_page_penalty()), // 0x5D
        Some(Instruction::new("LSR", OperatingMode::LSR, AddressingMode::ABX, 7)), // 0x5E
        Some(Instruction::new("SRE", OperatingMode::SRE, AddressingMode::ABX, 7).undocumented()), // 0x5F
        Some(Instruction::new("RTS", OperatingMode::RTS, AddressingMode::IMP, 6)), // 0x60
        Some(Instruction::new("ADC", OperatingMode::ADC, AddressingMode::IDX, 6)), // 0x61
        None, // 0x62
        Some(Instruction::new("RRA", OperatingMode::RRA, AddressingMode::IDX, 8).undocumented()), // 0x63
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ZPG, 3).undocumented()), // 0x64
        Some(Instruction::new("ADC", OperatingMode::ADC, AddressingMode::ZPG, 3)), // 0x65
        Some(Instruction::new("ROR", OperatingMode::ROR, AddressingMode::ZPG, 5)), // 0x66
        Some(Instruction::new("RRA", OperatingMode::RRA, AddressingMode::ZPG, 5).undocumented()), // 0x67
        Some(Instruction::new("PLA", OperatingMode::PLA, AddressingMode::IMP, 4)), // 0x68
        Some(Instruction::new("ADC", OperatingMode::ADC, AddressingMode::IMM, 2)), // 0x69
        Some(Instruction::new("ROR", OperatingMode::ROR, AddressingMode::ACC, 2)), // 0x6A
        None, // 0x6B
        Some(Instruction::new("JMP", OperatingMode::JMP, AddressingMode::IND, 5)), // 0x6C
        Some(Instruction::new("ADC", OperatingMode::ADC, AddressingMode::ABS, 4)), // 0x6D
        Some(Instruction::new("ROR", OperatingMode::ROR, AddressingMode::ABS, 6)), // 0x6E
        Some(Instruction::new("RRA", OperatingMode::RRA, AddressingMode::ABS, 6).undocumented()), // 0x6F
        Some(Instruction::new("BVS", OperatingMode::BVS, AddressingMode::REL, 2)), // 0x70
        Some(Instruction::new("ADC", OperatingMode::ADC, AddressingMode::IDY, 5).with_page_penalty()), // 0x71
        None, // 0x72
        Some(Instruction::new("RRA", OperatingMode::RRA, AddressingMode::IDY, 8).undocumented()), // 0x73
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ZPX, 4).undocumented()), // 0x74
        Some(Instruction::new("ADC", OperatingMode::ADC, AddressingMode::ZPX, 4)), // 0x75
        Some(Instruction::new("ROR", OperatingMode::ROR, AddressingMode::ZPX, 6)), // 0x76
        Some(Instruction::new("RRA", OperatingMode::RRA, AddressingMode::ZPX, 6).undocumented()), // 0x77
        Some(Instruction::new("SEI", OperatingMode::SEI, AddressingMode::IMP, 2)), // 0x78
        Some(Instruction::new("ADC", OperatingMode::ADC, AddressingMode::ABY, 4).with_page_penalty()), // 0x79
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMP, 2).undocumented()), // 0x7A
        Some(Instruction::new("RRA", OperatingMode::RRA, AddressingMode::ABY, 7).undocumented()), // 0x7B
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ABX, 4).with_page_penalty().undocumented()), // 0x7C
        Some(Instruction::new("ADC", OperatingMode::ADC, AddressingMode::ABX, 4).with_page_penalty()), // 0x7D
        Some(Instruction::new("ROR", OperatingMode::ROR, AddressingMode::ABX, 7)), // 0x7E
        Some(Instruction::new("RRA", OperatingMode::RRA, AddressingMode::ABX, 7).undocumented()), // 0x7F
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMM, 2).undocumented()), // 0x80
        Some(Instruction::new("STA", OperatingMode::STA, AddressingMode::IDX, 6)), // 0x81
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMM, 2).undocumented()), // 0x82
        Some(Instruction::new("SAX", OperatingMode::SAX, AddressingMode::IDX, 6).undocumented()), // 0x83
        Some(Instruction::new("STY", OperatingMode::STY, AddressingMode::ZPG, 3)), // 0x84
        Some(Instruction::new("STA", OperatingMode::STA, AddressingMode::ZPG, 3)), // 0x85
        Some(Instruction::new("STX", OperatingMode::STX, AddressingMode::ZPG, 3)), // 0x86
        Some(Instruction::new("SAX", OperatingMode::SAX, AddressingMode::ZPG, 3).undocumented()), // 0x87
        Some(Instruction::new("DEY", OperatingMode::DEY, AddressingMode::IMP, 2)), // 0x88
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMM, 2).undocumented()), // 0x89
        Some(Instruction::new("TXA", OperatingMode::TXA, AddressingMode::IMP, 2)), // 0x8A
        None, // 0x8B
        Some(Instruction::new("STY", OperatingMode::STY, AddressingMode::ABS, 4)), // 0x8C
        Some(Instruction::new("STA", OperatingMode::STA, AddressingMode::ABS, 4)), // 0x8D
        Some(Instruction::new("STX", OperatingMode::STX, AddressingMode::ABS, 4)), // 0x8E
        Some(Instruction::new("SAX", OperatingMode::SAX, AddressingMode::ABS, 4).undocumented()), // 0x8F
        Some(Instruction::new("BCC", OperatingMode::BCC, AddressingMode::REL, 2)), // 0x90
        Some(Instruction::new("STA", OperatingMode::STA, AddressingMode::IDY, 6)), // 0x91
        None, // 0x92
        None, // 0x93
        Some(Instruction::new("STY", OperatingMode::STY, AddressingMode::ZPX, 4)), // 0x94
        Some(Instruction::new("STA", OperatingMode::STA, AddressingMode::ZPX, 4)), // 0x95
        Some(Instruction::new("STX", OperatingMode::STX, AddressingMode::ZPY, 4)), // 0x96
        Some(Instruction::new("SAX", OperatingMode::SAX, AddressingMode::ZPY, 4).undocumented()), // 0x97
        Some(Instruction::new("TYA", OperatingMode::TYA, AddressingMode::IMP, 2)), // 0x98
        Some(Instruction::new("STA", OperatingMode::STA, AddressingMode::ABY, 5)), // 0x99
        Some(Instruction::new("TXS", OperatingMode::TXS, AddressingMode::IMP, 2)), // 0x9A
        None, // 0x9B
        None, // 0x9C
        Some(Instruction::new("STA", OperatingMode::STA, AddressingMode::ABX, 5)), // 0x9D
        None, // 0x9E
        None, // 0x9F
        Some(Instruction::new("LDY", OperatingMode::LDY, AddressingMode::IMM, 2)), // 0xA0
        Some(Instruction::new("LDA", OperatingMode::LDA, AddressingMode::IDX, 6)), // 0xA1
        Some(Instruction::new("LDX", OperatingMode::LDX, AddressingMode::IMM, 2)), // 0xA2
        Some(Instruction::new("LAX", OperatingMode::LAX, AddressingMode::IDX, 6).undocumented()), // 0xA3
        Some(Instruction::new("LDY", OperatingMode::LDY, AddressingMode::ZPG, 3)), // 0xA4
        Some(Instruction::new("LDA", OperatingMode::LDA, AddressingMode::ZPG, 3)), // 0xA5
        Some(Instruction::new("LDX", OperatingMode::LDX, AddressingMode::ZPG, 3)), // 0xA6
        Some(Instruction::new("LAX", OperatingMode::LAX, AddressingMode::ZPG, 3).undocumented()), // 0xA7
        Some(Instruction::new("TAY", OperatingMode::TAY, AddressingMode::IMP, 2)), // 0xA8
        Some(Instruction::new("LDA", OperatingMode::LDA, AddressingMode::IMM, 2)), // 0xA9
        Some(Instruction::new("TAX", OperatingMode::TAX, AddressingMode::IMP, 2)), // 0xAA
        None, // 0xAB
        Some(Instruction::new("LDY", OperatingMode::LDY, AddressingMode::ABS, 4)), // 0xAC
        Some(Instruction::new("LDA", OperatingMode::LDA, AddressingMode::ABS, 4)), // 0xAD
        Some(Instruction::new("LDX", OperatingMode::LDX, AddressingMode::ABS, 4)), // 0xAE
        Some(Instruction::new("LAX", OperatingMode::LAX, AddressingMode::ABS, 4).undocumented()), // 0xAF
        Some(Instruction::new("BCS", OperatingMode::BCS, AddressingMode::REL, 2)), // 0xB0
        Some(Instruction::new("LDA", OperatingMode::LDA, AddressingMode::IDY, 5).with_page_penalty()), // 0xB1
        None, // 0xB2
        Some(Instruction::new("LAX", OperatingMode::LAX, AddressingMode::IDY, 5).with_page_penalty().undocumented()), // 0xB3
        Some(Instruction::new("LDY", OperatingMode::LDY, AddressingMode::ZPX, 4)), // 0xB4
        Some(Instruction::new("LDA", OperatingMode::LDA, AddressingMode::ZPX, 4)), // 0xB5
        Some(Instruction::new("LDX", OperatingMode::LDX, AddressingMode::ZPY, 4)), // 0xB6
        Some(Instruction::new("LAX", OperatingMode::LAX, AddressingMode::ZPY, 4).undocumented()), // 0xB7
        Some(Instruction::new("CLV", OperatingMode::CLV, AddressingMode::IMP, 2)), // 0xB8
        Some(Instruction::new("LDA", OperatingMode::LDA, AddressingMode::ABY, 4).with_page_penalty()), // 0xB9
        Some(Instruction::new("TSX", OperatingMode::TSX, AddressingMode::IMP, 2)), // 0xBA
        None, // 0xBB
        Some(Instruction::new("LDY", OperatingMode::LDY, AddressingMode::ABX, 4).with_page_penalty()), // 0xBC
        Some(Instruction::new("LDA", OperatingMode::LDA, AddressingMode::ABX, 4).with_page_penalty()), // 0xBD
        Some(Instruction::new("LDX", OperatingMode::LDX, AddressingMode::ABY, 4).with_page_penalty()), // 0xBE
        Some(Instruction::new("LAX", OperatingMode::LAX, AddressingMode::ABY, 4).with_page_penalty().undocumented()), // 0xBF
        Some(Instruction::new("CPY", OperatingMode::CPY, AddressingMode::IMM, 2)), // 0xC0
        Some(Instruction::new("CMP", OperatingMode::CMP, AddressingMode::IDX, 6)), // 0xC1
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMM, 2).undocumented()), // 0xC2
        Some(Instruction::new("DCP", OperatingMode::DCP, AddressingMode::IDX, 8).undocumented()), // 0xC3
        Some(Instruction::new("CPY", OperatingMode::CPY, AddressingMode::ZPG, 3)), // 0xC4
        Some(Instruction::new("CMP", OperatingMode::CMP, AddressingMode::ZPG, 3)), // 0xC5
        Some(Instruction::new("DEC", OperatingMode::DEC, AddressingMode::ZPG, 5)), // 0xC6
        Some(Instruction::new("DCP", OperatingMode::DCP, AddressingMode::ZPG, 5).undocumented()), // 0xC7
        Some(Instruction::new("INY", OperatingMode::INY, AddressingMode::IMP, 2)), // 0xC8
        Some(Instruction::new("CMP", OperatingMode::CMP, AddressingMode::IMM, 2)), // 0xC9
        Some(Instruction::new("DEX", OperatingMode::DEX, AddressingMode::IMP, 2)), // 0xCA
        None, // 0xCB
        Some(Instruction::new("CPY", OperatingMode::CPY, AddressingMode::ABS, 4)), // 0xCC
        Some(Instruction::new("CMP", OperatingMode::CMP, AddressingMode::ABS, 4)), // 0xCD
        Some(Instruction::new("DEC", OperatingMode::DEC, AddressingMode::ABS, 6)), // 0xCE
        Some(Instruction::new("DCP", OperatingMode::DCP, AddressingMode::ABS, 6).undocumented()), // 0xCF
        Some(Instruction::new("BNE", OperatingMode::BNE, AddressingMode::REL, 2)), // 0xD0
        Some(Instruction::new("CMP", OperatingMode::CMP, AddressingMode::IDY, 5).with_page_penalty()), // 0xD1
        None, // 0xD2
        Some(Instruction::new("DCP", OperatingMode::DCP, AddressingMode::IDY, 8).undocumented()), // 0xD3
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ZPX, 4).undocumented()), // 0xD4
        Some(Instruction::new("CMP", OperatingMode::CMP, AddressingMode::ZPX, 4)), // 0xD5
        Some(Instruction::new("DEC", OperatingMode::DEC, AddressingMode::ZPX, 6)), // 0xD6
        Some(Instruction::new("DCP", OperatingMode::DCP, AddressingMode::ZPX, 6).undocumented()), // 0xD7
        Some(Instruction::new("CLD", OperatingMode::CLD, AddressingMode::IMP, 2)), // 0xD8
        Some(Instruction::new("CMP", OperatingMode::CMP, AddressingMode::ABY, 4).with_page_penalty()), // 0xD9
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMP, 2).undocumented()), // 0xDA
        Some(Instruction::new("DCP", OperatingMode::DCP, AddressingMode::ABY, 7).undocumented()), // 0xDB
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ABX, 4).with_page_penalty().undocumented()), // 0xDC
        Some(Instruction::new("CMP", OperatingMode::CMP, AddressingMode::ABX, 4).with_page_penalty()), // 0xDD
        Some(Instruction::new("DEC", OperatingMode::DEC, AddressingMode::ABX, 7)), // 0xDE
        Some(Instruction::new("DCP", OperatingMode::DCP, AddressingMode::ABX, 7).undocumented()), // 0xDF
        Some(Instruction::new("CPX", OperatingMode::CPX, AddressingMode::IMM, 2)), // 0xE0
        Some(Instruction::new("SBC", OperatingMode::SBC, AddressingMode::IDX, 6)), // 0xE1
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMM, 2).undocumented()), // 0xE2
        Some(Instruction::new("ISB", OperatingMode::ISB, AddressingMode::IDX, 8).undocumented()), // 0xE3
        Some(Instruction::new("CPX", OperatingMode::CPX, AddressingMode::ZPG, 3)), // 0xE4
        Some(Instruction::new("SBC", OperatingMode::SBC, AddressingMode::ZPG, 3)), // 0xE5
        Some(Instruction::new("INC", OperatingMode::INC, AddressingMode::ZPG, 5)), // 0xE6
        Some(Instruction::new("ISB", OperatingMode::ISB, AddressingMode::ZPG, 5).undocumented()), // 0xE7
        Some(Instruction::new("INX", OperatingMode::INX, AddressingMode::IMP, 2)), // 0xE8
        Some(Instruction::new("SBC", OperatingMode::SBC, AddressingMode::IMM, 2)), // 0xE9
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMP, 2)), // 0xEA
        Some(Instruction::new("SBC", OperatingMode::SBC, AddressingMode::IMM, 2).undocumented()), // 0xEB
        Some(Instruction::new("CPX", OperatingMode::CPX, AddressingMode::ABS, 4)), // 0xEC
        Some(Instruction::new("SBC", OperatingMode::SBC, AddressingMode::ABS, 4)), // 0xED
        Some(Instruction::new("INC", OperatingMode::INC, AddressingMode::ABS, 6)), // 0xEE
        Some(Instruction::new("ISB", OperatingMode::ISB, AddressingMode::ABS, 6).undocumented()), // 0xEF
        Some(Instruction::new("BEQ", OperatingMode::BEQ, AddressingMode::REL, 2)), // 0xF0
        Some(Instruction::new("SBC", OperatingMode::SBC, AddressingMode::IDY, 5).with_page_penalty()), // 0xF1
        None, // 0xF2
        Some(Instruction::new("ISB", OperatingMode::ISB, AddressingMode::IDY, 8).undocumented()), // 0xF3
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ZPX, 4).undocumented()), // 0xF4
        Some(Instruction::new("SBC", OperatingMode::SBC, AddressingMode::ZPX, 4)), // 0xF5
        Some(Instruction::new("INC", OperatingMode::INC, AddressingMode::ZPX, 6)), // 0xF6
        Some(Instruction::new("ISB", OperatingMode::ISB, AddressingMode::ZPX, 6).undocumented()), // 0xF7
        Some(Instruction::new("SED", OperatingMode::SED, AddressingMode::IMP, 2)), // 0xF8
        Some(Instruction::new("SBC", OperatingMode::SBC, AddressingMode::ABY, 4).with_page_penalty()), // 0xF9
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::IMP, 2).undocumented()), // 0xFA
        Some(Instruction::new("ISB", OperatingMode::ISB, AddressingMode::ABY, 7).undocumented()), // 0xFB
        Some(Instruction::new("NOP", OperatingMode::NOP, AddressingMode::ABX, 4).with_page_penalty().undocumented()), // 0xFC
        Some(Instruction::new("SBC", OperatingMode::SBC, AddressingMode::ABX, 4).with_page_penalty()), // 0xFD
        Some(Instruction::new("INC", OperatingMode::INC, AddressingMode::ABX, 7)), // 0xFE
        Some(Instruction::new("ISB", OperatingMode::ISB, AddressingMode::ABX, 7).undocumented()), // 0xFF
    ];
}
