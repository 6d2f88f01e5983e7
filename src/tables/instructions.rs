//! The universe of instructions: opcode pattern, owning class,
//! mnemonic, operand list, and the extension guard that gates it
//! (`spec.md` §3's "Instruction descriptor" and §4.3's guard
//! predicate).
//!
//! Word layout (see `SPEC_FULL.md` §3.1): bits `[1:0]` of the first
//! 16 bits read select the length — `0b11` means a 4-byte
//! instruction, anything else a 2-byte one. Within a 2-byte word bit
//! 15 is the stop bit and bits `[14:12]` select one of 8 opclasses;
//! within a 4-byte word bit 31 is the stop bit and bits `[30:27]`
//! select one of 16 opclasses.

use crate::fields::FieldId;
use crate::registry::ExtensionRegistry;
use crate::tables::extensions::ExtId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstClass {
    #[default]
    None,
    Load,
    Int,
    Store,
    Branch,
    Jump,
    Sys,
    Fp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// General-purpose register: a 5-bit index into the ABI name
    /// table.
    Reg,
    /// Immediate, signed or unsigned per the field's own recipe.
    Imm,
}

#[derive(Debug, Clone, Copy)]
pub struct Operand {
    pub kind: OperandKind,
    pub field: FieldId,
}

const fn reg(field: FieldId) -> Operand {
    Operand {
        kind: OperandKind::Reg,
        field,
    }
}

const fn imm(field: FieldId) -> Operand {
    Operand {
        kind: OperandKind::Imm,
        field,
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InstFlags: u8 {
        /// This id is a preferred rendering of another id; ordered
        /// before the id it aliases so the decoder prefers it.
        const ALIAS    = 0b01;
        /// This id matches but carries reserved semantics.
        const RESERVED = 0b10;
    }
}

pub struct InstDescriptor {
    pub len: u8,
    pub mask: u32,
    pub pattern: u32,
    pub class: InstClass,
    pub mnemonic: &'static str,
    pub operands: &'static [Operand],
    pub flags: InstFlags,
    pub guard: fn(&ExtensionRegistry) -> bool,
}

fn smol64_0(reg: &ExtensionRegistry) -> bool {
    reg.has(ExtId::Smol64, 0, 0)
}

fn smol64_1(reg: &ExtensionRegistry) -> bool {
    reg.has(ExtId::Smol64, 0, 1)
}

fn smol64_2(reg: &ExtensionRegistry) -> bool {
    reg.has(ExtId::Smol64, 0, 2)
}

fn smolm_0(reg: &ExtensionRegistry) -> bool {
    reg.has(ExtId::Smolm, 1, 0)
}

fn smolf_0(reg: &ExtensionRegistry) -> bool {
    reg.has(ExtId::Smolf, 1, 0)
}

fn smolv_0(reg: &ExtensionRegistry) -> bool {
    reg.has(ExtId::Smolv, 1, 0)
}

// --- 2-byte opclasses (bits [14:12], payload bits [11:2]) ---------

const fn c_opclass(n: u32) -> (u32, u32) {
    // mask/pattern covering the low-bits size marker (must read 0b00
    // for a compressed word) and the 3-bit opclass field.
    (0b111 << 12 | 0b11, n << 12)
}

// --- 4-byte opclasses (bits [30:27], low bits [1:0] == 0b11 by
// construction once the size marker has been read) -----------------

const fn w_opclass(n: u32) -> (u32, u32) {
    (0b1111 << 27, n << 27)
}

pub static INSTRUCTIONS: &[InstDescriptor] = &{
    let (m_add, p_add) = c_opclass(0);
    let (m_sub, p_sub) = c_opclass(1);
    let (m_and, p_and) = c_opclass(2);
    let (m_addi, p_addi) = c_opclass(3);
    let (m_shift, p_shift) = c_opclass(4);
    let (m_load, p_load) = c_opclass(5);
    let (m_store, p_store) = c_opclass(6);
    let (m_ctrl, p_ctrl) = c_opclass(7);

    let (m_int3, p_int3) = w_opclass(0);
    let (m_intimm, p_intimm) = w_opclass(1);
    let (m_wload, p_wload) = w_opclass(2);
    let (m_wstore, p_wstore) = w_opclass(3);
    let (m_branch, p_branch) = w_opclass(4);
    let (m_jump, p_jump) = w_opclass(5);
    let (m_sys, p_sys) = w_opclass(6);
    let (m_fp, p_fp) = w_opclass(7);
    let (m_intm, p_intm) = w_opclass(9);
    let (m_vec, p_vec) = w_opclass(10);

    [
        // -- compressed (2-byte) forms, all gated by the base set --
        InstDescriptor {
            len: 2,
            mask: m_add,
            pattern: p_add,
            class: InstClass::Int,
            mnemonic: "c.add",
            operands: &[reg(FieldId::CRd), reg(FieldId::CRs)],
            flags: InstFlags::empty(),
            guard: smol64_0,
        },
        InstDescriptor {
            len: 2,
            mask: m_sub,
            pattern: p_sub,
            class: InstClass::Int,
            mnemonic: "c.sub",
            operands: &[reg(FieldId::CRd), reg(FieldId::CRs)],
            flags: InstFlags::empty(),
            guard: smol64_0,
        },
        InstDescriptor {
            len: 2,
            mask: m_and,
            pattern: p_and,
            class: InstClass::Int,
            mnemonic: "c.and",
            operands: &[reg(FieldId::CRd), reg(FieldId::CRs)],
            flags: InstFlags::empty(),
            guard: smol64_0,
        },
        InstDescriptor {
            len: 2,
            mask: m_addi,
            pattern: p_addi,
            class: InstClass::Int,
            mnemonic: "c.addi",
            operands: &[reg(FieldId::CRd), imm(FieldId::CImm5Signed)],
            flags: InstFlags::empty(),
            guard: smol64_0,
        },
        InstDescriptor {
            len: 2,
            mask: m_shift,
            pattern: p_shift,
            class: InstClass::Int,
            mnemonic: "c.srli",
            operands: &[reg(FieldId::CRd), imm(FieldId::Shamt3)],
            flags: InstFlags::empty(),
            guard: smol64_0,
        },
        InstDescriptor {
            len: 2,
            mask: m_load,
            pattern: p_load,
            class: InstClass::Load,
            mnemonic: "c.lw",
            operands: &[reg(FieldId::CRd), imm(FieldId::CImm5Unsigned)],
            flags: InstFlags::empty(),
            guard: smol64_0,
        },
        InstDescriptor {
            len: 2,
            mask: m_store,
            pattern: p_store,
            class: InstClass::Store,
            mnemonic: "c.sw",
            operands: &[reg(FieldId::CRs), imm(FieldId::CImm5Unsigned)],
            flags: InstFlags::empty(),
            guard: smol64_0,
        },
        // c.nop: Ctrl opclass, zero payload.
        InstDescriptor {
            len: 2,
            mask: m_ctrl | (0b1111111111 << 2),
            pattern: p_ctrl,
            class: InstClass::Sys,
            mnemonic: "c.nop",
            operands: &[],
            flags: InstFlags::empty(),
            guard: smol64_0,
        },
        // c.ebreak: Ctrl opclass, payload == 1. Reserved: matches but
        // carries reserved semantics.
        InstDescriptor {
            len: 2,
            mask: m_ctrl | (0b1111111111 << 2),
            pattern: p_ctrl | (1 << 2),
            class: InstClass::Sys,
            mnemonic: "c.ebreak",
            operands: &[],
            flags: InstFlags::RESERVED,
            guard: smol64_0,
        },
        // -- wide (4-byte) three-register integer forms --
        InstDescriptor {
            len: 4,
            mask: m_int3 | (0xff << 4),
            pattern: p_int3,
            class: InstClass::Int,
            mnemonic: "add",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_int3 | (0xff << 4),
            pattern: p_int3 | (1 << 4),
            class: InstClass::Int,
            mnemonic: "sub",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_int3 | (0xff << 4),
            pattern: p_int3 | (2 << 4),
            class: InstClass::Int,
            mnemonic: "and",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_int3 | (0xff << 4),
            pattern: p_int3 | (3 << 4),
            class: InstClass::Int,
            mnemonic: "or",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_int3 | (0xff << 4),
            pattern: p_int3 | (4 << 4),
            class: InstClass::Int,
            mnemonic: "xor",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_int3 | (0xff << 4),
            pattern: p_int3 | (5 << 4),
            class: InstClass::Int,
            mnemonic: "slt",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_int3 | (0xff << 4),
            pattern: p_int3 | (6 << 4),
            class: InstClass::Int,
            mnemonic: "sltu",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        // -- wide register+immediate integer form --
        InstDescriptor {
            len: 4,
            mask: m_intimm,
            pattern: p_intimm,
            class: InstClass::Int,
            mnemonic: "addi",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), imm(FieldId::Imm15)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        // -- wide load forms, selected by a 3-bit width funct --
        InstDescriptor {
            len: 4,
            mask: m_wload | (0b111 << 4),
            pattern: p_wload,
            class: InstClass::Load,
            mnemonic: "lb",
            operands: &[
                reg(FieldId::Rd),
                reg(FieldId::Rs1),
                imm(FieldId::Imm10),
            ],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_wload | (0b111 << 4),
            pattern: p_wload | (1 << 4),
            class: InstClass::Load,
            mnemonic: "lbu",
            operands: &[
                reg(FieldId::Rd),
                reg(FieldId::Rs1),
                imm(FieldId::Imm10),
            ],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_wload | (0b111 << 4),
            pattern: p_wload | (2 << 4),
            class: InstClass::Load,
            mnemonic: "lh",
            operands: &[
                reg(FieldId::Rd),
                reg(FieldId::Rs1),
                imm(FieldId::Imm10),
            ],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_wload | (0b111 << 4),
            pattern: p_wload | (3 << 4),
            class: InstClass::Load,
            mnemonic: "lhu",
            operands: &[
                reg(FieldId::Rd),
                reg(FieldId::Rs1),
                imm(FieldId::Imm10),
            ],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_wload | (0b111 << 4),
            pattern: p_wload | (4 << 4),
            class: InstClass::Load,
            mnemonic: "lw",
            operands: &[
                reg(FieldId::Rd),
                reg(FieldId::Rs1),
                imm(FieldId::Imm10),
            ],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        // -- wide store forms --
        InstDescriptor {
            len: 4,
            mask: m_wstore | (0b111 << 4),
            pattern: p_wstore,
            class: InstClass::Store,
            mnemonic: "sb",
            operands: &[
                reg(FieldId::Rd),
                reg(FieldId::Rs1),
                imm(FieldId::Imm10),
            ],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_wstore | (0b111 << 4),
            pattern: p_wstore | (1 << 4),
            class: InstClass::Store,
            mnemonic: "sh",
            operands: &[
                reg(FieldId::Rd),
                reg(FieldId::Rs1),
                imm(FieldId::Imm10),
            ],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_wstore | (0b111 << 4),
            pattern: p_wstore | (2 << 4),
            class: InstClass::Store,
            mnemonic: "sw",
            operands: &[
                reg(FieldId::Rd),
                reg(FieldId::Rs1),
                imm(FieldId::Imm10),
            ],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        // -- wide branch forms --
        InstDescriptor {
            len: 4,
            mask: m_branch | (0b111 << 2),
            pattern: p_branch,
            class: InstClass::Branch,
            mnemonic: "beq",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), imm(FieldId::Imm12)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_branch | (0b111 << 2),
            pattern: p_branch | (1 << 2),
            class: InstClass::Branch,
            mnemonic: "bne",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), imm(FieldId::Imm12)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_branch | (0b111 << 2),
            pattern: p_branch | (2 << 2),
            class: InstClass::Branch,
            mnemonic: "blt",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), imm(FieldId::Imm12)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_branch | (0b111 << 2),
            pattern: p_branch | (3 << 2),
            class: InstClass::Branch,
            mnemonic: "bge",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), imm(FieldId::Imm12)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_branch | (0b111 << 2),
            pattern: p_branch | (4 << 2),
            class: InstClass::Branch,
            mnemonic: "bltu",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), imm(FieldId::Imm12)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_branch | (0b111 << 2),
            pattern: p_branch | (5 << 2),
            class: InstClass::Branch,
            mnemonic: "bgeu",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), imm(FieldId::Imm12)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        // -- wide jump forms; `ret` is a strict-subset alias of
        // `jalr` and is ordered first so the decoder prefers it --
        InstDescriptor {
            len: 4,
            mask: m_jump | (0b11111 << 22) | (0b11111 << 17) | (0b1 << 2) | (0x3fff << 3),
            pattern: p_jump | (0 << 22) | (1 << 17) | (1 << 2) | (0 << 3),
            class: InstClass::Jump,
            mnemonic: "ret",
            operands: &[],
            flags: InstFlags::ALIAS,
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_jump | (0b1 << 2),
            pattern: p_jump,
            class: InstClass::Jump,
            mnemonic: "jal",
            operands: &[reg(FieldId::Rd), imm(FieldId::Imm14)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        InstDescriptor {
            len: 4,
            mask: m_jump | (0b1 << 2),
            pattern: p_jump | (1 << 2),
            class: InstClass::Jump,
            mnemonic: "jalr",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), imm(FieldId::Imm14)],
            flags: InstFlags::empty(),
            guard: smol64_1,
        },
        // -- wide system forms --
        InstDescriptor {
            len: 4,
            mask: m_sys | (0xff << 4),
            pattern: p_sys,
            class: InstClass::Sys,
            mnemonic: "ecall",
            operands: &[],
            flags: InstFlags::empty(),
            guard: smol64_2,
        },
        InstDescriptor {
            len: 4,
            mask: m_sys | (0xff << 4),
            pattern: p_sys | (1 << 4),
            class: InstClass::Sys,
            mnemonic: "ebreak",
            operands: &[],
            flags: InstFlags::RESERVED,
            guard: smol64_2,
        },
        // -- floating-point forms (smolf) --
        InstDescriptor {
            len: 4,
            mask: m_fp | (0xff << 4),
            pattern: p_fp,
            class: InstClass::Fp,
            mnemonic: "fadd",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolf_0,
        },
        InstDescriptor {
            len: 4,
            mask: m_fp | (0xff << 4),
            pattern: p_fp | (1 << 4),
            class: InstClass::Fp,
            mnemonic: "fsub",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolf_0,
        },
        InstDescriptor {
            len: 4,
            mask: m_fp | (0xff << 4),
            pattern: p_fp | (2 << 4),
            class: InstClass::Fp,
            mnemonic: "fmul",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolf_0,
        },
        InstDescriptor {
            len: 4,
            mask: m_fp | (0xff << 4),
            pattern: p_fp | (3 << 4),
            class: InstClass::Fp,
            mnemonic: "fdiv",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolf_0,
        },
        // -- integer multiply/divide forms (smolm) --
        InstDescriptor {
            len: 4,
            mask: m_intm | (0xff << 4),
            pattern: p_intm,
            class: InstClass::Int,
            mnemonic: "mul",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolm_0,
        },
        InstDescriptor {
            len: 4,
            mask: m_intm | (0xff << 4),
            pattern: p_intm | (1 << 4),
            class: InstClass::Int,
            mnemonic: "mulh",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolm_0,
        },
        InstDescriptor {
            len: 4,
            mask: m_intm | (0xff << 4),
            pattern: p_intm | (2 << 4),
            class: InstClass::Int,
            mnemonic: "div",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolm_0,
        },
        InstDescriptor {
            len: 4,
            mask: m_intm | (0xff << 4),
            pattern: p_intm | (3 << 4),
            class: InstClass::Int,
            mnemonic: "divu",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolm_0,
        },
        InstDescriptor {
            len: 4,
            mask: m_intm | (0xff << 4),
            pattern: p_intm | (4 << 4),
            class: InstClass::Int,
            mnemonic: "rem",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolm_0,
        },
        InstDescriptor {
            len: 4,
            mask: m_intm | (0xff << 4),
            pattern: p_intm | (5 << 4),
            class: InstClass::Int,
            mnemonic: "remu",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolm_0,
        },
        // -- vector forms (smolv); the class table has no dedicated
        // vector tag, so these share `Fp` per `SPEC_FULL.md` §3.1 --
        InstDescriptor {
            len: 4,
            mask: m_vec | (0xff << 4),
            pattern: p_vec,
            class: InstClass::Fp,
            mnemonic: "vadd",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolv_0,
        },
        InstDescriptor {
            len: 4,
            mask: m_vec | (0xff << 4),
            pattern: p_vec | (1 << 4),
            class: InstClass::Fp,
            mnemonic: "vmul",
            operands: &[reg(FieldId::Rd), reg(FieldId::Rs1), reg(FieldId::Rs2)],
            flags: InstFlags::empty(),
            guard: smolv_0,
        },
    ]
};

/// Number of instruction ids in the universe; the validity bitmap is
/// sized to this.
pub fn instruction_count() -> usize {
    INSTRUCTIONS.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mnemonic_is_nonempty() {
        for inst in INSTRUCTIONS {
            assert!(!inst.mnemonic.is_empty());
        }
    }

    #[test]
    fn ret_is_ordered_before_jalr() {
        let ret = INSTRUCTIONS.iter().position(|i| i.mnemonic == "ret");
        let jalr = INSTRUCTIONS.iter().position(|i| i.mnemonic == "jalr");
        assert!(ret.unwrap() < jalr.unwrap());
    }

    #[test]
    fn ebreak_variants_are_reserved() {
        for inst in INSTRUCTIONS
            .iter()
            .filter(|i| i.mnemonic.ends_with("ebreak"))
        {
            assert!(inst.flags.contains(InstFlags::RESERVED));
        }
    }
}
