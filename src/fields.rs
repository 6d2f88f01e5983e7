//! Bitfield extraction: a pure function from (instruction word, field
//! id) to a signed 32-bit value, per the field's extraction recipe.

/// Identifies one extraction recipe. Every instruction operand slot
/// names one of these; several instruction formats share a field id
/// when they place it at the same bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    // Compressed (2-byte) word fields.
    CRd,
    CRs,
    CImm5Signed,
    CImm5Unsigned,
    Shamt3,

    // Wide (4-byte) word fields, shared across the formats that place
    // a register or immediate at the same offset.
    Rd,
    Rs1,
    Rs2,
    Imm15,
    Imm14,
    Imm12,
    Imm10,
    Funct1,
    Funct3,
    Funct8,
}

/// (offset, length, signed). Extraction widens the word to 64 bits,
/// shifts left by `64 - offset - length`, then shifts right by
/// `64 - length` (arithmetic if signed, logical otherwise), per the
/// field descriptor recipe.
#[derive(Debug, Clone, Copy)]
struct FieldDescriptor {
    offset: u32,
    length: u32,
    signed: bool,
}

const fn d(offset: u32, length: u32, signed: bool) -> FieldDescriptor {
    FieldDescriptor {
        offset,
        length,
        signed,
    }
}

fn descriptor(field: FieldId) -> FieldDescriptor {
    match field {
        FieldId::CRd => d(7, 5, false),
        FieldId::CRs => d(2, 5, false),
        FieldId::CImm5Signed => d(2, 5, true),
        FieldId::CImm5Unsigned => d(2, 5, false),
        FieldId::Shamt3 => d(2, 3, false),

        FieldId::Rd => d(22, 5, false),
        FieldId::Rs1 => d(17, 5, false),
        FieldId::Rs2 => d(12, 5, false),
        FieldId::Imm15 => d(2, 15, true),
        FieldId::Imm14 => d(3, 14, true),
        FieldId::Imm12 => d(5, 12, true),
        FieldId::Imm10 => d(7, 10, true),
        FieldId::Funct1 => d(2, 1, false),
        FieldId::Funct3 => d(4, 3, false),
        FieldId::Funct8 => d(4, 8, false),
    }
}

/// Extract `field` from `word`, sign-extending if the field is
/// signed. `word` holds the raw instruction bits right-aligned in the
/// low bits (bit 0 of the word is bit 0 of the instruction).
pub fn extract(word: u32, field: FieldId) -> i32 {
    let desc = descriptor(field);
    let widened = word as u64;
    let left = 64 - desc.offset - desc.length;
    let shifted_left = widened << left;
    let shift_right = 64 - desc.length;
    let value = if desc.signed {
        ((shifted_left as i64) >> shift_right) as i64
    } else {
        (shifted_left >> shift_right) as i64
    };
    value as i32
}
