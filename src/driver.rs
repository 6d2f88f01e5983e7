//! Driver / printer (`spec.md` §2.7, §6): feeds bytes into the
//! decoder, advances the offset by the decoded instruction's length,
//! and formats each instruction as one listing line. Thin glue around
//! the core three subsystems — everything here is pure formatting and
//! orchestration, no decoding logic of its own.

use std::io::{self, Write};

use crate::bitmap::ValidityBitmap;
use crate::bundle::{BundlePosition, BundleState};
use crate::cli::Markers;
use crate::decode::{self, ByteCursor, DecodeOutcome};
use crate::fields::FieldId;
use crate::registry::ExtensionRegistry;
use crate::tables::instructions::{OperandKind, INSTRUCTIONS};
use crate::tables::registers::abi_name;

/// A demonstration byte buffer disassembled when no file path is
/// given on the command line (`spec.md` §6's "built-in test byte
/// buffer" fallback). Three instructions forming one bundle: a load
/// (head), an add (body), then a branch that terminates it (tail),
/// followed by a `ret` on its own (short).
pub const BUILTIN_TEST_DATA: &[u8] = &[
    // lw a0, 0(ra)     -- wide load, stop bit clear (continues bundle)
    0x43, 0x00, 0x82, 0x12,
    // add a0, a0, a1   -- wide add, stop bit clear
    0x03, 0xb0, 0x94, 0x02,
    // beq a0, a1, 0    -- wide branch, stop bit set (ends bundle)
    0x03, 0x00, 0x96, 0xa2,
    // ret              -- alias of jalr zero, ra, 0; stop bit set
    0x07, 0x00, 0x02, 0xa8,
];

/// One disassembly session: buffer, frozen registry/bitmap, and the
/// bundle state carried across instructions in this file.
pub struct Session<'a> {
    buf: &'a [u8],
    offset: usize,
    bitmap: &'a ValidityBitmap,
    bundle: BundleState,
}

impl<'a> Session<'a> {
    pub fn new(buf: &'a [u8], bitmap: &'a ValidityBitmap) -> Self {
        Session {
            buf,
            offset: 0,
            bitmap,
            bundle: BundleState::new(),
        }
    }

    /// Disassemble the whole buffer, writing one line per instruction
    /// (or per diagnostic) to `out`.
    pub fn run(&mut self, markers: &Markers, out: &mut impl Write) -> io::Result<()> {
        loop {
            if self.offset >= self.buf.len() {
                return Ok(());
            }
            let cursor = ByteCursor {
                buf: self.buf,
                offset: self.offset,
            };
            match decode::classify(self.bundle.current(), &cursor, self.bitmap) {
                DecodeOutcome::Matched { id, len } => {
                    self.emit_instruction(id, len, markers, out)?;
                }
                DecodeOutcome::NoMatch => {
                    writeln!(out, "  {:08x}: failed to decode", self.offset)?;
                    self.offset += 2;
                }
                DecodeOutcome::ReadError => {
                    writeln!(out, "  {:08x}: unexpected end", self.offset)?;
                    return Ok(());
                }
            }
        }
    }

    fn emit_instruction(
        &mut self,
        id: usize,
        len: u8,
        markers: &Markers,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let inst = &INSTRUCTIONS[id];
        let word = read_word(self.buf, self.offset, len);
        let stop = decode::stop_bit(word, len);
        let position = self.bundle.advance(stop, inst.class);

        let marker = marker_for(markers, position);
        let bytes_col = format_bytes_column(word, len);
        let operands = format_operands(word, inst.operands);

        write!(
            out,
            "  {:08x}: {}  {}{}",
            self.offset, bytes_col, marker, inst.mnemonic
        )?;
        if !operands.is_empty() {
            let tabs = if inst.mnemonic.len() <= 3 { "\t\t" } else { "\t" };
            write!(out, "{tabs}{operands}")?;
        }
        writeln!(out)?;

        self.offset += len as usize;
        Ok(())
    }
}

fn read_word(buf: &[u8], offset: usize, len: u8) -> u32 {
    let mut word = 0u32;
    for (i, &byte) in buf[offset..offset + len as usize].iter().enumerate() {
        word |= (byte as u32) << (8 * i);
    }
    word
}

fn marker_for<'a>(markers: &'a Markers, position: BundlePosition) -> &'a str {
    match position {
        BundlePosition::Short => &markers.short,
        BundlePosition::Head => &markers.head,
        BundlePosition::Body => &markers.body,
        BundlePosition::Tail => &markers.tail,
    }
}

/// Hex bytes grouped as 16-bit words, padded so 2-byte and 4-byte
/// instructions line up in the same column (`spec.md` §6).
fn format_bytes_column(word: u32, len: u8) -> String {
    match len {
        2 => format!("{:04x}     ", word & 0xffff),
        4 => format!("{:04x} {:04x}", word & 0xffff, (word >> 16) & 0xffff),
        _ => unreachable!("instruction length is always 2 or 4"),
    }
}

/// Render an instruction's operand list: registers as ABI names,
/// immediates as decimal, comma-separated. A `Shamt3` immediate of 0
/// is suppressed entirely (`spec.md` §4.1, §6).
fn format_operands(word: u32, operands: &[crate::tables::instructions::Operand]) -> String {
    use itertools::Itertools;

    operands
        .iter()
        .filter_map(|operand| {
            let value = crate::fields::extract(word, operand.field);
            match operand.kind {
                OperandKind::Reg => Some(abi_name(value as u8).to_string()),
                OperandKind::Imm => {
                    if operand.field == FieldId::Shamt3 && value == 0 {
                        None
                    } else {
                        Some(value.to_string())
                    }
                }
            }
        })
        .join(",")
}

/// Build the validity bitmap's backing registry and print the active
/// extension set under `-v`.
pub fn print_active_extensions(registry: &ExtensionRegistry, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "active extensions:")?;
    for (ext, major, minor) in registry.enumerate() {
        writeln!(out, "  {ext}-{major}.{minor}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ExtensionRegistry;
    use crate::tables::extensions::ExtId;

    fn bitmap_all() -> ValidityBitmap {
        let mut registry = ExtensionRegistry::new();
        registry.add(ExtId::Smol64, 0, 2);
        registry.add(ExtId::Smolm, 1, 1);
        registry.add(ExtId::Smolf, 1, 1);
        registry.add(ExtId::Smolv, 1, 0);
        ValidityBitmap::compute(&registry)
    }

    #[test]
    fn builtin_buffer_decodes_as_one_bundle_then_a_short() {
        let bitmap = bitmap_all();
        let mut session = Session::new(BUILTIN_TEST_DATA, &bitmap);
        let mut out = Vec::new();
        session.run(&Markers::ascii(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  00000000:"));
        assert!(lines[0].contains("lw"));
        assert!(lines[1].contains("add"));
        assert!(lines[2].contains("beq"));
        assert!(lines[3].contains("ret"));
        // head/body/tail/short markers: lw continues (head), add
        // continues (body), beq stops (tail), ret is its own bundle
        // (short).
        assert!(lines[0].contains(&format!("{}lw", Markers::ascii().head)));
        assert!(lines[2].contains(&format!("{}beq", Markers::ascii().tail)));
        assert!(lines[3].contains(&format!("{}ret", Markers::ascii().short)));
    }

    #[test]
    fn decode_miss_advances_by_two_and_keeps_going() {
        let mut registry = ExtensionRegistry::new();
        registry.add(ExtId::Smol64, 0, 0);
        let bitmap = ValidityBitmap::compute(&registry);
        // bits[1:0] == 0b10: an unassigned short form, decodes to
        // NoMatch (spec.md §3.1 / §8 scenario 1).
        let buf = [0b10u8, 0x00, 0b10u8, 0x00];
        let mut session = Session::new(&buf, &bitmap);
        let mut out = Vec::new();
        session.run(&Markers::ascii(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("failed to decode").count(), 2);
    }

    #[test]
    fn truncated_input_reports_unexpected_end_and_stops() {
        let mut registry = ExtensionRegistry::new();
        registry.add(ExtId::Smol64, 0, 1);
        let bitmap = ValidityBitmap::compute(&registry);
        // Size marker 0b11 demands a 4th byte that isn't there.
        let buf = [0b11u8, 0x00, 0x00];
        let mut session = Session::new(&buf, &bitmap);
        let mut out = Vec::new();
        session.run(&Markers::ascii(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("unexpected end"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn shamt3_zero_is_suppressed_in_operand_text() {
        let inst = INSTRUCTIONS
            .iter()
            .find(|i| i.mnemonic == "c.srli")
            .unwrap();
        let word = 0u32; // rd=0, shamt=0
        assert_eq!(format_operands(word, inst.operands), "zero");
    }

    #[test]
    fn shamt3_nonzero_is_rendered() {
        let inst = INSTRUCTIONS
            .iter()
            .find(|i| i.mnemonic == "c.srli")
            .unwrap();
        let word = 3u32 << 2; // shamt = 3
        assert_eq!(format_operands(word, inst.operands), "zero,3");
    }

    #[test]
    fn bytes_column_pads_two_byte_instructions_to_align_with_four_byte() {
        assert_eq!(format_bytes_column(0x1234, 2).len(), format_bytes_column(0x1234_5678, 4).len());
    }
}
