//! The validity bitmap (`spec.md` §4.3): a bitset over the
//! instruction universe, computed once from the extension registry,
//! gating which instructions the decoder may return.

use crate::registry::ExtensionRegistry;
use crate::tables::instructions::{instruction_count, INSTRUCTIONS};

#[derive(Debug, Clone)]
pub struct ValidityBitmap {
    bits: Vec<bool>,
}

impl ValidityBitmap {
    /// Reset to all-zero, then enable every instruction whose guard
    /// predicate holds against `registry`. Called once after the
    /// registry is finalized.
    pub fn compute(registry: &ExtensionRegistry) -> Self {
        let bits = INSTRUCTIONS
            .iter()
            .map(|inst| (inst.guard)(registry))
            .collect();
        ValidityBitmap { bits }
    }

    /// False for any id outside the instruction universe.
    pub fn is_set(&self, id: usize) -> bool {
        id < instruction_count() && self.bits[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::extensions::ExtId;

    #[test]
    fn bitmap_has_one_bit_per_instruction() {
        let registry = ExtensionRegistry::new();
        let bitmap = ValidityBitmap::compute(&registry);
        assert_eq!(bitmap.bits.len(), instruction_count());
    }

    #[test]
    fn default_registry_enables_only_base_set() {
        let mut registry = ExtensionRegistry::new();
        registry.add(ExtId::Smol64, 0, 0);
        let bitmap = ValidityBitmap::compute(&registry);

        let addi_c = INSTRUCTIONS.iter().position(|i| i.mnemonic == "c.addi").unwrap();
        let addi_w = INSTRUCTIONS.iter().position(|i| i.mnemonic == "addi").unwrap();
        assert!(bitmap.is_set(addi_c));
        assert!(!bitmap.is_set(addi_w));
    }

    #[test]
    fn enabling_more_extensions_never_clears_bits() {
        let mut before_reg = ExtensionRegistry::new();
        before_reg.add(ExtId::Smol64, 0, 0);
        let before = ValidityBitmap::compute(&before_reg);

        let mut after_reg = before_reg.clone();
        after_reg.add(ExtId::Smolv, 1, 0);
        let after = ValidityBitmap::compute(&after_reg);

        for id in 0..instruction_count() {
            if before.is_set(id) {
                assert!(after.is_set(id), "bit {id} was cleared by enabling more extensions");
            }
        }
    }

    #[test]
    fn out_of_range_id_is_never_set() {
        let registry = ExtensionRegistry::new();
        let bitmap = ValidityBitmap::compute(&registry);
        assert!(!bitmap.is_set(instruction_count()));
        assert!(!bitmap.is_set(instruction_count() + 1000));
    }
}
