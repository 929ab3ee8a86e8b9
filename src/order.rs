//! Instruction-order verifier (§4.H): enforces the partial order
//! `apply < clear < write_metadata < goto_table` over a decoded internal
//! action list, and rejects a repeated non-apply category.

use crate::action::{ActionRecord, InstructionCategory};
use crate::error::Error;

/// Walks `actions`, checking that each record's [`InstructionCategory`]
/// never decreases relative to the highest category seen so far, and that
/// no non-`Apply` category repeats. `Apply` (plain, non-instruction
/// actions) may repeat freely.
pub fn verify_order(actions: &[ActionRecord]) -> Result<(), Error> {
    let mut highest = InstructionCategory::Apply;
    let mut seen_non_apply = [false; 3]; // Clear, WriteMetadata, GotoTable

    for record in actions {
        let category = record.kind().instruction_category();
        if category != InstructionCategory::Apply {
            let idx = non_apply_index(category);
            if seen_non_apply[idx] {
                return Err(Error::UnsupportedOrder {
                    detail: format!("duplicate {category:?} category"),
                });
            }
            seen_non_apply[idx] = true;
        }
        if category < highest {
            return Err(Error::UnsupportedOrder {
                detail: format!("{category:?} appears after {highest:?}"),
            });
        }
        highest = highest.max(category);
    }
    Ok(())
}

fn non_apply_index(category: InstructionCategory) -> usize {
    match category {
        InstructionCategory::Clear => 0,
        InstructionCategory::WriteMetadata => 1,
        InstructionCategory::GotoTable => 2,
        InstructionCategory::Apply => unreachable!("caller already excluded Apply"),
    }
}
