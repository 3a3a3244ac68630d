//! Bit-exact rendering of a predictor table, matching `write_predictor` in
//! `examples/original_source/src/features/gen-predictor.c`.

use std::fmt::Write as _;

use super::step::StepFunction;
use super::{History, NUM_HISTORIES, NUM_OPCODES};

/// Render the common-history subset as the legacy JSON-like array.
///
/// `history_index[h]` is the dense output index of history `h` if it's common, `-1`
/// otherwise. An opcode's entry in a history's record is included only when *that
/// opcode's own successor history* is also common, even though its count may be nonzero.
pub fn emit(steps: &[StepFunction; NUM_OPCODES], counts: &[[u64; NUM_OPCODES]], history_index: &[i64]) -> String {
    let mut out = String::from("[");
    let mut list_sep = "";
    for history in 0..NUM_HISTORIES {
        if history_index[history] == -1 {
            continue;
        }
        out.push_str(list_sep);
        out.push_str("\n    {");
        list_sep = ", ";

        let mut dict_sep = "";
        for opcode in 0..NUM_OPCODES {
            let new_history = steps[opcode].apply(history as History);
            let new_state = history_index[new_history as usize];
            if new_state == -1 {
                continue;
            }
            let count = counts[history][opcode];
            write!(out, "{dict_sep}\"{opcode:02x}\": {{\"new_state\": {new_state}, \"count\": {count}}}").expect("String writes never fail");
            dict_sep = ", ";
        }
        out.push('}');
    }
    out.push_str("\n]");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_common_histories_is_an_empty_array() {
        let steps = super::super::step::step_functions();
        let counts = vec![[0u64; NUM_OPCODES]; NUM_HISTORIES];
        let index = vec![-1i64; NUM_HISTORIES];
        assert_eq!(emit(&steps, &counts, &index), "[\n]");
    }

    #[test]
    fn single_common_history_with_no_common_successors_is_an_empty_record() {
        let steps = super::super::step::step_functions();
        let mut counts = vec![[0u64; NUM_OPCODES]; NUM_HISTORIES];
        counts[0][0] = 100;
        let mut index = vec![-1i64; NUM_HISTORIES];
        index[0] = 0;
        assert_eq!(emit(&steps, &counts, &index), "[\n    {}\n]");
    }
}
