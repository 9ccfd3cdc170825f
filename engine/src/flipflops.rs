//! Pure state-transition functions, one per flip-flop kind.
//!
//! Triggering is level-gated: a function acts when the clock level supplied
//! with the call matches the requested polarity, and holds otherwise. There is
//! no two-sample edge detector; the engine models capture at the moment a CLK
//! write happens.

use crate::types::{FlipFlopKind, InputLevels, Output};

fn triggered(clk: bool, rising_edge: bool) -> bool {
    (rising_edge && clk) || (!rising_edge && !clk)
}

pub fn d_flip_flop(clk: bool, d: bool, prev: Output, rising_edge: bool) -> Output {
    if triggered(clk, rising_edge) {
        return Output::from_q(d);
    }
    prev
}

pub fn t_flip_flop(clk: bool, t: bool, prev: Output, rising_edge: bool) -> Output {
    if triggered(clk, rising_edge) && t {
        return prev.toggled();
    }
    prev
}

pub fn sr_flip_flop(clk: bool, s: bool, r: bool, prev: Output, rising_edge: bool) -> Output {
    if triggered(clk, rising_edge) {
        if s && r {
            // S=R=1 is the classic invalid combination; resolved
            // deterministically by forcing both outputs low.
            return Output::SR_INVALID;
        } else if s {
            return Output::from_q(true);
        } else if r {
            return Output::from_q(false);
        }
    }
    prev
}

pub fn jk_flip_flop(clk: bool, j: bool, k: bool, prev: Output, rising_edge: bool) -> Output {
    if triggered(clk, rising_edge) {
        if j && k {
            return prev.toggled();
        } else if j {
            return Output::from_q(true);
        } else if k {
            return Output::from_q(false);
        }
    }
    prev
}

/// Dispatch to the transition function for `kind`, reading that kind's lines
/// out of `inputs`.
pub fn transition(
    kind: FlipFlopKind,
    clk: bool,
    inputs: &InputLevels,
    prev: Output,
    rising_edge: bool,
) -> Output {
    match kind {
        FlipFlopKind::D => d_flip_flop(clk, inputs.d, prev, rising_edge),
        FlipFlopKind::T => t_flip_flop(clk, inputs.t, prev, rising_edge),
        FlipFlopKind::SR => sr_flip_flop(clk, inputs.s, inputs.r, prev, rising_edge),
        FlipFlopKind::JK => jk_flip_flop(clk, inputs.j, inputs.k, prev, rising_edge),
    }
}
