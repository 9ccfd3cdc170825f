//! Cross-kind conversion: excitation equations, truth tables and the
//! evaluator that produces concrete excitation levels for the current inputs.
//!
//! The displayed equations and the evaluator are two renderings of the same
//! boolean algebra (characteristic equation of the target expressed through
//! the source's Q); `excitation_matches_tables` in the tests pins them
//! together row by row.

use crate::error::EngineError;
use crate::table::Table;
use crate::types::{FlipFlopKind, InputLevels, Signal};

/// One valid input assignment and the excitation bits it produces.
/// Conflicting source combinations (SR with S=R=1) are omitted, not computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthRow {
    pub inputs: &'static [bool],
    pub outputs: &'static [bool],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthTable {
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub rows: &'static [TruthRow],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSpec {
    pub from: FlipFlopKind,
    pub to: FlipFlopKind,
    pub equations: &'static [&'static str],
    pub description: &'static str,
    pub table: TruthTable,
}

impl ConversionSpec {
    /// Render the truth table in the terminal format used across the engine.
    pub fn render_table(&self) -> Table<char> {
        let mut t = Table::new();
        let mut cols: Vec<String> = self.table.inputs.iter().map(|s| s.to_string()).collect();
        cols.extend(self.table.outputs.iter().map(|s| s.to_string()));
        t.set_columns(cols);
        for row in self.table.rows {
            let idx = t.add_row();
            for (name, bit) in self.table.inputs.iter().zip(row.inputs) {
                t.set_val_at(idx, name, if *bit { '1' } else { '0' });
            }
            for (name, bit) in self.table.outputs.iter().zip(row.outputs) {
                t.set_val_at(idx, name, if *bit { '1' } else { '0' });
            }
        }
        t
    }
}

macro_rules! rows {
    ($([$($i:expr),+ $(,)?] => [$($o:expr),+ $(,)?]),+ $(,)?) => {
        &[$(TruthRow { inputs: &[$($i),+], outputs: &[$($o),+] }),+]
    };
}

const D_TO_T: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::D,
    to: FlipFlopKind::T,
    equations: &["T = D ⊕ Q"],
    description: "Toggle when D differs from Q.",
    table: TruthTable {
        inputs: &["D", "Q"],
        outputs: &["T"],
        rows: rows![
            [false, false] => [false],
            [false, true ] => [true ],
            [true , false] => [true ],
            [true , true ] => [false],
        ],
    },
};

const D_TO_SR: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::D,
    to: FlipFlopKind::SR,
    equations: &["S = D ∧ ¬Q", "R = ¬D ∧ Q"],
    description: "Set when D=1,Q=0; reset when D=0,Q=1.",
    table: TruthTable {
        inputs: &["D", "Q"],
        outputs: &["S", "R"],
        rows: rows![
            [false, false] => [false, false],
            [false, true ] => [false, true ],
            [true , false] => [true , false],
            [true , true ] => [false, false],
        ],
    },
};

const D_TO_JK: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::D,
    to: FlipFlopKind::JK,
    equations: &["J = D", "K = ¬D"],
    description: "Use D for J and its complement for K.",
    table: TruthTable {
        inputs: &["D"],
        outputs: &["J", "K"],
        rows: rows![
            [false] => [false, true ],
            [true ] => [true , false],
        ],
    },
};

const T_TO_D: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::T,
    to: FlipFlopKind::D,
    equations: &["D = T ⊕ Q"],
    description: "XOR T with Q.",
    table: TruthTable {
        inputs: &["T", "Q"],
        outputs: &["D"],
        rows: rows![
            [false, false] => [false],
            [false, true ] => [true ],
            [true , false] => [true ],
            [true , true ] => [false],
        ],
    },
};

const T_TO_SR: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::T,
    to: FlipFlopKind::SR,
    equations: &["S = T ∧ ¬Q", "R = T ∧ Q"],
    description: "Set on 0→1 toggle; reset on 1→0 toggle.",
    table: TruthTable {
        inputs: &["T", "Q"],
        outputs: &["S", "R"],
        rows: rows![
            [false, false] => [false, false],
            [false, true ] => [false, false],
            [true , false] => [true , false],
            [true , true ] => [false, true ],
        ],
    },
};

const T_TO_JK: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::T,
    to: FlipFlopKind::JK,
    equations: &["J = T", "K = T"],
    description: "Tie T to both J and K.",
    table: TruthTable {
        inputs: &["T"],
        outputs: &["J", "K"],
        rows: rows![
            [false] => [false, false],
            [true ] => [true , true ],
        ],
    },
};

const SR_TO_D: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::SR,
    to: FlipFlopKind::D,
    equations: &["D = S ∨ (¬R ∧ Q)"],
    description: "Set retains 1; reset clears to 0 or holds Q.",
    table: TruthTable {
        inputs: &["S", "R", "Q"],
        outputs: &["D"],
        rows: rows![
            [false, false, false] => [false],
            [false, false, true ] => [true ],
            [false, true , false] => [false],
            [false, true , true ] => [false],
            [true , false, false] => [true ],
            [true , false, true ] => [true ],
        ],
    },
};

const SR_TO_T: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::SR,
    to: FlipFlopKind::T,
    equations: &["T = (S ∧ ¬Q) ∨ (R ∧ Q)"],
    description: "Toggle when transitioning via S or R.",
    table: TruthTable {
        inputs: &["S", "R", "Q"],
        outputs: &["T"],
        rows: rows![
            [false, false, false] => [false],
            [false, false, true ] => [false],
            [false, true , false] => [false],
            [false, true , true ] => [true ],
            [true , false, false] => [true ],
            [true , false, true ] => [false],
        ],
    },
};

const SR_TO_JK: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::SR,
    to: FlipFlopKind::JK,
    equations: &["J = S", "K = R"],
    description: "Direct map S→J, R→K (SR invalid omitted).",
    table: TruthTable {
        inputs: &["S", "R"],
        outputs: &["J", "K"],
        rows: rows![
            [false, false] => [false, false],
            [false, true ] => [false, true ],
            [true , false] => [true , false],
        ],
    },
};

const JK_TO_D: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::JK,
    to: FlipFlopKind::D,
    equations: &["D = J ∨ (¬K ∧ Q)"],
    description: "Set when J=1; reset on K=1; hold on K=0.",
    table: TruthTable {
        inputs: &["J", "K", "Q"],
        outputs: &["D"],
        rows: rows![
            [false, false, false] => [false],
            [false, false, true ] => [true ],
            [false, true , false] => [false],
            [false, true , true ] => [false],
            [true , false, false] => [true ],
            [true , false, true ] => [true ],
            [true , true , false] => [true ],
            [true , true , true ] => [false],
        ],
    },
};

const JK_TO_T: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::JK,
    to: FlipFlopKind::T,
    equations: &["T = (J ∧ ¬Q) ∨ (K ∧ Q)"],
    description: "Toggle on set or reset transitions.",
    table: TruthTable {
        inputs: &["J", "K", "Q"],
        outputs: &["T"],
        rows: rows![
            [false, false, false] => [false],
            [false, false, true ] => [false],
            [false, true , false] => [false],
            [false, true , true ] => [true ],
            [true , false, false] => [true ],
            [true , false, true ] => [false],
            [true , true , false] => [true ],
            [true , true , true ] => [true ],
        ],
    },
};

const JK_TO_SR: ConversionSpec = ConversionSpec {
    from: FlipFlopKind::JK,
    to: FlipFlopKind::SR,
    equations: &["S = J ∧ ¬K", "R = K ∧ ¬J"],
    description: "Map to SR, mapping J=K=1 to no change.",
    table: TruthTable {
        inputs: &["J", "K"],
        outputs: &["S", "R"],
        rows: rows![
            [false, false] => [false, false],
            [false, true ] => [false, true ],
            [true , false] => [true , false],
            [true , true ] => [false, false],
        ],
    },
};

/// All 12 ordered pairs; self-pairs are not a defined conversion.
pub fn lookup(
    source: FlipFlopKind,
    target: FlipFlopKind,
) -> Result<&'static ConversionSpec, EngineError> {
    use FlipFlopKind::{D, JK, SR, T};
    match (source, target) {
        (D, T) => Ok(&D_TO_T),
        (D, SR) => Ok(&D_TO_SR),
        (D, JK) => Ok(&D_TO_JK),
        (T, D) => Ok(&T_TO_D),
        (T, SR) => Ok(&T_TO_SR),
        (T, JK) => Ok(&T_TO_JK),
        (SR, D) => Ok(&SR_TO_D),
        (SR, T) => Ok(&SR_TO_T),
        (SR, JK) => Ok(&SR_TO_JK),
        (JK, D) => Ok(&JK_TO_D),
        (JK, T) => Ok(&JK_TO_T),
        (JK, SR) => Ok(&JK_TO_SR),
        (k, _) => Err(EngineError::SelfConversion(k)),
    }
}

/// Evaluate the target kind's excitation lines for the current source inputs
/// and present Q, in the display order of the pair's truth table.
pub fn evaluate_excitation(
    source: FlipFlopKind,
    target: FlipFlopKind,
    inputs: &InputLevels,
    q: bool,
) -> Result<Vec<(Signal, bool)>, EngineError> {
    use FlipFlopKind::{D, JK, SR, T};
    let signals = match (source, target) {
        (D, T) => vec![(Signal::T, inputs.d != q)],
        (D, SR) => vec![(Signal::S, inputs.d && !q), (Signal::R, !inputs.d && q)],
        (D, JK) => vec![(Signal::J, inputs.d), (Signal::K, !inputs.d)],
        (T, D) => vec![(Signal::D, inputs.t != q)],
        (T, SR) => vec![(Signal::S, inputs.t && !q), (Signal::R, inputs.t && q)],
        (T, JK) => vec![(Signal::J, inputs.t), (Signal::K, inputs.t)],
        (SR, D) => vec![(Signal::D, inputs.s || (!inputs.r && q))],
        (SR, T) => vec![(Signal::T, (inputs.s && !q) || (inputs.r && q))],
        (SR, JK) => vec![(Signal::J, inputs.s), (Signal::K, inputs.r)],
        // JK characteristic equation: J=K=1 toggles, so J is masked by ¬Q
        (JK, D) => vec![(Signal::D, (inputs.j && !q) || (!inputs.k && q))],
        (JK, T) => vec![(Signal::T, (inputs.j && !q) || (inputs.k && q))],
        (JK, SR) => vec![
            (Signal::S, inputs.j && !inputs.k),
            (Signal::R, inputs.k && !inputs.j),
        ],
        (k, _) => return Err(EngineError::SelfConversion(k)),
    };
    Ok(signals)
}
