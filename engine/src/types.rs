use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Most-recent history entries kept for the timing diagram.
pub const HISTORY_CAP: usize = 50;

/// Bounds the auto-clock period is clamped into, in milliseconds.
pub const MIN_CLOCK_PERIOD_MS: u32 = 100;
pub const MAX_CLOCK_PERIOD_MS: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipFlopKind {
    D,
    T,
    SR,
    JK,
}

impl FlipFlopKind {
    pub const ALL: [FlipFlopKind; 4] = [
        FlipFlopKind::D,
        FlipFlopKind::T,
        FlipFlopKind::SR,
        FlipFlopKind::JK,
    ];

    /// Signals recognized by this kind, clock first.
    pub fn signals(&self) -> &'static [Signal] {
        match self {
            FlipFlopKind::D => &[Signal::Clk, Signal::D],
            FlipFlopKind::T => &[Signal::Clk, Signal::T],
            FlipFlopKind::SR => &[Signal::Clk, Signal::S, Signal::R],
            FlipFlopKind::JK => &[Signal::Clk, Signal::J, Signal::K],
        }
    }

    pub fn description(&self, variant: Variant) -> String {
        let variant_text = match variant {
            Variant::MasterSlave => "Master-Slave ",
            Variant::Standard => "",
        };
        let body = match self {
            FlipFlopKind::D => {
                "D Flip-Flop: Data is stored on the rising edge of the clock. \
                 The output Q follows the input D when the clock triggers."
            }
            FlipFlopKind::T => {
                "T Flip-Flop: Toggle flip-flop. Output toggles when T=1 and the \
                 clock triggers, remains unchanged when T=0."
            }
            FlipFlopKind::SR => {
                "SR Flip-Flop: Set-Reset flip-flop. S=1 sets output to 1, R=1 \
                 resets output to 0. S=R=1 is usually an invalid state."
            }
            FlipFlopKind::JK => {
                "JK Flip-Flop: Like SR but with J=K=1 causing a toggle, \
                 eliminating the invalid state issue of SR."
            }
        };
        format!("{}{}", variant_text, body)
    }
}

impl fmt::Display for FlipFlopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlipFlopKind::D => "D",
            FlipFlopKind::T => "T",
            FlipFlopKind::SR => "SR",
            FlipFlopKind::JK => "JK",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for FlipFlopKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" => Ok(FlipFlopKind::D),
            "T" => Ok(FlipFlopKind::T),
            "SR" => Ok(FlipFlopKind::SR),
            "JK" => Ok(FlipFlopKind::JK),
            other => Err(EngineError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Standard,
    MasterSlave,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Variant::Standard => "Standard",
            Variant::MasterSlave => "MasterSlave",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Variant {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Standard" => Ok(Variant::Standard),
            "MasterSlave" => Ok(Variant::MasterSlave),
            other => Err(EngineError::UnknownVariant(other.to_string())),
        }
    }
}

/// One input line of a flip-flop. All seven are stored in [`InputLevels`];
/// which ones actually drive the transition depends on the active kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Clk,
    D,
    T,
    S,
    R,
    J,
    K,
}

impl Signal {
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Clk => "CLK",
            Signal::D => "D",
            Signal::T => "T",
            Signal::S => "S",
            Signal::R => "R",
            Signal::J => "J",
            Signal::K => "K",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Signal {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLK" => Ok(Signal::Clk),
            "D" => Ok(Signal::D),
            "T" => Ok(Signal::T),
            "S" => Ok(Signal::S),
            "R" => Ok(Signal::R),
            "J" => Ok(Signal::J),
            "K" => Ok(Signal::K),
            other => Err(EngineError::UnknownSignal(other.to_string())),
        }
    }
}

/// The `{Q, Qbar}` output pair. Constructed through [`Output::from_q`] so the
/// complement relation holds at every transition; the single sanctioned
/// exception is the SR race state [`Output::SR_INVALID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    pub q: bool,
    pub qbar: bool,
}

impl Output {
    /// Both lines forced low, the deterministic resolution of S=R=1.
    pub const SR_INVALID: Output = Output {
        q: false,
        qbar: false,
    };

    pub fn from_q(q: bool) -> Output {
        Output { q, qbar: !q }
    }

    pub fn toggled(&self) -> Output {
        Output::from_q(!self.q)
    }

    pub fn is_complementary(&self) -> bool {
        self.qbar == !self.q
    }
}

impl Default for Output {
    fn default() -> Output {
        Output::from_q(false)
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q={} Q'={}", self.q as u8, self.qbar as u8)
    }
}

/// Current level of every input line. Lines outside the active kind's signal
/// set are kept but inert; switching kind zeroes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputLevels {
    pub clk: bool,
    pub d: bool,
    pub t: bool,
    pub s: bool,
    pub r: bool,
    pub j: bool,
    pub k: bool,
}

impl InputLevels {
    pub fn get(&self, sig: Signal) -> bool {
        match sig {
            Signal::Clk => self.clk,
            Signal::D => self.d,
            Signal::T => self.t,
            Signal::S => self.s,
            Signal::R => self.r,
            Signal::J => self.j,
            Signal::K => self.k,
        }
    }

    pub fn set(&mut self, sig: Signal, val: bool) {
        match sig {
            Signal::Clk => self.clk = val,
            Signal::D => self.d = val,
            Signal::T => self.t = val,
            Signal::S => self.s = val,
            Signal::R => self.r = val,
            Signal::J => self.j = val,
            Signal::K => self.k = val,
        }
    }

    /// Zero every line that `kind` does not recognize.
    pub fn retain_for(&mut self, kind: FlipFlopKind) {
        let keep = kind.signals();
        for sig in [
            Signal::D,
            Signal::T,
            Signal::S,
            Signal::R,
            Signal::J,
            Signal::K,
        ] {
            if !keep.contains(&sig) {
                self.set(sig, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_signal_parse() {
        assert_eq!("JK".parse::<FlipFlopKind>().unwrap(), FlipFlopKind::JK);
        assert_eq!("CLK".parse::<Signal>().unwrap(), Signal::Clk);
        assert!("Z".parse::<Signal>().is_err());
        assert!("DD".parse::<FlipFlopKind>().is_err());
        assert!("masterslave".parse::<Variant>().is_err());
    }

    #[test]
    fn retain_zeroes_foreign_lines() {
        let mut levels = InputLevels {
            clk: true,
            d: true,
            t: true,
            s: true,
            r: true,
            j: true,
            k: true,
        };
        levels.retain_for(FlipFlopKind::SR);
        assert!(levels.clk && levels.s && levels.r);
        assert!(!levels.d && !levels.t && !levels.j && !levels.k);
    }

    #[test]
    fn output_complement() {
        assert_eq!(Output::from_q(true), Output { q: true, qbar: false });
        assert!(Output::from_q(false).is_complementary());
        assert!(!Output::SR_INVALID.is_complementary());
        assert_eq!(Output::from_q(false).toggled().q, true);
    }
}
