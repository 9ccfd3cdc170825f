//! The simulation aggregate and its command surface. Every mutation goes
//! through one of the commands here; each runs to completion before the next
//! is accepted, and a rejected command leaves the state untouched.

use std::str::FromStr;

use log::{debug, warn};

use crate::clock::ClockControl;
use crate::conversions::{self, ConversionSpec};
use crate::error::EngineError;
use crate::flipflops::transition;
use crate::history::History;
use crate::types::{FlipFlopKind, InputLevels, Output, Signal, Variant};

/// An active conversion target, with the excitation levels last evaluated for
/// the current inputs and Q. `source` is the kind that was active when the
/// target was selected; switching kind clears the selection, so it always
/// matches the simulation's current kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSelection {
    pub source: FlipFlopKind,
    pub target: FlipFlopKind,
    pub signals: Vec<(Signal, bool)>,
}

pub struct Simulation {
    kind: FlipFlopKind,
    variant: Variant,
    inputs: InputLevels,
    output: Output,
    history: History,
    clock: ClockControl,
    conversion: Option<ConversionSelection>,
}

impl Simulation {
    pub fn new() -> Simulation {
        Simulation {
            kind: FlipFlopKind::D,
            variant: Variant::Standard,
            inputs: InputLevels::default(),
            output: Output::default(),
            history: History::new(),
            clock: ClockControl::new(),
            conversion: None,
        }
    }

    // ---- read accessors ------------------------------------------------

    pub fn kind(&self) -> FlipFlopKind {
        self.kind
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn inputs(&self) -> &InputLevels {
        &self.inputs
    }

    pub fn output(&self) -> Output {
        self.output
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn auto_run(&self) -> bool {
        self.clock.auto_run()
    }

    pub fn clock_period_ms(&self) -> u32 {
        self.clock.period_ms()
    }

    pub fn conversion(&self) -> Option<&ConversionSelection> {
        self.conversion.as_ref()
    }

    /// Spec of the active conversion (equations, description, truth table).
    pub fn conversion_spec(&self) -> Option<&'static ConversionSpec> {
        let sel = self.conversion.as_ref()?;
        conversions::lookup(sel.source, sel.target).ok()
    }

    pub fn description(&self) -> String {
        self.kind.description(self.variant)
    }

    // ---- commands ------------------------------------------------------

    /// Replace the flip-flop kind. Lines the new kind does not recognize are
    /// zeroed, and history and any active conversion are dropped; both are
    /// only meaningful within one kind.
    pub fn set_kind(&mut self, kind: FlipFlopKind) {
        debug!("set_kind {}", kind);
        self.kind = kind;
        self.inputs.retain_for(kind);
        self.history.clear();
        self.conversion = None;
    }

    /// Replace the structural variant; history is dropped with it.
    pub fn set_variant(&mut self, variant: Variant) {
        debug!("set_variant {}", variant);
        self.variant = variant;
        self.history.clear();
    }

    /// Write one input line. A CLK write additionally recomputes the output
    /// and records a history entry; writes to data lines never recompute.
    /// Triggering is level-gated, so repeated writes of the same clock level
    /// each run the transition again.
    pub fn set_input(&mut self, sig: Signal, val: bool) {
        debug!("set_input {}={}", sig, val);
        self.inputs.set(sig, val);
        if sig == Signal::Clk {
            self.recompute_output();
            self.history.record(self.inputs, self.output);
        }
        self.refresh_conversion();
    }

    /// String-keyed variant of [`set_input`](Self::set_input) for presentation
    /// layers holding raw names. Unknown names are rejected without touching
    /// the state.
    pub fn set_input_by_name(&mut self, name: &str, val: bool) -> Result<(), EngineError> {
        let sig = Signal::from_str(name).map_err(|e| {
            warn!("set_input rejected: {}", e);
            e
        })?;
        self.set_input(sig, val);
        Ok(())
    }

    pub fn set_kind_by_name(&mut self, name: &str) -> Result<(), EngineError> {
        let kind = FlipFlopKind::from_str(name).map_err(|e| {
            warn!("set_kind rejected: {}", e);
            e
        })?;
        self.set_kind(kind);
        Ok(())
    }

    pub fn set_variant_by_name(&mut self, name: &str) -> Result<(), EngineError> {
        let variant = Variant::from_str(name).map_err(|e| {
            warn!("set_variant rejected: {}", e);
            e
        })?;
        self.set_variant(variant);
        Ok(())
    }

    pub fn toggle_clock(&mut self) {
        let next = !self.inputs.clk;
        self.set_input(Signal::Clk, next);
    }

    /// Select a conversion target for the current kind and evaluate its
    /// excitation lines. Converting a kind to itself is not defined.
    pub fn set_conversion_target(&mut self, target: FlipFlopKind) -> Result<(), EngineError> {
        let signals = conversions::evaluate_excitation(self.kind, target, &self.inputs, self.output.q)
            .map_err(|e| {
                warn!("set_conversion_target rejected: {}", e);
                e
            })?;
        debug!("set_conversion_target {}->{}", self.kind, target);
        self.conversion = Some(ConversionSelection {
            source: self.kind,
            target,
            signals,
        });
        Ok(())
    }

    /// Clamped into the 100..=2000 ms range the auto-clock accepts.
    pub fn set_clock_period(&mut self, ms: u32) {
        self.clock.set_period_ms(ms);
        debug!("set_clock_period {}ms", self.clock.period_ms());
    }

    pub fn toggle_auto_run(&mut self) -> bool {
        let running = self.clock.toggle_auto_run();
        debug!("auto_run {}", running);
        running
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Back to the initial state, keeping kind, variant and clock period.
    pub fn reset(&mut self) {
        debug!("reset");
        self.inputs = InputLevels::default();
        self.output = Output::default();
        self.history = History::new();
        self.clock.stop();
        self.conversion = None;
    }

    // ---- internals -----------------------------------------------------

    fn recompute_output(&mut self) {
        let clk = self.inputs.clk;
        self.output = match self.variant {
            Variant::Standard => transition(self.kind, clk, &self.inputs, self.output, true),
            Variant::MasterSlave => {
                // master captures on clock high; the slave then only sees the
                // value the master latched, which is what stops race-through
                let master = transition(self.kind, clk, &self.inputs, self.output, true);
                let mut slave_inputs = self.inputs;
                slave_inputs.d = master.q;
                slave_inputs.t = master.q;
                slave_inputs.s = master.q;
                slave_inputs.r = !master.q;
                slave_inputs.j = master.q;
                slave_inputs.k = !master.q;
                transition(self.kind, clk, &slave_inputs, master, false)
            }
        };
    }

    fn refresh_conversion(&mut self) {
        if let Some(sel) = &mut self.conversion {
            // the pair stays valid for the life of the selection
            if let Ok(signals) =
                conversions::evaluate_excitation(sel.source, sel.target, &self.inputs, self.output.q)
            {
                sel.signals = signals;
            }
        }
    }
}

impl Default for Simulation {
    fn default() -> Simulation {
        Simulation::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_documented_initial_state() {
        let sim = Simulation::new();
        assert_eq!(sim.kind(), FlipFlopKind::D);
        assert_eq!(sim.variant(), Variant::Standard);
        assert_eq!(sim.output(), Output { q: false, qbar: true });
        assert_eq!(*sim.inputs(), InputLevels::default());
        assert!(sim.history().is_empty());
        assert!(!sim.auto_run());
        assert_eq!(sim.clock_period_ms(), ClockControl::DEFAULT_PERIOD_MS);
        assert!(sim.conversion().is_none());
    }

    #[test]
    fn d_latches_data_on_clock_write() {
        let mut sim = Simulation::new();
        sim.set_input(Signal::D, true);
        assert!(sim.history().is_empty(), "data writes never record history");
        sim.set_input(Signal::Clk, true);
        assert_eq!(sim.output(), Output { q: true, qbar: false });
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn t_toggles_per_clock_high_write() {
        let mut sim = Simulation::new();
        sim.set_kind(FlipFlopKind::T);
        sim.set_input(Signal::T, true);
        sim.set_input(Signal::Clk, true);
        assert!(sim.output().q);
        sim.set_input(Signal::Clk, false);
        sim.set_input(Signal::Clk, true);
        assert!(!sim.output().q);
    }

    #[test]
    fn repeated_same_level_clock_writes_still_recompute() {
        // level-gated capture: a second CLK=1 write runs the transition again
        let mut sim = Simulation::new();
        sim.set_kind(FlipFlopKind::T);
        sim.set_input(Signal::T, true);
        sim.set_input(Signal::Clk, true);
        assert!(sim.output().q);
        assert_eq!(sim.history().len(), 1);
        sim.set_input(Signal::Clk, true);
        assert!(!sim.output().q);
        assert_eq!(sim.history().len(), 2);
    }

    #[test]
    fn sr_race_forces_both_low() {
        let mut sim = Simulation::new();
        sim.set_kind(FlipFlopKind::SR);
        sim.set_input(Signal::S, true);
        sim.set_input(Signal::R, true);
        sim.set_input(Signal::Clk, true);
        assert_eq!(sim.output(), Output::SR_INVALID);
    }

    #[test]
    fn jk_master_slave_full_cycle() {
        let mut sim = Simulation::new();
        sim.set_variant(Variant::MasterSlave);
        sim.set_kind(FlipFlopKind::JK);
        sim.set_input(Signal::J, true);
        sim.set_input(Signal::K, true);
        assert!(!sim.output().q);

        // clock high: master toggles to 1, slave holds it; clock low: slave
        // forwards the value the master captured, nothing newer
        sim.set_input(Signal::Clk, true);
        sim.set_input(Signal::Clk, false);
        assert!(sim.output().q);
        assert!(sim.output().is_complementary());
    }

    #[test]
    fn master_slave_d_never_races_through() {
        let mut sim = Simulation::new();
        sim.set_variant(Variant::MasterSlave);
        sim.set_input(Signal::D, true);
        sim.set_input(Signal::Clk, true);
        let after_high = sim.output();
        // changing D while the clock is high must not reach the output
        sim.set_input(Signal::D, false);
        assert_eq!(sim.output(), after_high);
    }

    #[test]
    fn kind_switch_zeroes_foreign_inputs_and_clears_state() {
        let mut sim = Simulation::new();
        sim.set_input(Signal::D, true);
        sim.set_input(Signal::Clk, true);
        sim.set_conversion_target(FlipFlopKind::JK).unwrap();
        sim.set_kind(FlipFlopKind::JK);
        assert!(!sim.inputs().d);
        assert!(sim.history().is_empty());
        assert!(sim.conversion().is_none());
        // the clock line survives a kind switch
        assert!(sim.inputs().clk);
    }

    #[test]
    fn variant_switch_clears_history_only() {
        let mut sim = Simulation::new();
        sim.set_input(Signal::D, true);
        sim.set_input(Signal::Clk, true);
        sim.set_variant(Variant::MasterSlave);
        assert!(sim.history().is_empty());
        assert!(sim.inputs().d);
    }

    #[test]
    fn unknown_names_rejected_without_mutation() {
        let mut sim = Simulation::new();
        sim.set_input(Signal::D, true);
        let before_inputs = *sim.inputs();
        let before_out = sim.output();

        assert!(matches!(
            sim.set_input_by_name("X", true),
            Err(EngineError::UnknownSignal(_))
        ));
        assert!(matches!(
            sim.set_kind_by_name("RS"),
            Err(EngineError::UnknownKind(_))
        ));
        assert!(matches!(
            sim.set_variant_by_name("Dual"),
            Err(EngineError::UnknownVariant(_))
        ));
        assert_eq!(*sim.inputs(), before_inputs);
        assert_eq!(sim.output(), before_out);
        assert_eq!(sim.kind(), FlipFlopKind::D);
        assert_eq!(sim.variant(), Variant::Standard);
    }

    #[test]
    fn self_conversion_rejected() {
        let mut sim = Simulation::new();
        assert_eq!(
            sim.set_conversion_target(FlipFlopKind::D),
            Err(EngineError::SelfConversion(FlipFlopKind::D))
        );
        assert!(sim.conversion().is_none());
    }

    #[test]
    fn conversion_reevaluated_on_input_and_clock_writes() {
        let mut sim = Simulation::new();
        sim.set_conversion_target(FlipFlopKind::JK).unwrap();
        // D=0: J=0, K=1
        assert_eq!(
            sim.conversion().unwrap().signals,
            vec![(Signal::J, false), (Signal::K, true)]
        );
        sim.set_input(Signal::D, true);
        assert_eq!(
            sim.conversion().unwrap().signals,
            vec![(Signal::J, true), (Signal::K, false)]
        );
        // conversion to T depends on Q, which a clock write updates
        sim.set_conversion_target(FlipFlopKind::T).unwrap();
        assert_eq!(sim.conversion().unwrap().signals, vec![(Signal::T, true)]);
        sim.set_input(Signal::Clk, true); // Q := 1
        assert_eq!(sim.conversion().unwrap().signals, vec![(Signal::T, false)]);
    }

    #[test]
    fn toggle_clock_is_clk_write_sugar() {
        let mut sim = Simulation::new();
        sim.set_input(Signal::D, true);
        sim.toggle_clock();
        assert!(sim.inputs().clk);
        assert!(sim.output().q);
        sim.toggle_clock();
        assert!(!sim.inputs().clk);
        assert_eq!(sim.history().len(), 2);
    }

    #[test]
    fn clock_period_clamped_and_kept_across_reset() {
        let mut sim = Simulation::new();
        sim.set_clock_period(50);
        assert_eq!(sim.clock_period_ms(), 100);
        sim.set_clock_period(9999);
        assert_eq!(sim.clock_period_ms(), 2000);
        sim.set_clock_period(400);
        sim.reset();
        assert_eq!(sim.clock_period_ms(), 400);
    }

    #[test]
    fn reset_preserves_selection_and_period_only() {
        let mut sim = Simulation::new();
        sim.set_kind(FlipFlopKind::JK);
        sim.set_variant(Variant::MasterSlave);
        sim.set_clock_period(300);
        sim.set_input(Signal::J, true);
        sim.set_input(Signal::Clk, true);
        sim.set_conversion_target(FlipFlopKind::D).unwrap();
        sim.toggle_auto_run();

        sim.reset();
        assert_eq!(sim.kind(), FlipFlopKind::JK);
        assert_eq!(sim.variant(), Variant::MasterSlave);
        assert_eq!(sim.clock_period_ms(), 300);
        assert_eq!(*sim.inputs(), InputLevels::default());
        assert_eq!(sim.output(), Output::default());
        assert!(sim.history().is_empty());
        assert!(sim.conversion().is_none());
        assert!(!sim.auto_run());
    }
}
