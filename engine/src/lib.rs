//! Simulation engine for the flip-flop playground: pure transition functions
//! for the D, T, SR and JK kinds, standard and master-slave variants, a
//! bounded event history for the timing diagram, and the cross-kind
//! conversion tables. Rendering, theming and the auto-clock timer live in the
//! presentation layer and only talk to [`simulation::Simulation`] through its
//! commands and accessors.

pub mod clock;
pub mod conversions;
pub mod error;
pub mod flipflops;
pub mod history;
pub mod simulation;
pub mod table;
pub mod types;
