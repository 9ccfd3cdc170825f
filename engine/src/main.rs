use ffp_engine::simulation::Simulation;
use ffp_engine::types::{FlipFlopKind, Signal, Variant};

fn jk_master_slave() {
    let mut sim = Simulation::new();
    sim.set_variant(Variant::MasterSlave);
    sim.set_kind(FlipFlopKind::JK);
    sim.set_input(Signal::J, true);
    sim.set_input(Signal::K, true);

    println!("{}", sim.description());
    println!("------------------");
    for _ in 0..4 {
        sim.toggle_clock();
        sim.toggle_clock();
        println!("-> {}", sim.output());
    }
}

fn d_to_jk_conversion() {
    let mut sim = Simulation::new();
    sim.set_input(Signal::D, true);
    sim.set_conversion_target(FlipFlopKind::JK).unwrap();

    let spec = sim.conversion_spec().unwrap();
    println!("{} -> {}: {}", spec.from, spec.to, spec.description);
    for eq in spec.equations {
        println!("  {}", eq);
    }
    println!("{}", spec.render_table());

    for (sig, val) in &sim.conversion().unwrap().signals {
        println!("{} = {}", sig, *val as u8);
    }
}

fn timing_history() {
    let mut sim = Simulation::new();
    sim.set_kind(FlipFlopKind::T);
    sim.set_input(Signal::T, true);
    for _ in 0..6 {
        sim.toggle_clock();
    }
    println!("------------------");
    for e in sim.history().iter() {
        println!("t={} CLK={} {}", e.time, e.clk as u8, e.outputs);
    }
}

fn main() {
    jk_master_slave();
    d_to_jk_conversion();
    timing_history();
}
