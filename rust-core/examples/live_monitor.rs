//! Run the default input through the phaser to the default output
//!
//! cargo run --example live_monitor --features live

use spectral_phaser::audio::LiveMonitor;
use spectral_phaser::PhaserConfig;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let monitor = LiveMonitor::open_default(PhaserConfig::default())?;
    monitor.start()?;

    // Sweep the comb phase once per second for ten seconds
    let params = monitor.params();
    for step in 0..1000 {
        params.set_phase(step as f32 / 100.0);
        thread::sleep(Duration::from_millis(10));
    }

    monitor.pause()?;
    Ok(())
}
