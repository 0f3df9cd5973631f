//! Encode a mark.

use anyhow::{bail, Result};
use colored::Colorize;
use formica_core::codec;
use formica_core::geometry::RelativeCoordinate;
use formica_core::signal::{Signal, SignalKind, MAX_HOP_COUNT};

pub fn run(kind: &str, x: i32, y: i32, hops: u8) -> Result<()> {
    let kind: SignalKind = kind.parse()?;
    if hops > MAX_HOP_COUNT {
        bail!("hop count {} exceeds the wire limit of {}", hops, MAX_HOP_COUNT);
    }
    let signal = Signal::new(kind, RelativeCoordinate::new(x, y)).with_hop_count(hops);
    if !codec::is_lossless(&signal) {
        println!(
            "{} coordinates beyond ±{} lose their high bits on the wire",
            "!".yellow(),
            codec::MAX_MAGNITUDE
        );
    }

    let word = codec::encode(&signal);
    println!("{}", word.to_string().cyan().bold());
    println!("{}", format!("{word:#010x}").dimmed());
    Ok(())
}
