//! Decode a wire word.

use anyhow::{Context, Result};
use colored::Colorize;
use formica_core::codec;

/// Accepts decimal or `0x`-prefixed hexadecimal.
pub fn parse_word(text: &str) -> Result<u32> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16)
            .with_context(|| format!("Not a 32-bit hex word: {text}")),
        None => text
            .parse::<u32>()
            .with_context(|| format!("Not a 32-bit word: {text}")),
    }
}

pub fn run(word: &str) -> Result<()> {
    let word = parse_word(word)?;
    let signal = codec::decode(word);
    let polar = signal.coordinates.to_polar();

    println!("{}", format!("Mark {word:#010x}").white().bold());
    println!("  Kind:      {}", signal.kind.to_string().cyan());
    println!(
        "  Position:  ({}, {})",
        signal.coordinates.x.to_string().cyan(),
        signal.coordinates.y.to_string().cyan()
    );
    println!(
        "  From home: {} at {}°",
        polar.distance.to_string().cyan(),
        polar.bearing.to_string().cyan()
    );
    println!("  Hops:      {}", signal.hop_count.to_string().cyan());
    Ok(())
}
