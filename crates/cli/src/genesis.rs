//! Genesis balance generation for node setup.
//!
//! Produces TOML the node's genesis loader understands, funding every
//! derived actor (and optionally the funder) at chain start.

use std::fmt::Write;

use stampede_workloads::KeyringSigner;

/// Generate TOML-formatted genesis balances for a campaign seed.
///
/// Output format:
/// ```toml
/// [[genesis.balances]]
/// address = "0x..."
/// balance = "1000000000000000000000000"
/// ```
pub fn generate_genesis_toml(
    seed: u64,
    actors: usize,
    balance: u128,
    funder_balance: Option<u128>,
) -> String {
    let ring = if funder_balance.is_some() {
        KeyringSigner::derive_with_funder(seed, actors)
    } else {
        KeyringSigner::derive(seed, actors)
    };

    let mut output = String::new();
    let total = actors + usize::from(funder_balance.is_some());
    writeln!(output, "# Generated genesis balances for campaign actors").unwrap();
    writeln!(output, "# seed {seed}: {total} accounts").unwrap();
    writeln!(output).unwrap();

    for address in ring.addresses() {
        writeln!(output, "[[genesis.balances]]").unwrap();
        writeln!(output, "address = \"{}\"", address.to_hex()).unwrap();
        writeln!(output, "balance = \"{balance}\"").unwrap();
        writeln!(output).unwrap();
    }

    if let (Some(funder_balance), Some(funder)) = (funder_balance, ring.funder_address()) {
        writeln!(output, "# Funder").unwrap();
        writeln!(output, "[[genesis.balances]]").unwrap();
        writeln!(output, "address = \"{}\"", funder.to_hex()).unwrap();
        writeln!(output, "balance = \"{funder_balance}\"").unwrap();
        writeln!(output).unwrap();
    }

    output
}
