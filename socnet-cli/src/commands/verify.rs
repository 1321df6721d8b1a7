//! Integrity verification command

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::store;

#[derive(Parser, Debug)]
pub struct VerifyArgs {}

pub fn run_verify(_args: VerifyArgs, data_dir: &Path) -> Result<()> {
    let network = store::open(data_dir)?;
    let issues = network.check_integrity();

    if issues.is_empty() {
        println!(
            "OK: {} users, {} posts, no integrity violations.",
            network.user_count(),
            network.post_count()
        );
        return Ok(());
    }

    for issue in &issues {
        eprintln!("violation: {}", issue);
    }
    anyhow::bail!("{} integrity violations found", issues.len())
}
