//! Google-facing commands
//!
//! The auth, gmail and classroom command trees are declared so that help
//! and shell completion describe the full CLI, but this build ships without
//! the Google API client.

use anyhow::{Result, bail};
use gog::debug;

use crate::GlobalFlags;

/// Report that `gog <path>` cannot run in this build
pub(crate) fn run(globals: &GlobalFlags, path: &[&str]) -> Result<()> {
    debug!(
        "account={:?} client={:?} json={} plain={} color={:?} verbose={}",
        globals.account, globals.client, globals.json, globals.plain, globals.color, globals.verbose
    );
    bail!(
        "`gog {}` needs Google API access, which this build does not include",
        path.join(" ")
    )
}
