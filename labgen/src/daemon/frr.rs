// Labgen: Synthesizing Network Lab Configurations
// Copyright (C) 2026  Labgen Contributors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Shared file emission for the FRRouting protocol modules.
//!
//! OSPF, RIP and BGP all render into the same two per-router files: `etc/frr/frr.conf` (the
//! concatenated daemon fragments) and `etc/frr/daemons` (the enable flags). Both files are
//! append-only across the daemons of one run; ordering between daemons on the same router is
//! significant, so the orchestrator must not interleave them.

use crate::error::Error;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Append a configuration fragment to `<root>/etc/frr/frr.conf`, creating the directory and the
/// file on first use.
pub fn append_conf(root: &Path, fragment: &str) -> Result<(), Error> {
    let dir = root.join("etc/frr");
    fs::create_dir_all(&dir)?;
    let mut file = OpenOptions::new().create(true).append(true).open(dir.join("frr.conf"))?;
    file.write_all(fragment.as_bytes())?;
    Ok(())
}

/// Append an enable flag (`<daemon>=yes`) to `<root>/etc/frr/daemons`.
pub fn enable(root: &Path, daemon: &str) -> Result<(), Error> {
    let dir = root.join("etc/frr");
    fs::create_dir_all(&dir)?;
    let mut file = OpenOptions::new().create(true).append(true).open(dir.join("daemons"))?;
    file.write_all(format!("\n{}=yes", daemon).as_bytes())?;
    Ok(())
}
