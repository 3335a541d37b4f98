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

mod test_rip;
mod test_synthesize;
mod test_topology;

use crate::topology::Topology;
use std::fs;
use std::path::PathBuf;

/// Two routers joined by `lan0 = 10.0.0.0/24`, with host bytes 1 and 2.
pub fn two_router_net() -> Topology {
    let mut net = Topology::new();
    let lan0 = net.add_lan("lan0", "10.0.0.0/24").unwrap();
    let r1 = net.add_router("r1");
    net.add_interface(r1, "eth0", "1", lan0);
    let r2 = net.add_router("r2");
    net.add_interface(r2, "eth0", "2", lan0);
    net
}

/// Fresh, empty scratch directory under the system temp dir.
pub fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("labgen-{}-{}", std::process::id(), name));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}
