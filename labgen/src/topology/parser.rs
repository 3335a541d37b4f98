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

//! Parses the topology description into a [`Topology`].
//!
//! The input is a JSON document of the following shape:
//!
//! ```json
//! {
//!     "lans":     { "lan0": "10.0.0.0/24" },
//!     "routers":  { "r1": { "eth0": "1 lan0" } },
//!     "gateways": [ "client r1" ]
//! }
//! ```
//!
//! Maps are deserialized into `BTreeMap`, so routers, LANs and interfaces are processed in
//! sorted-name order and the synthesized output is byte-stable across runs.

use super::Topology;
use crate::error::Error;
use log::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Raw topology description as found in `topology.json`.
#[derive(Debug, Deserialize)]
pub struct TopologyData {
    /// LAN name to base network address in CIDR form
    lans: BTreeMap<String, String>,
    /// Router name to interface map; each interface entry reads `"<hostByte> <lanName>"`
    routers: BTreeMap<String, BTreeMap<String, String>>,
    /// Optional default-gateway lines `"<client> <gateway>"`
    #[serde(default)]
    gateways: Vec<String>,
}

/// Read and parse `topology.json` from the given path.
pub fn load_topology(path: &Path) -> Result<Topology, Error> {
    let data: TopologyData = serde_json::from_reader(File::open(path)?)?;
    parse_topology(data)
}

/// Build a [`Topology`] from raw data, resolving all addressing. Unknown LAN or router names
/// abort with a reference error, malformed entries with a structural error.
pub fn parse_topology(data: TopologyData) -> Result<Topology, Error> {
    let mut net = Topology::new();

    for (name, cidr) in &data.lans {
        net.add_lan(name, cidr)?;
    }

    for (name, interfaces) in &data.routers {
        let router = net.add_router(name);
        for (iface_name, entry) in interfaces {
            let mut fields = entry.split_whitespace();
            let (byte, lan_name) = match (fields.next(), fields.next()) {
                (Some(byte), Some(lan)) => (byte, lan),
                _ => {
                    return Err(Error::MalformedEntry { kind: "interface", line: entry.clone() })
                }
            };
            let lan = net.lan_by_name(lan_name)?;
            net.add_interface(router, iface_name, byte, lan);
        }
    }

    for line in &data.gateways {
        let mut fields = line.split_whitespace();
        let (client, gateway) = match (fields.next(), fields.next()) {
            (Some(client), Some(gateway)) => (client, gateway),
            _ => return Err(Error::MalformedEntry { kind: "gateway", line: line.clone() }),
        };
        let client = net.router_by_name(client)?;
        let gateway = net.router_by_name(gateway)?;
        net.set_gateway(client, gateway);
    }

    info!(
        "topology loaded: {} routers, {} LANs",
        net.routers().count(),
        net.lans().count()
    );
    Ok(net)
}
