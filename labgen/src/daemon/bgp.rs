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

//! # BGP module
//!
//! Tracks the Autonomous System membership of every participating router (both directions:
//! router to AS and AS to ordered router list, kept consistent by construction) and classifies
//! each router's link-layer neighbors into internal and external peers when rendering.
//!
//! AS names are compared as exact strings; there are no numeric or hierarchical AS semantics.

use super::{frr, load_json, Configurer, Daemon, DaemonId, DaemonParser};
use crate::error::Error;
use crate::topology::{RouterId, Topology};
use itertools::{Either, Itertools};
use log::*;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;
use std::path::Path;

/// Debug preamble written at the top of every BGP fragment.
const LOG_PREAMBLE: &str = "log file /var/log/frr/frr.log

debug bgp
debug bgp events
debug bgp filters
debug bgp fsm
debug bgp keepalives
debug bgp updates

";

/// # BGP daemon
///
/// Owns the AS membership maps. Every registration updates the forward map (router to AS) and
/// the reverse map (AS to routers, in registration order) together.
#[derive(Debug)]
pub struct Bgp {
    id: DaemonId,
    router_as: HashMap<RouterId, String>,
    as_routers: BTreeMap<String, Vec<RouterId>>,
}

impl Bgp {
    fn new(id: DaemonId) -> Self {
        Self { id, router_as: HashMap::new(), as_routers: BTreeMap::new() }
    }

    /// Return the id under which this daemon is registered
    pub fn id(&self) -> DaemonId {
        self.id
    }

    fn add_member(&mut self, as_name: &str, router: RouterId) {
        self.router_as.insert(router, as_name.to_string());
        self.as_routers.entry(as_name.to_string()).or_default().push(router);
    }

    /// The AS a router belongs to, if it participates in BGP.
    pub fn as_of(&self, router: RouterId) -> Option<&str> {
        self.router_as.get(&router).map(String::as_str)
    }

    /// The routers of an AS, in registration order.
    pub fn members(&self, as_name: &str) -> &[RouterId] {
        self.as_routers.get(as_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Render the `frr.conf` fragment for one router.
    ///
    /// The neighbor statements follow a fixed order: unconnected internal peers first (addressed
    /// by router identifier, since no shared LAN supplies a next-hop address), then directly
    /// connected internal peers and external peers (both addressed by the peer's interface
    /// address on the shared LAN), and finally one network line per owned LAN.
    pub(crate) fn frr_fragment(&self, net: &Topology, router: RouterId) -> String {
        let as_name = match self.as_of(router) {
            Some(a) => a,
            // attached without membership cannot happen through merge
            None => return String::new(),
        };

        let mut out = String::from(LOG_PREAMBLE);
        let _ = writeln!(out, "router bgp {}\n", as_name);

        // candidate peers: link-neighbors with known AS membership
        let (external, internal): (Vec<_>, Vec<_>) = net
            .neighbors(router)
            .into_iter()
            .filter(|(peer, _)| self.router_as.contains_key(peer))
            .partition_map(|(peer, idx)| {
                if self.as_of(peer) != Some(as_name) {
                    Either::Left((peer, idx))
                } else {
                    Either::Right((peer, idx))
                }
            });

        let connected: HashSet<RouterId> = internal.iter().map(|(peer, _)| *peer).collect();
        for &peer in self
            .members(as_name)
            .iter()
            .filter(|peer| **peer != router && !connected.contains(peer))
        {
            let peer = net.router(peer);
            let _ = writeln!(out, "neighbor {} remote-as {}", peer.identifier(), as_name);
            let _ = writeln!(out, "neighbor {} description {}\n", peer.identifier(), peer.name());
        }

        for (peer, idx) in internal {
            let addr = net.router(peer).interface(idx).address();
            let _ = writeln!(out, "neighbor {} remote-as {}", addr, as_name);
            let _ = writeln!(out, "neighbor {} description {}\n", addr, net.router(peer).name());
        }

        for (peer, idx) in external {
            let addr = net.router(peer).interface(idx).address();
            // peers in this partition always carry a membership
            if let Some(peer_as) = self.as_of(peer) {
                let _ = writeln!(out, "neighbor {} remote-as {}", addr, peer_as);
                let _ =
                    writeln!(out, "neighbor {} description {}\n", addr, net.router(peer).name());
            }
        }

        for lan in net.router_lans(router) {
            let _ = writeln!(out, "network {}", net.lan(lan).full_address());
        }
        out.push('\n');
        out
    }
}

impl Daemon for Bgp {
    fn name(&self) -> &'static str {
        "bgp"
    }

    fn configurer(&self) -> Box<dyn Configurer + '_> {
        Box::new(BgpConfigurer { daemon: self })
    }

    fn boot_service(&self, _router: RouterId) -> Option<&'static str> {
        Some("frr")
    }
}

/// Renderer paired with [`Bgp`].
#[derive(Debug)]
pub struct BgpConfigurer<'a> {
    daemon: &'a Bgp,
}

impl Configurer for BgpConfigurer<'_> {
    fn configure(&self, net: &Topology, router: RouterId, out: &Path) -> Result<(), Error> {
        debug!("rendering bgp fragment for {}", net.router(router).name());
        frr::append_conf(out, &self.daemon.frr_fragment(net, router))?;
        frr::enable(out, "bgpd")
    }
}

/// Parser for `bgp.json`: `{ "AS": [ "AS1 r1 r2", "AS2 r3" ] }`.
#[derive(Debug, Deserialize)]
pub struct BgpParser {
    #[serde(rename = "AS")]
    as_lines: Vec<String>,
}

impl DaemonParser for BgpParser {
    type Daemon = Bgp;

    const FILE_NAME: &'static str = "bgp.json";

    fn load(path: &Path) -> Result<Self, Error> {
        load_json(path)
    }

    fn merge(self, net: &mut Topology, id: DaemonId) -> Result<Bgp, Error> {
        let mut bgp = Bgp::new(id);
        for line in &self.as_lines {
            let mut fields = line.split_whitespace();
            let as_name = fields
                .next()
                .ok_or_else(|| Error::MalformedEntry { kind: "AS", line: line.clone() })?;
            for name in fields {
                let router = net.router_by_name(name)?;
                bgp.add_member(as_name, router);
                net.attach_daemon(router, id);
            }
        }
        info!("bgp merged: {} autonomous systems", bgp.as_routers.len());
        Ok(bgp)
    }
}
