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

//! # Topology module
//!
//! This module contains the addressing model: [`Router`]s with their [`Interface`]s, the [`Lan`]s
//! they attach to, and the [`Topology`] owning all of them. Routers and LANs are nodes of a
//! single stable graph; every cross-reference in the model is a [`RouterId`] or [`LanId`] handle
//! into that arena, keeping ownership acyclic.

mod lan;
pub mod parser;
mod router;

pub use lan::Lan;
pub use router::{Interface, Router};

use crate::daemon::DaemonId;
use crate::error::Error;
use log::*;
use petgraph::stable_graph::StableGraph;
use petgraph::Undirected;
use std::collections::HashMap;

type IndexType = u32;
/// Router identification (index into the topology graph)
pub type RouterId = petgraph::stable_graph::NodeIndex<IndexType>;
/// LAN identification (index into the topology graph)
pub type LanId = petgraph::stable_graph::NodeIndex<IndexType>;
/// Topology graph: routers and LANs are the nodes, every interface adds a router-LAN edge.
pub type TopoGraph = StableGraph<(), (), Undirected, IndexType>;

/// # Topology
///
/// Owns every [`Router`] and [`Lan`] of one lab. The graph acts as the arena handing out
/// [`RouterId`] and [`LanId`] handles; the structs themselves are stored in maps keyed by those
/// handles. Router and LAN names are expected to be unique: inserting a second entity with the
/// same name shadows the first one in the name indexes.
#[derive(Debug, Default)]
pub struct Topology {
    graph: TopoGraph,
    routers: HashMap<RouterId, Router>,
    lans: HashMap<LanId, Lan>,
    router_names: HashMap<String, RouterId>,
    lan_names: HashMap<String, LanId>,
    router_order: Vec<RouterId>,
    lan_order: Vec<LanId>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new LAN from its name and base network address in CIDR form (e.g.
    /// `10.0.0.0/24`). The base address is expected to end in `.0`; its final octet is stripped
    /// to obtain the prefix shared by all interfaces on this LAN.
    pub fn add_lan(&mut self, name: &str, cidr: &str) -> Result<LanId, Error> {
        let id = self.graph.add_node(());
        let lan = Lan::new(id, name, cidr)?;
        debug!("new LAN {}: {}", name, cidr);
        self.lan_names.insert(name.to_string(), id);
        self.lan_order.push(id);
        self.lans.insert(id, lan);
        Ok(id)
    }

    /// Create a new router with no interfaces.
    pub fn add_router(&mut self, name: &str) -> RouterId {
        let id = self.graph.add_node(());
        debug!("new router {}", name);
        self.router_names.insert(name.to_string(), id);
        self.router_order.push(id);
        self.routers.insert(id, Router::new(id, name));
        id
    }

    /// Create a new interface attaching `router` to `lan`. The interface address is the LAN
    /// prefix extended by `host_byte`; no collision check is performed, duplicate host bytes on
    /// one LAN are a caller error. Registers the interface on both sides and recomputes the
    /// router identifier (lexicographic maximum over all interface addresses).
    ///
    /// **Panics** if one of the handles does not belong to this topology.
    pub fn add_interface(&mut self, router: RouterId, name: &str, host_byte: &str, lan: LanId) {
        let (address, full_address) = {
            let l = &self.lans[&lan];
            let address = format!("{}.{}", l.prefix(), host_byte);
            let full_address = format!("{}/{}", address, l.netmask());
            (address, full_address)
        };
        let iface = Interface::new(name, address, full_address, lan, router);
        let r = self.routers.get_mut(&router).expect("router handle not in topology");
        let idx = r.push_interface(iface);
        let l = self.lans.get_mut(&lan).expect("lan handle not in topology");
        l.register_interface(router, idx);
        self.graph.add_edge(router, lan, ());
    }

    /// Get a reference to a router. **Panics** if the handle does not belong to this topology.
    pub fn router(&self, id: RouterId) -> &Router {
        &self.routers[&id]
    }

    /// Get a reference to a LAN. **Panics** if the handle does not belong to this topology.
    pub fn lan(&self, id: LanId) -> &Lan {
        &self.lans[&id]
    }

    /// Iterate over all routers in insertion order.
    pub fn routers(&self) -> impl Iterator<Item = RouterId> + '_ {
        self.router_order.iter().copied()
    }

    /// Iterate over all LANs in insertion order.
    pub fn lans(&self) -> impl Iterator<Item = LanId> + '_ {
        self.lan_order.iter().copied()
    }

    /// Resolve a router name, or fail with a reference error.
    pub fn router_by_name(&self, name: &str) -> Result<RouterId, Error> {
        self.router_names.get(name).copied().ok_or_else(|| Error::UndefinedRouter(name.to_string()))
    }

    /// Resolve a LAN name, or fail with a reference error.
    pub fn lan_by_name(&self, name: &str) -> Result<LanId, Error> {
        self.lan_names.get(name).copied().ok_or_else(|| Error::UndefinedLan(name.to_string()))
    }

    /// Resolve an interface name on the given router to its index, or fail with a reference
    /// error.
    pub fn interface_by_name(&self, router: RouterId, name: &str) -> Result<usize, Error> {
        let r = self.router(router);
        r.interfaces().iter().position(|i| i.name() == name).ok_or_else(|| {
            Error::UndefinedInterface {
                router: r.name().to_string(),
                interface: name.to_string(),
            }
        })
    }

    /// All LANs the given router owns an interface on, in interface order. A LAN appears once
    /// per interface attached to it.
    pub fn router_lans(&self, router: RouterId) -> Vec<LanId> {
        self.router(router).interfaces().iter().map(|i| i.lan()).collect()
    }

    /// All link-layer neighbors of the given router: every interface of *another* router that
    /// sits on a LAN shared with this one, as `(neighbor, interface index)` pairs. The order is
    /// deterministic: own interfaces in insertion order, and per LAN the registration order of
    /// the peers.
    pub fn neighbors(&self, router: RouterId) -> Vec<(RouterId, usize)> {
        let mut res = Vec::new();
        for iface in self.router(router).interfaces() {
            for &(peer, idx) in self.lan(iface.lan()).interfaces() {
                if peer != router {
                    res.push((peer, idx));
                }
            }
        }
        res
    }

    /// Attach a daemon to a router. Idempotent: attaching the same daemon twice keeps a single
    /// registration.
    pub fn attach_daemon(&mut self, router: RouterId, daemon: DaemonId) {
        let r = self.routers.get_mut(&router).expect("router handle not in topology");
        r.attach_daemon(daemon);
    }

    /// Set the default gateway of a router to a same-topology peer.
    pub fn set_gateway(&mut self, router: RouterId, gateway: RouterId) {
        let r = self.routers.get_mut(&router).expect("router handle not in topology");
        r.set_gateway(gateway);
    }

    /// The address the given router must use as default next-hop to reach its gateway: the
    /// gateway's interface address on the first LAN both routers share. Fails with
    /// [`Error::GatewayUnreachable`] if no such LAN exists.
    pub fn gateway_address(&self, client: RouterId, gateway: RouterId) -> Result<&str, Error> {
        for iface in self.router(client).interfaces() {
            for &(peer, idx) in self.lan(iface.lan()).interfaces() {
                if peer == gateway {
                    return Ok(self.router(gateway).interface(idx).address());
                }
            }
        }
        Err(Error::GatewayUnreachable {
            client: self.router(client).name().to_string(),
            gateway: self.router(gateway).name().to_string(),
        })
    }

    /// Access the underlying graph (routers and LANs as nodes, interfaces as edges), e.g. for
    /// connectivity analysis or visualization.
    pub fn graph(&self) -> &TopoGraph {
        &self.graph
    }
}
