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

//! Module defining a router and its interfaces.

use super::{LanId, RouterId};
use crate::daemon::DaemonId;

/// # Router
///
/// A router with an ordered list of interfaces. The *identifier* is derived from the interface
/// addresses: it is the **lexicographically** maximal address string among all interfaces,
/// recomputed on every interface addition. Note that string comparison can disagree with numeric
/// IP ordering for mixed-width octets (`"10.0.0.9" > "10.0.0.10"` as strings); this behavior is
/// intentional and kept stable.
#[derive(Debug)]
pub struct Router {
    id: RouterId,
    name: String,
    interfaces: Vec<Interface>,
    identifier: String,
    daemons: Vec<DaemonId>,
    gateway: Option<RouterId>,
}

impl Router {
    pub(super) fn new(id: RouterId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            interfaces: Vec::new(),
            identifier: String::new(),
            daemons: Vec::new(),
            gateway: None,
        }
    }

    /// Add an interface and recompute the identifier. The first interface sets the identifier
    /// unconditionally; every later one only replaces it if its address compares greater as a
    /// string. Returns the index of the new interface.
    pub(super) fn push_interface(&mut self, iface: Interface) -> usize {
        if self.interfaces.is_empty() || iface.address > self.identifier {
            self.identifier = iface.address.clone();
        }
        self.interfaces.push(iface);
        self.interfaces.len() - 1
    }

    pub(super) fn attach_daemon(&mut self, daemon: DaemonId) {
        if !self.daemons.contains(&daemon) {
            self.daemons.push(daemon);
        }
    }

    pub(super) fn set_gateway(&mut self, gateway: RouterId) {
        self.gateway = Some(gateway);
    }

    /// Return the id of the router
    pub fn id(&self) -> RouterId {
        self.id
    }

    /// Return the name of the router
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the derived router identifier (maximal interface address, string comparison)
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Return all interfaces in insertion order
    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    /// Return the interface at the given index. **Panics** if out of range.
    pub fn interface(&self, idx: usize) -> &Interface {
        &self.interfaces[idx]
    }

    /// Return the daemons attached to this router, in attachment order
    pub fn daemons(&self) -> &[DaemonId] {
        &self.daemons
    }

    /// Return the default gateway, if one is configured
    pub fn gateway(&self) -> Option<RouterId> {
        self.gateway
    }
}

/// # Interface
///
/// A router's attachment point to exactly one LAN. The address is derived from the LAN prefix and
/// the host byte at construction time; the struct is immutable afterwards.
#[derive(Debug)]
pub struct Interface {
    name: String,
    number: String,
    address: String,
    full_address: String,
    lan: LanId,
    router: RouterId,
}

impl Interface {
    pub(super) fn new(
        name: &str,
        address: String,
        full_address: String,
        lan: LanId,
        router: RouterId,
    ) -> Self {
        // trailing numeric suffix, used for lab.conf device numbering
        let stem = name.trim_end_matches(|c: char| c.is_ascii_digit());
        let number = name[stem.len()..].to_string();
        Self { name: name.to_string(), number, address, full_address, lan, router }
    }

    /// Return the name of the interface (e.g. `eth0`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the trailing numeric suffix of the interface name
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Return the dotted address without the mask
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Return the address in CIDR form (`address/netmask`)
    pub fn full_address(&self) -> &str {
        &self.full_address
    }

    /// Return the LAN this interface attaches to
    pub fn lan(&self) -> LanId {
        self.lan
    }

    /// Return the router owning this interface
    pub fn router(&self) -> RouterId {
        self.router
    }
}
