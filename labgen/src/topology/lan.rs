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

//! Module defining a LAN (one broadcast domain with one base network address).

use super::{LanId, RouterId};
use crate::error::Error;

/// # LAN
///
/// A broadcast domain with a base network address in CIDR form. The prefix (base address minus
/// its final octet) plus a per-interface host byte yields the address of every interface attached
/// to this LAN. Immutable after topology construction, apart from interface registration.
#[derive(Debug)]
pub struct Lan {
    id: LanId,
    name: String,
    full_address: String,
    address: String,
    netmask: String,
    prefix: String,
    /// Interfaces attached to this LAN, as (router, interface index) back-references in
    /// registration order.
    interfaces: Vec<(RouterId, usize)>,
}

impl Lan {
    pub(super) fn new(id: LanId, name: &str, cidr: &str) -> Result<Self, Error> {
        let (address, netmask) = match cidr.find('/') {
            Some(pos) => (&cidr[..pos], &cidr[pos + 1..]),
            None => return Err(Error::MalformedLanAddress(cidr.to_string())),
        };
        // the base address is assumed to end in `.0`; strip that host octet
        let prefix = match address.rfind('.') {
            Some(pos) => &address[..pos],
            None => return Err(Error::MalformedLanAddress(cidr.to_string())),
        };
        Ok(Self {
            id,
            name: name.to_string(),
            full_address: cidr.to_string(),
            address: address.to_string(),
            netmask: netmask.to_string(),
            prefix: prefix.to_string(),
            interfaces: Vec::new(),
        })
    }

    pub(super) fn register_interface(&mut self, router: RouterId, idx: usize) {
        self.interfaces.push((router, idx));
    }

    /// Return the id of the LAN
    pub fn id(&self) -> LanId {
        self.id
    }

    /// Return the name of the LAN
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the base network address in CIDR form (e.g. `10.0.0.0/24`)
    pub fn full_address(&self) -> &str {
        &self.full_address
    }

    /// Return the base network address without the mask
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Return the network mask (the part after the slash)
    pub fn netmask(&self) -> &str {
        &self.netmask
    }

    /// Return the network prefix: the base address with its final octet stripped
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Return all interfaces attached to this LAN as (router, interface index) pairs
    pub fn interfaces(&self) -> &[(RouterId, usize)] {
        &self.interfaces
    }
}
