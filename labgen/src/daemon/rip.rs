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

//! # RIP module
//!
//! The simplest protocol module: it carries no state beyond router participation. Every attached
//! router announces all LANs it owns.

use super::{frr, load_json, Configurer, Daemon, DaemonId, DaemonParser};
use crate::error::Error;
use crate::topology::{RouterId, Topology};
use log::*;
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::Path;

/// # RIP daemon
#[derive(Debug)]
pub struct Rip {
    id: DaemonId,
}

impl Rip {
    /// Return the id under which this daemon is registered
    pub fn id(&self) -> DaemonId {
        self.id
    }

    /// Render the `frr.conf` fragment for one router.
    pub(crate) fn frr_fragment(&self, net: &Topology, router: RouterId) -> String {
        let mut out = String::from("router rip\n");
        for lan in net.router_lans(router) {
            let _ = writeln!(out, "network {}", net.lan(lan).full_address());
        }
        out.push_str("redistribute connected\n\n");
        out
    }
}

impl Daemon for Rip {
    fn name(&self) -> &'static str {
        "rip"
    }

    fn configurer(&self) -> Box<dyn Configurer + '_> {
        Box::new(RipConfigurer { daemon: self })
    }

    fn boot_service(&self, _router: RouterId) -> Option<&'static str> {
        Some("frr")
    }
}

/// Renderer paired with [`Rip`].
#[derive(Debug)]
pub struct RipConfigurer<'a> {
    daemon: &'a Rip,
}

impl Configurer for RipConfigurer<'_> {
    fn configure(&self, net: &Topology, router: RouterId, out: &Path) -> Result<(), Error> {
        debug!("rendering rip fragment for {}", net.router(router).name());
        frr::append_conf(out, &self.daemon.frr_fragment(net, router))?;
        frr::enable(out, "ripd")
    }
}

/// Parser for `rip.json`: `{ "routers": [ "r1", "r2" ] }`.
#[derive(Debug, Deserialize)]
pub struct RipParser {
    routers: Vec<String>,
}

impl DaemonParser for RipParser {
    type Daemon = Rip;

    const FILE_NAME: &'static str = "rip.json";

    fn load(path: &Path) -> Result<Self, Error> {
        load_json(path)
    }

    fn merge(self, net: &mut Topology, id: DaemonId) -> Result<Rip, Error> {
        for name in &self.routers {
            let router = net.router_by_name(name)?;
            net.attach_daemon(router, id);
        }
        info!("rip merged: {} routers", self.routers.len());
        Ok(Rip { id })
    }
}
