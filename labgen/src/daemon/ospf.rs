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

//! # OSPF module
//!
//! Groups LANs into stub and backbone [`Area`]s, attaches the daemon to the declared routers and
//! records per-interface link [`Cost`]s. The rendered fragment writes all cost blocks *before*
//! the `router ospf` block, as required by the FRR config grammar.

use super::{frr, load_json, Configurer, Daemon, DaemonId, DaemonParser};
use crate::error::Error;
use crate::topology::{LanId, RouterId, Topology};
use log::*;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::path::Path;

/// A named group of LANs, tagged stub or backbone. A stub area only originates internal routes.
#[derive(Debug, Clone)]
pub struct Area {
    name: String,
    stub: bool,
}

impl Area {
    /// Return the name of the area
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is a stub area
    pub fn is_stub(&self) -> bool {
        self.stub
    }
}

/// A link cost bound to one (router, interface) pair. The value is kept verbatim as a string.
#[derive(Debug, Clone)]
pub struct Cost {
    interface: usize,
    value: String,
}

/// # OSPF daemon
///
/// Owns the LAN-to-area binding and the per-router cost lists. A LAN declared in two areas keeps
/// the last declaration (last-write-wins, no conflict diagnostic).
#[derive(Debug)]
pub struct Ospf {
    id: DaemonId,
    areas: Vec<Area>,
    lan_areas: HashMap<LanId, usize>,
    costs: HashMap<RouterId, Vec<Cost>>,
}

impl Ospf {
    fn new(id: DaemonId) -> Self {
        Self { id, areas: Vec::new(), lan_areas: HashMap::new(), costs: HashMap::new() }
    }

    /// Return the id under which this daemon is registered
    pub fn id(&self) -> DaemonId {
        self.id
    }

    fn add_area(&mut self, area: Area, lans: Vec<LanId>) {
        let idx = self.areas.len();
        self.areas.push(area);
        for lan in lans {
            self.lan_areas.insert(lan, idx);
        }
    }

    /// The area a LAN is bound to, if any.
    pub fn area_of(&self, lan: LanId) -> Option<&Area> {
        self.lan_areas.get(&lan).map(|idx| &self.areas[*idx])
    }

    /// The cost records of a router, in declaration order.
    pub fn costs(&self, router: RouterId) -> &[Cost] {
        self.costs.get(&router).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Render the `frr.conf` fragment for one router: cost blocks first, then the `router ospf`
    /// block with one network line per area-bound LAN.
    pub(crate) fn frr_fragment(&self, net: &Topology, router: RouterId) -> String {
        let mut out = String::new();
        for cost in self.costs(router) {
            let iface = net.router(router).interface(cost.interface);
            let _ = writeln!(out, "interface {}", iface.name());
            let _ = writeln!(out, "ospf cost {}", cost.value);
            out.push('\n');
        }
        out.push_str("router ospf\n");
        for lan in net.router_lans(router) {
            if let Some(area) = self.area_of(lan) {
                let _ = writeln!(out, "network {} area {}", net.lan(lan).full_address(), area.name);
                if area.stub {
                    let _ = writeln!(out, "area {} stub", area.name);
                }
            }
        }
        out.push_str("redistribute connected\n\n");
        out
    }
}

impl Daemon for Ospf {
    fn name(&self) -> &'static str {
        "ospf"
    }

    fn configurer(&self) -> Box<dyn Configurer + '_> {
        Box::new(OspfConfigurer { daemon: self })
    }

    fn boot_service(&self, _router: RouterId) -> Option<&'static str> {
        Some("frr")
    }
}

/// Renderer paired with [`Ospf`].
#[derive(Debug)]
pub struct OspfConfigurer<'a> {
    daemon: &'a Ospf,
}

impl Configurer for OspfConfigurer<'_> {
    fn configure(&self, net: &Topology, router: RouterId, out: &Path) -> Result<(), Error> {
        debug!("rendering ospf fragment for {}", net.router(router).name());
        frr::append_conf(out, &self.daemon.frr_fragment(net, router))?;
        frr::enable(out, "ospfd")
    }
}

#[derive(Debug, Default, Deserialize)]
struct AreaData {
    #[serde(default)]
    stubs: BTreeMap<String, String>,
    #[serde(default)]
    backbones: BTreeMap<String, String>,
}

/// Parser for `ospf.json`:
///
/// ```json
/// {
///     "areas":   { "stubs":     { "area1": "lan1 lan2" },
///                  "backbones": { "area0": "lan0" } },
///     "routers": [ "r1", "r2" ],
///     "costs":   [ "r1 eth0 10" ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct OspfParser {
    #[serde(default)]
    areas: AreaData,
    routers: Vec<String>,
    #[serde(default)]
    costs: Vec<String>,
}

impl DaemonParser for OspfParser {
    type Daemon = Ospf;

    const FILE_NAME: &'static str = "ospf.json";

    fn load(path: &Path) -> Result<Self, Error> {
        load_json(path)
    }

    fn merge(self, net: &mut Topology, id: DaemonId) -> Result<Ospf, Error> {
        let mut ospf = Ospf::new(id);

        for (stub, areas) in
            [(true, &self.areas.stubs), (false, &self.areas.backbones)].iter().copied()
        {
            for (name, lan_names) in areas {
                let mut lans = Vec::new();
                for lan in lan_names.split_whitespace() {
                    lans.push(net.lan_by_name(lan)?);
                }
                ospf.add_area(Area { name: name.clone(), stub }, lans);
            }
        }

        for name in &self.routers {
            let router = net.router_by_name(name)?;
            net.attach_daemon(router, id);
            ospf.costs.entry(router).or_default();
        }

        for line in &self.costs {
            let mut fields = line.split_whitespace();
            let (router, iface, value) = match (fields.next(), fields.next(), fields.next()) {
                (Some(r), Some(i), Some(v)) => (r, i, v),
                _ => return Err(Error::MalformedEntry { kind: "cost", line: line.clone() }),
            };
            let router = net.router_by_name(router)?;
            let interface = net.interface_by_name(router, iface)?;
            ospf.costs
                .entry(router)
                .or_default()
                .push(Cost { interface, value: value.to_string() });
        }

        info!("ospf merged: {} areas, {} routers", ospf.areas.len(), self.routers.len());
        Ok(ospf)
    }
}
