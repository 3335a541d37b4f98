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

//! # Orchestrator
//!
//! Drives the whole pipeline: load the topology, merge every protocol description present in the
//! config directory, then iterate routers and their attached daemons and render all artifacts
//! into the target directory. The run is fail-fast: the first error aborts it, leaving files
//! already written for earlier routers in place.

use crate::daemon::bgp::BgpParser;
use crate::daemon::dns::DnsParser;
use crate::daemon::ospf::OspfParser;
use crate::daemon::rip::RipParser;
use crate::daemon::{DaemonParser, DaemonRegistry};
use crate::error::Error;
use crate::topology::{parser::load_topology, RouterId, Topology};
use itertools::Itertools;
use log::*;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Synthesize a complete lab from a config directory into a target directory.
///
/// The config directory must contain `topology.json`; `ospf.json`, `rip.json`, `bgp.json` and
/// `dns.json` are merged when present, in that fixed order. The target directory receives
/// `lab.conf`, one `<router>.startup` script per router, and one `<router>/` subtree per router
/// with the rendered daemon configuration. Existing per-router subtrees are cleared and
/// regenerated, so repeated runs over unchanged input produce byte-identical output.
pub fn synthesize_lab(config: &Path, target: &Path) -> Result<(), Error> {
    let mut net = load_topology(&config.join("topology.json"))?;

    let mut registry = DaemonRegistry::new();
    merge_daemon::<OspfParser>(config, &mut net, &mut registry)?;
    merge_daemon::<RipParser>(config, &mut net, &mut registry)?;
    merge_daemon::<BgpParser>(config, &mut net, &mut registry)?;
    merge_daemon::<DnsParser>(config, &mut net, &mut registry)?;

    fs::create_dir_all(target)?;
    fs::write(target.join("lab.conf"), lab_conf(&net))?;

    for router in net.routers().collect::<Vec<_>>() {
        let name = net.router(router).name().to_string();
        info!("rendering router {}", name);

        let root = target.join(&name);
        if root.exists() {
            fs::remove_dir_all(&root)?;
        }
        fs::create_dir_all(&root)?;

        fs::write(target.join(format!("{}.startup", name)), startup(&net, router, &registry)?)?;

        for &daemon in net.router(router).daemons() {
            registry.get(daemon).configurer().configure(&net, router, &root)?;
        }
    }
    info!("lab synthesized into {}", target.display());
    Ok(())
}

/// Merge one protocol module if its description file exists in the config directory.
fn merge_daemon<P: DaemonParser>(
    config: &Path,
    net: &mut Topology,
    registry: &mut DaemonRegistry,
) -> Result<(), Error> {
    let path = config.join(P::FILE_NAME);
    if !path.exists() {
        debug!("no {} present, skipping", P::FILE_NAME);
        return Ok(());
    }
    info!("merging {}", P::FILE_NAME);
    let parser = P::load(&path)?;
    let id = registry.next_id();
    let daemon = parser.merge(net, id)?;
    registry.register(Box::new(daemon));
    Ok(())
}

/// Render `lab.conf`: one `router[number]=lan` line per interface.
fn lab_conf(net: &Topology) -> String {
    let mut out = String::new();
    for router in net.routers() {
        let router = net.router(router);
        for iface in router.interfaces() {
            let _ = writeln!(
                out,
                "{}[{}]={}",
                router.name(),
                iface.number(),
                net.lan(iface.lan()).name()
            );
        }
    }
    out
}

/// Render one router's startup script: address assignment per interface, the optional default
/// route via the gateway's shared-LAN address, and one `systemctl start` line per distinct boot
/// service requested by the attached daemons.
fn startup(net: &Topology, router: RouterId, registry: &DaemonRegistry) -> Result<String, Error> {
    let r = net.router(router);
    let mut out = String::new();
    for iface in r.interfaces() {
        let _ = writeln!(out, "ip a add {} dev {}", iface.full_address(), iface.name());
    }
    if let Some(gateway) = r.gateway() {
        let _ = writeln!(out, "ip route add default via {}", net.gateway_address(router, gateway)?);
    }
    for service in r
        .daemons()
        .iter()
        .filter_map(|&d| registry.get(d).boot_service(router))
        .unique()
    {
        let _ = writeln!(out, "systemctl start {}", service);
    }
    Ok(out)
}
