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

//! # DNS module
//!
//! Builds a hierarchical [`ZoneTree`] over the topology's routers and classifies every
//! participating router as an authoritative server, a recursive resolver, or a resolver client.
//! Rendering emits BIND configuration: `named.conf` with its options file and one zone file per
//! authoritative zone, plus a root hint file on non-root servers. Resolver clients get nothing
//! but a `resolv.conf` stub pointing at their resolver.

pub mod zone;

pub use zone::{Zone, ZoneId, ZoneTree};

use super::{load_json, Configurer, Daemon, DaemonId, DaemonParser};
use crate::error::Error;
use crate::topology::{RouterId, Topology};
use log::*;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Append one resource record line in columnar form.
fn record(out: &mut String, name: &str, rtype: &str, value: &str) {
    let _ = writeln!(out, "{:<24}IN  {:<6}{}", name, rtype, value);
}

/// # DNS daemon
///
/// Owns the zone tree, the server-to-zones index, and the resolver registrations. Routers appear
/// here in up to three roles: authoritative server (per zone), resolver, and resolver client;
/// a client is configured with nothing but its resolver's address.
#[derive(Debug)]
pub struct Dns {
    id: DaemonId,
    zones: ZoneTree,
    routers_to_zones: HashMap<RouterId, Vec<ZoneId>>,
    root_server: RouterId,
    resolvers: BTreeSet<RouterId>,
    clients: HashMap<RouterId, RouterId>,
}

impl Dns {
    /// Return the id under which this daemon is registered
    pub fn id(&self) -> DaemonId {
        self.id
    }

    /// Return the zone tree
    pub fn zones(&self) -> &ZoneTree {
        &self.zones
    }

    /// Return the authoritative server of the root zone
    pub fn root_server(&self) -> RouterId {
        self.root_server
    }

    /// The zones a router authoritatively serves, in tree-walk order.
    pub fn zones_of(&self, router: RouterId) -> &[ZoneId] {
        self.routers_to_zones.get(&router).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the router is a recursive resolver.
    pub fn is_resolver(&self, router: RouterId) -> bool {
        self.resolvers.contains(&router)
    }

    /// The resolver a client router is bound to, if any.
    pub fn resolver_of(&self, router: RouterId) -> Option<RouterId> {
        self.clients.get(&router).copied()
    }

    /// Fully-qualified zone name with the trailing delimiter stripped, as used for file names
    /// and `named.conf` zone statements.
    fn trimmed_name(&self, zone: ZoneId) -> String {
        let mut name = self.zones.full_name(zone);
        if name.ends_with('.') {
            name.pop();
        }
        name
    }

    /// File name of a zone's database file (`db.root` for the root zone).
    pub(crate) fn zone_file_name(&self, zone: ZoneId) -> String {
        if self.zones.zone(zone).parent().is_none() {
            "db.root".to_string()
        } else {
            format!("db.{}", self.trimmed_name(zone))
        }
    }

    /// Render `named.conf.options`. Resolvers get open recursion and DNSSEC validation turned
    /// off; authoritative-only servers get the bare cache directory.
    pub(crate) fn named_options(&self, router: RouterId) -> String {
        if self.is_resolver(router) {
            "options {\n    directory \"/var/cache/bind\";\n    recursion yes;\n    \
             allow-query { any; };\n    dnssec-validation no;\n};\n"
                .to_string()
        } else {
            "options {\n    directory \"/var/cache/bind\";\n};\n".to_string()
        }
    }

    /// Render `named.conf`: the options include, the root declaration (master on the root
    /// authority, hint everywhere else), and one master declaration per authoritative zone. The
    /// root zone is excluded from the per-zone loop, its declaration is the root line itself.
    pub(crate) fn named_conf(&self, router: RouterId) -> String {
        let mut out = String::from("include \"/etc/bind/named.conf.options\";\n\n");
        let root_type = if router == self.root_server { "master" } else { "hint" };
        let _ = write!(
            out,
            "zone \".\" {{\n    type {};\n    file \"/etc/bind/db.root\";\n}};\n\n",
            root_type
        );
        for &zone in self.zones_of(router) {
            if self.zones.zone(zone).parent().is_none() {
                continue;
            }
            let name = self.trimmed_name(zone);
            let _ = write!(
                out,
                "zone \"{}\" {{\n    type master;\n    file \"/etc/bind/db.{}\";\n}};\n\n",
                name, name
            );
        }
        out
    }

    /// Render one zone's database file: SOA + NS + A naming the zone's own server, one NS + A
    /// pair per child delegation, and one A record per plain name registered in this zone.
    pub(crate) fn zone_file(&self, net: &Topology, zone: ZoneId) -> String {
        let fqn = self.zones.full_name(zone);
        let ns = format!("ns.{}", fqn);
        let server = net.router(self.zones.zone(zone).server());

        let mut out = String::from("$TTL 60\n");
        record(&mut out, "@", "SOA", &format!("{} admin.{} 1 60 60 60 60", ns, fqn));
        record(&mut out, "@", "NS", &ns);
        record(&mut out, &ns, "A", server.identifier());

        for &child in self.zones.zone(zone).children() {
            let child_fqn = self.zones.full_name(child);
            let child_ns = format!("ns.{}", child_fqn);
            let child_server = net.router(self.zones.zone(child).server());
            record(&mut out, &child_fqn, "NS", &child_ns);
            record(&mut out, &child_ns, "A", child_server.identifier());
        }

        for &name in self.zones.zone(zone).names() {
            let host = net.router(name);
            record(&mut out, &format!("{}.{}", host.name(), fqn), "A", host.identifier());
        }
        out
    }

    /// Render the root hint file installed on every non-root server.
    pub(crate) fn root_hint(&self, net: &Topology) -> String {
        let mut out = String::new();
        record(&mut out, ".", "NS", "ROOT-SERVER.");
        record(&mut out, "ROOT-SERVER.", "A", net.router(self.root_server).identifier());
        out
    }

    fn serve_zone(&mut self, zone: ZoneId) {
        let server = self.zones.zone(zone).server();
        self.routers_to_zones.entry(server).or_default().push(zone);
    }
}

impl Daemon for Dns {
    fn name(&self) -> &'static str {
        "dns"
    }

    fn configurer(&self) -> Box<dyn Configurer + '_> {
        Box::new(DnsConfigurer { daemon: self })
    }

    fn boot_service(&self, router: RouterId) -> Option<&'static str> {
        // resolver clients only get a resolv.conf stub, nothing to start
        if self.clients.contains_key(&router) {
            None
        } else {
            Some("named")
        }
    }
}

/// Renderer paired with [`Dns`].
#[derive(Debug)]
pub struct DnsConfigurer<'a> {
    daemon: &'a Dns,
}

impl Configurer for DnsConfigurer<'_> {
    fn configure(&self, net: &Topology, router: RouterId, out: &Path) -> Result<(), Error> {
        let dns = self.daemon;

        // resolver clients short-circuit: only a resolver-address stub
        if let Some(resolver) = dns.resolver_of(router) {
            debug!("writing resolver stub for {}", net.router(router).name());
            let dir = out.join("etc");
            fs::create_dir_all(&dir)?;
            let stub = format!("nameserver {}\n", net.router(resolver).identifier());
            fs::write(dir.join("resolv.conf"), stub)?;
            return Ok(());
        }

        debug!("rendering bind configuration for {}", net.router(router).name());
        let dir = out.join("etc/bind");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("named.conf.options"), dns.named_options(router))?;
        fs::write(dir.join("named.conf"), dns.named_conf(router))?;

        for &zone in dns.zones_of(router) {
            fs::write(dir.join(dns.zone_file_name(zone)), dns.zone_file(net, zone))?;
        }

        if router != dns.root_server {
            fs::write(dir.join("db.root"), dns.root_hint(net))?;
        }
        Ok(())
    }
}

/// Nested zone containment as found in the `root` field: a list entry is a leaf zone, a mapping
/// key with a nested value is an internal zone with children.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZoneData {
    /// Leaf zones
    Leaves(Vec<String>),
    /// Internal zones with their own children
    Children(BTreeMap<String, ZoneData>),
}

/// Parser for `dns.json`:
///
/// ```json
/// {
///     "servers":   [ "root rs", "example ex" ],
///     "root":      { "example": [] },
///     "names":     [ "host1 example" ],
///     "resolvers": [ "res client1 client2" ]
/// }
/// ```
///
/// The `servers` entry named `root` designates the root authority; `names` and `resolvers` are
/// optional.
#[derive(Debug, Deserialize)]
pub struct DnsParser {
    servers: Vec<String>,
    root: ZoneData,
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    resolvers: Vec<String>,
}

impl DnsParser {
    fn build_tree(
        tree: &mut ZoneTree,
        parent: ZoneId,
        data: &ZoneData,
        servers: &BTreeMap<String, RouterId>,
        names: &BTreeMap<String, Vec<RouterId>>,
    ) -> Result<(), Error> {
        let mut add = |tree: &mut ZoneTree, name: &str| -> Result<ZoneId, Error> {
            let server = *servers
                .get(name)
                .ok_or_else(|| Error::UndefinedZoneServer(name.to_string()))?;
            let plain = names.get(name).cloned().unwrap_or_default();
            Ok(tree.add_zone(name, parent, server, plain))
        };
        match data {
            ZoneData::Leaves(leaves) => {
                for name in leaves {
                    add(tree, name)?;
                }
            }
            ZoneData::Children(children) => {
                for (name, sub) in children {
                    let zone = add(tree, name)?;
                    Self::build_tree(tree, zone, sub, servers, names)?;
                }
            }
        }
        Ok(())
    }
}

impl DaemonParser for DnsParser {
    type Daemon = Dns;

    const FILE_NAME: &'static str = "dns.json";

    fn load(path: &Path) -> Result<Self, Error> {
        load_json(path)
    }

    fn merge(self, net: &mut Topology, id: DaemonId) -> Result<Dns, Error> {
        // zone name -> authoritative server
        let mut servers: BTreeMap<String, RouterId> = BTreeMap::new();
        for line in &self.servers {
            let mut fields = line.split_whitespace();
            let (zone, server) = match (fields.next(), fields.next()) {
                (Some(zone), Some(server)) => (zone, server),
                _ => return Err(Error::MalformedEntry { kind: "server", line: line.clone() }),
            };
            servers.insert(zone.to_string(), net.router_by_name(server)?);
        }
        let root_server = *servers.get("root").ok_or(Error::MissingRootZone)?;

        // zone name -> plain names registered directly under it
        let mut names: BTreeMap<String, Vec<RouterId>> = BTreeMap::new();
        for line in &self.names {
            let mut fields = line.split_whitespace();
            let (router, zone) = match (fields.next(), fields.next()) {
                (Some(router), Some(zone)) => (router, zone),
                _ => return Err(Error::MalformedEntry { kind: "name", line: line.clone() }),
            };
            names.entry(zone.to_string()).or_default().push(net.router_by_name(router)?);
        }

        let mut tree =
            ZoneTree::new(root_server, names.get("root").cloned().unwrap_or_default());
        let root = tree.root();
        Self::build_tree(&mut tree, root, &self.root, &servers, &names)?;

        let mut dns = Dns {
            id,
            zones: tree,
            routers_to_zones: HashMap::new(),
            root_server,
            resolvers: BTreeSet::new(),
            clients: HashMap::new(),
        };

        let zone_count = dns.zones.zones().count();
        for zone in 0..zone_count {
            dns.serve_zone(zone);
            net.attach_daemon(dns.zones.zone(zone).server(), id);
        }

        for line in &self.resolvers {
            let mut fields = line.split_whitespace();
            let resolver = fields
                .next()
                .ok_or_else(|| Error::MalformedEntry { kind: "resolver", line: line.clone() })?;
            let resolver = net.router_by_name(resolver)?;
            dns.resolvers.insert(resolver);
            net.attach_daemon(resolver, id);
            for client in fields {
                let client = net.router_by_name(client)?;
                dns.clients.insert(client, resolver);
                net.attach_daemon(client, id);
            }
        }

        info!(
            "dns merged: {} zones, {} resolvers, {} clients",
            zone_count,
            dns.resolvers.len(),
            dns.clients.len()
        );
        Ok(dns)
    }
}
