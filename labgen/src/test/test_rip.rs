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

use super::two_router_net;
use crate::daemon::rip::RipParser;
use crate::daemon::{DaemonParser, DaemonRegistry};

#[test]
fn fragment_announces_every_owned_lan() {
    let mut net = two_router_net();
    let lan1 = net.add_lan("lan1", "10.0.1.0/24").unwrap();
    let r1 = net.router_by_name("r1").unwrap();
    net.add_interface(r1, "eth1", "1", lan1);

    let parser: RipParser = serde_json::from_str(r#"{ "routers": [ "r1" ] }"#).unwrap();
    let registry = DaemonRegistry::new();
    let rip = parser.merge(&mut net, registry.next_id()).unwrap();

    assert_eq!(
        rip.frr_fragment(&net, r1),
        "router rip\n\
         network 10.0.0.0/24\n\
         network 10.0.1.0/24\n\
         redistribute connected\n\n"
    );
}

#[test]
fn only_listed_routers_participate() {
    let mut net = two_router_net();
    let parser: RipParser = serde_json::from_str(r#"{ "routers": [ "r2" ] }"#).unwrap();
    let registry = DaemonRegistry::new();
    let id = registry.next_id();
    parser.merge(&mut net, id).unwrap();

    let r1 = net.router_by_name("r1").unwrap();
    let r2 = net.router_by_name("r2").unwrap();
    assert!(net.router(r1).daemons().is_empty());
    assert_eq!(net.router(r2).daemons(), &[id]);
}
