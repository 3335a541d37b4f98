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
use crate::error::Error;
use crate::topology::parser::parse_topology;
use crate::topology::Topology;

#[test]
fn lan_prefix_and_interface_address() {
    let mut net = Topology::new();
    let lan = net.add_lan("lan0", "192.168.5.0/24").unwrap();
    let r = net.add_router("r1");
    net.add_interface(r, "eth0", "7", lan);

    let lan = net.lan(lan);
    assert_eq!(lan.prefix(), "192.168.5");
    assert_eq!(lan.netmask(), "24");
    assert_eq!(lan.address(), "192.168.5.0");

    let iface = net.router(r).interface(0);
    assert_eq!(iface.address(), "192.168.5.7");
    assert_eq!(iface.full_address(), "192.168.5.7/24");
    assert_eq!(iface.number(), "0");
}

#[test]
fn malformed_lan_address() {
    let mut net = Topology::new();
    match net.add_lan("lan0", "10.0.0.0") {
        Err(Error::MalformedLanAddress(a)) => assert_eq!(a, "10.0.0.0"),
        r => panic!("expected MalformedLanAddress, got {:?}", r),
    }
}

#[test]
fn identifier_is_maximal_regardless_of_order() {
    for reverse in &[false, true] {
        let mut net = Topology::new();
        let lan_a = net.add_lan("lan_a", "10.0.0.0/24").unwrap();
        let lan_b = net.add_lan("lan_b", "192.168.0.0/24").unwrap();
        let r = net.add_router("r1");
        if *reverse {
            net.add_interface(r, "eth1", "1", lan_b);
            net.add_interface(r, "eth0", "1", lan_a);
        } else {
            net.add_interface(r, "eth0", "1", lan_a);
            net.add_interface(r, "eth1", "1", lan_b);
        }
        assert_eq!(net.router(r).identifier(), "192.168.0.1");
    }
}

#[test]
fn identifier_comparison_is_lexicographic() {
    // "10.0.0.9" > "10.0.0.10" as strings, even though 10 > 9 numerically
    let mut net = Topology::new();
    let lan_a = net.add_lan("lan_a", "10.0.0.0/24").unwrap();
    let lan_b = net.add_lan("lan_b", "10.0.1.0/24").unwrap();
    let r = net.add_router("r1");
    net.add_interface(r, "eth0", "9", lan_a);
    net.add_interface(r, "eth1", "10", lan_a);
    assert_eq!(net.router(r).identifier(), "10.0.0.9");
    // a later, genuinely greater address still wins
    net.add_interface(r, "eth2", "1", lan_b);
    assert_eq!(net.router(r).identifier(), "10.0.1.1");
}

#[test]
fn neighbors_over_shared_lans() {
    let net = two_router_net();
    let r1 = net.router_by_name("r1").unwrap();
    let r2 = net.router_by_name("r2").unwrap();

    let neighbors = net.neighbors(r1);
    assert_eq!(neighbors.len(), 1);
    let (peer, idx) = neighbors[0];
    assert_eq!(peer, r2);
    assert_eq!(net.router(peer).interface(idx).address(), "10.0.0.2");
}

#[test]
fn resolve_or_fail() {
    let net = two_router_net();
    let r1 = net.router_by_name("r1").unwrap();

    match net.router_by_name("r9") {
        Err(Error::UndefinedRouter(name)) => assert_eq!(name, "r9"),
        r => panic!("expected UndefinedRouter, got {:?}", r),
    }
    match net.lan_by_name("lan9") {
        Err(Error::UndefinedLan(name)) => assert_eq!(name, "lan9"),
        r => panic!("expected UndefinedLan, got {:?}", r),
    }
    match net.interface_by_name(r1, "eth9") {
        Err(Error::UndefinedInterface { router, interface }) => {
            assert_eq!(router, "r1");
            assert_eq!(interface, "eth9");
        }
        r => panic!("expected UndefinedInterface, got {:?}", r),
    }
}

#[test]
fn parse_full_topology() {
    let data = serde_json::from_str(
        r#"{
            "lans": { "lan0": "10.0.0.0/24", "lan1": "10.0.1.0/24" },
            "routers": {
                "r1": { "eth0": "1 lan0", "eth1": "1 lan1" },
                "r2": { "eth0": "2 lan0" }
            },
            "gateways": [ "r2 r1" ]
        }"#,
    )
    .unwrap();
    let net = parse_topology(data).unwrap();

    let r1 = net.router_by_name("r1").unwrap();
    let r2 = net.router_by_name("r2").unwrap();
    assert_eq!(net.router(r1).interfaces().len(), 2);
    assert_eq!(net.router(r1).identifier(), "10.0.1.1");
    assert_eq!(net.router(r2).gateway(), Some(r1));
    // the default route points at r1's address on the shared lan0
    assert_eq!(net.gateway_address(r2, r1).unwrap(), "10.0.0.1");
}

#[test]
fn parse_rejects_unknown_lan() {
    let data = serde_json::from_str(
        r#"{
            "lans": { "lan0": "10.0.0.0/24" },
            "routers": { "r1": { "eth0": "1 lan1" } }
        }"#,
    )
    .unwrap();
    match parse_topology(data) {
        Err(Error::UndefinedLan(name)) => assert_eq!(name, "lan1"),
        r => panic!("expected UndefinedLan, got {:?}", r),
    }
}

#[test]
fn parse_rejects_malformed_interface() {
    let data = serde_json::from_str(
        r#"{
            "lans": { "lan0": "10.0.0.0/24" },
            "routers": { "r1": { "eth0": "1" } }
        }"#,
    )
    .unwrap();
    match parse_topology(data) {
        Err(Error::MalformedEntry { kind, .. }) => assert_eq!(kind, "interface"),
        r => panic!("expected MalformedEntry, got {:?}", r),
    }
}

#[test]
fn gateway_without_shared_lan() {
    let mut net = Topology::new();
    let lan0 = net.add_lan("lan0", "10.0.0.0/24").unwrap();
    let lan1 = net.add_lan("lan1", "10.0.1.0/24").unwrap();
    let r1 = net.add_router("r1");
    net.add_interface(r1, "eth0", "1", lan0);
    let r2 = net.add_router("r2");
    net.add_interface(r2, "eth0", "1", lan1);
    net.set_gateway(r1, r2);

    match net.gateway_address(r1, r2) {
        Err(Error::GatewayUnreachable { client, gateway }) => {
            assert_eq!(client, "r1");
            assert_eq!(gateway, "r2");
        }
        r => panic!("expected GatewayUnreachable, got {:?}", r),
    }
}
