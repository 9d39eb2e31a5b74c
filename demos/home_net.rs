//! Mirrors the way a signature author would define `HOME_NET`/`EXTERNAL_NET`
//! style variables and reference them from a rule's address expression.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use sigaddr::parse;

fn main() {
    let mut vars = HashMap::new();
    vars.insert("HOME_NET".to_string(), "[10.0.0.0/8, 192.168.0.0/16]".to_string());
    vars.insert("DMZ".to_string(), "172.16.0.0/24".to_string());

    let home = parse("$HOME_NET", &vars).unwrap();
    assert!(home.lookup_v4("10.1.1.1".parse::<Ipv4Addr>().unwrap().into()).is_some());
    assert!(home.lookup_v4("192.168.5.5".parse::<Ipv4Addr>().unwrap().into()).is_some());
    assert!(home.lookup_v4("172.16.0.5".parse::<Ipv4Addr>().unwrap().into()).is_none());

    // "everything but the DMZ" — a bare negation seeds the full address
    // space for the family and carves the named range out of it.
    let external = parse("[!$DMZ]", &vars).unwrap();
    assert!(external.lookup_v4("172.16.0.5".parse::<Ipv4Addr>().unwrap().into()).is_none());
    assert!(external.lookup_v4("8.8.8.8".parse::<Ipv4Addr>().unwrap().into()).is_some());

    println!("HOME_NET ranges: {}", home.to_expr());
    println!("everything but DMZ: {}", external.to_expr());
}
