use std::net::Ipv4Addr;

use sigaddr::{parse, NoVars};

fn main() {
    let set = parse("[10.0.0.0/8, !10.1.2.3, 192.168.0.0/16]", &NoVars).unwrap();

    assert!(set.lookup_v4("10.5.5.5".parse::<Ipv4Addr>().unwrap().into()).is_some());
    assert!(set.lookup_v4("10.1.2.3".parse::<Ipv4Addr>().unwrap().into()).is_none());
    assert!(set.lookup_v4("192.168.1.1".parse::<Ipv4Addr>().unwrap().into()).is_some());
    assert!(set.lookup_v4("8.8.8.8".parse::<Ipv4Addr>().unwrap().into()).is_none());

    println!("compiled ranges: {:?}", set.v4_ranges().iter().map(|i| (i.lo(), i.hi())).collect::<Vec<_>>());
}
