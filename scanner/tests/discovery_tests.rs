use common::{DeviceType, NetworkDevice};
use scanner_service::discovery::DEFAULT_GATEWAY;
use scanner_service::Platform;
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};
use test_utils::{discovery_with, ScriptedProbe};


fn ids(devices: &[NetworkDevice]) -> Vec<&str> {
    devices.iter().map(|d| d.id.as_str()).collect()
}

#[test]
fn test_linux_discovery_pass() {
    let discovery = discovery_with(Platform::Linux, ScriptedProbe::linux_host());

    let devices = discovery.list_devices();

    assert_eq!(ids(&devices), vec!["local", "router", "dev-1", "dev-2", "dev-5", "dev-6"]);

    let local = &devices[0];
    assert_eq!(local.ip, Ipv4Addr::new(192, 168, 1, 100));
    assert_eq!(local.mac, "aa:bb:cc:00:11:22");
    assert_eq!(local.name, "This Computer");
    assert_eq!(local.device_type, DeviceType::Computer);

    let router = &devices[1];
    assert_eq!(router.ip, Ipv4Addr::new(192, 168, 1, 1));
    assert_eq!(router.mac, "00:11:22:33:44:55");
    assert_eq!(router.device_type, DeviceType::Router);

    let pi = &devices[2];
    assert_eq!(pi.name, "Device 2");
    assert_eq!(pi.device_type, DeviceType::Vendor("Raspberry Pi".to_string()));

    let incomplete = &devices[3];
    assert_eq!(incomplete.mac, "unknown");
    assert_eq!(incomplete.device_type, DeviceType::NetworkDevice);

    let gateway_like = &devices[4];
    assert_eq!(gateway_like.mac, "3c:e0:72:00:00:01");
    assert_eq!(gateway_like.device_type, DeviceType::Router);

    assert_eq!(devices[5].device_type, DeviceType::MobileDevice);
}

#[test]
fn test_ips_are_unique() {
    let discovery = discovery_with(Platform::Linux, ScriptedProbe::linux_host());

    let devices = discovery.list_devices();
    let unique: HashSet<Ipv4Addr> = devices.iter().map(|d| d.ip).collect();

    assert_eq!(unique.len(), devices.len());
}

#[test]
fn test_empty_arp_table_keeps_local_and_router() {
    let probe = ScriptedProbe::linux_host()
        .with_output("arp -a", "Address  HWtype  HWaddress  Flags Mask  Iface\nnothing useful here\n");
    let discovery = discovery_with(Platform::Linux, probe);

    let devices = discovery.list_devices();

    assert_eq!(ids(&devices), vec!["local", "router"]);
    assert_eq!(devices[1].mac, "unknown");
}

#[test]
fn test_missing_arp_command_yields_fallback() {
    let probe = ScriptedProbe::new()
        .with_interface("eth0", IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)))
        .with_output("ip route show default", "default via 10.0.0.1 dev eth0\n");
    let discovery = discovery_with(Platform::Linux, probe);

    let devices = discovery.list_devices();

    assert_eq!(ids(&devices), vec!["router", "local"]);
    assert_eq!(devices[0].ip, Ipv4Addr::new(192, 168, 1, 1));
    assert_eq!(devices[0].mac, "00:11:22:33:44:55");
    assert_eq!(devices[1].ip, Ipv4Addr::new(192, 168, 1, 100));
    assert_eq!(devices[1].mac, "11:22:33:44:55:66");
}

#[test]
fn test_interface_failure_yields_fallback() {
    let probe = ScriptedProbe::new()
        .with_output("ip route show default", "default via 10.0.0.1 dev eth0\n")
        .with_output("arp -a", "? (10.0.0.9) at 00:11:22:33:44:55 [ether] on eth0\n");
    let discovery = discovery_with(Platform::Linux, probe);

    assert_eq!(ids(&discovery.list_devices()), vec!["router", "local"]);
}

#[test]
fn test_loopback_only_host_yields_fallback() {
    let probe = ScriptedProbe::new()
        .with_interface("lo", IpAddr::V4(Ipv4Addr::LOCALHOST))
        .with_interface("lo6", "::1".parse().unwrap())
        .with_output("arp -a", test_utils::LINUX_ARP_OUTPUT);
    let discovery = discovery_with(Platform::Linux, probe);

    assert_eq!(ids(&discovery.list_devices()), vec!["router", "local"]);
}

#[test]
fn test_gateway_failure_uses_default_gateway() {
    let probe = ScriptedProbe::new()
        .with_interface("eth0", IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)))
        .with_output("arp -a", "? (10.0.0.130) at 00:11:22:33:44:55 [ether] on eth0\n");
    let discovery = discovery_with(Platform::Linux, probe);

    assert_eq!(discovery.default_gateway(), DEFAULT_GATEWAY);

    let devices = discovery.list_devices();
    assert_eq!(ids(&devices), vec!["local", "router", "dev-0"]);
    assert_eq!(devices[1].ip, DEFAULT_GATEWAY);
    assert_eq!(devices[2].device_type, DeviceType::Computer);
}

#[test]
fn test_windows_host_uses_ipconfig_gateway() {
    let ipconfig = "\
Ethernet adapter Ethernet:\r
   IPv4 Address. . . . . . . . . . . : 192.168.0.20\r
   Subnet Mask . . . . . . . . . . . : 255.255.255.0\r
   Default Gateway . . . . . . . . . : 192.168.0.254\r
";
    let arp = "\r
Interface: 192.168.0.20 --- 0xb\r
  Internet Address      Physical Address      Type\r
  192.168.0.254         00-11-22-33-44-55     dynamic\r
  192.168.0.15          00-17-88-01-02-03     dynamic\r
";
    let probe = ScriptedProbe::new()
        .with_interface("Ethernet", IpAddr::V4(Ipv4Addr::new(192, 168, 0, 20)))
        .with_output("ipconfig", ipconfig)
        .with_output("arp -a", arp);
    let discovery = discovery_with(Platform::Windows, probe);

    let devices = discovery.list_devices();

    assert_eq!(ids(&devices), vec!["local", "router", "dev-4"]);
    assert_eq!(devices[0].mac, "unknown");
    assert_eq!(devices[1].ip, Ipv4Addr::new(192, 168, 0, 254));
    assert_eq!(devices[1].mac, "00:11:22:33:44:55");
    assert_eq!(devices[2].mac, "00:17:88:01:02:03");
    assert_eq!(devices[2].device_type, DeviceType::Vendor("Philips Hue".to_string()));
}

#[test]
fn test_macos_host_uses_route_gateway() {
    let route = "   route to: default\ndestination: default\n       mask: default\n    gateway: 172.16.0.1\n";
    let probe = ScriptedProbe::new()
        .with_interface("en0", IpAddr::V4(Ipv4Addr::new(172, 16, 0, 10)))
        .with_output("route -n get default", route)
        .with_output("arp -a", "? (172.16.0.1) at 0:11:22:33:44:55 on en0 ifscope [ethernet]\n");
    let discovery = discovery_with(Platform::MacOs, probe);

    let devices = discovery.list_devices();

    assert_eq!(ids(&devices), vec!["local", "router"]);
    assert_eq!(devices[1].ip, Ipv4Addr::new(172, 16, 0, 1));
    assert_eq!(devices[1].mac, "00:11:22:33:44:55");
}

#[test]
fn test_find_device() {
    let discovery = discovery_with(Platform::Linux, ScriptedProbe::linux_host());

    let found = discovery.find_device(Ipv4Addr::new(192, 168, 1, 160));
    assert_eq!(found.map(|d| d.id), Some("dev-6".to_string()));

    assert!(discovery.find_device(Ipv4Addr::new(10, 0, 0, 99)).is_none());
}

#[test]
fn test_python_detection() {
    let discovery = discovery_with(Platform::Linux, ScriptedProbe::linux_host());
    assert!(!discovery.python_available());

    let probe = ScriptedProbe::linux_host()
        .with_output("python3 --version", "Python 3.11.4\n")
        .with_output("python3 -c import psutil", "");
    let discovery = discovery_with(Platform::Linux, probe);

    assert!(discovery.python_available());
    assert!(discovery.python_module_available("psutil"));
    assert!(!discovery.python_module_available("scapy"));
}
