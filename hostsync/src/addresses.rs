// Interface address reader

//! Interface address reader
//!
//! Queries the OS interface table and extracts the IPv4/IPv6 addresses bound
//! to the designated interface. Loopback and unspecified addresses are
//! dropped; link-local addresses are kept.

use crate::config::read_main_interface;
use crate::error::{Error, Result};
use crate::types::InterfaceAddresses;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// Source of per-tick address readings
pub trait AddressSource {
    /// Name of the interface the next read will target
    fn interface_name(&self) -> Result<String>;

    /// Read the current addresses of the designated interface
    fn read(&self) -> Result<InterfaceAddresses>;
}

/// How the designated interface is named
#[derive(Debug, Clone)]
pub enum InterfaceSelector {
    /// Fixed name from configuration
    Fixed(String),
    /// First line of a file, re-read on every poll
    File(PathBuf),
}

/// Reads addresses from the live OS interface table
pub struct SystemAddressSource {
    selector: InterfaceSelector,
}

impl SystemAddressSource {
    /// Create a source for the given selector
    pub fn new(selector: InterfaceSelector) -> Self {
        Self { selector }
    }
}

impl AddressSource for SystemAddressSource {
    fn interface_name(&self) -> Result<String> {
        match &self.selector {
            InterfaceSelector::Fixed(name) => Ok(name.clone()),
            InterfaceSelector::File(path) => read_main_interface(path),
        }
    }

    fn read(&self) -> Result<InterfaceAddresses> {
        let name = self.interface_name()?;
        read_addresses(&name)
    }
}

/// Directory listing every network interface the kernel knows about
const SYS_CLASS_NET: &str = "/sys/class/net";

/// Read the addresses bound to `interface` from the OS interface table
///
/// Presence is decided from `/sys/class/net`, since the address table only
/// lists interfaces that carry at least one address. An interface that exists
/// without addresses reads as empty lists.
pub fn read_addresses(interface: &str) -> Result<InterfaceAddresses> {
    let table = if_addrs::get_if_addrs().map_err(Error::InterfaceLookup)?;
    let present = interface_exists(Path::new(SYS_CLASS_NET), interface);
    select_addresses(
        interface,
        present,
        table.iter().map(|iface| (iface.name.as_str(), iface.ip())),
    )
}

/// Whether `name` has an entry under `sys_class_net`
pub fn interface_exists(sys_class_net: &Path, name: &str) -> bool {
    sys_class_net.join(name).exists()
}

/// Pick the usable addresses of `interface` out of `(name, ip)` table entries
///
/// `present` says whether the interface exists independently of the table.
/// Fails with [`Error::InterfaceNotFound`] only when it is absent and no
/// entry carries that name. Entries are visited in table order.
pub fn select_addresses<'a>(
    interface: &str,
    present: bool,
    entries: impl IntoIterator<Item = (&'a str, IpAddr)>,
) -> Result<InterfaceAddresses> {
    let mut found = present;
    let mut addrs = InterfaceAddresses::default();

    for (name, ip) in entries {
        if name != interface {
            continue;
        }
        found = true;

        if ip.is_loopback() || ip.is_unspecified() {
            continue;
        }

        match ip {
            IpAddr::V4(v4) => addrs.v4.push(v4.to_string()),
            IpAddr::V6(v6) => addrs.v6.push(v6.to_string()),
        }
    }

    if !found {
        return Err(Error::InterfaceNotFound(interface.to_string()));
    }

    Ok(addrs)
}
