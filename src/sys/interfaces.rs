use get_if_addrs::get_if_addrs;

use Result;

/// Returns the sorted, de-duplicated names of the local network interfaces.
pub fn interface_names() -> Result<Vec<String>> {
    let mut names: Vec<String> = get_if_addrs()?.into_iter().map(|iface| iface.name).collect();
    names.sort();
    names.dedup();
    Ok(names)
}
