//! Extraction of MAC addresses from interface status command output.

use regex::Regex;

use mac::MacAddress;

lazy_static! {
    static ref ETHER: Regex = Regex::new(r"ether\s+([0-9a-f]{2}(?::[0-9a-f]{2}){5})").unwrap();

    static ref PHYSICAL_ADDRESS: Regex =
        Regex::new(r"Physical Address[.\s]*:\s*([0-9A-Fa-f]{2}(?:-[0-9A-Fa-f]{2}){5})").unwrap();

    static ref BLANK_LINE: Regex = Regex::new(r"\r?\n[ \t]*\r?\n").unwrap();

    static ref ADAPTER_HEADER: Regex = Regex::new(r"(?i)^\s*\S.*adapter .*:\s*$").unwrap();
}

/// Returns the first `ether` address in ifconfig style output.
pub fn ifconfig_mac(output: &str) -> Option<MacAddress> {
    ETHER
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|mac| mac.as_str().parse().ok())
}

/// Returns the physical address of the first ipconfig block mentioning
/// `interface`.
pub fn ipconfig_mac(output: &str, interface: &str) -> Option<MacAddress> {
    let block = ipconfig_blocks(output)
        .into_iter()
        .find(|block| block.contains(interface))?;

    PHYSICAL_ADDRESS
        .captures(&block)
        .and_then(|caps| caps.get(1))
        .and_then(|mac| mac.as_str().parse().ok())
}

/// Splits ipconfig output into per-interface blocks.
///
/// Blocks are separated by blank lines. ipconfig prints an adapter's header
/// line followed by a blank line and then its details, so a block holding
/// only a header is joined with the block after it.
pub fn ipconfig_blocks(output: &str) -> Vec<String> {
    let mut blocks = vec![];
    let mut header: Option<&str> = None;

    for block in BLANK_LINE.split(output) {
        if block.trim().is_empty() {
            continue;
        }

        let is_header = block.trim().lines().count() == 1 && ADAPTER_HEADER.is_match(block.trim());

        match header.take() {
            Some(prev) if !is_header => blocks.push(format!("{}\n{}", prev, block)),
            Some(prev) => {
                blocks.push(prev.to_string());
                header = Some(block);
            }
            None if is_header => header = Some(block),
            None => blocks.push(block.to_string()),
        }
    }

    if let Some(prev) = header {
        blocks.push(prev.to_string());
    }

    blocks
}
