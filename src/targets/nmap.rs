//! Nmap XML report parsing.
//!
//! Walks an nmap report with a streaming `quick_xml` reader and emits one
//! target URL per open, HTTP-capable service, preserving document order.
//! A host contributes one target per qualifying port; hosts with no
//! qualifying service contribute nothing.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::targets::ParseError;

/// Parse an nmap XML report file into an ordered list of scan targets.
///
/// A missing or unreadable file is an IO error; a file that is not
/// well-formed nmap XML is a [`ParseError`]. A well-formed report with no
/// qualifying services yields an empty list.
pub fn parse_nmap_report(path: impl AsRef<Path>) -> CliResult<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let targets = parse_nmap_xml(&content, &path.display().to_string())?;
    debug!(
        "parsed {}: {} http-capable service(s)",
        path.display(),
        targets.len()
    );
    Ok(targets)
}

/// Parse nmap XML content.
pub fn parse_nmap_xml(xml: &str, source: &str) -> Result<Vec<String>, ParseError> {
    let mut reader = Reader::from_str(xml);

    let mut targets = Vec::new();
    let mut saw_root = false;

    // Per-host / per-port parse state.
    let mut host_addr: Option<String> = None;
    let mut port_id: Option<u16> = None;
    let mut port_open = false;
    let mut scheme: Option<&'static str> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.name();
                let name = name.as_ref();

                if !saw_root {
                    if name != b"nmaprun" {
                        return Err(ParseError::NotAnNmapReport {
                            path: source.to_string(),
                        });
                    }
                    saw_root = true;
                    continue;
                }

                match name {
                    b"host" => {
                        host_addr = None;
                    }
                    b"address" => {
                        // Keep the first address of each host; nmap lists
                        // the MAC address after the IP when both are known.
                        if host_addr.is_none() {
                            if let Some(addr) = attr(&e, b"addr", source)? {
                                let kind = attr(&e, b"addrtype", source)?;
                                if kind.as_deref() != Some("mac") {
                                    host_addr = Some(addr);
                                }
                            }
                        }
                    }
                    b"port" => {
                        port_id = attr(&e, b"portid", source)?.and_then(|p| p.parse().ok());
                        port_open = false;
                        scheme = None;
                    }
                    b"state" => {
                        port_open = attr(&e, b"state", source)?.as_deref() == Some("open");
                    }
                    b"service" => {
                        let name = attr(&e, b"name", source)?.unwrap_or_default();
                        let tunneled = attr(&e, b"tunnel", source)?.as_deref() == Some("ssl");
                        scheme = http_scheme(&name, tunneled);
                    }
                    _ => {}
                }

                // Empty <port/> elements never qualify (no state/service
                // children), so closing logic only runs on Event::End.
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"port" {
                    if let (Some(addr), Some(port), Some(scheme), true) =
                        (&host_addr, port_id, scheme, port_open)
                    {
                        targets.push(format!("{}://{}:{}", scheme, addr, port));
                    }
                    port_id = None;
                    port_open = false;
                    scheme = None;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ParseError::MalformedXml {
                    path: source.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if !saw_root {
        return Err(ParseError::NotAnNmapReport {
            path: source.to_string(),
        });
    }

    Ok(targets)
}

/// Read a single attribute value from an element.
fn attr(e: &BytesStart<'_>, key: &[u8], source: &str) -> Result<Option<String>, ParseError> {
    let attr = e
        .try_get_attribute(key)
        .map_err(|err| ParseError::MalformedXml {
            path: source.to_string(),
            reason: err.to_string(),
        })?;

    match attr {
        Some(a) => {
            let value = a
                .unescape_value()
                .map_err(|err| ParseError::MalformedXml {
                    path: source.to_string(),
                    reason: err.to_string(),
                })?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

/// Map an nmap service name to a URL scheme, or `None` when the service is
/// not HTTP-capable.
fn http_scheme(service: &str, ssl_tunneled: bool) -> Option<&'static str> {
    let https = ssl_tunneled || service == "https" || service == "ssl/http";
    if https {
        return Some("https");
    }

    match service {
        "http" | "http-alt" | "http-proxy" | "www" | "www-http" => Some("http"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"<?xml version="1.0"?>
<nmaprun scanner="nmap" version="7.94">
  <host>
    <address addr="10.0.0.5" addrtype="ipv4"/>
    <address addr="AA:BB:CC:DD:EE:FF" addrtype="mac"/>
    <ports>
      <port protocol="tcp" portid="22">
        <state state="open"/>
        <service name="ssh"/>
      </port>
      <port protocol="tcp" portid="80">
        <state state="open"/>
        <service name="http"/>
      </port>
      <port protocol="tcp" portid="443">
        <state state="open"/>
        <service name="http" tunnel="ssl"/>
      </port>
      <port protocol="tcp" portid="8080">
        <state state="closed"/>
        <service name="http-proxy"/>
      </port>
    </ports>
  </host>
  <host>
    <address addr="10.0.0.6" addrtype="ipv4"/>
    <ports>
      <port protocol="tcp" portid="8000">
        <state state="open"/>
        <service name="http-alt"/>
      </port>
    </ports>
  </host>
</nmaprun>"#;

    #[test]
    fn test_qualifying_services_in_document_order() {
        let targets = parse_nmap_xml(REPORT, "report.xml").unwrap();
        assert_eq!(
            targets,
            vec![
                "http://10.0.0.5:80",
                "https://10.0.0.5:443",
                "http://10.0.0.6:8000",
            ]
        );
    }

    #[test]
    fn test_no_qualifying_services_is_empty_not_error() {
        let xml = r#"<nmaprun><host><address addr="10.0.0.9" addrtype="ipv4"/>
            <ports><port portid="25"><state state="open"/><service name="smtp"/></port></ports>
            </host></nmaprun>"#;
        let targets = parse_nmap_xml(xml, "report.xml").unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn test_malformed_xml_fails_fast() {
        let result = parse_nmap_xml("<nmaprun><host></ports></nmaprun>", "broken.xml");
        assert!(matches!(result, Err(ParseError::MalformedXml { .. })));
    }

    #[test]
    fn test_wrong_root_element_rejected() {
        let result = parse_nmap_xml("<scanreport></scanreport>", "other.xml");
        assert!(matches!(result, Err(ParseError::NotAnNmapReport { .. })));
    }

    #[test]
    fn test_closed_ports_do_not_qualify() {
        let xml = r#"<nmaprun><host><address addr="10.0.0.1" addrtype="ipv4"/>
            <ports><port portid="80"><state state="closed"/><service name="http"/></port></ports>
            </host></nmaprun>"#;
        let targets = parse_nmap_xml(xml, "r.xml").unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn test_mac_address_not_used_as_host() {
        let xml = r#"<nmaprun><host>
            <address addr="AA:BB:CC:DD:EE:FF" addrtype="mac"/>
            <address addr="192.168.1.2" addrtype="ipv4"/>
            <ports><port portid="80"><state state="open"/><service name="http"/></port></ports>
            </host></nmaprun>"#;
        let targets = parse_nmap_xml(xml, "r.xml").unwrap();
        assert_eq!(targets, vec!["http://192.168.1.2:80"]);
    }

    #[test]
    fn test_https_service_name() {
        let xml = r#"<nmaprun><host><address addr="10.0.0.1" addrtype="ipv4"/>
            <ports><port portid="8443"><state state="open"/><service name="https"/></port></ports>
            </host></nmaprun>"#;
        let targets = parse_nmap_xml(xml, "r.xml").unwrap();
        assert_eq!(targets, vec!["https://10.0.0.1:8443"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = parse_nmap_report("/nonexistent/report.xml");
        assert!(matches!(result, Err(CliError::Io { .. })));
    }
}
