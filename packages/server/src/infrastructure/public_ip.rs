//! Public IP announcement.
//!
//! Looks up the host's public addresses so the operator can share a reachable
//! URL. Purely informational: every failure is logged and swallowed.

use serde::Deserialize;

const IPV4_LOOKUP_URL: &str = "https://api.ipify.org?format=json";
const IPV6_LOOKUP_URL: &str = "https://api64.ipify.org?format=json";

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

async fn lookup(client: &reqwest::Client, url: &str) -> Result<String, reqwest::Error> {
    let response = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<IpifyResponse>()
        .await?;
    Ok(response.ip)
}

/// Whether the IPv6 lookup result names an endpoint this server accepts.
///
/// Hosts without IPv6 get their IPv4 back from the lookup, and a listener
/// bound to an IPv4 address never accepts IPv6 peers.
fn should_announce_ipv6(ipv4: Option<&str>, ipv6: &str, listening_on_ipv6: bool) -> bool {
    listening_on_ipv6 && ipv4 != Some(ipv6)
}

/// Log the public IPv4 and IPv6 endpoints of this server.
///
/// `listening_on_ipv6` is false when the listener is bound to an IPv4
/// address; the IPv6 line is skipped in that case.
pub async fn announce_public_ip(port: u16, listening_on_ipv6: bool) {
    let client = reqwest::Client::new();

    let ipv4 = match lookup(&client, IPV4_LOOKUP_URL).await {
        Ok(ip) => {
            tracing::info!("IPv4 is running on {}:{}", ip, port);
            Some(ip)
        }
        Err(e) => {
            tracing::warn!("Error fetching public IPv4: {}", e);
            None
        }
    };

    match lookup(&client, IPV6_LOOKUP_URL).await {
        Ok(ip) if should_announce_ipv6(ipv4.as_deref(), &ip, listening_on_ipv6) => {
            tracing::info!("IPv6 is running on [{}]:{}", ip, port);
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("Error fetching public IPv6: {}", e),
    }
}
