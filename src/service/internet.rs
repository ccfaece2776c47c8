//! Network values.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::domain::PortRange;
use crate::error::GenResult;
use crate::random::RandomSource;

const HTTP_METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

const HTTP_STATUS_CODES: [u16; 16] = [
    200, 201, 202, 204, 301, 302, 304, 400, 401, 403, 404, 409, 422, 500, 502, 503,
];

/// Random IPv4 address.
pub fn ip_v4(rng: &mut RandomSource) -> Ipv4Addr {
    Ipv4Addr::from(rng.range(0..=u32::MAX))
}

/// Random IPv6 address.
pub fn ip_v6(rng: &mut RandomSource) -> Ipv6Addr {
    Ipv6Addr::from(rng.range(0..=u128::MAX))
}

/// Random port within `range`.
pub fn port(rng: &mut RandomSource, range: PortRange) -> u16 {
    let (low, high) = range.bounds();
    rng.range(low..=high)
}

/// Random IPv4 address with a port, e.g. `192.0.2.10:8080`.
pub fn ip_v4_with_port(rng: &mut RandomSource, range: PortRange) -> String {
    let ip = ip_v4(rng);
    format!("{ip}:{}", port(rng, range))
}

/// Random MAC address in lower-case colon notation.
pub fn mac_address(rng: &mut RandomSource) -> String {
    rng.bytes(6)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Random HTTP method.
///
/// # Errors
///
/// Propagates [`GenerationError::EmptyChoice`](crate::error::GenerationError::EmptyChoice).
pub fn http_method(rng: &mut RandomSource) -> GenResult<&'static str> {
    rng.choice(&HTTP_METHODS).copied()
}

/// Random HTTP status code.
///
/// # Errors
///
/// Propagates [`GenerationError::EmptyChoice`](crate::error::GenerationError::EmptyChoice).
pub fn http_status_code(rng: &mut RandomSource) -> GenResult<u16> {
    rng.choice(&HTTP_STATUS_CODES).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_port_ranges() {
        let mut rng = RandomSource::seeded(80);
        for range in [
            PortRange::All,
            PortRange::WellKnown,
            PortRange::Registered,
            PortRange::Ephemeral,
        ] {
            let (low, high) = range.bounds();
            for _ in 0..200 {
                let value = port(&mut rng, range);
                assert!((low..=high).contains(&value));
            }
        }
    }

    #[test]
    fn test_addresses_parse() {
        let mut rng = RandomSource::seeded(81);
        let with_port = ip_v4_with_port(&mut rng, PortRange::Ephemeral);
        assert!(with_port.parse::<std::net::SocketAddrV4>().is_ok(), "{with_port}");
        assert!(ip_v6(&mut rng).to_string().parse::<Ipv6Addr>().is_ok());
    }

    #[test]
    fn test_mac_address() {
        let mut rng = RandomSource::seeded(82);
        let re = Regex::new(r"^([0-9a-f]{2}:){5}[0-9a-f]{2}$").unwrap();
        assert!(re.is_match(&mac_address(&mut rng)));
    }

    #[test]
    fn test_http_values() {
        let mut rng = RandomSource::seeded(83);
        assert!(HTTP_METHODS.contains(&http_method(&mut rng).unwrap()));
        assert!(HTTP_STATUS_CODES.contains(&http_status_code(&mut rng).unwrap()));
    }
}
