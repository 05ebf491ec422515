use std::collections::HashMap;

/// Split a request target into its path and a decoded query map. Repeated
/// keys keep the last value.
pub(crate) fn split_target(target: &str) -> (String, HashMap<String, String>) {
    let (path, query_str) = target
        .split_once('?')
        .map(|(path, query)| (path, Some(query)))
        .unwrap_or((target, None));
    let mut query = HashMap::new();
    if let Some(query_str) = query_str {
        for pair in query_str.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            query.insert(percent_decode(key), percent_decode(value));
        }
    }
    (path.to_string(), query)
}

/// Minimal percent-decoding for query values; invalid escapes pass through
/// untouched.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'+' => {
                out.push(b' ');
                index += 1;
            }
            b'%' => match hex_pair(bytes.get(index + 1), bytes.get(index + 2)) {
                Some(decoded) => {
                    out.push(decoded);
                    index += 3;
                }
                None => {
                    out.push(b'%');
                    index += 1;
                }
            },
            byte => {
                out.push(byte);
                index += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(high: Option<&u8>, low: Option<&u8>) -> Option<u8> {
    let high = (*high? as char).to_digit(16)?;
    let low = (*low? as char).to_digit(16)?;
    Some((high * 16 + low) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_path_and_query() {
        let (path, query) = split_target("/api/prices?state=tamil-nadu&district=Chennai");
        assert_eq!(path, "/api/prices");
        assert_eq!(query.get("state").map(String::as_str), Some("tamil-nadu"));
        assert_eq!(query.get("district").map(String::as_str), Some("Chennai"));
    }

    #[test]
    fn target_without_query_yields_empty_map() {
        let (path, query) = split_target("/api/crops");
        assert_eq!(path, "/api/crops");
        assert!(query.is_empty());
    }

    #[test]
    fn decodes_percent_escapes_and_plus() {
        let (_, query) = split_target("/api/prices?state=tamil%20nadu&district=New+Town");
        assert_eq!(query.get("state").map(String::as_str), Some("tamil nadu"));
        assert_eq!(query.get("district").map(String::as_str), Some("New Town"));
    }

    #[test]
    fn keeps_invalid_escapes_verbatim() {
        let (_, query) = split_target("/api/prices?state=50%ZZoff");
        assert_eq!(query.get("state").map(String::as_str), Some("50%ZZoff"));
    }

    #[test]
    fn valueless_keys_become_empty_strings() {
        let (_, query) = split_target("/api/crops/season?season");
        assert_eq!(query.get("season").map(String::as_str), Some(""));
    }
}
