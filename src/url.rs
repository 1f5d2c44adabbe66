// Query-string parameters: `?seed=<n>&size=<n>`

use crate::types::Seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlParams {
    pub seed: Option<Seed>,
    pub size: Option<usize>,
}

impl UrlParams {
    pub fn new(seed: Seed, size: usize) -> UrlParams {
        UrlParams {
            seed: Some(seed),
            size: Some(size),
        }
    }

    /// Parse `location.search`; unknown keys and unparsable values are ignored
    pub fn parse(query: &str) -> UrlParams {
        let mut params = UrlParams::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "seed" => params.seed = parse_leading_int(value),
                "size" => params.size = parse_leading_int(value).and_then(|v| usize::try_from(v).ok()),
                _ => {}
            }
        }

        params
    }

    /// `?seed=<n>&size=<n>`; absent fields are left out
    pub fn to_query(&self) -> String {
        let mut parts = Vec::new();
        if let Some(seed) = self.seed {
            parts.push(format!("seed={}", seed));
        }
        if let Some(size) = self.size {
            parts.push(format!("size={}", size));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}

/// Integer prefix of `value`, the way `parseInt` reads "12abc" as 12
fn parse_leading_int(value: &str) -> Option<Seed> {
    let value = value.trim();
    let digits_end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..digits_end].parse().ok()
}
