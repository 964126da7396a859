use std::str::FromStr;
use thiserror::Error;

/// Supported blacklist file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// `/etc/hosts` style: an address field followed by one or more names.
    Hosts,
    /// One domain per line.
    Raw,
}

#[derive(Debug, Error)]
#[error("unsupported blacklist format: {0}")]
pub struct UnsupportedFormat(pub String);

impl FromStr for ListFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hosts" => Ok(ListFormat::Hosts),
            "raw" => Ok(ListFormat::Raw),
            other => Err(UnsupportedFormat(other.to_string())),
        }
    }
}

/// Extracts domain names from `content` in file order. Duplicates pass
/// through; they are collapsed during aggregation, not here.
pub fn parse(format: ListFormat, content: &str) -> Vec<String> {
    match format {
        ListFormat::Hosts => parse_hosts(content),
        ListFormat::Raw => parse_raw(content),
    }
}

fn parse_hosts(content: &str) -> Vec<String> {
    let mut domains = Vec::new();
    for line in content.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Everything from the first `#` token on is an inline comment.
        let mut tokens = line
            .split_whitespace()
            .take_while(|token| !token.starts_with('#'));
        // First token is the address field.
        if tokens.next().is_none() {
            continue;
        }
        domains.extend(tokens.map(str::to_owned));
    }
    domains
}

fn parse_raw(content: &str) -> Vec<String> {
    let mut domains = Vec::new();
    // Lines keep their terminators: the emptiness check is a literal string
    // comparison on the undecorated line, so a whitespace-only line passes
    // it and trims down to an empty entry. The zone writer drops those.
    for line in content.split_inclusive('\n') {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        domains.push(line.trim().to_string());
    }
    domains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("hosts".parse::<ListFormat>().unwrap(), ListFormat::Hosts);
        assert_eq!("raw".parse::<ListFormat>().unwrap(), ListFormat::Raw);
        let err = "xml".parse::<ListFormat>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported blacklist format: xml");
    }

    #[test]
    fn test_hosts_drops_address_and_inline_comment() {
        let domains = parse(ListFormat::Hosts, "127.0.0.1 bad.example.com # comment\n");
        assert_eq!(domains, vec!["bad.example.com"]);
    }

    #[test]
    fn test_hosts_multiple_names_per_line() {
        let domains = parse(
            ListFormat::Hosts,
            "0.0.0.0 ads.example.com tracker.example.com\n",
        );
        assert_eq!(domains, vec!["ads.example.com", "tracker.example.com"]);
    }

    #[test]
    fn test_hosts_skips_comments_and_blanks() {
        let content = "# header comment\n\n127.0.0.1 localhost\n   \n0.0.0.0 evil.example\n";
        let domains = parse(ListFormat::Hosts, content);
        assert_eq!(domains, vec!["localhost", "evil.example"]);
    }

    #[test]
    fn test_hosts_address_only_line_yields_nothing() {
        assert!(parse(ListFormat::Hosts, "127.0.0.1\n").is_empty());
    }

    #[test]
    fn test_raw_single_domain() {
        let domains = parse(ListFormat::Raw, "tracker.example.org");
        assert_eq!(domains, vec!["tracker.example.org"]);
    }

    #[test]
    fn test_raw_comment_line_yields_nothing() {
        assert!(parse(ListFormat::Raw, "# comment").is_empty());
    }

    #[test]
    fn test_raw_trims_surrounding_whitespace() {
        let domains = parse(ListFormat::Raw, "  spaced.example.net\t\n");
        assert_eq!(domains, vec!["spaced.example.net"]);
    }

    #[test]
    fn test_raw_whitespace_only_line_becomes_empty_entry() {
        // Faithful to the original: the line is not literally empty, so it
        // is kept and trimmed down to "".
        let domains = parse(ListFormat::Raw, "a.example\n   \nb.example\n");
        assert_eq!(domains, vec!["a.example", "", "b.example"]);
    }

    #[test]
    fn test_raw_preserves_order_and_duplicates() {
        let content = "dup.example\nother.example\ndup.example\n";
        let domains = parse(ListFormat::Raw, content);
        assert_eq!(domains, vec!["dup.example", "other.example", "dup.example"]);
    }

    #[test]
    fn test_raw_handles_crlf() {
        let domains = parse(ListFormat::Raw, "win.example\r\n# skip\r\n");
        assert_eq!(domains, vec!["win.example"]);
    }
}
