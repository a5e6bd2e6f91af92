//! Event discovery over human-readable ABI definitions
//!
//! ABI entries are Solidity declaration strings. Only `event` declarations
//! are of interest; everything else (functions, errors, constructors) is
//! ignored.

use alloy::json_abi::Event;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::config::models::Abi;

lazy_static! {
    /// Matches the event name in a declaration such as
    /// `event Transfer(address indexed from, address indexed to, uint256 value)`
    static ref EVENT_PATTERN: Regex = Regex::new(r"event\s+(\w+)").unwrap();
}

#[derive(Debug, Error)]
pub enum AbiError {
    #[error("Failed to parse event declaration '{declaration}': {reason}")]
    InvalidDeclaration { declaration: String, reason: String },
}

/// Extracts the event names declared in an ABI, in definition order.
///
/// Entries that declare no event contribute nothing. Duplicate names are
/// preserved; each occurrence registers its own listener downstream.
pub fn extract_event_names(abi: &Abi) -> Vec<String> {
    abi.definition
        .iter()
        .filter_map(|entry| {
            EVENT_PATTERN
                .captures(entry)
                .map(|captures| captures[1].to_string())
        })
        .collect()
}

/// Finds the first definition entry declaring the named event.
pub fn find_event_declaration<'a>(abi: &'a Abi, event_name: &str) -> Option<&'a str> {
    abi.definition
        .iter()
        .find(|entry| {
            EVENT_PATTERN
                .captures(entry)
                .map(|captures| &captures[1] == event_name)
                .unwrap_or(false)
        })
        .map(|entry| entry.as_str())
}

/// Parses a human-readable event declaration into its ABI form.
pub fn parse_event_declaration(declaration: &str) -> Result<Event, AbiError> {
    let trimmed = declaration.trim();
    let signature = trimmed.strip_prefix("event ").unwrap_or(trimmed).trim();

    signature
        .parse::<Event>()
        .map_err(|e| AbiError::InvalidDeclaration {
            declaration: declaration.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn erc20_abi() -> Abi {
        Abi {
            kind: "erc20".to_string(),
            definition: vec![
                "event Transfer(address indexed from, address indexed to, uint256 value)"
                    .to_string(),
                "function balanceOf(address owner) view returns (uint256)".to_string(),
                "event Approval(address indexed owner, address indexed spender, uint256 value)"
                    .to_string(),
            ],
        }
    }

    #[test]
    fn test_extract_event_names_in_order() {
        let abi = erc20_abi();
        let names = extract_event_names(&abi);
        assert_eq!(names, vec!["Transfer", "Approval"]);
    }

    #[test]
    fn test_extract_skips_non_event_entries() {
        let abi = Abi {
            kind: "misc".to_string(),
            definition: vec![
                "function transfer(address to, uint256 value) returns (bool)".to_string(),
                "error InsufficientBalance(uint256 available, uint256 required)".to_string(),
            ],
        };
        assert!(extract_event_names(&abi).is_empty());
    }

    #[test]
    fn test_extract_empty_definition() {
        let abi = Abi {
            kind: "empty".to_string(),
            definition: vec![],
        };
        assert!(extract_event_names(&abi).is_empty());
    }

    #[test]
    fn test_extract_preserves_duplicates() {
        let abi = Abi {
            kind: "dup".to_string(),
            definition: vec![
                "event Ping(uint256 value)".to_string(),
                "event Ping(uint256 value)".to_string(),
            ],
        };
        assert_eq!(extract_event_names(&abi), vec!["Ping", "Ping"]);
    }

    #[test]
    fn test_find_event_declaration() {
        let abi = erc20_abi();
        let declaration = find_event_declaration(&abi, "Approval").unwrap();
        assert!(declaration.contains("event Approval"));
        assert!(find_event_declaration(&abi, "Mint").is_none());
    }

    #[test]
    fn test_find_event_declaration_first_match_wins() {
        let abi = Abi {
            kind: "dup".to_string(),
            definition: vec![
                "event Ping(uint256 first)".to_string(),
                "event Ping(address second)".to_string(),
            ],
        };
        let declaration = find_event_declaration(&abi, "Ping").unwrap();
        assert!(declaration.contains("uint256 first"));
    }

    #[test]
    fn test_parse_event_declaration() {
        let event = parse_event_declaration(
            "event Transfer(address indexed from, address indexed to, uint256 value)",
        )
        .unwrap();

        assert_eq!(event.name, "Transfer");
        assert_eq!(event.inputs.len(), 3);
        assert!(event.inputs[0].indexed);
        assert!(event.inputs[1].indexed);
        assert!(!event.inputs[2].indexed);
        assert_eq!(event.signature(), "Transfer(address,address,uint256)");
    }

    #[test]
    fn test_parse_without_keyword_prefix() {
        let event = parse_event_declaration("Approval(address owner, uint256 value)").unwrap();
        assert_eq!(event.name, "Approval");
        assert_eq!(event.signature(), "Approval(address,uint256)");
    }

    #[test]
    fn test_parse_invalid_declaration() {
        let result = parse_event_declaration("event Broken(");
        assert!(matches!(result, Err(AbiError::InvalidDeclaration { .. })));
    }
}
