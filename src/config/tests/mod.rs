#[cfg(test)]
mod tests {
    use std::io::Write;
    use tempfile::NamedTempFile;
    use crate::config::parser::{load_config, ConfigError};

    // Helper function to create a temporary file with content
    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    const VALID_CONFIG: &str = r#"
        config:
          webhookURL: https://ops.example.com/hooks/events
          abis:
            - type: erc20
              definition:
                - "event Transfer(address indexed from, address indexed to, uint256 value)"
                - "event Approval(address indexed owner, address indexed spender, uint256 value)"
            - type: erc721
              definition:
                - "event Transfer(address indexed from, address indexed to, uint256 indexed tokenId)"
          allContracts:
            - chainId: 11155111
              contracts:
                - address: "0x779877A7B0D9E8603169DdbD7836e478b4624789"
                  type: erc20
                  name: ChainlinkToken
          chains:
            - network:
                name: sepolia
                chainId: 11155111
              rpcWS: wss://sepolia.example.com/ws
              rpcHTTPS: https://sepolia.example.com
        "#;

    #[test]
    fn test_valid_configuration() {
        let temp_file = create_temp_file(VALID_CONFIG);
        let config = load_config(temp_file.path()).expect("Failed to load valid config");

        assert_eq!(config.webhook_url, "https://ops.example.com/hooks/events");
        assert_eq!(config.abis.len(), 2);
        assert_eq!(config.abis[0].kind, "erc20");
        assert_eq!(config.abis[0].definition.len(), 2);
        assert_eq!(config.abis[1].kind, "erc721");

        assert_eq!(config.all_contracts.len(), 1);
        assert_eq!(config.all_contracts[0].chain_id, 11155111);
        assert_eq!(config.all_contracts[0].contracts.len(), 1);
        assert_eq!(config.all_contracts[0].contracts[0].name, "ChainlinkToken");
        assert_eq!(config.all_contracts[0].contracts[0].kind, "erc20");

        assert_eq!(config.chains.len(), 1);
        assert_eq!(config.chains[0].network.name, "sepolia");
        assert_eq!(config.chains[0].network.chain_id, 11155111);
        assert_eq!(config.chains[0].rpc_ws, "wss://sepolia.example.com/ws");
        assert_eq!(config.chains[0].rpc_https, "https://sepolia.example.com");
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/herald-config.yaml");
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_file = create_temp_file("config:\n  webhookURL: [unclosed");

        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_required_field() {
        // No webhookURL
        let config_yaml = r#"
        config:
          abis: []
          allContracts: []
          chains: []
        "#;

        let temp_file = create_temp_file(config_yaml);
        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_top_level_config_key() {
        // The same document, but not nested under the `config` key
        let config_yaml = r#"
        webhookURL: https://ops.example.com/hooks/events
        abis: []
        allContracts: []
        chains: []
        "#;

        let temp_file = create_temp_file(config_yaml);
        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_webhook_url() {
        let config_yaml = r#"
        config:
          webhookURL: not-a-url
          abis: []
          allContracts: []
          chains: []
        "#;

        let temp_file = create_temp_file(config_yaml);
        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_contract_address() {
        let config_yaml = r#"
        config:
          webhookURL: https://ops.example.com/hooks/events
          abis: []
          allContracts:
            - chainId: 11155111
              contracts:
                - address: "0xnot-hex"
                  type: erc20
                  name: Broken
          chains: []
        "#;

        let temp_file = create_temp_file(config_yaml);
        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_empty_rpc_url() {
        let config_yaml = r#"
        config:
          webhookURL: https://ops.example.com/hooks/events
          abis: []
          allContracts: []
          chains:
            - network:
                name: sepolia
                chainId: 11155111
              rpcWS: wss://sepolia.example.com/ws
              rpcHTTPS: ""
        "#;

        let temp_file = create_temp_file(config_yaml);
        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_unresolved_references_accepted() {
        // A deployment may name a chain or ABI type with no matching entry;
        // those are skipped when the subscription plan is built, not rejected here
        let config_yaml = r#"
        config:
          webhookURL: https://ops.example.com/hooks/events
          abis:
            - type: erc20
              definition:
                - "event Transfer(address indexed from, address indexed to, uint256 value)"
          allContracts:
            - chainId: 424242
              contracts:
                - address: "0x779877A7B0D9E8603169DdbD7836e478b4624789"
                  type: unknown-kind
                  name: Orphan
          chains:
            - network:
                name: sepolia
                chainId: 11155111
              rpcWS: wss://sepolia.example.com/ws
              rpcHTTPS: https://sepolia.example.com
        "#;

        let temp_file = create_temp_file(config_yaml);
        let config = load_config(temp_file.path()).expect("Unresolved references should load");

        assert!(config.find_chain_by_id(424242).is_none());
        assert!(config.find_abi_by_type("unknown-kind").is_none());
    }

    #[test]
    fn test_duplicate_entries_allowed() {
        let config_yaml = r#"
        config:
          webhookURL: https://ops.example.com/hooks/events
          abis:
            - type: erc20
              definition:
                - "event Transfer(address indexed from, address indexed to, uint256 value)"
            - type: erc20
              definition:
                - "event Approval(address indexed owner, address indexed spender, uint256 value)"
          allContracts: []
          chains:
            - network:
                name: sepolia
                chainId: 11155111
              rpcWS: wss://sepolia.example.com/ws
              rpcHTTPS: https://sepolia.example.com
            - network:
                name: sepolia-alt
                chainId: 11155111
              rpcWS: wss://alt.example.com/ws
              rpcHTTPS: https://alt.example.com
        "#;

        let temp_file = create_temp_file(config_yaml);
        let config = load_config(temp_file.path()).expect("Duplicates should be accepted");

        // First definition wins on lookup
        let abi = config.find_abi_by_type("erc20").unwrap();
        assert!(abi.definition[0].contains("Transfer"));

        let chain = config.find_chain_by_id(11155111).unwrap();
        assert_eq!(chain.network.name, "sepolia");
    }
}
