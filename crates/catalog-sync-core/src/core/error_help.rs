use crate::core::CatalogError;

/// Provides helpful suggestions for common errors
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for CatalogError {
    fn help(&self) -> Option<String> {
        match self {
            CatalogError::Config(msg) => {
                if msg.contains("config.yml") {
                    Some(
                        "💡 Suggestion: Every template directory needs a config.yml with 'name', 'description' and 'version'"
                            .to_string(),
                    )
                } else if msg.contains("Failed to parse config") {
                    Some(
                        "💡 Suggestion: Fix or delete the catalog-sync config.yaml; a default one is recreated on the next run"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            CatalogError::UnsupportedType(_) => Some(
                "💡 Suggestion: Supported question types are string, password, boolean, int, enum, service and multiline"
                    .to_string(),
            ),
            CatalogError::Credentials(_) => Some(
                "💡 Suggestion: Run 'catalog-sync login' to store credentials, or pass them with --api-key/--secret-key"
                    .to_string(),
            ),
            CatalogError::Vcs(msg) => {
                if msg.contains("git executable not found") {
                    Some("💡 Suggestion: Install git and make sure it is on your PATH".to_string())
                } else {
                    Some(
                        "💡 Suggestion: Check the catalog repository URL, or remove the local checkout and try again"
                            .to_string(),
                    )
                }
            }
            CatalogError::Transport { status, .. } => match status {
                401 | 403 => Some(
                    "💡 Suggestion: Check the CMP API key and secret key (run 'catalog-sync login')"
                        .to_string(),
                ),
                404 => Some(
                    "💡 Suggestion: Check the CMP base URL; it should end with the API root (e.g. .../cmp/basic/api)"
                        .to_string(),
                ),
                _ => None,
            },
            CatalogError::Yaml(e) => {
                Some(format!(
                    "💡 Suggestion: Check your YAML syntax. Common issues:\n  - Missing colons after keys\n  - Incorrect indentation\n  - Unclosed quotes\n  - Invalid characters\n\nError details: {}",
                    e
                ))
            }
            CatalogError::Http(e) => {
                if e.is_timeout() {
                    Some(
                        "💡 Suggestion: Check your internet connection, or try again later"
                            .to_string(),
                    )
                } else if e.is_connect() {
                    Some(
                        "💡 Suggestion: Check your internet connection and firewall settings"
                            .to_string(),
                    )
                } else {
                    Some(
                        "💡 Suggestion: Check your internet connection, or verify the CMP server is accessible"
                            .to_string(),
                    )
                }
            }
            CatalogError::Io(e) => {
                if e.kind() == std::io::ErrorKind::PermissionDenied {
                    Some(
                        "💡 Suggestion: Check file permissions, or try running with appropriate permissions"
                            .to_string(),
                    )
                } else if e.kind() == std::io::ErrorKind::NotFound {
                    Some(
                        "💡 Suggestion: The file or directory may not exist. Check the path and try again"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Format an error with helpful suggestions
pub fn format_error_with_help(error: &CatalogError) -> String {
    let mut output = format!("❌ Error: {}", error);

    if let Some(help) = error.help() {
        output.push_str("\n\n");
        output.push_str(&help);
    }

    output
}
