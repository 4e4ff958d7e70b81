use std::path::PathBuf;

use crate::constants::DEFAULT_PORT;

/// Get blob database path from environment variable or use default
pub fn get_blob_db_path() -> PathBuf {
    std::env::var("BLOB_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/blobs.db"))
}

/// Get directory holding the compiled frontend bundle
pub fn get_public_dir() -> PathBuf {
    std::env::var("PUBLIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("public"))
}

/// Get path of the static company reference list
pub fn get_company_list_path() -> PathBuf {
    std::env::var("COMPANY_LIST_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("assets/company_list.csv"))
}

/// Resolve the listen port: CLI flag, then `PORT`, then the default
pub fn resolve_port(cli_port: Option<u16>) -> u16 {
    cli_port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_port_prefers_cli_flag() {
        assert_eq!(resolve_port(Some(8080)), 8080);
    }
}
