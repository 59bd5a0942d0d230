use std::path::{Path, PathBuf};

use crate::error::KeystoreError;

/// Location of the Solana CLI's default keypair: `~/.config/solana/id.json`.
pub fn default_keypair_path() -> Result<PathBuf, KeystoreError> {
    let home = dirs::home_dir().ok_or(KeystoreError::NoHomeDir)?;
    Ok(home.join(".config").join("solana").join("id.json"))
}

/// Replace a leading `~` with the home directory. Other paths pass through.
pub fn expand_home(path: &Path) -> Result<PathBuf, KeystoreError> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or(KeystoreError::NoHomeDir)?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_in_solana_config() {
        if let Ok(path) = default_keypair_path() {
            assert!(path.ends_with(".config/solana/id.json"));
        }
    }

    #[test]
    fn absolute_paths_are_untouched() {
        let p = Path::new("/etc/keys/id.json");
        assert_eq!(expand_home(p).unwrap(), p);
    }

    #[test]
    fn tilde_only_expands_as_a_whole_component() {
        let p = Path::new("~other/id.json");
        assert_eq!(expand_home(p).unwrap(), p);
    }

    #[test]
    fn tilde_prefix_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            let expanded = expand_home(Path::new("~/keys/id.json")).unwrap();
            assert_eq!(expanded, home.join("keys/id.json"));
        }
    }
}
