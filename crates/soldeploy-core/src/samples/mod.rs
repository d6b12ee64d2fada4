//! Bundled example contracts
//!
//! Loaded into the editor from the examples menu, served over HTTP, or
//! written to disk with `soldeploy examples <dir>`.

use std::path::{Path, PathBuf};

/// A named example source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// File name including the `.sol` suffix
    pub file_name: &'static str,
    pub source: &'static str,
    /// A constructor argument string that deploys this sample
    pub example_args: &'static str,
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        file_name: "ERC20Token.sol",
        source: include_str!("ERC20Token.sol"),
        example_args: "'My Token', 'MTK', 1000000",
    },
    Sample {
        file_name: "SimpleNFT.sol",
        source: include_str!("SimpleNFT.sol"),
        example_args: "'My Collection', 'MYC'",
    },
];

impl Sample {
    /// File name without the `.sol` suffix
    pub fn stem(&self) -> &'static str {
        self.file_name.trim_end_matches(".sol")
    }
}

/// Look a sample up by file name, with or without `.sol`
pub fn find(name: &str) -> Option<&'static Sample> {
    SAMPLES
        .iter()
        .find(|s| s.file_name == name || s.stem() == name)
}

/// Write every sample into `dir`, creating it if needed
pub fn write_all(dir: &Path) -> crate::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(SAMPLES.len());
    for sample in SAMPLES {
        let path = dir.join(sample.file_name);
        std::fs::write(&path, sample.source)?;
        tracing::info!(path = %path.display(), "wrote example contract");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::parse_constructor_args;

    #[test]
    fn test_find_with_and_without_suffix() {
        assert_eq!(find("ERC20Token.sol").unwrap().stem(), "ERC20Token");
        assert_eq!(find("SimpleNFT").unwrap().file_name, "SimpleNFT.sol");
        assert!(find("Missing").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_samples_declare_constructors() {
        for sample in SAMPLES {
            assert!(sample.source.contains("pragma solidity"), "{}", sample.file_name);
            assert!(sample.source.contains("constructor("), "{}", sample.file_name);
        }
    }

    #[test]
    fn test_example_args_match_constructor_arity() {
        // Constructor parameter counts in the bundled sources.
        let arity = [("ERC20Token.sol", 3), ("SimpleNFT.sol", 2)];
        for (name, expected) in arity {
            let sample = find(name).unwrap();
            assert_eq!(parse_constructor_args(sample.example_args).len(), expected, "{}", name);
        }
    }

    #[test]
    fn test_write_all() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/examples");
        let written = write_all(&target).unwrap();
        assert_eq!(written.len(), SAMPLES.len());
        for (path, sample) in written.iter().zip(SAMPLES) {
            assert_eq!(std::fs::read_to_string(path).unwrap(), sample.source);
        }
    }
}
