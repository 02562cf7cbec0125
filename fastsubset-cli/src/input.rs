// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use anyhow::{anyhow, Context};
use std::path::Path;

fn read_weights_internal<R: std::io::Read>(reader: R) -> Result<Vec<u64>, anyhow::Error> {
    let content = std::io::read_to_string(reader)?;
    let weights: Result<Vec<u64>, _> = content
        .split_whitespace()
        .map(str::parse)
        .filter(|x| match x {
            Ok(x) => *x > 0,
            Err(_) => true,
        })
        .collect();
    Ok(weights?)
}

/// Read whitespace separated weights from a file, in file order. Zeros are dropped.
pub fn read_weights(path: &Path) -> Result<Vec<u64>, anyhow::Error> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("unable to read from {}", path.display()))?;
    read_weights_internal(file).with_context(|| format!("invalid weights in {}", path.display()))
}

/// Parse one `weight:count` inventory entry.
pub fn parse_entry(s: &str) -> Result<(u64, u64), anyhow::Error> {
    let (weight, count) = s
        .split_once(':')
        .ok_or_else(|| anyhow!("expected weight:count, got '{s}'"))?;
    let weight = weight
        .trim()
        .parse()
        .with_context(|| format!("invalid weight in '{s}'"))?;
    let count = count
        .trim()
        .parse()
        .with_context(|| format!("invalid count in '{s}'"))?;
    Ok((weight, count))
}

#[cfg(test)]
mod tests {
    use super::{parse_entry, read_weights_internal};

    #[test]
    fn basic() {
        let content = "25\n54\n";
        let ret = read_weights_internal(content.as_bytes()).unwrap();
        assert_eq!(vec![25, 54], ret);
    }

    #[test]
    fn error() {
        let content = "25\n5a\n";
        let ret = read_weights_internal(content.as_bytes());
        assert!(ret.is_err());
    }

    #[test]
    fn zero() {
        let content = "25 0\t54\n";
        let ret = read_weights_internal(content.as_bytes()).unwrap();
        assert_eq!(vec![25, 54], ret);
    }

    #[test]
    fn entry() {
        assert_eq!(parse_entry("40:16").unwrap(), (40, 16));
        assert_eq!(parse_entry(" 3 : 0 ").unwrap(), (3, 0));
        assert!(parse_entry("40").is_err());
        assert!(parse_entry("40:x").is_err());
        assert!(parse_entry("-1:2").is_err());
    }
}
