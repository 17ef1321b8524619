//! Reading many inventory files at once.
//!
//! Files may be parsed on a rayon pool, but results always come back in the
//! order of the input paths so that the sequential fold that follows sees the
//! same sequence as a single-threaded run.

use super::{read_inventory, InventoryDocument};
use crate::core::Result;
use rayon::prelude::*;
use std::path::PathBuf;

/// How a batch of files is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub parallel: bool,
    /// Worker threads; 0 lets rayon decide.
    pub jobs: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
        }
    }
}

impl ParseOptions {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            jobs: 1,
        }
    }
}

pub type ParsedFile = (PathBuf, Result<InventoryDocument>);

/// Parse every path, returning one entry per path in input order.
pub fn read_all(paths: &[PathBuf], options: ParseOptions) -> Vec<ParsedFile> {
    if !options.parallel || paths.len() < 2 {
        return read_sequential(paths);
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if options.jobs > 0 {
        builder = builder.num_threads(options.jobs);
    }

    match builder.build() {
        Ok(pool) => {
            log::debug!(
                "Parsing {} files on {} threads",
                paths.len(),
                pool.current_num_threads()
            );
            pool.install(|| {
                paths
                    .par_iter()
                    .map(|path| (path.clone(), read_one(path)))
                    .collect()
            })
        }
        Err(e) => {
            log::warn!("Could not start parser pool ({}), parsing sequentially", e);
            read_sequential(paths)
        }
    }
}

fn read_sequential(paths: &[PathBuf]) -> Vec<ParsedFile> {
    paths
        .iter()
        .map(|path| (path.clone(), read_one(path)))
        .collect()
}

fn read_one(path: &PathBuf) -> Result<InventoryDocument> {
    let _span = tracing::debug_span!("parse", file = %path.display()).entered();
    read_inventory(path)
}
