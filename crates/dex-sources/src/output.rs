//! Output writers.
//!
//! JSON documents are written pretty-printed with two-space indentation.
//! Key order is whatever the value's `Serialize` implementation produces.

use std::path::{Path, PathBuf};

use dex_catalog::RunOutput;
use dex_core::InconsistencyLog;
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::error::{Result, SourcesError};
use crate::paths::DataLayout;

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    write_text(path, &to_pretty(path, value)?)
}

fn to_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|source| SourcesError::Serialize {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source| SourcesError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, contents).map_err(write_error)?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote");
    Ok(())
}

/// One line per entry: the message, then its context as compact JSON.
pub fn render_log(log: &InconsistencyLog) -> String {
    log.entries()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes every document of a finished item run. Returns the written paths.
///
/// Everything is serialized before the first file is touched.
pub fn write_run_outputs(layout: &DataLayout, output: &RunOutput) -> Result<Vec<PathBuf>> {
    let _guard = info_span!("write_outputs", root = %layout.root().display()).entered();
    let items = output.items()?;

    let mut documents = Vec::new();
    for schema in output.all_schemas() {
        let path = layout.expansion(schema.expansion());
        let json = to_pretty(&path, schema)?;
        documents.push((path, json));
    }
    let items_json = to_pretty(&layout.items(), &items)?;
    documents.push((layout.items(), items_json));
    let map_json = to_pretty(&layout.item_map(), &output.guids)?;
    documents.push((layout.item_map(), map_json));
    let itemlist_json = to_pretty(&layout.itemlist(), &output.guids.itemlist())?;
    documents.push((layout.itemlist(), itemlist_json));
    let productlist_json = to_pretty(&layout.productlist(), &output.guids.productlist())?;
    documents.push((layout.productlist(), productlist_json));
    let expansions_json = to_pretty(&layout.expansions(), &output.expansions)?;
    documents.push((layout.expansions(), expansions_json));
    documents.push((layout.inconsistencies(), render_log(&output.log)));

    for (path, contents) in &documents {
        write_text(path, contents)?;
    }
    info!(files = documents.len(), "run outputs written");
    Ok(documents.into_iter().map(|(path, _)| path).collect())
}
