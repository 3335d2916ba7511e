//! Input resolution and loading: paths/globs → declaration forests.
//!
//! `.json` files carry declarations directly; anything else is scanned as
//! Swift source. Files are loaded in parallel; each yields its own forest.
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;

use crate::error::{Error, ForestError, Result};
use crate::forest::{Forest, ForestBuilder};

// ------------------------------ JSON shape -------------------------------- //

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarationSpec {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub children: Vec<DeclarationSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub raw_type: String,
}

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: serde::de::DeserializeOwned>(src: &str, path: &Path) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let at = err.path().to_string();
        Error::Decode {
            path: path.to_path_buf(),
            message: format!("at JSON path {at} → {}", err.into_inner()),
        }
    })
}

pub fn forest_from_specs(specs: &[DeclarationSpec]) -> Result<Forest, ForestError> {
    fn build(b: &mut ForestBuilder<'_>, spec: &DeclarationSpec) -> Result<(), ForestError> {
        b.open(spec.name.as_str())?;
        for f in &spec.fields {
            b.field(f.name.as_str(), f.raw_type.as_str())?;
        }
        for child in &spec.children {
            build(b, child)?;
        }
        b.close()?;
        Ok(())
    }

    let mut b = ForestBuilder::new();
    for spec in specs {
        build(&mut b, spec)?;
    }
    Ok(b.finish())
}

pub fn forest_from_json(src: &str, path: &Path) -> Result<Forest> {
    let specs: Vec<DeclarationSpec> = from_str_with_path(src, path)?;
    Ok(forest_from_specs(&specs)?)
}

// ------------------------------- Loading ---------------------------------- //

pub fn load_file(path: &Path) -> Result<Forest> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let forest = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => forest_from_json(&source, path)?,
        _ => crate::scan::scan_str(&source, path)?,
    };
    tracing::info!(path = %path.display(), declarations = forest.len(), "loaded");
    Ok(forest)
}

/// Load every file, preserving input order.
pub fn load_all(paths: &[PathBuf]) -> Result<Vec<(PathBuf, Forest)>> {
    paths
        .par_iter()
        .map(|p| load_file(p).map(|forest| (p.clone(), forest)))
        .collect()
}

pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                return Err(Error::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }
    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //
