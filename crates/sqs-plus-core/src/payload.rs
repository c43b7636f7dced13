//! Discovers message payloads on disk.
//!
//! A file holds either a single JSON object or one JSON object per line
//! (JSON-lines). A directory is searched recursively for `*.json` files which
//! are read in sorted path order.

use std::path::{Path, PathBuf};

use serde_json::{Deserializer, Map, Value};

use crate::error::{DocumentError, Error, Result};

/// Where to read messages from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    Directory(PathBuf),
}

/// Location a payload was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
    pub path: PathBuf,
    /// Set for payloads read from a JSON-lines file.
    pub line: Option<usize>,
}

/// A single JSON object to be sent as one message.
#[derive(Clone, Debug, PartialEq)]
pub struct Payload {
    pub body: Map<String, Value>,
    pub origin: Origin,
}

impl Payload {
    /// Compact JSON with object keys in sorted order.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.body).map_err(Error::Encode)
    }
}

/// Outcome of reading a whole file as one JSON document.
#[derive(Debug, PartialEq)]
pub enum Document {
    /// Nothing but whitespace.
    Empty,
    Single(Map<String, Value>),
    /// More than one top-level value; the file should be read line by line.
    Multiple,
}

/// Parses `content` as exactly one JSON object.
pub fn parse_whole_file(content: &str) -> std::result::Result<Document, DocumentError> {
    let mut stream = Deserializer::from_str(content).into_iter::<Value>();

    let first = match stream.next() {
        None => return Ok(Document::Empty),
        Some(value) => value.map_err(|source| DocumentError::Syntax {
            line: source.line(),
            source,
        })?,
    };

    if stream.next().is_some() {
        return Ok(Document::Multiple);
    }

    into_object(first, 1).map(Document::Single)
}

/// Parses `content` as JSON-lines, skipping blank lines.
///
/// Returns each object with its 1-based line number. The first malformed line
/// fails the whole file.
pub fn parse_lines(
    content: &str,
) -> std::result::Result<Vec<(usize, Map<String, Value>)>, DocumentError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let line_number = index + 1;
            let value = serde_json::from_str::<Value>(line).map_err(|source| {
                DocumentError::Syntax {
                    line: line_number,
                    source,
                }
            })?;
            into_object(value, line_number).map(|object| (line_number, object))
        })
        .collect()
}

fn into_object(value: Value, line: usize) -> std::result::Result<Map<String, Value>, DocumentError> {
    let found = match value {
        Value::Object(object) => return Ok(object),
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
    };
    Err(DocumentError::NotAnObject { line, found })
}

/// Reads the payloads in a single file.
pub fn parse_file(path: &Path) -> Result<Vec<Payload>> {
    // the handle is closed before parsing starts
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |source| Error::Parse {
        path: path.to_path_buf(),
        source,
    };

    let payloads = match parse_whole_file(&content).map_err(parse_error)? {
        Document::Empty => Vec::new(),
        Document::Single(body) => vec![Payload {
            body,
            origin: Origin {
                path: path.to_path_buf(),
                line: None,
            },
        }],
        Document::Multiple => parse_lines(&content)
            .map_err(parse_error)?
            .into_iter()
            .map(|(line, body)| Payload {
                body,
                origin: Origin {
                    path: path.to_path_buf(),
                    line: Some(line),
                },
            })
            .collect(),
    };

    log::debug!("{}: {} payload(s)", path.display(), payloads.len());
    Ok(payloads)
}

/// Lists every `*.json` file below `dir`, sorted by path.
pub fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/**/*.json",
        glob::Pattern::escape(&dir.to_string_lossy())
    );

    let entries = glob::glob(&pattern).map_err(|source| Error::Pattern {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Reads every payload from `input`.
///
/// Nothing is returned unless every file parses.
pub fn discover(input: &Input) -> Result<Vec<Payload>> {
    match input {
        Input::File(path) => {
            if !path.exists() {
                return Err(Error::PathNotFound(path.clone()));
            }
            if path.is_dir() {
                return Err(Error::NotAFile(path.clone()));
            }
            parse_file(path)
        }
        Input::Directory(path) => {
            if !path.exists() {
                return Err(Error::PathNotFound(path.clone()));
            }
            if !path.is_dir() {
                return Err(Error::NotADirectory(path.clone()));
            }

            let files = json_files(path)?;
            log::debug!("found {} json file(s) in {}", files.len(), path.display());

            let mut payloads = Vec::new();
            for file in &files {
                payloads.extend(parse_file(file)?);
            }
            Ok(payloads)
        }
    }
}
