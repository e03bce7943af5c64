use serde::Deserialize;
use thiserror::Error;

use crate::model::{FrameGraph, FrameNode};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no valid frames found")]
    Empty,
}

/// Sniff the input format and parse it: JSON documents start with `{`,
/// anything else is treated as collapsed stacks.
pub fn parse_auto(data: &[u8]) -> Result<FrameGraph, LoadError> {
    let first = data.iter().find(|b| !b.is_ascii_whitespace());
    match first {
        Some(b'{') => parse_json(data),
        _ => parse_collapsed(data),
    }
}

#[derive(Debug, Deserialize)]
struct GraphDoc {
    name: Option<String>,
    #[serde(default)]
    inverted: bool,
    frames: Vec<FrameDoc>,
}

#[derive(Debug, Deserialize)]
struct FrameDoc {
    name: String,
    start: f64,
    end: f64,
    depth: u32,
    #[serde(default)]
    parent: Option<u64>,
}

/// Parse the emberpane JSON frame-list document. Frame ids are assigned by
/// position; frames with a negative extent are dropped.
pub fn parse_json(data: &[u8]) -> Result<FrameGraph, LoadError> {
    let doc: GraphDoc = serde_json::from_slice(data)?;

    let frames: Vec<FrameNode> = doc
        .frames
        .into_iter()
        .enumerate()
        .filter(|(_, f)| f.end >= f.start && f.start.is_finite() && f.end.is_finite())
        .map(|(i, f)| FrameNode {
            id: i as u64,
            name: f.name.into(),
            start: f.start,
            end: f.end,
            depth: f.depth,
            parent: f.parent,
        })
        .collect();

    if frames.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut graph = FrameGraph::from_frames(doc.name, frames);
    graph.inverted = doc.inverted;
    Ok(graph)
}

/// Parse Brendan Gregg's collapsed/folded stack format:
/// `frame;frame;... count` per line. Each sample becomes a nested run of
/// frames with extent equal to its count, laid out left to right.
pub fn parse_collapsed(data: &[u8]) -> Result<FrameGraph, LoadError> {
    let text = std::str::from_utf8(data)?;

    let mut frames: Vec<FrameNode> = Vec::new();
    let mut next_id: u64 = 0;
    let mut offset: f64 = 0.0;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some(pos) = line.rfind(' ') else {
            continue;
        };
        let count: f64 = line[pos + 1..].trim().parse().unwrap_or(1.0);
        let stack = line[..pos].trim();
        if stack.is_empty() || count <= 0.0 {
            continue;
        }

        let mut parent: Option<u64> = None;
        for (depth, name) in stack.split(';').enumerate() {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let id = next_id;
            next_id += 1;
            frames.push(FrameNode {
                id,
                name: name.into(),
                start: offset,
                end: offset + count,
                depth: depth as u32,
                parent,
            });
            parent = Some(id);
        }
        offset += count;
    }

    if frames.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(FrameGraph::from_frames(None, frames))
}
