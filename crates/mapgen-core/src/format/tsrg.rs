//! TSRG reader (v1 and v2).
//!
//! Class lines start at column zero; member lines are indented by one tab and
//! belong to the preceding class. A v2 file opens with a header naming its
//! namespaces (`tsrg2 obf srg id`) and may carry doubly-indented parameter and
//! `static` lines, which are ignored.

use super::{numbered_lines, DEFAULT_NAMESPACES};
use crate::error::{Error, Result};
use crate::tree::MappingTree;
use std::io::BufRead;

const FORMAT: &str = "tsrg";

pub(super) fn parse<R: BufRead>(input: R) -> Result<MappingTree> {
    let mut parsed: Option<MappingTree> = None;
    let mut width = DEFAULT_NAMESPACES.len();
    let mut current_class: Option<String> = None;

    for (line_no, line) in numbered_lines(input, FORMAT) {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        if parsed.is_none() {
            if let Some(header) = line.strip_prefix("tsrg2 ") {
                let namespaces: Vec<&str> = header.split_whitespace().collect();
                if namespaces.len() < 2 {
                    return Err(Error::parse(
                        FORMAT,
                        line_no,
                        "tsrg2 header needs at least two namespaces",
                    ));
                }
                width = namespaces.len();
                parsed = Some(MappingTree::with_namespaces(namespaces));
                continue;
            }
        }
        let tree = parsed.get_or_insert_with(|| MappingTree::with_namespaces(DEFAULT_NAMESPACES));

        if line.starts_with("\t\t") {
            continue;
        }

        let cols: Vec<&str> = line.split_whitespace().collect();

        if line.starts_with('\t') || line.starts_with(' ') {
            let Some(owner) = current_class.as_deref() else {
                return Err(Error::parse(FORMAT, line_no, "member line before any class"));
            };

            if cols.len() == width + 1 && cols[1].starts_with('(') {
                let mut names = Vec::with_capacity(width);
                names.push(cols[0]);
                names.extend_from_slice(&cols[2..]);
                tree.add_method(owner, names, cols[1]);
            } else if cols.len() != width && cols.len() != width + 1 {
                return Err(Error::parse(
                    FORMAT,
                    line_no,
                    format!("expected {} or {} member columns, found {}", width, width + 1, cols.len()),
                ));
            }
            continue;
        }

        if cols.len() != width {
            return Err(Error::parse(
                FORMAT,
                line_no,
                format!("expected {} class columns, found {}", width, cols.len()),
            ));
        }

        // v1 package mappings
        if cols[0].ends_with('/') {
            current_class = None;
            continue;
        }

        tree.add_class(cols.iter().copied());
        current_class = Some(cols[0].to_string());
    }

    Ok(parsed.unwrap_or_else(|| MappingTree::with_namespaces(DEFAULT_NAMESPACES)))
}
