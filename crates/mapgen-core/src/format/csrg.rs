//! Compact SRG reader.
//!
//! One mapping per line, whitespace separated:
//!
//! ```text
//! a net/minecraft/server/Foo          class
//! a b fieldName                        field
//! a c (La;)V methodName                method
//! ```

use super::{numbered_lines, DEFAULT_NAMESPACES};
use crate::error::{Error, Result};
use crate::tree::MappingTree;
use std::io::BufRead;

const FORMAT: &str = "csrg";

pub(super) fn parse<R: BufRead>(input: R) -> Result<MappingTree> {
    let mut tree = MappingTree::with_namespaces(DEFAULT_NAMESPACES);

    for (line_no, line) in numbered_lines(input, FORMAT) {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let cols: Vec<&str> = line.split_whitespace().collect();
        match cols.as_slice() {
            [src, dst] => tree.add_class([*src, *dst]),
            [_owner, _src, _dst] => {}
            [owner, src, desc, dst] => {
                if !desc.starts_with('(') {
                    return Err(Error::parse(
                        FORMAT,
                        line_no,
                        format!("invalid method descriptor '{}'", desc),
                    ));
                }
                tree.add_method(owner, [*src, *dst], *desc);
            }
            _ => {
                return Err(Error::parse(
                    FORMAT,
                    line_no,
                    format!("expected 2 to 4 columns, found {}", cols.len()),
                ))
            }
        }
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classes_and_methods() {
        let input = "\
# header
a net/minecraft/server/Foo
a b someField
a c (La;)V doThing
";
        let tree = parse(input.as_bytes()).unwrap();
        let target = tree.namespace("target").unwrap();

        assert_eq!(tree.namespaces(), DEFAULT_NAMESPACES);
        assert_eq!(tree.class("a").unwrap().name(target), "net/minecraft/server/Foo");
        assert_eq!(tree.method("a", "c", "(La;)V").unwrap().name(target), "doThing");
        assert_eq!(tree.method_count(), 1);
    }

    #[test]
    fn test_rejects_bad_descriptor() {
        let err = parse("a c V doThing\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_rejects_single_column() {
        assert!(parse("lonely\n".as_bytes()).is_err());
    }
}
