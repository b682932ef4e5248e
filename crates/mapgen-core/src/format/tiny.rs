//! Tiny v1 reader.
//!
//! Tab separated. The header names the namespaces, rows are keyed by kind:
//!
//! ```text
//! v1	official	intermediary	named
//! CLASS	a	net/minecraft/class_1	net/minecraft/Foo
//! METHOD	a	(I)V	b	method_1	doThing
//! FIELD	a	I	c	field_1	count
//! ```

use super::numbered_lines;
use crate::error::{Error, Result};
use crate::tree::MappingTree;
use std::io::BufRead;

const FORMAT: &str = "tiny";

pub(super) fn parse<R: BufRead>(input: R) -> Result<MappingTree> {
    let mut lines = numbered_lines(input, FORMAT);

    let (_, header) = lines
        .next()
        .ok_or_else(|| Error::parse(FORMAT, 1, "missing header"))?;
    let header = header?;
    let mut cols = header.split('\t');
    if cols.next() != Some("v1") {
        return Err(Error::parse(FORMAT, 1, "expected 'v1' header"));
    }
    let namespaces: Vec<&str> = cols.collect();
    if namespaces.len() < 2 {
        return Err(Error::parse(FORMAT, 1, "header needs at least two namespaces"));
    }
    let width = namespaces.len();
    let mut tree = MappingTree::with_namespaces(namespaces);

    for (line_no, line) in lines {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let cols: Vec<&str> = line.split('\t').collect();
        let expect = |n: usize| {
            if cols.len() < n {
                Err(Error::parse(
                    FORMAT,
                    line_no,
                    format!("{} row needs {} columns, found {}", cols[0], n, cols.len()),
                ))
            } else {
                Ok(())
            }
        };

        match cols[0] {
            "CLASS" => {
                expect(1 + width)?;
                tree.add_class(cols[1..=width].iter().copied());
            }
            "METHOD" => {
                expect(3 + width)?;
                tree.add_method(cols[1], cols[3..3 + width].iter().copied(), cols[2]);
            }
            "FIELD" => expect(3 + width)?,
            other => {
                return Err(Error::parse(
                    FORMAT,
                    line_no,
                    format!("unknown row kind '{}'", other),
                ))
            }
        }
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const YARN: &str = "v1\tofficial\tintermediary\tnamed
# INTERMEDIARY-COUNTER class 1
CLASS\ta\tnet/minecraft/class_1\tnet/minecraft/Foo
METHOD\ta\t(I)V\tb\tmethod_1\tdoThing
FIELD\ta\tI\tc\tfield_1\tcount
";

    #[test]
    fn test_parse() {
        let tree = parse(YARN.as_bytes()).unwrap();
        assert_eq!(tree.namespaces(), ["official", "intermediary", "named"]);

        let intermediary = tree.namespace("intermediary").unwrap();
        let named = tree.namespace("named").unwrap();
        let class = tree.class("a").unwrap();
        assert_eq!(class.name(intermediary), "net/minecraft/class_1");
        assert_eq!(class.name(named), "net/minecraft/Foo");

        let method = tree.method("a", "b", "(I)V").unwrap();
        assert_eq!(method.name(intermediary), "method_1");
        assert_eq!(method.name(named), "doThing");
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            parse("CLASS\ta\tb\n".as_bytes()),
            Err(Error::Parse { line: 1, .. })
        ));
        assert!(parse("".as_bytes()).is_err());
    }

    #[test]
    fn test_short_row() {
        let err = parse("v1\tofficial\tnamed\nMETHOD\ta\t()V\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }
}
