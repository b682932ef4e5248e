//! Proguard mapping reader.
//!
//! ```text
//! com.example.Foo -> a:
//!     com.example.Bar field -> b
//!     12:14:void run(int,com.example.Bar):30:32 -> c
//! ```
//!
//! The file lists the original (official) name first, so namespace 0 is the
//! official name and namespace 1 the obfuscated one. Java signatures are
//! converted to descriptors in the official namespace. Inlined frames, whose
//! method names are qualified with another class, are skipped.
//!
//! Line syntax is handled by the `proguard` crate; this module only turns its
//! records into a [`MappingTree`].

use super::DEFAULT_NAMESPACES;
use crate::error::{Error, Result};
use crate::tree::{java_method_descriptor, MappingTree};
use ::proguard::{ProguardMapping, ProguardRecord};
use std::io::Read;

const FORMAT: &str = "proguard";

fn internal(name: &str) -> String {
    name.replace('.', "/")
}

/// 1-based line of `fragment`, which must point into `source`
fn line_of(source: &[u8], fragment: &[u8]) -> usize {
    let offset = (fragment.as_ptr() as usize)
        .saturating_sub(source.as_ptr() as usize)
        .min(source.len());
    source[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

pub(super) fn parse<R: Read>(mut input: R) -> Result<MappingTree> {
    let mut source = Vec::new();
    input.read_to_end(&mut source)?;

    let mut tree = MappingTree::with_namespaces(DEFAULT_NAMESPACES);
    let mut current_class: Option<String> = None;

    for record in ProguardMapping::new(&source).iter() {
        let record = record.map_err(|e| {
            Error::parse(
                FORMAT,
                line_of(&source, e.line()),
                format!("{:?}", e.kind()),
            )
        })?;

        match record {
            ProguardRecord::Class {
                original,
                obfuscated,
                ..
            } => {
                let official = internal(original);
                tree.add_class([official.clone(), internal(obfuscated)]);
                current_class = Some(official);
            }
            ProguardRecord::Field { obfuscated, .. } => {
                if current_class.is_none() {
                    return Err(Error::parse(
                        FORMAT,
                        line_of(&source, obfuscated.as_bytes()),
                        "member line before any class",
                    ));
                }
            }
            ProguardRecord::Method {
                ty,
                original,
                obfuscated,
                arguments,
                original_class,
                ..
            } => {
                let line = line_of(&source, obfuscated.as_bytes());
                let Some(owner) = current_class.as_deref() else {
                    return Err(Error::parse(FORMAT, line, "member line before any class"));
                };
                // inlined frame of another method
                if original_class.is_some() {
                    continue;
                }
                let Some(descriptor) = java_method_descriptor(ty, arguments) else {
                    return Err(Error::parse(
                        FORMAT,
                        line,
                        format!("invalid signature '{} {}({})'", ty, original, arguments),
                    ));
                };
                tree.add_method(owner, [original, obfuscated], descriptor);
            }
            _ => {}
        }
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MOJANG: &str = "\
# {\"id\":\"sourceFile\",\"fileName\":\"Foo.java\"}
com.example.Foo -> a:
    com.example.Bar field -> b
    12:14:void run(int,com.example.Bar):30:32 -> c
    15:15:void run(int,com.example.Bar):33:33 -> c
    java.lang.String name() -> d
    16:16:void com.example.Other.inlined():40:40 -> e
com.example.Bar -> b:
";

    #[test]
    fn test_parse() {
        let tree = parse(MOJANG.as_bytes()).unwrap();
        let target = tree.namespace("target").unwrap();

        assert_eq!(tree.class("com/example/Foo").unwrap().name(target), "a");
        assert_eq!(
            tree.method("com/example/Foo", "run", "(ILcom/example/Bar;)V")
                .unwrap()
                .name(target),
            "c"
        );
        assert_eq!(
            tree.method("com/example/Foo", "name", "()Ljava/lang/String;")
                .unwrap()
                .name(target),
            "d"
        );
        // repeated line ranges collapse, inlined frames are dropped
        assert_eq!(tree.method_count(), 2);
    }

    #[test]
    fn test_missing_separator() {
        let err = parse("com.example.Foo a:\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let input = "com.example.Foo -> a:\n    void run() -> c\nnot a mapping line\n";
        let err = parse(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse {
                format: "proguard",
                line: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_member_before_class() {
        let err = parse("    int x -> a\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }
}
