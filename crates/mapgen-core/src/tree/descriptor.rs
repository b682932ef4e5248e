//! JVM descriptor helpers.
//!
//! Descriptors are stored in internal (`/`-separated) form, e.g.
//! `(ILjava/lang/String;)V`. Proguard sources spell signatures as Java source
//! types and are converted here before they reach the tree.

/// Rewrites every class reference (`L...;`) in a descriptor through `map`.
///
/// References `map` returns `None` for are kept verbatim, so JDK types and
/// anything the tree does not know about pass through untouched.
pub fn remap_descriptor<'a, F>(desc: &str, map: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(desc.len());
    let mut rest = desc;

    while let Some(start) = rest.find('L') {
        out.push_str(&rest[..=start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find(';') else {
            // Unterminated reference; keep the tail as-is
            out.push_str(after);
            return out;
        };
        let class = &after[..end];
        out.push_str(map(class).unwrap_or(class));
        out.push(';');
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Converts a Java source type (`int`, `java.lang.String[]`) into a field descriptor.
///
/// Returns `None` for an empty or otherwise unusable type name.
pub fn java_type_to_descriptor(ty: &str) -> Option<String> {
    let ty = ty.trim();
    let mut base = ty;
    let mut dims = 0;
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped;
        dims += 1;
    }
    if base.is_empty() {
        return None;
    }

    let mut desc = "[".repeat(dims);
    match base {
        "void" => desc.push('V'),
        "boolean" => desc.push('Z'),
        "byte" => desc.push('B'),
        "char" => desc.push('C'),
        "short" => desc.push('S'),
        "int" => desc.push('I'),
        "long" => desc.push('J'),
        "float" => desc.push('F'),
        "double" => desc.push('D'),
        class => {
            if class.contains(char::is_whitespace) {
                return None;
            }
            desc.push('L');
            desc.push_str(&class.replace('.', "/"));
            desc.push(';');
        }
    }
    Some(desc)
}

/// Builds a method descriptor from a Java return type and a comma-separated argument list.
pub fn java_method_descriptor(return_type: &str, args: &str) -> Option<String> {
    let mut desc = String::from("(");
    for arg in args.split(',').map(str::trim).filter(|a| !a.is_empty()) {
        desc.push_str(&java_type_to_descriptor(arg)?);
    }
    desc.push(')');
    desc.push_str(&java_type_to_descriptor(return_type)?);
    Some(desc)
}

/// Converts an internal (`/`-separated) name into its dotted form.
pub fn to_dotted(name: &str) -> String {
    name.replace('/', ".")
}
