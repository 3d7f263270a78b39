//! Type-name normalization.
//!
//! Generated code refers to member types by their short names, so `A.B.List<C.D.Bar>` becomes
//! `List<Bar>`. The scan is flat: only the first generic argument list is considered, nested `<`
//! are not descended into, and with several arguments only the text after the last `.` of the
//! argument list survives (`A.B.Map<C.D.Key, E.F.Val>` becomes `Map<Val>`).

/// Strip namespace qualifiers from a type name.
///
/// ## Examples
///
/// ```
/// use recgen::backend::normalize::normalize_type_name;
///
/// assert_eq!(normalize_type_name("A.B.Foo"), "Foo");
/// assert_eq!(normalize_type_name("A.B.List<C.D.Bar>"), "List<Bar>");
/// assert_eq!(normalize_type_name("int"), "int");
/// ```
pub fn normalize_type_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();

    let mut type_namespace_end = 0;
    let mut arg_namespace_start = 0;
    let mut arg_namespace_end = 0;
    let mut in_argument = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_argument {
            if c == '.' {
                arg_namespace_end = i;
            }
            continue;
        }
        match c {
            '.' => type_namespace_end = i,
            '<' => {
                arg_namespace_start = i + 1;
                arg_namespace_end = i + 1;
                in_argument = true;
            }
            _ => {}
        }
    }

    // No qualified argument: nothing to cut out of the argument list.
    if arg_namespace_start == arg_namespace_end {
        arg_namespace_start = usize::MAX;
        arg_namespace_end = usize::MAX;
    }

    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            c != '.' && ((i >= type_namespace_end && i < arg_namespace_start) || i >= arg_namespace_end)
        })
        .map(|(_, &c)| c)
        .collect()
}

/// Remove every occurrence of the generator-internal namespace prefix.
///
/// An empty prefix leaves the name untouched.
pub fn strip_internal_namespace(name: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return name.to_string();
    }
    name.replace(prefix, "")
}
