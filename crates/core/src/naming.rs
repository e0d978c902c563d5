/// Separator used between a type and its members (methods, fields, constructors).
pub const MEMBER_SEPARATOR: char = '#';

/// Separator used between packages and between package/class.
pub const TYPE_SEPARATOR: char = '.';

/// Build a qualified name for a member (method, field, or constructor).
///
/// # Examples
/// ```
/// use symscope_core::naming::build_member_fqn;
/// assert_eq!(build_member_fqn("geo.Point", "x"), "geo.Point#x");
/// ```
pub fn build_member_fqn(type_fqn: &str, member_name: &str) -> String {
    format!("{}{}{}", type_fqn, MEMBER_SEPARATOR, member_name)
}

/// Everything before the last dotted segment, if there is one.
pub fn parent_name(qualified_name: &str) -> Option<&str> {
    qualified_name
        .rfind(TYPE_SEPARATOR)
        .map(|pos| &qualified_name[..pos])
}

/// Joins a package and a (possibly nested) class name.
pub fn qualify(package: &str, class_name: &str) -> String {
    if package.is_empty() {
        class_name.to_string()
    } else {
        format!("{}{}{}", package, TYPE_SEPARATOR, class_name)
    }
}
