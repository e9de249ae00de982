//! Utilities for `String` and `str`

/// Strips module paths from a type name produced by [`std::any::type_name`]
///
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`
pub(crate) fn short_type_name(full: &str) -> String {
    let mut short = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                short.truncate(segment_start);
            },
            ch if ch.is_alphanumeric() || ch == '_' => short.push(ch),
            ch => {
                short.push(ch);
                segment_start = short.len();
            }
        }
    }
    short
}

#[cfg(test)]
mod tests {
    use super::short_type_name;

    #[test]
    fn it_strips_module_path() {
        assert_eq!(short_type_name("alloc::string::String"), "String");
    }

    #[test]
    fn it_keeps_primitive_names() {
        assert_eq!(short_type_name("i32"), "i32");
        assert_eq!(short_type_name("&str"), "&str");
    }

    #[test]
    fn it_strips_generic_arguments() {
        assert_eq!(
            short_type_name("std::collections::hash::map::HashMap<alloc::string::String, i32>"),
            "HashMap<String, i32>"
        );
    }

    #[test]
    fn it_strips_tuple_members() {
        assert_eq!(short_type_name("(u8, alloc::vec::Vec<u8>)"), "(u8, Vec<u8>)");
    }

    #[test]
    fn it_strips_trait_objects() {
        assert_eq!(
            short_type_name("alloc::sync::Arc<dyn my_crate::cache::Cache>"),
            "Arc<dyn Cache>"
        );
    }
}
