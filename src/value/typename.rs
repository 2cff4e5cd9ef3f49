//! Type name shortening
//!
//! `std::any::type_name` reports full paths such as
//! `alloc::vec::Vec<core::option::Option<app::model::User>>`. For display we
//! keep one module segment of user paths and drop the module path of
//! standard library types: `Vec<Option<model::User>>`.

const STD_ROOTS: [&str; 3] = ["std", "core", "alloc"];

/// Shorten every path inside a (possibly generic) type name
pub fn qualify(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut segment_start = None;

    for (i, c) in path.char_indices() {
        let in_path = c.is_alphanumeric() || c == '_' || c == ':';
        match (in_path, segment_start) {
            (true, None) => segment_start = Some(i),
            (false, Some(start)) => {
                out.push_str(&shorten(&path[start..i]));
                segment_start = None;
                out.push(c);
            }
            (false, None) => out.push(c),
            (true, Some(_)) => {}
        }
    }
    if let Some(start) = segment_start {
        out.push_str(&shorten(&path[start..]));
    }
    out
}

fn shorten(run: &str) -> String {
    let segments: Vec<&str> = run.split("::").filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => run.to_string(),
        [single] => single.to_string(),
        [root, .., last] if STD_ROOTS.contains(root) => last.to_string(),
        [.., module, last] => format!("{}::{}", module, last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_paths_are_bare() {
        assert_eq!(qualify("alloc::string::String"), "String");
        assert_eq!(qualify("alloc::vec::Vec<u8>"), "Vec<u8>");
        assert_eq!(qualify("i32"), "i32");
    }

    #[test]
    fn test_user_paths_keep_one_module() {
        assert_eq!(qualify("app::model::User"), "model::User");
        assert_eq!(
            qualify("core::option::Option<alloc::boxed::Box<app::list::Node>>"),
            "Option<Box<list::Node>>"
        );
    }

    #[test]
    fn test_punctuation_is_preserved() {
        assert_eq!(qualify("&[u8; 4]"), "&[u8; 4]");
        assert_eq!(
            qualify("(alloc::string::String, *const app::x::Y)"),
            "(String, *const x::Y)"
        );
        assert_eq!(qualify("dyn app::value::Dump"), "dyn value::Dump");
    }
}
