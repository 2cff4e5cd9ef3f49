//! Structural traversal
//!
//! [`Renderer`] walks a value graph one [`Node`] at a time and appends the
//! rendering to a `String`. Each node goes through the same checks in order:
//!
//! 1. depth limit (the node is not even produced past it)
//! 2. invalid values
//! 3. text form from [`Dump::as_text`], except for channels and nil values
//! 4. channels, which are never descended into
//! 5. nil values
//! 6. reference check for pointers, which stops cycles
//! 7. dispatch on the node kind
//!
//! Per-call state lives in a [`RenderContext`] that the caller creates fresh
//! for every top-level dump, so renders on different threads never share
//! reference ids.

pub mod layout;
pub mod refs;
pub(crate) mod scalar;

use crate::color::{Colorizer, Role};
use crate::config::Config;
use crate::value::{Child, Dump, Node, Record};
use refs::{ReferenceTracker, Visit};
use scalar::{escape_control, format_complex, format_scalar, hex_dump};
use std::cmp::Ordering;

pub(crate) const INDENT_WIDTH: usize = 2;

/// Mutable state of one top-level dump call
#[derive(Debug, Default)]
pub struct RenderContext {
    pub refs: ReferenceTracker,
}

impl RenderContext {
    pub fn new() -> Self {
        RenderContext {
            refs: ReferenceTracker::new(),
        }
    }
}

pub struct Renderer<'c> {
    config: &'c Config,
    colors: &'c dyn Colorizer,
}

impl<'c> Renderer<'c> {
    pub fn new(config: &'c Config, colors: &'c dyn Colorizer) -> Self {
        Renderer { config, colors }
    }

    /// Render each value at depth 0, one per line
    pub fn render_all(&self, values: &[&dyn Dump], ctx: &mut RenderContext, out: &mut String) {
        for value in values {
            self.render(*value, 0, ctx, out);
            out.push('\n');
        }
    }

    pub fn render(
        &self,
        value: &dyn Dump,
        depth: usize,
        ctx: &mut RenderContext,
        out: &mut String,
    ) {
        if depth > self.config.max_depth {
            out.push_str(&self.paint(Role::Muted, "... (max depth)"));
            return;
        }

        let node = value.node();
        if let Node::Invalid = node {
            out.push_str(&self.paint(Role::Muted, "<invalid>"));
            return;
        }

        if !matches!(node, Node::Chan { .. } | Node::Nil) {
            if let Some(text) = value.as_text() {
                out.push_str(&self.paint(Role::Text, &escape_control(&text)));
                out.push_str(&self.paint(Role::Muted, &format!(" #{}", value.type_info())));
                return;
            }
        }

        match node {
            Node::Chan { addr } => {
                out.push_str(&self.paint(Role::Muted, &value.type_info().qualified()));
                out.push('(');
                out.push_str(&self.paint(Role::Number, &format!("{:#x}", addr)));
                out.push(')');
            }
            Node::Nil => {
                out.push_str(&self.paint(Role::Text, &value.type_info().qualified()));
                out.push_str(&self.paint(Role::Muted, "(nil)"));
            }
            Node::Pointer { addr, target } => {
                if !target.is_leaf() {
                    if let Visit::Seen(id) = ctx.refs.visit(addr, target.type_info()) {
                        out.push_str(&self.paint(Role::Reference, &format!("↩ &{}", id)));
                        return;
                    }
                }
                self.render(&*target, depth, ctx, out);
            }
            Node::Dynamic(inner) => self.render(&*inner, depth, ctx, out),
            Node::Struct(record) => self.render_struct(value, &record, depth, ctx, out),
            Node::Map {
                ordered, entries, ..
            } => {
                out.push_str("{\n");
                let rows = entries.map(|(key, val)| (self.key_text(&*key, 0), val));
                if !ordered && self.config.sort_map_keys {
                    let mut sorted: Vec<_> = rows.collect();
                    sorted.sort_by(|a, b| compare_keys(&a.0, &b.0));
                    self.render_entries(sorted.into_iter(), Role::Key, depth, ctx, out);
                } else {
                    self.render_entries(rows, Role::Key, depth, ctx, out);
                }
                indent(out, depth);
                out.push('}');
            }
            Node::Seq { items, .. } => {
                out.push_str("[\n");
                let rows = items.enumerate().map(|(i, item)| (i.to_string(), item));
                self.render_entries(rows, Role::Number, depth, ctx, out);
                indent(out, depth);
                out.push(']');
            }
            Node::Bytes { data, cap } => {
                let type_name = value.type_info().qualified();
                out.push_str(&hex_dump(&data, cap, &type_name, depth, self.colors));
            }
            Node::Func => out.push_str(&self.paint(Role::Muted, "func(...) {...}")),
            Node::Opaque { addr } => {
                let text = format!("{}({:#x})", value.type_info().qualified(), addr);
                out.push_str(&self.paint(Role::Muted, &text));
            }
            Node::Unreadable { reason } => {
                let text = format!("{}({})", value.type_info().qualified(), reason);
                out.push_str(&self.paint(Role::Muted, &text));
            }
            scalar => {
                let max_len = self.config.max_string_len;
                if let Some(text) = format_scalar(&scalar, max_len, self.colors) {
                    out.push_str(&text);
                }
            }
        }
    }

    fn render_struct(
        &self,
        value: &dyn Dump,
        record: &Record<'_>,
        depth: usize,
        ctx: &mut RenderContext,
        out: &mut String,
    ) {
        out.push_str(&self.paint(Role::Muted, &format!("#{}", value.type_info())));
        out.push('\n');

        for field in record.fields() {
            indent(out, depth + 1);
            out.push_str(&self.paint(Role::Marker, field.visibility.marker()));
            out.push_str(&field.name);
            out.push_str("\t=> ");
            let rendered =
                record.with_field(&field.path, &mut |v| self.render(v, depth + 1, ctx, out));
            if rendered.is_none() {
                out.push_str(&self.paint(Role::Muted, "<invalid>"));
            }
            out.push('\n');
        }

        indent(out, depth);
        out.push('}');
    }

    /// Write `label => value` rows up to the item limit. The closing bracket
    /// is left to the caller.
    fn render_entries<'v, I>(
        &self,
        rows: I,
        label_role: Role,
        depth: usize,
        ctx: &mut RenderContext,
        out: &mut String,
    ) where
        I: Iterator<Item = (String, Child<'v>)>,
    {
        for (i, (label, val)) in rows.enumerate() {
            indent(out, depth + 1);
            if i >= self.config.max_items {
                out.push_str(&self.paint(Role::Muted, "... (truncated)"));
                out.push('\n');
                break;
            }
            out.push_str(&self.paint(label_role, &label));
            out.push_str(" => ");
            self.render(&*val, depth + 1, ctx, out);
            out.push('\n');
        }
    }

    /// Plain text of a map key, used both as its label and its sort key
    fn key_text(&self, key: &dyn Dump, hops: usize) -> String {
        if hops > self.config.max_depth {
            return "...".to_string();
        }
        if let Some(text) = key.as_text() {
            return escape_control(&text).into_owned();
        }
        match key.node() {
            Node::Str(s) => escape_control(&s).into_owned(),
            Node::Bool(b) => b.to_string(),
            Node::Int(n) => n.to_string(),
            Node::Uint(n) => n.to_string(),
            Node::Float(f) => f.to_string(),
            Node::Complex { re, im } => format_complex(re, im),
            Node::Char(c) => escape_control(c.encode_utf8(&mut [0u8; 4])).into_owned(),
            Node::Pointer { target, .. } | Node::Dynamic(target) => {
                self.key_text(&*target, hops + 1)
            }
            Node::Struct(record) => {
                let parts: Vec<String> = record
                    .fields()
                    .iter()
                    .filter_map(|field| {
                        record.with_field(&field.path, &mut |v| self.key_text(v, hops + 1))
                    })
                    .collect();
                format!("({})", parts.join(", "))
            }
            Node::Seq { items, .. } => {
                let parts: Vec<String> =
                    items.map(|item| self.key_text(&*item, hops + 1)).collect();
                format!("[{}]", parts.join(" "))
            }
            Node::Nil => "<nil>".to_string(),
            _ => format!("#{}", key.type_info()),
        }
    }

    fn paint(&self, role: Role, text: &str) -> String {
        self.colors.colorize(role, text)
    }
}

fn indent(out: &mut String, depth: usize) {
    out.extend(std::iter::repeat(' ').take(depth * INDENT_WIDTH));
}

/// Numeric keys sort by value, everything else lexicographically
fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<i128>(), b.parse::<i128>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PlainColorizer;
    use crate::value::Visibility;
    use std::cell::RefCell;
    use std::collections::{BTreeMap, HashMap};
    use std::rc::Rc;

    fn render_with(config: &Config, values: &[&dyn Dump]) -> String {
        let mut out = String::new();
        let mut ctx = RenderContext::new();
        Renderer::new(config, &PlainColorizer).render_all(values, &mut ctx, &mut out);
        out
    }

    fn render(values: &[&dyn Dump]) -> String {
        render_with(&Config::default(), values)
    }

    struct Link {
        name: String,
        next: Option<Rc<RefCell<Link>>>,
    }

    impl Dump for Link {
        fn node(&self) -> Node<'_> {
            Node::Struct(
                Record::new()
                    .field("name", Visibility::Public, &self.name)
                    .field("next", Visibility::Private, &self.next),
            )
        }
    }

    #[test]
    fn test_compare_keys() {
        assert_eq!(compare_keys("2", "10"), Ordering::Less);
        assert_eq!(compare_keys("b", "a"), Ordering::Greater);
        assert_eq!(compare_keys("10", "a"), Ordering::Less);
    }

    #[test]
    fn test_struct_fields_and_markers() {
        let link = Link {
            name: "head".to_string(),
            next: None,
        };
        let out = render(&[&link]);
        assert!(out.starts_with("#tests::Link\n"), "{}", out);
        assert!(out.contains("  +name\t=> \"head\"\n"));
        assert!(out.contains("  -next\t=> Option<Rc<RefCell<tests::Link>>>(nil)\n"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_cycle_is_broken_with_back_reference() {
        let head = Rc::new(RefCell::new(Link {
            name: "a".to_string(),
            next: None,
        }));
        head.borrow_mut().next = Some(Rc::clone(&head));

        let out = render(&[&head]);
        assert!(out.contains("↩ &1"), "{}", out);
        assert_eq!(out.matches("+name").count(), 1);

        head.borrow_mut().next = None;
    }

    #[test]
    fn test_depth_limit() {
        let config = Config {
            max_depth: 1,
            ..Config::default()
        };
        let nested = vec![vec![vec![1]]];
        let out = render_with(&config, &[&nested]);
        assert!(out.contains("... (max depth)"), "{}", out);
        assert!(!out.contains("0 => 1"));
    }

    #[test]
    fn test_item_limit() {
        let config = Config {
            max_items: 2,
            ..Config::default()
        };
        let out = render_with(&config, &[&vec![10, 20, 30, 40]]);
        assert!(out.contains("  1 => 20\n"));
        assert!(!out.contains("2 => 30"));
        assert_eq!(out.matches("... (truncated)").count(), 1);
    }

    #[test]
    fn test_unordered_maps_are_sorted() {
        let map: HashMap<i32, &str> = [(10, "ten"), (2, "two"), (1, "one")].into_iter().collect();
        let out = render(&[&map]);
        let one = out.find("1 => ").unwrap();
        let two = out.find("2 => ").unwrap();
        let ten = out.find("10 => ").unwrap();
        assert!(one < two && two < ten, "{}", out);
    }

    #[test]
    fn test_ordered_map_keeps_order() {
        let map: BTreeMap<&str, u8> = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(render(&[&map]), "{\n  a => 1\n  b => 2\n}\n");
    }

    #[test]
    fn test_shared_leaf_is_not_a_back_reference() {
        let shared = Rc::new(7i32);
        let pair = (Rc::clone(&shared), Rc::clone(&shared));
        let out = render(&[&pair]);
        assert_eq!(out.matches("=> 7").count(), 2);
        assert!(!out.contains('↩'));
    }

    #[test]
    fn test_handles_and_invalid() {
        struct Nothing;
        impl Dump for Nothing {
            fn node(&self) -> Node<'_> {
                Node::Invalid
            }
        }

        let f: fn() -> u8 = || 1;
        assert_eq!(render(&[&Nothing]), "<invalid>\n");
        assert_eq!(render(&[&f]), "func(...) {...}\n");
    }

    #[test]
    fn test_text_form_replaces_structure() {
        let d = std::time::Duration::from_millis(1500);
        assert_eq!(render(&[&d]), "1.5s #Duration\n");
    }

    #[test]
    fn test_ids_restart_per_context() {
        let head = Rc::new(RefCell::new(Link {
            name: "a".to_string(),
            next: None,
        }));
        head.borrow_mut().next = Some(Rc::clone(&head));

        let first = render(&[&head]);
        let second = render(&[&head]);
        assert_eq!(first, second);

        head.borrow_mut().next = None;
    }
}
