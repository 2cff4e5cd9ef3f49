//! Inspectable value model
//!
//! This module defines the [`Dump`] trait and the [`Node`] enum it produces.
//! A `Node` is a one-level, lazily produced view of a value: children are
//! handed out as [`Child`] handles and only materialize their own nodes when
//! the renderer descends into them, so nothing past the depth limit is read.
//!
//! # Node Kinds
//!
//! - Scalars: [`Node::Bool`], [`Node::Int`], [`Node::Uint`], [`Node::Float`],
//!   [`Node::Complex`], [`Node::Char`], [`Node::Str`]
//! - [`Node::Bytes`]: byte buffers, rendered as a hex dump
//! - [`Node::Pointer`]: an addressable pointer; its target participates in
//!   cycle detection
//! - [`Node::Dynamic`]: a transparent container (`Option`, cells, guards)
//! - [`Node::Struct`]: named fields with visibility, see [`record`]
//! - [`Node::Map`] / [`Node::Seq`]: collections, iterated lazily
//! - [`Node::Chan`], [`Node::Func`], [`Node::Opaque`]: handles that are
//!   never descended into
//! - [`Node::Nil`], [`Node::Invalid`], [`Node::Unreadable`]: absent or
//!   unavailable values
//!
//! Implementations for the standard library live in `impls`; user structs
//! are usually covered with [`dump_struct!`](crate::dump_struct).

mod impls;
pub mod record;
pub mod typename;

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;
use std::ops::Deref;

pub use record::{FieldDescriptor, Record, Visibility};

/// A value that can be inspected by the renderer
pub trait Dump: AsChild {
    /// Runtime type descriptor of this value
    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<Self>()
    }

    /// One-level view of this value
    fn node(&self) -> Node<'_>;

    /// Self-describing text form. When present it replaces structural output.
    fn as_text(&self) -> Option<String> {
        None
    }

    /// Leaf values (numbers, strings) cannot close a reference cycle, so
    /// pointers to them are not tracked.
    fn is_leaf(&self) -> bool {
        false
    }

    /// Node for a slice of `Self`. Overridden by `u8` to produce a hex dump.
    #[doc(hidden)]
    fn slice_node(items: &[Self], cap: usize) -> Node<'_>
    where
        Self: Sized,
    {
        let _ = cap;
        Node::Seq {
            len: items.len(),
            items: Box::new(items.iter().map(|item| Child::Borrowed(item))),
        }
    }

    /// Node for a ring buffer of `Self`, see [`Dump::slice_node`]
    #[doc(hidden)]
    fn deque_node(items: &VecDeque<Self>) -> Node<'_>
    where
        Self: Sized,
    {
        Node::seq(items.len(), items.iter().map(|item| Child::Borrowed(item)))
    }
}

/// Upcast to a [`Child`] handle. Sized types borrow themselves; unsized
/// types (`str`, slices, `Path`) go through a sized forwarding view.
pub trait AsChild {
    fn as_child(&self) -> Child<'_>;
}

impl<T: Dump> AsChild for T {
    fn as_child(&self) -> Child<'_> {
        Child::Borrowed(self)
    }
}

/// Lazily iterated sequence items
pub type Items<'a> = Box<dyn Iterator<Item = Child<'a>> + 'a>;

/// Lazily iterated map entries
pub type Entries<'a> = Box<dyn Iterator<Item = (Child<'a>, Child<'a>)> + 'a>;

/// One-level view of an inspected value
pub enum Node<'a> {
    /// No value at all
    Invalid,
    /// Absent pointer, option, handle or callable
    Nil,
    Bool(bool),
    Int(i128),
    Uint(u128),
    Float(f64),
    Complex {
        re: f64,
        im: f64,
    },
    Char(char),
    Str(Cow<'a, str>),
    Bytes {
        data: Cow<'a, [u8]>,
        cap: usize,
    },
    Pointer {
        addr: usize,
        target: Child<'a>,
    },
    Dynamic(Child<'a>),
    Struct(Record<'a>),
    Map {
        len: usize,
        /// Whether the iteration order is meaningful (e.g. `BTreeMap`)
        ordered: bool,
        entries: Entries<'a>,
    },
    Seq {
        len: usize,
        items: Items<'a>,
    },
    Chan {
        addr: usize,
    },
    Func,
    Opaque {
        addr: usize,
    },
    /// Content exists but cannot be read right now (lock held, cell borrowed)
    Unreadable {
        reason: &'static str,
    },
}

impl<'a> Node<'a> {
    /// Build a sequence node from any iterator of children
    pub fn seq<I>(len: usize, items: I) -> Self
    where
        I: Iterator<Item = Child<'a>> + 'a,
    {
        Node::Seq {
            len,
            items: Box::new(items),
        }
    }

    /// Build a map node from any iterator of key/value children
    pub fn map<I>(len: usize, ordered: bool, entries: I) -> Self
    where
        I: Iterator<Item = (Child<'a>, Child<'a>)> + 'a,
    {
        Node::Map {
            len,
            ordered,
            entries: Box::new(entries),
        }
    }

    /// Short kind name, used in logs and tests
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Invalid => "invalid",
            Node::Nil => "nil",
            Node::Bool(_) => "bool",
            Node::Int(_) => "int",
            Node::Uint(_) => "uint",
            Node::Float(_) => "float",
            Node::Complex { .. } => "complex",
            Node::Char(_) => "char",
            Node::Str(_) => "string",
            Node::Bytes { .. } => "bytes",
            Node::Pointer { .. } => "pointer",
            Node::Dynamic(_) => "dynamic",
            Node::Struct(_) => "struct",
            Node::Map { .. } => "map",
            Node::Seq { .. } => "seq",
            Node::Chan { .. } => "chan",
            Node::Func => "func",
            Node::Opaque { .. } => "opaque",
            Node::Unreadable { .. } => "unreadable",
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node::{}", self.kind())
    }
}

/// Handle to a child value: borrowed from the parent, or owned when the
/// parent has to produce it on the fly (borrow guards, copied cells).
pub enum Child<'a> {
    Borrowed(&'a dyn Dump),
    Owned(Box<dyn Dump + 'a>),
}

impl<'a> Child<'a> {
    pub fn owned<T: Dump + 'a>(value: T) -> Self {
        Child::Owned(Box::new(value))
    }
}

impl<'a> Deref for Child<'a> {
    type Target = dyn Dump + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            Child::Borrowed(value) => *value,
            Child::Owned(value) => &**value,
        }
    }
}

/// Runtime type descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    path: &'static str,
}

impl TypeInfo {
    pub fn of<T: ?Sized>() -> Self {
        TypeInfo {
            path: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified path as reported by the compiler
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Display name: `module::Type`, with standard library paths reduced to
    /// the bare type name
    pub fn qualified(&self) -> String {
        typename::qualify(self.path)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}
