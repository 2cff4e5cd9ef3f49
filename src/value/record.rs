//! Struct records and field descriptors
//!
//! A [`Record`] lists the members of a struct-like value in declaration
//! order. Members added with [`Record::embed`] are composition: their own
//! fields are promoted into the containing record's field list.
//!
//! # Field Resolution
//!
//! [`Record::fields`] flattens the member tree into [`FieldDescriptor`]s.
//! Each descriptor carries the full member path from the outer record, and
//! [`Record::with_field`] fetches the value by walking that path, so field
//! names and values can never get out of step when embedded members are
//! mixed with direct ones.
//!
//! Promotion rules:
//! - a field at a shallower embedding depth hides promoted fields of the
//!   same name
//! - two promoted fields with the same name at the same depth are ambiguous
//!   and both omitted
//! - a promoted field is public only if every member on its path is public

use super::{Child, Dump, Node};
use rustc_hash::FxHashMap;
use std::borrow::Cow;

/// Field accessibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }

    /// Marker printed in front of the field name
    pub fn marker(self) -> &'static str {
        match self {
            Visibility::Public => "+",
            Visibility::Private => "-",
        }
    }
}

/// A flattened, resolved field of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: Cow<'static, str>,
    pub visibility: Visibility,
    /// Member indices from the outer record down to the field
    pub path: Vec<usize>,
}

struct Member<'a> {
    name: Cow<'static, str>,
    visibility: Visibility,
    embedded: bool,
    value: Child<'a>,
}

/// Members of a struct-like value
#[derive(Default)]
pub struct Record<'a> {
    members: Vec<Member<'a>>,
}

impl<'a> Record<'a> {
    pub fn new() -> Self {
        Record {
            members: Vec::new(),
        }
    }

    /// Add a field borrowed from the inspected value
    pub fn field(
        self,
        name: impl Into<Cow<'static, str>>,
        visibility: Visibility,
        value: &'a dyn Dump,
    ) -> Self {
        self.push(name.into(), visibility, false, Child::Borrowed(value))
    }

    /// Add a field computed on the fly
    pub fn field_owned<T: Dump + 'a>(
        self,
        name: impl Into<Cow<'static, str>>,
        visibility: Visibility,
        value: T,
    ) -> Self {
        self.push(name.into(), visibility, false, Child::owned(value))
    }

    /// Add an embedded member whose fields are promoted into this record
    pub fn embed(
        self,
        name: impl Into<Cow<'static, str>>,
        visibility: Visibility,
        value: &'a dyn Dump,
    ) -> Self {
        self.push(name.into(), visibility, true, Child::Borrowed(value))
    }

    fn push(
        mut self,
        name: Cow<'static, str>,
        visibility: Visibility,
        embedded: bool,
        value: Child<'a>,
    ) -> Self {
        self.members.push(Member {
            name,
            visibility,
            embedded,
            value,
        });
        self
    }

    /// Number of direct members (embedded members count once)
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Resolve the flattened list of visible fields
    pub fn fields(&self) -> Vec<FieldDescriptor> {
        let mut candidates = Vec::with_capacity(self.members.len());
        let mut path = Vec::new();
        collect_fields(self, &mut path, true, 0, &mut candidates);
        resolve_promotions(candidates)
    }

    /// Fetch the value at `path` and hand it to `f`.
    ///
    /// Returns `None` if the path does not lead to a member, which only
    /// happens for paths that did not come from [`Record::fields`].
    pub fn with_field<R>(
        &self,
        path: &[usize],
        f: &mut dyn FnMut(&dyn Dump) -> R,
    ) -> Option<R> {
        let (&index, rest) = path.split_first()?;
        let member = self.members.get(index)?;
        if rest.is_empty() {
            return Some(f(&*member.value));
        }
        with_embedded(&*member.value, &mut |inner| inner.with_field(rest, &mut *f)).flatten()
    }
}

/// Hand the record behind `value` to `f`, looking through pointers and
/// transparent wrappers such as `Box`, `Rc` and `RefCell`.
fn with_embedded<R>(value: &dyn Dump, f: &mut dyn FnMut(&Record<'_>) -> R) -> Option<R> {
    match value.node() {
        Node::Struct(inner) => Some(f(&inner)),
        Node::Pointer { target, .. } | Node::Dynamic(target) => with_embedded(&*target, f),
        _ => None,
    }
}

struct Candidate {
    descriptor: FieldDescriptor,
    depth: usize,
}

fn collect_fields(
    record: &Record<'_>,
    path: &mut Vec<usize>,
    reachable_public: bool,
    depth: usize,
    out: &mut Vec<Candidate>,
) {
    for (index, member) in record.members.iter().enumerate() {
        path.push(index);
        let public = reachable_public && member.visibility.is_public();

        // Only members that lead to a struct can promote fields; anything
        // else embedded is listed as a plain field under its member name.
        let promoted = member.embedded
            && with_embedded(&*member.value, &mut |inner| {
                collect_fields(inner, path, public, depth + 1, out)
            })
            .is_some();

        if !promoted {
            out.push(Candidate {
                descriptor: FieldDescriptor {
                    name: member.name.clone(),
                    visibility: if public {
                        Visibility::Public
                    } else {
                        Visibility::Private
                    },
                    path: path.clone(),
                },
                depth,
            });
        }
        path.pop();
    }
}

fn resolve_promotions(candidates: Vec<Candidate>) -> Vec<FieldDescriptor> {
    // name -> (shallowest depth, candidates at that depth)
    let mut shallowest: FxHashMap<String, (usize, usize)> = FxHashMap::default();
    for candidate in &candidates {
        let entry = shallowest
            .entry(candidate.descriptor.name.to_string())
            .or_insert((candidate.depth, 0));
        if candidate.depth < entry.0 {
            *entry = (candidate.depth, 1);
        } else if candidate.depth == entry.0 {
            entry.1 += 1;
        }
    }

    candidates
        .into_iter()
        .filter(|candidate| {
            let (depth, count) = shallowest[candidate.descriptor.name.as_ref()];
            candidate.depth == depth && count == 1
        })
        .map(|candidate| candidate.descriptor)
        .collect()
}
