//! `Dump` implementations for standard library types
//!
//! Smart pointers and references produce [`Node::Pointer`] so their targets
//! take part in cycle detection. Cells and locks are read with non-blocking
//! borrows: a value that is currently borrowed mutably or locked renders as
//! [`Node::Unreadable`] instead of panicking or deadlocking.

use super::{AsChild, Child, Dump, Node, Record, TypeInfo, Visibility};
use std::borrow::Cow;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, TryLockError};
use std::time::Duration;

fn addr_of<T: ?Sized>(ptr: *const T) -> usize {
    ptr.cast::<()>() as usize
}

/// Zero-sized targets all live at the same dangling address, so they carry
/// no identity and are shown as transparent wrappers.
fn pointer_node<T: ?Sized + Dump>(addr: usize, target: &T) -> Node<'_> {
    if std::mem::size_of_val(target) == 0 {
        return Node::Dynamic(target.as_child());
    }
    Node::Pointer {
        addr,
        target: target.as_child(),
    }
}

/// Sized view of an unsized value; forwards everything to the target.
struct Forward<'a, T: ?Sized>(&'a T);

impl<T: ?Sized + Dump> Dump for Forward<'_, T> {
    fn type_info(&self) -> TypeInfo {
        self.0.type_info()
    }

    fn node(&self) -> Node<'_> {
        self.0.node()
    }

    fn as_text(&self) -> Option<String> {
        self.0.as_text()
    }

    fn is_leaf(&self) -> bool {
        self.0.is_leaf()
    }
}

// === Scalars ===

macro_rules! dump_signed {
    ($($t:ty),*) => {
        $(
            impl Dump for $t {
                fn node(&self) -> Node<'_> {
                    Node::Int(*self as i128)
                }

                fn is_leaf(&self) -> bool {
                    true
                }
            }
        )*
    };
}

macro_rules! dump_unsigned {
    ($($t:ty),*) => {
        $(
            impl Dump for $t {
                fn node(&self) -> Node<'_> {
                    Node::Uint(*self as u128)
                }

                fn is_leaf(&self) -> bool {
                    true
                }
            }
        )*
    };
}

dump_signed!(i8, i16, i32, i64, i128, isize);
dump_unsigned!(u16, u32, u64, u128, usize);

impl Dump for u8 {
    fn node(&self) -> Node<'_> {
        Node::Uint(*self as u128)
    }

    fn is_leaf(&self) -> bool {
        true
    }

    fn slice_node(items: &[u8], cap: usize) -> Node<'_> {
        Node::Bytes {
            data: Cow::Borrowed(items),
            cap,
        }
    }

    fn deque_node(items: &VecDeque<u8>) -> Node<'_> {
        let data = match items.as_slices() {
            (front, []) => Cow::Borrowed(front),
            _ => Cow::Owned(items.iter().copied().collect()),
        };
        Node::Bytes {
            data,
            cap: items.capacity(),
        }
    }
}

impl Dump for f32 {
    fn node(&self) -> Node<'_> {
        Node::Float(*self as f64)
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

impl Dump for f64 {
    fn node(&self) -> Node<'_> {
        Node::Float(*self)
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

impl Dump for bool {
    fn node(&self) -> Node<'_> {
        Node::Bool(*self)
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

impl Dump for char {
    fn node(&self) -> Node<'_> {
        Node::Char(*self)
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

impl Dump for () {
    fn node(&self) -> Node<'_> {
        Node::Struct(Record::new())
    }
}

// === Strings and paths ===

impl Dump for str {
    fn node(&self) -> Node<'_> {
        Node::Str(Cow::Borrowed(self))
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

impl AsChild for str {
    fn as_child(&self) -> Child<'_> {
        Child::owned(Forward(self))
    }
}

impl Dump for String {
    fn node(&self) -> Node<'_> {
        Node::Str(Cow::Borrowed(self.as_str()))
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

impl Dump for Path {
    fn node(&self) -> Node<'_> {
        Node::Str(self.to_string_lossy())
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

impl AsChild for Path {
    fn as_child(&self) -> Child<'_> {
        Child::owned(Forward(self))
    }
}

impl Dump for PathBuf {
    fn node(&self) -> Node<'_> {
        Node::Str(self.to_string_lossy())
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

impl<B> Dump for Cow<'_, B>
where
    B: ?Sized + ToOwned + Dump,
{
    fn node(&self) -> Node<'_> {
        Node::Dynamic((**self).as_child())
    }

    fn is_leaf(&self) -> bool {
        (**self).is_leaf()
    }
}

impl Dump for Duration {
    fn node(&self) -> Node<'_> {
        Node::Struct(
            Record::new()
                .field_owned("secs", Visibility::Private, self.as_secs())
                .field_owned("nanos", Visibility::Private, self.subsec_nanos()),
        )
    }

    fn as_text(&self) -> Option<String> {
        Some(format!("{:?}", self))
    }
}

// === Sequences ===

impl<T: Dump> Dump for [T] {
    fn node(&self) -> Node<'_> {
        T::slice_node(self, self.len())
    }
}

impl<T: Dump> AsChild for [T] {
    fn as_child(&self) -> Child<'_> {
        Child::owned(Forward(self))
    }
}

impl<T: Dump, const N: usize> Dump for [T; N] {
    fn node(&self) -> Node<'_> {
        T::slice_node(self, N)
    }
}

impl<T: Dump> Dump for Vec<T> {
    fn node(&self) -> Node<'_> {
        T::slice_node(self, self.capacity())
    }
}

impl<T: Dump> Dump for VecDeque<T> {
    fn node(&self) -> Node<'_> {
        T::deque_node(self)
    }
}

impl<T: Dump, S: BuildHasher> Dump for HashSet<T, S> {
    fn node(&self) -> Node<'_> {
        Node::seq(self.len(), self.iter().map(|item| Child::Borrowed(item)))
    }
}

impl<T: Dump> Dump for BTreeSet<T> {
    fn node(&self) -> Node<'_> {
        Node::seq(self.len(), self.iter().map(|item| Child::Borrowed(item)))
    }
}

// === Maps ===

impl<K: Dump, V: Dump, S: BuildHasher> Dump for HashMap<K, V, S> {
    fn node(&self) -> Node<'_> {
        Node::map(
            self.len(),
            false,
            self.iter()
                .map(|(k, v)| (Child::Borrowed(k), Child::Borrowed(v))),
        )
    }
}

impl<K: Dump, V: Dump> Dump for BTreeMap<K, V> {
    fn node(&self) -> Node<'_> {
        Node::map(
            self.len(),
            true,
            self.iter()
                .map(|(k, v)| (Child::Borrowed(k), Child::Borrowed(v))),
        )
    }
}

// === Option, Result, tuples ===

impl<T: Dump> Dump for Option<T> {
    fn node(&self) -> Node<'_> {
        match self {
            Some(value) => Node::Dynamic(Child::Borrowed(value)),
            None => Node::Nil,
        }
    }
}

impl<T: Dump, E: Dump> Dump for Result<T, E> {
    fn node(&self) -> Node<'_> {
        let record = match self {
            Ok(value) => Record::new().field("Ok", Visibility::Public, value),
            Err(err) => Record::new().field("Err", Visibility::Public, err),
        };
        Node::Struct(record)
    }
}

macro_rules! dump_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Dump),+> Dump for ($($name,)+) {
            fn node(&self) -> Node<'_> {
                Node::Struct(
                    Record::new()
                        $(.field(stringify!($idx), Visibility::Public, &self.$idx))+
                )
            }
        }
    };
}

dump_tuple!(A 0);
dump_tuple!(A 0, B 1);
dump_tuple!(A 0, B 1, C 2);
dump_tuple!(A 0, B 1, C 2, D 3);
dump_tuple!(A 0, B 1, C 2, D 3, E 4);
dump_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);

// === Pointers ===

impl<T: ?Sized + Dump> Dump for &T {
    fn node(&self) -> Node<'_> {
        pointer_node(addr_of(*self), &**self)
    }
}

impl<T: ?Sized + Dump> Dump for &mut T {
    fn node(&self) -> Node<'_> {
        pointer_node(addr_of(&**self), &**self)
    }
}

impl<T: ?Sized + Dump> Dump for Box<T> {
    fn node(&self) -> Node<'_> {
        pointer_node(addr_of(&**self), &**self)
    }
}

impl<T: ?Sized + Dump> Dump for Rc<T> {
    fn node(&self) -> Node<'_> {
        pointer_node(addr_of(Rc::as_ptr(self)), &**self)
    }
}

impl<T: ?Sized + Dump> Dump for Arc<T> {
    fn node(&self) -> Node<'_> {
        pointer_node(addr_of(Arc::as_ptr(self)), &**self)
    }
}

impl<T: ?Sized> Dump for *const T {
    fn node(&self) -> Node<'_> {
        Node::Opaque {
            addr: addr_of(*self),
        }
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

impl<T: ?Sized> Dump for *mut T {
    fn node(&self) -> Node<'_> {
        Node::Opaque {
            addr: addr_of(*self as *const T),
        }
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

impl<T: ?Sized> Dump for NonNull<T> {
    fn node(&self) -> Node<'_> {
        Node::Opaque {
            addr: addr_of(self.as_ptr() as *const T),
        }
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

// === Cells and locks ===

macro_rules! dump_guard {
    ($($guard:ident),*) => {
        $(
            impl<T: ?Sized + Dump> Dump for $guard<'_, T> {
                fn type_info(&self) -> TypeInfo {
                    (**self).type_info()
                }

                fn node(&self) -> Node<'_> {
                    (**self).node()
                }

                fn as_text(&self) -> Option<String> {
                    (**self).as_text()
                }

                fn is_leaf(&self) -> bool {
                    (**self).is_leaf()
                }
            }
        )*
    };
}

dump_guard!(Ref, RefMut, MutexGuard, RwLockReadGuard);

impl<T: Dump> Dump for RefCell<T> {
    fn node(&self) -> Node<'_> {
        match self.try_borrow() {
            Ok(guard) => Node::Dynamic(Child::owned(guard)),
            Err(_) => Node::Unreadable {
                reason: "mutably borrowed",
            },
        }
    }
}

impl<T: Copy + Dump> Dump for Cell<T> {
    fn node(&self) -> Node<'_> {
        Node::Dynamic(Child::owned(self.get()))
    }
}

impl<T: Dump> Dump for Mutex<T> {
    fn node(&self) -> Node<'_> {
        match self.try_lock() {
            Ok(guard) => Node::Dynamic(Child::owned(guard)),
            Err(TryLockError::Poisoned(poisoned)) => {
                Node::Dynamic(Child::owned(poisoned.into_inner()))
            }
            Err(TryLockError::WouldBlock) => Node::Unreadable { reason: "locked" },
        }
    }
}

impl<T: Dump> Dump for RwLock<T> {
    fn node(&self) -> Node<'_> {
        match self.try_read() {
            Ok(guard) => Node::Dynamic(Child::owned(guard)),
            Err(TryLockError::Poisoned(poisoned)) => {
                Node::Dynamic(Child::owned(poisoned.into_inner()))
            }
            Err(TryLockError::WouldBlock) => Node::Unreadable {
                reason: "write locked",
            },
        }
    }
}

// === Channels and functions ===

macro_rules! dump_chan {
    ($($chan:ident),*) => {
        $(
            impl<T> Dump for $chan<T> {
                fn node(&self) -> Node<'_> {
                    Node::Chan {
                        addr: addr_of(self),
                    }
                }

                fn is_leaf(&self) -> bool {
                    true
                }
            }
        )*
    };
}

dump_chan!(Sender, SyncSender, Receiver);

macro_rules! dump_fn {
    ($($arg:ident),*) => {
        impl<R, $($arg),*> Dump for fn($($arg),*) -> R {
            fn node(&self) -> Node<'_> {
                Node::Func
            }

            fn is_leaf(&self) -> bool {
                true
            }
        }
    };
}

dump_fn!();
dump_fn!(A);
dump_fn!(A, B);
dump_fn!(A, B, C);
dump_fn!(A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_nodes() {
        assert!(matches!(7i16.node(), Node::Int(7)));
        assert!(matches!(7u64.node(), Node::Uint(7)));
        assert!(matches!(true.node(), Node::Bool(true)));
        assert!(matches!('x'.node(), Node::Char('x')));
        assert!(matches!(1.5f32.node(), Node::Float(f) if f == 1.5));
        assert!(7i16.is_leaf());
    }

    #[test]
    fn test_byte_containers_become_hex_dumps() {
        let mut bytes = Vec::with_capacity(8);
        bytes.extend_from_slice(b"{}");
        match bytes.node() {
            Node::Bytes { data, cap } => {
                assert_eq!(data.as_ref(), b"{}");
                assert_eq!(cap, 8);
            }
            other => panic!("Expected bytes, got {:?}", other),
        }
        assert!(matches!([1u8, 2, 3].node(), Node::Bytes { cap: 3, .. }));
        assert!(matches!(vec![1u16, 2].node(), Node::Seq { len: 2, .. }));
    }

    #[test]
    fn test_unsized_targets_keep_their_type() {
        let s: &str = "hi";
        match <&str as Dump>::node(&s) {
            Node::Pointer { target, .. } => {
                assert_eq!(target.type_info().path(), "str");
                assert!(target.is_leaf());
                assert!(matches!(target.node(), Node::Str(ref v) if v == "hi"));
            }
            other => panic!("Expected pointer, got {:?}", other),
        };
    }

    #[test]
    fn test_shared_pointers_report_target_address() {
        let shared = Rc::new(5i32);
        let other = Rc::clone(&shared);
        let (Node::Pointer { addr: a, .. }, Node::Pointer { addr: b, .. }) =
            (shared.node(), other.node())
        else {
            panic!("Expected pointers");
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_sized_targets_have_no_identity() {
        let unit = Box::new(());
        let empty: &[i32] = &[];
        assert!(matches!(unit.node(), Node::Dynamic(_)));
        assert!(matches!(<&[i32] as Dump>::node(&empty), Node::Dynamic(_)));
        assert!(matches!(Box::new(1u8).node(), Node::Pointer { .. }));
    }

    #[test]
    fn test_byte_deque_is_contiguous_hex_dump() {
        let mut ring: VecDeque<u8> = VecDeque::with_capacity(4);
        ring.extend([b'b', b'c']);
        ring.push_front(b'a');
        match ring.node() {
            Node::Bytes { data, cap } => {
                assert_eq!(data.as_ref(), b"abc");
                assert!(cap >= 3);
            }
            other => panic!("Expected bytes, got {:?}", other),
        }

        let numbers: VecDeque<i32> = VecDeque::from(vec![1, 2]);
        assert!(matches!(numbers.node(), Node::Seq { len: 2, .. }));
    }

    #[test]
    fn test_option_is_nil_or_transparent() {
        let none: Option<i32> = None;
        assert!(matches!(none.node(), Node::Nil));
        assert!(matches!(Some(3).node(), Node::Dynamic(_)));
    }

    #[test]
    fn test_borrowed_refcell_is_unreadable() {
        let cell = RefCell::new(1i32);
        let _writer = cell.borrow_mut();
        assert!(matches!(
            cell.node(),
            Node::Unreadable {
                reason: "mutably borrowed"
            }
        ));
    }

    #[test]
    fn test_refcell_guard_forwards_type() {
        let cell = RefCell::new(String::from("inside"));
        match cell.node() {
            Node::Dynamic(child) => {
                assert_eq!(child.type_info(), TypeInfo::of::<String>());
            }
            other => panic!("Expected dynamic, got {:?}", other),
        };
    }

    #[test]
    fn test_held_mutex_is_unreadable() {
        let lock = Mutex::new(1i32);
        let _held = lock.lock().unwrap();
        assert!(matches!(lock.node(), Node::Unreadable { reason: "locked" }));
    }

    #[test]
    fn test_rwlock_reads_or_reports_writer() {
        let lock = RwLock::new(vec![1i32]);
        assert!(matches!(lock.node(), Node::Dynamic(_)));
        let _writer = lock.write().unwrap();
        assert!(matches!(
            lock.node(),
            Node::Unreadable {
                reason: "write locked"
            }
        ));
    }

    #[test]
    fn test_handles() {
        let (tx, _rx) = std::sync::mpsc::channel::<i32>();
        assert!(matches!(tx.node(), Node::Chan { .. }));

        let f: fn(i32) -> i32 = |x| x + 1;
        assert!(matches!(f.node(), Node::Func));

        let p: *const u8 = std::ptr::null();
        assert!(matches!(p.node(), Node::Opaque { addr: 0 }));
    }

    #[test]
    fn test_tuple_fields_are_positional() {
        let pair = (1i32, "two".to_string());
        let Node::Struct(record) = pair.node() else {
            panic!("Expected struct");
        };
        let names: Vec<String> = record.fields().iter().map(|f| f.name.to_string()).collect();
        assert_eq!(names, vec!["0", "1"]);
    }
}
