//! Call-site macros and `Dump` derivation helpers

/// Dump any number of values to stdout with the default dumper.
///
/// ```no_run
/// let user = ("Alice", 30);
/// vardump::dump!(user, [1, 2, 3]);
/// ```
#[macro_export]
macro_rules! dump {
    ($($value:expr),* $(,)?) => {
        $crate::dump(&[$(&$value as &dyn $crate::Dump),*])
    };
}

/// Render values to a `String` with the default dumper
#[macro_export]
macro_rules! dump_str {
    ($($value:expr),* $(,)?) => {
        $crate::dump_to_string(&[$(&$value as &dyn $crate::Dump),*])
    };
}

/// Render values as an HTML fragment with the default dumper
#[macro_export]
macro_rules! dump_html {
    ($($value:expr),* $(,)?) => {
        $crate::dump_to_html(&[$(&$value as &dyn $crate::Dump),*])
    };
}

/// Dump values, then exit the process with status 1
#[macro_export]
macro_rules! dd {
    ($($value:expr),* $(,)?) => {
        $crate::dump_and_exit(&[$(&$value as &dyn $crate::Dump),*])
    };
}

/// Implement `Dump` for a struct by listing its fields.
///
/// Each entry is a visibility marker followed by a field:
///
/// - `+name` / `-name`: a public / private field
/// - `+..name` / `-..name`: an embedded member whose fields are promoted,
///   also through `Box`, `Rc`, `Arc` and `RefCell`
/// - `+0`: tuple struct fields by position
///
/// ```
/// struct Base { id: u32 }
/// struct User { base: Base, name: String, password: String }
///
/// vardump::dump_struct!(Base { +id });
/// vardump::dump_struct!(User { +..base, +name, -password });
/// ```
#[macro_export]
macro_rules! dump_struct {
    (@record $this:ident, $record:expr, + .. $field:tt $(, $($rest:tt)*)?) => {
        $crate::dump_struct!(@record $this,
            $record.embed(stringify!($field), $crate::Visibility::Public, &$this.$field),
            $($($rest)*)?)
    };
    (@record $this:ident, $record:expr, - .. $field:tt $(, $($rest:tt)*)?) => {
        $crate::dump_struct!(@record $this,
            $record.embed(stringify!($field), $crate::Visibility::Private, &$this.$field),
            $($($rest)*)?)
    };
    (@record $this:ident, $record:expr, + $field:tt $(, $($rest:tt)*)?) => {
        $crate::dump_struct!(@record $this,
            $record.field(stringify!($field), $crate::Visibility::Public, &$this.$field),
            $($($rest)*)?)
    };
    (@record $this:ident, $record:expr, - $field:tt $(, $($rest:tt)*)?) => {
        $crate::dump_struct!(@record $this,
            $record.field(stringify!($field), $crate::Visibility::Private, &$this.$field),
            $($($rest)*)?)
    };
    (@record $this:ident, $record:expr $(,)?) => {
        $record
    };

    ($ty:ty { $($body:tt)* }) => {
        impl $crate::Dump for $ty {
            fn node(&self) -> $crate::Node<'_> {
                $crate::Node::Struct(
                    $crate::dump_struct!(@record self, $crate::Record::new(), $($body)*)
                )
            }
        }
    };
}

/// Implement `Dump` for types whose `Display` output is the best summary.
///
/// The value renders as its text followed by the type name, e.g.
/// `127.0.0.1:8080 #SocketAddr`.
#[macro_export]
macro_rules! dump_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Dump for $ty {
                fn node(&self) -> $crate::Node<'_> {
                    $crate::Node::Str(::std::borrow::Cow::Owned(
                        ::std::string::ToString::to_string(self),
                    ))
                }

                fn as_text(&self) -> ::std::option::Option<::std::string::String> {
                    ::std::option::Option::Some(::std::string::ToString::to_string(self))
                }
            }
        )+
    };
}
