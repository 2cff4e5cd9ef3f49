// Rendering of standard library values

use regex::Regex;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use vardump::{Dump, Dumper, Node, PlainColorizer};

fn render(values: &[&dyn Dump]) -> String {
    Dumper::builder()
        .colorizer(PlainColorizer)
        .header(false)
        .build()
        .dump_to_string(values)
}

struct Complex64 {
    re: f64,
    im: f64,
}

impl Dump for Complex64 {
    fn node(&self) -> Node<'_> {
        Node::Complex {
            re: self.re,
            im: self.im,
        }
    }
}

#[test]
fn test_scalars() {
    assert_eq!(render(&[&true, &false]), "true\nfalse\n");
    assert_eq!(render(&[&-7i64, &7u16]), "-7\n7\n");
    assert_eq!(render(&[&3.14159265f64]), "3.141593\n");
    assert_eq!(render(&[&'é']), "'é'\n");
    assert_eq!(render(&[&Complex64 { re: 1.0, im: -2.0 }]), "(1-2i)\n");
}

#[test]
fn test_tuples_and_results() {
    assert_eq!(
        render(&[&(1, "a")]),
        "#(i32, &str)\n  +0 => 1\n  +1 => \"a\"\n}\n"
    );

    let ok: Result<i32, String> = Ok(5);
    assert_eq!(render(&[&ok]), "#Result<i32, String>\n  +Ok => 5\n}\n");
}

#[test]
fn test_transparent_wrappers() {
    let boxed: Box<dyn Dump> = Box::new(5u8);
    let shared: Arc<str> = Arc::from("shared");

    assert_eq!(render(&[&Some("x")]), "\"x\"\n");
    assert_eq!(render(&[&Cell::new(3)]), "3\n");
    assert_eq!(render(&[&boxed]), "5\n");
    assert_eq!(render(&[&shared]), "\"shared\"\n");
    assert_eq!(render(&[&Path::new("/tmp/x")]), "\"/tmp/x\"\n");
}

#[test]
fn test_borrowed_cell_is_not_read() {
    let cell = RefCell::new(1);
    let _writer = cell.borrow_mut();
    assert_eq!(render(&[&cell]), "RefCell<i32>(mutably borrowed)\n");
}

#[test]
fn test_handles() {
    let (tx, _rx) = std::sync::mpsc::channel::<i32>();
    let out = render(&[&tx]);
    assert!(Regex::new(r"^Sender<i32>\(0x[0-9a-f]+\)\n$").unwrap().is_match(&out), "{}", out);

    let null: *const u8 = std::ptr::null();
    assert_eq!(render(&[&null]), "*const u8(0x0)\n");
}

#[test]
fn test_duration_uses_debug_text() {
    assert_eq!(render(&[&Duration::from_secs(2)]), "2s #Duration\n");
}

#[test]
fn test_sets_and_tuple_keys() {
    let set: BTreeSet<i32> = [3, 1].into_iter().collect();
    assert_eq!(render(&[&set]), "[\n  0 => 1\n  1 => 3\n]\n");

    let mut grid = HashMap::new();
    grid.insert((1, 2), "a");
    assert_eq!(render(&[&grid]), "{\n  (1, 2) => \"a\"\n}\n");
}

#[test]
fn test_byte_array_hex_dump() {
    let out = render(&[&[0x41u8, 0x42, 0x00, 0xff]]);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "([u8; 4]) (len=4 cap=4) {");
    assert!(lines[1].starts_with("  00000000  41 42 00 ff "));
    assert!(lines[1].ends_with("| AB..             |"));
    assert_eq!(lines[2], "}");
}

#[test]
fn test_byte_deque_hex_dump() {
    let mut ring: VecDeque<u8> = b"\"a\"}".iter().copied().collect();
    ring.push_front(b'{');
    let out = render(&[&ring]);
    let lines: Vec<&str> = out.lines().collect();

    assert!(lines[0].starts_with("(VecDeque<u8>) (len=5 cap="), "{}", out);
    assert!(lines[1].starts_with("  00000000  7b 22 61 22 7d "));
    assert!(lines[1].ends_with("| {\"a\"}            |"));
    assert_eq!(lines[2], "}");
}

#[test]
fn test_html_roles() {
    let html = Dumper::builder().header(false).build().dump_to_html(&[&true, &false]);
    assert!(html.contains("<span style=\"color:#ffb400\">true</span>"));
    assert!(html.contains("<span style=\"color:#999\">false</span>"));
}
