/*!
A lossless, editable XML document model.

Parsing a document and immediately serializing it again, with no edits in
between, reproduces the original bytes exactly — whitespace, attribute quote
style, entity spelling, and declaration text all included. Editing the tree
only disturbs the textual footprint of whatever was actually changed: renaming
one attribute on a deeply nested element does not reformat the rest of the
document.

# Example

```rust
use lossless_xml::{Document, QName};
use lossless_xml::options::SerializerOptions;

let doc = Document::parse_str("<config>\n  <item name=\"a\"/>\n</config>").unwrap();
let root = doc.root_element().unwrap();
let item = root.find_child("item").unwrap();
item.set_attribute(QName::parse_lenient("name"), "b");

let xml = doc.to_xml_string(&SerializerOptions::default());
assert_eq!(xml, "<config>\n  <item name=\"b\"/>\n</config>");
```

# Specification

This crate implements XML 1.0 well-formedness parsing (not validation — DTD
and schema checking are out of scope) plus the five predefined character
entities and numeric character references. It does not expand general
entities, evaluate XPath, or expose a streaming/SAX-style API; the whole
document is always materialized as a tree.

# Concurrency

The tree is built from `Rc`/`RefCell`, so a [`Document`] and the node handles
borrowed from it are `!Send` and `!Sync` by construction — share a document
across threads by serializing it, not by sending the handles themselves.
*/

#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]

#[macro_use]
extern crate log;

// ------------------------------------------------------------------------------------------------
// Public Modules
// ------------------------------------------------------------------------------------------------

pub mod convert;
pub mod editor;
pub mod options;

mod encoding;
pub use encoding::Encoding;

mod error;
pub use error::{Error, Result};

mod name;
pub use name::QName;

mod node;
pub use node::{
    Attribute, Comment, Doctype, Document, Element, Node, Parent, ProcessingInstruction, Text,
    XmlVersion,
};

mod parser;
pub use parser::{parse_bytes, parse_str};

mod serializer;
pub use serializer::{to_xml_string, write_xml};

// ------------------------------------------------------------------------------------------------
// Private Modules
// ------------------------------------------------------------------------------------------------

mod rc_cell;

mod syntax;

mod text;
