// src/html/dom.rs
// =============================================================================
// A mutable HTML parse tree.
//
// Each fetched page is parsed once into html5ever's RcDom. Attributes live in
// a RefCell on each element node, which lets us read them for link discovery,
// edit them in place through a shared reference and then serialize the whole
// document.
// =============================================================================

use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::parse_document;
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// The narrow set of operations the crawler needs from an HTML parser.
pub trait HtmlTree: Sized {
    /// Parses a full document. HTML parsing never fails; broken markup is
    /// repaired the way a browser would.
    fn parse(markup: &str) -> Self;

    /// Visits every `<tag attr="...">` element in document order. When `edit`
    /// returns `Some(value)`, the attribute is replaced with it.
    fn rewrite_attr(&self, tag: &str, attr: &str, edit: &mut dyn FnMut(&str) -> Option<String>);

    /// Text of the first `<title>`, trimmed. None if missing or blank.
    fn title(&self) -> Option<String>;

    /// Serializes the (possibly edited) tree back to markup.
    fn serialize(&self) -> std::io::Result<String>;
}

/// HtmlTree backed by html5ever and markup5ever_rcdom.
pub struct RcDocument {
    dom: RcDom,
}

impl HtmlTree for RcDocument {
    fn parse(markup: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(markup);
        RcDocument { dom }
    }

    fn rewrite_attr(&self, tag: &str, attr: &str, edit: &mut dyn FnMut(&str) -> Option<String>) {
        each_element(&self.dom.document, &mut |node| {
            if let NodeData::Element { ref name, ref attrs, .. } = node.data {
                if &*name.local != tag {
                    return;
                }
                for attribute in attrs.borrow_mut().iter_mut() {
                    if &*attribute.name.local != attr {
                        continue;
                    }
                    if let Some(value) = edit(&attribute.value) {
                        attribute.value = StrTendril::from_slice(&value);
                    }
                }
            }
        });
    }

    fn title(&self) -> Option<String> {
        let title = find_element(&self.dom.document, "title")?;
        let mut text = String::new();
        collect_text(&title, &mut text);
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    fn serialize(&self) -> std::io::Result<String> {
        let document: SerializableHandle = self.dom.document.clone().into();
        let mut bytes = Vec::new();
        serialize(&mut bytes, &document, SerializeOpts::default())?;
        String::from_utf8(bytes).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

fn each_element(node: &Handle, f: &mut dyn FnMut(&Handle)) {
    if let NodeData::Element { .. } = node.data {
        f(node)
    }
    for child in node.children.borrow().iter() {
        each_element(child, f)
    }
}

fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = node.data {
        if &*name.local == tag {
            return Some(node.clone());
        }
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { ref contents } = node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}
