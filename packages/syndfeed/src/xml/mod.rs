//! XML utilities: tree navigation for parsing and a writer for generation.

mod utils;
mod writer;

pub use utils::{
    child_text, element_children, find_child, find_children, get_attribute,
    get_tag_name, get_text, inner_xml, is_element, namespace_of, prolog,
};
pub use writer::XmlWriter;
