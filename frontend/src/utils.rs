//! Small DOM helpers for the forms.

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::NodeRef;

/// Current value of an `<input>`, empty when the node is not mounted.
pub fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn select_value(node: &NodeRef) -> String {
    node.cast::<HtmlSelectElement>()
        .map(|select| select.value())
        .unwrap_or_default()
}
