use spell_core::Element;

use crate::variables::substitute_variables;
use crate::{CodegenContext, VariableScope};

impl CodegenContext<'_> {
    /// Converts a sibling list to HTML, depth-first, in a single pass.
    pub(crate) fn generate_scoped(&self, elements: &[Element], scope: &VariableScope) -> String {
        let mut out = String::new();

        for (idx, el) in elements.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }

            // Tag beginning, attributes, id and class, in stored order
            out.push('<');
            out.push_str(&el.tag_name);
            for attr in &el.attributes {
                out.push(' ');
                out.push_str(&attr.name);
                if !attr.value.is_empty() {
                    out.push('=');
                    out.push_str(&substitute_variables(&attr.value, scope));
                }
            }
            if let Some(id) = &el.id {
                out.push_str(&format!(" id=\"{id}\""));
            }
            if !el.classes.is_empty() {
                out.push_str(&format!(" class=\"{}\"", el.classes.join(" ")));
            }
            out.push('>');

            // Inner text, substituted first; only non-raw text goes through
            // the Markdown collaborator
            if let Some(text) = el.inner_text.as_deref().filter(|t| !t.is_empty()) {
                let substituted = substitute_variables(text, scope);
                if el.raw_text {
                    out.push_str(&substituted);
                } else {
                    let too_long = substituted.len() > self.long_text_threshold;
                    if too_long {
                        out.push_str("\n\t");
                    }
                    out.push_str(&self.markdown.convert(&substituted));
                    if too_long {
                        out.push('\n');
                    }
                }
            }

            // Children render one indent level deeper, in a scope where the
            // element's own attributes win over inherited ones
            if !el.children.is_empty() {
                let mut child_scope = scope.clone();
                for attr in &el.attributes {
                    child_scope.insert(attr.name.clone(), attr.value.clone());
                }
                let inner = self.generate_scoped(&el.children, &child_scope);
                out.push_str("\n\t");
                out.push_str(&inner.replace('\n', "\n\t"));
                out.push('\n');
            }

            // Text or children force a closing tag even on void tags
            if el.has_text() || !el.children.is_empty() || !el.is_void {
                out.push_str(&format!("</{}>", el.tag_name));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;
    use spell_core::Element;

    fn gen(elements: &[Element]) -> String {
        CodegenContext::default().generate(elements)
    }

    fn el(tag: &str) -> Element {
        Element::new(tag, "test.spl")
    }

    #[test]
    fn basic_tag_with_attributes_id_and_classes() {
        let mut div = el("div");
        div.set_attr("title", "\"hey\"");
        div.set_attr("hidden", "");
        div.id = Some("main".to_string());
        div.classes = smallvec!["card".to_string(), "wide".to_string()];

        assert_eq!(
            gen(&[div]),
            "<div title=\"hey\" hidden id=\"main\" class=\"card wide\"></div>"
        );
    }

    #[test]
    fn void_tag_without_content_has_no_closing_tag() {
        let mut br = el("br");
        br.is_void = true;
        assert_eq!(gen(&[br]), "<br>");
    }

    #[test]
    fn void_tag_with_text_still_closes() {
        let mut br = el("br");
        br.is_void = true;
        br.inner_text = Some("stubborn".to_string());
        assert_eq!(gen(&[br]), "<br>stubborn</br>");
    }

    #[test]
    fn children_are_indented_one_level() {
        let mut parent = el("div");
        let mut child = el("span");
        child.inner_text = Some("hi".to_string());
        parent.children.push(child);

        assert_eq!(gen(&[parent]), "<div>\n\t<span>hi</span>\n</div>");
    }

    #[test]
    fn nested_scope_prefers_closer_attributes() {
        let mut outer = el("div");
        outer.set_attr("x", "\"far\"");
        let mut inner = el("div");
        inner.set_attr("x", "\"near\"");
        let mut leaf = el("p");
        leaf.inner_text = Some("@{x}".to_string());
        inner.children.push(leaf);
        outer.children.push(inner);

        let html = gen(&[outer]);
        assert!(html.contains("<p>near</p>"), "{html}");
    }

    #[test]
    fn attribute_values_are_substituted_from_inherited_scope() {
        let mut outer = el("div");
        outer.set_attr("target", "\"#top\"");
        let mut link = el("a");
        link.set_attr("href", "\"@{target}\"");
        link.inner_text = Some("up".to_string());
        outer.children.push(link);

        let html = gen(&[outer]);
        assert!(html.contains("<a href=\"#top\">up</a>"), "{html}");
    }

    #[test]
    fn raw_text_skips_markdown() {
        let mut style = el("style");
        style.raw_text = true;
        style.inner_text = Some("p { color: **red** }".to_string());
        assert_eq!(gen(&[style]), "<style>p { color: **red** }</style>");
    }

    #[test]
    fn long_text_is_set_off_with_whitespace() {
        let mut p = el("p");
        p.inner_text = Some("x".repeat(80));
        let html = gen(&[p]);
        assert_eq!(html, format!("<p>\n\t{}\n</p>", "x".repeat(80)));
    }

    #[test]
    fn doctype_marker_renders_bare() {
        let mut doctype = el("!DOCTYPE html");
        doctype.is_void = true;
        let html = el("html");
        assert_eq!(gen(&[doctype, html]), "<!DOCTYPE html>\n<html></html>");
    }
}
