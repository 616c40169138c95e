use spell_core::{path, Attribute, Element, HEAD_TAGS, IMPORT_TAGS};
use tracing::debug;

use crate::error::TransformError;
use crate::TransformContext;

/// What one pass over a list of elements produced: the rewritten elements,
/// the external script sources found along the way, and elements that belong
/// in the document `head` instead of where they were authored.
#[derive(Debug, Default)]
pub(crate) struct CrawlOutput {
    pub elements: Vec<Element>,
    pub script_sources: Vec<String>,
    pub head_elements: Vec<Element>,
}

impl CrawlOutput {
    fn absorb_aside(&mut self, mut other: CrawlOutput) -> Vec<Element> {
        self.script_sources.append(&mut other.script_sources);
        self.head_elements.append(&mut other.head_elements);
        other.elements
    }
}

impl TransformContext<'_> {
    /// Takes care of extra features like imports, components and embedded
    /// script compilation. Depth-first and left-to-right: later siblings see
    /// the components registered by earlier ones, so the order is load-bearing.
    ///
    /// The input list is consumed and a fresh output list is built, so
    /// splices (imports) and deletions (component definitions) never fight
    /// with the iteration.
    pub(crate) fn crawl(
        &mut self,
        input: Vec<Element>,
        inside_head: bool,
    ) -> Result<CrawlOutput, TransformError> {
        let mut out = CrawlOutput::default();

        for mut el in input {
            // Importing another file: parse it and splice the result in,
            // then apply the same rules to the spliced content
            if IMPORT_TAGS.contains(el.tag_name.as_str()) {
                let inner = self.resolve_import(&el, inside_head)?;
                let mut elements = out.absorb_aside(inner);
                out.elements.append(&mut elements);
                continue;
            }

            if el.tag_name == "css" {
                el.tag_name = "style".to_string();
            }

            // A tag with the `@` marker that isn't known yet declares a
            // component; it renders nothing at its declaration site
            if el.has_attr("@") && !self.components.contains_key(&el.tag_name) {
                let mut template = el;
                template.remove_attr("@");
                let name = std::mem::replace(&mut template.tag_name, "div".to_string());
                self.components.insert(name, template);
                continue;
            }

            // A known component name is an instantiation
            if let Some(template) = self.components.get(&el.tag_name).cloned() {
                let merged = self.instantiate_component(template, el, &mut out)?;
                out.elements.push(merged);
                continue;
            }

            if el.tag_name == "style" {
                // `style(src=...)` is shorthand for a stylesheet link
                if el.has_attr("src") {
                    let src = el.remove_attr("src").unwrap_or_default();
                    el.tag_name = "link".to_string();
                    el.attributes = vec![
                        Attribute {
                            name: "rel".to_string(),
                            value: "\"stylesheet\"".to_string(),
                        },
                        Attribute {
                            name: "href".to_string(),
                            value: src,
                        },
                    ];
                }
            } else if el.tag_name == "script" {
                if el.has_attr("src") {
                    self.record_script_source(&mut el, &mut out);
                } else if let Some(source) = el.inner_text.as_deref().filter(|t| !t.is_empty()) {
                    debug!(file = %el.source_file, "compiling inline script");
                    let compiled =
                        self.scripts
                            .compile(source, None, self.options.minify_scripts)?;
                    el.inner_text = Some(compiled);
                }
            }

            // Crawl through the children
            if !el.children.is_empty() {
                let children = std::mem::take(&mut el.children);
                let inner = self.crawl(children, false)?;
                el.children = out.absorb_aside(inner);
            }

            // Move head-bound tags into the head
            if !inside_head && HEAD_TAGS.contains(el.tag_name.as_str()) {
                out.head_elements.push(el);
                continue;
            }

            out.elements.push(el);
        }

        Ok(out)
    }

    fn resolve_import(
        &mut self,
        el: &Element,
        inside_head: bool,
    ) -> Result<CrawlOutput, TransformError> {
        let Some(rel) = el.inner_text.as_deref().filter(|t| !t.is_empty()) else {
            return Err(TransformError::MissingImportPath {
                file: el.source_file.clone(),
                tag: el.tag_name.clone(),
            });
        };

        let resolved = path::normalize(&format!("{}{}", path::parent_dir(&el.source_file), rel));
        debug!(from = %el.source_file, path = %resolved, "resolving import");

        let code = self
            .reader
            .read_text(&resolved)
            .map_err(|source| TransformError::ImportRead {
                path: resolved.clone(),
                source,
            })?;

        // Links inside the imported file keep resolving against the root
        // file, so they stay correct at the final output location
        let import_options = self.options.for_import(&resolved);
        let parsed = spell_parser::parse(&code, &import_options)?;

        self.crawl(parsed, inside_head)
    }

    /// Builds a fresh element from a component template and its use site:
    /// template attributes overridden by instance attributes, the instance's
    /// tag name as an implicit leading class, and instance children appended
    /// after the template's as slot content.
    fn instantiate_component(
        &mut self,
        template: Element,
        instance: Element,
        out: &mut CrawlOutput,
    ) -> Result<Element, TransformError> {
        let mut merged = Element::new(template.tag_name, template.source_file);

        merged.attributes = template.attributes;
        for attr in instance.attributes {
            if attr.name == "@" {
                continue;
            }
            merged.set_attr(attr.name, attr.value);
        }

        merged.classes.push(instance.tag_name);
        merged.classes.extend(instance.classes);
        merged.classes.extend(template.classes);

        merged.id = template.id;
        merged.inner_text = template.inner_text;
        merged.is_void = template.is_void;
        merged.raw_text = template.raw_text;
        merged.multiline = template.multiline;

        let mut children = template.children;
        children.extend(instance.children);

        // Imports and nested components inside the component body resolve
        // before the instance lands in the tree
        let inner = self.crawl(children, false)?;
        merged.children = out.absorb_aside(inner);

        Ok(merged)
    }

    fn record_script_source(&mut self, el: &mut Element, out: &mut CrawlOutput) {
        if self.options.convert_script_extension {
            if let Some(attr) = el.attributes.iter_mut().find(|a| a.name == "src") {
                if let Some(base) = attr.value.strip_suffix(".ts") {
                    attr.value = format!("{base}.js");
                } else if let Some(base) = attr.value.strip_suffix(".ts\"") {
                    attr.value = format!("{base}.js\"");
                }
            }
        }
        if let Some(src) = el.attr("src") {
            out.script_sources.push(src.to_string());
        }
    }
}
