mod collaborators;
mod crawl;
pub mod error;

use fxhash::FxHashMap;
use spell_core::{CompileOptions, Element, VOID_TAGS};

pub use collaborators::{NoImports, PassthroughScripts, ScriptCompiler, SourceReader};
pub use error::{ScriptCompileError, TransformError};

/// The outcome of transforming one parsed tree: the assembled document and
/// the external script sources discovered in it, for the surrounding build
/// system to compile separately.
#[derive(Debug)]
pub struct TransformResult {
    pub elements: Vec<Element>,
    pub script_sources: Vec<String>,
}

/// State threaded through one transform pass: the compile options, the
/// external collaborators, and the components registered so far.
///
/// The components table is shared across the whole compile invocation and
/// never reused across files.
pub(crate) struct TransformContext<'a> {
    pub options: CompileOptions,
    pub reader: &'a dyn SourceReader,
    pub scripts: &'a dyn ScriptCompiler,
    pub components: FxHashMap<String, Element>,
}

/// Rewrites the parsed tree in document order and assembles the standard
/// document shell around it: exactly one `html` element containing exactly
/// one `head` (first) and one `body`, with a `!DOCTYPE html` marker in
/// front and a default responsive viewport `meta` injected into the head.
pub fn modify(
    elements: Vec<Element>,
    options: &CompileOptions,
    reader: &dyn SourceReader,
    scripts: &dyn ScriptCompiler,
) -> Result<TransformResult, TransformError> {
    let file = options.file_path.clone();
    let mut ctx = TransformContext {
        options: options.clone(),
        reader,
        scripts,
        components: FxHashMap::default(),
    };

    // Wrap everything in <html> if there is no such tag yet
    let mut roots = elements;
    if !roots.iter().any(|e| e.tag_name == "html") {
        let mut html = Element::new("html", file.as_str());
        html.children = std::mem::take(&mut roots);
        roots.push(html);
    }
    let html_idx = roots
        .iter()
        .position(|e| e.tag_name == "html")
        .expect("an html element was just ensured");

    // Detach (or synthesize) the head, and wrap the remaining children in
    // <body> if there is none; the head is re-attached first once the
    // crawls are done
    let html = &mut roots[html_idx];
    let mut head = match html.children.iter().position(|c| c.tag_name == "head") {
        Some(idx) => html.children.remove(idx),
        None => Element::new("head", file.as_str()),
    };
    if !html.children.iter().any(|c| c.tag_name == "body") {
        let mut body = Element::new("body", file.as_str());
        body.children = std::mem::take(&mut html.children);
        html.children = vec![body];
    }

    // The base meta tag for mobile devices
    head.children.push(viewport_meta(file.as_str()));

    // Head-resident tags must not be re-hoisted, so the head's own children
    // get their pass first
    let head_pass = ctx.crawl(std::mem::take(&mut head.children), true)?;
    head.children = head_pass.elements;
    head.children.extend(head_pass.head_elements);
    let mut script_sources = head_pass.script_sources;

    let body_pass = ctx.crawl(roots, false)?;
    let mut roots = body_pass.elements;
    head.children.extend(body_pass.head_elements);
    script_sources.extend(body_pass.script_sources);

    // The head goes back in as the first child of <html>. A root `html`
    // written as a component definition vanishes in the crawl; the head
    // has nowhere to go then and the document is just its doctype
    if let Some(html) = roots.iter_mut().find(|e| e.tag_name == "html") {
        html.children.insert(0, head);
    }

    // <!DOCTYPE html> at the very beginning of the document
    let mut doctype = Element::new("!DOCTYPE html", file.as_str());
    doctype.is_void = true;
    roots.insert(0, doctype);

    Ok(TransformResult {
        elements: roots,
        script_sources,
    })
}

fn viewport_meta(file: &str) -> Element {
    let mut meta = Element::new("meta", file);
    meta.is_void = VOID_TAGS.contains("meta");
    meta.set_attr("name", "\"viewport\"");
    meta.set_attr("content", "\"width=device-width,initial-scale=1.0\"");
    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use spell_core::Attribute;

    fn transform(source: &str) -> TransformResult {
        transform_with(source, CompileOptions::new("test.spl"))
    }

    fn transform_with(source: &str, options: CompileOptions) -> TransformResult {
        let parsed = spell_parser::parse(source, &options).unwrap();
        modify(parsed, &options, &NoImports, &PassthroughScripts).unwrap()
    }

    fn doc_parts(result: &TransformResult) -> (&Element, &Element, &Element) {
        assert_eq!(result.elements[0].tag_name, "!DOCTYPE html");
        let html = &result.elements[1];
        assert_eq!(html.tag_name, "html");
        let head = &html.children[0];
        let body = &html.children[1];
        assert_eq!(head.tag_name, "head");
        assert_eq!(body.tag_name, "body");
        (html, head, body)
    }

    #[test]
    fn empty_input_builds_the_document_shell() {
        let options = CompileOptions::new("f");
        let result = modify(Vec::new(), &options, &NoImports, &PassthroughScripts).unwrap();

        assert_eq!(result.elements.len(), 2);
        let (html, head, body) = doc_parts(&result);
        assert_eq!(html.children.len(), 2);
        assert!(body.children.is_empty());

        assert_eq!(head.children.len(), 1);
        let meta = &head.children[0];
        assert_eq!(meta.tag_name, "meta");
        assert_eq!(meta.attr("name"), Some("\"viewport\""));

        for el in [&result.elements[0], html, head, body, meta] {
            assert_eq!(el.source_file, "f");
        }
    }

    #[test]
    fn structure_invariant_holds_for_plain_content() {
        let result = transform("div hello\np world\n");
        let (_, head, body) = doc_parts(&result);
        assert_eq!(body.children.len(), 2);
        assert_eq!(head.children[0].tag_name, "meta");
    }

    #[test]
    fn existing_head_is_reused_and_put_first() {
        let result = transform("html\n\tdiv content\n\thead\n\t\ttitle My page\n");
        let (html, head, _) = doc_parts(&result);
        assert_eq!(html.children.len(), 2);
        // the authored title survives next to the injected meta
        assert!(head.children.iter().any(|c| c.tag_name == "title"));
        assert!(head.children.iter().any(|c| c.tag_name == "meta"));
    }

    #[test]
    fn html_defined_as_component_leaves_only_the_doctype() {
        let result = transform("html(@)\n");
        assert_eq!(result.elements.len(), 1);
        assert_eq!(result.elements[0].tag_name, "!DOCTYPE html");
    }

    #[test]
    fn head_tags_are_hoisted_out_of_the_body() {
        let result = transform("div\n\ttitle Deep title\n\tp text\n");
        let (_, head, body) = doc_parts(&result);
        assert!(head.children.iter().any(|c| c.tag_name == "title"));
        let div = &body.children[0];
        assert!(div.children.iter().all(|c| c.tag_name != "title"));
    }

    #[test]
    fn css_alias_becomes_style_and_is_hoisted() {
        let result = transform("div\ncss p{color:red}\n");
        let (_, head, body) = doc_parts(&result);
        let style = head
            .children
            .iter()
            .find(|c| c.tag_name == "style")
            .expect("style in head");
        assert_eq!(style.inner_text.as_deref(), Some("p{color:red}"));
        assert_eq!(body.children.len(), 1);
    }

    #[test]
    fn style_with_src_becomes_stylesheet_link() {
        let result = transform("style(src=\"main.css\")\n");
        let (_, head, _) = doc_parts(&result);
        let link = head
            .children
            .iter()
            .find(|c| c.tag_name == "link")
            .expect("link in head");
        assert_eq!(
            link.attributes,
            vec![
                Attribute { name: "rel".into(), value: "\"stylesheet\"".into() },
                Attribute { name: "href".into(), value: "\"main.css\"".into() },
            ]
        );
    }

    #[test]
    fn component_definition_disappears_and_instance_merges() {
        let result = transform(
            "myComp(@)\n\tspan Hello\nmyComp\n\tp World\n",
        );
        let (_, _, body) = doc_parts(&result);
        assert_eq!(body.children.len(), 1);

        let inst = &body.children[0];
        assert_eq!(inst.tag_name, "div");
        assert_eq!(inst.classes.first().map(String::as_str), Some("myComp"));
        assert_eq!(inst.children.len(), 2);
        assert_eq!(inst.children[0].tag_name, "span");
        assert_eq!(inst.children[0].inner_text.as_deref(), Some("Hello"));
        assert_eq!(inst.children[1].tag_name, "p");
        assert_eq!(inst.children[1].inner_text.as_deref(), Some("World"));
        assert!(!inst.has_attr("@"));
    }

    #[test]
    fn instance_attributes_override_template_attributes() {
        let result = transform(
            "box(@ pad=1 margin=2)\nbox(pad=3).extra\n",
        );
        let (_, _, body) = doc_parts(&result);
        let inst = &body.children[0];
        assert_eq!(inst.attr("pad"), Some("3"));
        assert_eq!(inst.attr("margin"), Some("2"));
        assert_eq!(
            inst.classes.as_slice(),
            ["box".to_string(), "extra".to_string()]
        );
    }

    #[test]
    fn unknown_component_passes_through_unchanged() {
        // Use before definition falls through as an unrecognized tag
        let result = transform("myComp\nmyComp(@)\n\tspan t\n");
        let (_, _, body) = doc_parts(&result);
        assert_eq!(body.children.len(), 1);
        assert_eq!(body.children[0].tag_name, "myComp");
    }

    #[test]
    fn script_src_is_recorded_and_extension_rewritten() {
        let mut options = CompileOptions::new("test.spl");
        options.convert_script_extension = true;
        let result = transform_with("script(src=\"app.ts\")\n", options);

        assert_eq!(result.script_sources, vec!["\"app.js\"".to_string()]);
    }

    #[test]
    fn unquoted_dotted_src_is_cut_at_the_class_separator() {
        // An unquoted `.` ends the attribute group token the same way it
        // would start a class, so the extension never reaches the rewrite
        let mut options = CompileOptions::new("test.spl");
        options.convert_script_extension = true;
        let result = transform_with("script(src=plain.ts)\n", options);

        assert_eq!(result.script_sources, vec!["plai".to_string()]);
    }

    #[test]
    fn script_src_kept_verbatim_without_conversion() {
        let result = transform("script(src=\"app.ts\")\n");
        assert_eq!(result.script_sources, vec!["\"app.ts\"".to_string()]);
    }

    #[test]
    fn inline_scripts_go_through_the_compiler() {
        struct Upper;
        impl ScriptCompiler for Upper {
            fn compile(
                &self,
                source: &str,
                _file_name: Option<&str>,
                _minify: bool,
            ) -> Result<String, ScriptCompileError> {
                Ok(source.to_uppercase())
            }
        }

        let options = CompileOptions::new("test.spl");
        let parsed = spell_parser::parse("script alert(1)\n", &options).unwrap();
        let result = modify(parsed, &options, &NoImports, &Upper).unwrap();
        let (_, _, body) = doc_parts(&result);
        assert_eq!(body.children[0].inner_text.as_deref(), Some("ALERT(1)"));
    }

    #[test]
    fn import_without_path_is_fatal() {
        let options = CompileOptions::new("test.spl");
        let parsed = spell_parser::parse("@import\n", &options).unwrap();
        let err = modify(parsed, &options, &NoImports, &PassthroughScripts).unwrap_err();
        assert!(matches!(err, TransformError::MissingImportPath { .. }));
    }

    #[test]
    fn imports_splice_and_their_components_stay_usable() {
        struct OneFile;
        impl SourceReader for OneFile {
            fn read_text(&self, path: &str) -> std::io::Result<String> {
                assert_eq!(path, "parts/header.spl");
                Ok("banner(@)\n\th1 Site\nbanner\n".to_string())
            }
        }

        let options = CompileOptions::new("parts/index.spl");
        let parsed = spell_parser::parse(
            "@import header.spl\nbanner\n\tp extra\n",
            &options,
        )
        .unwrap();
        let result = modify(parsed, &options, &OneFile, &PassthroughScripts).unwrap();
        let (_, _, body) = doc_parts(&result);

        // One instance came from the imported file, one from the import site
        assert_eq!(body.children.len(), 2);
        assert_eq!(body.children[0].classes.first().map(String::as_str), Some("banner"));
        assert_eq!(body.children[1].children.last().unwrap().tag_name, "p");
    }
}
