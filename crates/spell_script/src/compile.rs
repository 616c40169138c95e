use base64::{engine::general_purpose, Engine as _};
use swc_core::{
    common::{errors::HANDLER, sync::Lrc, FilePathMapping, Globals, Mark, SourceMap, GLOBALS},
    ecma::{
        ast::{Module, Program},
        transforms::{base::resolver, typescript::strip},
        visit::{FoldWith, VisitMutWith},
    },
};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};
use swc_ecma_parser::TsConfig;
use swc_error_reporters::handler::{try_with_handler, HandlerOpts};

use crate::error::ScriptError;
use crate::parser::parse_typescript_module;

/// Lowers a TypeScript module to JavaScript: parse, resolve bindings,
/// strip type annotations, emit. When `file_name` is given, the output
/// gains an inline source map naming that file.
pub fn compile_typescript(
    source: &str,
    file_name: Option<&str>,
    minify: bool,
) -> Result<String, ScriptError> {
    let module = parse_typescript_module(
        source,
        0,
        TsConfig {
            tsx: true,
            ..Default::default()
        },
    )?;

    let cm: Lrc<SourceMap> = Lrc::new(SourceMap::new(FilePathMapping::empty()));
    let module = GLOBALS.set(&Globals::new(), || {
        try_with_handler(cm.clone(), HandlerOpts::default(), |handler| {
            HANDLER.set(handler, || {
                let mut program = Program::Module(module);
                let unresolved_mark = Mark::new();
                let top_level_mark = Mark::new();

                program.visit_mut_with(&mut resolver(unresolved_mark, top_level_mark, true));
                Ok(program
                    .fold_with(&mut strip(unresolved_mark, top_level_mark))
                    .expect_module())
            })
        })
    })
    .map_err(|e| ScriptError::transform(e.to_string()))?;

    let mut code = emit_module(&module, cm, minify)?;

    if let Some(file_name) = file_name {
        code.push('\n');
        code.push_str(&source_map_trailer(source, file_name));
    }

    Ok(code)
}

fn emit_module(module: &Module, cm: Lrc<SourceMap>, minify: bool) -> Result<String, ScriptError> {
    // Emitting the result requires some setup with SWC
    let mut buff: Vec<u8> = Vec::with_capacity(128);
    let writer: JsWriter<&mut Vec<u8>> = JsWriter::new(cm.clone(), "\n", &mut buff, None);

    let mut emitter_cfg = swc_ecma_codegen::Config::default();
    emitter_cfg.minify = minify;

    let mut emitter = Emitter {
        cfg: emitter_cfg,
        comments: None,
        wr: writer,
        cm,
    };

    module
        .emit_with(&mut emitter)
        .map_err(|e| ScriptError::emit(e.to_string()))?;

    String::from_utf8(buff).map_err(|e| ScriptError::emit(e.to_string()))
}

/// Builds the `//# sourceMappingURL` data-URL trailer. The map names the
/// originating file and carries its content so browser devtools can show
/// the TypeScript source.
fn source_map_trailer(source: &str, file_name: &str) -> String {
    let map = serde_json::json!({
        "version": 3,
        "file": file_name,
        "sources": [file_name],
        "sourcesContent": [source],
        "names": [],
        "mappings": "",
    });

    format!(
        "//# sourceMappingURL=data:application/json;base64,{}",
        general_purpose::STANDARD.encode(map.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_type_annotations() {
        let out = compile_typescript("const greeting: string = 'hi';", None, false).unwrap();
        assert!(out.contains("const greeting = 'hi';"), "got: {out}");
        assert!(!out.contains(": string"));
    }

    #[test]
    fn strips_interfaces_entirely() {
        let out = compile_typescript("interface A { x: number }\nlet a = 1;", None, false).unwrap();
        assert!(!out.contains("interface"));
        assert!(out.contains("let a = 1;"));
    }

    #[test]
    fn minified_output_drops_whitespace() {
        let out = compile_typescript("let a = 1;\nlet b = 2;", None, true).unwrap();
        assert!(!out.contains('\n'), "got: {out}");
    }

    #[test]
    fn source_map_trailer_names_the_file() {
        let out = compile_typescript("let a: number = 1;", Some("main.ts"), false).unwrap();
        let (code, trailer) = out
            .rsplit_once('\n')
            .expect("expected a source map on its own line");
        assert!(code.contains("let a = 1;"));
        let b64 = trailer
            .strip_prefix("//# sourceMappingURL=data:application/json;base64,")
            .expect("expected a data-URL source map");
        let decoded = general_purpose::STANDARD.decode(b64).unwrap();
        let map: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(map["sources"][0], "main.ts");
        assert_eq!(map["sourcesContent"][0], "let a: number = 1;");
    }

    #[test]
    fn rejects_broken_syntax() {
        assert!(compile_typescript("let = ;", None, false).is_err());
    }
}
