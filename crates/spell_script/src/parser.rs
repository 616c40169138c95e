use swc_core::{
    common::{BytePos, Span},
    ecma::ast::{EsVersion, Module},
};
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsConfig};

pub fn parse_typescript_module(
    input: &str,
    span_start: u32,
    ts_config: TsConfig,
) -> Result<Module, swc_ecma_parser::error::Error> {
    let span = Span::new(
        BytePos(span_start),
        BytePos(span_start + input.len() as u32),
    );

    let lexer = Lexer::new(
        Syntax::Typescript(ts_config),
        EsVersion::EsNext,
        StringInput::new(input, span.lo, span.hi),
        None,
    );

    let mut parser = Parser::new_from(lexer);

    parser.parse_typescript_module()
}
