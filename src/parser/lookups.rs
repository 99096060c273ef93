use super::{parser::Parser, stmt::*};

pub fn create_stmt_lookups(parser: &mut Parser) {
    parser.stmt("let", parse_var_decl_stmt);
    parser.stmt("function", parse_fn_decl_stmt);
    parser.stmt("if", parse_if_stmt);
    parser.stmt("class", parse_class_decl_stmt);
    parser.stmt("return", parse_return_stmt);
}
