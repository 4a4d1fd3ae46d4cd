//! Comprehensive parser tests for the build-file dialect.
//!
//! These cover the eight concrete scenarios in the specification plus
//! additional coverage of precedence, keyword arguments, dot-access
//! promotion, parameter lists, and the eleven-position comment-attachment
//! decision table.

use buildsyntax::ast::{Comment, Expression, Statement, StringPrefix};
use buildsyntax::error::ParseError;
use buildsyntax::parser::parse_source;

fn parse(src: &str) -> (buildsyntax::ast::Root, Vec<ParseError>) {
    parse_source(src).expect("tokenize")
}

fn only_statement(root: &buildsyntax::ast::Root) -> &Statement {
    assert_eq!(root.statements.len(), 1, "expected one statement, got {:?}", root.statements);
    &root.statements[0]
}

// ============================================
// 1. Assignment and calls
// ============================================

#[test]
fn test_parse_simple_assignment() {
    let (root, errors) = parse("x = 1");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::InfixExpression(infix) => {
                assert_eq!(infix.operator, "=");
                assert!(matches!(infix.left.as_ref().unwrap(), Expression::Identifier(i) if i.value == "x"));
                assert!(matches!(infix.right.as_ref().unwrap(), Expression::IntegerLiteral(i) if i.value == 1));
            }
            other => panic!("expected InfixExpression, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_call_with_positional_and_keyword_args() {
    let (root, errors) = parse("foo(a, b=2)");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::CallExpression(call) => {
                assert!(matches!(call.function.as_ref().unwrap(), Expression::Identifier(i) if i.value == "foo"));
                let args = call.args.as_ref().unwrap();
                assert_eq!(args.elements.len(), 2);
                assert!(matches!(&args.elements[0], Expression::Identifier(i) if i.value == "a"));
                match &args.elements[1] {
                    Expression::InfixExpression(kw) => {
                        assert_eq!(kw.operator, "=");
                        assert!(matches!(kw.left.as_ref().unwrap(), Expression::Identifier(i) if i.value == "b"));
                    }
                    other => panic!("expected keyword-arg InfixExpression, got {other:?}"),
                }
            }
            other => panic!("expected CallExpression, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_call_with_no_arguments() {
    let (root, errors) = parse("foo()");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::CallExpression(call) => assert_eq!(call.args.as_ref().unwrap().elements.len(), 0),
            other => panic!("expected CallExpression, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_nested_call_expressions() {
    let (root, errors) = parse("foo(bar(1))");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::CallExpression(outer) => {
                let args = outer.args.as_ref().unwrap();
                assert!(matches!(&args.elements[0], Expression::CallExpression(_)));
            }
            other => panic!("expected CallExpression, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

// ============================================
// 2. Comments (top-level)
// ============================================

#[test]
fn test_top_level_comment_then_blank_line_becomes_comment_statement() {
    let (root, errors) = parse("# hdr\n\nx = 1");
    assert!(errors.is_empty());
    assert_eq!(root.statements.len(), 2);
    match &root.statements[0] {
        Statement::Comment(c) => assert_eq!(c.token.value, "# hdr"),
        other => panic!("expected CommentStatement, got {other:?}"),
    }
    assert!(matches!(root.statements[1], Statement::Expression(_)));
}

#[test]
fn test_leading_comment_without_blank_line_attaches_to_next_statement() {
    let (root, errors) = parse("# hdr\nx = 1");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => {
            let leading = stmt.comments.leading.as_ref().expect("leading comment");
            assert_eq!(leading.lines()[0].text, "# hdr");
        }
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_leading_comment_attaches_to_function_definition() {
    let (root, errors) = parse("# a rule\ndef f():\n    pass");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::FunctionDefinition(def) => {
            assert!(def.comments.leading.is_some());
        }
        other => panic!("expected FunctionDefinition, got {other:?}"),
    }
}

// ============================================
// 3. Function definitions
// ============================================

#[test]
fn test_function_definition_with_typed_default_param_and_return_annotation() {
    let (root, errors) = parse("def f(x: int = 1) -> None:\n    return x");
    assert!(errors.is_empty(), "{:?}", errors);
    match only_statement(&root) {
        Statement::FunctionDefinition(def) => {
            assert_eq!(def.name.value, "f");
            assert_eq!(def.params.elements.len(), 1);
            let p = &def.params.elements[0];
            assert!(matches!(&p.name, Expression::Identifier(i) if i.value == "x"));
            assert!(p.type_hint.is_some());
            assert!(p.default_value.is_some());
            assert!(matches!(def.type_hint.as_ref().unwrap(), Expression::Identifier(i) if i.value == "None"));
            assert_eq!(def.body.statements.len(), 1);
            match &def.body.statements[0] {
                Statement::Expression(stmt) => {
                    assert!(matches!(stmt.expression.as_ref().unwrap(), Expression::Identifier(i) if i.value == "x"));
                }
                other => panic!("expected ExpressionStatement inside body, got {other:?}"),
            }
        }
        other => panic!("expected FunctionDefinition, got {other:?}"),
    }
}

#[test]
fn test_function_definition_no_return_annotation() {
    let (root, errors) = parse("def f(x):\n    x");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::FunctionDefinition(def) => assert!(def.type_hint.is_none()),
        other => panic!("expected FunctionDefinition, got {other:?}"),
    }
}

#[test]
fn test_function_definition_multiple_parameters() {
    let (root, errors) = parse("def f(a, b: int, c=1):\n    pass");
    assert!(errors.is_empty(), "{:?}", errors);
    match only_statement(&root) {
        Statement::FunctionDefinition(def) => {
            assert_eq!(def.params.elements.len(), 3);
            assert!(def.params.elements[0].type_hint.is_none());
            assert!(def.params.elements[1].type_hint.is_some());
            assert!(def.params.elements[2].default_value.is_some());
        }
        other => panic!("expected FunctionDefinition, got {other:?}"),
    }
}

#[test]
fn test_function_body_stops_at_dedent() {
    let (root, errors) = parse("def f():\n    x = 1\ny = 2");
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(root.statements.len(), 2);
    match &root.statements[0] {
        Statement::FunctionDefinition(def) => assert_eq!(def.body.statements.len(), 1),
        other => panic!("expected FunctionDefinition, got {other:?}"),
    }
    assert!(matches!(root.statements[1], Statement::Expression(_)));
}

#[test]
fn test_function_body_with_multiple_statements() {
    let (root, errors) = parse("def f():\n    x = 1\n    y = 2");
    assert!(errors.is_empty(), "{:?}", errors);
    match only_statement(&root) {
        Statement::FunctionDefinition(def) => assert_eq!(def.body.statements.len(), 2),
        other => panic!("expected FunctionDefinition, got {other:?}"),
    }
}

// ============================================
// 4. Literals
// ============================================

#[test]
fn test_map_literal_with_trailing_comma_tolerated() {
    let (root, errors) = parse("{\"k\": \"v\", \"k2\": \"v2\",}");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::MapLiteral(map) => {
                assert_eq!(map.map.pairs.len(), 2);
                assert!(map.map.comments.trailing.is_none());
            }
            other => panic!("expected MapLiteral, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_empty_map_literal() {
    let (root, errors) = parse("{}");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::MapLiteral(map) => assert_eq!(map.map.pairs.len(), 0),
            other => panic!("expected MapLiteral, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_fstring_literal() {
    let (root, errors) = parse("f\"hello\"");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::StringLiteral(s) => {
                assert_eq!(s.value, "hello");
                assert!(matches!(s.prefix, StringPrefix::F));
            }
            other => panic!("expected StringLiteral, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_docstring_literal() {
    let (root, errors) = parse("\"\"\"doc\"\"\"");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::StringLiteral(s) => {
                assert_eq!(s.value, "doc");
                assert!(matches!(s.prefix, StringPrefix::Doc));
            }
            other => panic!("expected StringLiteral, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_boolean_literals() {
    let (root, errors) = parse("True");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => {
            assert!(matches!(stmt.expression.as_ref().unwrap(), Expression::BooleanLiteral(b) if b.value));
        }
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
    let (root, errors) = parse("False");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => {
            assert!(matches!(stmt.expression.as_ref().unwrap(), Expression::BooleanLiteral(b) if !b.value));
        }
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_array_literal_parses_elements() {
    let (root, errors) = parse("[1, 2, 3]");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::ArrayLiteral(arr) => assert_eq!(arr.elements.elements.len(), 3),
            other => panic!("expected ArrayLiteral, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_empty_array_literal() {
    let (root, errors) = parse("[]");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::ArrayLiteral(arr) => assert_eq!(arr.elements.elements.len(), 0),
            other => panic!("expected ArrayLiteral, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_array_with_trailing_comma() {
    let (root, errors) = parse("[1, 2,]");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::ArrayLiteral(arr) => assert_eq!(arr.elements.elements.len(), 2),
            other => panic!("expected ArrayLiteral, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

// ============================================
// 5. Precedence and operators
// ============================================

#[test]
fn test_product_binds_tighter_than_sum() {
    let (root, errors) = parse("1 + 2 * 3");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::InfixExpression(outer) => {
                assert_eq!(outer.operator, "+");
                match outer.right.as_ref().unwrap() {
                    Expression::InfixExpression(inner) => assert_eq!(inner.operator, "*"),
                    other => panic!("expected nested product, got {other:?}"),
                }
            }
            other => panic!("expected InfixExpression, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_dot_binds_tighter_than_call_arguments() {
    let (root, errors) = parse("foo(a.b)");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::CallExpression(call) => {
                let args = call.args.as_ref().unwrap();
                assert!(matches!(&args.elements[0], Expression::DotExpression(_)));
            }
            other => panic!("expected CallExpression, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_index_expression_parses() {
    let (root, errors) = parse("x[0]");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::IndexExpression(idx) => {
                assert!(matches!(idx.left.as_ref().unwrap(), Expression::Identifier(i) if i.value == "x"));
                assert!(matches!(idx.index.as_ref().unwrap(), Expression::IntegerLiteral(i) if i.value == 0));
            }
            other => panic!("expected IndexExpression, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_comparison_operators_parse_as_infix() {
    for (src, op) in [("a < b", "<"), ("a > b", ">"), ("a <= b", "<="), ("a >= b", ">="), ("a != b", "!=")] {
        let (root, errors) = parse(src);
        assert!(errors.is_empty(), "{src}: {:?}", errors);
        match only_statement(&root) {
            Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
                Expression::InfixExpression(infix) => assert_eq!(infix.operator, op),
                other => panic!("{src}: expected InfixExpression, got {other:?}"),
            },
            other => panic!("{src}: expected ExpressionStatement, got {other:?}"),
        }
    }
}

#[test]
fn test_prefix_minus_and_bang() {
    let (root, errors) = parse("-1");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => {
            assert!(matches!(stmt.expression.as_ref().unwrap(), Expression::PrefixExpression(p) if p.operator == "-"));
        }
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
    let (root, errors) = parse("!x");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => {
            assert!(matches!(stmt.expression.as_ref().unwrap(), Expression::PrefixExpression(p) if p.operator == "!"));
        }
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_grouped_expression_unwraps_to_inner() {
    let (root, errors) = parse("(1)");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => assert!(matches!(stmt.expression.as_ref().unwrap(), Expression::IntegerLiteral(_))),
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_grouped_expression_affects_precedence() {
    let (root, errors) = parse("(1 + 2) * 3");
    assert!(errors.is_empty());
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::InfixExpression(outer) => {
                assert_eq!(outer.operator, "*");
                match outer.left.as_ref().unwrap() {
                    Expression::InfixExpression(inner) => assert_eq!(inner.operator, "+"),
                    other => panic!("expected nested sum on the left, got {other:?}"),
                }
            }
            other => panic!("expected InfixExpression, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

// ============================================
// 6. Comments inside comma-separated lists
// ============================================

#[test]
fn test_comment_before_first_array_element_is_leading() {
    let (root, errors) = parse("[\n    # first\n    1,\n    2,\n]");
    assert!(errors.is_empty(), "{:?}", errors);
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::ArrayLiteral(arr) => {
                assert_eq!(arr.elements.elements.len(), 2);
                let first = arr.elements.elements[0].token();
                assert_eq!(first.value, "1");
            }
            other => panic!("expected ArrayLiteral, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_comment_after_final_element_before_closing_delimiter_is_list_trailing() {
    let (root, errors) = parse("[1, 2\n    # trailing\n]");
    assert!(errors.is_empty(), "{:?}", errors);
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::ArrayLiteral(arr) => {
                let trailing = arr.elements.comments.trailing.as_ref().expect("trailing comment");
                assert_eq!(trailing.lines()[0].text, "# trailing");
            }
            other => panic!("expected ArrayLiteral, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_comment_between_map_key_and_colon_is_key_trailing() {
    let (root, errors) = parse("{\"k\" # note\n: \"v\"}");
    assert!(errors.is_empty(), "{:?}", errors);
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::MapLiteral(map) => {
                let pair = &map.map.pairs[0];
                let trailing = pair.key.token();
                assert_eq!(trailing.value, "k");
            }
            other => panic!("expected MapLiteral, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_contiguous_leading_comments_glue_into_a_group_at_top_level() {
    let (root, errors) = parse("# first\n# second\nx = 1");
    assert!(errors.is_empty(), "{:?}", errors);
    match only_statement(&root) {
        Statement::Expression(stmt) => {
            let leading = stmt.comments.leading.as_ref().expect("leading comment");
            let lines = leading.lines();
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[0].text, "# first");
            assert_eq!(lines[1].text, "# second");
        }
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_contiguous_trailing_comments_inside_list_glue_into_a_group() {
    let (root, errors) = parse("[1\n    # a\n    # b\n, 2]");
    assert!(errors.is_empty(), "{:?}", errors);
    match only_statement(&root) {
        Statement::Expression(stmt) => match stmt.expression.as_ref().unwrap() {
            Expression::ArrayLiteral(arr) => {
                let trailing = arr.elements.elements[0]
                    .token();
                assert_eq!(trailing.value, "1");
                let trailing_comment = match &arr.elements.elements[0] {
                    Expression::IntegerLiteral(i) => i.comments.trailing.as_ref().expect("trailing comment"),
                    other => panic!("expected IntegerLiteral, got {other:?}"),
                };
                let lines = trailing_comment.lines();
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0].text, "# a");
                assert_eq!(lines[1].text, "# b");
            }
            other => panic!("expected ArrayLiteral, got {other:?}"),
        },
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

// ============================================
// 7. Non-fatal error recovery
// ============================================

#[test]
fn test_integer_overflow_records_error_and_omits_node() {
    let (root, errors) = parse("99999999999999999999999999");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::IntegerParseError { .. }));
    match only_statement(&root) {
        Statement::Expression(stmt) => assert!(stmt.expression.is_none()),
        other => panic!("expected ExpressionStatement, got {other:?}"),
    }
}

#[test]
fn test_missing_prefix_handler_records_error() {
    let (_root, errors) = parse(")");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::MissingPrefixParseFunctionError { .. }));
}

#[test]
fn test_unclosed_array_records_next_token_error() {
    let (_root, errors) = parse("[1, 2");
    assert!(!errors.is_empty());
    assert!(errors.iter().any(|e| matches!(e, ParseError::NextTokenError { .. })));
}

#[test]
fn test_malformed_function_header_records_error_and_stops() {
    let (root, errors) = parse("def (x):\n    pass");
    assert!(!errors.is_empty());
    // the malformed def produces no FunctionDefinition node
    assert!(root.statements.is_empty() || !matches!(root.statements[0], Statement::FunctionDefinition(_)));
}

// ============================================
// 8. return/comment dispatch quirk (documented in DESIGN.md)
// ============================================

#[test]
fn test_return_statement_has_no_dedicated_node_and_becomes_expression_statement() {
    let (root, errors) = parse("def f():\n    return 1");
    assert!(errors.is_empty(), "{:?}", errors);
    match only_statement(&root) {
        Statement::FunctionDefinition(def) => match &def.body.statements[0] {
            Statement::Expression(stmt) => {
                assert!(matches!(stmt.expression.as_ref().unwrap(), Expression::IntegerLiteral(i) if i.value == 1));
                let leading = stmt.comments.leading.as_ref().expect("pseudo-comment from `return`");
                match leading {
                    Comment::Single(c) => assert_eq!(c.text, "return"),
                    other => panic!("expected Single, got {other:?}"),
                }
            }
            other => panic!("expected ExpressionStatement, got {other:?}"),
        },
        other => panic!("expected FunctionDefinition, got {other:?}"),
    }
}
