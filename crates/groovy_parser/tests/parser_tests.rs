//! Parser integration tests.
//!
//! Verifies the tree shapes the parser builds from Groovy source, the
//! warnings it raises and the errors that stop it.

use groovy_ast::node::AstNode;
use groovy_ast::syntax_kind::SyntaxKind;
use groovy_diagnostics::{messages, GroovyError};
use groovy_options::ParserOptions;
use groovy_parser::{parse, ParseOutput};

/// Helper: parse with default options, panicking on failure.
fn parse_ok(source: &str) -> ParseOutput {
    match parse(source, Some("test.groovy"), &ParserOptions::default()) {
        Ok(output) => output,
        Err(error) => panic!("source {:?} failed: {}", source, error.diagnostic().message_text),
    }
}

fn parse_err(source: &str) -> GroovyError {
    match parse(source, Some("test.groovy"), &ParserOptions::default()) {
        Ok(output) => panic!("source {:?} parsed: {}", source, output.root.to_sexpr()),
        Err(error) => error,
    }
}

/// Helper: the s-expression of the first top-level statement.
fn first_statement(source: &str) -> String {
    let output = parse_ok(source);
    output.root.first_child().map(AstNode::to_sexpr).unwrap_or_default()
}

fn statements(source: &str) -> Vec<String> {
    parse_ok(source).root.children.iter().map(AstNode::to_sexpr).collect()
}

fn warning_codes(source: &str) -> Vec<u32> {
    parse_ok(source).warnings.iter().map(|w| w.code).collect()
}

// ============================================================================
// Compilation unit
// ============================================================================

#[test]
fn test_empty_unit() {
    let output = parse_ok("");
    assert!(output.root.is(SyntaxKind::CompilationUnit));
    assert!(output.root.children.is_empty());
}

#[test]
fn test_shebang_is_not_attached() {
    let output = parse_ok("#!/usr/bin/env groovy\nprintln 1\n");
    assert_eq!(output.root.children.len(), 1);
}

#[test]
fn test_package_and_imports() {
    let stmts = statements("package a.b\nimport java.util.*\nimport static java.lang.Math.max\nimport foo.Bar as Baz\n");
    assert_eq!(stmts[0], "(PACKAGE_DEF ANNOTATIONS (DOT a b))");
    assert_eq!(stmts[1], "(IMPORT ANNOTATIONS (DOT (DOT java util) STAR))");
    assert_eq!(stmts[2], "(STATIC_IMPORT ANNOTATIONS (DOT (DOT (DOT java lang) Math) max))");
    assert_eq!(stmts[3], "(IMPORT ANNOTATIONS (LITERAL_as (DOT foo Bar) Baz))");
}

#[test]
fn test_annotated_package() {
    let stmts = statements("@Grab('x')\npackage demo\n");
    assert_eq!(stmts[0], "(PACKAGE_DEF (ANNOTATIONS (ANNOTATION Grab \"x\")) demo)");
}

#[test]
fn test_missing_separator_is_error() {
    let error = parse_err("a = 1 b = 2");
    assert_eq!(error.diagnostic().code, messages::UNEXPECTED_TOKEN.code);
}

#[test]
fn test_error_names_file_and_position() {
    let error = parse_err("x = (1 + \n");
    let diagnostic = error.diagnostic();
    assert_eq!(diagnostic.file.as_deref(), Some("test.groovy"));
    assert!(diagnostic.position.is_some());
}

#[test]
fn test_unexpected_eof_message() {
    let error = parse_err("x = ");
    assert_eq!(error.diagnostic().message_text, "unexpected token: <EOF>");
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_precedence() {
    assert_eq!(first_statement("a + b * c"), "(EXPR (PLUS a (STAR b c)))");
    assert_eq!(first_statement("a - b - c"), "(EXPR (MINUS (MINUS a b) c))");
    assert_eq!(first_statement("a || b && c"), "(EXPR (LOR a (LAND b c)))");
    assert_eq!(first_statement("a == b < c"), "(EXPR (EQUAL a (LT b c)))");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(first_statement("a = b = 1"), "(EXPR (ASSIGN a (ASSIGN b 1)))");
    assert_eq!(first_statement("a += 2"), "(EXPR (PLUS_ASSIGN a 2))");
}

#[test]
fn test_shift_operator_is_single_node() {
    assert_eq!(first_statement("x = a >> b"), "(EXPR (ASSIGN x (SR a b)))");
}

#[test]
fn test_relational_does_not_chain() {
    let error = parse_err("a < b < c");
    assert_eq!(error.diagnostic().code, messages::UNEXPECTED_TOKEN.code);
}

#[test]
fn test_ternary() {
    assert_eq!(first_statement("x = a ? b : c"), "(EXPR (ASSIGN x (QUESTION a b c)))");
}

#[test]
fn test_ranges() {
    assert_eq!(first_statement("r = 1..5"), "(EXPR (ASSIGN r (RANGE_INCLUSIVE 1 5)))");
    assert_eq!(first_statement("r = 1..<5"), "(EXPR (ASSIGN r (RANGE_EXCLUSIVE 1 5)))");
}

#[test]
fn test_unary_and_postfix() {
    assert_eq!(first_statement("x = -y"), "(EXPR (ASSIGN x (UNARY_MINUS y)))");
    assert_eq!(first_statement("x = !y"), "(EXPR (ASSIGN x (LNOT y)))");
    assert_eq!(first_statement("i++"), "(EXPR (POST_INC i))");
    assert_eq!(first_statement("++i"), "(EXPR (INC i))");
}

#[test]
fn test_instanceof_and_as_take_types() {
    assert_eq!(first_statement("x instanceof String"), "(EXPR (LITERAL_instanceof x (TYPE String)))");
    assert_eq!(first_statement("y = x as List"), "(EXPR (ASSIGN y (LITERAL_as x (TYPE List))))");
}

#[test]
fn test_type_cast() {
    assert_eq!(first_statement("x = (int) y"), "(EXPR (ASSIGN x (TYPECAST (TYPE LITERAL_int) y)))");
    assert_eq!(first_statement("x = (String) y"), "(EXPR (ASSIGN x (TYPECAST (TYPE String) y)))");
    assert_eq!(first_statement("x = (a) - b"), "(EXPR (ASSIGN x (MINUS a b)))");
}

#[test]
fn test_navigation() {
    assert_eq!(first_statement("a.b.c"), "(EXPR (DOT (DOT a b) c))");
    assert_eq!(first_statement("a?.b"), "(EXPR (OPTIONAL_DOT a b))");
    assert_eq!(first_statement("a*.b"), "(EXPR (SPREAD_DOT a b))");
    assert_eq!(first_statement("a.&b"), "(EXPR (MEMBER_POINTER a b))");
    assert_eq!(first_statement("a.@b"), "(EXPR (DOT a (SELECT_SLOT b)))");
    assert_eq!(first_statement("a.class"), "(EXPR (DOT a LITERAL_class))");
}

#[test]
fn test_newline_before_dot_continues_path() {
    assert_eq!(first_statement("a\n  .b()"), "(EXPR (METHOD_CALL (DOT a b) ELIST))");
}

#[test]
fn test_calls_and_indexing() {
    assert_eq!(first_statement("foo(1, 2)"), "(EXPR (METHOD_CALL foo (ELIST 1 2)))");
    assert_eq!(first_statement("a[0]"), "(EXPR (INDEX_OP a (ELIST 0)))");
    assert_eq!(first_statement("foo(a: 1)"), "(EXPR (METHOD_CALL foo (ELIST (LABELED_ARG a 1))))");
    assert_eq!(first_statement("foo(*args)"), "(EXPR (METHOD_CALL foo (ELIST (SPREAD_ARG args))))");
    assert_eq!(first_statement("foo(*:opts)"), "(EXPR (METHOD_CALL foo (ELIST (SPREAD_MAP_ARG opts))))");
}

#[test]
fn test_list_and_map_constructors() {
    assert_eq!(first_statement("x = [1, 2]"), "(EXPR (ASSIGN x (LIST_CONSTRUCTOR (ELIST 1 2))))");
    assert_eq!(first_statement("x = []"), "(EXPR (ASSIGN x (LIST_CONSTRUCTOR ELIST)))");
    assert_eq!(first_statement("x = [:]"), "(EXPR (ASSIGN x MAP_CONSTRUCTOR))");
    assert_eq!(
        first_statement("x = [a: 1, (k): 2]"),
        "(EXPR (ASSIGN x (MAP_CONSTRUCTOR (ELIST (LABELED_ARG a 1) (LABELED_ARG k 2)))))"
    );
}

#[test]
fn test_new_expressions() {
    assert_eq!(first_statement("x = new Foo(1)"), "(EXPR (ASSIGN x (LITERAL_new (TYPE Foo) (ELIST 1))))");
    assert_eq!(
        first_statement("x = new int[3]"),
        "(EXPR (ASSIGN x (LITERAL_new (TYPE LITERAL_int) (ARRAY_DECLARATOR 3))))"
    );
    let anonymous = first_statement("x = new Runnable() { void run() {} }");
    assert!(anonymous.contains("(LITERAL_new (TYPE Runnable) ELIST (OBJBLOCK (METHOD_DEF"), "{}", anonymous);
}

#[test]
fn test_string_constructor() {
    assert_eq!(
        first_statement("x = \"a${1+1}b\""),
        "(EXPR (ASSIGN x (STRING_CONSTRUCTOR \"a\" (PLUS 1 1) \"b\")))"
    );
    assert_eq!(
        first_statement("x = \"hi $user.name!\""),
        "(EXPR (ASSIGN x (STRING_CONSTRUCTOR \"hi \" (DOT user name) \"!\")))"
    );
}

#[test]
fn test_string_value_headed_by_this_or_super() {
    assert_eq!(
        first_statement("x = \"$this\""),
        "(EXPR (ASSIGN x (STRING_CONSTRUCTOR \"\" LITERAL_this \"\")))"
    );
    assert_eq!(
        first_statement("x = \"$this.name\""),
        "(EXPR (ASSIGN x (STRING_CONSTRUCTOR \"\" (DOT LITERAL_this name) \"\")))"
    );
    let sexpr = first_statement("x = \"v=$super.x!\"");
    assert!(sexpr.contains("(DOT LITERAL_super x)"), "{}", sexpr);
}

// ============================================================================
// Command calls and closures
// ============================================================================

#[test]
fn test_command_call_matches_parenthesized_call() {
    let command = parse_ok("println \"hi\", 3+4").root;
    let call = parse_ok("println(\"hi\", 3+4)").root;
    let command_call = command.find_descendant(SyntaxKind::MethodCall).unwrap();
    let paren_call = call.find_descendant(SyntaxKind::MethodCall).unwrap();
    assert!(command_call.same_shape(paren_call), "{} vs {}", command_call.to_sexpr(), paren_call.to_sexpr());
}

#[test]
fn test_dotted_command_head() {
    assert_eq!(first_statement("System.out.println x"), "(EXPR (METHOD_CALL (DOT (DOT System out) println) (ELIST x)))");
}

#[test]
fn test_command_with_named_arguments() {
    assert_eq!(
        first_statement("task name: 'x', type: Copy"),
        "(EXPR (METHOD_CALL task (ELIST (LABELED_ARG name \"x\") (LABELED_ARG type Copy))))"
    );
}

#[test]
fn test_ambiguous_command_operator() {
    let error = parse_err("foo -1");
    assert_eq!(error.diagnostic().code, messages::AMBIGUOUS_COMMAND_OPERATOR.code);
    assert_eq!(first_statement("foo - 1"), "(EXPR (MINUS foo 1))");
}

#[test]
fn test_trailing_closure() {
    assert_eq!(
        first_statement("foo { it * 2 }"),
        "(EXPR (METHOD_CALL foo (CLOSABLE_BLOCK IMPLICIT_PARAMETERS (EXPR (STAR it 2)))))"
    );
    assert_eq!(
        first_statement("list.each() { println it }"),
        "(EXPR (METHOD_CALL (DOT list each) ELIST (CLOSABLE_BLOCK IMPLICIT_PARAMETERS (EXPR (METHOD_CALL println (ELIST it))))))"
    );
}

#[test]
fn test_closure_parameters() {
    assert_eq!(
        first_statement("c = { -> println 1 }"),
        "(EXPR (ASSIGN c (CLOSABLE_BLOCK PARAMETERS (EXPR (METHOD_CALL println (ELIST 1))))))"
    );
    assert_eq!(
        first_statement("c = { String a, b = 2 -> a }"),
        "(EXPR (ASSIGN c (CLOSABLE_BLOCK (PARAMETERS (PARAMETER_DEF MODIFIERS (TYPE String) a) (PARAMETER_DEF MODIFIERS TYPE b (ASSIGN 2))) (EXPR a))))"
    );
}

#[test]
fn test_legacy_closure_parameters() {
    let options = ParserOptions::default().with_legacy_closure_syntax(true);
    let output = parse("c = { |a| a }", None, &options).unwrap();
    let closure = output.root.find_descendant(SyntaxKind::ClosableBlock).unwrap();
    assert_eq!(closure.to_sexpr(), "(CLOSABLE_BLOCK (PARAMETERS (PARAMETER_DEF MODIFIERS TYPE a)) (EXPR a))");
}

#[test]
fn test_bare_block_at_unit_start_is_error() {
    let error = parse_err("{ println 1 }");
    assert_eq!(error.diagnostic().code, messages::AMBIGUOUS_BLOCK_AFTER_NEWLINE.code);
    assert!(error.diagnostic().fix.is_some());
}

#[test]
fn test_bare_block_after_newline_is_error() {
    let error = parse_err("x = 1\n{ println 1 }");
    assert_eq!(error.diagnostic().code, messages::AMBIGUOUS_BLOCK_AFTER_NEWLINE.code);
}

#[test]
fn test_bare_block_after_semicolon_warns() {
    let output = parse_ok("x = 1; { println 1 }");
    assert_eq!(output.root.children[1].kind, SyntaxKind::Slist);
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].code, messages::AMBIGUOUS_BLOCK.code);
}

#[test]
fn test_closure_with_parameters_after_newline_warns() {
    assert_eq!(warning_codes("x = 1\n{ a -> a }"), vec![messages::STATEMENT_MAY_CONTINUE_PREVIOUS.code]);
}

#[test]
fn test_statement_starting_with_operator_warns() {
    assert_eq!(warning_codes("x = 1\n-x"), vec![messages::STATEMENT_MAY_CONTINUE_PREVIOUS.code]);
    assert_eq!(warning_codes("x = 1\n(x)"), vec![messages::STATEMENT_MAY_CONTINUE_PREVIOUS.code]);
    assert!(warning_codes("x = 1; -x").is_empty());
}

#[test]
fn test_labeled_block() {
    assert_eq!(
        first_statement("L: { println 1 }"),
        "(LABELED_STAT L (SLIST (EXPR (METHOD_CALL println (ELIST 1)))))"
    );
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_if_else() {
    assert_eq!(
        first_statement("if (a) b() else c()"),
        "(LITERAL_if (EXPR a) (EXPR (METHOD_CALL b ELIST)) (EXPR (METHOD_CALL c ELIST)))"
    );
    assert_eq!(first_statement("if (a) { }\nelse { }"), "(LITERAL_if (EXPR a) SLIST SLIST)");
}

#[test]
fn test_newline_before_body_warns() {
    assert_eq!(warning_codes("if (a)\n  b()"), vec![messages::NEWLINE_BEFORE_BODY.code]);
    assert_eq!(warning_codes("while (a)\n  b()"), vec![messages::NEWLINE_BEFORE_BODY.code]);
    assert!(warning_codes("if (a) {\n  b()\n}").is_empty());
}

#[test]
fn test_sub_statement_closure_with_parameters() {
    assert_eq!(
        first_statement("if (a) { x -> x }"),
        "(LITERAL_if (EXPR a) (CLOSABLE_BLOCK (PARAMETERS (PARAMETER_DEF MODIFIERS TYPE x)) (EXPR x)))"
    );
}

#[test]
fn test_while_with_empty_body() {
    assert_eq!(first_statement("while (x) ;"), "(LITERAL_while (EXPR x) EMPTY_STAT)");
}

#[test]
fn test_for_loops() {
    assert_eq!(
        first_statement("for (x in items) { }"),
        "(LITERAL_for (FOR_IN_ITERABLE x items) SLIST)"
    );
    assert_eq!(
        first_statement("for (String s : items) { }"),
        "(LITERAL_for (FOR_EACH_CLAUSE (VARIABLE_DEF MODIFIERS (TYPE String) s) items) SLIST)"
    );
    assert_eq!(
        first_statement("for (int i = 0; i < n; i++) { }"),
        "(LITERAL_for (FOR_INIT (VARIABLE_DEF MODIFIERS (TYPE LITERAL_int) i (ASSIGN 0))) (FOR_CONDITION (LT i n)) (FOR_ITERATOR (ELIST (POST_INC i))) SLIST)"
    );
    assert_eq!(first_statement("for (;;) { }"), "(LITERAL_for FOR_INIT FOR_CONDITION FOR_ITERATOR SLIST)");
}

#[test]
fn test_switch() {
    let sexpr = first_statement("switch (x) {\ncase 1:\ncase 2: a()\nbreak\ndefault: b()\n}");
    assert_eq!(
        sexpr,
        "(LITERAL_switch (EXPR x) (CASE_GROUP (LITERAL_case 1) (LITERAL_case 2) (SLIST (EXPR (METHOD_CALL a ELIST)) LITERAL_break)) (CASE_GROUP LITERAL_default (SLIST (EXPR (METHOD_CALL b ELIST)))))"
    );
}

#[test]
fn test_try_catch_finally() {
    assert_eq!(
        first_statement("try { a() } catch (IOException e) { } finally { }"),
        "(LITERAL_try (SLIST (EXPR (METHOD_CALL a ELIST))) (LITERAL_catch (PARAMETER_DEF MODIFIERS (TYPE IOException) e) SLIST) (LITERAL_finally SLIST))"
    );
}

#[test]
fn test_jump_statements() {
    assert_eq!(statements("return\nreturn x\nbreak outer\ncontinue\nthrow e"), vec![
        "LITERAL_return",
        "(LITERAL_return x)",
        "(LITERAL_break outer)",
        "LITERAL_continue",
        "(LITERAL_throw e)",
    ]);
}

#[test]
fn test_assert() {
    assert_eq!(first_statement("assert x : 'msg'"), "(LITERAL_assert x \"msg\")");
}

#[test]
fn test_assert_keyword_can_be_disabled() {
    let options = ParserOptions {
        assert_keyword_enabled: false,
        ..ParserOptions::default()
    };
    let output = parse("assert x", None, &options).unwrap();
    assert_eq!(output.root.children[0].to_sexpr(), "(EXPR (METHOD_CALL assert (ELIST x)))");
}

#[test]
fn test_synchronized() {
    assert_eq!(first_statement("synchronized (lock) { }"), "(LITERAL_synchronized (EXPR lock) SLIST)");
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_variable_declarations() {
    assert_eq!(first_statement("def x = 1"), "(VARIABLE_DEF MODIFIERS TYPE x (ASSIGN 1))");
    assert_eq!(
        statements("int a = 1, b"),
        vec![
            "(VARIABLE_DEF MODIFIERS (TYPE LITERAL_int) a (ASSIGN 1))",
            "(VARIABLE_DEF MODIFIERS (TYPE LITERAL_int) b)",
        ]
    );
    assert_eq!(first_statement("final String s"), "(VARIABLE_DEF (MODIFIERS FINAL) (TYPE String) s)");
}

#[test]
fn test_generic_declaration_closes_with_shift() {
    assert_eq!(
        first_statement("Map<String, List<Integer>> m"),
        "(VARIABLE_DEF MODIFIERS (TYPE Map (TYPE_ARGUMENTS (TYPE_ARGUMENT (TYPE String)) (TYPE_ARGUMENT (TYPE List (TYPE_ARGUMENTS (TYPE_ARGUMENT (TYPE Integer))))))) m)"
    );
}

#[test]
fn test_lowercase_pair_is_command_call() {
    assert_eq!(first_statement("foo bar"), "(EXPR (METHOD_CALL foo (ELIST bar)))");
    assert_eq!(first_statement("Foo bar"), "(VARIABLE_DEF MODIFIERS (TYPE Foo) bar)");
}

#[test]
fn test_method_definitions() {
    assert_eq!(
        first_statement("def foo(a, int b) { a }"),
        "(METHOD_DEF MODIFIERS TYPE foo (PARAMETERS (PARAMETER_DEF MODIFIERS TYPE a) (PARAMETER_DEF MODIFIERS (TYPE LITERAL_int) b)) (SLIST (EXPR a)))"
    );
    assert_eq!(
        first_statement("static void main(String[] args) throws Exception { }"),
        "(METHOD_DEF (MODIFIERS LITERAL_static) (TYPE LITERAL_void) main (PARAMETERS (PARAMETER_DEF MODIFIERS (TYPE (ARRAY_DECLARATOR String)) args)) (LITERAL_throws (TYPE Exception)) SLIST)"
    );
}

#[test]
fn test_string_method_name() {
    let output = parse_ok("def \"does a thing\"() { }");
    let method = output.root.find_child(SyntaxKind::MethodDef).unwrap();
    let name = method.child(2).unwrap();
    assert_eq!(name.kind, SyntaxKind::Ident);
    assert_eq!(name.text, "does a thing");
}

#[test]
fn test_varargs_and_generic_method() {
    assert_eq!(
        first_statement("def <T> T pick(T... xs) { }"),
        "(METHOD_DEF (TYPE_PARAMETERS (TYPE_PARAMETER T)) MODIFIERS (TYPE T) pick (PARAMETERS (VARIABLE_PARAMETER_DEF MODIFIERS (TYPE T) xs)) SLIST)"
    );
}

#[test]
fn test_annotations() {
    assert_eq!(
        first_statement("@Deprecated @SuppressWarnings(value = 'x') def f() { }"),
        "(METHOD_DEF (MODIFIERS (ANNOTATION Deprecated) (ANNOTATION SuppressWarnings (ANNOTATION_MEMBER_VALUE_PAIR value \"x\"))) TYPE f PARAMETERS SLIST)"
    );
}

// ============================================================================
// Type definitions
// ============================================================================

#[test]
fn test_class_definition() {
    let sexpr = first_statement(
        "class Foo<T extends Number> extends Base implements A, B {\n  int x\n  Foo(int x) { this.x = x }\n  def get() { x }\n}",
    );
    assert_eq!(
        sexpr,
        "(CLASS_DEF MODIFIERS Foo (TYPE_PARAMETERS (TYPE_PARAMETER T (TYPE_UPPER_BOUNDS (TYPE Number)))) (EXTENDS_CLAUSE (TYPE Base)) (IMPLEMENTS_CLAUSE (TYPE A) (TYPE B)) (OBJBLOCK (VARIABLE_DEF MODIFIERS (TYPE LITERAL_int) x) (CTOR_IDENT MODIFIERS (PARAMETERS (PARAMETER_DEF MODIFIERS (TYPE LITERAL_int) x)) (SLIST (EXPR (ASSIGN (DOT LITERAL_this x) x)))) (METHOD_DEF MODIFIERS TYPE get PARAMETERS (SLIST (EXPR x)))))"
    );
}

#[test]
fn test_empty_class_has_all_clauses() {
    assert_eq!(
        first_statement("public class A { }"),
        "(CLASS_DEF (MODIFIERS LITERAL_public) A TYPE_PARAMETERS EXTENDS_CLAUSE IMPLEMENTS_CLAUSE OBJBLOCK)"
    );
}

#[test]
fn test_constructor_calls() {
    let output = parse_ok("class B extends A {\n  B() { super(1)\n x() }\n  B(int y) { this() }\n}");
    let body = output.root.find_descendant(SyntaxKind::ObjBlock).unwrap();
    assert_eq!(
        body.children[0].to_sexpr(),
        "(CTOR_IDENT MODIFIERS PARAMETERS (SLIST (SUPER_CTOR_CALL (ELIST 1)) (EXPR (METHOD_CALL x ELIST))))"
    );
    assert!(body.children[1].find_descendant(SyntaxKind::CtorCall).is_some());
}

#[test]
fn test_initializers() {
    let output = parse_ok("class A {\n  static { init() }\n  { setup() }\n}");
    let body = output.root.find_descendant(SyntaxKind::ObjBlock).unwrap();
    assert_eq!(body.children[0].kind, SyntaxKind::StaticInit);
    assert_eq!(body.children[1].kind, SyntaxKind::InstanceInit);
}

#[test]
fn test_interface_and_abstract_method() {
    assert_eq!(
        first_statement("interface Shape extends A, B {\n  double area()\n}"),
        "(INTERFACE_DEF MODIFIERS Shape TYPE_PARAMETERS (EXTENDS_CLAUSE (TYPE A) (TYPE B)) (OBJBLOCK (METHOD_DEF MODIFIERS (TYPE LITERAL_double) area PARAMETERS)))"
    );
}

#[test]
fn test_enum_definition() {
    assert_eq!(
        first_statement("enum Color { RED, GREEN(2), BLUE { }\n  int v\n}"),
        "(ENUM_DEF MODIFIERS Color IMPLEMENTS_CLAUSE (OBJBLOCK (ENUM_CONSTANT_DEF ANNOTATIONS RED) (ENUM_CONSTANT_DEF ANNOTATIONS GREEN (ELIST 2)) (ENUM_CONSTANT_DEF ANNOTATIONS BLUE OBJBLOCK) (VARIABLE_DEF MODIFIERS (TYPE LITERAL_int) v)))"
    );
}

#[test]
fn test_annotation_definition() {
    assert_eq!(
        first_statement("@interface Tag {\n  String value() default 'x'\n}"),
        "(ANNOTATION_DEF MODIFIERS Tag TYPE_PARAMETERS EXTENDS_CLAUSE (OBJBLOCK (ANNOTATION_FIELD_DEF MODIFIERS (TYPE String) value \"x\")))"
    );
}

#[test]
fn test_nested_class_constructor_uses_inner_name() {
    let output = parse_ok("class Outer {\n  class Inner {\n    Inner() { }\n  }\n  Outer() { }\n}");
    let outer = output.root.find_descendant(SyntaxKind::ObjBlock).unwrap();
    let inner = outer.find_child(SyntaxKind::ClassDef).unwrap();
    assert!(inner.find_descendant(SyntaxKind::CtorIdent).is_some());
    assert_eq!(outer.children_of_kind(SyntaxKind::CtorIdent).count(), 1);
}

// ============================================================================
// Errors and limits
// ============================================================================

#[test]
fn test_mismatched_generic_brackets() {
    let error = parse_err("class A extends B<C>> { }");
    assert_eq!(error.diagnostic().code, messages::MISMATCHED_GENERIC_BRACKETS.code);
}

#[test]
fn test_shift_after_type_arguments_is_comparison() {
    assert_eq!(first_statement("List<String>> x"), "(EXPR (LT List (SR String x)))");
}

#[test]
fn test_lexical_error_wins_over_later_syntax_error() {
    let error = parse_err("x = 'abc\n");
    assert!(error.is_lexical());
    assert_eq!(error.diagnostic().code, messages::NEWLINE_IN_SIMPLE_STRING.code);
}

#[test]
fn test_syntax_error_before_lexical_error() {
    let error = parse_err("x = )\ny = `");
    assert!(!error.is_lexical());
}

#[test]
fn test_speculation_budget() {
    let options = ParserOptions {
        max_speculative_parses: 2,
        ..ParserOptions::default()
    };
    let error = parse("class A { }\nclass B { }\nFoo x\nBar y", None, &options).unwrap_err();
    assert_eq!(error.diagnostic().code, messages::SPECULATION_BUDGET_EXCEEDED.code);
}

#[test]
fn test_nested_parenthesized_arguments_stay_linear() {
    let depth = 25;
    let source = format!("{}1{}", "f((".repeat(depth), "))".repeat(depth));
    let options = ParserOptions {
        max_speculative_parses: 1_000,
        ..ParserOptions::default()
    };
    let output = match parse(&source, None, &options) {
        Ok(output) => output,
        Err(error) => panic!("nested calls failed: {}", error.diagnostic().message_text),
    };
    assert_eq!(output.root.to_sexpr().matches("METHOD_CALL").count(), depth);
}

#[test]
fn test_parenthesized_label_in_call() {
    let sexpr = first_statement("f((k): 1, (a) + b)");
    assert!(sexpr.contains("(LABELED_ARG k 1)"), "{}", sexpr);
    assert!(sexpr.contains("(PLUS a b)"), "{}", sexpr);
}

#[test]
fn test_whitespace_mode_parses_same_tree() {
    let source = "def f(a) {\n  // note\n  a + 1 /* c */\n}\nprintln f(\n  2\n)\n";
    let plain = parse_ok(source).root;
    let options = ParserOptions::default().with_whitespace_included(true);
    let spaced = parse(source, None, &options).unwrap().root;
    assert!(plain.same_shape(&spaced), "{} vs {}", plain.to_sexpr(), spaced.to_sexpr());
}
