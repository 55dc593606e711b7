use pretty_assertions::assert_eq;
use treelox as lox;

use lox::ast::{ExprKind, Stmt};
use lox::error::LoxError;
use lox::parser::Parser;
use lox::resolver::{Resolutions, Resolver};
use lox::scanner::scan;

fn parse(source: &str) -> Vec<Stmt> {
    let tokens = scan(source).expect("source scans");
    Parser::new(tokens).parse().expect("source parses")
}

fn resolve(source: &str) -> Result<Resolutions, Vec<LoxError>> {
    Resolver::new().resolve(&parse(source))
}

fn static_errors(source: &str) -> Vec<String> {
    resolve(source)
        .expect_err("expected static errors")
        .iter()
        .map(|e| e.to_string())
        .collect()
}

#[test]
fn globals_get_no_entry() {
    let resolutions = resolve("var a = 1; a; a = 2;").expect("resolves");

    assert!(resolutions.is_empty());
}

#[test]
fn block_locals_resolve_by_hop_count() {
    let statements = parse("{ var a = 1; { { a; } } }");
    let resolutions = Resolver::new().resolve(&statements).expect("resolves");

    // Dig out the `a` reference three blocks deep.
    let Stmt::Block(outer) = &statements[0] else {
        panic!("expected block")
    };
    let Stmt::Block(middle) = &outer[1] else {
        panic!("expected block")
    };
    let Stmt::Block(inner) = &middle[0] else {
        panic!("expected block")
    };
    let Stmt::Expression(reference) = &inner[0] else {
        panic!("expected expression")
    };

    assert!(matches!(reference.kind, ExprKind::Variable(_)));
    assert_eq!(resolutions.get(&reference.id), Some(&2));
}

#[test]
fn identical_references_resolve_independently() {
    let statements = parse("var a = 0; { var a = 1; a; } a;");
    let resolutions = Resolver::new().resolve(&statements).expect("resolves");

    let Stmt::Block(block) = &statements[1] else {
        panic!("expected block")
    };
    let Stmt::Expression(inner) = &block[1] else {
        panic!("expected expression")
    };
    let Stmt::Expression(outer) = &statements[2] else {
        panic!("expected expression")
    };

    assert_eq!(resolutions.get(&inner.id), Some(&0));
    assert_eq!(resolutions.get(&outer.id), None);
}

#[test]
fn parameters_and_closures() {
    let resolutions = resolve(
        "fun outer(x) {
           fun inner() { return x; }
           return inner;
         }",
    )
    .expect("resolves");

    // `x` from inner (distance 1) and `inner` from outer's body (distance 0).
    let mut distances: Vec<usize> = resolutions.values().copied().collect();
    distances.sort_unstable();
    assert_eq!(distances, vec![0, 1]);
}

#[test]
fn reading_a_local_in_its_own_initializer_is_an_error() {
    assert_eq!(
        static_errors("{ var a = a; }"),
        vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
    );
}

#[test]
fn global_self_reference_is_left_to_runtime() {
    assert!(resolve("var a = a;").is_ok());
}

#[test]
fn duplicate_local_declaration_is_an_error() {
    assert_eq!(
        static_errors("fun f() { var a = 1; var a = 2; }"),
        vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
    );
    assert_eq!(
        static_errors("fun f(a, a) {}"),
        vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
    );
    assert!(resolve("var a = 1; var a = 2;").is_ok());
}

#[test]
fn return_misuse() {
    assert_eq!(
        static_errors("return 1;"),
        vec!["[line 1] Error at 'return': Can't return from top-level code."]
    );
    assert_eq!(
        static_errors("class C { init() { return 1; } }"),
        vec!["[line 1] Error at 'return': Can't return a value from an initializer."]
    );
    assert!(resolve("class C { init() { return; } }").is_ok());
}

#[test]
fn this_and_super_placement() {
    assert_eq!(
        static_errors("this;"),
        vec!["[line 1] Error at 'this': Can't use 'this' outside of a class."]
    );
    assert_eq!(
        static_errors("fun f() { return this; }"),
        vec!["[line 1] Error at 'this': Can't use 'this' outside of a class."]
    );
    assert_eq!(
        static_errors("super.m();"),
        vec!["[line 1] Error at 'super': Can't use 'super' outside of a class."]
    );
    assert_eq!(
        static_errors("class A { m() { super.m(); } }"),
        vec!["[line 1] Error at 'super': Can't use 'super' in a class with no superclass."]
    );
}

#[test]
fn class_cannot_inherit_from_itself() {
    assert_eq!(
        static_errors("class A : A {}"),
        vec!["[line 1] Error at 'A': A class can't inherit from itself."]
    );
}

#[test]
fn errors_accumulate_across_the_program() {
    let errors = static_errors(
        "return;
         this;
         { var b = 1; var b = 2; }",
    );

    assert_eq!(errors.len(), 3);
    assert!(errors[0].starts_with("[line 1]"));
    assert!(errors[1].starts_with("[line 2]"));
    assert!(errors[2].starts_with("[line 3]"));
}

#[test]
fn method_scopes_match_runtime_environments() {
    // this → method scope (0) → `this` scope (1)
    // super → method scope (0) → `this` scope (1) → `super` scope (2)
    let statements = parse(
        "class A { m() {} }
         class B : A { m() { this; super.m; } }",
    );
    let resolutions = Resolver::new().resolve(&statements).expect("resolves");

    let Stmt::Class { methods, .. } = &statements[1] else {
        panic!("expected class")
    };
    let body = &methods[0].body;
    let (Stmt::Expression(this), Stmt::Expression(sup)) = (&body[0], &body[1]) else {
        panic!("expected expressions")
    };

    assert_eq!(resolutions.get(&this.id), Some(&1));
    assert_eq!(resolutions.get(&sup.id), Some(&2));
}
