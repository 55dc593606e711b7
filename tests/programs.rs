mod common;

use pretty_assertions::assert_eq;

use common::{output_of, runtime_error_of, session, session_with_input};

#[test]
fn counter_closure_keeps_its_state() {
    assert_eq!(
        output_of(
            "fun makeCounter() {
               var i = 0;
               fun count() {
                 i = i + 1;
                 println(i);
               }
               return count;
             }

             var counter = makeCounter();
             counter();
             counter();

             var other = makeCounter();
             other();"
        ),
        "1\n2\n1\n"
    );
}

#[test]
fn closures_share_captured_variables() {
    assert_eq!(
        output_of(
            "var inc;
             var get;
             fun setup() {
               var n = 0;
               fun i() { n = n + 1; }
               fun g() { return n; }
               inc = i;
               get = g;
             }
             setup();
             inc();
             inc();
             println(get());"
        ),
        "2\n"
    );
}

#[test]
fn closures_bind_to_the_scope_they_saw() {
    assert_eq!(
        output_of(
            "var a = \"global\";
             {
               fun show() { println(a); }
               show();
               var a = \"block\";
               show();
             }"
        ),
        "global\nglobal\n"
    );
}

#[test]
fn recursion() {
    assert_eq!(
        output_of(
            "fun fib(n) {
               if (n < 2) return n;
               return fib(n - 1) + fib(n - 2);
             }
             println(fib(15));"
        ),
        "610\n"
    );
}

#[test]
fn return_unwinds_loops_and_blocks() {
    assert_eq!(
        output_of(
            "fun first(limit) {
               for (var i = 0; i < limit; i = i + 1) {
                 { if (i == 3) return i; }
               }
               return -1;
             }
             println(first(10));
             println(first(2));"
        ),
        "3\n-1\n"
    );
}

#[test]
fn classes_fields_and_methods() {
    assert_eq!(
        output_of(
            "class Point {
               init(x, y) {
                 this.x = x;
                 this.y = y;
               }
               sum() { return this.x + this.y; }
             }

             var p = Point(1, 2);
             println(p.sum());
             p.x = 10;
             println(p.sum());
             p.label = \"moved\";
             println(p.label);"
        ),
        "3\n12\nmoved\n"
    );
}

#[test]
fn class_arity_follows_the_initializer() {
    assert_eq!(
        runtime_error_of("class P { init(x, y) {} } P(1);").1,
        "Expected 2 arguments but got 1."
    );
    assert_eq!(
        runtime_error_of("class Q {} Q(1);").1,
        "Expected 0 arguments but got 1."
    );
}

#[test]
fn bound_methods_remember_their_instance() {
    assert_eq!(
        output_of(
            "class Person {
               init(name) { this.name = name; }
               greet() { println(\"hi \" + this.name); }
             }
             var greet = Person(\"Ada\").greet;
             greet();

             var bob = Person(\"Bob\");
             bob.hello = greet;
             bob.hello();"
        ),
        "hi Ada\nhi Ada\n"
    );
}

#[test]
fn every_property_access_binds_a_new_method() {
    assert_eq!(
        output_of(
            "class A { m() {} }
             var a = A();
             println(a.m == a.m);
             var m = a.m;
             println(m == m);"
        ),
        "false\ntrue\n"
    );
}

#[test]
fn fields_shadow_methods() {
    assert_eq!(
        output_of(
            "class A { m() { return \"method\"; } }
             var a = A();
             println(a.m());
             a.m = \"field\";
             println(a.m);"
        ),
        "method\nfield\n"
    );
}

#[test]
fn initializer_always_returns_the_instance() {
    assert_eq!(
        output_of(
            "class Foo {
               init() {
                 this.ready = true;
                 return;
               }
             }
             var foo = Foo();
             println(foo.ready);
             println(foo.init());
             println(foo.init() == foo);"
        ),
        "true\nFoo instance\ntrue\n"
    );
}

#[test]
fn inheritance_and_super() {
    assert_eq!(
        output_of(
            "class A {
               method() { println(\"A method\"); }
               inherited() { println(\"only in A\"); }
             }

             class B : A {
               method() { println(\"B method\"); }
               test() { super.method(); }
             }

             class C : B {}

             C().test();
             C().method();
             C().inherited();"
        ),
        "A method\nB method\nonly in A\n"
    );
}

#[test]
fn super_initializer_chain() {
    assert_eq!(
        output_of(
            "class Shape {
               init(sides) { this.sides = sides; }
               describe() { return \"shape with \" + this.kind(); }
               kind() { return \"sides\"; }
             }

             class Square : Shape {
               init() { super.init(4); }
               kind() { return \"four equal sides\"; }
               describe() { return super.describe() + \"!\"; }
             }

             var s = Square();
             println(s.sides);
             println(s.describe());"
        ),
        "4\nshape with four equal sides!\n"
    );
}

#[test]
fn super_method_must_exist() {
    assert_eq!(
        runtime_error_of(
            "class A {}
             class B : A { m() { return super.missing; } }
             B().m();"
        )
        .1,
        "Undefined property 'missing'."
    );
}

#[test]
fn print_and_println() {
    assert_eq!(
        output_of("print(\"a\"); print(1); print(nil); println(\"\"); println(2.5);"),
        "a1nil\n2.5\n"
    );
}

#[test]
fn readln_and_parse_num() {
    let (mut lox, out) = session_with_input("Ada\n  41 \n");

    lox.run(
        "var name = readln();
         var n = parseNum(readln());
         println(name);
         println(n + 1);
         println(readln());",
    )
    .expect("program runs");

    assert_eq!(out.contents(), "Ada\n42\nnil\n");
}

#[test]
fn parse_num_errors() {
    assert_eq!(
        runtime_error_of("parseNum(\"abc\");").1,
        "Cannot parse 'abc' as a number."
    );
    assert_eq!(
        runtime_error_of("parseNum(1);").1,
        "parseNum expects a string but got a number."
    );
}

#[test]
fn clock_reports_seconds() {
    assert_eq!(
        output_of(
            "var start = clock();
             println(start > 1000000000);
             println(clock() >= start);"
        ),
        "true\ntrue\n"
    );
}

#[test]
fn natives_can_be_shadowed() {
    assert_eq!(
        output_of(
            "fun show(x) { println(\"<\" + x + \">\"); }
             { var println = show; println(\"x\"); }
             println(\"y\");"
        ),
        "<x>\ny\n"
    );
}

#[test]
fn session_state_persists_across_runs() {
    let (mut lox, out) = session();

    lox.run("var a = 1;").expect("runs");
    lox.run("fun f() { return a + 1; }").expect("runs");
    lox.run("println(f());").expect("runs");
    lox.run("fun make() { var x = 10; fun get() { return x; } return get; }")
        .expect("runs");
    lox.run("var g = make();").expect("runs");
    lox.run("println(g());").expect("runs");

    assert_eq!(out.contents(), "2\n10\n");
}

#[test]
fn errors_do_not_end_the_session() {
    let (mut lox, out) = session();

    lox.run("var a = \"outer\";").expect("runs");
    assert!(lox.run("{ var a = \"inner\"; nope(); }").is_err());
    assert!(lox.run("var = ;").is_err());
    lox.run("println(a);").expect("runs");

    assert_eq!(out.contents(), "outer\n");
}

#[test]
fn failed_block_leaves_the_global_scope_current() {
    let (mut lox, out) = session();

    assert!(lox.run("{ var a = 1; nope(); }").is_err());
    assert!(lox
        .run("fun f() { { var inner = 1; nope(); } } f();")
        .is_err());
    lox.run("var b = 2; println(b);").expect("runs");
    lox.run("{ println(b + 1); }").expect("runs");

    assert_eq!(out.contents(), "2\n3\n");
}
