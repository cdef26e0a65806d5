//! Cases the compiler must reject with specific diagnostics

use super::error_at;
use crate::registry::{Registry, RegistryError};

pub(super) fn add_compile_failure_cases(reg: &mut Registry, scratch_source: &str) -> Result<(), RegistryError> {
    let e = |location: &str, message: &str| error_at(scratch_source, location, message);

    reg.add_compile_failure_case(
        "multiple function definitions",
        r#"
fn a() {}
fn a() {}
    "#,
        [e("3:1", "redefinition of 'a'")],
    )?;

    reg.add_compile_failure_case(
        "bad directive",
        r#"
#bogus1("")
extern {
    fn b();
}
#bogus2("")
fn a() {}
    "#,
        [
            e("2:1", "invalid directive: 'bogus1'"),
            e("6:1", "invalid directive: 'bogus2'"),
        ],
    )?;

    reg.add_compile_failure_case(
        "unreachable with return",
        r#"
fn a() -> unreachable {return;}
    "#,
        [e("2:24", "expected type 'unreachable', got 'void'")],
    )?;

    reg.add_compile_failure_case(
        "control reaches end of non-void function",
        r#"
fn a() -> i32 {}
    "#,
        [e("2:15", "expected type 'i32', got 'void'")],
    )?;

    reg.add_compile_failure_case(
        "undefined function call",
        r#"
fn a() {
    b();
}
    "#,
        [e("3:5", "undefined function: 'b'")],
    )?;

    reg.add_compile_failure_case(
        "wrong number of arguments",
        r#"
fn a() {
    b(1);
}
fn b(a: i32, b: i32, c: i32) { }
    "#,
        [e("3:6", "wrong number of arguments. Expected 3, got 1.")],
    )?;

    reg.add_compile_failure_case(
        "invalid type",
        r#"
fn a() -> bogus {}
    "#,
        [e("2:11", "invalid type name: 'bogus'")],
    )?;

    reg.add_compile_failure_case(
        "pointer to unreachable",
        r#"
fn a() -> &unreachable {}
    "#,
        [e("2:11", "pointer to unreachable not allowed")],
    )?;

    reg.add_compile_failure_case(
        "unreachable code",
        r#"
fn a() {
    return;
    b();
}

fn b() {}
    "#,
        [e("4:5", "unreachable code")],
    )?;

    reg.add_compile_failure_case(
        "bad version string",
        r#"
#version("aoeu")
export executable "test";
    "#,
        [e("2:1", "invalid version string")],
    )?;

    reg.add_compile_failure_case(
        "bad import",
        r#"
use "bogus-does-not-exist.zig";
    "#,
        [e("2:1", "unable to find 'bogus-does-not-exist.zig'")],
    )?;

    reg.add_compile_failure_case(
        "undeclared identifier",
        r#"
fn a() {
    b +
    c
}
    "#,
        [
            e("3:5", "use of undeclared identifier 'b'"),
            e("4:5", "use of undeclared identifier 'c'"),
        ],
    )?;

    reg.add_compile_failure_case(
        "goto cause unreachable code",
        r#"
fn a() {
    goto done;
    b();
done:
    return;
}
fn b() {}
    "#,
        [e("4:5", "unreachable code")],
    )?;

    reg.add_compile_failure_case(
        "parameter redeclaration",
        r#"
fn f(a : i32, a : i32) {
}
    "#,
        [e("2:1", "redeclaration of parameter 'a'")],
    )?;

    reg.add_compile_failure_case(
        "local variable redeclaration",
        r#"
fn f() {
    const a : i32 = 0;
    const a = 0;
}
    "#,
        [e("4:5", "redeclaration of variable 'a'")],
    )?;

    reg.add_compile_failure_case(
        "local variable redeclares parameter",
        r#"
fn f(a : i32) {
    const a = 0;
}
    "#,
        [e("3:5", "redeclaration of variable 'a'")],
    )?;

    reg.add_compile_failure_case(
        "variable has wrong type",
        r#"
fn f() -> i32 {
    const a = c"a";
    a
}
    "#,
        [e("2:15", "expected type 'i32', got '&const u8'")],
    )?;

    reg.add_compile_failure_case(
        "if condition is bool, not int",
        r#"
fn f() {
    if (0) {}
}
    "#,
        [e("3:9", "expected type 'bool', got '(u8 literal)'")],
    )?;

    reg.add_compile_failure_case(
        "assign unreachable",
        r#"
fn f() {
    const a = return;
}
    "#,
        [e("3:5", "variable initialization is unreachable")],
    )?;

    reg.add_compile_failure_case(
        "unreachable variable",
        r#"
fn f() {
    const a : unreachable = return;
}
    "#,
        [e("3:15", "variable of type 'unreachable' not allowed")],
    )?;

    reg.add_compile_failure_case(
        "unreachable parameter",
        r#"
fn f(a : unreachable) {}
    "#,
        [e("2:10", "parameter of type 'unreachable' not allowed")],
    )?;

    reg.add_compile_failure_case(
        "exporting a void parameter",
        r#"
export fn f(a : void) {}
    "#,
        [e("2:17", "parameter of type 'void' not allowed on exported functions")],
    )?;

    reg.add_compile_failure_case(
        "unused label",
        r#"
fn f() {
a_label:
}
    "#,
        [e("3:1", "label 'a_label' defined but not used")],
    )?;

    reg.add_compile_failure_case(
        "bad assignment target",
        r#"
fn f() {
    3 = 3;
}
    "#,
        [e("3:5", "assignment target must be variable, field, or array element")],
    )?;

    reg.add_compile_failure_case(
        "assign to constant variable",
        r#"
fn f() {
    const a = 3;
    a = 4;
}
    "#,
        [e("4:5", "cannot assign to constant")],
    )?;

    reg.add_compile_failure_case(
        "use of undeclared identifier",
        r#"
fn f() {
    b = 3;
}
    "#,
        [e("3:5", "use of undeclared identifier 'b'")],
    )?;

    reg.add_compile_failure_case(
        "const is a statement, not an expression",
        r#"
fn f() {
    (const a = 0);
}
    "#,
        [e("3:6", "invalid token: 'const'")],
    )?;

    reg.add_compile_failure_case(
        "array access errors",
        r#"
fn f() {
    var bad : bool;
    i[i] = i[i];
    bad[bad] = bad[bad];
}
    "#,
        [
            e("4:5", "use of undeclared identifier 'i'"),
            e("4:7", "use of undeclared identifier 'i'"),
            e("4:12", "use of undeclared identifier 'i'"),
            e("4:14", "use of undeclared identifier 'i'"),
            e("5:8", "array access of non-array"),
            e("5:8", "array subscripts must be integers"),
            e("5:19", "array access of non-array"),
            e("5:19", "array subscripts must be integers"),
        ],
    )?;

    reg.add_compile_failure_case(
        "variadic functions only allowed in extern",
        r#"
fn f(...) {}
    "#,
        [e("2:1", "variadic arguments only allowed in extern functions")],
    )?;

    reg.add_compile_failure_case(
        "write to const global variable",
        r#"
const x : i32 = 99;
fn f() {
    x = 1;
}
    "#,
        [e("4:5", "cannot assign to constant")],
    )?;

    reg.add_compile_failure_case(
        "missing else clause",
        r#"
fn f() {
    const x : i32 = if (true) { 1 };
    const y = if (true) { 1 as i32 };
}
    "#,
        [
            e("3:21", "expected type 'i32', got 'void'"),
            e("4:15", "incompatible types: 'i32' and 'void'"),
        ],
    )?;

    reg.add_compile_failure_case(
        "direct struct loop",
        r#"
struct A { a : A, }
    "#,
        [e("2:1", "struct has infinite size")],
    )?;

    reg.add_compile_failure_case(
        "indirect struct loop",
        r#"
struct A { b : B, }
struct B { c : C, }
struct C { a : A, }
    "#,
        [e("2:1", "struct has infinite size")],
    )?;

    reg.add_compile_failure_case(
        "invalid struct field",
        r#"
struct A { x : i32, }
fn f() {
    var a : A;
    a.foo = 1;
    const y = a.bar;
}
    "#,
        [
            e("5:6", "no member named 'foo' in 'A'"),
            e("6:16", "no member named 'bar' in 'A'"),
        ],
    )?;

    reg.add_compile_failure_case(
        "redefinition of struct",
        r#"
struct A { x : i32, }
struct A { y : i32, }
    "#,
        [e("3:1", "redefinition of 'A'")],
    )?;

    reg.add_compile_failure_case(
        "byvalue struct on exported functions",
        r#"
struct A { x : i32, }
export fn f(a : A) {}
    "#,
        [e("3:13", "byvalue struct parameters not yet supported on exported functions")],
    )?;

    reg.add_compile_failure_case(
        "duplicate field in struct value expression",
        r#"
struct A {
    x : i32,
    y : i32,
    z : i32,
}
fn f() {
    const a = A {
        .z = 1,
        .y = 2,
        .x = 3,
        .z = 4,
    };
}
    "#,
        [e("12:9", "duplicate field")],
    )?;

    reg.add_compile_failure_case(
        "missing field in struct value expression",
        r#"
struct A {
    x : i32,
    y : i32,
    z : i32,
}
fn f() {
    const a = A {
        .z = 4,
        .y = 2,
    };
}
    "#,
        [e("8:15", "missing field: 'x'")],
    )?;

    reg.add_compile_failure_case(
        "invalid field in struct value expression",
        r#"
struct A {
    x : i32,
    y : i32,
    z : i32,
}
fn f() {
    const a = A {
        .z = 4,
        .y = 2,
        .foo = 42,
    };
}
    "#,
        [e("11:9", "no member named 'foo' in 'A'")],
    )?;

    reg.add_compile_failure_case(
        "invalid break expression",
        r#"
fn f() {
    break;
}
    "#,
        [e("3:5", "'break' expression not in loop")],
    )?;

    reg.add_compile_failure_case(
        "invalid continue expression",
        r#"
fn f() {
    continue;
}
    "#,
        [e("3:5", "'continue' expression not in loop")],
    )?;

    reg.add_compile_failure_case(
        "invalid maybe type",
        r#"
fn f() {
    if (const x ?= true) { }
}
    "#,
        [e("3:20", "expected maybe type")],
    )?;

    Ok(())
}
