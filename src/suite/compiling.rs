//! Cases that must compile, run and print an exact stdout

use crate::registry::Registry;

pub(super) fn add_compiling_cases(reg: &mut Registry) {
    reg.add_success_case(
        "hello world with libc",
        r#"
        #link("c")
        extern {
            fn puts(s: &const u8) -> i32;
        }

        export fn main(argc: i32, argv: &&u8, env: &&u8) -> i32 {
            puts(c"Hello, world!");
            return 0;
        }
    "#,
        "Hello, world!\n",
    );

    reg.add_success_case(
        "function call",
        r#"
        use "std.zig";

        fn empty_function_1() {}
        fn empty_function_2() { return; }

        pub fn main(argc: isize, argv: &&u8, env: &&u8) -> i32 {
            empty_function_1();
            empty_function_2();
            this_is_a_function();
        }

        fn this_is_a_function() -> unreachable {
            print_str("OK\n");
            exit(0);
        }
    "#,
        "OK\n",
    );

    reg.add_success_case(
        "comments",
        r#"
        use "std.zig";

        /**
         * multi line doc comment
         */
        fn another_function() {}

        /// this is a documentation comment
        /// doc comment line 2
        pub fn main(argc: isize, argv: &&u8, env: &&u8) -> i32 {
            print_str(/* mid-line comment /* nested */ */ "OK\n");
            return 0;
        }
    "#,
        "OK\n",
    );

    reg.add_success_case(
        "multiple files with private function",
        r#"
            use "libc.zig";
            use "foo.zig";

            export fn main(argc: i32, argv: &&u8, env: &&u8) -> i32 {
                private_function();
            }

            fn private_function() -> unreachable {
                print_text();
                exit(0);
            }
        "#,
        "OK\n",
    )
    .add_source_file(
        "libc.zig",
        r#"
            #link("c")
            extern {
                pub fn puts(s: &const u8) -> i32;
                pub fn exit(code: i32) -> unreachable;
            }
        "#,
    )
    .add_source_file(
        "foo.zig",
        r#"
            use "libc.zig";

            // purposefully conflicting function with main source file
            // but it's private so it should be OK
            fn private_function() {
                puts(c"OK");
            }

            pub fn print_text() {
                private_function();
            }
        "#,
    );

    reg.add_success_case(
        "if statements",
        r#"
        use "std.zig";

        pub fn main(argc: isize, argv: &&u8, env: &&u8) -> i32 {
            if (1 != 0) {
                print_str("1 is true\n");
            } else {
                print_str("1 is false\n");
            }
            if (0 != 0) {
                print_str("0 is true\n");
            } else if (1 - 1 != 0) {
                print_str("1 - 1 is true\n");
            }
            if (!(0 != 0)) {
                print_str("!0 is true\n");
            }
            return 0;
        }
    "#,
        "1 is true\n!0 is true\n",
    );

    reg.add_success_case(
        "params",
        r#"
        use "std.zig";

        fn add(a: i32, b: i32) -> i32 {
            a + b
        }

        pub fn main(argc: isize, argv: &&u8, env: &&u8) -> i32 {
            if (add(22, 11) == 33) {
                print_str("pass\n");
            }
            return 0;
        }
    "#,
        "pass\n",
    );

    reg.add_success_case(
        "goto",
        r#"
        use "std.zig";

        fn loop(a : i32) {
            if (a == 0) {
                goto done;
            }
            print_str("loop\n");
            loop(a - 1);

        done:
            return;
        }

        pub fn main(argc: isize, argv: &&u8, env: &&u8) -> i32 {
            loop(3);
            return 0;
        }
    "#,
        "loop\nloop\nloop\n",
    );

    reg.add_success_case(
        "local variables",
        r#"
use "std.zig";

pub fn main(argc: isize, argv: &&u8, env: &&u8) -> i32 {
    const a : i32 = 1;
    const b = 2 as i32;
    if (a + b == 3) {
        print_str("OK\n");
    }
    return 0;
}
    "#,
        "OK\n",
    );

    reg.add_success_case(
        "bool literals",
        r#"
use "std.zig";

pub fn main(argc: isize, argv: &&u8, env: &&u8) -> i32 {
    if (true)   { print_str("OK 1\n"); }
    if (false)  { print_str("BAD 1\n"); }
    if (!true)  { print_str("BAD 2\n"); }
    if (!false) { print_str("OK 2\n"); }
    return 0;
}
    "#,
        "OK 1\nOK 2\n",
    );

    reg.add_success_case(
        "separate block scopes",
        r#"
use "std.zig";

pub fn main(argc: isize, argv: &&u8, env: &&u8) -> i32 {
    if (true) {
        const no_conflict : i32 = 5;
        if (no_conflict == 5) { print_str("OK 1\n"); }
    }

    const c = {
        const no_conflict = 10 as i32;
        no_conflict
    };
    if (c == 10) { print_str("OK 2\n"); }
    return 0;
}
    "#,
        "OK 1\nOK 2\n",
    );

    reg.add_success_case(
        "void parameters",
        r#"
use "std.zig";

pub fn main(argc: isize, argv: &&u8, env: &&u8) -> i32 {
    void_fun(1, void, 2);
    return 0;
}

fn void_fun(a : i32, b : void, c : i32) {
    const v = b;
    const vv : void = if (a == 1) {v} else {};
    if (a + c == 3) { print_str("OK\n"); }
    return vv;
}
    "#,
        "OK\n",
    );

    reg.add_success_case(
        "mutable local variables",
        r#"
use "std.zig";

pub fn main(argc: isize, argv: &&u8, env: &&u8) -> i32 {
    var zero : i32;
    if (zero == 0) { print_str("zero\n"); }

    var i = 0 as i32;
loop_start:
    if (i == 3) {
        goto done;
    }
    print_str("loop\n");
    i = i + 1;
    goto loop_start;
done:
    return 0;
}
    "#,
        "zero\nloop\nloop\nloop\n",
    );

    reg.add_success_case(
        "arrays",
        r#"
use "std.zig";

pub fn main(argc: isize, argv: &&u8, env: &&u8) -> i32 {
    var array : [i32; 5];

    var i : i32 = 0;
loop_start:
    if (i == 5) {
        goto loop_end;
    }
    array[i] = i + 1;
    i = array[i];
    goto loop_start;

loop_end:

    i = 0;
    var accumulator = 0 as i32;
loop_2_start:
    if (i == 5) {
        goto loop_2_end;
    }

    accumulator = accumulator + array[i];

    i = i + 1;
    goto loop_2_start;
loop_2_end:

    if (accumulator == 15) {
        print_str("OK\n");
    }

    return 0;
}
    "#,
        "OK\n",
    );

    reg.add_success_case(
        "hello world without libc",
        r#"
use "std.zig";

export fn main(argc : isize, argv : &&u8, env : &&u8) -> i32 {
    print_str("Hello, world!\n");
    return 0;
}
    "#,
        "Hello, world!\n",
    );

    reg.add_success_case(
        "a + b + c",
        r#"
use "std.zig";

export fn main(argc : isize, argv : &&u8, env : &&u8) -> i32 {
    if (false || false || false) { print_str("BAD 1\n"); }
    if (true && true && false)   { print_str("BAD 2\n"); }
    if (1 | 2 | 4 != 7)          { print_str("BAD 3\n"); }
    if (3 ^ 6 ^ 8 != 13)         { print_str("BAD 4\n"); }
    if (7 & 14 & 28 != 4)        { print_str("BAD 5\n"); }
    if (9  << 1 << 2 != 9  << 3) { print_str("BAD 6\n"); }
    if (90 >> 1 >> 2 != 90 >> 3) { print_str("BAD 7\n"); }
    if (100 - 1 + 1000 != 1099)  { print_str("BAD 8\n"); }
    if (5 * 4 / 2 % 3 != 1)      { print_str("BAD 9\n"); }
    if (5 as i32 as i32 != 5)    { print_str("BAD 10\n"); }
    if (!!false)                 { print_str("BAD 11\n"); }
    if (7 != --7)                { print_str("BAD 12\n"); }

    print_str("OK\n");
    return 0;
}
    "#,
        "OK\n",
    );

    reg.add_success_case(
        "short circuit",
        r#"
use "std.zig";

export fn main(argc : isize, argv : &&u8, env : &&u8) -> i32 {
    if (true || { print_str("BAD 1\n"); false }) {
      print_str("OK 1\n");
    }
    if (false || { print_str("OK 2\n"); false }) {
      print_str("BAD 2\n");
    }

    if (true && { print_str("OK 3\n"); false }) {
      print_str("BAD 3\n");
    }
    if (false && { print_str("BAD 4\n"); false }) {
    } else {
      print_str("OK 4\n");
    }

    return 0;
}
    "#,
        "OK 1\nOK 2\nOK 3\nOK 4\n",
    );

    reg.add_success_case(
        "modify operators",
        r#"
use "std.zig";

export fn main(argc : isize, argv : &&u8, env : &&u8) -> i32 {
    var i : i32 = 0;
    i += 5;  if (i != 5)  { print_str("BAD +=\n"); }
    i -= 2;  if (i != 3)  { print_str("BAD -=\n"); }
    i *= 20; if (i != 60) { print_str("BAD *=\n"); }
    i /= 3;  if (i != 20) { print_str("BAD /=\n"); }
    i %= 11; if (i != 9)  { print_str("BAD %=\n"); }
    i <<= 1; if (i != 18) { print_str("BAD <<=\n"); }
    i >>= 2; if (i != 4)  { print_str("BAD >>=\n"); }
    i = 6;
    i &= 5;  if (i != 4)  { print_str("BAD &=\n"); }
    i ^= 6;  if (i != 2)  { print_str("BAD ^=\n"); }
    i = 6;
    i |= 3;  if (i != 7)  { print_str("BAD |=\n"); }

    print_str("OK\n");
    return 0;
}
    "#,
        "OK\n",
    );

    reg.add_success_case(
        "number literals",
        r#"
#link("c")
extern {
    fn printf(__format: &const u8, ...) -> i32;
}

export fn main(argc : isize, argv : &&u8, env : &&u8) -> i32 {
    printf(c"\n");

    printf(c"0: %llu\n",
             0 as u64);
    printf(c"320402575052271: %llu\n",
             320402575052271 as u64);
    printf(c"0x01236789abcdef: %llu\n",
             0x01236789abcdef as u64);
    printf(c"0xffffffffffffffff: %llu\n",
             0xffffffffffffffff as u64);
    printf(c"0x000000ffffffffffffffff: %llu\n",
             0x000000ffffffffffffffff as u64);
    printf(c"0o1777777777777777777777: %llu\n",
             0o1777777777777777777777 as u64);
    printf(c"0o0000001777777777777777777777: %llu\n",
             0o0000001777777777777777777777 as u64);
    printf(c"0b1111111111111111111111111111111111111111111111111111111111111111: %llu\n",
             0b1111111111111111111111111111111111111111111111111111111111111111 as u64);
    printf(c"0b0000001111111111111111111111111111111111111111111111111111111111111111: %llu\n",
             0b0000001111111111111111111111111111111111111111111111111111111111111111 as u64);

    printf(c"\n");

    printf(c"0.0: %a\n",
             0.0 as f64);
    printf(c"0e0: %a\n",
             0e0 as f64);
    printf(c"0.0e0: %a\n",
             0.0e0 as f64);
    printf(c"000000000000000000000000000000000000000000000000000000000.0e0: %a\n",
             000000000000000000000000000000000000000000000000000000000.0e0 as f64);
    printf(c"0.000000000000000000000000000000000000000000000000000000000e0: %a\n",
             0.000000000000000000000000000000000000000000000000000000000e0 as f64);
    printf(c"0.0e000000000000000000000000000000000000000000000000000000000: %a\n",
             0.0e000000000000000000000000000000000000000000000000000000000 as f64);
    printf(c"1.0: %a\n",
             1.0 as f64);
    printf(c"10.0: %a\n",
             10.0 as f64);
    printf(c"10.5: %a\n",
             10.5 as f64);
    printf(c"10.5e5: %a\n",
             10.5e5 as f64);
    printf(c"10.5e+5: %a\n",
             10.5e+5 as f64);
    printf(c"50.0e-2: %a\n",
             50.0e-2 as f64);
    printf(c"50e-2: %a\n",
             50e-2 as f64);

    printf(c"\n");

    printf(c"0x1.0: %a\n",
             0x1.0 as f64);
    printf(c"0x10.0: %a\n",
             0x10.0 as f64);
    printf(c"0x100.0: %a\n",
             0x100.0 as f64);
    printf(c"0x103.0: %a\n",
             0x103.0 as f64);
    printf(c"0x103.7: %a\n",
             0x103.7 as f64);
    printf(c"0x103.70: %a\n",
             0x103.70 as f64);
    printf(c"0x103.70p4: %a\n",
             0x103.70p4 as f64);
    printf(c"0x103.70p5: %a\n",
             0x103.70p5 as f64);
    printf(c"0x103.70p+5: %a\n",
             0x103.70p+5 as f64);
    printf(c"0x103.70p-5: %a\n",
             0x103.70p-5 as f64);

    printf(c"\n");

    printf(c"0b10100.00010e0: %a\n",
             0b10100.00010e0 as f64);
    printf(c"0o10700.00010e0: %a\n",
             0o10700.00010e0 as f64);

    return 0;
}
    "#,
        r#"
0: 0
320402575052271: 320402575052271
0x01236789abcdef: 320402575052271
0xffffffffffffffff: 18446744073709551615
0x000000ffffffffffffffff: 18446744073709551615
0o1777777777777777777777: 18446744073709551615
0o0000001777777777777777777777: 18446744073709551615
0b1111111111111111111111111111111111111111111111111111111111111111: 18446744073709551615
0b0000001111111111111111111111111111111111111111111111111111111111111111: 18446744073709551615

0.0: 0x0p+0
0e0: 0x0p+0
0.0e0: 0x0p+0
000000000000000000000000000000000000000000000000000000000.0e0: 0x0p+0
0.000000000000000000000000000000000000000000000000000000000e0: 0x0p+0
0.0e000000000000000000000000000000000000000000000000000000000: 0x0p+0
1.0: 0x1p+0
10.0: 0x1.4p+3
10.5: 0x1.5p+3
10.5e5: 0x1.0059p+20
10.5e+5: 0x1.0059p+20
50.0e-2: 0x1p-1
50e-2: 0x1p-1

0x1.0: 0x1p+0
0x10.0: 0x1p+4
0x100.0: 0x1p+8
0x103.0: 0x1.03p+8
0x103.7: 0x1.037p+8
0x103.70: 0x1.037p+8
0x103.70p4: 0x1.037p+12
0x103.70p5: 0x1.037p+13
0x103.70p+5: 0x1.037p+13
0x103.70p-5: 0x1.037p+3

0b10100.00010e0: 0x1.41p+4
0o10700.00010e0: 0x1.1c0001p+12
"#,
    );

    reg.add_success_case(
        "structs",
        r#"
use "std.zig";

export fn main(argc : isize, argv : &&u8, env : &&u8) -> i32 {
    var foo : Foo;
    foo.a += 1;
    foo.b = foo.a == 1;
    test_foo(foo);
    test_mutation(&foo);
    if (foo.c != 100) {
        print_str("BAD\n");
    }
    test_point_to_self();
    test_byval_assign();
    test_initializer();
    print_str("OK\n");
    return 0;
}
struct Foo {
    a : i32,
    b : bool,
    c : f32,
}
fn test_foo(foo : Foo) {
    if (!foo.b) {
        print_str("BAD\n");
    }
}
fn test_mutation(foo : &Foo) {
    foo.c = 100;
}
struct Node {
    val: Val,
    next: &Node,
}

struct Val {
    x: i32,
}
fn test_point_to_self() {
    var root : Node;
    root.val.x = 1;

    var node : Node;
    node.next = &root;
    node.val.x = 2;

    root.next = &node;

    if (node.next.next.next.val.x != 1) {
        print_str("BAD\n");
    }
}
fn test_byval_assign() {
    var foo1 : Foo;
    var foo2 : Foo;

    foo1.a = 1234;

    if (foo2.a != 0) { print_str("BAD\n"); }

    foo2 = foo1;

    if (foo2.a != 1234) { print_str("BAD - byval assignment failed\n"); }
}
fn test_initializer() {
    const val = Val { .x = 42 };
    if (val.x != 42) { print_str("BAD\n"); }
}
    "#,
        "OK\n",
    );

    reg.add_success_case(
        "global variables",
        r#"
use "std.zig";

const g1 : i32 = 1233 + 1;
var g2 : i32;

export fn main(argc : isize, argv : &&u8, env : &&u8) -> i32 {
    if (g2 != 0) { print_str("BAD\n"); }
    g2 = g1;
    if (g2 != 1234) { print_str("BAD\n"); }
    print_str("OK\n");
    return 0;
}
    "#,
        "OK\n",
    );

    reg.add_success_case(
        "while loop",
        r#"
use "std.zig";
export fn main(argc : isize, argv : &&u8, env : &&u8) -> i32 {
    var i : i32 = 0;
    while (i < 4) {
        print_str("loop\n");
        i += 1;
    }
    return 0;
}
    "#,
        "loop\nloop\nloop\nloop\n",
    );

    reg.add_success_case(
        "continue and break",
        r#"
use "std.zig";
export fn main(argc : isize, argv : &&u8, env : &&u8) -> i32 {
    var i : i32 = 0;
    while (true) {
        print_str("loop\n");
        i += 1;
        if (i < 4) {
            continue;
        }
        break;
    }
    return 0;
}
    "#,
        "loop\nloop\nloop\nloop\n",
    );

    reg.add_success_case(
        "maybe type",
        r#"
use "std.zig";
export fn main(argc : isize, argv : &&u8, env : &&u8) -> i32 {
    const x : ?bool = true;

    if (const y ?= x) {
        if (y) {
            print_str("x is true\n");
        } else {
            print_str("x is false\n");
        }
    } else {
        print_str("x is none\n");
    }
    return 0;
}
    "#,
        "x is true\n",
    );
}
