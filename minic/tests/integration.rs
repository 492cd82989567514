//! Integration tests for the minic interpreter
//!
//! Runs whole programs through the public API:
//! - the binary search fixture, built in code and loaded from JSON
//! - fault behavior at program level
//! - source printing

use minic::ast::{BinOp, Block, Expr, FunDecl, Item, Program, Stmt, Type, VarDecl};
use minic::interp::{BufferSink, ErrorKind, WriterSink};
use minic::{run_program, InterpConfig, Interpreter};

const FIXTURE_JSON: &str = include_str!("../../demos/binary_search.json");

fn print_i(expr: Expr) -> Stmt {
    Stmt::Expr(Expr::call("print_i", vec![expr]))
}

fn block(stmts: Vec<Stmt>) -> Stmt {
    Stmt::Block(Block::stmts(stmts))
}

/// `int search(int *a, int target, int l, int r)` and a `main` that searches
/// `[1, 2, 3, 4, 5]` for each of `targets`, then prints 9999.
fn binary_search_program(targets: &[i32]) -> Program {
    let a_at = |e: Expr| Expr::index("a", e);
    let minus_one = || Expr::neg(Expr::int(1));
    let recurse = |lo: &str, hi: &str| {
        Stmt::ret(Expr::call(
            "search",
            vec![Expr::var("a"), Expr::var("target"), Expr::var(lo), Expr::var(hi)],
        ))
    };

    let search = FunDecl::new(
        "search",
        vec![
            VarDecl::new(Type::ArrayParam, "a"),
            VarDecl::int("target"),
            VarDecl::int("l"),
            VarDecl::int("r"),
        ],
        Type::Int,
        Block::new(
            vec![VarDecl::int("i"), VarDecl::int("m"), VarDecl::int("f")],
            vec![
                Stmt::if_else(
                    Expr::binary(
                        Expr::binary(Expr::var("l"), BinOp::Add, Expr::int(1)),
                        BinOp::Ge,
                        Expr::var("r"),
                    ),
                    block(vec![Stmt::if_else(
                        Expr::binary(a_at(Expr::var("l")), BinOp::Eq, Expr::var("target")),
                        block(vec![Stmt::ret(Expr::var("target"))]),
                        Some(block(vec![Stmt::ret(minus_one())])),
                    )]),
                    None,
                ),
                Stmt::assign("i", Expr::var("l")),
                Stmt::assign(
                    "m",
                    Expr::binary(
                        Expr::binary(Expr::var("l"), BinOp::Add, Expr::var("r")),
                        BinOp::Div,
                        Expr::int(2),
                    ),
                ),
                Stmt::if_else(
                    Expr::binary(a_at(Expr::var("m")), BinOp::Eq, Expr::var("target")),
                    block(vec![Stmt::ret(Expr::var("target"))]),
                    Some(block(vec![Stmt::if_else(
                        Expr::binary(Expr::var("target"), BinOp::Lt, a_at(Expr::var("m"))),
                        block(vec![recurse("l", "m")]),
                        Some(block(vec![recurse("m", "r")])),
                    )])),
                ),
                // unreachable: both arms above return
                Stmt::ret(minus_one()),
            ],
        ),
    );

    let mut stmts: Vec<Stmt> = (0..5)
        .map(|i| Stmt::assign_index("a", Expr::int(i), Expr::int(i + 1)))
        .collect();
    for &target in targets {
        stmts.push(print_i(Expr::call(
            "search",
            vec![Expr::var("a"), Expr::int(target), Expr::int(0), Expr::int(5)],
        )));
    }
    stmts.push(print_i(Expr::int(9999)));

    let main = FunDecl::new(
        "main",
        vec![],
        Type::Void,
        Block::new(vec![VarDecl::array("a", 5), VarDecl::int("ans")], stmts),
    );

    Program::new(vec![Item::FunDecl(search), Item::FunDecl(main)])
}

fn fixture() -> Program {
    binary_search_program(&[1, 2, 3, 4, 5, 11])
}

// ============================================
// Fixture
// ============================================

#[test]
fn test_fixture_output() {
    let exec = run_program(&fixture(), InterpConfig::default());
    assert!(exec.is_ok(), "{:?}", exec.result);
    assert_eq!(exec.lines(), vec!["1", "2", "3", "4", "5", "-1", "9999"]);
}

#[test]
fn test_fixture_json_matches_builder() {
    let loaded = Program::from_json(FIXTURE_JSON).unwrap();
    assert_eq!(loaded, fixture());
}

#[test]
fn test_fixture_json_runs() {
    let program = Program::from_json(FIXTURE_JSON).unwrap();
    let exec = run_program(&program, InterpConfig::default());
    assert_eq!(exec.output, "1\n2\n3\n4\n5\n-1\n9999\n");
}

#[test]
fn test_missing_targets() {
    let exec = run_program(&binary_search_program(&[0, 6, -3]), InterpConfig::default());
    assert_eq!(exec.lines(), vec!["-1", "-1", "-1", "9999"]);
}

#[test]
fn test_reruns_are_byte_identical() {
    let program = fixture();
    let first = run_program(&program, InterpConfig::default());
    let second = run_program(&program, InterpConfig::default());
    assert_eq!(first.output, second.output);

    // same interpreter, two runs: output doubles
    let mut interp =
        Interpreter::new(&program, InterpConfig::default(), BufferSink::new()).unwrap();
    interp.run().unwrap();
    interp.run().unwrap();
    assert_eq!(interp.sink().as_str(), first.output.repeat(2));
}

#[test]
fn test_fixture_call_depth_is_bounded() {
    // main + at most four nested search calls for a five-element array
    let exec = run_program(&fixture(), InterpConfig::new().max_call_depth(5));
    assert!(exec.is_ok());

    let exec = run_program(&fixture(), InterpConfig::new().max_call_depth(2));
    // search(a, 1, 0, 5) recurses once more than the limit allows
    assert!(exec.output.is_empty());
    let err = exec.result.unwrap_err();
    assert_eq!(err.kind, ErrorKind::StackOverflow);
    assert_eq!(err.call_chain, vec!["main", "search"]);
}

#[test]
fn test_writer_sink() {
    let program = fixture();
    let mut interp =
        Interpreter::new(&program, InterpConfig::default(), WriterSink::new(Vec::new())).unwrap();
    interp.run().unwrap();
    let bytes = interp.into_sink().into_inner();
    assert_eq!(String::from_utf8(bytes).unwrap(), "1\n2\n3\n4\n5\n-1\n9999\n");
}

// ============================================
// Faults
// ============================================

#[test]
fn test_out_of_bounds_search_keeps_prior_output() {
    // a search window past the end reads a[6]
    let mut program = fixture();
    if let Some(Item::FunDecl(main)) = program.items.last_mut() {
        main.body.stmts.insert(
            6,
            print_i(Expr::call(
                "search",
                vec![Expr::var("a"), Expr::int(6), Expr::int(5), Expr::int(7)],
            )),
        );
    }
    let exec = run_program(&program, InterpConfig::default());
    assert_eq!(exec.lines(), vec!["1"]);
    let err = exec.result.unwrap_err();
    assert_eq!(err.kind, ErrorKind::IndexOutOfBounds);
    assert_eq!(err.call_chain, vec!["main", "search"]);
}

#[test]
fn test_division_by_zero_in_callee() {
    let program = Program::new(vec![
        Item::FunDecl(FunDecl::new(
            "half",
            vec![VarDecl::int("d")],
            Type::Int,
            Block::stmts(vec![Stmt::ret(Expr::binary(
                Expr::int(-7),
                BinOp::Div,
                Expr::var("d"),
            ))]),
        )),
        Item::FunDecl(FunDecl::new(
            "main",
            vec![],
            Type::Void,
            Block::stmts(vec![
                print_i(Expr::call("half", vec![Expr::int(2)])),
                print_i(Expr::call("half", vec![Expr::int(0)])),
                print_i(Expr::int(1)),
            ]),
        )),
    ]);
    let exec = run_program(&program, InterpConfig::default());
    assert_eq!(exec.output, "-3\n");
    let err = exec.result.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ArithmeticError);
    assert_eq!(err.call_chain, vec!["main", "half"]);
}

#[test]
fn test_wrong_arity_on_search() {
    let program = Program::new(vec![
        fixture().items[0].clone(),
        Item::FunDecl(FunDecl::new(
            "main",
            vec![],
            Type::Void,
            Block::new(
                vec![VarDecl::array("a", 5)],
                vec![print_i(Expr::call(
                    "search",
                    vec![Expr::var("a"), Expr::int(1)],
                ))],
            ),
        )),
    ]);
    let exec = run_program(&program, InterpConfig::default());
    assert_eq!(exec.error_kind(), Some(ErrorKind::ArityMismatch));
}

// ============================================
// Printing
// ============================================

#[test]
fn test_print_fixture_source() {
    let source = fixture().to_string();
    insta::assert_snapshot!(source.trim_end(), @r"
int search(int *a, int target, int l, int r) {
    int i;
    int m;
    int f;
    if (l + 1 >= r) {
        if (a[l] == target) {
            return target;
        } else {
            return -1;
        }
    }
    i = l;
    m = (l + r) / 2;
    if (a[m] == target) {
        return target;
    } else {
        if (target < a[m]) {
            return search(a, target, l, m);
        } else {
            return search(a, target, m, r);
        }
    }
    return -1;
}

void main() {
    int a[5];
    int ans;
    a[0] = 1;
    a[1] = 2;
    a[2] = 3;
    a[3] = 4;
    a[4] = 5;
    print_i(search(a, 1, 0, 5));
    print_i(search(a, 2, 0, 5));
    print_i(search(a, 3, 0, 5));
    print_i(search(a, 4, 0, 5));
    print_i(search(a, 5, 0, 5));
    print_i(search(a, 11, 0, 5));
    print_i(9999);
}
");
}
