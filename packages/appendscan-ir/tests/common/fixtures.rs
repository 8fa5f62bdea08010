//! Scenario fixtures
//!
//! Front-end trees of small real-world functions. Line numbers count from
//! the `func` line, which is line 1.

use super::builders::*;
use appendscan_ir::features::syntax::{Expr, ExprKind, FunctionDecl};

/// Loop-invariant base appended on every iteration (line 4 conflicts)
///
/// ```text
/// 1 func parseUnnestedKeyFieldSet(raw string, prefix []string) Set {
/// 2     ret := Set{}
/// 3     for _, s := range strings.Fields(raw) {
/// 4         next := append(prefix[:], s)
/// 5         ret = append(ret, next)
/// 6     }
/// 7     return ret
/// 8 }
/// ```
pub fn parse_unnested_key_field_set() -> FunctionDecl {
    let fields = call_expr(field(id("strings", 3), "Fields"), vec![id("raw", 3)], 3);
    FunctionBuilder::new("parseUnnestedKeyFieldSet")
        .params(&["raw", "prefix"])
        .results(1)
        .stmt(define(&["ret"], vec![seq_lit(vec![], 2)], 2))
        .stmt(range_loop(
            Some("_"),
            Some("s"),
            fields,
            vec![
                define(
                    &["next"],
                    vec![call("append", vec![slice(id("prefix", 4), 4), id("s", 4)], 4)],
                    4,
                ),
                assign(
                    vec![id("ret", 5)],
                    vec![call("append", vec![id("ret", 5), id("next", 5)], 5)],
                    5,
                ),
            ],
            3,
        ))
        .stmt(ret(vec![id("ret", 7)], 7))
        .build()
}

/// Append through a plain alias of an already grown base (line 4 conflicts)
///
/// ```text
/// 1 func grow(a []int) {
/// 2     b := a[:]
/// 3     c := append(b, 1)
/// 4     d := append(a, 2)
/// 5 }
/// ```
pub fn grow_through_alias() -> FunctionDecl {
    grow("grow", slice(id("a", 2), 2))
}

/// Same as [`grow_through_alias`] with a bounded re-slice, which is clean
///
/// ```text
/// 2     b := a[:n:n]
/// ```
pub fn grow_through_bounded_reslice() -> FunctionDecl {
    grow("growBounded", bounded_slice(id("a", 2), 2))
}

fn grow(name: &str, base: Expr) -> FunctionDecl {
    FunctionBuilder::new(name)
        .params(&["a"])
        .stmt(define(&["b"], vec![base], 2))
        .stmt(define(
            &["c"],
            vec![call("append", vec![id("b", 3), lit(3)], 3)],
            3,
        ))
        .stmt(define(
            &["d"],
            vec![call("append", vec![id("a", 4), lit(4)], 4)],
            4,
        ))
        .build()
}

/// ```text
/// 1 func pair() int {
/// 2     a, b := f()
/// 3     a, b = f()
/// 4     return a + b
/// 5 }
/// ```
pub fn reassigned_pair() -> FunctionDecl {
    FunctionBuilder::new("pair")
        .results(1)
        .stmt(define(&["a", "b"], vec![call("f", vec![], 2)], 2))
        .stmt(assign(
            vec![id("a", 3), id("b", 3)],
            vec![call("f", vec![], 3)],
            3,
        ))
        .stmt(ret(vec![binary(id("a", 4), id("b", 4), 4)], 4))
        .build()
}

/// ```text
/// 1 func f() (a int, b string) {
/// 2     a = 1
/// 3     b = "hi"
/// 4     return
/// 5 }
/// ```
pub fn naked_return() -> FunctionDecl {
    FunctionBuilder::new("f")
        .named_results(&["a", "b"])
        .stmt(assign(vec![id("a", 2)], vec![lit(2)], 2))
        .stmt(assign(vec![id("b", 3)], vec![lit(3)], 3))
        .stmt(ret(vec![], 4))
        .build()
}

/// ```text
/// 1 func phone(a, b, c string) string {
/// 2     user := User{Name: a, Meta: Meta{Address: b, Phone: c}}
/// 3     return user.Meta.Phone
/// 4 }
/// ```
pub fn struct_field_propagation() -> FunctionDecl {
    let meta = struct_lit(vec![("Address", id("b", 2)), ("Phone", id("c", 2))], 2);
    let user = struct_lit(vec![("Name", id("a", 2)), ("Meta", meta)], 2);
    FunctionBuilder::new("phone")
        .params(&["a", "b", "c"])
        .results(1)
        .stmt(define(&["user"], vec![user], 2))
        .stmt(ret(vec![field(field(id("user", 3), "Meta"), "Phone")], 3))
        .build()
}

/// Two accumulators grown in a loop, returned through named results
///
/// ```text
/// 1 func deconstructIf(fset *token.FileSet, ifStmt *ast.IfStmt) (inits []ast.Stmt, bodies []ast.Stmt) {
/// 2     inits, bodies = make([]ast.Stmt, 0), make([]ast.Stmt, 0)
/// 3     for ifStmt != nil {
/// 4         inits = append(inits, ifStmt.Init)
/// 5         bodies = append(bodies, ifStmt.Body)
/// 6     }
/// 7     return
/// 8 }
/// ```
pub fn deconstruct_if() -> FunctionDecl {
    FunctionBuilder::new("deconstructIf")
        .params(&["fset", "ifStmt"])
        .named_results(&["inits", "bodies"])
        .stmt(assign(
            vec![id("inits", 2), id("bodies", 2)],
            vec![
                call("make", vec![id("Stmt", 2), lit(2)], 2),
                call("make", vec![id("Stmt", 2), lit(2)], 2),
            ],
            2,
        ))
        .stmt(for_loop(
            Some(binary(id("ifStmt", 3), id("nil", 3), 3)),
            vec![
                assign(
                    vec![id("inits", 4)],
                    vec![call(
                        "append",
                        vec![id("inits", 4), field(id("ifStmt", 4), "Init")],
                        4,
                    )],
                    4,
                ),
                assign(
                    vec![id("bodies", 5)],
                    vec![call(
                        "append",
                        vec![id("bodies", 5), field(id("ifStmt", 5), "Body")],
                        5,
                    )],
                    5,
                ),
            ],
            3,
        ))
        .stmt(ret(vec![], 7))
        .build()
}

/// Nested appends starting from an empty literal
///
/// ```text
/// 1 func factorizeAssigment(context factorizationContext, varId VarId, path Path) {
/// 2     pathBytes := joinTo(context.workspace, path, ",")
/// 3     for _, source := range context.sources[varId] {
/// 4         targetPath := append(append([]string{}, source.FromSelector.Selector...), path[len(source.ToSelector.Selector):]...)
/// 5     }
/// 6 }
/// ```
pub fn factorize_assignment(with_join: bool) -> FunctionDecl {
    let mut builder =
        FunctionBuilder::new("factorizeAssigment").params(&["context", "varId", "path"]);
    if with_join {
        builder = builder.stmt(define(
            &["pathBytes"],
            vec![call(
                "joinTo",
                vec![field(id("context", 2), "workspace"), id("path", 2), lit(2)],
                2,
            )],
            2,
        ));
    }

    let inner = call(
        "append",
        vec![
            seq_lit(vec![], 4),
            field(field(id("source", 4), "FromSelector"), "Selector"),
        ],
        4,
    );
    let tail = tail_slice(
        id("path", 4),
        call(
            "len",
            vec![field(field(id("source", 4), "ToSelector"), "Selector")],
            4,
        ),
        4,
    );
    let subject = index(field(id("context", 3), "sources"), id("varId", 3), 3);

    builder
        .stmt(range_loop(
            Some("_"),
            Some("source"),
            subject,
            vec![define(
                &["targetPath"],
                vec![call("append", vec![inner, tail], 4)],
                4,
            )],
            3,
        ))
        .build()
}

/// Appends to one accumulator from two type-switch arms
///
/// ```text
///  1 func SelectAssignOps(context SimplificationContext, execution Execution) []AssignSelectorOp {
///  2     assigns := make([]AssignSelectorOp, 0)
///  3     switch op := transition.Operation.(type) {
///  4     case AssignSelectorOp:
///  5         assigns = append(assigns, op)
///  6     case UseSelectorsOp:
///  7         assigns = append(assigns, AssignSelectorOp{})
///  8     }
///  9     return assigns
/// 10 }
/// ```
pub fn select_assign_ops() -> FunctionDecl {
    let subject = Expr::new(
        ExprKind::TypeAssert(Box::new(field(id("transition", 3), "Operation"))),
        sp(3),
    );
    FunctionBuilder::new("SelectAssignOps")
        .params(&["context", "execution"])
        .results(1)
        .stmt(define(
            &["assigns"],
            vec![call("make", vec![id("AssignSelectorOp", 2), lit(2)], 2)],
            2,
        ))
        .stmt(type_switch(
            "op",
            subject,
            vec![
                clause(
                    vec![id("AssignSelectorOp", 4)],
                    vec![assign(
                        vec![id("assigns", 5)],
                        vec![call("append", vec![id("assigns", 5), id("op", 5)], 5)],
                        5,
                    )],
                    4,
                ),
                clause(
                    vec![id("UseSelectorsOp", 6)],
                    vec![assign(
                        vec![id("assigns", 7)],
                        vec![call(
                            "append",
                            vec![id("assigns", 7), struct_lit(vec![], 7)],
                            7,
                        )],
                        7,
                    )],
                    6,
                ),
            ],
            3,
        ))
        .stmt(ret(vec![id("assigns", 9)], 9))
        .build()
}

/// Endless loop growing a local buffer
///
/// ```text
/// 1 func (s *Store[K, V]) processDeque(shard *Shard[K, V]) {
/// 2     send := make([]*Entry[K, V], 0, 2)
/// 3     for {
/// 4         shard.qlen -= int(evicted.cost.Load())
/// 5         send = append(send, evicted)
/// 6     }
/// 7 }
/// ```
pub fn process_deque() -> FunctionDecl {
    let load = call_expr(field(field(id("evicted", 4), "cost"), "Load"), vec![], 4);
    FunctionBuilder::new("processDeque")
        .params(&["s", "shard"])
        .stmt(define(
            &["send"],
            vec![call("make", vec![id("Entry", 2), lit(2), lit(2)], 2)],
            2,
        ))
        .stmt(for_loop(
            None,
            vec![
                assign(
                    vec![field(id("shard", 4), "qlen")],
                    vec![call("int", vec![load], 4)],
                    4,
                ),
                assign(
                    vec![id("send", 5)],
                    vec![call("append", vec![id("send", 5), id("evicted", 5)], 5)],
                    5,
                ),
            ],
            3,
        ))
        .build()
}

/// Every fixture expected to validate clean
pub fn clean_fixtures() -> Vec<FunctionDecl> {
    vec![
        grow_through_bounded_reslice(),
        reassigned_pair(),
        naked_return(),
        struct_field_propagation(),
        deconstruct_if(),
        factorize_assignment(false),
        factorize_assignment(true),
        select_assign_ops(),
        process_deque(),
    ]
}
