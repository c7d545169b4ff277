#[cfg(test)]
mod verify {
    use rivet_format::formatting::*;
    use rivet_format::language::*;

    fn trim(text: &str) -> String {
        let head = text.trim_start_matches('\n');
        let tail = head.trim_end_matches(' ');
        tail.to_string()
    }

    fn var(name: &str) -> Node {
        Node::Var {
            name: name.to_string(),
            meta: Meta::none(),
        }
    }

    fn int(token: &str) -> Node {
        Node::Integer {
            token: token.to_string(),
            meta: Meta::none(),
        }
    }

    fn atom(name: &str) -> Node {
        Node::Atom {
            name: name.to_string(),
            meta: Meta::none(),
        }
    }

    fn binary(op: BinaryOp, left: Node, right: Node) -> Node {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            meta: Meta::none(),
        }
    }

    fn local(name: &str, args: Vec<Node>) -> Node {
        Node::Call {
            target: Target::Local(name.to_string()),
            args,
            sections: vec![],
            meta: Meta::none(),
        }
    }

    fn render(node: &Node, options: &Options) -> String {
        format(node, &[], options).unwrap()
    }

    #[test]
    fn simple_addition() {
        let sum = binary(BinaryOp::Add, int("1"), int("2"));
        assert_eq!(render(&sum, &Options::new()), "1 + 2\n");
    }

    #[test]
    fn numbers_are_normalized() {
        assert_eq!(render(&int("0xaf"), &Options::new()), "0xAF\n");
        assert_eq!(render(&int("1234567"), &Options::new()), "1_234_567\n");
        let float = Node::Float {
            token: "1.5E3".to_string(),
            meta: Meta::none(),
        };
        assert_eq!(render(&float, &Options::new()), "1.5e3\n");
    }

    #[test]
    fn calls_use_parentheses_by_default() {
        let call = local("foo", vec![int("1"), int("2"), int("3")]);
        assert_eq!(render(&call, &Options::new()), "foo(1, 2, 3)\n");

        let empty = local("bar", vec![]);
        assert_eq!(render(&empty, &Options::new()), "bar()\n");
    }

    #[test]
    fn registered_locals_drop_parentheses() {
        let options = Options::new().without_parens("foo", Arity::Exact(3));
        let call = local("foo", vec![int("1"), int("2"), int("3")]);
        assert_eq!(render(&call, &options), "foo 1, 2, 3\n");

        // Wrong arity keeps the parentheses.
        let two = local("foo", vec![int("1"), int("2")]);
        assert_eq!(render(&two, &options), "foo(1, 2)\n");
    }

    #[test]
    fn no_parens_only_in_statement_position() {
        let options = Options::new().without_parens("foo", Arity::Any);
        // As an operator operand the call keeps its parentheses.
        let sum = binary(BinaryOp::Add, local("foo", vec![int("1")]), int("2"));
        assert_eq!(render(&sum, &options), "foo(1) + 2\n");
    }

    #[test]
    fn pipelines_break_before_each_stage() {
        let pipeline = binary(
            BinaryOp::Pipe,
            binary(BinaryOp::Pipe, var("a"), local("b", vec![])),
            local("c", vec![]),
        );

        assert_eq!(
            render(&pipeline, &Options::new()),
            "a |> b() |> c()\n"
        );
        assert_eq!(
            render(&pipeline, &Options::new().with_width(5)),
            trim(
                r#"
a
|> b()
|> c()
"#
            )
        );
    }

    #[test]
    fn concatenation_chains_share_one_indent() {
        let chain = binary(
            BinaryOp::Concat,
            var("aaaa"),
            binary(BinaryOp::Concat, var("bbbb"), var("cccc")),
        );

        assert_eq!(render(&chain, &Options::new()), "aaaa <> bbbb <> cccc\n");
        // Breaking indents the continuation exactly one level, however long
        // the chain.
        assert_eq!(
            render(&chain, &Options::new().with_width(6)),
            trim(
                r#"
aaaa <>
  bbbb <>
  cccc
"#
            )
        );
    }

    #[test]
    fn mixed_logical_operators_are_parenthesized() {
        let condition = binary(
            BinaryOp::Or,
            binary(BinaryOp::And, var("a"), var("b")),
            var("c"),
        );
        assert_eq!(render(&condition, &Options::new()), "(a and b) or c\n");
    }

    #[test]
    fn precedence_drives_parentheses() {
        let product = binary(
            BinaryOp::Mul,
            binary(BinaryOp::Add, var("a"), var("b")),
            var("c"),
        );
        assert_eq!(render(&product, &Options::new()), "(a + b) * c\n");

        let sum = binary(
            BinaryOp::Add,
            var("a"),
            binary(BinaryOp::Mul, var("b"), var("c")),
        );
        assert_eq!(render(&sum, &Options::new()), "a + b * c\n");
    }

    #[test]
    fn membership_nests_with_parentheses() {
        let nested = binary(
            BinaryOp::In,
            var("a"),
            binary(BinaryOp::In, var("b"), var("c")),
        );
        assert_eq!(render(&nested, &Options::new()), "a in (b in c)\n");
    }

    #[test]
    fn range_prints_without_spaces() {
        let range = binary(BinaryOp::Range, int("1"), int("10"));
        assert_eq!(render(&range, &Options::new()), "1..10\n");
    }

    #[test]
    fn unary_operators() {
        let negated = Node::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(binary(BinaryOp::Add, var("a"), var("b"))),
            meta: Meta::none(),
        };
        assert_eq!(render(&negated, &Options::new()), "-(a + b)\n");

        let not = Node::Unary {
            op: UnaryOp::Not,
            operand: Box::new(var("ready")),
            meta: Meta::none(),
        };
        assert_eq!(render(&not, &Options::new()), "not ready\n");
    }

    #[test]
    fn containers_fit_or_break() {
        let list = Node::List {
            elements: vec![int("1"), int("2"), int("3")],
            meta: Meta::none(),
        };
        assert_eq!(render(&list, &Options::new()), "[1, 2, 3]\n");
        assert_eq!(
            render(&list, &Options::new().with_width(4)),
            trim(
                r#"
[
  1,
  2,
  3
]
"#
            )
        );
    }

    #[test]
    fn maps_use_keyword_shorthand_for_atom_keys() {
        let map = Node::Map {
            name: None,
            entries: vec![
                Node::Pair {
                    key: Box::new(atom("a")),
                    value: Box::new(int("1")),
                    meta: Meta::none(),
                },
                Node::Pair {
                    key: Box::new(int("2")),
                    value: Box::new(int("3")),
                    meta: Meta::none(),
                },
            ],
            meta: Meta::none(),
        };
        assert_eq!(render(&map, &Options::new()), "%{a: 1, 2 => 3}\n");
    }

    #[test]
    fn keyword_tail_prints_without_brackets() {
        let call = local(
            "foo",
            vec![
                var("x"),
                Node::List {
                    elements: vec![Node::Pair {
                        key: Box::new(atom("timeout")),
                        value: Box::new(int("500")),
                        meta: Meta::none(),
                    }],
                    meta: Meta::none(),
                },
            ],
        );
        assert_eq!(render(&call, &Options::new()), "foo(x, timeout: 500)\n");
    }

    #[test]
    fn block_calls_always_span_lines() {
        let call = Node::Call {
            target: Target::Local("if".to_string()),
            args: vec![var("ok")],
            sections: vec![
                BlockSection {
                    keyword: "do".to_string(),
                    body: vec![local("a", vec![])],
                    meta: Meta::none(),
                },
                BlockSection {
                    keyword: "else".to_string(),
                    body: vec![var("b")],
                    meta: Meta::none(),
                },
            ],
            meta: Meta::none(),
        };

        assert_eq!(
            render(&call, &Options::new()),
            trim(
                r#"
if ok do
  a()
else
  b
end
"#
            )
        );
    }

    #[test]
    fn short_anonymous_functions_stay_inline() {
        let function = Node::Fn {
            clauses: vec![Clause {
                patterns: vec![var("x")],
                guard: None,
                body: vec![binary(BinaryOp::Add, var("x"), int("1"))],
                meta: Meta::none(),
            }],
            meta: Meta::none(),
        };
        assert_eq!(render(&function, &Options::new()), "fn x -> x + 1 end\n");
    }

    #[test]
    fn multi_clause_functions_break() {
        let function = Node::Fn {
            clauses: vec![
                Clause {
                    patterns: vec![Node::Nil { meta: Meta::none() }],
                    guard: None,
                    body: vec![atom("empty")],
                    meta: Meta::none(),
                },
                Clause {
                    patterns: vec![var("x")],
                    guard: Some(local("is_list", vec![var("x")])),
                    body: vec![atom("list")],
                    meta: Meta::none(),
                },
            ],
            meta: Meta::none(),
        };

        assert_eq!(
            render(&function, &Options::new()),
            trim(
                r#"
fn
  nil ->
    :empty
  x when is_list(x) ->
    :list
end
"#
            )
        );
    }

    #[test]
    fn strings_and_interpolation() {
        let greeting = Node::Str {
            segments: vec![
                Segment::Literal("hi ".to_string()),
                Segment::Interpolation(var("name")),
            ],
            meta: Meta::none(),
        };
        assert_eq!(render(&greeting, &Options::new()), "\"hi #{name}\"\n");
    }

    #[test]
    fn heredocs_escape_their_delimiter() {
        let heredoc = Node::Str {
            segments: vec![Segment::Literal("hello \"\"\" world".to_string())],
            meta: Meta {
                delimiter: Some("\"\"\"".to_string()),
                ..Meta::none()
            },
        };

        assert_eq!(
            render(&heredoc, &Options::new()),
            trim(
                r#"
"""
hello \""" world
"""
"#
            )
        );
    }

    #[test]
    fn quoted_atoms() {
        assert_eq!(render(&atom("ok"), &Options::new()), ":ok\n");
        assert_eq!(
            render(&atom("with space"), &Options::new()),
            ":\"with space\"\n"
        );
    }

    #[test]
    fn negated_conditional_migration() {
        let unless = Node::Call {
            target: Target::Local("unless".to_string()),
            args: vec![binary(BinaryOp::Eq, var("a"), var("b"))],
            sections: vec![BlockSection {
                keyword: "do".to_string(),
                body: vec![var("x")],
                meta: Meta::none(),
            }],
            meta: Meta::none(),
        };

        let plain = render(&unless, &Options::new());
        assert!(plain.starts_with("unless a == b do"));

        let options = Options::new().with_migrations(Migrations {
            negated_conditionals: true,
            charlist_sigils: false,
        });
        assert_eq!(
            render(&unless, &options),
            trim(
                r#"
if a != b do
  x
end
"#
            )
        );
    }

    #[test]
    fn charlist_sigil_migration() {
        let charlist = Node::Charlist {
            segments: vec![Segment::Literal("abc".to_string())],
            meta: Meta::none(),
        };

        assert_eq!(render(&charlist, &Options::new()), "'abc'\n");

        let options = Options::new().with_migrations(Migrations {
            negated_conditionals: false,
            charlist_sigils: true,
        });
        assert_eq!(render(&charlist, &options), "~c\"abc\"\n");
    }

    #[test]
    fn custom_sigils_run_their_callback() {
        let sigil = Node::Sigil {
            name: "SQL".to_string(),
            segments: vec![Segment::Literal("select 1".to_string())],
            modifiers: String::new(),
            meta: Meta {
                delimiter: Some("\"".to_string()),
                ..Meta::none()
            },
        };

        let options = Options::new()
            .with_sigil("SQL", Box::new(|raw, _| Ok(raw.to_uppercase())))
            .unwrap();
        assert_eq!(render(&sigil, &options), "~SQL\"SELECT 1\"\n");

        let failing = Options::new()
            .with_sigil("SQL", Box::new(|_, _| Err("not sql".to_string())))
            .unwrap();
        let error = format(&sigil, &[], &failing).unwrap_err();
        assert!(matches!(error, FormatError::SigilCallback { .. }));
        assert!(error.to_string().contains("~SQL"));
    }

    #[test]
    fn unregistered_sigils_pass_through() {
        let sigil = Node::Sigil {
            name: "r".to_string(),
            segments: vec![Segment::Literal("a+b".to_string())],
            modifiers: "i".to_string(),
            meta: Meta {
                delimiter: Some("/".to_string()),
                ..Meta::none()
            },
        };
        assert_eq!(render(&sigil, &Options::new()), "~r/a+b/i\n");
    }

    #[test]
    fn decorations_do_not_disturb_layout() {
        let mut decorations = Decorations::none();
        decorations.set(Syntax::Variable, "<v>", "</v>");

        // Width 12 is exactly the visible length; decorated output must not
        // count its markup against the limit.
        let plain = Options::new().with_width(12);
        let styled = Options::new().with_width(12).with_decorations(decorations);

        let sum = binary(BinaryOp::Add, var("alpha"), var("beta"));
        assert_eq!(render(&sum, &plain), "alpha + beta\n");
        assert_eq!(render(&sum, &styled), "<v>alpha</v> + <v>beta</v>\n");
    }

    #[test]
    fn lines_respect_the_width_limit() {
        let list = Node::List {
            elements: vec![var("alpha"), var("bravo"), var("charlie"), var("delta")],
            meta: Meta::none(),
        };
        let output = render(&list, &Options::new().with_width(10));
        for line in output.lines() {
            assert!(line.len() <= 10, "line too long: {:?}", line);
        }
    }

    #[test]
    fn formatting_is_deterministic() {
        let pipeline = binary(
            BinaryOp::Pipe,
            binary(BinaryOp::Pipe, var("input"), local("parse", vec![])),
            local("emit", vec![]),
        );
        let options = Options::new().with_width(10);
        let first = render(&pipeline, &options);
        let second = render(&pipeline, &options);
        assert_eq!(first, second);
    }

    #[test]
    fn remote_and_anonymous_calls() {
        let remote = Node::Call {
            target: Target::Remote {
                module: Box::new(var("List")),
                name: "first".to_string(),
            },
            args: vec![var("xs")],
            sections: vec![],
            meta: Meta::none(),
        };
        assert_eq!(render(&remote, &Options::new()), "List.first(xs)\n");

        let anonymous = Node::Call {
            target: Target::Anonymous(Box::new(var("fun"))),
            args: vec![int("1")],
            sections: vec![],
            meta: Meta::none(),
        };
        assert_eq!(render(&anonymous, &Options::new()), "fun.(1)\n");
    }
}
