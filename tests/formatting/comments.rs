#[cfg(test)]
mod verify {
    use rivet_format::formatting::*;
    use rivet_format::language::*;

    fn trim(text: &str) -> String {
        text.trim_start_matches('\n').to_string()
    }

    fn var_at(name: &str, line: u32) -> Node {
        Node::Var {
            name: name.to_string(),
            meta: Meta::at(line),
        }
    }

    fn int_at(token: &str, line: u32) -> Node {
        Node::Integer {
            token: token.to_string(),
            meta: Meta::at(line),
        }
    }

    fn call_at(name: &str, line: u32) -> Node {
        Node::Call {
            target: Target::Local(name.to_string()),
            args: vec![],
            sections: vec![],
            meta: Meta::at(line),
        }
    }

    fn block(body: Vec<Node>) -> Node {
        Node::Block {
            body,
            meta: Meta::none(),
        }
    }

    #[test]
    fn leading_comment_precedes_its_statement() {
        let root = block(vec![call_at("foo", 2)]);
        let comments = vec![Comment::new(1, "# before")];

        let output = format(&root, &comments, &Options::new()).unwrap();
        assert_eq!(
            output,
            trim(
                r#"
# before
foo()
"#
            )
        );
    }

    #[test]
    fn trailing_comment_shares_the_line() {
        let root = block(vec![call_at("foo", 1), call_at("bar", 2)]);
        let comments = vec![Comment::new(1, "# same line")];

        let output = format(&root, &comments, &Options::new()).unwrap();
        assert_eq!(
            output,
            trim(
                r#"
foo() # same line
bar()
"#
            )
        );
    }

    #[test]
    fn comment_between_list_elements() {
        let list = Node::List {
            elements: vec![int_at("1", 2), int_at("2", 4)],
            meta: Meta {
                closing_line: Some(5),
                ..Meta::at(1)
            },
        };
        let comments = vec![Comment::new(3, "# two")];

        let output = format(&list, &comments, &Options::new()).unwrap();
        assert_eq!(
            output,
            trim(
                r#"
[
  1,
  # two
  2
]
"#
            )
        );
    }

    #[test]
    fn comments_force_containers_to_break() {
        // Without the comment this list fits on one line.
        let list = Node::List {
            elements: vec![int_at("1", 2), int_at("2", 3)],
            meta: Meta {
                closing_line: Some(4),
                ..Meta::at(1)
            },
        };
        assert_eq!(format(&list, &[], &Options::new()).unwrap(), "[1, 2]\n");

        let comments = vec![Comment::new(2, "# note")];
        let output = format(&list, &comments, &Options::new()).unwrap();
        assert!(output.contains('\n'));
        assert!(output.contains("# note"));
    }

    #[test]
    fn element_comment_blanks_collapse_to_one() {
        let mut heading = Comment::new(4, "# two");
        heading.blank_before = 2;
        let list = Node::List {
            elements: vec![int_at("1", 2), int_at("2", 6)],
            meta: Meta {
                closing_line: Some(7),
                ..Meta::at(1)
            },
        };
        let output = format(&list, &[heading], &Options::new()).unwrap();
        assert_eq!(
            output,
            trim(
                r#"
[
  1,

  # two
  2
]
"#
            )
        );

        let mut spaced = Comment::new(3, "# two");
        spaced.blank_after = 1;
        let list = Node::List {
            elements: vec![int_at("1", 2), int_at("2", 5)],
            meta: Meta {
                closing_line: Some(6),
                ..Meta::at(1)
            },
        };
        let output = format(&list, &[spaced], &Options::new()).unwrap();
        assert_eq!(
            output,
            trim(
                r#"
[
  1,
  # two

  2
]
"#
            )
        );
    }

    #[test]
    fn blank_lines_collapse_to_one() {
        let mut first = call_at("setup", 1);
        if let Node::Call { meta, .. } = &mut first {
            meta.newlines = Some(4);
        }
        let root = block(vec![first, call_at("run", 6)]);

        let output = format(&root, &[], &Options::new()).unwrap();
        assert_eq!(
            output,
            trim(
                r#"
setup()

run()
"#
            )
        );
    }

    #[test]
    fn adjacent_statements_stay_adjacent() {
        let root = block(vec![call_at("a", 1), call_at("b", 2)]);
        let output = format(&root, &[], &Options::new()).unwrap();
        assert_eq!(output, "a()\nb()\n");
    }

    #[test]
    fn comments_after_the_last_statement_survive() {
        let root = block(vec![var_at("x", 1)]);
        let comments = vec![Comment::new(3, "# done")];

        let output = format(&root, &comments, &Options::new()).unwrap();
        assert_eq!(
            output,
            trim(
                r#"
x
# done
"#
            )
        );
    }

    #[test]
    fn comment_blank_separation_is_kept() {
        let root = block(vec![call_at("foo", 4)]);
        let mut comment = Comment::new(1, "# heading");
        comment.blank_after = 1;

        let output = format(&root, &[comment], &Options::new()).unwrap();
        assert_eq!(
            output,
            trim(
                r#"
# heading

foo()
"#
            )
        );
    }

    #[test]
    fn nodes_without_lines_skip_interleaving() {
        // Synthetic nodes carry no position; comments wait for the next
        // positioned sibling.
        let root = block(vec![
            Node::Var {
                name: "synthetic".to_string(),
                meta: Meta::none(),
            },
            var_at("real", 5),
        ]);
        let comments = vec![Comment::new(2, "# floats down")];

        let output = format(&root, &comments, &Options::new()).unwrap();
        assert_eq!(
            output,
            trim(
                r#"
synthetic
# floats down
real
"#
            )
        );
    }

    #[test]
    fn comment_text_is_normalized() {
        let comment = Comment::new(1, "#no space");
        assert_eq!(comment.text, "# no space");

        let root = block(vec![call_at("foo", 2)]);
        let output = format(&root, &[comment], &Options::new()).unwrap();
        assert!(output.starts_with("# no space\n"));
    }
}
