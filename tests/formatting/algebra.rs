#[cfg(test)]
mod verify {
    use rivet_format::algebra::*;

    fn items(names: &[&str]) -> Doc {
        let docs: Vec<Doc> = names.iter().map(|name| text(*name)).collect();
        join(docs, concat(vec![text(","), soft_break(" ")]))
    }

    #[test]
    fn groups_flatten_when_they_fit() {
        let doc = group(items(&["one", "two", "three"]));
        assert_eq!(render(&doc, 40), "one, two, three");
    }

    #[test]
    fn groups_break_as_a_unit() {
        let doc = group(items(&["one", "two", "three"]));
        assert_eq!(render(&doc, 10), "one,\ntwo,\nthree");
    }

    #[test]
    fn flex_breaks_fill_lines_individually() {
        let docs: Vec<Doc> = ["alpha", "bravo", "charlie", "delta"]
            .iter()
            .map(|name| text(*name))
            .collect();
        let doc = group(join(docs, flex_break(" ")));
        assert_eq!(render(&doc, 13), "alpha bravo\ncharlie delta");
    }

    #[test]
    fn nesting_indents_after_breaks() {
        let doc = group(concat(vec![
            text("["),
            nest(concat(vec![soft_break(""), items(&["a", "b"])]), 2),
            soft_break(""),
            text("]"),
        ]));
        assert_eq!(render(&doc, 20), "[a, b]");
        assert_eq!(render(&doc, 4), "[\n  a,\n  b\n]");
    }

    #[test]
    fn unlimited_width_never_wraps() {
        let doc = group(items(&["a", "b", "c", "d", "e", "f", "g"]));
        let output = render(&doc, INFINITY);
        assert!(!output.contains('\n'));
    }

    #[test]
    fn force_unfit_defeats_any_width() {
        let doc = force_unfit(items(&["a", "b"]));
        assert_eq!(render(&doc, INFINITY), "a,\nb");

        // A surrounding group can never flatten it either.
        let grouped = group(force_unfit(items(&["a", "b"])));
        assert_eq!(render(&grouped, INFINITY), "a,\nb");
    }

    #[test]
    fn zero_width_text_is_free() {
        let decorated = group(concat(vec![
            zero_width("<<<"),
            text("12345"),
            zero_width(">>>"),
            soft_break(" "),
            text("67890"),
        ]));
        // Eleven visible columns; the markup adds none.
        assert_eq!(render(&decorated, 11), "<<<12345>>> 67890");
    }

    #[test]
    fn reset_nesting_returns_to_the_margin() {
        let doc = concat(vec![
            text("a"),
            nest(
                concat(vec![
                    line(),
                    text("b"),
                    nest_reset(concat(vec![line(), text("c")])),
                ]),
                4,
            ),
        ]);
        assert_eq!(render(&doc, 80), "a\n    b\nc");
    }

    #[test]
    fn blank_lines_carry_no_indentation() {
        let doc = nest(concat(vec![text("a"), line(), line(), text("b")]), 4);
        assert_eq!(render(&doc, 80), "a\n\n    b");
    }
}
