use super::*;
use crate::{operator::Operator, target::Target, value::Argument};

fn is_true(path: &str) -> Leaf {
    Leaf::new(Target::attribute(path), Operator::IsTrue).unwrap()
}

fn ci_contains(path: &str, text: &str) -> Leaf {
    Leaf::new(
        Target::attribute(path),
        Operator::ContainsCaseInsensitive(Some(text.to_string())),
    )
    .unwrap()
}

fn absent_contains(path: &str) -> Leaf {
    Leaf::new(Target::attribute(path), Operator::Contains(None)).unwrap()
}

fn text(value: &str) -> Argument {
    Argument::Text(value.to_string())
}

#[test]
fn empty_composer_is_unconstrained() {
    let compiled = Composer::new().compile();
    assert_eq!(compiled.expression, "");
    assert!(compiled.arguments.is_empty());
    assert!(compiled.is_unconstrained());
}

#[test]
fn absent_argument_leaves_absorb_to_nothing() {
    let compiled = Composer::new().and(absent_contains("text")).compile();
    assert_eq!(compiled.expression, "");
    assert!(compiled.arguments.is_empty());
}

#[test]
fn single_leaf_compiles_to_one_parenthesized_clause() {
    let compiled = Composer::new().and(is_true("done")).compile();
    assert_eq!(compiled.expression, "(done == true)");
    assert!(compiled.arguments.is_empty());
}

#[test]
fn simple_and_chain_joins_in_leaf_order() {
    let compiled = Composer::new()
        .and(ci_contains("text", "alpha"))
        .and(ci_contains("title", "beta"))
        .compile();

    assert_eq!(
        compiled.expression,
        "(text CONTAINS[c] %@ AND title CONTAINS[c] %@)"
    );
    assert_eq!(*compiled.arguments, vec![text("alpha"), text("beta")]);
}

#[test]
fn or_seeded_composer_still_seeds_an_and_group() {
    let composer = Composer::new().or(is_true("a"));
    assert_eq!(composer.groups.len(), 1);
    assert_eq!(composer.groups[0].combinator, Combinator::And);
    assert_eq!(composer.compile().expression, "(a == true)");
}

#[test]
fn second_or_call_splits_the_seeded_group() {
    let composer = Composer::new().or(is_true("a")).or(is_true("b"));

    // The seed group is left behind empty; the single leaf migrates.
    assert_eq!(composer.groups.len(), 2);
    assert!(composer.groups[0].leaves.is_empty());
    assert_eq!(composer.groups[1].combinator, Combinator::Or);

    assert_eq!(composer.compile().expression, "(a == true OR b == true)");
}

#[test]
fn splitting_a_two_leaf_group_drops_the_outer_leaf() {
    // On the combinator switch the most recent leaf migrates inward and
    // the lone leftover leaf is discarded with its emptied group, so `a`
    // vanishes from the result.
    let compiled = Composer::new()
        .and(is_true("a"))
        .and(is_true("b"))
        .or(is_true("c"))
        .compile();

    assert_eq!(compiled.expression, "(b == true OR c == true)");
    assert!(compiled.arguments.is_empty());
}

#[test]
fn four_leaf_chain_nests_the_combinator_switch() {
    let compiled = Composer::new()
        .and(is_true("a"))
        .and(is_true("b"))
        .and(is_true("c"))
        .or(is_true("d"))
        .compile();

    assert_eq!(
        compiled.expression,
        "(a == true AND b == true AND (c == true OR d == true))"
    );
}

#[test]
fn switching_back_keeps_nesting_rightward() {
    let compiled = Composer::new()
        .and(is_true("a"))
        .and(is_true("b"))
        .and(is_true("c"))
        .or(is_true("d"))
        .and(is_true("e"))
        .compile();

    // The OR group has two leaves, so the switch back to AND drops `c`
    // the same way the first switch would.
    assert_eq!(
        compiled.expression,
        "(a == true AND b == true AND (d == true AND e == true))"
    );
}

#[test]
fn argument_order_matches_placeholder_order_across_groups() {
    let compiled = Composer::new()
        .and(ci_contains("w", "1"))
        .and(ci_contains("x", "2"))
        .and(ci_contains("y", "3"))
        .or(ci_contains("z", "4"))
        .compile();

    assert_eq!(
        compiled.expression,
        "(w CONTAINS[c] %@ AND x CONTAINS[c] %@ AND (y CONTAINS[c] %@ OR z CONTAINS[c] %@))"
    );
    assert_eq!(
        *compiled.arguments,
        vec![text("1"), text("2"), text("3"), text("4")]
    );
    assert_eq!(compiled.placeholder_count(), compiled.arguments.len());
}

#[test]
fn have_all_of_fans_out_inside_an_or_group() {
    let all_of = Leaf::new(
        Target::attribute("tags"),
        Operator::HaveAllOf(Argument::List(vec![text("a"), text("b"), text("c")])),
    )
    .unwrap();

    let compiled = Composer::group(vec![all_of, is_true("done")], Combinator::Or).compile();

    // The three membership checks stay AND-joined even though the
    // enclosing group combines with OR.
    assert_eq!(
        compiled.expression,
        "(SUBQUERY(tags, $x, $x == %@).@count == 1 \
         AND SUBQUERY(tags, $x, $x == %@).@count == 1 \
         AND SUBQUERY(tags, $x, $x == %@).@count == 1 \
         OR done == true)"
    );
    assert_eq!(*compiled.arguments, vec![text("a"), text("b"), text("c")]);
}

#[test]
fn empty_list_memberships_compile_to_a_count_check() {
    for operator in [
        Operator::HaveAtLeastOneOf(Argument::List(Vec::new())),
        Operator::HaveAllOf(Argument::List(Vec::new())),
    ] {
        let leaf = Leaf::new(Target::attribute("tags"), operator).unwrap();
        let compiled = Composer::new().and(leaf).compile();
        assert_eq!(compiled.expression, "(tags.@count == 0)");
        assert!(compiled.arguments.is_empty());
    }
}

#[test]
fn quantified_equals_gets_the_existential_prefix() {
    let leaf = Leaf::new(
        Target::relationship_attribute("tags", "name"),
        Operator::Equals(Some(text("x"))),
    )
    .unwrap();

    let compiled = Composer::new().and(leaf).compile();
    assert_eq!(compiled.expression, "(ANY tags.name == %@)");
    assert_eq!(*compiled.arguments, vec![text("x")]);
}

#[test]
fn equals_without_argument_binds_no_placeholder() {
    let leaf = Leaf::new(Target::attribute("author"), Operator::Equals(None)).unwrap();
    let compiled = Composer::new().and(leaf).compile();
    assert_eq!(compiled.expression, "(author == nil)");
    assert_eq!(compiled.placeholder_count(), 0);
    assert!(compiled.arguments.is_empty());
}

#[test]
fn literal_group_construction_compiles_directly() {
    let compiled =
        Composer::group(vec![is_true("a"), is_true("b")], Combinator::Or).compile();
    assert_eq!(compiled.expression, "(a == true OR b == true)");
}

#[test]
fn tree_construction_matches_the_equivalent_fluent_chain() {
    let tree = Node::and(vec![is_true("a"), is_true("b")])
        .with_child(Node::or(vec![is_true("c"), is_true("d")]));

    let fluent = Composer::new()
        .and(is_true("a"))
        .and(is_true("b"))
        .and(is_true("c"))
        .or(is_true("d"));

    assert_eq!(Composer::from_tree(tree).compile(), fluent.compile());
}

#[test]
fn deep_tree_nests_each_level_before_the_closing_parenthesis() {
    let tree = Node::or(vec![is_true("a")]).with_child(
        Node::and(vec![is_true("b"), is_true("c")])
            .with_child(Node::or(vec![is_true("d"), is_true("e")])),
    );

    let compiled = Composer::from_tree(tree).compile();
    assert_eq!(
        compiled.expression,
        "(a == true OR (b == true AND c == true AND (d == true OR e == true)))"
    );
}

#[test]
fn empty_tree_levels_are_skipped() {
    let tree = Node::and(Vec::new()).with_child(Node::or(vec![is_true("a"), is_true("b")]));
    let compiled = Composer::from_tree(tree).compile();
    assert_eq!(compiled.expression, "(a == true OR b == true)");
}

#[test]
fn groups_of_only_absorbed_leaves_are_skipped() {
    let tree = Node::and(vec![absent_contains("text")])
        .with_child(Node::or(vec![is_true("a"), is_true("b")]));
    let compiled = Composer::from_tree(tree).compile();
    assert_eq!(compiled.expression, "(a == true OR b == true)");
    assert!(compiled.arguments.is_empty());
}

#[test]
fn leaf_fluent_seeding_matches_composer_chains() {
    let a = is_true("a");
    let b = is_true("b");

    assert_eq!(
        a.clone().and(b.clone()).compile(),
        Composer::new().and(a.clone()).and(b.clone()).compile()
    );
    assert_eq!(a.or(b).compile().expression, "(a == true OR b == true)");
}

#[test]
fn shared_ancestor_extends_along_independent_branches() {
    let base = Composer::new().and(is_true("a")).and(is_true("b"));
    let before = base.compile();

    let left = base.and(is_true("c"));
    let right = base.or(is_true("d"));

    assert_eq!(base.compile(), before);
    assert_eq!(
        left.compile().expression,
        "(a == true AND b == true AND c == true)"
    );
    assert_eq!(right.compile().expression, "(b == true OR d == true)");
}

#[test]
fn compile_is_repeatable() {
    let composer = Composer::new()
        .and(ci_contains("text", "alpha"))
        .or(is_true("done"));
    assert_eq!(composer.compile(), composer.compile());
}

///
/// PROPERTIES
///

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn arb_path() -> impl Strategy<Value = String> {
        "[a-z]{1,6}"
    }

    fn arb_target() -> impl Strategy<Value = Target> {
        prop_oneof![
            arb_path().prop_map(Target::Attribute),
            (arb_path(), arb_path())
                .prop_map(|(rel, attr)| Target::RelationshipAttribute(rel, attr)),
        ]
    }

    fn arb_scalar() -> impl Strategy<Value = Argument> {
        prop_oneof![
            any::<i64>().prop_map(Argument::Int),
            any::<bool>().prop_map(Argument::Bool),
            arb_path().prop_map(Argument::Text),
        ]
    }

    fn arb_operator() -> impl Strategy<Value = Operator> {
        prop_oneof![
            Just(Operator::IsTrue),
            Just(Operator::IsFalse),
            proptest::option::of(arb_path()).prop_map(Operator::Contains),
            any::<i64>().prop_map(Operator::IsGreaterThan),
            proptest::option::of(arb_scalar()).prop_map(Operator::Equals),
            proptest::collection::vec(arb_scalar(), 0..4).prop_map(Operator::IsInArray),
            proptest::collection::vec(arb_scalar(), 0..4)
                .prop_map(|values| Operator::HaveAtLeastOneOf(Argument::List(values))),
            proptest::collection::vec(arb_scalar(), 0..4)
                .prop_map(|values| Operator::HaveAllOf(Argument::List(values))),
            arb_scalar().prop_map(Operator::HaveAtLeastOneOf),
        ]
    }

    fn arb_leaf() -> impl Strategy<Value = Leaf> {
        (arb_target(), arb_operator())
            .prop_map(|(target, operator)| Leaf::new(target, operator).unwrap())
    }

    fn arb_composer() -> impl Strategy<Value = Composer> {
        proptest::collection::vec((any::<bool>(), arb_leaf()), 0..8).prop_map(|calls| {
            calls
                .into_iter()
                .fold(Composer::new(), |composer, (use_and, leaf)| {
                    if use_and {
                        composer.and(leaf)
                    } else {
                        composer.or(leaf)
                    }
                })
        })
    }

    proptest! {
        #[test]
        fn one_placeholder_per_argument(composer in arb_composer()) {
            let compiled = composer.compile();
            prop_assert_eq!(compiled.placeholder_count(), compiled.arguments.len());
        }

        #[test]
        fn compile_is_deterministic(composer in arb_composer()) {
            prop_assert_eq!(composer.compile(), composer.compile());
        }

        #[test]
        fn parentheses_stay_balanced(composer in arb_composer()) {
            let compiled = composer.compile();
            prop_assert_eq!(
                compiled.expression.matches('(').count(),
                compiled.expression.matches(')').count()
            );
        }

        #[test]
        fn extension_never_mutates_the_receiver(
            composer in arb_composer(),
            leaf in arb_leaf(),
        ) {
            let before = composer.compile();
            let _ = composer.and(leaf.clone());
            let _ = composer.or(leaf);
            prop_assert_eq!(composer.compile(), before);
        }
    }
}
