//! End-to-end composition tests: registration, expansion and fixture replay.

use testbuilder::prelude::*;

type Registry = StageRegistry<String, i32, ()>;

fn run_sequence(registry: &Registry) -> Vec<String> {
    registry
        .tests()
        .map(|(name, builder)| builder.build(&TestContext::new(name)).sut)
        .collect()
}

#[cfg(test)]
mod incremental_tests {
    use super::*;

    #[test]
    fn state_is_repeated_for_each_position() {
        let mut registry = Registry::new();
        for name in ["1", "2", "3", "4"] {
            registry
                .append_stage(name)
                .with_cumulative_setup(|_, _, state| *state += 1);
        }

        let states: Vec<_> = registry
            .tests()
            .map(|(name, builder)| builder.build(&TestContext::new(name)).state)
            .collect();
        assert_eq!(states, vec![1, 2, 3, 4]);
    }

    #[test]
    fn previous_one_shot_setups_are_ignored() {
        let mut registry = Registry::new();
        registry.append_stage("1").with_cumulative_setup(|_, sut, _| *sut = "a".into());
        registry.append_stage("2").with_cumulative_setup(|_, sut, _| sut.push('b'));
        registry
            .append_stage("3")
            .with_cumulative_setup(|_, sut, _| sut.push('c'))
            .with_one_shot_setup(|_, sut, _| *sut = "-".into());
        registry.append_stage("4").with_cumulative_setup(|_, sut, _| sut.push('d'));

        let sequence = run_sequence(&registry);
        assert_eq!(sequence, vec!["a", "ab", "-", "abcd"]);
        assert!(!sequence[3].contains('-'));
    }

    #[test]
    fn names_are_plain_without_alternatives() {
        let mut registry = Registry::new();
        registry.append_stage("first");
        registry.append_stage("second");
        let names: Vec<_> = registry.tests().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn stopping_early_yields_nothing_more() {
        use std::ops::ControlFlow;

        let mut registry = Registry::new();
        registry.append_stage("test1");
        registry.append_stage("test2");

        let mut produced = Vec::new();
        let delivered = registry.visit_tests(|name, _| {
            produced.push(name.to_string());
            ControlFlow::Break(())
        });
        assert_eq!(delivered, 1);
        assert_eq!(produced, vec!["test1"]);

        let mut tests = registry.tests();
        assert_eq!(tests.next().map(|(name, _)| name).as_deref(), Some("test1"));
        drop(tests);
    }
}

#[cfg(test)]
mod alternative_tests {
    use super::*;

    #[test]
    fn simple_alternatives() {
        let mut registry = Registry::new();
        registry.append_stage("1").with_cumulative_setup(|_, sut, _| *sut = "a".into());
        registry
            .append_alternative("2")
            .with_cumulative_setup(|_, sut, _| *sut = "b".into());

        assert_eq!(run_sequence(&registry), vec!["a", "b"]);
    }

    #[test]
    fn alternative_replays_earlier_stages() {
        let mut registry = Registry::new();
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('a'));
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('b'));
        registry
            .append_alternative("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('c'));
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('d'));

        assert_eq!(
            run_sequence(&registry),
            vec!["a", "ab", "abd", "a", "ac", "acd"]
        );
    }

    #[test]
    fn two_alternative_stages_cycle_first_stage_fastest() {
        let mut registry = Registry::new();
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('a'))
            .with_one_shot_setup(|_, sut, _| sut.push('s'));
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('b'));
        registry
            .append_alternative("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('c'))
            .with_one_shot_setup(|_, sut, _| sut.push_str("_s2"));
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('d'));
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('e'));
        registry
            .append_alternative("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('f'))
            .with_one_shot_setup(|_, sut, _| sut.push_str("_s3"));

        let expected = vec![
            // 0 0
            "as", "ab", "abd", "abde",
            // 1 0
            "as", "ac_s2", "acd", "acde",
            // 0 1
            "as", "ab", "abd", "abdf_s3",
            // 1 1
            "as", "ac_s2", "acd", "acdf_s3",
        ];
        assert_eq!(run_sequence(&registry), expected);
    }

    #[test]
    fn three_alternatives_in_one_stage() {
        let mut registry = Registry::new();
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('a'))
            .with_one_shot_setup(|_, sut, _| sut.push('s'));
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('b'));
        registry
            .append_alternative("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('c'))
            .with_one_shot_setup(|_, sut, _| sut.push_str("_s2"));
        registry
            .append_alternative("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push_str("_alt_2"))
            .with_one_shot_setup(|_, sut, _| sut.push_str("_alt_s2"));

        assert_eq!(
            run_sequence(&registry),
            vec!["as", "ab", "as", "ac_s2", "as", "a_alt_2_alt_s2"]
        );
    }

    #[test]
    fn multiple_complex_alternatives() {
        let mut registry = Registry::new();
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('a'))
            .with_one_shot_setup(|_, sut, _| sut.push('s'));
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('b'));
        registry
            .append_alternative("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('c'))
            .with_one_shot_setup(|_, sut, _| sut.push_str("_s2"));
        registry
            .append_alternative("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push_str("_alt_2_"))
            .with_one_shot_setup(|_, sut, _| sut.push_str("alt_s2"));
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('d'));
        registry
            .append_stage("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('e'));
        registry
            .append_alternative("TEST_NAME")
            .with_cumulative_setup(|_, sut, _| sut.push('f'))
            .with_one_shot_setup(|_, sut, _| sut.push_str("_s3"));

        let expected = vec![
            "as", "ab", "abd", "abde",
            "as", "ac_s2", "acd", "acde",
            "as", "a_alt_2_alt_s2", "a_alt_2_d", "a_alt_2_de",
            "as", "ab", "abd", "abdf_s3",
            "as", "ac_s2", "acd", "acdf_s3",
            "as", "a_alt_2_alt_s2", "a_alt_2_d", "a_alt_2_df_s3",
        ];
        assert_eq!(run_sequence(&registry), expected);
        assert_eq!(registry.path_count(), 6);
        assert_eq!(registry.test_count(), 24);
    }

    #[test]
    fn labelled_names_are_globally_unique() {
        let mut registry = Registry::new();
        registry.append_stage("open");
        registry.append_alternative("open-retry");
        registry.append_stage("read");
        registry.append_alternative("read-partial");
        registry.append_alternative("read-empty");

        let names: Vec<_> = registry.tests().map(|(name, _)| name).collect();
        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), 12);
        assert_eq!(unique.len(), names.len());
        assert_eq!(names[0], "Test Alternative #00_open");
        assert_eq!(names[11], "Test Alternative #12_read-empty");
    }

    #[test]
    fn repeated_alternative_names_share_a_test_name_within_a_path() {
        let mut registry = Registry::new();
        registry.append_stage("same");
        registry.append_alternative("same");
        registry.append_stage("same");

        let named: Vec<_> = registry
            .tests()
            .map(|(name, builder)| (name, builder.label().map(str::to_string), builder.position()))
            .collect();
        let names: std::collections::HashSet<_> = named.iter().map(|(name, _, _)| name).collect();
        let coordinates: std::collections::HashSet<_> =
            named.iter().map(|(_, label, position)| (label, position)).collect();
        assert_eq!(named.len(), 4);
        assert_eq!(names.len(), 2);
        assert_eq!(coordinates.len(), 4);
    }

    #[test]
    fn stage_with_ten_or_more_alternatives_uses_wider_labels() {
        let mut registry = Registry::new();
        registry.append_stage("base");
        for index in 1..12 {
            registry.append_alternative(format!("variant-{index}"));
        }
        let last = registry.tests().last().map(|(name, _)| name);
        assert_eq!(last.as_deref(), Some("Test Alternative #11_variant-11"));
        let first = registry.tests().next().map(|(name, _)| name);
        assert_eq!(first.as_deref(), Some("Test Alternative #00_base"));
    }
}

#[cfg(test)]
mod context_forwarding_tests {
    use super::*;

    #[test]
    fn context_reaches_every_setup() {
        let mut registry = Registry::new();
        registry
            .append_stage("one")
            .with_cumulative_setup(|ctx: &TestContext, _, _| ctx.log("cumulative one"));
        registry
            .append_stage("two")
            .with_cumulative_setup(|ctx: &TestContext, _, _| ctx.log("cumulative two"))
            .with_one_shot_setup(|ctx: &TestContext, _, _| ctx.log("one-shot two"));

        let (name, builder) = registry.tests().nth(1).unwrap();
        let ctx = TestContext::new(name);
        builder.build(&ctx);
        assert_eq!(
            ctx.logs(),
            vec!["cumulative one", "cumulative two", "one-shot two"]
        );
    }

    #[test]
    fn custom_context_type_is_forwarded_unexamined() {
        struct Recorder(std::cell::RefCell<Vec<usize>>);

        let mut registry: StageRegistry<u32, u32, (), Recorder> = StageRegistry::new();
        registry.append_stage("a").with_cumulative_setup(|ctx, sut, _| {
            ctx.0.borrow_mut().push(1);
            *sut += 1;
        });
        registry.append_stage("b").with_cumulative_setup(|ctx, sut, _| {
            ctx.0.borrow_mut().push(2);
            *sut += 10;
        });

        let recorder = Recorder(std::cell::RefCell::new(Vec::new()));
        let sums: Vec<_> = registry
            .tests()
            .map(|(_, builder)| builder.build(&recorder).sut)
            .collect();
        assert_eq!(sums, vec![1, 11]);
        assert_eq!(*recorder.0.borrow(), vec![1, 1, 2]);
    }

    #[test]
    fn setup_panics_propagate_to_the_caller() {
        let mut registry = Registry::new();
        registry
            .append_stage("boom")
            .with_cumulative_setup(|_, _, _| panic!("setup exploded"));
        registry.append_stage("after");

        let builders: Vec<_> = registry.tests().collect();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            builders[1].1.build(&TestContext::new("after"))
        }));
        assert!(result.is_err());
        assert_eq!(builders.len(), 2);
    }
}
