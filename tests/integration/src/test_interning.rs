//! Interning behavior across whole compile calls.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use docstack_expression::{
        AttributeValue, Condition, NameRegistry, Operand, Path, Render, ValueRegistry,
        compile_condition,
    };

    use crate::init_tracing;

    #[test]
    fn test_should_dedup_equal_scalar_values_across_nodes() {
        init_tracing();

        let condition = Condition::equal(Path::new("a"), "same")
            .and(Condition::equal(Path::new("b"), "same"));
        let compiled = compile_condition(&condition).unwrap();

        assert_eq!(compiled.expression, "(#attr1 = :value1 AND #attr2 = :value1)");
        assert_eq!(compiled.values.unwrap().len(), 1);
    }

    #[test]
    fn test_should_keep_distinct_composite_instances_distinct() {
        init_tracing();

        let list = || AttributeValue::L(vec![AttributeValue::from(1_i64)]);
        let condition =
            Condition::equal(Path::new("a"), list()).and(Condition::equal(Path::new("b"), list()));
        let compiled = compile_condition(&condition).unwrap();

        assert_eq!(compiled.expression, "(#attr1 = :value1 AND #attr2 = :value2)");
        assert_eq!(compiled.values.unwrap().len(), 2);
    }

    #[test]
    fn test_should_share_token_for_shared_composite_instance() {
        init_tracing();

        let shared = Arc::new(AttributeValue::L(vec![AttributeValue::from(1_i64)]));
        let condition = Condition::equal(Path::new("a"), Operand::from(Arc::clone(&shared)))
            .and(Condition::equal(Path::new("b"), Operand::from(shared)));
        let compiled = compile_condition(&condition).unwrap();

        assert_eq!(compiled.expression, "(#attr1 = :value1 AND #attr2 = :value1)");
        assert_eq!(compiled.values.unwrap().len(), 1);
    }

    #[test]
    fn test_should_number_tokens_across_modes_in_intern_order() {
        init_tracing();

        let mut names = NameRegistry::new();
        names.intern(&Path::literal("one")).unwrap();
        names.intern(&Path::new("two")).unwrap();
        names.intern(&Path::new("three")).unwrap();
        names.intern(&Path::literal("one")).unwrap();

        let map = names.into_substitutions().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("#attr1"), Some(&"one".to_owned()));
        assert_eq!(map.get("#attr2"), Some(&"two".to_owned()));
        assert_eq!(map.get("#attr3"), Some(&"three".to_owned()));
    }

    #[test]
    fn test_should_reuse_placeholders_when_rendering_twice() {
        init_tracing();

        let mut names = NameRegistry::new();
        let mut values = ValueRegistry::new();

        let condition = Condition::equal(Path::new("status"), "open");
        let first = condition.render(&mut names, &mut values).unwrap();
        let second = condition.render(&mut names, &mut values).unwrap();

        assert_eq!(first, second);
        assert_eq!(values.into_substitutions().unwrap().len(), 1);
        assert_eq!(names.into_substitutions().unwrap().len(), 1);
    }

    #[test]
    fn test_should_isolate_registries_between_compile_calls() {
        init_tracing();

        let first = compile_condition(&Condition::equal(Path::new("x"), 1_i64)).unwrap();
        let second = compile_condition(&Condition::equal(Path::new("y"), 2_i64)).unwrap();

        // Both start numbering from one; no state leaks across calls.
        assert_eq!(first.expression, "#attr1 = :value1");
        assert_eq!(second.expression, "#attr1 = :value1");
    }
}
