//! End-to-end condition compilation scenarios.

#[cfg(test)]
mod tests {
    use docstack_expression::{
        AttributeTypeTag, AttributeValue, Condition, ExpressionError, Operand, Path,
        compile_condition,
    };

    use crate::init_tracing;

    #[test]
    fn test_should_compile_documented_round_trip() {
        init_tracing();

        let condition = Condition::equal(Path::new("user.age"), 42_i64);
        let compiled = compile_condition(&condition).unwrap();

        assert_eq!(compiled.expression, "#attr1.#attr2 = :value1");

        let names = compiled.names.unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names.get("#attr1"), Some(&"user".to_owned()));
        assert_eq!(names.get("#attr2"), Some(&"age".to_owned()));

        let values = compiled.values.unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values.get(":value1"), Some(&AttributeValue::N("42".into())));
    }

    #[test]
    fn test_should_share_token_for_repeated_path() {
        init_tracing();

        let condition = Condition::attribute_exists(Path::new("a"))
            .and(Condition::attribute_not_exists(Path::new("a")));
        let compiled = compile_condition(&condition).unwrap();

        assert_eq!(
            compiled.expression,
            "(attribute_exists(#attr1) AND attribute_not_exists(#attr1))"
        );
        assert_eq!(compiled.names.unwrap().len(), 1);
        assert!(compiled.values.is_none());
    }

    #[test]
    fn test_should_compile_nested_combinators() {
        init_tracing();

        let condition = Condition::between(Path::new("price"), 10_i64, 100_i64)
            .unwrap()
            .and(
                Condition::begins_with(Path::new("sku"), "BOOK#")
                    .unwrap()
                    .or(Condition::contains(Path::new("tags"), "fiction")),
            )
            .not();
        let compiled = compile_condition(&condition).unwrap();

        assert_eq!(
            compiled.expression,
            "(NOT (#attr1 BETWEEN :value1 AND :value2 AND \
             (begins_with(#attr2, :value3) OR contains(#attr3, :value4))))"
        );
    }

    #[test]
    fn test_should_compile_membership_with_size_subject() {
        init_tracing();

        let condition = Condition::is_in(
            Operand::size(Path::new("tags")),
            vec![1_i64.into(), 2_i64.into(), 3_i64.into()],
        )
        .unwrap();
        let compiled = compile_condition(&condition).unwrap();

        assert_eq!(
            compiled.expression,
            "size(#attr1) IN (:value1,:value2,:value3)"
        );
    }

    #[test]
    fn test_should_compile_attribute_type_check() {
        init_tracing();

        let condition = Condition::attribute_type(Path::new("scores"), AttributeTypeTag::NumberSet);
        let compiled = compile_condition(&condition).unwrap();

        assert_eq!(compiled.expression, "attribute_type(#attr1, :value1)");
        assert_eq!(
            compiled.values.unwrap().get(":value1"),
            Some(&AttributeValue::S("NS".into()))
        );
    }

    #[test]
    fn test_should_serialize_value_table_in_wire_format() -> anyhow::Result<()> {
        init_tracing();

        let condition = Condition::equal(Path::new("active"), true);
        let compiled = compile_condition(&condition)?;

        let json = serde_json::to_string(&compiled.values.unwrap())?;
        assert_eq!(json, r#"{":value1":{"BOOL":true}}"#);
        Ok(())
    }

    #[test]
    fn test_should_propagate_lazy_path_error_from_compile() {
        init_tracing();

        // The bad path is only rejected once compilation renders it.
        let condition = Condition::equal(Path::new("items[]"), 1_i64);
        let err = compile_condition(&condition).unwrap_err();
        assert!(matches!(err, ExpressionError::PathSyntax { .. }));
    }

    #[test]
    fn test_should_compare_two_paths_without_values() {
        init_tracing();

        let condition = Condition::greater_or_equal(Path::new("high"), Path::new("low")).unwrap();
        let compiled = compile_condition(&condition).unwrap();

        assert_eq!(compiled.expression, "#attr1 >= #attr2");
        assert!(compiled.values.is_none());
    }
}
